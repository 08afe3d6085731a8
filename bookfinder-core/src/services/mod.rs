pub mod favorites;
pub mod normalize;
pub mod search;
pub mod session;
pub mod transport;
