pub mod book;
pub mod responses;
pub mod session;
pub mod storage;
