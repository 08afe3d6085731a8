pub mod cover;
pub mod text;
