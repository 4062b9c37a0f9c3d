pub mod board;
pub mod config;
pub mod submit;
pub mod ticket;
