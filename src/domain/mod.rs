pub mod response;
pub mod ticket;
