pub mod modal;
pub mod respond;
pub mod submit;
