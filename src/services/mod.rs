pub mod responses;
pub mod tickets;

pub use responses::ResponseService;
pub use tickets::TicketService;
