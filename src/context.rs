use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{ResponseService, TicketService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub tickets: Arc<dyn TicketService>,
    pub responses: Arc<dyn ResponseService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        tickets: Arc<dyn TicketService>,
        responses: Arc<dyn ResponseService>,
    ) -> Self {
        Self {
            config,
            tickets,
            responses,
        }
    }
}
