use async_trait::async_trait;

use crate::domain::ticket::{ListQuery, Ticket, TicketId, TicketInput, TicketPatch};
use crate::error::AppResult;

#[async_trait]
pub trait TicketService: Send + Sync {
    async fn list_tickets(&self, query: &ListQuery) -> AppResult<Vec<Ticket>>;
    async fn get_ticket(&self, id: TicketId) -> AppResult<Ticket>;
    async fn create_ticket(&self, input: &TicketInput) -> AppResult<Ticket>;
    async fn update_ticket(&self, id: TicketId, patch: &TicketPatch) -> AppResult<Ticket>;
    async fn delete_ticket(&self, id: TicketId) -> AppResult<()>;
}
