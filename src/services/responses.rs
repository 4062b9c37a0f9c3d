use async_trait::async_trait;

use crate::domain::response::{ResponseRequest, SentResponse};
use crate::domain::ticket::TicketId;
use crate::error::AppResult;

/// Outbound customer messages. Delivery itself happens behind the backend.
#[async_trait]
pub trait ResponseService: Send + Sync {
    async fn send_response(
        &self,
        ticket_id: TicketId,
        request: &ResponseRequest,
    ) -> AppResult<SentResponse>;
    async fn list_responses(&self, ticket_id: TicketId) -> AppResult<Vec<SentResponse>>;
}
