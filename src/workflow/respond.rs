use crate::domain::response::{ResponseRequest, SentResponse};
use crate::domain::ticket::TicketId;
use crate::error::{AppError, AppResult};
use crate::form::{FieldErrors, FormField, validate_response_text};
use crate::services::ResponseService;
use crate::store::TicketStore;

pub struct RespondOutcome {
    pub sent: SentResponse,
    /// False when the send went through but the follow-up reload failed.
    pub reloaded: bool,
}

/// Sends an employee's reply to the ticket's customer, then reloads the
/// whole collection to pick up the backend's response timestamps. A failed
/// send is returned as-is and never retried.
pub async fn respond_to_ticket(
    store: &mut TicketStore,
    responder: &dyn ResponseService,
    id: TicketId,
    text: &str,
    sent_by: Option<String>,
) -> AppResult<RespondOutcome> {
    validate_response_text(text)?;

    let ticket = store.get(id).ok_or(AppError::NotFound(id))?;
    if ticket.customer_email.as_deref().is_none_or(|email| email.trim().is_empty()) {
        let mut errors = FieldErrors::default();
        errors.insert(FormField::CustomerEmail, "Ticket has no customer email");
        return Err(AppError::Validation(errors));
    }

    let request = ResponseRequest::for_ticket(ticket, text, sent_by);
    let sent = responder.send_response(id, &request).await.map_err(|err| {
        tracing::error!("failed to send response for ticket #{id}: {err}");
        err
    })?;
    tracing::info!("response sent for ticket #{id}");

    let reloaded = match store.load().await {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!("reload after response failed: {err}");
            false
        }
    };

    Ok(RespondOutcome { sent, reloaded })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use super::*;
    use crate::board::BoardLayout;
    use crate::domain::response::EmailStatus;
    use crate::domain::ticket::Ticket;
    use crate::domain::ticket::fixtures::ticket;
    use crate::store::testing::{Call, FakeBackend};

    #[derive(Default)]
    struct FakeResponder {
        sent: Mutex<Vec<(TicketId, ResponseRequest)>>,
        failing: bool,
    }

    #[async_trait]
    impl ResponseService for FakeResponder {
        async fn send_response(
            &self,
            ticket_id: TicketId,
            request: &ResponseRequest,
        ) -> AppResult<SentResponse> {
            if self.failing {
                return Err(AppError::Api {
                    status: StatusCode::SERVICE_UNAVAILABLE,
                });
            }
            self.sent.lock().unwrap().push((ticket_id, request.clone()));
            Ok(SentResponse {
                id: 1,
                ticket_id,
                subject: format!("Response to: {}", request.ticket_title),
                response_text: request.response.clone(),
                sent_to: request.customer_email.clone(),
                sent_by: request.sent_by.clone(),
                created_at: None,
                sent_at: None,
                email_status: EmailStatus::Sent,
                error_message: None,
            })
        }

        async fn list_responses(&self, _ticket_id: TicketId) -> AppResult<Vec<SentResponse>> {
            Ok(Vec::new())
        }
    }

    async fn store_with(tickets: Vec<Ticket>) -> (Arc<FakeBackend>, TicketStore) {
        let backend = FakeBackend::with(tickets);
        let mut store = TicketStore::new(backend.clone(), BoardLayout::Dashboard);
        store.load().await.unwrap();
        (backend, store)
    }

    #[tokio::test]
    async fn sends_and_reloads() {
        let (backend, mut store) = store_with(vec![ticket(3, "Refund")]).await;
        let responder = FakeResponder::default();

        let outcome = respond_to_ticket(&mut store, &responder, 3, "Done!", Some("Lise".into()))
            .await
            .unwrap();
        assert!(outcome.reloaded);
        assert_eq!(outcome.sent.sent_to, "kari@example.no");
        assert_eq!(backend.calls(), vec![Call::List, Call::List]);

        let sent = responder.sent.lock().unwrap();
        assert_eq!(sent[0].1.ticket_title, "Refund");
        assert_eq!(sent[0].1.sent_by.as_deref(), Some("Lise"));
    }

    #[tokio::test]
    async fn blank_text_is_rejected_before_sending() {
        let (_backend, mut store) = store_with(vec![ticket(3, "Refund")]).await;
        let responder = FakeResponder::default();
        let result = respond_to_ticket(&mut store, &responder, 3, "   ", None).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(responder.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_propagates_without_reload() {
        let (backend, mut store) = store_with(vec![ticket(3, "Refund")]).await;
        let responder = FakeResponder {
            failing: true,
            ..Default::default()
        };
        let result = respond_to_ticket(&mut store, &responder, 3, "Hello", None).await;
        assert!(matches!(result, Err(AppError::Api { .. })));
        assert_eq!(backend.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn ticket_without_email_cannot_be_answered() {
        let mut anonymous = ticket(4, "Anonymous");
        anonymous.customer_email = None;
        let (_backend, mut store) = store_with(vec![anonymous]).await;
        let responder = FakeResponder::default();
        let result = respond_to_ticket(&mut store, &responder, 4, "Hello", None).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
