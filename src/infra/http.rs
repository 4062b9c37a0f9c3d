use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::response::{ResponseRequest, SentResponse};
use crate::domain::ticket::{ListQuery, Ticket, TicketId, TicketInput, TicketPatch};
use crate::error::{AppError, AppResult};
use crate::services::{ResponseService, TicketService};

/// REST client for the case backend. Any non-2xx status is a failure; the
/// response body is never inspected for error detail.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> AppResult<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(AppError::Configuration(
                "API base URL must not be empty".to_string(),
            ));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_endpoint(&self) -> String {
        format!("{}/tickets/", self.base_url)
    }

    fn ticket_endpoint(&self, id: TicketId) -> String {
        format!("{}/tickets/{id}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> AppResult<Response> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| {
                tracing::warn!("{action} failed: {err}");
                AppError::Transport(format!("{action}: {err}"))
            })?;

        let status = response.status();
        tracing::debug!("{action} -> {status}");
        if !status.is_success() {
            tracing::warn!("{action} rejected with {status}");
            return Err(AppError::Api { status });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response, action: &str) -> AppResult<T> {
        response.json::<T>().await.map_err(|err| {
            tracing::warn!("{action}: unreadable response body: {err}");
            AppError::Transport(format!("failed to parse response to {action}: {err}"))
        })
    }
}

/// Decodes each record on its own so one ticket with a status or category
/// this client does not know only drops that ticket.
fn tickets_from_records(records: Vec<Value>) -> Vec<Ticket> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.get("id").cloned().unwrap_or(Value::Null);
            match serde_json::from_value::<Ticket>(record) {
                Ok(ticket) => Some(ticket),
                Err(err) => {
                    tracing::warn!("skipping ticket {id}: {err}");
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl TicketService for ApiClient {
    async fn list_tickets(&self, query: &ListQuery) -> AppResult<Vec<Ticket>> {
        let request = self.http.get(self.collection_endpoint()).query(query);
        let response = self.send(request, "list tickets").await?;
        let records: Vec<Value> = Self::decode(response, "list tickets").await?;
        Ok(tickets_from_records(records))
    }

    async fn get_ticket(&self, id: TicketId) -> AppResult<Ticket> {
        let request = self.http.get(self.ticket_endpoint(id));
        let response = self.send(request, "get ticket").await?;
        Self::decode(response, "get ticket").await
    }

    async fn create_ticket(&self, input: &TicketInput) -> AppResult<Ticket> {
        let request = self
            .http
            .post(self.collection_endpoint())
            .header(CONTENT_TYPE, "application/json")
            .json(input);
        let response = self.send(request, "create ticket").await?;
        Self::decode(response, "create ticket").await
    }

    async fn update_ticket(&self, id: TicketId, patch: &TicketPatch) -> AppResult<Ticket> {
        let request = self
            .http
            .put(self.ticket_endpoint(id))
            .header(CONTENT_TYPE, "application/json")
            .json(patch);
        let response = self.send(request, "update ticket").await?;
        Self::decode(response, "update ticket").await
    }

    async fn delete_ticket(&self, id: TicketId) -> AppResult<()> {
        let request = self.http.delete(self.ticket_endpoint(id));
        self.send(request, "delete ticket").await?;
        Ok(())
    }
}

#[async_trait]
impl ResponseService for ApiClient {
    async fn send_response(
        &self,
        ticket_id: TicketId,
        request: &ResponseRequest,
    ) -> AppResult<SentResponse> {
        let endpoint = format!("{}/respond", self.ticket_endpoint(ticket_id));
        let builder = self
            .http
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(request);
        let response = self.send(builder, "send response").await?;
        Self::decode(response, "send response").await
    }

    async fn list_responses(&self, ticket_id: TicketId) -> AppResult<Vec<SentResponse>> {
        let endpoint = format!("{}/responses", self.ticket_endpoint(ticket_id));
        let response = self.send(self.http.get(endpoint), "list responses").await?;
        Self::decode(response, "list responses").await
    }
}
