use serde::{Deserialize, Serialize};

use crate::domain::ticket::{Ticket, TicketId};

/// Body of a send-response call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRequest {
    pub customer_email: String,
    pub customer_name: String,
    pub ticket_title: String,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_by: Option<String>,
}

impl ResponseRequest {
    pub fn for_ticket(ticket: &Ticket, response: &str, sent_by: Option<String>) -> Self {
        Self {
            customer_email: ticket.customer_email.clone().unwrap_or_default(),
            customer_name: ticket.customer_name.clone().unwrap_or_default(),
            ticket_title: ticket.title.clone(),
            response: response.trim().to_string(),
            sent_by,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    Pending,
    Sent,
    Failed,
    Delivered,
}

/// The backend's record of a response sent to a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentResponse {
    pub id: i64,
    pub ticket_id: TicketId,
    pub subject: String,
    pub response_text: String,
    pub sent_to: String,
    pub sent_by: Option<String>,
    pub created_at: Option<String>,
    pub sent_at: Option<String>,
    pub email_status: EmailStatus,
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::fixtures::ticket;

    #[test]
    fn builds_request_from_ticket_contact() {
        let ticket = ticket(12, "Missing VAT receipt");
        let request = ResponseRequest::for_ticket(&ticket, "  We are on it.\n", None);
        assert_eq!(request.customer_email, "kari@example.no");
        assert_eq!(request.customer_name, "Kari Nordmann");
        assert_eq!(request.ticket_title, "Missing VAT receipt");
        assert_eq!(request.response, "We are on it.");

        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("sent_by").is_none());
    }

    #[test]
    fn parses_sent_response() {
        let raw = r#"{
            "id": 1, "ticket_id": 12, "subject": "Re: Missing VAT receipt",
            "response_text": "We are on it.", "sent_to": "kari@example.no",
            "sent_by": null, "created_at": "2025-03-02T10:00:00",
            "sent_at": "2025-03-02T10:00:01", "email_status": "sent",
            "error_message": null, "message_id": "abc"
        }"#;
        let parsed: SentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.email_status, EmailStatus::Sent);
        assert_eq!(parsed.ticket_id, 12);
    }
}
