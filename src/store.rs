//! The dashboard's ticket collection.
//!
//! `TicketStore` is the single owner of the loaded tickets. Every mutation
//! goes to the backend first and is applied locally only once the backend
//! confirms it; a failed call leaves the collection exactly as it was.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::board::{BoardLayout, Column, Metrics, MoveTicket, StatusCounts, TicketFilter};
use crate::domain::ticket::{Category, ListQuery, Ticket, TicketId, TicketInput, TicketPatch};
use crate::error::{AppError, AppResult};
use crate::services::TicketService;

pub struct TicketStore {
    service: Arc<dyn TicketService>,
    tickets: Vec<Ticket>,
    layout: BoardLayout,
    pub filter: TicketFilter,
}

impl TicketStore {
    pub fn new(service: Arc<dyn TicketService>, layout: BoardLayout) -> Self {
        Self {
            service,
            tickets: Vec::new(),
            layout,
            filter: TicketFilter::default(),
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn layout(&self) -> BoardLayout {
        self.layout
    }

    pub fn get(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|ticket| ticket.id == id)
    }

    fn position(&self, id: TicketId) -> AppResult<usize> {
        self.tickets
            .iter()
            .position(|ticket| ticket.id == id)
            .ok_or(AppError::NotFound(id))
    }

    /// Replaces the collection with the backend's full list.
    pub async fn load(&mut self) -> AppResult<usize> {
        let tickets = self.service.list_tickets(&ListQuery::default()).await?;
        tracing::debug!("loaded {} tickets", tickets.len());
        self.tickets = tickets;
        Ok(self.tickets.len())
    }

    /// Creates a ticket from validated input and puts it first.
    pub async fn create(&mut self, input: &TicketInput) -> AppResult<&Ticket> {
        let created = self.service.create_ticket(input).await?;
        tracing::info!("created ticket #{}", created.id);
        self.tickets.insert(0, created);
        Ok(&self.tickets[0])
    }

    /// Sends `patch` and swaps the local ticket for the backend's copy. An
    /// empty patch is a no-op that never reaches the network.
    pub async fn update(&mut self, id: TicketId, patch: &TicketPatch) -> AppResult<&Ticket> {
        let index = self.position(id)?;
        if patch.is_empty() {
            return Ok(&self.tickets[index]);
        }

        let updated = self.service.update_ticket(id, patch).await?;
        self.tickets[index] = updated;
        Ok(&self.tickets[index])
    }

    /// Deletes a ticket, dropping it locally once the backend confirms.
    pub async fn remove(&mut self, id: TicketId) -> AppResult<Ticket> {
        let index = self.position(id)?;
        self.service.delete_ticket(id).await?;
        tracing::info!("deleted ticket #{id}");
        Ok(self.tickets.remove(index))
    }

    pub async fn move_ticket(&mut self, command: MoveTicket) -> AppResult<&Ticket> {
        let patch = command.patch(self.layout);
        self.update(command.id, &patch).await
    }

    /// Tickets passing the current filter, in collection order.
    pub fn visible(&self) -> Vec<&Ticket> {
        self.filter.apply(&self.tickets)
    }

    pub fn columns(&self) -> Vec<Column<'_>> {
        self.layout.group(&self.visible())
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts::from_columns(self.tickets.len(), &self.columns())
    }

    pub fn categories(&self) -> Vec<Category> {
        crate::board::categories_present(&self.tickets)
    }

    pub fn metrics(&self, today: NaiveDate) -> Metrics {
        Metrics::compute(&self.tickets, today)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Call, FakeBackend};
    use super::*;
    use crate::board::ColumnId;
    use crate::domain::ticket::fixtures::ticket;
    use crate::domain::ticket::{Priority, TicketStatus};

    async fn loaded(tickets: Vec<Ticket>) -> (Arc<FakeBackend>, TicketStore) {
        let backend = FakeBackend::with(tickets);
        let mut store = TicketStore::new(backend.clone(), BoardLayout::Dashboard);
        store.load().await.unwrap();
        (backend, store)
    }

    fn input(title: &str) -> TicketInput {
        TicketInput {
            title: title.to_string(),
            description: None,
            category: Category::Returns,
            priority: Priority::High,
            customer_name: Some("Ola".to_string()),
            customer_email: Some("ola@example.no".to_string()),
            customer_phone: None,
        }
    }

    #[tokio::test]
    async fn failed_load_keeps_existing_collection() {
        let (backend, mut store) = loaded(vec![ticket(1, "a"), ticket(2, "b")]).await;
        backend.fail(true);
        assert!(store.load().await.is_err());
        assert_eq!(store.tickets().len(), 2);
    }

    #[tokio::test]
    async fn create_prepends_backend_ticket() {
        let (_backend, mut store) = loaded(vec![ticket(1, "older")]).await;
        let created = store.create(&input("newest")).await.unwrap().id;
        assert_eq!(created, 2);
        assert_eq!(store.tickets()[0].title, "newest");
        assert_eq!(store.tickets().len(), 2);
    }

    #[tokio::test]
    async fn failed_create_leaves_state_untouched() {
        let (backend, mut store) = loaded(vec![ticket(1, "older")]).await;
        backend.fail(true);
        assert!(store.create(&input("lost")).await.is_err());
        assert_eq!(store.tickets().len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_ticket_with_backend_copy() {
        let (_backend, mut store) = loaded(vec![ticket(1, "a")]).await;
        let patch = TicketPatch {
            title: Some("renamed".to_string()),
            ..Default::default()
        };
        store.update(1, &patch).await.unwrap();
        let updated = store.get(1).unwrap();
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.updated_at.as_deref(), Some("2025-03-02T12:00:00"));
    }

    #[tokio::test]
    async fn empty_patch_skips_network() {
        let (backend, mut store) = loaded(vec![ticket(1, "a")]).await;
        store.update(1, &TicketPatch::default()).await.unwrap();
        assert_eq!(backend.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn move_issues_one_status_update() {
        let (backend, mut store) = loaded(vec![ticket(1, "a"), ticket(2, "b")]).await;
        let command = MoveTicket {
            id: 2,
            column: ColumnId::Finished,
        };
        store.move_ticket(command).await.unwrap();

        assert_eq!(
            backend.calls(),
            vec![
                Call::List,
                Call::Update(2, TicketPatch::status(TicketStatus::Resolved))
            ]
        );
        let columns = store.columns();
        assert!(columns[0].tickets.iter().all(|t| t.id != 2));
        assert!(columns[1].tickets.iter().all(|t| t.id != 2));
        assert!(columns[2].tickets.iter().any(|t| t.id == 2));
    }

    #[tokio::test]
    async fn move_of_unknown_ticket_makes_no_call() {
        let (backend, mut store) = loaded(vec![ticket(1, "a")]).await;
        let command = MoveTicket {
            id: 99,
            column: ColumnId::New,
        };
        assert!(matches!(
            store.move_ticket(command).await,
            Err(AppError::NotFound(99))
        ));
        assert_eq!(backend.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn rejected_delete_keeps_ticket_visible() {
        let (backend, mut store) = loaded(vec![ticket(1, "a")]).await;
        backend.fail(true);
        assert!(store.remove(1).await.is_err());
        assert_eq!(store.visible().len(), 1);

        backend.fail(false);
        let removed = store.remove(1).await.unwrap();
        assert_eq!(removed.id, 1);
        assert!(store.visible().is_empty());
    }

    #[tokio::test]
    async fn filter_drives_columns_but_not_counts_total() {
        let mut vat = ticket(1, "VAT return");
        vat.status = TicketStatus::InProgress;
        let (_backend, mut store) = loaded(vec![vat, ticket(2, "Payroll")]).await;
        store.filter.search = "vat".to_string();

        let columns = store.columns();
        assert!(columns[0].is_empty());
        assert_eq!(columns[1].len(), 1);

        let counts = store.counts();
        assert_eq!(counts.total, 2);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.new, 0);
    }
}
