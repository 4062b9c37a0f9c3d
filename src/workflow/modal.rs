use crate::domain::ticket::{Ticket, TicketId, TicketPatch};
use crate::error::{AppError, AppResult};
use crate::form::TicketForm;
use crate::store::TicketStore;

/// What the create/edit modal is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit(TicketId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalOutcome {
    Created(Ticket),
    Updated(Ticket),
    /// The edit changed nothing, so no request was made.
    Unchanged(Ticket),
}

/// Validates the form and routes it to the create or update path. A
/// successful create clears the form; validation errors stay on the form.
pub async fn submit_modal(
    store: &mut TicketStore,
    form: &mut TicketForm,
    mode: ModalMode,
) -> AppResult<ModalOutcome> {
    let input = form.validate().map_err(AppError::Validation)?;

    match mode {
        ModalMode::Create => {
            let created = store.create(&input).await?.clone();
            form.clear();
            Ok(ModalOutcome::Created(created))
        }
        ModalMode::Edit(id) => {
            let current = store.get(id).ok_or(AppError::NotFound(id))?;
            let patch = TicketPatch::diff(current, &input);
            if patch.is_empty() {
                return Ok(ModalOutcome::Unchanged(current.clone()));
            }
            let updated = store.update(id, &patch).await?.clone();
            Ok(ModalOutcome::Updated(updated))
        }
    }
}
