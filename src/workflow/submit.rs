use crate::cache::PendingSubmissions;
use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};
use crate::form::{FormVariant, TicketForm};
use crate::services::TicketService;

pub enum SubmitOutcome {
    Submitted(Ticket),
    /// The backend could not be reached or failed with a server error; the
    /// case was kept locally under this key for a later retry.
    Queued { key: String, error: AppError },
}

/// Public case submission. The form always uses the extended rule set and
/// is independent of any dashboard store.
pub async fn submit_case(
    service: &dyn TicketService,
    form: &mut TicketForm,
    pending: &mut PendingSubmissions,
) -> AppResult<SubmitOutcome> {
    form.variant = FormVariant::Extended;
    let input = form.validate().map_err(AppError::Validation)?;

    match service.create_ticket(&input).await {
        Ok(ticket) => {
            tracing::info!("case #{} submitted", ticket.id);
            form.clear();
            Ok(SubmitOutcome::Submitted(ticket))
        }
        Err(error) if error.is_retryable() => {
            let key = pending.insert(&input);
            pending.save()?;
            tracing::warn!("case submission queued as {key}: {error}");
            Ok(SubmitOutcome::Queued { key, error })
        }
        Err(error) => Err(error),
    }
}

pub struct RetrySummary {
    pub submitted: Vec<Ticket>,
    pub failures: Vec<AppError>,
    pub remaining: usize,
}

/// Sends every queued submission once, dropping the ones that succeed.
pub async fn retry_pending(
    service: &dyn TicketService,
    pending: &mut PendingSubmissions,
) -> AppResult<RetrySummary> {
    let mut submitted = Vec::new();
    let mut failures = Vec::new();

    for (key, input) in pending.entries() {
        match service.create_ticket(&input).await {
            Ok(ticket) => {
                pending.remove(&key);
                submitted.push(ticket);
            }
            Err(error) => {
                tracing::warn!("queued case {key} still failing: {error}");
                failures.push(error);
            }
        }
    }

    pending.save()?;
    Ok(RetrySummary {
        submitted,
        failures,
        remaining: pending.len(),
    })
}
