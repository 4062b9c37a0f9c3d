use clap::Args;

use crate::board::MoveTicket;
use crate::cmd::board::load_store;
use crate::context::AppContext;
use crate::display;
use crate::domain::ticket::TicketId;
use crate::error::{AppError, AppResult};
use crate::form::{FormField, FormVariant, TicketForm};
use crate::workflow::modal::{ModalMode, ModalOutcome, submit_modal};
use crate::workflow::respond::respond_to_ticket;

/// Ticket fields as typed on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct TicketFieldArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// returns, vat, deductions, compliance or other.
    #[arg(long)]
    pub category: Option<String>,
    /// low, medium, high or critical.
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub customer_name: Option<String>,
    #[arg(long)]
    pub customer_email: Option<String>,
    #[arg(long)]
    pub customer_phone: Option<String>,
}

impl TicketFieldArgs {
    /// Copies every provided value into the form.
    pub fn apply(&self, form: &mut TicketForm) {
        let fields = [
            (FormField::Title, &self.title),
            (FormField::Description, &self.description),
            (FormField::Category, &self.category),
            (FormField::Priority, &self.priority),
            (FormField::CustomerName, &self.customer_name),
            (FormField::CustomerEmail, &self.customer_email),
            (FormField::CustomerPhone, &self.customer_phone),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                form.set(field, value.clone());
            }
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RespondArgs {
    pub id: TicketId,
    /// Message to send to the customer.
    #[arg(short, long)]
    pub message: String,
    /// Name of the employee answering; defaults to the configured name.
    #[arg(long)]
    pub sent_by: Option<String>,
}

pub async fn run_create(ctx: &AppContext, fields: TicketFieldArgs) -> AppResult<()> {
    let mut store = load_store(ctx).await?;
    let mut form = TicketForm::new(FormVariant::Extended);
    fields.apply(&mut form);

    match submit_modal(&mut store, &mut form, ModalMode::Create).await {
        Ok(ModalOutcome::Created(ticket)) => {
            println!("Ticket #{} created.", ticket.id);
            print!("{}", display::card(&ticket, true));
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(err) => Err(report_failure("create", err)),
    }
}

pub async fn run_edit(ctx: &AppContext, id: TicketId, fields: TicketFieldArgs) -> AppResult<()> {
    let mut store = load_store(ctx).await?;
    let current = store.get(id).ok_or(AppError::NotFound(id))?;
    let mut form = TicketForm::from_ticket(FormVariant::Extended, current);
    fields.apply(&mut form);

    match submit_modal(&mut store, &mut form, ModalMode::Edit(id)).await {
        Ok(ModalOutcome::Updated(ticket)) => {
            println!("Ticket #{} updated.", ticket.id);
            print!("{}", display::card(&ticket, true));
            Ok(())
        }
        Ok(_) => {
            println!("Nothing changed on ticket #{id}.");
            Ok(())
        }
        Err(err) => Err(report_failure("update", err)),
    }
}

pub async fn run_move(ctx: &AppContext, id: TicketId, column_key: &str) -> AppResult<()> {
    let mut store = load_store(ctx).await?;
    let layout = store.layout();
    let column = layout.column_by_key(column_key).ok_or_else(|| {
        let keys = layout
            .columns()
            .iter()
            .map(|column| column.key)
            .collect::<Vec<_>>()
            .join(", ");
        AppError::Configuration(format!("unknown column '{column_key}' (expected {keys})"))
    })?;

    let command = MoveTicket {
        id,
        column: column.id,
    };
    match store.move_ticket(command).await {
        Ok(ticket) => {
            println!("Ticket #{} moved to {}.", ticket.id, column.title);
            Ok(())
        }
        Err(err) => Err(report_failure("update", err)),
    }
}

pub async fn run_delete(ctx: &AppContext, id: TicketId) -> AppResult<()> {
    let mut store = load_store(ctx).await?;
    match store.remove(id).await {
        Ok(ticket) => {
            println!("Ticket #{} deleted: {}", ticket.id, ticket.title);
            Ok(())
        }
        Err(err) => Err(report_failure("delete", err)),
    }
}

pub async fn run_respond(ctx: &AppContext, args: RespondArgs) -> AppResult<()> {
    let mut store = load_store(ctx).await?;
    let sent_by = args.sent_by.or_else(|| ctx.config.employee_name.clone());

    match respond_to_ticket(
        &mut store,
        ctx.responses.as_ref(),
        args.id,
        &args.message,
        sent_by,
    )
    .await
    {
        Ok(outcome) => {
            println!("Response sent to {}.", outcome.sent.sent_to);
            if !outcome.reloaded {
                eprintln!("Warning: could not refresh tickets after sending.");
            }
            Ok(())
        }
        Err(err) => Err(report_failure("send response for", err)),
    }
}

pub async fn run_responses(ctx: &AppContext, id: TicketId) -> AppResult<()> {
    let responses = ctx.responses.list_responses(id).await?;
    print!("{}", display::responses(&responses));
    Ok(())
}

/// Prints the user-facing notice for a failed action and hands the error
/// back for the exit status.
fn report_failure(action: &str, err: AppError) -> AppError {
    match &err {
        AppError::Validation(errors) => {
            eprintln!("Please fix the following fields:");
            eprint!("{}", display::field_errors(errors));
        }
        _ if err.is_remote() => {
            tracing::error!("failed to {action} ticket: {err}");
            eprintln!("Failed to {action} ticket; nothing was changed. You can retry the command.");
        }
        _ => {}
    }
    err
}
