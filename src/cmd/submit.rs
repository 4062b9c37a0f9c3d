use clap::Args;

use crate::cache::PendingSubmissions;
use crate::cmd::ticket::TicketFieldArgs;
use crate::context::AppContext;
use crate::display;
use crate::error::{AppError, AppResult};
use crate::form::{FormVariant, TicketForm};
use crate::workflow::submit::{SubmitOutcome, retry_pending, submit_case};

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub fields: TicketFieldArgs,
    /// Resend cases that previously failed to reach the service. Field
    /// arguments are ignored.
    #[arg(long)]
    pub retry: bool,
}

pub async fn run(ctx: &AppContext, args: SubmitArgs) -> AppResult<()> {
    let mut pending = PendingSubmissions::load()?;
    if args.retry {
        return run_retry(ctx, &mut pending).await;
    }

    let mut form = TicketForm::new(FormVariant::Extended);
    args.fields.apply(&mut form);

    match submit_case(ctx.tickets.as_ref(), &mut form, &mut pending).await {
        Ok(SubmitOutcome::Submitted(ticket)) => {
            println!("Thank you! Your case has been registered as #{}.", ticket.id);
            Ok(())
        }
        Ok(SubmitOutcome::Queued { error, .. }) => {
            eprintln!("We could not submit your case right now ({error}).");
            eprintln!("It has been saved; run `casedesk submit --retry` to send it again.");
            Err(error)
        }
        Err(AppError::Validation(errors)) => {
            eprintln!("Please fix the following fields:");
            eprint!("{}", display::field_errors(&errors));
            Err(AppError::Validation(errors))
        }
        Err(err) if err.is_remote() => {
            eprintln!("The service did not accept your case ({err}). Please check the details and try again.");
            Err(err)
        }
        Err(err) => Err(err),
    }
}

async fn run_retry(ctx: &AppContext, pending: &mut PendingSubmissions) -> AppResult<()> {
    if pending.is_empty() {
        println!("No pending submissions.");
        return Ok(());
    }

    let summary = retry_pending(ctx.tickets.as_ref(), pending).await?;
    for ticket in &summary.submitted {
        println!("Submitted case #{}: {}", ticket.id, ticket.title);
    }
    if summary.remaining > 0 {
        eprintln!("{} case(s) are still pending.", summary.remaining);
    }
    match summary.failures.into_iter().next() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
