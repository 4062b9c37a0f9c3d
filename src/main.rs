use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use casedesk::cmd::board::{self, BoardArgs, ListArgs};
use casedesk::cmd::config::{self as config_cmd, ConfigArgs};
use casedesk::cmd::submit::{self, SubmitArgs};
use casedesk::cmd::ticket::{self, RespondArgs, TicketFieldArgs};
use casedesk::config::AppConfig;
use casedesk::context::AppContext;
use casedesk::domain::ticket::TicketId;
use casedesk::error::AppResult;
use casedesk::infra::http::ApiClient;

#[derive(Parser)]
#[command(name = "casedesk", author, version, about = "Case management client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the Kanban board.
    Board(BoardArgs),
    /// List tickets, optionally filtered by the backend.
    List(ListArgs),
    /// Show one ticket in full.
    Show { id: TicketId },
    /// Create a ticket from the dashboard.
    Create(TicketFieldArgs),
    /// Edit a ticket; only changed fields are sent.
    Edit {
        id: TicketId,
        #[command(flatten)]
        fields: TicketFieldArgs,
    },
    /// Move a ticket to another column.
    Move {
        id: TicketId,
        /// Target column: new, in_progress, resolved (or done on the simple board).
        column: String,
    },
    /// Delete a ticket.
    Delete { id: TicketId },
    /// Send a response to the ticket's customer.
    Respond(RespondArgs),
    /// List responses already sent for a ticket.
    Responses { id: TicketId },
    /// Show ticket metrics.
    Metrics,
    /// List the configured analytics reports.
    Reports,
    /// Submit a new case as a customer.
    Submit(SubmitArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("casedesk=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        command => run_with_backend(command).await,
    }
}

async fn run_with_backend(command: Commands) -> AppResult<()> {
    let ctx = build_context()?;
    match command {
        Commands::Board(args) => board::run_board(&ctx, args).await,
        Commands::List(args) => board::run_list(&ctx, args).await,
        Commands::Show { id } => board::run_show(&ctx, id).await,
        Commands::Create(fields) => ticket::run_create(&ctx, fields).await,
        Commands::Edit { id, fields } => ticket::run_edit(&ctx, id, fields).await,
        Commands::Move { id, column } => ticket::run_move(&ctx, id, &column).await,
        Commands::Delete { id } => ticket::run_delete(&ctx, id).await,
        Commands::Respond(args) => ticket::run_respond(&ctx, args).await,
        Commands::Responses { id } => ticket::run_responses(&ctx, id).await,
        Commands::Metrics => board::run_metrics(&ctx).await,
        Commands::Reports => board::run_reports(&ctx),
        Commands::Submit(args) => submit::run(&ctx, args).await,
        Commands::Config(args) => config_cmd::run(args.command),
    }
}

fn build_context() -> AppResult<AppContext> {
    let config = AppConfig::load()?;
    tracing::debug!("using backend at {}", config.api_url);

    let client = Arc::new(ApiClient::new(config.api_url.clone(), config.request_timeout)?);
    Ok(AppContext::new(config, client.clone(), client))
}
