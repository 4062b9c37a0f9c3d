use chrono::Utc;
use clap::Args;

use crate::board::TicketFilter;
use crate::context::AppContext;
use crate::display;
use crate::domain::ticket::{Category, ListQuery, Priority, TicketStatus};
use crate::error::{AppError, AppResult};
use crate::store::TicketStore;

#[derive(Args, Debug, Clone, Default)]
pub struct BoardArgs {
    /// Case-insensitive search over title and description.
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only show one category (returns, vat, deductions, compliance, other).
    #[arg(short, long)]
    pub category: Option<String>,
    /// Only show one priority (low, medium, high, critical).
    #[arg(short, long)]
    pub priority: Option<String>,
    /// Show descriptions and customer contact details on every card.
    #[arg(short, long)]
    pub expanded: bool,
}

impl BoardArgs {
    pub fn filter(&self) -> AppResult<TicketFilter> {
        let category = self
            .category
            .as_deref()
            .filter(|value| !value.trim().is_empty() && value.trim() != "all")
            .map(|value| {
                Category::from_str(value)
                    .ok_or_else(|| AppError::Configuration(format!("unknown category '{value}'")))
            })
            .transpose()?;
        let priority = self
            .priority
            .as_deref()
            .filter(|value| !value.trim().is_empty() && value.trim() != "all")
            .map(|value| {
                Priority::from_str(value)
                    .ok_or_else(|| AppError::Configuration(format!("unknown priority '{value}'")))
            })
            .transpose()?;

        Ok(TicketFilter {
            search: self.search.clone().unwrap_or_default(),
            category,
            priority,
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Ask the backend for one status only.
    #[arg(long)]
    pub status: Option<String>,
    /// Ask the backend for one category only.
    #[arg(long)]
    pub category: Option<String>,
}

/// Loads the full collection, reporting a blocking error on failure.
pub async fn load_store(ctx: &AppContext) -> AppResult<TicketStore> {
    let mut store = TicketStore::new(ctx.tickets.clone(), ctx.config.board_layout);
    if let Err(err) = store.load().await {
        tracing::error!("failed to load tickets: {err}");
        eprintln!("Failed to load tickets. Make sure the backend is running, then run the command again to retry.");
        return Err(err);
    }
    Ok(store)
}

pub async fn run_board(ctx: &AppContext, args: BoardArgs) -> AppResult<()> {
    let filter = args.filter()?;
    let mut store = load_store(ctx).await?;
    store.filter = filter;

    let columns = store.columns();
    let finished_title = store.layout().columns()[2].title;
    println!("{}", display::stats_bar(&store.counts(), finished_title));

    let categories = store
        .categories()
        .iter()
        .map(|category| category.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if !categories.is_empty() {
        println!("Categories: {categories}");
    }
    println!();

    for column in &columns {
        println!("{}", display::column(column, args.expanded));
    }
    Ok(())
}

pub async fn run_list(ctx: &AppContext, args: ListArgs) -> AppResult<()> {
    let query = ListQuery {
        status: args
            .status
            .as_deref()
            .map(|value| {
                TicketStatus::from_str(value)
                    .ok_or_else(|| AppError::Configuration(format!("unknown status '{value}'")))
            })
            .transpose()?,
        category: args
            .category
            .as_deref()
            .map(|value| {
                Category::from_str(value)
                    .ok_or_else(|| AppError::Configuration(format!("unknown category '{value}'")))
            })
            .transpose()?,
    };

    let tickets = ctx.tickets.list_tickets(&query).await?;
    if tickets.is_empty() {
        println!("No tickets");
    }
    for ticket in &tickets {
        print!("{}", display::card(ticket, false));
    }
    Ok(())
}

pub async fn run_show(ctx: &AppContext, id: i64) -> AppResult<()> {
    let ticket = ctx.tickets.get_ticket(id).await?;
    print!("{}", display::card(&ticket, true));
    Ok(())
}

pub async fn run_metrics(ctx: &AppContext) -> AppResult<()> {
    let store = load_store(ctx).await?;
    let metrics = store.metrics(Utc::now().date_naive());
    print!("{}", display::metrics(&metrics));
    Ok(())
}

pub fn run_reports(ctx: &AppContext) -> AppResult<()> {
    print!("{}", display::reports(&ctx.config.reports));
    Ok(())
}
