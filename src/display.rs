//! Plain-text rendering of cards, columns, metrics and reports.

use std::fmt::Write as _;

use crate::board::{Column, Metrics, StatusCounts};
use crate::domain::response::SentResponse;
use crate::domain::ticket::{Priority, Ticket};
use crate::form::FieldErrors;
use crate::reports::ReportPanel;

fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical => "!!!",
        Priority::High => "!!",
        Priority::Medium => "!",
        Priority::Low => ".",
    }
}

/// One ticket. The expanded form adds the description and contact block.
pub fn card(ticket: &Ticket, expanded: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "#{} [{}] {} {}",
        ticket.id,
        ticket.category,
        priority_marker(ticket.priority),
        ticket.title
    );
    if let Some(name) = &ticket.customer_name {
        let _ = writeln!(out, "    customer: {name}");
    }
    if !expanded {
        return out;
    }

    let _ = writeln!(
        out,
        "    {}  status: {}  priority: {}",
        ticket.category.label(),
        ticket.status,
        ticket.priority
    );
    let description = ticket
        .description
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .unwrap_or("No description provided");
    let _ = writeln!(out, "    {description}");
    if let Some(email) = &ticket.customer_email {
        let _ = writeln!(out, "    email: {email}");
        if let Some(phone) = &ticket.customer_phone {
            let _ = writeln!(out, "    phone: {phone}");
        }
    }
    if let Some(created) = &ticket.created_at {
        let _ = writeln!(out, "    created: {created}");
    }
    if let Some(first) = &ticket.first_response_at {
        let _ = writeln!(out, "    first response: {first}");
    }
    out
}

pub fn column(column: &Column<'_>, expanded: bool) -> String {
    let mut out = format!("== {} ({}) ==\n", column.spec.title, column.len());
    if column.is_empty() {
        out.push_str("  No tickets\n");
    }
    for ticket in &column.tickets {
        out.push_str(&card(ticket, expanded));
    }
    out
}

pub fn stats_bar(counts: &StatusCounts, finished_title: &str) -> String {
    format!(
        "Total {}  |  New {}  |  In Progress {}  |  {} {}",
        counts.total, counts.new, counts.in_progress, finished_title, counts.finished
    )
}

pub fn metrics(metrics: &Metrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total cases: {}", metrics.total);
    let _ = writeln!(out, "Resolved: {}", metrics.resolved);
    let _ = writeln!(out, "Resolution rate: {}%", metrics.resolution_rate);
    let _ = writeln!(
        out,
        "Average resolution time: {}",
        metrics.average_resolution_label()
    );
    let _ = writeln!(out, "By priority:");
    for (priority, count) in metrics.by_priority {
        let _ = writeln!(out, "  {:<9}{count}", priority.as_str());
    }
    let _ = writeln!(out, "Created per day:");
    for day in &metrics.created_per_day {
        let _ = writeln!(
            out,
            "  {}  {:>3} {}",
            day.day.format("%Y-%m-%d"),
            day.count,
            "#".repeat(day.count)
        );
    }
    out
}

pub fn reports(panels: &[ReportPanel]) -> String {
    let mut out = String::new();
    for panel in panels {
        let _ = writeln!(out, "{}", panel.title);
        let _ = writeln!(out, "  {}", panel.description);
        match panel.embed_url() {
            Some(url) => {
                let _ = writeln!(out, "  {url}");
            }
            None => {
                let _ = writeln!(out, "  (report not configured)");
            }
        }
    }
    out
}

pub fn responses(responses: &[SentResponse]) -> String {
    if responses.is_empty() {
        return "No responses sent yet.\n".to_string();
    }
    let mut out = String::new();
    for response in responses {
        let when = response
            .sent_at
            .as_deref()
            .or(response.created_at.as_deref())
            .unwrap_or("-");
        let _ = writeln!(
            out,
            "{when}  {:?}  to {}: {}",
            response.email_status, response.sent_to, response.subject
        );
    }
    out
}

pub fn field_errors(errors: &FieldErrors) -> String {
    let mut out = String::new();
    for (field, message) in errors.iter() {
        let _ = writeln!(out, "  {}: {message}", field.as_str());
    }
    out
}
