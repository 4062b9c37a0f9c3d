use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{API_URL_ENV, AppConfig, DEFAULT_API_URL, StoredConfig, config_file_path};
use crate::error::{AppError, AppResult};

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored and effective configuration.
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring casedesk.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!();

    apply_prompt(
        &format!("Backend API URL (default {DEFAULT_API_URL})"),
        &mut cfg.api_url,
    )?;
    apply_prompt("Board layout (dashboard/simple)", &mut cfg.board_layout)?;
    apply_prompt("Your name, used when answering customers", &mut cfg.employee_name)?;

    let mut timeout = cfg.request_timeout_secs.map(|secs| secs.to_string());
    apply_prompt("Request timeout in seconds (blank for none)", &mut timeout)?;
    cfg.request_timeout_secs = match timeout {
        Some(value) => Some(value.parse().map_err(|_| {
            AppError::Configuration(format!("'{value}' is not a number of seconds"))
        })?),
        None => None,
    };

    // Reject values the effective config would refuse before writing them.
    AppConfig::resolve(cfg.clone(), None)?;
    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;
    let effective = AppConfig::load()?;

    println!("Configuration file: {}", path.display());
    println!("API URL (stored): {}", display_value(&cfg.api_url));
    println!("API URL (effective): {}", effective.api_url);
    if std::env::var(API_URL_ENV).is_ok() {
        println!("  overridden by {API_URL_ENV}");
    }
    println!("Board layout: {:?}", effective.board_layout);
    println!("Employee name: {}", display_value(&cfg.employee_name));
    println!(
        "Request timeout: {}",
        cfg.request_timeout_secs
            .map(|secs| format!("{secs}s"))
            .unwrap_or_else(|| "<none>".to_string())
    );
    let configured = effective
        .reports
        .iter()
        .filter(|report| report.is_configured())
        .count();
    println!(
        "Reports: {configured} of {} configured",
        effective.reports.len()
    );

    Ok(())
}

fn apply_prompt(field: &str, target: &mut Option<String>) -> AppResult<()> {
    match prompt(field, target.as_deref())? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn prompt(field: &str, current: Option<&str>) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match current {
        Some(value) => write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?,
        None => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(parse_answer(&input))
}

fn parse_answer(input: &str) -> PromptAction {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        PromptAction::Keep
    } else if trimmed == "-" {
        PromptAction::Clear
    } else {
        PromptAction::Set(trimmed.to_string())
    }
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}
