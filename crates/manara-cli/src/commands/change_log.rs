//! Change-log browsing, revert, and retention commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use manara_core::error::AppError;
use manara_core::types::{ModelType, PageRequest, Period};
use manara_entity::change_log::{ChangeLogFilter, ChangeState};
use manara_service::{ChangeLogView, RequestContext};

use crate::output::{self, OutputFormat};

/// Arguments for change-log commands
#[derive(Debug, Args)]
pub struct ChangeLogArgs {
    /// Change-log subcommand
    #[command(subcommand)]
    pub command: ChangeLogCommand,
}

/// Change-log subcommands
#[derive(Debug, Subcommand)]
pub enum ChangeLogCommand {
    /// List change-log entries, newest first
    List {
        /// Entity kind (product, career, settings, ...)
        #[arg(long)]
        model_type: Option<String>,
        /// Record id
        #[arg(long)]
        model_id: Option<i64>,
        /// Acting user id
        #[arg(long)]
        user: Option<Uuid>,
        /// today, week, month, or year
        #[arg(long)]
        period: Option<String>,
        /// active or reverted
        #[arg(long)]
        state: Option<String>,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u64,
        /// Page size (defaults to the configured page size)
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Show one entry with its field changes
    Show {
        /// Entry id
        id: Uuid,
    },
    /// Restore the record to the entry's old snapshot
    Revert {
        /// Entry id
        id: Uuid,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Delete an entry without reverting it
    Delete {
        /// Entry id
        id: Uuid,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Delete entries older than the retention window
    Purge {
        /// Age in days (defaults to `undo.retention_days`)
        #[arg(long)]
        days: Option<u32>,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Change-log row for table display
#[derive(Debug, Serialize, Tabled)]
struct ChangeLogRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Type")]
    model: String,
    #[tabled(rename = "Record")]
    record: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Fields")]
    fields: usize,
    #[tabled(rename = "By")]
    by: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&ChangeLogView> for ChangeLogRow {
    fn from(view: &ChangeLogView) -> Self {
        Self {
            id: view.id.to_string(),
            time: view.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            model: view.model_label.clone(),
            record: view
                .model_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            action: view.action.to_string(),
            fields: view.field_count,
            by: view
                .changed_by
                .map(|u| u.to_string())
                .unwrap_or_else(|| "system".to_string()),
            status: match view.status {
                ChangeState::Active => "active".to_string(),
                ChangeState::Reverted => "reverted".to_string(),
            },
        }
    }
}

/// Execute change-log commands
pub async fn execute(
    args: &ChangeLogArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let retention_days = config.undo.retention_days;
    let state = super::build_state(config).await?;
    let service = &state.change_log_service;

    match &args.command {
        ChangeLogCommand::List {
            model_type,
            model_id,
            user,
            period,
            state: change_state,
            page,
            limit,
        } => {
            let filter = ChangeLogFilter {
                model_type: model_type
                    .as_deref()
                    .map(str::parse::<ModelType>)
                    .transpose()?,
                model_id: *model_id,
                changed_by: *user,
                period: period.as_deref().and_then(Period::parse),
                state: change_state.as_deref().and_then(ChangeState::parse),
            };
            let page_request =
                PageRequest::new(*page, limit.unwrap_or(service.default_page_size()));
            let result = service.list(&filter, &page_request).await?;

            match format {
                OutputFormat::Json => output::print_json(&result),
                OutputFormat::Table => {
                    let rows: Vec<ChangeLogRow> =
                        result.items.iter().map(ChangeLogRow::from).collect();
                    output::print_list(&rows, format);
                    println!(
                        "Page {}/{} ({} entries)",
                        result.page,
                        result.total_pages.max(1),
                        result.total_items
                    );
                }
            }
        }
        ChangeLogCommand::Show { id } => {
            let view = service.get(*id).await?;
            match format {
                OutputFormat::Json => output::print_json(&view),
                OutputFormat::Table => print_detail(&view),
            }
        }
        ChangeLogCommand::Revert { id, force } => {
            if !force && !confirm(&format!("Revert change {id}?"))? {
                println!("Cancelled.");
                return Ok(());
            }
            let outcome = service.revert(&RequestContext::system(), *id).await?;
            output::print_success(&format!(
                "Restored {} (open {})",
                outcome.model_type, outcome.redirect_url
            ));
        }
        ChangeLogCommand::Delete { id, force } => {
            if !force && !confirm(&format!("Delete change-log entry {id}?"))? {
                println!("Cancelled.");
                return Ok(());
            }
            service.delete(*id).await?;
            output::print_success(&format!("Entry {id} deleted"));
        }
        ChangeLogCommand::Purge { days, force } => {
            let days = days.unwrap_or(retention_days);
            if days == 0 {
                output::print_warning("Retention purge is disabled (retention_days = 0)");
                return Ok(());
            }
            if !force && !confirm(&format!("Delete change-log entries older than {days} days?"))? {
                println!("Cancelled.");
                return Ok(());
            }
            let removed = service.purge_older_than(days).await?;
            output::print_success(&format!("Purged {removed} entries"));
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, AppError> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

fn print_detail(view: &ChangeLogView) {
    println!("Change {}", view.id);
    output::print_kv("Type", &format!("{} / {}", view.model_label, view.model_label_ar));
    output::print_kv(
        "Record",
        &view.model_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
    );
    output::print_kv("Action", &view.action.to_string());
    output::print_kv("Created", &view.created_at.to_rfc3339());
    if let Some(at) = view.reverted_at {
        output::print_kv("Reverted", &at.to_rfc3339());
    }
    output::print_kv("Revertible", &view.revertible.to_string());

    if view.changes.is_empty() {
        println!();
        println!("Snapshot ({} fields):", view.field_count);
        for (field, value) in view.old_data.iter().filter(|(f, _)| *f != "id") {
            output::print_kv(field, value);
        }
    } else {
        println!();
        println!("Changes:");
        for change in &view.changes {
            println!("  {}: '{}' -> '{}'", change.label, change.old, change.new);
        }
    }
}
