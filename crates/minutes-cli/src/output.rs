//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use minutes_domain::{now_millis, ActionItem, ExtractedItem, Transcript};
use minutes_sdk::{CreatedTranscript, HealthStatus};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Characters of transcript text shown in history listings
const PREVIEW_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format items returned by a dry-run extraction.
    pub fn format_extracted(&self, items: &[ExtractedItem]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
            OutputFormat::Quiet => Ok(items
                .iter()
                .map(|i| i.task.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if items.is_empty() {
                    return Ok(self.colorize("No action items found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Task", "Owner", "Due"]);
                for (index, item) in items.iter().enumerate() {
                    builder.push_record([
                        (index + 1).to_string(),
                        item.task.clone(),
                        or_dash(&item.owner),
                        or_dash(&item.due_date),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a freshly saved transcript and its items.
    pub fn format_created(&self, created: &CreatedTranscript) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(created)?),
            OutputFormat::Quiet => Ok(created.transcript.id.to_string()),
            OutputFormat::Table => {
                let header = self.success(&format!(
                    "Saved transcript {} with {} action item(s)",
                    created.transcript.id,
                    created.action_items.len()
                ));
                Ok(format!(
                    "{}\n{}",
                    header,
                    self.format_action_items(&created.action_items)?
                ))
            }
        }
    }

    /// Format stored action items.
    pub fn format_action_items(&self, items: &[ActionItem]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
            OutputFormat::Quiet => Ok(items
                .iter()
                .map(|i| i.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if items.is_empty() {
                    return Ok(self.colorize("No action items found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Done", "Task", "Owner", "Due"]);
                for item in items {
                    let done = if item.is_done { "[x]" } else { "[ ]" };
                    builder.push_record([
                        item.id.to_string(),
                        done.to_string(),
                        item.task.clone(),
                        or_dash(&item.owner),
                        or_dash(&item.due_date),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a single stored action item.
    pub fn format_action_item(&self, item: &ActionItem) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(item)?),
            _ => self.format_action_items(std::slice::from_ref(item)),
        }
    }

    /// Format the transcript history.
    pub fn format_transcripts(&self, transcripts: &[Transcript]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(transcripts)?),
            OutputFormat::Quiet => Ok(transcripts
                .iter()
                .map(|t| t.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if transcripts.is_empty() {
                    return Ok(self.colorize("No transcripts saved yet.", "yellow"));
                }

                let now = now_millis();
                let mut builder = Builder::default();
                builder.push_record(["ID", "Saved", "Preview"]);
                for transcript in transcripts {
                    builder.push_record([
                        transcript.id.to_string(),
                        format_age(now.saturating_sub(transcript.created_at)),
                        transcript.preview(PREVIEW_CHARS),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a health report.
    pub fn format_health(&self, health: &HealthStatus) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(health)?),
            OutputFormat::Quiet => Ok(if health.is_healthy() {
                "healthy".to_string()
            } else {
                "unhealthy".to_string()
            }),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Component", "Status"]);
                for (component, status) in [
                    ("backend", &health.backend),
                    ("database", &health.database),
                    ("llm", &health.llm),
                ] {
                    let color = if status == "healthy" { "green" } else { "red" };
                    builder.push_record([component.to_string(), self.colorize(status, color)]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether only bare values should be printed.
    pub fn is_quiet(&self) -> bool {
        self.format == OutputFormat::Quiet
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

/// Coarse "time ago" label for a duration in milliseconds.
pub fn format_age(elapsed_ms: u64) -> String {
    let seconds = elapsed_ms / 1000;
    match seconds {
        0..=59 => "just now".to_string(),
        60..=3_599 => format!("{}m ago", seconds / 60),
        3_600..=86_399 => format!("{}h ago", seconds / 3_600),
        _ => format!("{}d ago", seconds / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minutes_domain::{NewActionItem, TranscriptId};

    fn create_test_item(done: bool) -> ActionItem {
        let mut item = ActionItem::new(
            TranscriptId::new(),
            NewActionItem {
                task: "Send report".to_string(),
                owner: Some("Sam".to_string()),
                due_date: None,
            },
            12345678,
        );
        item.is_done = done;
        item
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_action_items(&[create_test_item(false)]).unwrap();
        assert!(output.contains("\"task\": \"Send report\""));
        assert!(output.contains("is_done"));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let item = create_test_item(false);
        let output = formatter.format_action_items(&[item.clone()]).unwrap();
        assert_eq!(output, item.id.to_string());
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_action_items(&[create_test_item(true), create_test_item(false)])
            .unwrap();
        assert!(output.contains("Owner"));
        assert!(output.contains("[x]"));
        assert!(output.contains("[ ]"));
        assert!(output.contains("Sam"));
    }

    #[test]
    fn test_empty_items() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_action_items(&[]).unwrap();
        assert!(output.contains("No action items found"));
    }

    #[test]
    fn test_extracted_table_numbers_rows() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let items = vec![
            ExtractedItem::new("Send report", Some("Sam".to_string()), Some("Friday".to_string())),
            ExtractedItem::new("Book venue", None, None),
        ];
        let output = formatter.format_extracted(&items).unwrap();
        assert!(output.contains("Friday"));
        assert!(output.contains("Book venue"));

        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.format_extracted(&items).unwrap(), "Send report\nBook venue");
    }

    #[test]
    fn test_health_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let health = HealthStatus {
            backend: "healthy".to_string(),
            database: "healthy".to_string(),
            llm: "unhealthy".to_string(),
        };
        assert_eq!(formatter.format_health(&health).unwrap(), "unhealthy");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(5_000), "just now");
        assert_eq!(format_age(125_000), "2m ago");
        assert_eq!(format_age(7_200_000), "2h ago");
        assert_eq!(format_age(3 * 86_400_000), "3d ago");
    }
}
