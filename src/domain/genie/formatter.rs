//! Rendering of terminal Genie messages for chat display.
//!
//! Every path returns a string: a failed attachment fetch becomes an error
//! line rather than an error value, so the caller always has something to
//! deliver back to the channel.
//!
//! Output uses Slack mrkdwn: `*bold*` labels and triple-backtick blocks.

use std::fmt::Write;
use std::future::Future;

use serde_json::Value;

use super::{ClientError, QueryResult, TerminalMessage};

/// Maximum number of data rows shown before truncating.
pub const MAX_DISPLAY_ROWS: usize = 10;

/// Separator between cell values on a rendered row.
pub const COLUMN_DELIMITER: &str = " | ";

const NO_CONTENT: &str = "No response content available";
const NO_ROWS: &str = "No data returned from the query";
const FENCE: &str = "```";

/// Formats a terminal message, fetching the first attachment if there is one.
///
/// `fetch_attachment` is only invoked for a completed message with at least
/// one attachment, and at most once.
pub async fn format_terminal_message<F, Fut>(message: TerminalMessage, fetch_attachment: F) -> String
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<QueryResult, ClientError>>,
{
    match message {
        TerminalMessage::Failed { error_message } => {
            format!("Genie query failed: {}", error_message)
        }
        other @ (TerminalMessage::Cancelled | TerminalMessage::Unknown { .. }) => {
            format!("Unexpected status: {}", other.status_label())
        }
        TerminalMessage::Completed {
            content,
            attachments,
        } => match attachments.into_iter().next() {
            Some(attachment) => {
                match fetch_attachment(attachment.attachment_id().to_string()).await {
                    Ok(result) => {
                        render_query_result(&result.columns, &result.rows, result.sql.as_deref())
                    }
                    Err(e) => format!("Error retrieving query result: {}", e),
                }
            }
            None => content.unwrap_or_else(|| NO_CONTENT.to_string()),
        },
    }
}

/// Renders a query result as an optional SQL block followed by a results table.
///
/// The header and separator lines are emitted only when column names exist.
/// At most [`MAX_DISPLAY_ROWS`] rows are shown; the remainder is summarised.
pub fn render_query_result(columns: &[String], rows: &[Vec<Value>], sql: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(sql) = sql.map(str::trim).filter(|s| !s.is_empty()) {
        let _ = write!(out, "*SQL Query:*\n{FENCE}\n{sql}\n{FENCE}\n\n");
    }

    let _ = writeln!(out, "*Results:*\n{FENCE}");

    if !columns.is_empty() {
        let header = columns
            .iter()
            .map(|c| single_line(c))
            .collect::<Vec<_>>()
            .join(COLUMN_DELIMITER);
        let _ = writeln!(out, "{}", header);
        let separator = vec!["---"; columns.len()].join(COLUMN_DELIMITER);
        let _ = writeln!(out, "{}", separator);
    }

    if rows.is_empty() {
        let _ = writeln!(out, "{}", NO_ROWS);
    }

    for row in rows.iter().take(MAX_DISPLAY_ROWS) {
        let line = row
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(COLUMN_DELIMITER);
        let _ = writeln!(out, "{}", line);
    }

    if rows.len() > MAX_DISPLAY_ROWS {
        let _ = writeln!(out, "... and {} more rows", rows.len() - MAX_DISPLAY_ROWS);
    }

    out.push_str(FENCE);
    out
}

/// Natural text form of a cell value.
///
/// Strings are shown without quotes; everything else uses its JSON text.
/// Line breaks become spaces and backtick fences are broken up so a value
/// stays on its row inside the results block.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => single_line(s),
        other => other.to_string(),
    }
}

fn single_line(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace(FENCE, "`\u{200B}`\u{200B}`")
}
