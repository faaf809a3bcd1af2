//! Side-effect-free mapping from a cycle outcome to what the page shows.

use serde_json::Value;

use super::{Outcome, Snapshot};
use crate::api::constants::fields;
use crate::api::{ApiError, ErrorKind, ExtensionRecord, SystemInfo};

pub const TITLE: &str = "Yeastar PBX Dashboard";
pub const SUBTITLE: &str = "Real-time data from your Yeastar PBX system.";
pub const SYSTEM_INFO_HEADING: &str = "System Information";
pub const EXTENSIONS_HEADING: &str = "Extensions";
pub const NO_EXTENSIONS: &str = "No extensions data available.";
pub const REFRESH_LABEL: &str = "Refresh Data";

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub title: String,
    pub subtitle: String,
    /// Set when authentication failed and the page stops there
    pub alert: Option<String>,
    pub sections: Option<Sections>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sections {
    pub system_info: SystemInfoView,
    pub extensions: ExtensionsView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SystemInfoView {
    pub error: Option<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtensionsView {
    pub error: Option<String>,
    /// `None` renders the placeholder message
    pub grid: Option<Grid>,
}

impl PageView {
    pub fn from_outcome(outcome: &Outcome) -> Self {
        let (alert, sections) = match outcome {
            Outcome::Halted(e) => (
                Some(surface(e, "Error connecting to API", "Authentication failed")),
                None,
            ),
            Outcome::Rendered(snapshot) => (None, Some(Sections::from_snapshot(snapshot))),
        };

        Self {
            title: TITLE.to_string(),
            subtitle: SUBTITLE.to_string(),
            alert,
            sections,
        }
    }
}

impl Sections {
    fn from_snapshot(snapshot: &Snapshot) -> Self {
        let system_info = match &snapshot.system_info {
            Ok(info) => SystemInfoView {
                error: None,
                fields: system_fields(info),
            },
            Err(e) => SystemInfoView {
                error: Some(surface(
                    e,
                    "Error fetching system info",
                    "Failed to fetch system info",
                )),
                fields: Vec::new(),
            },
        };

        let extensions = match &snapshot.extensions {
            Ok(records) => ExtensionsView {
                error: None,
                grid: extension_grid(records),
            },
            Err(e) => ExtensionsView {
                error: Some(surface(
                    e,
                    "Error fetching extensions",
                    "Failed to fetch extensions",
                )),
                grid: None,
            },
        };

        Self {
            system_info,
            extensions,
        }
    }
}

fn surface(error: &ApiError, transport: &str, application: &str) -> String {
    let prefix = match error.kind() {
        ErrorKind::Transport => transport,
        ErrorKind::Application => application,
    };
    format!("{}: {}", prefix, error)
}

/// One label/value line per field, minus the status fields
pub fn system_fields(info: &SystemInfo) -> Vec<Field> {
    info.iter()
        .filter(|(key, _)| key.as_str() != fields::ERRCODE && key.as_str() != fields::ERRMSG)
        .map(|(key, value)| Field {
            label: field_label(key),
            value: cell_text(value),
        })
        .collect()
}

/// Grid over the union of record keys in first-seen order; `None` when empty
pub fn extension_grid(records: &[ExtensionRecord]) -> Option<Grid> {
    if records.is_empty() {
        return None;
    }

    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(column).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    Some(Grid { columns, rows })
}

/// `sn_code` → `Sn Code`
pub fn field_label(key: &str) -> String {
    title_case(&key.replace('_', " "))
}

/// Upper-case the first cased letter of every run of letters, lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;

    for c in text.chars() {
        let cased = is_cased(c);
        if cased && previous_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        previous_cased = cased;
    }

    out
}

/// Upper, lower and titlecase letters; titlecase ones (`ǅ`) have distinct case mappings
fn is_cased(c: char) -> bool {
    c.is_lowercase()
        || c.is_uppercase()
        || (c.is_alphabetic() && c.to_lowercase().ne(c.to_uppercase()))
}

pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
