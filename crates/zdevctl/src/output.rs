//! Text and JSON rendering of device listings.
//!
//! With `--format json`, commands emit these types as JSON instead of the
//! human-readable table.

use serde::Serialize;

use zdevctl_devices::{DeviceRecord, DeviceStatus};

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }

    pub fn is_json(self) -> bool {
        self == OutputFormat::Json
    }
}

/// One device row for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub status: String,
    pub on: bool,
    pub exists: bool,
    pub pers: bool,
    pub auto: bool,
    pub failed: bool,
    pub names: String,
}

impl DeviceEntry {
    pub fn from_record(record: &DeviceRecord) -> Self {
        Self {
            id: record.id.clone(),
            type_name: record.type_name.clone(),
            status: DeviceStatus::classify(record).label().to_string(),
            on: record.on,
            exists: record.exists,
            pers: record.pers,
            auto: record.auto,
            failed: record.failed,
            names: record.names.clone(),
        }
    }
}

/// Output from the `list` command.
#[derive(Debug, Clone, Serialize)]
pub struct ListOutput {
    pub devices: Vec<DeviceEntry>,
}

impl ListOutput {
    pub fn from_records(records: &[DeviceRecord]) -> Self {
        Self {
            devices: records.iter().map(DeviceEntry::from_record).collect(),
        }
    }
}

/// Output from the `enable`/`disable` commands.
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutput {
    pub status: String,
    pub action: String,
    pub device: String,
    /// Post-action device state, when the session can observe it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<DeviceEntry>,
}

/// Render the device table: ID / ONLINE / TYPE / NAMES.
pub fn render_table(records: &[DeviceRecord]) -> String {
    if records.is_empty() {
        return "No zdev devices found.\n".to_string();
    }

    let headings = ["ID", "ONLINE", "TYPE", "NAMES"];
    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|record| {
            [
                record.id.clone(),
                DeviceStatus::classify(record).label().to_string(),
                record.type_name.clone(),
                record.names.clone(),
            ]
        })
        .collect();

    let mut widths = headings.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let format_row = |cells: [&str; 4]| {
        let mut line = String::new();
        for (i, (cell, &width)) in cells.iter().zip(widths.iter()).enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(&format!("{cell:<width$}"));
        }
        line.trim_end().to_string()
    };
    out.push_str(&format_row(headings));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row([&row[0], &row[1], &row[2], &row[3]]));
        out.push('\n');
    }
    out
}

/// Print a serializable value as JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize JSON: {}", e),
    }
}
