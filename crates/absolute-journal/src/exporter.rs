//! Export kernel traces to various formats

use crate::{Error, Result};
use absolute_core::{entries_in_range, HistoryEntry, HistoryStats, Record, Tick, Value};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Version of the export envelope
pub const EXPORT_VERSION: u32 = 1;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// RON format (Rust Object Notation)
    Ron,
    /// JSON format (requires serde_json feature)
    Json,
    /// CSV format, one row per entry
    Csv,
    /// Human-readable text format
    Text,
}

/// Exporter for trace data
pub struct Exporter<'a> {
    entries: &'a [HistoryEntry],
}

impl<'a> Exporter<'a> {
    /// Create a new exporter
    pub fn new(entries: &'a [HistoryEntry]) -> Self {
        Self { entries }
    }

    /// Export to a string in the specified format
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Ron => self.to_ron(),
            ExportFormat::Json => self.to_json(),
            ExportFormat::Csv => Ok(self.to_csv()),
            ExportFormat::Text => Ok(self.to_text()),
        }
    }

    /// Export to a writer
    pub fn export_to<W: Write>(&self, writer: &mut W, format: ExportFormat) -> Result<()> {
        let content = self.export(format)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Export to RON format
    pub fn to_ron(&self) -> Result<String> {
        let export = ExportData::new(self.entries);
        ron::ser::to_string_pretty(&export, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Export to JSON format
    #[cfg(feature = "serde_json")]
    pub fn to_json(&self) -> Result<String> {
        let export = ExportData::new(self.entries);
        serde_json::to_string_pretty(&export).map_err(|e| Error::Serialization(e.to_string()))
    }

    #[cfg(not(feature = "serde_json"))]
    pub fn to_json(&self) -> Result<String> {
        Err(Error::ExportError(
            "JSON export requires the 'serde_json' feature".to_string(),
        ))
    }

    /// Export to CSV format
    ///
    /// Columns are `t,type,a,b,from,to`. Observations put the whole
    /// snapshot in `to`.
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str("t,type,a,b,from,to\n");

        for entry in self.entries {
            let (a, b, from, to) = match &entry.record {
                Record::Define { id, value } => (
                    id.to_string(),
                    String::new(),
                    String::new(),
                    value.to_string(),
                ),
                Record::Relate { a, b } => {
                    (a.to_string(), b.to_string(), String::new(), String::new())
                }
                Record::Excite { a, from, to } => {
                    (a.to_string(), String::new(), from.to_string(), to.to_string())
                }
                Record::Observe(snapshot) => (
                    String::new(),
                    String::new(),
                    String::new(),
                    render_snapshot(snapshot.iter().map(|(k, v)| (k.as_str(), v))),
                ),
            };

            output.push_str(&format!(
                "{},{},{},{},\"{}\",\"{}\"\n",
                entry.t,
                entry.kind(),
                a,
                b,
                from.replace('"', "\"\""),
                to.replace('"', "\"\"")
            ));
        }

        output
    }

    /// Export to human-readable text format
    pub fn to_text(&self) -> String {
        let mut output = String::new();
        let stats = HistoryStats::from_entries(self.entries);

        output.push_str("=== History Export ===\n\n");
        output.push_str(&format!("Total entries: {}\n", stats.total_entries));
        output.push_str(&format!("Defines: {}\n", stats.define_count));
        output.push_str(&format!("Relations: {}\n", stats.relate_count));
        output.push_str(&format!("Excitations: {}\n", stats.excite_count));
        output.push_str(&format!("Observations: {}\n", stats.observe_count));

        if let (Some(first), Some(last)) = (stats.first_tick, stats.last_tick) {
            output.push_str(&format!("Tick range: {} - {}\n", first, last));
        }

        output.push_str("\n=== Entries ===\n");

        let mut current_tick: Option<Tick> = None;
        for entry in self.entries {
            if current_tick != Some(entry.t) {
                output.push_str(&format!("\n--- Tick {} ---\n", entry.t));
                current_tick = Some(entry.t);
            }

            let line = match &entry.record {
                Record::Define { id, value } => format!("  [DEFINE] {} = {}", id, value),
                Record::Relate { a, b } => format!("  [RELATE] {} <- {}", a, b),
                Record::Excite { a, from, to } => format!("  [EXCITE] {}: {} -> {}", a, from, to),
                Record::Observe(snapshot) => format!(
                    "  [OBSERVE] {}",
                    render_snapshot(snapshot.iter().map(|(k, v)| (k.as_str(), v)))
                ),
            };
            output.push_str(&line);
            output.push('\n');
        }

        output
    }

    /// Export only entries in a tick range (inclusive)
    pub fn export_range(&self, start: Tick, end: Tick, format: ExportFormat) -> Result<String> {
        if start > end {
            return Err(Error::InvalidTickRange(start, end));
        }

        let entries: Vec<_> = entries_in_range(self.entries, start, end)
            .cloned()
            .collect();
        let filtered = FilteredExport { start, end, entries };

        match format {
            ExportFormat::Ron => {
                ron::ser::to_string_pretty(&filtered, ron::ser::PrettyConfig::default())
                    .map_err(|e| Error::Serialization(e.to_string()))
            }
            #[cfg(feature = "serde_json")]
            ExportFormat::Json => serde_json::to_string_pretty(&filtered)
                .map_err(|e| Error::Serialization(e.to_string())),
            #[cfg(not(feature = "serde_json"))]
            ExportFormat::Json => Err(Error::ExportError(
                "JSON export requires the 'serde_json' feature".to_string(),
            )),
            _ => Err(Error::ExportError(
                "Range export only supports RON and JSON".to_string(),
            )),
        }
    }
}

fn render_snapshot<'v>(states: impl Iterator<Item = (&'v str, &'v Value)>) -> String {
    let fields: Vec<_> = states.map(|(k, v)| format!("{}: {}", k, v)).collect();
    format!("{{{}}}", fields.join(", "))
}

/// Data structure for full trace export
#[derive(Debug, Clone, Serialize)]
struct ExportData {
    version: u32,
    exported_at: DateTime<Utc>,
    stats: HistoryStats,
    entries: Vec<HistoryEntry>,
}

impl ExportData {
    fn new(entries: &[HistoryEntry]) -> Self {
        Self {
            version: EXPORT_VERSION,
            exported_at: Utc::now(),
            stats: HistoryStats::from_entries(entries),
            entries: entries.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct FilteredExport {
    start: Tick,
    end: Tick,
    entries: Vec<HistoryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use absolute_core::{Kernel, KernelConfig};

    fn create_test_trace() -> Vec<HistoryEntry> {
        let mut kernel = Kernel::new(KernelConfig::new().with_seed(42)).unwrap();
        kernel.define_state("A", 1).unwrap();
        kernel.define_state("B", 2).unwrap();
        kernel.define_state("label", "x").unwrap();
        kernel.relate("A", "B", |a, b, _| a.checked_add(b)).unwrap();
        for _ in 0..3 {
            kernel.excite().unwrap();
        }
        kernel.observe().unwrap();
        kernel.replay()
    }

    #[test]
    fn test_export_ron() {
        let trace = create_test_trace();
        let ron = Exporter::new(&trace).to_ron().unwrap();

        assert!(ron.contains("version"));
        assert!(ron.contains("exported_at"));
        assert!(ron.contains("entries"));
    }

    #[test]
    fn test_export_csv() {
        let trace = create_test_trace();
        let csv = Exporter::new(&trace).to_csv();

        assert!(csv.starts_with("t,type,a,b,from,to\n"));
        assert_eq!(csv.lines().count(), trace.len() + 1);
        assert!(csv.contains("0,excite,A,,\"1\",\"3\""));
        assert!(csv.contains("0,define,label,,\"\",\"\"\"x\"\"\""));
    }

    #[test]
    fn test_export_text() {
        let trace = create_test_trace();
        let text = Exporter::new(&trace).to_text();

        assert!(text.contains("History Export"));
        assert!(text.contains("--- Tick 2 ---"));
        assert!(text.contains("[EXCITE] A: 5 -> 7"));
        assert!(text.contains("[OBSERVE] {A: 7, B: 2, label: \"x\"}"));
    }

    #[test]
    fn test_export_range() {
        let trace = create_test_trace();
        let exporter = Exporter::new(&trace);

        let ron = exporter.export_range(1, 2, ExportFormat::Ron).unwrap();
        assert!(ron.contains("entries"));
        assert!(ron.contains("start: 1"));
        assert!(ron.contains("end: 2"));

        assert!(matches!(
            exporter.export_range(3, 1, ExportFormat::Ron),
            Err(Error::InvalidTickRange(3, 1))
        ));
        assert!(exporter.export_range(0, 1, ExportFormat::Csv).is_err());
    }

    #[test]
    fn test_export_to_writer() {
        let trace = create_test_trace();
        let mut buffer = Vec::new();
        Exporter::new(&trace)
            .export_to(&mut buffer, ExportFormat::Text)
            .unwrap();
        assert!(!buffer.is_empty());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_export_json() {
        let trace = create_test_trace();
        let json = Exporter::new(&trace).to_json().unwrap();
        assert!(json.contains("\"type\": \"excite\""));
    }
}
