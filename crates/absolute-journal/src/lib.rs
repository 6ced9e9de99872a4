//! Absolute Journal - auditing, reconstruction, and export of kernel traces
//!
//! This crate works on the trace returned by `Kernel::replay` (or borrowed
//! through `Kernel::history`) and provides:
//!
//! - **Auditor**: Query and summarize recorded operations
//! - **Reconstructor**: Rebuild density from recorded outcomes and check
//!   recorded observations against it
//! - **Exporter**: Export traces to RON, JSON, CSV, or text
//!
//! # Example
//!
//! ```rust
//! use absolute_core::{Kernel, KernelConfig};
//! use absolute_journal::{Auditor, ExportFormat, Exporter, Reconstructor};
//!
//! let mut kernel = Kernel::new(KernelConfig::new().with_seed(42)).unwrap();
//! kernel.define_state("A", 1).unwrap();
//! kernel.define_state("B", 2).unwrap();
//! kernel.relate("A", "B", |a, b, _| a.checked_add(b)).unwrap();
//! kernel.excite().unwrap();
//! kernel.observe().unwrap();
//!
//! let trace = kernel.replay();
//! let report = Auditor::new(&trace).generate_report();
//! assert_eq!(report.stats.excite_count, 1);
//!
//! assert_eq!(Reconstructor::new(&trace).verify_observations().unwrap(), 1);
//!
//! let text = Exporter::new(&trace).export(ExportFormat::Text).unwrap();
//! assert!(text.contains("[EXCITE] A: 1 -> 3"));
//! ```

mod auditor;
mod error;
mod exporter;
mod reconstructor;

pub use auditor::{AuditQuery, AuditReport, Auditor, StateActivity, StateChange};
pub use error::{Error, Result};
pub use exporter::{ExportFormat, Exporter, EXPORT_VERSION};
pub use reconstructor::Reconstructor;

// Re-export core trace types for convenience
pub use absolute_core::{EntryKind, HistoryEntry, HistoryStats, Record};
