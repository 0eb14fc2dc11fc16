//! chart-scout: chart suggestion and table normalization for tabular data
//!
//! Ingests a CSV file, Excel workbook or remote CSV payload, normalizes it
//! into a typed [`Table`], detects a temporal column, and derives an
//! ordered list of [`ChartSpec`]s plus a compact [`Summary`]. Rendering,
//! report building and prose generation stay behind explicit boundaries
//! ([`render::ChartRenderer`], [`insights::TextGenerator`]).
//!
//! # Quick Start
//!
//! ```no_run
//! use chart_scout::{Loader, detect_time_column, suggest_charts, summarize};
//!
//! let loader = Loader::new();
//! let mut table = loader.load_path("sales.csv").unwrap();
//!
//! // Detection converts the chosen column in place; run it before
//! // suggesting or rendering.
//! let time_column = detect_time_column(&mut table);
//! let specs = suggest_charts(&table, time_column.as_deref());
//!
//! println!("{}", summarize(&table));
//! for spec in &specs {
//!     println!("{}: {:?}", spec.kind, spec.title);
//! }
//! ```
//!
//! # Pipeline
//!
//! raw bytes → [`Loader`] → [`Table`] → [`detect_time_column`] →
//! [`suggest_charts`] / [`summarize`] → rendering / insights / report
//! builders (external).
//!
//! The pipeline is synchronous and single-threaded; the only blocking IO
//! is the bounded-timeout remote fetch behind the `http` feature.
//! Structural failures (unsupported extension, unreachable source) abort
//! before a table exists; content-level anomalies (unparseable cells,
//! no temporal column, zero suggestions) degrade to missing markers and
//! empty results instead of raising.

pub mod chart_spec;
pub mod column_kind;
mod encoding;
pub mod error;
#[cfg(feature = "http")]
mod http;
pub mod ingest;
pub mod insights;
pub mod render;
pub mod suggester;
pub mod summary;
pub mod table;
pub mod temporal;

// Re-export the public API
pub use chart_spec::{Aggregate, ChartKind, ChartSpec};
pub use column_kind::ColumnKind;
pub use error::{PipelineError, Result};
pub use ingest::{Loader, SourceFormat};
pub use insights::{InsightsUnavailable, TextGenerator, generate_insights};
pub use render::{ChartData, ChartPoint, ChartRenderer, Theme, chart_data, resolve_theme};
pub use suggester::suggest_charts;
pub use summary::{Summary, summarize};
pub use table::{Cell, Column, Table};
pub use temporal::detect_time_column;
