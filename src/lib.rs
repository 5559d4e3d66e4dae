//! # day_table
//!
//! Loads daily stock price and valuation CSV files into a columnar
//! [`DayTable`], one file per stock.
//!
//! ## Example
//!
//! ```rust,ignore
//! use day_table::{read_data, FieldDiagnostic};
//!
//! let mut diagnostics: Vec<FieldDiagnostic> = Vec::new();
//! let table = read_data("sh.600000.csv", &mut diagnostics)?;
//! println!("{} has {} days", table.stock_code(), table.len());
//! ```

pub mod batch;
pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod schema;
pub mod snapshot;
pub mod table;

pub use batch::load_dir;
pub use diagnostics::{DiagnosticSink, FieldDiagnostic, NullSink, StdoutSink, TracingSink};
pub use error::{LoadError, SnapshotError};
pub use loader::{read_data, read_data_from_reader};
pub use schema::Column;
pub use table::{AdjustFlag, DayRecord, DayTable};
