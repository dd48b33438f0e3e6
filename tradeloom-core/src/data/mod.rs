//! Trade table model and file loading.

pub mod loader;
pub mod table;

pub use loader::{load_table, parse_table, resolve_encoding, CellError, LoadError, ParseError, YEARS};
pub use table::{Table, TradeRecord};
