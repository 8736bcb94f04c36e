//! Record and control-word primitives for the concurrency-control engine.
//!
//! This crate owns the data model: the per-record control word state
//! machine ([`control_word`]), the record itself ([`record`]), and the flat
//! table that maps the dense integer key space onto records ([`table`]).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod control_word;
pub mod history;
pub mod record;
pub mod table;

pub use control_word::{ControlWord, SiloTidWord, TicTocTsWord};
pub use history::TimestampHistory;
pub use record::{Record, VAL_SIZE};
pub use table::Table;
