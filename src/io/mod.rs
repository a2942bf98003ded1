//! Reading file records and writing reports.

pub mod input;
pub mod output;
pub mod writers;

pub use input::{parse_records, read_records, read_records_from};
pub use output::{create_writer, OutputFormat, OutputWriter};
