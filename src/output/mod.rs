//! Report sinks.
//!
//! - [`csv`] - CSV tables
//! - [`diagram`] - Graphviz peering diagram
//! - [`terminal`] - log lines and stdout summary

mod csv;
mod diagram;
mod terminal;

use crate::error::VnetError;
use crate::models::UndirectedPeeringEdge;

pub use csv::{
    allocation_rows, escape_csv_field, overlap_rows, peering_rows, to_csv, CsvFileSink,
    ALLOCATION_HEADER, OVERLAP_HEADER, PEERING_HEADER,
};
pub use diagram::{render_dot, DotRenderer};
pub use terminal::{format_field, log_findings, print_summary, summary_notes};

/// Destination for tabular output.
pub trait TableSink {
    fn write_table(
        &self,
        file_name: &str,
        header: &[&str],
        rows: Vec<Vec<String>>,
    ) -> Result<(), VnetError>;
}

/// Destination for the peering graph. Gets endpoints, color and optional
/// label per edge and nothing else.
pub trait DiagramSink {
    fn render(&self, edges: &[UndirectedPeeringEdge]) -> Result<(), VnetError>;
}
