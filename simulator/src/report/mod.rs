pub mod model;
pub mod writer;

pub use model::{ExampleRecord, MatchRecord, PairRecord, SignificanceReport, ToleranceReport};
pub use writer::ReportWriter;
