pub mod reader;

pub use reader::MarkerReader;
