pub mod document;
pub mod reader;

pub use reader::JsonModelReader;
