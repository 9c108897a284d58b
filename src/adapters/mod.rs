pub mod json;
pub mod slicing;
