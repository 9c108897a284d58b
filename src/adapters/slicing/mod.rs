pub mod pattern;

pub use pattern::PatternSlices;
