pub mod builder;
pub mod convertible;
pub mod cycles;
pub mod dependency;
pub mod edge;
pub mod error;
pub mod graph;
pub mod model;
pub mod path;
pub mod ports;
pub mod predicate;
pub mod slice;
