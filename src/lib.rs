//! archcycles library: dependency derivation, slice graphs and cycle detection
//! for architecture rules over an imported class model.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
