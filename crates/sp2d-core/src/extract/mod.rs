//! SP2D field extraction module.

mod parser;
pub mod rules;

pub use parser::{extract_sp2d, Sp2dExtractor};
