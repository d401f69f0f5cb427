pub use crate::errors::HarnessError;

pub mod cli;
pub mod compare;
pub mod discovery;
pub mod errors;
pub mod expect;
pub mod report;
pub mod runner;
