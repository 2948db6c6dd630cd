//! Command line layer for fundus-prep.
//!
//! Argument parsing lives in `args`, CLI-only errors in `errors`, and the
//! dispatch to `fundus_prep_core` in `runner`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
