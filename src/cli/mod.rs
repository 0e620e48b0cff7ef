//! Command Line Interface (CLI) layer for s1bands.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the dispatch logic (`runner`) for the `setup`, `evalscript`,
//! `request` and `extract` subcommands. It wires user-provided options to
//! the library functionality exposed via `s1bands::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
