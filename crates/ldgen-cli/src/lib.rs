//! # ldgen-cli: Command-Line Interface
//!
//! A clap-based front end over `ldgen-core` and `ldgen-export`.
//!
//! ## Subcommands
//!
//! - `types`: list supported Schema.org types and their fields
//! - `build`: build and export one record
//! - `bulk`: build and export every row of an upload file
//! - `template`: write a blank upload template
//!
//! ## Exit Codes
//!
//! - `0`: success
//! - `1`: validation failure (unknown type, missing required fields, any
//!   failed bulk row)
//! - `2`: operational error (bad arguments, unreadable files, write
//!   failures)
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers; each handler returns
//!   `anyhow::Result<u8>` with the exit code.
//! - Handlers delegate to the library crates; record logic lives there.
//! - Log output goes to stderr so `--stdout` exports stay clean.

pub mod build;
pub mod bulk;
pub mod config;
pub mod output;
pub mod template;
pub mod types;
pub mod upload;
