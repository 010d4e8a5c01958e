//! # CLI Layer
//!
//! This module is **one possible UI client** for attrform. It is not the library.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the tracing subscriber
//! - Handles argument parsing
//! - Formats forms and error reports for humans
//!
//! ## Structure
//!
//! - `setup.rs`: clap definitions
//! - `commands.rs`: `run()`, context setup and per-command handlers
//! - `render.rs`: forms, schemas and errors to strings
//! - `styles.rs` / `templates.rs`: the theme and the minijinja templates

mod commands;
mod render;
mod setup;
mod styles;
mod templates;

pub use commands::{print_error, run};
