//! # Attrform Architecture
//!
//! Attrform builds **display forms from a node's typed attributes**. Given a file whose
//! attributes carry type tags, it decides which attributes to show, turns each into a
//! field descriptor, and picks a layout for the node's type. It is a library that
//! happens to have a CLI client.
//!
//! ## The Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders forms, handles terminal I/O    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - type lookup, schema merge, extraction, template choice   │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (extract.rs, render.rs, template/, form.rs)           │
//! │  - Pure logic over typed values                             │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Inputs (source/, schema/)                                  │
//! │  - AttributeSource: XattrSource, dump files, MemSource      │
//! │  - SchemaStore: FsSchemaStore, MemSchemaStore               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Errors Are Values
//!
//! Fatal conditions (repeated attribute values, unreadable attributes, a template
//! that fails to start) abort the request with a typed error. The library never shows
//! them; callers get an [`error::ErrorReport`] and present it however they like.
//! Unsupported attribute types are not fatal: they become placeholder fields.
//!
//! ## Module Overview
//!
//! - **[`api`]**: `FormApi`, the entry point for building forms
//! - **[`source`]**: Where attributes come from
//! - **[`schema`]**: Per-type visibility and editability
//! - **[`extract`]**: Source + policy into a `TypedRecord`
//! - **[`render`]**: One typed value into one field descriptor
//! - **[`template`]**: Type identifier to form strategy, with generic fallback
//! - **[`form`]**: The assembled form
//! - **[`model`]**: Type tags, records, field descriptors
//! - **[`mime`]**: Type identifier helpers
//! - **[`config`]**: `config.json` handling
//! - **[`error`]**: Error types

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod form;
pub mod mime;
pub mod model;
pub mod render;
pub mod schema;
pub mod source;
pub mod template;
