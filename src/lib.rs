//! docviews provides the CouchDB map views behind the switch controller's
//! `switches`, `flows` and `tags` databases, as pure Rust functions.
//!
//! Each view maps one document to the `(key, value)` pairs it contributes
//! to an index. `switch` and `flow` key every document by its `_id`;
//! `tags` emits one pair per tag occurrence. The crate also plugs those
//! views into CouchDB as a native query server, renders the design
//! documents that register them, and builds view query URLs.
//!
//! # Architecture
//!
//! - [`views`] -- The [`View`](views::View) trait and the identity and tag
//!   fan-out projections.
//! - [`catalog`] -- View registration metadata: names, design groups,
//!   databases, design documents, and query URLs.
//! - [`protocol`] -- The line-oriented JSON query-server protocol and its
//!   async stdio loop.
//! - [`query`] -- Offline evaluation of a view over a batch of documents.
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution.
//! - [`config`] -- Configuration loading, connection strings, and
//!   validation via the [`ConfigSource`](config::ConfigSource) trait.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print
//!   output on stderr.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support |
//! | `toml` | TOML config file support |
//! | `file-backends` | All file format backends |
//! | `full` | All features |

#![allow(clippy::missing_errors_doc)]

pub mod catalog;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod query;
pub mod views;
