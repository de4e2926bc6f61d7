//! # Jsonkeep Architecture
//!
//! Jsonkeep persists JSON documents to single files without ever leaving a
//! half-written file behind. It is a library first; the `jsonkeep` binary is
//! one client of it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, prints results, owns exit codes        │
//! │  - Installs the tracing subscriber                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One function per subcommand, returns CmdResult           │
//! │  - No stdout/stderr, no process exit                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - JsonStore: load/try_load, save/try_save                  │
//! │  - fs: same-directory temp file + atomic rename             │
//! │  - format: sorted keys, 4-space indent                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Durability Rule
//!
//! A target file, once it exists, always holds a complete document: either the
//! one it had before a save or the one the save wrote. Saves write a temp file
//! beside the target and rename it into place; the temp file is removed
//! whether or not the save succeeded.
//!
//! ## Failure Reporting
//!
//! `JsonStore::load` and `JsonStore::save` never return errors. They log
//! through the store's [`log::StoreLogger`] and fall back to "nothing saved
//! yet" / "previous file kept". Callers that need to react use `try_load` and
//! `try_save`.
//!
//! ## Module Overview
//!
//! - [`store`]: the persistence core
//! - [`log`]: the injected logging capability
//! - [`model`]: the `Document` type and dotted key paths
//! - [`merge`]: recursive document merge
//! - [`config`]: store settings and their config file
//! - [`net`]: local/private address checks and outbound address discovery
//! - [`slug`]: identifier-safe slugs
//! - [`commands`]: CLI business logic
//! - [`error`]: error types

pub mod commands;
pub mod config;
pub mod error;
pub mod log;
pub mod merge;
pub mod model;
pub mod net;
pub mod slug;
pub mod store;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use log::{MemoryLogger, StoreLogger, TracingLogger};
pub use model::Document;
pub use store::JsonStore;
