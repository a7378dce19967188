//! # snipz
//!
//! A library for keeping short text snippets (credentials, boilerplate, markdown
//! templates) in a single JSON file, with a CLI as one client. The library never
//! prints, never exits, and never assumes a terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, cli/)                               │
//! │  - clap parsing, colored output, exit codes                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - one method per operation                                 │
//! │  - every failure becomes a CmdResult with a message         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - load a fresh snapshot, mutate by id, save                │
//! │  - return Result<CmdResult<T>>                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store/)                                             │
//! │  - SnippetStore: parsing, normalization, seeding            │
//! │  - StorageBackend: FsBackend (atomic files), MemBackend     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stateless helpers sit beside the layers: [`schema`] (record normalization),
//! [`mask`] (credential masking for display), [`password`] (password generation),
//! [`category`] (the name → color registry) and [`config`].
//!
//! ## Testing
//!
//! Commands and the API are tested against [`store::InMemoryStore`]; the filesystem
//! backend and the binary have integration tests under `tests/`.

pub mod api;
pub mod category;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod mask;
pub mod model;
pub mod password;
pub mod schema;
pub mod store;
