// Abacus - Workday Accounting Journal to CSV ETL Tool
// Copyright (c) 2025 Abacus Contributors
// Licensed under the MIT License

//! # Abacus - Workday Accounting Journal Export
//!
//! Abacus is an ETL tool built in Rust that exports accounting journals
//! from a Workday financial tenant to normalized CSV for downstream
//! ingestion.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Extracting** paginated journal collections via the XML web services
//! - **Resolving** each journal line against master-data dictionaries and
//!   cached on-demand lookups (expense types, deals, vendors)
//! - **Emitting** size-bounded CSV chunks plus an append-only list of
//!   per-record failures, so one malformed record never discards a batch
//!
//! ## Architecture
//!
//! Abacus follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (fetch engine, mapping, CSV, export)
//! - [`adapters`] - External integrations (Workday auth/transport/XML)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use abacus::config::load_config;
//! use abacus::core::export::ExportCoordinator;
//! use abacus::core::fetch::FetchCriteria;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("abacus.toml")?;
//!
//!     let coordinator = ExportCoordinator::new(config);
//!     let criteria = FetchCriteria::accounting_dates("2024-10-01", "2024-10-31");
//!     let summary = coordinator.execute_export(&criteria).await?;
//!
//!     println!(
//!         "Exported {} journals in {} chunks",
//!         summary.journals_fetched, summary.chunks.len()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Abacus uses the [`domain::AbacusError`] type for all errors. Only
//! transport-level failures abort a batch call; record-level parse and
//! mapping failures are isolated into [`domain::FailedJournal`] records
//! and the batch continues.
//!
//! ## Logging
//!
//! Abacus uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(page = 3, "Fetching journal page");
//! warn!(reported = 2405, fetched = 2399, "Incomplete batch");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
