//! # Stocksheet
//!
//! A canteen's daily stock sheet: each item has an opening quantity, stock
//! received and stock dispensed, and from those the closing stock and a status
//! (OK, Reorder, Out of Stock) are derived. The sheet can be searched,
//! filtered by status, and exported as CSV.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses arguments, prints tables and messages             │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Thin facade over commands, generic over the store        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - upsert, edit, delete, list, show, export, report date    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (stock.rs, query.rs, csv_export.rs)                   │
//! │  - Pure functions over in-memory items                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - ItemStore trait; FileStore, InMemoryStore                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Closing stock and status are never stored. They are recomputed from the
//! four quantities each time a sheet is read, so they cannot go stale.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`stock`]: Closing/status derivation and number formatting
//! - [`query`]: Search and status filtering
//! - [`csv_export`]: The CSV export format
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `StockItem`, `Quantity`, `Status`
//! - [`config`]: Per-sheet configuration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod csv_export;
pub mod error;
pub mod model;
pub mod query;
pub mod stock;
pub mod store;
