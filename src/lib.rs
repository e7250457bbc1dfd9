//! Spendlog - Terminal-based personal expense tracker
//!
//! This library provides the core functionality for Spendlog: logging
//! expenses against categories, setting monthly or yearly budgets, and
//! summarizing spending through a dashboard and budget alerts.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Core data models (users, categories, expenses, budgets)
//! - `storage`: JSON file storage layer and the query interface
//! - `services`: Business logic layer
//! - `reports`: Dashboard, budget alerts and monthly summaries
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use spendlog::config::SpendlogPaths;
//! use spendlog::reports::DashboardStats;
//! use spendlog::storage::Storage;
//!
//! let mut storage = Storage::new(SpendlogPaths::new()?)?;
//! storage.load_all()?;
//! let stats = DashboardStats::generate(&storage, user_id, chrono::Local::now().date_naive())?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SpendlogError, SpendlogResult};
