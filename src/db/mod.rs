//! Database layer
//!
//! This module provides SQLite persistence for the Starblog API:
//! - Connection pool creation (`pool`)
//! - Code-based embedded migrations (`migrations`)
//! - Repository traits and their SQLx implementations (`repositories`)
//!
//! # Usage
//!
//! ```ignore
//! use starblog::config::DatabaseConfig;
//! use starblog::db::{create_pool, migrations};
//!
//! let pool = create_pool(&config).await?;
//! migrations::run_migrations(&pool).await?;
//! ```

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool, DbPool};
