//! Starblog - a Star Wars blog API
//!
//! This library provides the core functionality for the Starblog API:
//! characters, planets, blog users, and per-user favorites.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
