//! # Taskboard API Server Library
//!
//! This library provides the HTTP surface of the Taskboard server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers
//! - `seed`: Default accounts and todos inserted at startup

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod seed;
