//! # gamerev Common Library
//!
//! Shared code for the gamerev service and client including:
//! - Document models and schema validation
//! - Query-string to store query translation
//! - Document store on SQLite
//! - Configuration loading
//! - Short id generation

pub mod config;
pub mod db;
pub mod error;
pub mod id;
pub mod models;
pub mod pagination;
pub mod query;

pub use error::{Error, Result};
