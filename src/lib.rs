//! Scantext Server Library
//!
//! Exposes the application modules so integration tests can build the
//! router against an in-memory database and a mock OCR engine.
//! The server binary is in main.rs.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod ocr;
pub mod pdf;
pub mod routes;
pub mod state;
pub mod views;
