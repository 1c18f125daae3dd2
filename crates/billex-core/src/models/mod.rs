//! Data models shared across the pipeline.

pub mod bill;
pub mod chat;
pub mod config;
pub mod language;
