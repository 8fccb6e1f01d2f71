//! Command handlers

pub mod adapters;
pub mod config;
pub mod resolve;
