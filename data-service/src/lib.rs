//! Data Service - schemaless JSON documents over a single MongoDB collection.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
