//! HTTP API handlers for the ordering service.

pub mod orders;
