//! Use-case services — the driving side of the application layer.

pub mod event_service;
pub mod feed_service;
