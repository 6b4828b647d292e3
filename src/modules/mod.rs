//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for infrastructure such as the media directory.

pub mod storage;
