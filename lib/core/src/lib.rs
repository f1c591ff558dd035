//! Core domain types for the brass-lantern service.
//!
//! This crate provides the strongly-typed identifiers shared by the
//! task store and the HTTP surface.

pub mod id;

pub use id::{ParseIdError, TaskId};
