//! Data models

pub mod patient;

pub use patient::*;
