//! # telos-core
//!
//! Core types and error types for Telos.
//!
//! This crate provides the foundational types shared across all Telos crates:
//! - The five analytical purposes and the enums around them
//! - Balance state machine states and statuses
//! - Entity structs for every pipeline stage (classification, vocabulary,
//!   capability schemas, integration, balance records, pipeline results)
//! - Batch outcome and report types returned by the CLI
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
