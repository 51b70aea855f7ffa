//! # impact-core
//!
//! Core types, ID generation, and error types for the change impact engine.
//!
//! This crate provides the foundational types shared across the workspace:
//! - Records for tracked changes, impact analyses, and notifications
//! - The `ChangeImpactStore` aggregate with its bounded, most-recent-first logs
//! - Tag enums, including decision-status derivation from research coverage
//! - ID prefix constants and generation
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
