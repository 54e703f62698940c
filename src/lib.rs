//! Chainbook - a tamper-evident append-only ledger simulator
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`blockchain`] - Block structure, append path and integrity verification
//! - [`payload`] - Tagged transaction payloads and their canonical rendering
//! - [`digest`] - The (non-cryptographic) hashing primitive
//!
//! ## Participants
//! - [`identity`] - Identity registry and key issuance
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - [`cli`] - CLI utilities

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod blockchain;
pub mod digest;
pub mod payload;

// ============================================================================
// Participants
// ============================================================================
pub mod identity;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod cli;
pub mod config;
pub mod error;
