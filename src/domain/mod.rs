//! Domain layer containing business types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, validation errors)
//! - `contact` - Validated contact form submissions and delivery outcomes
//! - `conversation` - Visitor threads, messages and key resolution

pub mod contact;
pub mod conversation;
pub mod foundation;
