//! Domain models for Pressroom.
//!
//! These are the core types shared across all crates.

pub mod blog;
pub mod block;
pub mod member;
pub mod tenant;
