//! Domain types and storage/cache contracts for the arena service.
//!
//! This crate is the functional core: it performs no I/O. Storage and cache
//! backends live in the `arena` binary and implement the traits defined here.

pub mod cache;
pub mod competition;
pub mod storage;
