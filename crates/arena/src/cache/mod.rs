//! Cache backend implementations.
//!
//! Concrete implementations of `arena_core::cache::Cache`.
//!
//! # Feature Flags
//!
//! - default: in-memory LRU cache, always available
//! - `redis`: Redis cache using the redis crate, used by the server when enabled

pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
