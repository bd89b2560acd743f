//! Integration tests for the rentsim core
//!
//! Tests are organized by topic:
//! - `financial` - Fee, revenue and yield identities, worked examples
//! - `cities` - Suggestion ordering and accent-insensitive matching
//! - `market` - Market data feeding the financial model end to end

mod market;
