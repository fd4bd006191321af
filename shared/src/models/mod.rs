//! Data models
//!
//! Wire types exchanged with the membership backend.
//! All IDs are `i64`, all amounts are `i64` cents.

pub mod article;
pub mod export;
pub mod member;
pub mod sale;
pub mod statistics;

// Re-exports
pub use article::*;
pub use export::*;
pub use member::*;
pub use sale::*;
pub use statistics::*;
