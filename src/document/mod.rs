//! The user record model and the operations that act on it in memory.

pub mod ops;
pub mod record;
