//! Error types

mod edit;
mod tree;

pub use edit::*;
pub use tree::*;
