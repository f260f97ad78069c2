//! Tree data model

mod item;
mod node;
mod path;
mod tree;

pub use item::*;
pub use node::*;
pub use path::*;
pub use tree::*;
