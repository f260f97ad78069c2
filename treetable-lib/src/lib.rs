//! Tree table state library
//!
//! View-independent state for hierarchical tree tables: expand/collapse per
//! node, completion derived from leaf items, leaf selection with inline item
//! editing, plus the filter combiner used by flat project lists.

pub mod completion;
pub mod config;
pub mod edit;
pub mod engine;
pub mod error;
pub mod expansion;
pub mod filter;
pub mod load;
pub mod model;
pub mod sample;

pub use config::EngineConfig;
pub use engine::TreeState;
pub use error::{EditError, TreeError};
