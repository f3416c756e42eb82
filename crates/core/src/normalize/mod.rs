//! The reusable normalization engine.
//!
//! Each language front end implements [`TreeVisitor`] against its own
//! grammar and drives a shared [`FileContext`]; the engine owns the
//! traversal driver, the per-function scope tables, the container stack
//! lifecycle and the final assembly into one `Container`.

pub mod assemble;
pub mod context;
pub mod scope;
pub mod visitor;

pub use assemble::assemble;
pub use context::{FileContext, FunctionHome};
pub use scope::ScopeTracker;
pub use visitor::{TreeVisitor, walk_tree};
