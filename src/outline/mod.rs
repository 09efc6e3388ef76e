pub mod host;
pub mod memory;
pub mod walker;

pub use host::{AnnotationHost, OutlineHost};
pub use memory::{MemoryOutline, NodeId};
pub use walker::{
    capitalize_all, collapse_all, fix_annotations, fix_destinations, outline_items, run, walk,
    WalkMode,
};
