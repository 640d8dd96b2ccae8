// Adapters layer: profile sources and the reference list cache.

pub mod profile;
pub mod universities;

pub use profile::{FileProfileSource, HttpProfileSource};
pub use universities::{CachedReferenceList, StaticReferenceList};
