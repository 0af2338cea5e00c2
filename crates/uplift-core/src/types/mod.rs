//! Shared data structures.

pub mod collections;

pub use collections::{FxHashMap, FxHashSet, SmallVec2, SmallVec4};
