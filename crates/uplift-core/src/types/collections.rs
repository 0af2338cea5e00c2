//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec for per-node candidate lookups (usually one or two keys).
pub type SmallVec2<T> = SmallVec<[T; 2]>;

/// SmallVec for per-node matched actions (usually a handful).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
