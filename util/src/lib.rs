//! Unopinionated standalone utilities.

mod geom;
pub use geom::{area_3x3, neighbor_mask_8, DIR_4, DIR_8};

mod grid;
pub use grid::Grid;

mod rng;
pub use rng::{srng, Logos, RngExt};

pub type FastHasher = rustc_hash::FxHasher;

/// Set with an efficient hash function.
pub use rustc_hash::FxHashSet as HashSet;

type DefaultHashBuilder = std::hash::BuildHasherDefault<rustc_hash::FxHasher>;

/// Insertion order preserving map with an efficient hash function.
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, DefaultHashBuilder>;

/// Good default concrete rng.
pub type GameRng = rand_xorshift::XorShiftRng;
