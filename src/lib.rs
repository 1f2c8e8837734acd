//! A hierarchical bitmap index over a bounded non-negative integer
//! universe `[0, W^L)`, supporting point insertion, point membership, and
//! bidirectional ordered successor/predecessor search in time proportional
//! to the tree depth rather than the universe size or population.

pub use bitmap::{LayeredBitmap, Width};
pub use error::{Error, Result};

pub mod bitmap;
pub mod error;
pub mod iter;
pub mod node;
pub mod tree;
pub mod word;
