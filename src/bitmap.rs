//! The public, width-erased entry point: [`LayeredBitmap`].

use crate::error::{Error, Result};
use crate::iter::{Backward, Forward};
use crate::tree::Tree;

/// Supported per-node word widths.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Width {
    W32,
    W64,
}

/// A hierarchical bitmap index over `[0, W^L)`.
///
/// `W` (32 or 64) and `L` (5..=8) are fixed at construction; `Width` picks
/// which machine word backs every node, so callers choose a width without
/// reaching for the generic `Tree<W>` directly.
pub enum LayeredBitmap {
    W32(Tree<u32>),
    W64(Tree<u64>),
}

impl LayeredBitmap {
    /// Construct a tree over `[0, width^layers)`.
    ///
    /// `layers` must be in `5..=8`, otherwise this fails with
    /// [`Error::BadConfig`]. The word width itself can no longer be
    /// malformed — `Width` closes off the choice to the two variants the
    /// tree actually supports.
    pub fn new(width: Width, layers: u8) -> Result<Self> {
        if !(5..=8).contains(&layers) {
            return Err(Error::BadConfig);
        }
        match width {
            Width::W32 => Ok(LayeredBitmap::W32(Tree::new(layers))),
            Width::W64 => Ok(LayeredBitmap::W64(Tree::new(layers))),
        }
    }

    /// Size of the represented universe, `width^layers`.
    pub fn universe(&self) -> u64 {
        match self {
            LayeredBitmap::W32(t) => t.universe(),
            LayeredBitmap::W64(t) => t.universe(),
        }
    }

    pub fn set(&mut self, x: u64) -> Result<()> {
        match self {
            LayeredBitmap::W32(t) => t.set(x),
            LayeredBitmap::W64(t) => t.set(x),
        }
    }

    pub fn get(&self, x: u64) -> Result<u8> {
        match self {
            LayeredBitmap::W32(t) => t.get(x),
            LayeredBitmap::W64(t) => t.get(x),
        }
    }

    pub fn find_next(&self, x: u64) -> Result<i64> {
        match self {
            LayeredBitmap::W32(t) => t.find_next(x),
            LayeredBitmap::W64(t) => t.find_next(x),
        }
    }

    pub fn find_previous(&self, x: u64) -> Result<i64> {
        match self {
            LayeredBitmap::W32(t) => t.find_previous(x),
            LayeredBitmap::W64(t) => t.find_previous(x),
        }
    }

    /// Ascending sequence of members strictly greater than `start`
    /// (default `0`). A member sitting exactly at `start` is not yielded —
    /// `find_next` is a strict successor relation and the traversal seeds
    /// its first call with `start` itself.
    pub fn traverse_forward(&self, start: Option<u64>) -> Box<dyn Iterator<Item = u64> + '_> {
        let start = start.unwrap_or(0);
        match self {
            LayeredBitmap::W32(t) => Box::new(Forward::new(t, start)),
            LayeredBitmap::W64(t) => Box::new(Forward::new(t, start)),
        }
    }

    /// Descending sequence of members strictly smaller than `start`
    /// (default `universe() - 1`).
    pub fn traverse_backward(&self, start: Option<u64>) -> Box<dyn Iterator<Item = u64> + '_> {
        let start = start.unwrap_or_else(|| self.universe() - 1);
        match self {
            LayeredBitmap::W32(t) => Box::new(Backward::new(t, start)),
            LayeredBitmap::W64(t) => Box::new(Backward::new(t, start)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_layer_count() {
        assert_eq!(
            LayeredBitmap::new(Width::W64, 4).unwrap_err(),
            Error::BadConfig
        );
        assert_eq!(
            LayeredBitmap::new(Width::W64, 9).unwrap_err(),
            Error::BadConfig
        );
    }

    #[test]
    fn accepts_boundary_configs() {
        assert!(LayeredBitmap::new(Width::W32, 5).is_ok());
        assert!(LayeredBitmap::new(Width::W64, 8).is_ok());
    }

    #[test]
    fn forward_traversal_skips_member_at_start() {
        let mut b = LayeredBitmap::new(Width::W64, 6).unwrap();
        for &x in &[0u64, 1, 63, 64, 4095, 4096] {
            b.set(x).unwrap();
        }
        let got: Vec<u64> = b.traverse_forward(None).collect();
        assert_eq!(got, vec![1u64, 63, 64, 4095, 4096]);
    }

    #[test]
    fn backward_traversal_from_default_start() {
        let mut b = LayeredBitmap::new(Width::W64, 6).unwrap();
        for &x in &[10u64, 20, 30] {
            b.set(x).unwrap();
        }
        let got: Vec<u64> = b.traverse_backward(None).collect();
        assert_eq!(got, vec![30u64, 20, 10]);
    }

    #[test]
    fn backward_traversal_honors_explicit_zero() {
        let mut b = LayeredBitmap::new(Width::W64, 6).unwrap();
        b.set(0).unwrap();
        // Explicit Some(0) is a real start, unlike the original's
        // default-argument truthiness quirk.
        let got: Vec<u64> = b.traverse_backward(Some(0)).collect();
        assert!(got.is_empty());
    }
}
