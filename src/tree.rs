//! The layered bitmap tree: address decomposition, mutation and the
//! ascend/descend search protocol behind `find_next`/`find_previous`.

use log::trace;

use crate::error::{Error, Result};
use crate::node::{Node, NodeId};
use crate::word::Word;

/// A hierarchical bitmap index over `[0, W^L)`, generic over the machine
/// word `W` (`u32` or `u64`). Construct through [`crate::LayeredBitmap`]
/// rather than directly — that is where the `width in {32,64}` /
/// `layers in 5..=8` validation (`BadConfig`) lives.
pub struct Tree<W: Word> {
    arena: Vec<Node<W>>,
    layers: u8,
}

const ROOT: NodeId = NodeId(0);

impl<W: Word> Tree<W> {
    pub(crate) fn new(layers: u8) -> Self {
        Tree {
            arena: vec![Node::root()],
            layers,
        }
    }

    /// Size of the represented universe, `W^L`.
    pub fn universe(&self) -> u64 {
        (W::BITS as u64).pow(self.layers as u32)
    }

    fn check_range(&self, x: u64) -> Result<()> {
        if x >= self.universe() {
            return Err(Error::OutOfRange);
        }
        Ok(())
    }

    /// Digit `d_k` of `x` at depth `k`: `floor(x / W^(L-1-k)) mod W`.
    fn digit(&self, x: u64, k: u8) -> u32 {
        let place = (W::BITS as u64).pow((self.layers - 1 - k) as u32);
        ((x / place) % W::BITS as u64) as u32
    }

    fn node(&self, id: NodeId) -> &Node<W> {
        &self.arena[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<W> {
        &mut self.arena[id.0]
    }

    /// Attach a freshly allocated child at slot `i` of `parent`, stamping
    /// `depth`, `parent`, `parent_index` and `lower_bound`, and returning
    /// its id.
    fn attach_child(&mut self, parent: NodeId, i: u32, is_leaf: bool) -> NodeId {
        let p = self.node(parent);
        let mut child = Node::child_of(p.depth, i, p.lower_bound, self.layers, is_leaf);
        child.parent = Some(parent);
        let id = NodeId(self.arena.len());
        self.arena.push(child);
        self.node_mut(parent).children[i as usize] = Some(id);
        id
    }

    /// Set the bit for position `x`, materializing at most `L - 1` new
    /// nodes along the way.
    pub fn set(&mut self, x: u64) -> Result<()> {
        self.check_range(x)?;
        let mut cur = ROOT;
        for k in 0..self.layers {
            let d = self.digit(x, k);
            self.node_mut(cur).set_bit(d, 1)?;
            if k < self.layers - 1 {
                let next = match self.node(cur).child(d) {
                    Some(id) => id,
                    None => {
                        trace!(
                            "set({x}): materializing child at depth {} slot {d}",
                            self.node(cur).depth + 1
                        );
                        self.attach_child(cur, d, k + 1 == self.layers - 1)
                    }
                };
                cur = next;
            }
        }
        Ok(())
    }

    /// Read the bit for position `x`.
    pub fn get(&self, x: u64) -> Result<u8> {
        self.check_range(x)?;
        let mut cur = ROOT;
        for k in 0..self.layers {
            let d = self.digit(x, k);
            if k == self.layers - 1 {
                return Ok(self.node(cur).get_bit(d) as u8);
            }
            match self.node(cur).child(d) {
                Some(id) => cur = id,
                None => return Ok(0),
            }
        }
        unreachable!("loop always returns at k == layers - 1")
    }

    /// Descend from the root along the digits of `x` as far as existing
    /// children allow. Returns the deepest node reached and the digit that
    /// would have selected the next step (or the leaf bit). The root is
    /// always a valid frontier: it exists eagerly, so this never needs to
    /// report "no frontier."
    fn frontier(&self, x: u64) -> (NodeId, u32) {
        let mut cur = ROOT;
        for k in 0..self.layers {
            let d = self.digit(x, k);
            if k == self.layers - 1 {
                return (cur, d);
            }
            match self.node(cur).child(d) {
                Some(id) => cur = id,
                None => return (cur, d),
            }
        }
        unreachable!("loop always returns at k == layers - 1")
    }

    /// Smallest member strictly greater than `x`, or `-1` if none exists.
    /// The root always exists, so an empty tree has no special case here:
    /// it simply returns `-1` like any other exhausted search. See
    /// DESIGN.md.
    pub fn find_next(&self, x: u64) -> Result<i64> {
        self.check_range(x)?;
        let (target, curpos) = self.frontier(x);
        let mut node = target;
        let mut from_index = curpos as i64;
        for _ in 0..=self.layers {
            let r = self.node(node).find_next(from_index + 1);
            if r > -1 {
                return Ok(self.descend_leftmost(node, r));
            }
            let n = self.node(node);
            match n.parent {
                Some(parent) => {
                    from_index = n.parent_index as i64;
                    node = parent;
                }
                None => return Ok(-1),
            }
        }
        unreachable!("ascent is bounded by the tree's depth")
    }

    /// Largest member strictly smaller than `x`, or `-1` if none exists.
    pub fn find_previous(&self, x: u64) -> Result<i64> {
        self.check_range(x)?;
        let (target, curpos) = self.frontier(x);
        let mut node = target;
        let mut from_index = curpos as i64;
        for _ in 0..=self.layers {
            let r = self.node(node).find_previous(from_index);
            if r > -1 {
                return Ok(self.descend_rightmost(node, r));
            }
            let n = self.node(node);
            match n.parent {
                Some(parent) => {
                    from_index = n.parent_index as i64;
                    node = parent;
                }
                None => return Ok(-1),
            }
        }
        unreachable!("ascent is bounded by the tree's depth")
    }

    /// From `node`, where bit `r` (1-based) was just found set, walk down
    /// to the leftmost member of that subtree — or, if `node` is a leaf,
    /// `r` already names the member itself.
    fn descend_leftmost(&self, node: NodeId, mut r: i64) -> i64 {
        let mut cur = node;
        for _ in 0..=self.layers {
            let idx = (r - 1) as u32;
            match self.node(cur).child(idx) {
                None => return self.node(cur).lower_bound as i64 + r - 1,
                Some(child) => {
                    cur = child;
                    r = self.node(cur).find_next(0);
                }
            }
        }
        unreachable!("descent is bounded by the tree's depth")
    }

    /// Symmetric to [`Self::descend_leftmost`], walking to the rightmost
    /// member.
    fn descend_rightmost(&self, node: NodeId, mut r: i64) -> i64 {
        let mut cur = node;
        for _ in 0..=self.layers {
            let idx = (r - 1) as u32;
            match self.node(cur).child(idx) {
                None => return self.node(cur).lower_bound as i64 + r - 1,
                Some(child) => {
                    cur = child;
                    r = self.node(cur).find_previous(W::BITS as i64);
                }
            }
        }
        unreachable!("descent is bounded by the tree's depth")
    }
}
