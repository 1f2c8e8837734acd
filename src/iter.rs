//! The iterator driver: `traverse_forward`/`traverse_backward` repeatedly
//! invoke `find_next`/`find_previous`, threading the previous result back
//! in as the next cursor, until the tree reports `-1`.
//!
//! `find_next`/`find_previous` are *strict*: `find_next(x)` returns the
//! smallest member `> x`, never `x` itself. Seeding the forward traversal's
//! first call with `start` therefore skips a member that sits exactly at
//! `start`; see DESIGN.md.

use crate::word::Word;
use crate::tree::Tree;

pub struct Forward<'a, W: Word> {
    tree: &'a Tree<W>,
    cursor: Option<u64>,
}

impl<'a, W: Word> Forward<'a, W> {
    pub(crate) fn new(tree: &'a Tree<W>, start: u64) -> Self {
        Forward {
            tree,
            cursor: Some(start),
        }
    }
}

impl<'a, W: Word> Iterator for Forward<'a, W> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let cursor = self.cursor.take()?;
        match self.tree.find_next(cursor) {
            Ok(r) if r > -1 => {
                let v = r as u64;
                self.cursor = Some(v);
                Some(v)
            }
            _ => None,
        }
    }
}

pub struct Backward<'a, W: Word> {
    tree: &'a Tree<W>,
    cursor: Option<u64>,
}

impl<'a, W: Word> Backward<'a, W> {
    pub(crate) fn new(tree: &'a Tree<W>, start: u64) -> Self {
        Backward {
            tree,
            cursor: Some(start),
        }
    }
}

impl<'a, W: Word> Iterator for Backward<'a, W> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let cursor = self.cursor.take()?;
        match self.tree.find_previous(cursor) {
            Ok(r) if r > -1 => {
                let v = r as u64;
                self.cursor = Some(v);
                Some(v)
            }
            _ => None,
        }
    }
}
