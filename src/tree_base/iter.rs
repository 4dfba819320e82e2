use std::iter::FusedIterator;

use super::node::{Link, Node};

/// In-order walk over borrowed records. Holds the path of pending ancestors,
/// so a fresh iterator can be taken from the tree at any time.
#[derive(Debug)]
pub struct Iter<'a, R> {
    stack: Vec<&'a Node<R>>,
    remaining: usize,
}

impl<'a, R> Iter<'a, R> {
    pub(crate) fn new(root: &'a Link<R>, len: usize) -> Self {
        let mut it = Self {
            stack: Vec::new(),
            remaining: len,
        };
        it.push_left_spine(root);
        it
    }

    fn push_left_spine(&mut self, mut link: &'a Link<R>) {
        while let Some(n) = link {
            self.stack.push(n);
            link = &n.left;
        }
    }
}

impl<R> Clone for Iter<'_, R> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, R> Iterator for Iter<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        self.push_left_spine(&n.right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(&n.record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R> ExactSizeIterator for Iter<'_, R> {}

impl<R> FusedIterator for Iter<'_, R> {}

/// Drains a tree into its records in order, consuming the nodes.
pub(crate) fn drain_in_order<R>(mut link: Link<R>, out: &mut Vec<R>) {
    let mut spine: Vec<Box<Node<R>>> = Vec::new();
    loop {
        while let Some(mut n) = link {
            link = n.left.take();
            spine.push(n);
        }
        let Some(n) = spine.pop() else {
            return;
        };
        let Node { record, right, .. } = *n;
        out.push(record);
        link = right;
    }
}
