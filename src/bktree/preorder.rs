use std::iter::FusedIterator;

use crate::bknode::BkNode;
use crate::Dist;

/// One step of a pre-order walk: a node, and the edge it was reached by.
#[derive(Debug)]
pub(crate) struct BkPreOrderEntry<'a, N> {
    pub(crate) parent: Option<&'a N>,
    pub(crate) dist: Dist,
    pub(crate) node: &'a N,
}

/// Parents before children, each node exactly once.
#[derive(Debug)]
pub(crate) struct BkPreOrder<'a, N> {
    stack: Vec<BkPreOrderEntry<'a, N>>,
}

impl<'a, N: BkNode> BkPreOrder<'a, N> {
    pub(crate) fn new(root: Option<&'a N>) -> BkPreOrder<'a, N> {
        BkPreOrder {
            stack: root
                .into_iter()
                .map(|node| BkPreOrderEntry {
                    parent: None,
                    dist: 0,
                    node,
                })
                .collect(),
        }
    }
}

impl<'a, N: BkNode> Iterator for BkPreOrder<'a, N> {
    type Item = BkPreOrderEntry<'a, N>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.stack.pop()?;
        for (dist, child) in entry.node.children_iter() {
            self.stack.push(BkPreOrderEntry {
                parent: Some(entry.node),
                dist,
                node: child,
            });
        }
        Some(entry)
    }
}

/// Every key in a tree, parents before children. See [`BkTree::values`].
///
/// [`BkTree::values`]: crate::BkTree::values
#[derive(Debug)]
pub struct Values<'a, N> {
    walk: BkPreOrder<'a, N>,
}

impl<'a, N: BkNode> Values<'a, N> {
    pub(crate) fn new(root: Option<&'a N>) -> Self {
        Values {
            walk: BkPreOrder::new(root),
        }
    }
}

impl<'a, N: BkNode> Iterator for Values<'a, N> {
    type Item = &'a N::Key;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next().map(|entry| entry.node.key())
    }
}

impl<'a, N: BkNode> FusedIterator for Values<'a, N> {}

/// A parent to child link, labelled with the distance between the two keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a, K> {
    pub parent: &'a K,
    pub child: &'a K,
    pub distance: Dist,
}

/// Every edge in a tree, in pre-order of the child. See [`BkTree::edges`].
///
/// [`BkTree::edges`]: crate::BkTree::edges
#[derive(Debug)]
pub struct Edges<'a, N> {
    walk: BkPreOrder<'a, N>,
}

impl<'a, N: BkNode> Edges<'a, N> {
    pub(crate) fn new(root: Option<&'a N>) -> Self {
        Edges {
            walk: BkPreOrder::new(root),
        }
    }
}

impl<'a, N: BkNode> Iterator for Edges<'a, N> {
    type Item = Edge<'a, N::Key>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = self.walk.next()?;
            if let Some(parent) = entry.parent {
                return Some(Edge {
                    parent: parent.key(),
                    child: entry.node.key(),
                    distance: entry.dist,
                });
            }
        }
    }
}

impl<'a, N: BkNode> FusedIterator for Edges<'a, N> {}
