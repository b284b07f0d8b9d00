use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;

use crate::bknode::{BkNode, BkNodeMut, ChildEntry};
use crate::bktree::preorder::Edges;
use crate::Dist;

/// BK tree node held in RAM.
///
/// Children are stored sparsely, sorted by their distance from this node, so
/// a metric with a large range does not cost a slot per possible distance.
pub struct BkInRam<K> {
    key: K,
    children: Vec<(Dist, Self)>,
}

impl<K> BkInRam<K> {
    pub fn new(key: K) -> BkInRam<K> {
        BkInRam {
            key,
            children: Vec::new(),
        }
    }

    fn slot(&self, dist: Dist) -> Result<usize, usize> {
        self.children.binary_search_by_key(&dist, |(d, _)| *d)
    }
}

impl<K> BkNode for BkInRam<K> {
    type Key = K;

    fn key(&self) -> &Self::Key {
        &self.key
    }

    fn has_child_at(&self, dist: Dist) -> bool {
        self.slot(dist).is_ok()
    }

    fn child_at(&self, dist: Dist) -> Option<&Self> {
        let index = self.slot(dist).ok()?;
        self.children.get(index).map(|(_, child)| child)
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn children_iter<'a>(&'a self) -> Box<dyn Iterator<Item = (Dist, &'a Self)> + 'a> {
        Box::new(
            self.children
                .iter()
                .map(|(dist, child)| (*dist, child))
                // Traversals push these onto a stack; reversed, the closest child is popped first.
                .rev(),
        )
    }
}

impl<K> BkNodeMut for BkInRam<K> {
    fn child_entry(&mut self, dist: Dist) -> ChildEntry<'_, Self> {
        match self.slot(dist) {
            Ok(index) => ChildEntry::Occupied(&mut self.children[index].1),
            Err(_) => ChildEntry::Vacant(self),
        }
    }

    fn set_child_node(&mut self, dist: Dist, node: Self) {
        match self.slot(dist) {
            Ok(index) => self.children[index] = (dist, node),
            Err(index) => self.children.insert(index, (dist, node)),
        }
    }
}

/// Unlinks descendants one at a time; the default drop glue recurses once per
/// level and a long distance-0 chain would exhaust the stack.
impl<K> Drop for BkInRam<K> {
    fn drop(&mut self) {
        let mut pending: Vec<Self> = self.children.drain(..).map(|(_, child)| child).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.children.drain(..).map(|(_, child)| child));
        }
    }
}

/// Flat list of `(parent, distance, child)` links in pre-order.
impl<K> Debug for BkInRam<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let edges: Vec<_> = Edges::new(Some(self))
            .map(|edge| (edge.parent, edge.distance, edge.child))
            .collect();
        f.debug_struct("BkInRam")
            .field("key", &self.key)
            .field("edges", &edges)
            .finish()
    }
}
