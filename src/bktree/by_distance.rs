use std::collections::HashSet;
use std::hash::Hash;
use std::iter::FusedIterator;

use super::preorder::BkPreOrder;
use crate::bknode::BkNode;
use crate::Dist;

/// Groups hanging off edges of one exact distance. See
/// [`BkTree::find_by_distance`].
///
/// Each group is the parent's key plus every key in the child's subtree. Only
/// the parent and the child are guaranteed to be `distance` apart.
///
/// [`BkTree::find_by_distance`]: crate::BkTree::find_by_distance
#[derive(Debug)]
pub struct BkByDistance<'a, N> {
    distance: Dist,
    walk: BkPreOrder<'a, N>,
}

impl<'a, N: BkNode> BkByDistance<'a, N> {
    pub(crate) fn new(root: Option<&'a N>, distance: Dist) -> Self {
        BkByDistance {
            distance,
            walk: BkPreOrder::new(root),
        }
    }
}

impl<'a, N> Iterator for BkByDistance<'a, N>
where
    N: BkNode,
    N::Key: Eq + Hash,
{
    type Item = HashSet<&'a N::Key>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let parent = self.walk.next()?.node;
            if let Some(child) = parent.child_at(self.distance) {
                let mut group: HashSet<&'a N::Key> = BkPreOrder::new(Some(child))
                    .map(|entry| entry.node.key())
                    .collect();
                group.insert(parent.key());
                return Some(group);
            }
        }
    }
}

impl<'a, N> FusedIterator for BkByDistance<'a, N>
where
    N: BkNode,
    N::Key: Eq + Hash,
{
}
