/***
 * let mut tree = BkTree::new(LevenshteinMetric);
 * tree.add("key1");
 * tree.find(&"kye1", 2);
*/

use std::cmp::max;
use std::convert::Infallible;
use std::hash::Hash;
use std::iter::FromIterator;

use tracing::{debug, trace};

use crate::bk::BkInRam;
use crate::bknode::{BkNode, BkNodeMut, ChildEntry};
use crate::metric::{infallible, TryMetric};
use crate::Dist;

pub mod by_distance;
pub mod find;
pub mod preorder;

use by_distance::BkByDistance;
use find::BkFind;
use preorder::{Edges, Values};

/// A BK tree over keys of type `K`, indexed by the metric `M`.
///
/// Each node's children are keyed by their exact distance from it, which is
/// what lets [`find`](BkTree::find) skip whole subtrees. Keys are never
/// removed, and keys equal under the metric are all kept.
#[derive(Derivative)]
#[derivative(Debug(bound = "K: std::fmt::Debug"))]
pub struct BkTree<K, M> {
    root: Option<BkInRam<K>>,
    node_count: usize,
    max_depth: usize,
    #[derivative(Debug = "ignore")]
    metric: M,
}

impl<K, M> BkTree<K, M> {
    pub fn new(metric: M) -> Self {
        BkTree {
            root: None,
            node_count: 0,
            max_depth: 0,
            metric,
        }
    }

    pub fn len(&self) -> usize {
        self.node_count
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Depth of the deepest node; the root is at depth 0.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn root(&self) -> Option<&BkInRam<K>> {
        self.root.as_ref()
    }

    /// Every key, parents before children.
    pub fn values(&self) -> Values<'_, BkInRam<K>> {
        Values::new(self.root.as_ref())
    }

    /// Every parent to child link with its distance label.
    pub fn edges(&self) -> Edges<'_, BkInRam<K>> {
        Edges::new(self.root.as_ref())
    }

    /// For every edge labelled `distance`, the parent's key together with all
    /// keys in the child's subtree.
    pub fn find_by_distance(&self, distance: Dist) -> BkByDistance<'_, BkInRam<K>>
    where
        K: Eq + Hash,
    {
        BkByDistance::new(self.root.as_ref(), distance)
    }
}

impl<K, M> BkTree<K, M>
where
    M: TryMetric<K>,
{
    /// Add a key to the tree.
    ///
    /// Walks down from the root, following the child at the key's distance
    /// from each node, and hangs the key off the first node with no child at
    /// that distance. A metric error aborts the walk and leaves the tree as it
    /// was.
    pub fn try_add(&mut self, key: K) -> Result<(), M::Error> {
        let mut cur = match self.root.as_mut() {
            Some(root) => root,
            None => {
                trace!("planting root");
                self.root = Some(BkInRam::new(key));
                self.node_count = 1;
                return Ok(());
            }
        };

        let mut depth: usize = 1;
        loop {
            let dist = self.metric.try_distance(&key, cur.key())?;
            match cur.child_entry(dist) {
                ChildEntry::Occupied(child) => {
                    cur = child;
                    depth += 1;
                }
                ChildEntry::Vacant(parent) => {
                    parent.set_child_node(dist, BkInRam::new(key));
                    trace!(depth, dist, "inserted key");
                    break;
                }
            }
        }

        self.node_count += 1;
        self.max_depth = max(self.max_depth, depth);
        Ok(())
    }

    /// Add each key in order. Keys added before a failing one stay in the tree.
    pub fn try_update<I>(&mut self, keys: I) -> Result<(), M::Error>
    where
        I: IntoIterator<Item = K>,
    {
        let before = self.node_count;
        for key in keys {
            self.try_add(key)?;
        }
        debug!(
            added = self.node_count - before,
            nodes = self.node_count,
            max_depth = self.max_depth,
            "updated tree"
        );
        Ok(())
    }

    /// Lazily find every key within `tolerance` of `needle`, paired with its
    /// distance. Order is unspecified.
    pub fn try_find<'a>(&'a self, needle: &'a K, tolerance: Dist) -> BkFind<'a, BkInRam<K>, M> {
        BkFind::new(
            &self.metric,
            self.max_depth,
            self.root.as_ref(),
            tolerance,
            needle,
        )
    }
}

impl<K, M> BkTree<K, M>
where
    M: TryMetric<K, Error = Infallible>,
{
    pub fn add(&mut self, key: K) {
        infallible(self.try_add(key))
    }

    pub fn update<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
    {
        infallible(self.try_update(keys))
    }

    pub fn find<'a>(
        &'a self,
        needle: &'a K,
        tolerance: Dist,
    ) -> impl Iterator<Item = (Dist, &'a K)> + 'a {
        self.try_find(needle, tolerance).map(infallible)
    }
}

impl<K, M: Default> Default for BkTree<K, M> {
    fn default() -> Self {
        BkTree::new(M::default())
    }
}

impl<K, M: TryMetric<K, Error = Infallible>> Extend<K> for BkTree<K, M> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        self.update(keys)
    }
}

impl<K, M: TryMetric<K, Error = Infallible> + Default> FromIterator<K> for BkTree<K, M> {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut tree = BkTree::default();
        tree.update(keys);
        tree
    }
}

impl<'a, K, M> IntoIterator for &'a BkTree<K, M> {
    type Item = &'a K;
    type IntoIter = Values<'a, BkInRam<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}
