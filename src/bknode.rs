use crate::Dist;

/// Read-only view of a BK tree node: a key plus children keyed by their exact
/// distance from that key.
pub trait BkNode {
    type Key;

    fn key(&self) -> &Self::Key;
    fn has_child_at(&self, dist: Dist) -> bool;
    fn child_at(&self, dist: Dist) -> Option<&Self>;
    fn child_count(&self) -> usize;
    fn children_iter<'a>(&'a self) -> Box<dyn Iterator<Item = (Dist, &'a Self)> + 'a>;
}

/// The child slot at a given distance, as found by [`BkNodeMut::child_entry`].
pub enum ChildEntry<'a, N> {
    /// The child already at that distance.
    Occupied(&'a mut N),
    /// No child at that distance; carries the parent so one can be attached.
    Vacant(&'a mut N),
}

pub trait BkNodeMut: BkNode + Sized {
    fn child_entry(&mut self, dist: Dist) -> ChildEntry<'_, Self>;

    /// Attach `node` at `dist`, replacing any subtree already there.
    fn set_child_node(&mut self, dist: Dist, node: Self);
}
