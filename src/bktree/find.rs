use crate::bknode::BkNode;
use crate::metric::TryMetric;
use crate::Dist;

/// Range query over a BK tree: every key within `tolerance` of the needle.
///
/// Candidates come off a stack. Each popped node is measured against the
/// needle once, and of its children only those whose edge distance lies
/// within `tolerance` of that measurement are pushed; by the triangle
/// inequality no other subtree can hold a match.
///
/// A metric error is yielded once, after which the iterator is exhausted.
pub struct BkFind<'a, N: BkNode, M> {
    metric: &'a M,
    needle: &'a N::Key,
    tolerance: Dist,
    stack: Vec<&'a N>,
}

impl<'a, N, M> BkFind<'a, N, M>
where
    N: BkNode,
{
    pub(crate) fn new(
        metric: &'a M,
        max_depth: usize,
        root: Option<&'a N>,
        tolerance: Dist,
        needle: &'a N::Key,
    ) -> Self {
        let mut stack: Vec<&'a N> = Vec::with_capacity(max_depth + 1);
        stack.extend(root);
        BkFind {
            metric,
            needle,
            tolerance,
            stack,
        }
    }
}

impl<'a, N, M> Iterator for BkFind<'a, N, M>
where
    N: BkNode,
    M: TryMetric<N::Key>,
{
    type Item = Result<(Dist, &'a N::Key), M::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(candidate) = self.stack.pop() {
            let dist = match self.metric.try_distance(self.needle, candidate.key()) {
                Ok(dist) => dist,
                Err(err) => {
                    self.stack.clear();
                    return Some(Err(err));
                }
            };

            // Enqueue the children.
            let min = dist.saturating_sub(self.tolerance);
            let max = dist.saturating_add(self.tolerance);
            for (child_dist, child) in candidate.children_iter() {
                if min <= child_dist && child_dist <= max {
                    self.stack.push(child);
                }
            }

            // And maybe yield this node.
            if dist <= self.tolerance {
                return Some(Ok((dist, candidate.key())));
            }
        }
        None
    }
}
