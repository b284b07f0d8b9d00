use crate::metric::Metric;
use crate::Dist;

/// Difference in byte length.
///
/// Only a pseudo-metric: distinct strings of equal length are at distance 0,
/// so they pile up as a chain of distance-0 children in a tree.
#[derive(Default, Clone, Copy, Debug)]
pub struct StrLenMetric;

impl<S> Metric<S> for StrLenMetric
where
    S: AsRef<str> + ?Sized,
{
    fn distance(&self, k1: &S, k2: &S) -> Dist {
        k1.as_ref().len().abs_diff(k2.as_ref().len())
    }
}

infallible_try_metric!(impl<S> for StrLenMetric, key S, where S: AsRef<str> + ?Sized);
