use crate::metric::Metric;
use crate::Dist;

/// Edit distance: single-character insertions, deletions and substitutions.
#[derive(Default, Clone, Copy, Debug)]
pub struct LevenshteinMetric;

impl<S> Metric<S> for LevenshteinMetric
where
    S: AsRef<str> + ?Sized,
{
    #[inline]
    fn distance(&self, k1: &S, k2: &S) -> Dist {
        strsim::levenshtein(k1.as_ref(), k2.as_ref())
    }
}

infallible_try_metric!(impl<S> for LevenshteinMetric, key S, where S: AsRef<str> + ?Sized);
