//! Distance functions a [`BkTree`](crate::BkTree) can be built over.
//!
//! A metric must be non-negative, zero for equal keys, symmetric and obey the
//! triangle inequality. None of that is checked: a metric that breaks the
//! triangle inequality makes `find` silently miss matches.

use std::convert::Infallible;

use crate::Dist;

pub trait Metric<K: ?Sized> {
    fn distance(&self, k1: &K, k2: &K) -> Dist;
}

/// Any `Fn(&K, &K) -> Dist` closure or function is a metric.
impl<K: ?Sized, F> Metric<K> for F
where
    F: Fn(&K, &K) -> Dist,
{
    #[inline]
    fn distance(&self, k1: &K, k2: &K) -> Dist {
        self(k1, k2)
    }
}

/// A metric whose evaluation can fail.
///
/// Closures and the bundled metrics implement it with `Error = Infallible`;
/// wrap a closure returning `Result` in [`Fallible`] to get real errors.
/// Errors raised here are handed back to the caller of the tree operation
/// untouched.
pub trait TryMetric<K: ?Sized> {
    type Error;

    fn try_distance(&self, k1: &K, k2: &K) -> Result<Dist, Self::Error>;
}

impl<K: ?Sized, F> TryMetric<K> for F
where
    F: Fn(&K, &K) -> Dist,
{
    type Error = Infallible;

    #[inline]
    fn try_distance(&self, k1: &K, k2: &K) -> Result<Dist, Infallible> {
        Ok(self(k1, k2))
    }
}

/// Implements an infallible [`TryMetric`] for a type that already implements
/// [`Metric`] for the same keys.
macro_rules! infallible_try_metric {
    (impl<$($param:ident),*> for $metric:ty, key $key:ty, where $($bounds:tt)*) => {
        impl<$($param),*> $crate::metric::TryMetric<$key> for $metric
        where
            $($bounds)*
        {
            type Error = ::std::convert::Infallible;

            #[inline]
            fn try_distance(
                &self,
                k1: &$key,
                k2: &$key,
            ) -> Result<$crate::Dist, ::std::convert::Infallible> {
                Ok($crate::metric::Metric::distance(self, k1, k2))
            }
        }
    };
}

pub mod hamming;
pub mod levenshtein;
pub mod strlen;

/// Adapts a `Fn(&K, &K) -> Result<Dist, E>` into a [`TryMetric`].
#[derive(Clone, Copy, Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Fallible<F>(#[derivative(Debug = "ignore")] pub F);

impl<K: ?Sized, E, F> TryMetric<K> for Fallible<F>
where
    F: Fn(&K, &K) -> Result<Dist, E>,
{
    type Error = E;

    #[inline]
    fn try_distance(&self, k1: &K, k2: &K) -> Result<Dist, E> {
        (self.0)(k1, k2)
    }
}

pub(crate) fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abs_diff(a: &i32, b: &i32) -> Dist {
        (a - b).unsigned_abs() as Dist
    }

    #[test]
    fn functions_are_metrics() {
        assert_eq!(3, abs_diff.distance(&1, &4));
        assert_eq!(3, abs_diff.distance(&4, &1));
    }

    #[test]
    fn closures_are_metrics() {
        let metric = |a: &u8, b: &u8| (a ^ b).count_ones() as Dist;
        assert_eq!(2, metric.distance(&0b0110, &0));
    }

    #[test]
    fn metrics_never_fail() {
        assert_eq!(Ok(0), abs_diff.try_distance(&7, &7));
    }

    #[test]
    fn bundled_metrics_never_fail() {
        let hamming: hamming::HammingMetric<u8> = Default::default();
        assert_eq!(Ok(8), hamming.try_distance(&0, &0xff));
        assert_eq!(Ok(3), levenshtein::LevenshteinMetric.try_distance("kitten", "sitting"));
        assert_eq!(Ok(1), strlen::StrLenMetric.try_distance(&"foo", &"left"));
    }

    #[test]
    fn fallible_passes_errors_through() {
        let metric = Fallible(|a: &i32, b: &i32| -> Result<Dist, String> {
            if *a < 0 || *b < 0 {
                Err(format!("negative key in ({}, {})", a, b))
            } else {
                Ok((a - b).unsigned_abs() as Dist)
            }
        });
        assert_eq!(Ok(2), metric.try_distance(&5, &3));
        assert_eq!(
            Err("negative key in (-1, 3)".to_string()),
            metric.try_distance(&-1, &3)
        );
    }
}
