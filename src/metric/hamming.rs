use std::marker::PhantomData;
use std::ops::BitXor;

use crate::metric::Metric;
use crate::Dist;

pub trait CountOnes {
    fn count_ones(self) -> u32;
}

macro_rules! count_ones_for {
    ($($int:ty),*) => {
        $(
            impl CountOnes for $int {
                #[inline]
                fn count_ones(self) -> u32 {
                    <$int>::count_ones(self)
                }
            }
        )*
    };
}

count_ones_for!(u8, u16, u32, u64, u128);

/// Number of differing bits between two fixed-width integers.
#[derive(Default, Clone, Copy, Derivative)]
#[derivative(Debug)]
pub struct HammingMetric<I>(#[derivative(Debug = "ignore")] PhantomData<I>);

impl<I> Metric<I> for HammingMetric<I>
where
    I: Copy + BitXor<I>,
    <I as BitXor<I>>::Output: CountOnes,
{
    #[inline]
    fn distance(&self, k1: &I, k2: &I) -> Dist {
        (*k1 ^ *k2).count_ones() as Dist
    }
}

infallible_try_metric!(
    impl<I> for HammingMetric<I>, key I,
    where I: Copy + BitXor<I>, <I as BitXor<I>>::Output: CountOnes,
);
