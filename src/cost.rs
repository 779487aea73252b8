//! Scalar costs accumulated along routes.
//!
//! Depending on the query's cost mode a `Cost` is either meters or seconds.
//! Unreached nodes carry `Cost::infinity()`.

use derive_more::Display;
use num_traits::Zero;
use num_traits::bounds::UpperBounded;
use ordered_float::OrderedFloat;

#[derive(Copy, Clone, Default, Debug, Display, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
#[display("{_0}")]
pub struct Cost(OrderedFloat<f64>);

impl Cost {
    pub fn new(value: f64) -> Self {
        Self(OrderedFloat(value))
    }

    #[inline(always)]
    pub fn infinity() -> Self {
        Self(OrderedFloat(f64::INFINITY))
    }

    #[inline(always)]
    pub fn value(&self) -> f64 {
        self.0.0
    }

    #[inline(always)]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl std::ops::Add for Cost {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Cost {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Zero for Cost {
    #[inline(always)]
    fn zero() -> Self {
        Self(OrderedFloat(0.0))
    }
    #[inline(always)]
    fn is_zero(&self) -> bool {
        self.0 == OrderedFloat(0.0)
    }
}

impl UpperBounded for Cost {
    fn max_value() -> Self {
        Self::infinity()
    }
}
