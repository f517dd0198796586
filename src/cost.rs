use std::fmt::Debug;
use std::fmt::Display;

use num_traits::SaturatingAdd;
use num_traits::Zero;
use num_traits::bounds::UpperBounded;

/// The scalar used for real costs, heuristics and total costs.
///
/// The upper bound doubles as the "infeasible" sentinel: an edge costing
/// `Cost::infeasible()` can't be traversed, and anything added to it stays
/// infeasible thanks to saturation.
pub trait Cost:
    Copy
    + Debug
    + Display
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + SaturatingAdd
    + UpperBounded
    + Zero
{
    #[inline(always)]
    fn infeasible() -> Self {
        Self::max_value()
    }

    #[inline(always)]
    fn valid(&self) -> bool {
        *self != Self::max_value()
    }
}

macro_rules! unsigned_cost {
    ($($t:ty),*) => {
        $(impl Cost for $t {})*
    };
}

unsigned_cost!(u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infeasible_saturates() {
        let c = u32::infeasible();
        assert!(!c.valid());
        assert!(!SaturatingAdd::saturating_add(&c, &7u32).valid());
        assert!(7u32.valid());
        assert!(u32::zero().valid());
    }
}
