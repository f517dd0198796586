// Arg-min over the small sibling groups of the open set heap.
//
// Siblings are compared as a balanced tournament (pairs, then winners of
// pairs, ...) rather than a left-to-right fold, which keeps the comparison
// chain shallow. The left side wins ties, so among equal elements the lowest
// index is returned.

/// Core comparison and index selection
#[inline(always)]
#[must_use]
fn fight<T: Ord>(a: &[T], l: usize, r: usize) -> usize {
    if a[l] <= a[r] { l } else { r }
}

/// Index of the minimum element of `a[lo..hi]`, as a tournament.
#[inline(always)]
#[must_use]
fn tournament<T: Ord>(a: &[T], lo: usize, hi: usize) -> usize {
    debug_assert!(lo < hi);
    match hi - lo {
        1 => lo,
        2 => fight(a, lo, lo + 1),
        n => {
            // Left bracket is the larger power-of-two half.
            let mid = lo + (n.next_power_of_two() >> 1);
            fight(a, tournament(a, lo, mid), tournament(a, mid, hi))
        }
    }
}

/// Index of the minimum element of a non-empty slice.
///
/// ```
/// use waysearch::derank::derank;
/// assert_eq!(derank(&[3u8, 1, 2]), 1);
/// assert_eq!(derank(&[2u8, 0, 5, 0]), 1);
/// ```
#[inline(always)]
#[must_use]
pub fn derank<T: Ord>(a: &[T]) -> usize {
    debug_assert!(!a.is_empty(), "derank needs at least one contender");
    tournament(a, 0, a.len())
}
