//! Millisecond tick arithmetic
//!
//! The runtime never reads a clock. The host advances a wrapping `u32`
//! millisecond counter through [`crate::Ui::tick_inc`], and everything
//! time-based works on differences between counter readings.

/// Wraparound-safe elapsed time between two readings of a wrapping
/// millisecond counter.
///
/// Exact for any true elapsed time below half the counter range
/// (2^31 ms, a bit under 25 days). Past that the fixed-width
/// representation is inherently ambiguous and the result is off by a
/// multiple of the range.
#[inline]
pub const fn tick_elapsed(earlier: u32, later: u32) -> u32 {
    // Two's-complement wrapping subtraction already yields the elapsed
    // value across a counter overflow; no sign test needed.
    later.wrapping_sub(earlier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identity() {
        for a in [0, 1, 1000, 0x8000_0000, u32::MAX] {
            assert_eq!(tick_elapsed(a, a), 0);
        }
    }

    #[test]
    fn test_plain_interval() {
        assert_eq!(tick_elapsed(1000, 1500), 500);
    }

    #[test]
    fn test_wraparound_interval() {
        // Reading taken 6 ms before overflow, next one 10 ms after it.
        assert_eq!(tick_elapsed(4_294_967_290, 10), 16);
    }

    #[test]
    fn test_wraparound_at_max() {
        assert_eq!(tick_elapsed(u32::MAX, 0), 1);
    }

    proptest! {
        #[test]
        fn prop_exact_below_half_range(start: u32, delta in 0u32..0x8000_0000) {
            prop_assert_eq!(tick_elapsed(start, start.wrapping_add(delta)), delta);
        }
    }
}
