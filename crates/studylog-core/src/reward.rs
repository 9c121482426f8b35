//! Reward (virtual currency) computation.

/// Coins granted for a session of `duration_min` minutes.
///
/// One coin per ten full minutes, with a floor of one coin so that even
/// the shortest completed session pays out.
pub fn reward_for_minutes(duration_min: u32) -> u32 {
    (duration_min / 10).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn short_sessions_pay_one_coin() {
        for m in 0..=9 {
            assert_eq!(reward_for_minutes(m), 1);
        }
    }

    #[test]
    fn known_durations() {
        assert_eq!(reward_for_minutes(25), 2);
        assert_eq!(reward_for_minutes(100), 10);
    }

    proptest! {
        #[test]
        fn reward_is_max_of_one_and_tenth(d in 1u32..=10_000) {
            prop_assert_eq!(reward_for_minutes(d), std::cmp::max(1, d / 10));
        }

        #[test]
        fn reward_is_monotone(d in 1u32..=10_000) {
            prop_assert!(reward_for_minutes(d + 1) >= reward_for_minutes(d));
        }
    }
}
