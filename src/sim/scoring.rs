//! Combo progression and hit scoring

/// Combo count after a hit at `now_ms`
///
/// The combo grows when the hit lands within `window_ms` of the previous one
/// and drops back to zero otherwise. The first hit of a round has no previous
/// hit and always starts at zero.
pub fn next_combo(combo: u32, last_hit_ms: Option<f64>, now_ms: f64, window_ms: f64) -> u32 {
    match last_hit_ms {
        Some(last) if now_ms - last <= window_ms => combo.saturating_add(1),
        _ => 0,
    }
}

/// Score multiplier for a combo, saturating at `1 + cap`
#[inline]
pub fn multiplier(combo: u32, cap: u32) -> u64 {
    1 + u64::from(combo.min(cap))
}

/// Points awarded for a hit: `base * (1 + min(combo, cap))`
#[inline]
pub fn award_points(base: u64, combo: u32, cap: u32) -> u64 {
    base.saturating_mul(multiplier(combo, cap))
}

/// Callout text for a hit ("+10", "+30 x3")
pub fn callout_text(points: u64, combo: u32, cap: u32) -> String {
    let mult = multiplier(combo, cap);
    if mult > 1 {
        format!("+{} x{}", points, mult)
    } else {
        format!("+{}", points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_hit_starts_at_zero() {
        assert_eq!(next_combo(0, None, 0.0, 800.0), 0);
        assert_eq!(next_combo(4, None, 12_000.0, 800.0), 0);
    }

    #[test]
    fn test_combo_window_is_inclusive() {
        assert_eq!(next_combo(2, Some(1000.0), 1800.0, 800.0), 3);
        assert_eq!(next_combo(2, Some(1000.0), 1800.5, 800.0), 0);
    }

    #[test]
    fn test_hit_sequence_scores_70() {
        let (base, cap, window) = (10, 5, 800.0);
        let mut combo = 0;
        let mut last = None;
        let mut score = 0;
        let mut combos = Vec::new();
        let mut points = Vec::new();

        for t in [0.0, 200.0, 500.0, 1700.0] {
            combo = next_combo(combo, last, t, window);
            last = Some(t);
            let p = award_points(base, combo, cap);
            combos.push(combo);
            points.push(p);
            score += p;
        }

        assert_eq!(combos, vec![0, 1, 2, 0]);
        assert_eq!(points, vec![10, 20, 30, 10]);
        assert_eq!(score, 70);
    }

    #[test]
    fn test_multiplier_saturates_at_cap() {
        assert_eq!(award_points(10, 5, 5), 60);
        assert_eq!(award_points(10, 50, 5), 60);
        assert_eq!(award_points(10, u32::MAX, 5), 60);
    }

    #[test]
    fn test_callout_text() {
        assert_eq!(callout_text(10, 0, 5), "+10");
        assert_eq!(callout_text(30, 2, 5), "+30 x3");
        assert_eq!(callout_text(60, 9, 5), "+60 x6");
    }

    proptest! {
        #[test]
        fn prop_points_formula(base in 0u64..10_000, combo in 0u32..1_000, cap in 0u32..50) {
            let points = award_points(base, combo, cap);
            prop_assert_eq!(points, base * (1 + u64::from(combo.min(cap))));
            prop_assert!(points <= base * (1 + u64::from(cap)));
        }

        #[test]
        fn prop_late_hit_resets_combo(combo in 0u32..100, last in 0.0f64..1e6, gap in 800.001f64..1e5) {
            prop_assert_eq!(next_combo(combo, Some(last), last + gap, 800.0), 0);
        }
    }
}
