//! Property tests for value smoothing and range mapping.
//!
//! Uses proptest to verify:
//! 1. Convergence: easing always settles, even across extreme magnitudes
//! 2. Monotonicity: every step gets closer to the target and never overshoots
//! 3. Retargeting continues from the current value without a jump
//! 4. Range round trip: denormalize(normalize(v)) returns the clamped value

use proptest::prelude::*;
use xilem_param_control::{ParamRange, SmoothedValue};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1000.0..1000.0_f64,
        -1e12..1e12_f64,
        -1e300..1e300_f64,
        Just(f64::MAX),
        Just(f64::MIN),
    ]
}

fn arb_speed() -> impl Strategy<Value = f64> {
    0.05..0.9_f64
}

// ── 1. Convergence ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn easing_converges(initial in arb_value(), target in arb_value(), speed in arb_speed()) {
        let mut v = SmoothedValue::new(initial).with_speed(speed);
        let mut more = v.set_target(target);
        let mut frames = 0;
        while more {
            more = v.step();
            frames += 1;
            prop_assert!(frames < 100_000, "did not settle");
        }
        prop_assert!(v.get().is_finite());
        prop_assert!(v.is_settled());
    }
}

// ── 2. Monotonicity ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn each_step_gets_closer(initial in arb_value(), target in arb_value(), speed in arb_speed()) {
        prop_assume!(initial != target);
        let mut v = SmoothedValue::new(initial).with_speed(speed);
        // compare positions, since the difference of extreme values overflows
        let below = initial < target;
        let mut previous = initial;
        let mut more = v.set_target(target);
        for _ in 0..200 {
            let now = v.get();
            prop_assert!(now.is_finite());
            if below {
                prop_assert!(previous <= now && now <= target);
            } else {
                prop_assert!(target <= now && now <= previous);
            }
            previous = now;
            if !more {
                break;
            }
            more = v.step();
        }
    }
}

// ── 3. Retargeting ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn retarget_steps_from_current(
        initial in arb_value(),
        first in arb_value(),
        second in arb_value(),
        speed in arb_speed(),
    ) {
        let mut v = SmoothedValue::new(initial).with_speed(speed);
        v.set_target(first);
        v.step();
        let before = v.get();
        v.set_target(second);
        let speed = v.speed();
        let expected = before * (1.0 - speed) + second * speed;
        let expected = expected.clamp(before.min(second), before.max(second));
        let scale = 1.0 + before.abs().max(second.abs());
        prop_assert!((v.get() - expected).abs() <= 1e-9 * scale);
    }
}

// ── 4. Range round trip ──────────────────────────────────────────────

proptest! {
    #[test]
    fn linear_round_trip(
        start in -100.0..0.0_f64,
        span in 1.0..200.0_f64,
        value in -500.0..500.0_f64,
    ) {
        let range = ParamRange::linear(start, start + span).unwrap();
        let back = range.denormalize(range.normalize(value));
        prop_assert!((back - range.clamp(value)).abs() <= 1e-9 * (1.0 + back.abs()));
    }

    #[test]
    fn exponential_normalize_in_unit_interval(
        start in 0.1..100.0_f64,
        ratio in 2.0..1000.0_f64,
        value in 0.0..200_000.0_f64,
    ) {
        let range = ParamRange::exponential(start, start * ratio).unwrap();
        let n = range.normalize(value);
        prop_assert!((0.0..=1.0).contains(&n));
    }
}
