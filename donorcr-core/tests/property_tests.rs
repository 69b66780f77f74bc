//! Property tests for predictor invariants.
//!
//! Uses proptest to verify:
//! 1. Valid inputs always produce a finite prediction
//! 2. Determinism — identical inputs give bit-identical output
//! 3. Invalid inputs are always rejected, never turned into NaN/∞
//! 4. Creatinine sanity — raising creatinine does not lower most sub-models

use donorcr_core::{predict, predict_breakdown, InvalidInputError, PredictionInput, Sex};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_weight() -> impl Strategy<Value = f64> {
    0.1..300.0_f64
}

fn arb_creatinine() -> impl Strategy<Value = f64> {
    0.0..15.0_f64
}

fn arb_volume() -> impl Strategy<Value = f64> {
    0.0..600.0_f64
}

fn arb_sex() -> impl Strategy<Value = Sex> {
    prop_oneof![Just(Sex::Male), Just(Sex::Female)]
}

fn arb_input() -> impl Strategy<Value = PredictionInput> {
    (arb_weight(), arb_creatinine(), arb_volume(), arb_sex())
        .prop_map(|(bw, cre, vol, sex)| PredictionInput::new(bw, cre, vol, sex))
}

fn arb_bad_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        (-1_000.0..-1e-9_f64),
    ]
}

// ── 1. Finite output ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn valid_input_gives_finite_prediction(input in arb_input()) {
        let result = predict(&input).unwrap();
        prop_assert!(result.predicted_creatinine_mg_dl.is_finite());
    }

    #[test]
    fn every_sub_model_is_finite(input in arb_input()) {
        let b = predict_breakdown(&input).unwrap();
        prop_assert!(b.values.iter().all(|v| v.is_finite()));
    }
}

// ── 2. Determinism ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn identical_inputs_bit_identical_output(input in arb_input()) {
        let a = predict(&input).unwrap().predicted_creatinine_mg_dl;
        let b = predict(&input).unwrap().predicted_creatinine_mg_dl;
        prop_assert_eq!(a.to_bits(), b.to_bits());
    }
}

// ── 3. Rejection ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn bad_weight_rejected(bad in arb_bad_number(), cre in arb_creatinine(), vol in arb_volume()) {
        let input = PredictionInput::new(bad, cre, vol, Sex::Male);
        prop_assert!(predict(&input).is_err());
    }

    #[test]
    fn bad_creatinine_rejected(bad in arb_bad_number(), bw in arb_weight(), vol in arb_volume()) {
        let input = PredictionInput::new(bw, bad, vol, Sex::Female);
        prop_assert!(predict(&input).is_err());
    }

    #[test]
    fn bad_volume_rejected(bad in arb_bad_number(), bw in arb_weight(), cre in arb_creatinine()) {
        let input = PredictionInput::new(bw, cre, bad, Sex::Male);
        prop_assert!(predict(&input).is_err());
    }

    #[test]
    fn zero_weight_always_rejected(cre in arb_creatinine(), vol in arb_volume(), sex in arb_sex()) {
        let input = PredictionInput::new(0.0, cre, vol, sex);
        prop_assert!(
            matches!(predict(&input), Err(InvalidInputError::Zero { .. })),
            "zero weight must be rejected"
        );
    }
}

// ── 4. Creatinine sanity ─────────────────────────────────────────────

proptest! {
    #[test]
    fn raising_creatinine_does_not_lower_most_sub_models(
        input in arb_input(),
        delta in 0.01..2.0_f64,
    ) {
        let mut higher = input;
        higher.creatinine_mg_dl += delta;
        let before = predict_breakdown(&input).unwrap();
        let after = predict_breakdown(&higher).unwrap();
        let not_lower = before
            .values
            .iter()
            .zip(after.values.iter())
            .filter(|(b, a)| a >= b)
            .count();
        prop_assert!(not_lower > 4, "only {} of 9 sub-models did not decrease", not_lower);
    }
}
