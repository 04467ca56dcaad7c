use descstats::{StatsError, stats};
use proptest::prelude::*;

fn sample(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6, min_len..64)
}

fn rel_tol(scale: f64) -> f64 {
    1e-9 * scale.abs().max(1.0)
}

proptest! {
    #[test]
    fn mean_is_sum_over_len(vals in sample(1)) {
        let exp_mean = vals.iter().sum::<f64>() / vals.len() as f64;
        prop_assert_eq!(stats::mean(&vals).unwrap(), exp_mean);
    }

    #[test]
    fn mean_lies_within_range(vals in sample(1)) {
        let mean = stats::mean(&vals).unwrap();
        let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
        let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(mean >= min - rel_tol(min) && mean <= max + rel_tol(max));
    }

    #[test]
    fn median_ignores_order(
        (vals, shuffled) in sample(1).prop_flat_map(|vals| {
            (Just(vals.clone()), Just(vals).prop_shuffle())
        })
    ) {
        prop_assert_eq!(stats::median(&vals).unwrap(), stats::median(&shuffled).unwrap());
    }

    #[test]
    fn sorting_stats_leave_input_untouched(vals in sample(1), n_trim in 0usize..4) {
        let copy = vals.clone();
        let _ = stats::median(&vals);
        let _ = stats::trimmed_mean(&vals, n_trim);
        let _ = stats::weighted_median_zip(&vals, &copy);
        prop_assert_eq!(vals, copy);
    }

    #[test]
    fn equal_weights_give_plain_mean(vals in sample(1), weight in 0.1..100.0) {
        let weights = vec![weight; vals.len()];
        let mean = stats::mean(&vals).unwrap();
        let weighted_mean = stats::weighted_mean_zip(&vals, &weights).unwrap();
        prop_assert!((weighted_mean - mean).abs() <= rel_tol(1.0e6));
    }

    #[test]
    fn self_correlation_is_one(vals in sample(2)) {
        prop_assume!(stats::variance(&vals).unwrap() > 1e-6);
        let corr = stats::pearson_corr(&vals, &vals).unwrap();
        prop_assert!((corr - 1.0).abs() < 1e-9);
    }

    #[test]
    fn std_dev_is_root_of_variance(vals in sample(2)) {
        let variance = stats::variance(&vals).unwrap();
        let std_dev = stats::std_dev(&vals).unwrap();
        prop_assert!(variance >= 0.0);
        prop_assert_eq!(std_dev, variance.sqrt());
        prop_assert_eq!(
            stats::std_error(&vals).unwrap(),
            std_dev / (vals.len() as f64).sqrt()
        );
    }

    #[test]
    fn mismatched_lengths_are_rejected(vals in sample(1), extra in 1usize..4) {
        let longer: Vec<f64> = vals.iter().copied().chain(vec![1.0; extra]).collect();
        let exp_err = StatsError::LengthMismatch { len_a: vals.len(), len_b: longer.len() };
        prop_assert_eq!(stats::weighted_mean_zip(&vals, &longer), Err(exp_err.clone()));
        prop_assert_eq!(stats::weighted_median_zip(&vals, &longer), Err(exp_err.clone()));
        prop_assert_eq!(stats::pearson_corr(&vals, &longer), Err(exp_err));
    }
}

#[test]
fn short_samples_have_no_variance() {
    for vals in [&[][..], &[2.5][..]] {
        let exp_err = StatsError::InsufficientSamples {
            n_vals: vals.len(),
        };
        assert_eq!(stats::variance(vals), Err(exp_err.clone()));
        assert_eq!(stats::std_dev(vals), Err(exp_err));
    }
}
