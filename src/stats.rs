//! Descriptive statistics over numeric samples.
//!
//! Every function is pure: inputs are borrowed, never reordered, and any
//! sorting happens on an owned copy. Preconditions (non-empty input, enough
//! samples, non-zero divisors, aligned lengths) are reported as [`StatsError`].

use crate::error::{Result, StatsError};

/// Value paired with its weight.
///
/// Weights are not validated: a zero weight removes the value from weighted
/// sums, and negative weights are used as given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedVal {
    pub val: f64,
    pub weight: f64,
}

impl WeightedVal {
    pub fn new(val: f64, weight: f64) -> Self {
        Self { val, weight }
    }
}

impl From<(f64, f64)> for WeightedVal {
    fn from((val, weight): (f64, f64)) -> Self {
        Self { val, weight }
    }
}

/// Compute the arithmetic mean.
pub fn mean(vals: &[f64]) -> Result<f64> {
    if vals.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    Ok(vals.iter().sum::<f64>() / vals.len() as f64)
}

/// Compute the mean after sorting and removing `n_trim` extreme values.
///
/// For an odd `n_trim` the lower end loses one value more than the upper end,
/// e.g. trimming 3 values drops the two smallest and the largest.
///
/// # Errors
/// Returns [`StatsError::EmptyInput`] if no values remain after trimming.
pub fn trimmed_mean(vals: &[f64], n_trim: usize) -> Result<f64> {
    let sorted_vals = sorted(vals);
    mean(trim(&sorted_vals, n_trim))
}

/// Compute the median.
///
/// For an even number of values this is the average of the two middle ones.
pub fn median(vals: &[f64]) -> Result<f64> {
    if vals.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let sorted_vals = sorted(vals);
    let n_vals = sorted_vals.len();
    let i_mid = n_vals / 2;
    if n_vals % 2 == 1 {
        Ok(sorted_vals[i_mid])
    } else {
        Ok((sorted_vals[i_mid - 1] + sorted_vals[i_mid]) / 2.0)
    }
}

/// Compute the weighted mean `Σ(val·weight) / Σweight`.
///
/// # Errors
/// Returns [`StatsError::EmptyInput`] if there are no pairs and
/// [`StatsError::ZeroDivisor`] if the weights sum to zero.
pub fn weighted_mean(pairs: &[WeightedVal]) -> Result<f64> {
    if pairs.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let weight_sum: f64 = pairs.iter().map(|pair| pair.weight).sum();
    if weight_sum == 0.0 {
        return Err(StatsError::ZeroDivisor {
            quantity: "total weight",
        });
    }
    let weighted_sum: f64 = pairs
        .iter()
        .map(|pair| weighted_val(pair.val, pair.weight))
        .sum();
    Ok(weighted_sum / weight_sum)
}

/// Compute the weighted mean of two aligned sequences of values and weights.
pub fn weighted_mean_zip(vals: &[f64], weights: &[f64]) -> Result<f64> {
    weighted_mean(&zip_pairs(vals, weights)?)
}

/// Compute the median of the `val·weight` products.
///
/// Note that this is *not* a weight-aware positional median: weights scale
/// the values before the ordinary median is taken, so `[1, 2, 3]` weighted by
/// `[3, 1, 1]` gives the median of `[3, 2, 3]`, which is `3`.
pub fn weighted_median(pairs: &[WeightedVal]) -> Result<f64> {
    let products: Vec<_> = pairs
        .iter()
        .map(|pair| weighted_val(pair.val, pair.weight))
        .collect();
    median(&products)
}

/// Compute [`weighted_median`] of two aligned sequences of values and weights.
pub fn weighted_median_zip(vals: &[f64], weights: &[f64]) -> Result<f64> {
    weighted_median(&zip_pairs(vals, weights)?)
}

/// Compute the mean absolute deviation from the mean.
pub fn mean_abs_dev(vals: &[f64]) -> Result<f64> {
    let mean_val = mean(vals)?;
    let abs_devs: Vec<_> = vals
        .iter()
        .map(|&val| abs_deviation(val, mean_val))
        .collect();
    mean(&abs_devs)
}

/// Compute the sample variance (with Bessel's correction).
///
/// # Errors
/// Returns [`StatsError::InsufficientSamples`] for fewer than 2 values.
pub fn variance(vals: &[f64]) -> Result<f64> {
    let n_vals = vals.len();
    if n_vals < 2 {
        return Err(StatsError::InsufficientSamples { n_vals });
    }
    let mean_val = mean(vals)?;
    let diff_2_sum: f64 = vals
        .iter()
        .map(|&val| square_deviation(val, mean_val))
        .sum();
    Ok(diff_2_sum / (n_vals - 1) as f64)
}

/// Compute the sample standard deviation.
pub fn std_dev(vals: &[f64]) -> Result<f64> {
    Ok(variance(vals)?.sqrt())
}

/// Compute the standard error of the mean, `std_dev / sqrt(n)`.
pub fn std_error(vals: &[f64]) -> Result<f64> {
    Ok(std_dev(vals)? / (vals.len() as f64).sqrt())
}

/// Compute the Pearson correlation coefficient of two aligned sequences.
///
/// Values are paired by position.
///
/// # Errors
/// Returns [`StatsError::LengthMismatch`] if the lengths differ,
/// [`StatsError::EmptyInput`] if the sequences are empty and
/// [`StatsError::ZeroDivisor`] if either sequence is constant.
pub fn pearson_corr(vals_a: &[f64], vals_b: &[f64]) -> Result<f64> {
    check_lens(vals_a.len(), vals_b.len())?;

    let mean_a = mean(vals_a)?;
    let mean_b = mean(vals_b)?;
    let diff_a: Vec<_> = vals_a.iter().map(|&val| deviation(val, mean_a)).collect();
    let diff_b: Vec<_> = vals_b.iter().map(|&val| deviation(val, mean_b)).collect();

    let numerator: f64 = diff_a.iter().zip(&diff_b).map(|(da, db)| da * db).sum();

    let norm_a = diff_a.iter().map(|da| da.powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 {
        return Err(StatsError::ZeroDivisor {
            quantity: "deviation of the first sequence",
        });
    }
    let norm_b = diff_b.iter().map(|db| db.powi(2)).sum::<f64>().sqrt();
    if norm_b == 0.0 {
        return Err(StatsError::ZeroDivisor {
            quantity: "deviation of the second sequence",
        });
    }

    Ok(numerator / (norm_a * norm_b))
}

fn sorted(vals: &[f64]) -> Vec<f64> {
    let mut sorted_vals = vals.to_vec();
    sorted_vals.sort_by(f64::total_cmp);
    sorted_vals
}

/// Drop `n_trim` values from the ends of a sorted slice.
fn trim(sorted_vals: &[f64], n_trim: usize) -> &[f64] {
    // The front absorbs the extra value of an odd count.
    let n_back = n_trim / 2;
    let n_front = if n_trim % 2 == 0 { n_back } else { n_back + 1 };

    let rest = &sorted_vals[n_front.min(sorted_vals.len())..];
    &rest[..rest.len().saturating_sub(n_back)]
}

fn zip_pairs(vals: &[f64], weights: &[f64]) -> Result<Vec<WeightedVal>> {
    check_lens(vals.len(), weights.len())?;
    Ok(vals
        .iter()
        .zip(weights)
        .map(|(&val, &weight)| WeightedVal::new(val, weight))
        .collect())
}

fn check_lens(len_a: usize, len_b: usize) -> Result<()> {
    if len_a != len_b {
        return Err(StatsError::LengthMismatch { len_a, len_b });
    }
    Ok(())
}

fn weighted_val(val: f64, weight: f64) -> f64 {
    val * weight
}

fn deviation(val: f64, reference: f64) -> f64 {
    val - reference
}

fn abs_deviation(val: f64, reference: f64) -> f64 {
    deviation(val, reference).abs()
}

fn square_deviation(val: f64, reference: f64) -> f64 {
    deviation(val, reference).powi(2)
}
