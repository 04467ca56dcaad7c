use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Analysis configuration parameters.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Number of extreme values dropped before computing the trimmed mean.
    pub n_trim: usize,

    /// Pairs of sample names to correlate.
    #[serde(default)]
    pub pairs: Vec<[String; 2]>,
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    /// Ensure every correlated pair refers to one of the given sample names.
    pub fn check_pairs(&self, names: &[String]) -> Result<()> {
        for (i_pair, pair) in self.pairs.iter().enumerate() {
            for name in pair {
                if !names.contains(name) {
                    bail!("pair {i_pair} refers to unknown sample {name:?}");
                }
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        check_num(self.n_trim, 0..10_000).context("invalid number of trimmed values")?;

        for (i_pair, pair) in self.pairs.iter().enumerate() {
            if pair.iter().any(|name| name.is_empty()) {
                bail!("pair {i_pair} has an empty sample name");
            }
        }

        Ok(())
    }
}

/// Numeric sample with optional weights.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sample {
    /// Sample values.
    pub vals: Vec<f64>,

    /// Weights aligned with `vals`.
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
}

impl Sample {
    /// Load a [`Sample`] from a TOML file and validate it.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    fn from_toml(contents: &str) -> Result<Self> {
        let sample: Sample = toml::from_str(contents).context("failed to deserialize sample")?;

        sample.validate().context("failed to validate sample")?;

        Ok(sample)
    }

    fn validate(&self) -> Result<()> {
        check_vec(&self.vals, None).context("invalid values")?;
        if let Some(weights) = &self.weights {
            check_vec(weights, Some(self.vals.len())).context("invalid weights")?;
        }
        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

fn check_vec(vec: &[f64], exp_len: Option<usize>) -> Result<()> {
    let len = vec.len();
    if len == 0 {
        bail!("vector must not be empty");
    }
    if let Some(exp_len) = exp_len {
        if len != exp_len {
            bail!("vector length must be {exp_len}, but is {len}");
        }
    }
    // Missing data (NaN) and infinities are not supported.
    if let Some(idx) = vec.iter().position(|ele| !ele.is_finite()) {
        bail!("vector must have only finite elements, but element {idx} is {}", vec[idx]);
    }
    Ok(())
}
