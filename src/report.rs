use crate::config::{Config, Sample};
use anyhow::{Context, Result, bail};
use descstats::stats;
use rmp_serde::{decode, encode};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// Statistics of a single sample.
///
/// A statistic is `None` when the sample does not meet its preconditions
/// (e.g. the variance of a single value).
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleReport {
    pub name: String,
    pub n_vals: usize,
    pub mean: Option<f64>,
    pub trimmed_mean: Option<f64>,
    pub median: Option<f64>,
    pub mean_abs_dev: Option<f64>,
    pub variance: Option<f64>,
    pub std_dev: Option<f64>,
    pub std_error: Option<f64>,
    pub weighted_mean: Option<f64>,
    pub weighted_median: Option<f64>,
}

impl SampleReport {
    pub fn new(name: &str, sample: &Sample, n_trim: usize) -> Self {
        let vals = &sample.vals;
        let obs = |stat, result| observe(name, stat, result);

        let (weighted_mean, weighted_median) = match &sample.weights {
            Some(weights) => (
                obs("weighted mean", stats::weighted_mean_zip(vals, weights)),
                obs("weighted median", stats::weighted_median_zip(vals, weights)),
            ),
            None => (None, None),
        };

        Self {
            name: name.to_string(),
            n_vals: vals.len(),
            mean: obs("mean", stats::mean(vals)),
            trimmed_mean: obs("trimmed mean", stats::trimmed_mean(vals, n_trim)),
            median: obs("median", stats::median(vals)),
            mean_abs_dev: obs("mean absolute deviation", stats::mean_abs_dev(vals)),
            variance: obs("variance", stats::variance(vals)),
            std_dev: obs("standard deviation", stats::std_dev(vals)),
            std_error: obs("standard error", stats::std_error(vals)),
            weighted_mean,
            weighted_median,
        }
    }
}

/// Pearson correlation of two samples.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub name_a: String,
    pub name_b: String,
    pub pearson: Option<f64>,
}

impl CorrelationReport {
    pub fn new(name_a: &str, sample_a: &Sample, name_b: &str, sample_b: &Sample) -> Self {
        let label = format!("{name_a} and {name_b}");
        Self {
            name_a: name_a.to_string(),
            name_b: name_b.to_string(),
            pearson: observe(
                &label,
                "pearson correlation",
                stats::pearson_corr(&sample_a.vals, &sample_b.vals),
            ),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Results {
    pub samples: Vec<SampleReport>,
    pub correlations: Vec<CorrelationReport>,
}

impl Results {
    /// Load previously saved results.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
        let mut reader = BufReader::new(file);
        let results = decode::from_read(&mut reader).context("failed to deserialize results")?;
        Ok(results)
    }
}

/// Collects named samples and reports their statistics.
pub struct Analyzer {
    cfg: Config,
    samples: Vec<(String, Sample)>,
}

impl Analyzer {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            samples: Vec::new(),
        }
    }

    pub fn add_sample(&mut self, name: String, sample: Sample) -> Result<()> {
        if self.sample(&name).is_some() {
            bail!("sample {name:?} was already added");
        }
        self.samples.push((name, sample));
        Ok(())
    }

    pub fn results(&self) -> Result<Results> {
        let names: Vec<_> = self.samples.iter().map(|(name, _)| name.clone()).collect();
        self.cfg
            .check_pairs(&names)
            .context("invalid correlation pairs")?;

        let samples = self
            .samples
            .iter()
            .map(|(name, sample)| SampleReport::new(name, sample, self.cfg.n_trim))
            .collect();

        let mut correlations = Vec::with_capacity(self.cfg.pairs.len());
        for [name_a, name_b] in &self.cfg.pairs {
            let sample_a = self.sample(name_a).context("missing first sample")?;
            let sample_b = self.sample(name_b).context("missing second sample")?;
            correlations.push(CorrelationReport::new(name_a, sample_a, name_b, sample_b));
        }

        Ok(Results {
            samples,
            correlations,
        })
    }

    pub fn save_results<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let results = self.results().context("failed to compute results")?;

        let file = file.as_ref();
        let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        let mut writer = BufWriter::new(file);

        encode::write_named(&mut writer, &results).context("failed to serialize results")?;
        writer.flush().context("failed to flush writer stream")?;
        Ok(())
    }

    fn sample(&self, name: &str) -> Option<&Sample> {
        self.samples
            .iter()
            .find(|(other, _)| other == name)
            .map(|(_, sample)| sample)
    }
}

fn observe(label: &str, stat: &str, result: descstats::Result<f64>) -> Option<f64> {
    match result {
        Ok(val) => Some(val),
        Err(error) => {
            log::warn!("cannot compute {stat} of {label}: {error}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(vals: &[f64], weights: Option<&[f64]>) -> Sample {
        Sample {
            vals: vals.to_vec(),
            weights: weights.map(<[f64]>::to_vec),
        }
    }

    fn config(n_trim: usize, pairs: &[[&str; 2]]) -> Config {
        Config {
            n_trim,
            pairs: pairs
                .iter()
                .map(|pair| pair.map(str::to_string))
                .collect(),
        }
    }

    #[test]
    fn sample_report_of_weighted_sample() {
        let report = SampleReport::new(
            "prices",
            &sample(&[1.5, 2.0, 5.84], Some(&[2.0, 0.0, 1.0])),
            1,
        );
        assert_eq!(report.n_vals, 3);
        assert!((report.median.unwrap() - 2.0).abs() < 1e-12);
        assert!((report.trimmed_mean.unwrap() - 3.92).abs() < 1e-12);
        assert!((report.weighted_mean.unwrap() - 2.9466666666666668).abs() < 1e-12);
        assert!((report.weighted_median.unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn sample_report_skips_undefined_stats() {
        let report = SampleReport::new("single", &sample(&[4.0], None), 1);
        assert_eq!(report.mean, Some(4.0));
        assert_eq!(report.median, Some(4.0));
        assert_eq!(report.mean_abs_dev, Some(0.0));
        assert_eq!(report.trimmed_mean, None);
        assert_eq!(report.variance, None);
        assert_eq!(report.std_dev, None);
        assert_eq!(report.std_error, None);
        assert_eq!(report.weighted_mean, None);
        assert_eq!(report.weighted_median, None);
    }

    #[test]
    fn analyzer_correlates_configured_pairs() {
        let mut analyzer = Analyzer::new(config(0, &[["a", "b"], ["a", "c"]]));
        analyzer
            .add_sample("a".to_string(), sample(&[4.0, 1.5, 5.0, 1.5, 4.7], None))
            .unwrap();
        analyzer
            .add_sample("b".to_string(), sample(&[1.0, 5.0, 2.0, 2.0, 0.0], None))
            .unwrap();
        analyzer
            .add_sample("c".to_string(), sample(&[2.0, 2.0, 2.0, 2.0, 2.0], None))
            .unwrap();

        let results = analyzer.results().unwrap();
        assert_eq!(results.samples.len(), 3);
        assert_eq!(results.correlations.len(), 2);
        let pearson = results.correlations[0].pearson.unwrap();
        assert!((pearson + 0.6920927019297618).abs() < 1e-12);
        assert_eq!(results.correlations[1].pearson, None);
    }

    #[test]
    fn analyzer_rejects_unknown_pairs_and_duplicates() {
        let mut analyzer = Analyzer::new(config(0, &[["a", "missing"]]));
        analyzer
            .add_sample("a".to_string(), sample(&[1.0, 2.0], None))
            .unwrap();
        assert!(
            analyzer
                .add_sample("a".to_string(), sample(&[3.0], None))
                .is_err()
        );
        assert!(analyzer.results().is_err());
    }
}
