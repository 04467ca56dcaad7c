use crate::config::{Config, Sample};
use crate::report::{Analyzer, Results};
use anyhow::{Context, Result};
use glob::glob;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub struct Manager {
    data_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        let cfg =
            Config::from_file(data_dir.join("config.toml")).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { data_dir, cfg })
    }

    pub fn analyze_samples(&self) -> Result<()> {
        let mut analyzer = Analyzer::new(self.cfg.clone());

        let sample_files = self
            .find_sample_files()
            .context("failed to find sample files")?;
        for (name, file) in sample_files {
            let sample =
                Sample::from_file(&file).with_context(|| format!("failed to load {file:?}"))?;
            log::info!("loaded {file:?} ({} values)", sample.vals.len());

            analyzer
                .add_sample(name, sample)
                .context("failed to add sample")?;
        }

        let results_file = self.results_file();
        analyzer
            .save_results(&results_file)
            .context("failed to save results")?;
        log::info!("saved {results_file:?}");

        Ok(())
    }

    pub fn show_results(&self) -> Result<()> {
        let results_file = self.results_file();
        let results = Results::from_file(&results_file)
            .with_context(|| format!("failed to load {results_file:?}"))?;
        log::info!("{results:#?}");
        Ok(())
    }

    pub fn clean_results(&self) -> Result<()> {
        let results_file = self.results_file();
        if results_file.exists() {
            fs::remove_file(&results_file)
                .with_context(|| format!("failed to remove {results_file:?}"))?;
            log::info!("removed {results_file:?}");
        }
        Ok(())
    }

    /// Find the sample files, named `sample-<name>.toml`, sorted by name.
    fn find_sample_files(&self) -> Result<Vec<(String, PathBuf)>> {
        let pattern = self.data_dir.join("sample-*.toml");
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;

        let mut sample_files = Vec::new();
        for path in glob(pattern).context("failed to glob sample files")? {
            let path = path.context("failed to read glob entry")?;
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.strip_prefix("sample-"))
                .with_context(|| format!("invalid sample file name {path:?}"))?
                .to_string();
            sample_files.push((name, path));
        }
        sample_files.sort();

        Ok(sample_files)
    }

    fn results_file(&self) -> PathBuf {
        self.data_dir.join("results.msgpack")
    }
}
