use crate::db::{ExperimentData, Fingerprint, LoadOptions};
use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use esds_exp::{
    ExperimentConfig, ExperimentLayout, SerializationFormat, ServiceTopology,
};
use serde::{Deserialize, Serialize};
use std::fs::DirEntry;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultsDB {
    results: Vec<(ExperimentConfig, ExperimentData)>,
}

impl ResultsDB {
    pub fn new(results: Vec<(ExperimentConfig, ExperimentData)>) -> Self {
        Self { results }
    }

    /// Loads every experiment stored in `results_dir`, whose directory
    /// names are encoded according to `layout`.
    pub fn load(
        results_dir: impl AsRef<Path>,
        layout: ExperimentLayout,
        options: &LoadOptions,
    ) -> Result<Self, Report> {
        let experiments = Self::list_experiments(results_dir)?;

        // holder for results
        let mut results = Vec::with_capacity(experiments.len());

        // track the number of loaded entries
        let total_entries = experiments.len();

        for (index, experiment) in experiments.into_iter().enumerate() {
            let (exp_config, exp_data) =
                Self::load_entry(&experiment, layout, options)
                    .wrap_err("load entry")?;
            tracing::info!(
                "loaded {} with {} runs | {} of {}",
                experiment.path().display(),
                exp_data.runs,
                index + 1,
                total_entries
            );

            // symmetric topologies are also reported as nonfavorable
            let duplicate = match exp_config {
                ExperimentConfig::Placement(mut config)
                    if config.net_topology.is_symmetric() =>
                {
                    config.srv_topology = ServiceTopology::NonFav;
                    Some((ExperimentConfig::Placement(config), exp_data.clone()))
                }
                _ => None,
            };
            results.push((exp_config, exp_data));
            results.extend(duplicate);
        }

        Ok(Self { results })
    }

    /// Layout of the experiments in `results_dir`, detected from the first
    /// experiment directory.
    pub fn detect_layout(
        results_dir: impl AsRef<Path>,
    ) -> Result<ExperimentLayout, Report> {
        let experiments = Self::list_experiments(&results_dir)?;
        let experiment = match experiments.first() {
            Some(experiment) => experiment,
            None => eyre::bail!(
                "no experiments in {}",
                results_dir.as_ref().display()
            ),
        };
        let name = experiment.file_name();
        let name = name.to_string_lossy();
        match ExperimentLayout::detect(&name) {
            Some(layout) => Ok(layout),
            None => eyre::bail!("malformed experiment identifier {:?}", name),
        }
    }

    /// Lists the experiment directories in `results_dir`, sorted by name.
    pub fn list_experiments(
        results_dir: impl AsRef<Path>,
    ) -> Result<Vec<DirEntry>, Report> {
        let read_dir = std::fs::read_dir(results_dir.as_ref())
            .wrap_err_with(|| {
                format!(
                    "read results directory {}",
                    results_dir.as_ref().display()
                )
            })?;
        let mut experiments = Vec::new();
        for experiment in read_dir {
            let experiment =
                experiment.wrap_err("incorrect directory entry")?;
            // ignore anything that's not a directory
            if experiment.path().is_dir() {
                experiments.push(experiment);
            }
        }
        experiments.sort_by_key(|experiment| experiment.file_name());
        Ok(experiments)
    }

    fn load_entry(
        experiment: &DirEntry,
        layout: ExperimentLayout,
        options: &LoadOptions,
    ) -> Result<(ExperimentConfig, ExperimentData), Report> {
        // register load start time
        let start = std::time::Instant::now();

        let exp_name = match experiment.file_name().into_string() {
            Ok(exp_name) => exp_name,
            Err(name) => eyre::bail!(
                "malformed experiment identifier {:?}: not valid unicode",
                name
            ),
        };
        let exp_config = layout.parse(&exp_name)?;
        let exp_dir = experiment.path();

        let exp_data = match &options.snapshot_dir {
            Some(snapshot_dir) => {
                let fingerprint = Fingerprint::compute(&exp_dir)?;
                if let Some(exp_data) = snapshot_dir.get(
                    &exp_name,
                    &exp_config,
                    options,
                    &fingerprint,
                ) {
                    // if there's an up-to-date snapshot, simply use it
                    tracing::debug!("using snapshot of {}", exp_name);
                    exp_data
                } else {
                    // otherwise load it and create snapshot
                    let exp_data = ExperimentData::load(
                        &exp_dir,
                        exp_config.size(),
                        options,
                    )?;
                    snapshot_dir.put(
                        &exp_name,
                        &exp_config,
                        options,
                        fingerprint,
                        &exp_data,
                    )?;
                    exp_data
                }
            }
            None => {
                ExperimentData::load(&exp_dir, exp_config.size(), options)?
            }
        };

        if exp_data.runs == 0 {
            tracing::warn!(
                "experiment {} has no complete run: its statistics are NaN",
                exp_name
            );
        }
        tracing::debug!("loaded {} after {:?}", exp_name, start.elapsed());
        Ok((exp_config, exp_data))
    }

    pub fn results(
        &self,
    ) -> impl Iterator<Item = &(ExperimentConfig, ExperimentData)> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Dumps every experiment record to `output_file`.
    pub fn data_to_json(
        &self,
        output_file: impl AsRef<Path>,
    ) -> Result<(), Report> {
        esds_exp::serialize(
            &self.results,
            output_file,
            SerializationFormat::JsonPretty,
        )
        .wrap_err("serialize results")
    }
}
