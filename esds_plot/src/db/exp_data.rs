use crate::db::{LoadOptions, RunData, Stats};
use color_eyre::Report;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum Metric {
    Comms,
    Time,
    Reconf,
    Static,
    Dynamic,
    Total,
}

impl Metric {
    pub fn all() -> [Metric; 6] {
        [
            Metric::Comms,
            Metric::Time,
            Metric::Reconf,
            Metric::Static,
            Metric::Dynamic,
            Metric::Total,
        ]
    }

    fn value(&self, run: &RunData) -> f64 {
        match self {
            Metric::Comms => run.comms,
            Metric::Time => run.time,
            Metric::Reconf => run.reconf,
            Metric::Static => run.idle,
            Metric::Dynamic => run.dynamic(),
            Metric::Total => run.total(),
        }
    }
}

/// Statistics of an experiment across all of its complete runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentData {
    /// number of complete runs
    pub runs: usize,
    pub comms: Stats,
    pub time: Stats,
    pub reconf: Stats,
    pub idle: Stats,
    pub dynamic: Stats,
    pub total: Stats,
}

impl ExperimentData {
    pub fn new(runs: &[RunData]) -> Self {
        let stats = |metric: Metric| {
            let values: Vec<_> =
                runs.iter().map(|run| metric.value(run)).collect();
            Stats::from(&values)
        };
        Self {
            runs: runs.len(),
            comms: stats(Metric::Comms),
            time: stats(Metric::Time),
            reconf: stats(Metric::Reconf),
            idle: stats(Metric::Static),
            dynamic: stats(Metric::Dynamic),
            total: stats(Metric::Total),
        }
    }

    /// Probes runs `0..options.max_runs` of the experiment stored in
    /// `exp_dir`, ignoring the incomplete ones.
    pub fn load(
        exp_dir: &Path,
        size: u64,
        options: &LoadOptions,
    ) -> Result<Self, Report> {
        let mut runs = Vec::new();
        for run_num in 0..options.max_runs {
            let run_dir = exp_dir.join(run_num.to_string());
            if let Some(run) =
                RunData::load(&run_dir, size, options.stress_conso)?
            {
                runs.push(run);
            }
        }
        Ok(Self::new(&runs))
    }

    pub fn stats(&self, metric: Metric) -> Stats {
        match metric {
            Metric::Comms => self.comms,
            Metric::Time => self.time,
            Metric::Reconf => self.reconf,
            Metric::Static => self.idle,
            Metric::Dynamic => self.dynamic,
            Metric::Total => self.total,
        }
    }
}
