mod exp_data;
mod results_db;
mod run_data;
mod snapshot;
mod stats;

// Re-exports.
pub use exp_data::{ExperimentData, Metric};
pub use results_db::ResultsDB;
pub use run_data::RunData;
pub use snapshot::{Fingerprint, SnapshotDir};
pub use stats::Stats;

// number of runs probed per experiment
const MAX_RUNS: u64 = 200;

// energy consumed per second of reconfiguration
const STRESS_CONSO: f64 = 1.358;

#[derive(Debug, Clone)]
pub struct LoadOptions {
    max_runs: u64,
    stress_conso: f64,
    snapshot_dir: Option<SnapshotDir>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_runs: MAX_RUNS,
            stress_conso: STRESS_CONSO,
            snapshot_dir: None,
        }
    }
}

impl LoadOptions {
    pub fn max_runs(&mut self, max_runs: u64) -> &mut Self {
        self.max_runs = max_runs;
        self
    }

    pub fn stress_conso(&mut self, stress_conso: f64) -> &mut Self {
        self.stress_conso = stress_conso;
        self
    }

    /// Caches the data of each experiment in `snapshot_dir`.
    pub fn snapshot_dir(&mut self, snapshot_dir: SnapshotDir) -> &mut Self {
        self.snapshot_dir = Some(snapshot_dir);
        self
    }
}
