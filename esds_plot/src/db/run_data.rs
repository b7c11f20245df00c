use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use esds_exp::NodeMetrics;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Totals of a single run, accumulated over all of its nodes.
///
/// Dynamic and total energy are derived from the accumulated sums, so that
/// `total == idle + dynamic` and `dynamic == reconf + comms` hold exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunData {
    /// communication energy
    pub comms: f64,
    /// global termination time, the max across nodes
    pub time: f64,
    /// reconfiguration energy
    pub reconf: f64,
    /// static energy
    pub idle: f64,
}

impl RunData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the run stored in `run_dir`.
    ///
    /// Returns `Ok(None)` if the run is incomplete, i.e. if the directory
    /// doesn't exist or doesn't contain exactly `size` entries.
    pub fn load(
        run_dir: &Path,
        size: u64,
        stress_conso: f64,
    ) -> Result<Option<Self>, Report> {
        if !Self::is_complete(run_dir, size)? {
            tracing::debug!("skipping incomplete run {}", run_dir.display());
            return Ok(None);
        }

        let mut run = Self::new();
        for node in 0..size {
            let path = run_dir.join(NodeMetrics::file_name(node));
            let metrics = NodeMetrics::load(&path)
                .wrap_err_with(|| format!("load run {}", run_dir.display()))?;
            run.add(&metrics, stress_conso);
        }
        Ok(Some(run))
    }

    fn is_complete(run_dir: &Path, size: u64) -> Result<bool, Report> {
        if !run_dir.is_dir() {
            return Ok(false);
        }
        let entries = std::fs::read_dir(run_dir)
            .wrap_err_with(|| format!("read run {}", run_dir.display()))?
            .count() as u64;
        Ok(entries == size)
    }

    /// Accounts for the measurements of one more node.
    pub fn add(&mut self, metrics: &NodeMetrics, stress_conso: f64) {
        // reconfiguration time is converted into energy; the rest of what
        // the node consumed is static
        let reconf = metrics.tot_reconf_duration * stress_conso;
        let idle = metrics.node_cons - reconf;

        self.comms += metrics.comms_cons;
        self.time = self.time.max(metrics.global_termination_time);
        self.reconf += reconf;
        self.idle += idle;
    }

    pub fn dynamic(&self) -> f64 {
        self.reconf + self.comms
    }

    pub fn total(&self) -> f64 {
        self.idle + self.dynamic()
    }
}
