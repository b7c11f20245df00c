use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Measurements reported by a single simulated node at the end of a run.
/// Any other key present in the node file is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeMetrics {
    /// time spent reconfiguring (s)
    pub tot_reconf_duration: f64,
    /// energy consumed by the node, idle and reconfiguration (J)
    pub node_cons: f64,
    /// energy consumed by communications (J)
    pub comms_cons: f64,
    /// simulated time at which the whole system terminated (s)
    pub global_termination_time: f64,
}

impl NodeMetrics {
    /// Path of the file written by node `node` inside a run directory.
    pub fn file_name(node: u64) -> String {
        format!("{}.yaml", node)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Report> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).wrap_err_with(|| {
            format!("read node metrics {}", path.display())
        })?;
        Self::from_yaml(&content).wrap_err_with(|| {
            format!("deserialize node metrics {}", path.display())
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, Report> {
        let metrics = serde_yaml::from_str(content)?;
        Ok(metrics)
    }
}
