use crate::db::{ExperimentData, LoadOptions};
use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use esds_exp::{ExperimentConfig, SerializationFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

const SNAPSHOT_SUFFIX: &str = "_experiment_data_snapshot.bincode.gz";

/// One entry under an experiment directory, identified by its relative path.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
enum Entry {
    // number of entries it holds
    Dir(String, u64),
    // length and modification time (in nanoseconds since the epoch)
    File(String, u64, u128),
}

/// State of every directory and file under an experiment directory, sorted.
/// Symlinks are followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    entries: Vec<Entry>,
}

impl Fingerprint {
    pub fn compute(exp_dir: &Path) -> Result<Self, Report> {
        let mut entries = Vec::new();
        Self::visit(exp_dir, exp_dir, &mut entries).wrap_err_with(|| {
            format!("fingerprint experiment {}", exp_dir.display())
        })?;
        entries.sort();
        Ok(Self { entries })
    }

    fn visit(
        root: &Path,
        dir: &Path,
        entries: &mut Vec<Entry>,
    ) -> Result<(), Report> {
        let mut count = 0;
        for entry in std::fs::read_dir(dir)? {
            let entry = entry.wrap_err("incorrect directory entry")?;
            let path = entry.path();
            count += 1;
            let metadata = std::fs::metadata(&path)
                .wrap_err_with(|| format!("metadata of {}", path.display()))?;
            if metadata.is_dir() {
                Self::visit(root, &path, entries)?;
            } else {
                let modified = metadata
                    .modified()?
                    .duration_since(UNIX_EPOCH)
                    .wrap_err("modification time before epoch")?
                    .as_nanos();
                entries.push(Entry::File(
                    relative(root, &path)?,
                    metadata.len(),
                    modified,
                ));
            }
        }
        entries.push(Entry::Dir(relative(root, dir)?, count));
        Ok(())
    }
}

fn relative(root: &Path, path: &Path) -> Result<String, Report> {
    let relative = path
        .strip_prefix(root)
        .wrap_err("strip experiment prefix")?;
    Ok(relative.display().to_string())
}

/// Cached `ExperimentData` of one experiment, valid as long as the
/// experiment's files and the load options are unchanged.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    config: ExperimentConfig,
    max_runs: u64,
    stress_conso: f64,
    fingerprint: Fingerprint,
    exp_data: ExperimentData,
}

impl Snapshot {
    fn matches(
        &self,
        config: &ExperimentConfig,
        options: &LoadOptions,
        fingerprint: &Fingerprint,
    ) -> bool {
        &self.config == config
            && self.max_runs == options.max_runs
            && self.stress_conso == options.stress_conso
            && &self.fingerprint == fingerprint
    }
}

/// Directory where experiment snapshots are stored.
#[derive(Debug, Clone)]
pub struct SnapshotDir {
    dir: PathBuf,
}

impl SnapshotDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, exp_name: &str) -> PathBuf {
        self.dir.join(format!("{}{}", exp_name, SNAPSHOT_SUFFIX))
    }

    /// Returns the snapshot of this experiment, if there's one that is still
    /// up to date. Unreadable snapshots are ignored.
    pub fn get(
        &self,
        exp_name: &str,
        config: &ExperimentConfig,
        options: &LoadOptions,
        fingerprint: &Fingerprint,
    ) -> Option<ExperimentData> {
        let path = self.path(exp_name);
        if !path.exists() {
            return None;
        }
        match esds_exp::deserialize::<Snapshot>(
            &path,
            SerializationFormat::BincodeGz,
        ) {
            Ok(snapshot) if snapshot.matches(config, options, fingerprint) => {
                Some(snapshot.exp_data)
            }
            Ok(_) => {
                tracing::debug!("stale snapshot {}", path.display());
                None
            }
            Err(e) => {
                tracing::warn!(
                    "ignoring unreadable snapshot {}: {:?}",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    pub fn put(
        &self,
        exp_name: &str,
        config: &ExperimentConfig,
        options: &LoadOptions,
        fingerprint: Fingerprint,
        exp_data: &ExperimentData,
    ) -> Result<(), Report> {
        eyre::ensure!(
            !self.dir.is_file(),
            "snapshot directory {} is a file",
            self.dir.display()
        );
        std::fs::create_dir_all(&self.dir).wrap_err_with(|| {
            format!("create snapshot directory {}", self.dir.display())
        })?;
        let snapshot = Snapshot {
            config: *config,
            max_runs: options.max_runs,
            stress_conso: options.stress_conso,
            fingerprint,
            exp_data: exp_data.clone(),
        };
        let path = self.path(exp_name);
        esds_exp::serialize(&snapshot, &path, SerializationFormat::BincodeGz)
            .wrap_err_with(|| {
                format!("serialize experiment data snapshot {}", path.display())
            })
    }
}
