use crate::db::{ExperimentData, ResultsDB};
use crate::fmt::{EnergyType, PlotFmt};
use color_eyre::eyre;
use color_eyre::Report;
use esds_exp::{ExperimentConfig, PlacementConfig, ReconfConfig};
use serde::Serialize;
use std::collections::BTreeMap;

/// A CSV row, preceded by `HEADER` in the output file.
pub trait Row: Serialize {
    const HEADER: &'static [&'static str];
}

/// Parameter by which reconfiguration experiments are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconfKey {
    Leverage,
    Obs,
    Hops,
    Deps,
}

impl ReconfKey {
    fn value(&self, config: &ReconfConfig) -> u64 {
        match self {
            ReconfKey::Leverage => config.leverage,
            ReconfKey::Obs => config.n_obs,
            ReconfKey::Hops => config.n_hops,
            ReconfKey::Deps => config.n_deps,
        }
    }
}

/// Parameter by which placement experiments are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementKey {
    NetTopology,
    SrvTopology,
    RnType,
    Leverage,
    Size,
}

impl PlacementKey {
    fn value(
        &self,
        config: &PlacementConfig,
        fmt: &PlotFmt,
    ) -> Result<u64, Report> {
        let value = match self {
            PlacementKey::NetTopology => {
                fmt.net_rank(config.net_topology)? as u64
            }
            PlacementKey::SrvTopology => {
                fmt.srv_rank(config.srv_topology)? as u64
            }
            PlacementKey::RnType => fmt.rn_rank(config.rn_type)? as u64,
            PlacementKey::Leverage => config.leverage,
            PlacementKey::Size => config.size,
        };
        Ok(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconfRow {
    pub energy_mean: String,
    pub energy_std: String,
    pub leverage: u64,
    pub n_obs: u64,
    pub n_hops: u64,
    pub n_deps: u64,
    pub srv_tplgy_index: usize,
}

impl Row for ReconfRow {
    const HEADER: &'static [&'static str] = &[
        "energy_mean",
        "energy_std",
        "leverage",
        "n_obs",
        "n_hops",
        "n_deps",
        "srv_tplgy_index",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementRow {
    pub energy_mean: String,
    pub energy_std: String,
    pub leverage: u64,
    pub size: u64,
    pub net_tplgy: &'static str,
    pub srv_tplgy: &'static str,
    pub rn_tplgy: &'static str,
    pub srv_tplgy_index: usize,
    pub rn_tplgy_index: usize,
}

impl Row for PlacementRow {
    const HEADER: &'static [&'static str] = &[
        "energy_mean",
        "energy_std",
        "leverage",
        "size",
        "net_tplgy",
        "srv_tplgy",
        "rn_tplgy",
        "srv_tplgy_index",
        "rn_tplgy_index",
    ];
}

/// Formatted mean and standard deviation of `energy_type`.
fn energy(
    exp_data: &ExperimentData,
    energy_type: EnergyType,
    fmt: &PlotFmt,
) -> (String, String) {
    let stats = exp_data
        .stats(energy_type.metric())
        .scale(fmt.unit(energy_type));
    (fmt.value(stats.mean), fmt.value(stats.std))
}

/// Rows of reconfiguration experiments, grouped by `group_by` in ascending
/// order. Within a group, experiments keep the order of the database.
pub fn reconf_rows(
    db: &ResultsDB,
    fmt: &PlotFmt,
    energy_type: EnergyType,
    group_by: ReconfKey,
) -> Result<Vec<ReconfRow>, Report> {
    let mut groups: BTreeMap<u64, Vec<_>> = BTreeMap::new();
    for (exp_config, exp_data) in db.results() {
        let config = match exp_config {
            ExperimentConfig::Reconf(config) => config,
            ExperimentConfig::Placement(_) => eyre::bail!(
                "reconf_rows: unexpected placement experiment {}",
                exp_config
            ),
        };
        groups
            .entry(group_by.value(config))
            .or_default()
            .push((config, exp_data));
    }

    let rows = groups
        .into_values()
        .flatten()
        .map(|(config, exp_data)| {
            let (energy_mean, energy_std) = energy(exp_data, energy_type, fmt);
            ReconfRow {
                energy_mean,
                energy_std,
                leverage: config.leverage,
                n_obs: config.n_obs,
                n_hops: config.n_hops,
                n_deps: config.n_deps,
                // these experiments are not run on a specific topology
                srv_tplgy_index: 0,
            }
        })
        .collect();
    Ok(rows)
}

/// Rows of placement experiments, grouped by `group_by` in ascending order.
/// Within a group, experiments are sorted by leverage, then RN type, then
/// network topology and finally service topology.
pub fn placement_rows(
    db: &ResultsDB,
    fmt: &PlotFmt,
    energy_type: EnergyType,
    group_by: PlacementKey,
) -> Result<Vec<PlacementRow>, Report> {
    let mut groups: BTreeMap<u64, Vec<_>> = BTreeMap::new();
    for (exp_config, exp_data) in db.results() {
        let config = match exp_config {
            ExperimentConfig::Placement(config) => config,
            ExperimentConfig::Reconf(_) => eyre::bail!(
                "placement_rows: unexpected reconf experiment {}",
                exp_config
            ),
        };
        let sort_key = (
            config.leverage,
            fmt.rn_rank(config.rn_type)?,
            fmt.net_rank(config.net_topology)?,
            fmt.srv_rank(config.srv_topology)?,
        );
        groups
            .entry(group_by.value(config, fmt)?)
            .or_default()
            .push((sort_key, config, exp_data));
    }

    let mut rows = Vec::with_capacity(db.len());
    for (_, mut group) in groups {
        // stable sort: equal keys keep the order of the database
        group.sort_by_key(|(sort_key, _, _)| *sort_key);
        for (_, config, exp_data) in group {
            let (energy_mean, energy_std) = energy(exp_data, energy_type, fmt);
            let rn_label = fmt.rn_label(config.rn_type, config.srv_topology);
            rows.push(PlacementRow {
                energy_mean,
                energy_std,
                leverage: config.leverage,
                size: config.size,
                net_tplgy: config.net_topology.name(),
                srv_tplgy: fmt.srv_label(config.srv_topology).name(),
                rn_tplgy: rn_label.name(),
                srv_tplgy_index: fmt
                    .srv_index(config.srv_topology, config.net_topology)?,
                rn_tplgy_index: fmt.rn_index(rn_label, config.srv_topology)?,
            });
        }
    }
    Ok(rows)
}
