use crate::{RnType, ServiceTopology, Topology};
use color_eyre::eyre;
use color_eyre::Report;
use serde::{Deserialize, Serialize};
use std::fmt;

// experiment parameters are encoded in the directory name, separated by this
const SEPARATOR: char = '-';

/// The two directory-name encodings produced by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentLayout {
    /// `<leverage>-<n_obs>-<n_hops>-<n_deps>`
    Reconf,
    /// `<net>-<srv>-<rn>-<leverage>-<size>`
    Placement,
}

impl ExperimentLayout {
    pub fn all() -> [ExperimentLayout; 2] {
        [ExperimentLayout::Reconf, ExperimentLayout::Placement]
    }

    /// Layout of the experiment directory `name`, if any layout can parse
    /// it.
    pub fn detect(name: &str) -> Option<ExperimentLayout> {
        Self::all()
            .iter()
            .copied()
            .find(|layout| layout.parse(name).is_ok())
    }

    pub fn field_count(&self) -> usize {
        match self {
            ExperimentLayout::Reconf => 4,
            ExperimentLayout::Placement => 5,
        }
    }

    /// Parses an experiment directory name according to this layout.
    pub fn parse(&self, name: &str) -> Result<ExperimentConfig, Report> {
        let fields: Vec<_> = name.split(SEPARATOR).collect();
        if fields.len() != self.field_count() {
            eyre::bail!(
                "malformed experiment identifier {:?}: expected {} fields separated by {:?}, found {}",
                name,
                self.field_count(),
                SEPARATOR,
                fields.len()
            );
        }

        let config = match self {
            ExperimentLayout::Reconf => {
                ExperimentConfig::Reconf(ReconfConfig {
                    leverage: parse_int(name, "leverage", fields[0])?,
                    n_obs: parse_int(name, "n_obs", fields[1])?,
                    n_hops: parse_int(name, "n_hops", fields[2])?,
                    n_deps: parse_int(name, "n_deps", fields[3])?,
                })
            }
            ExperimentLayout::Placement => {
                ExperimentConfig::Placement(PlacementConfig {
                    net_topology: parse_code(
                        name,
                        "network topology",
                        fields[0],
                        Topology::from_name,
                    )?,
                    srv_topology: parse_code(
                        name,
                        "service topology",
                        fields[1],
                        ServiceTopology::from_name,
                    )?,
                    rn_type: parse_code(
                        name,
                        "relocation node type",
                        fields[2],
                        RnType::from_name,
                    )?,
                    leverage: parse_int(name, "leverage", fields[3])?,
                    size: parse_int(name, "size", fields[4])?,
                })
            }
        };
        Ok(config)
    }
}

fn parse_int(name: &str, field: &str, value: &str) -> Result<u64, Report> {
    value.parse().map_err(|_| {
        eyre::eyre!(
            "malformed experiment identifier {:?}: {} {:?} is not an integer",
            name,
            field,
            value
        )
    })
}

fn parse_code<T>(
    name: &str,
    field: &str,
    value: &str,
    from_name: impl Fn(&str) -> Option<T>,
) -> Result<T, Report> {
    from_name(value).ok_or_else(|| {
        eyre::eyre!(
            "malformed experiment identifier {:?}: unknown {} {:?}",
            name,
            field,
            value
        )
    })
}

/// Parameters of a reconfiguration experiment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ReconfConfig {
    pub leverage: u64,
    /// number of observed nodes per hop
    pub n_obs: u64,
    /// number of hops
    pub n_hops: u64,
    /// number of dependencies
    pub n_deps: u64,
}

impl ReconfConfig {
    /// One node per observer plus the reconfiguring node.
    pub fn size(&self) -> u64 {
        self.n_obs.saturating_mul(self.n_hops).saturating_add(1)
    }
}

/// Parameters of a placement experiment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PlacementConfig {
    pub net_topology: Topology,
    pub srv_topology: ServiceTopology,
    pub rn_type: RnType,
    pub leverage: u64,
    pub size: u64,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ExperimentConfig {
    Reconf(ReconfConfig),
    Placement(PlacementConfig),
}

impl ExperimentConfig {
    /// Number of node files expected in each complete run.
    pub fn size(&self) -> u64 {
        match self {
            ExperimentConfig::Reconf(config) => config.size(),
            ExperimentConfig::Placement(config) => config.size,
        }
    }

    pub fn leverage(&self) -> u64 {
        match self {
            ExperimentConfig::Reconf(config) => config.leverage,
            ExperimentConfig::Placement(config) => config.leverage,
        }
    }
}

impl fmt::Display for ExperimentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentConfig::Reconf(config) => write!(
                f,
                "{}{sep}{}{sep}{}{sep}{}",
                config.leverage,
                config.n_obs,
                config.n_hops,
                config.n_deps,
                sep = SEPARATOR
            ),
            ExperimentConfig::Placement(config) => write!(
                f,
                "{}{sep}{}{sep}{}{sep}{}{sep}{}",
                config.net_topology,
                config.srv_topology,
                config.rn_type,
                config.leverage,
                config.size,
                sep = SEPARATOR
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn parse_reconf() {
        let config = ExperimentLayout::Reconf.parse("2-5-3-1").unwrap();
        let expected = ReconfConfig {
            leverage: 2,
            n_obs: 5,
            n_hops: 3,
            n_deps: 1,
        };
        assert_eq!(config, ExperimentConfig::Reconf(expected));
        assert_eq!(config.size(), 16);
        assert_eq!(config.leverage(), 2);
    }

    #[test]
    fn detect_layout() {
        assert_eq!(
            ExperimentLayout::detect("2-5-3-1"),
            Some(ExperimentLayout::Reconf)
        );
        assert_eq!(
            ExperimentLayout::detect("star-nonfav-rn_agg-1-31"),
            Some(ExperimentLayout::Placement)
        );
        assert_eq!(ExperimentLayout::detect("star-fav-1-31"), None);
        assert_eq!(ExperimentLayout::detect("2-5-3-x"), None);
    }

    #[test]
    fn parse_placement() {
        let config = ExperimentLayout::Placement
            .parse("grid-nonfav-rn_not_agg-10-31")
            .unwrap();
        let expected = PlacementConfig {
            net_topology: Topology::Grid,
            srv_topology: ServiceTopology::NonFav,
            rn_type: RnType::RnNotAgg,
            leverage: 10,
            size: 31,
        };
        assert_eq!(config, ExperimentConfig::Placement(expected));
        assert_eq!(config.size(), 31);
        assert_eq!(config.to_string(), "grid-nonfav-rn_not_agg-10-31");
    }

    #[test]
    fn parse_wrong_field_count() {
        let err = ExperimentLayout::Reconf.parse("2-5-3").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("malformed experiment identifier"));
        assert!(msg.contains("expected 4 fields"));

        // a reconf name is not a placement name
        let err = ExperimentLayout::Placement.parse("2-5-3-1").unwrap_err();
        assert!(err.to_string().contains("expected 5 fields"));
    }

    #[test]
    fn parse_non_integer() {
        let err = ExperimentLayout::Reconf.parse("2-five-3-1").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("malformed experiment identifier"));
        assert!(msg.contains("n_obs"));

        let err = ExperimentLayout::Placement
            .parse("star-fav-no_rn-1-x")
            .unwrap_err();
        assert!(err.to_string().contains("size"));
    }

    #[test]
    fn parse_unknown_code() {
        let err = ExperimentLayout::Placement
            .parse("mesh-fav-no_rn-1-10")
            .unwrap_err();
        assert!(err.to_string().contains("unknown network topology"));

        let err = ExperimentLayout::Placement
            .parse("star-fav-rn-1-10")
            .unwrap_err();
        assert!(err.to_string().contains("unknown relocation node type"));
    }

    #[quickcheck]
    fn reconf_display_parse(
        leverage: u64,
        n_obs: u32,
        n_hops: u32,
        n_deps: u64,
    ) -> bool {
        let config = ExperimentConfig::Reconf(ReconfConfig {
            leverage,
            n_obs: n_obs as u64,
            n_hops: n_hops as u64,
            n_deps,
        });
        ExperimentLayout::Reconf.parse(&config.to_string()).unwrap() == config
    }
}
