#![deny(rust_2018_idioms)]

pub mod config;
pub mod metrics;

// Re-exports.
pub use config::{
    ExperimentConfig, ExperimentLayout, PlacementConfig, ReconfConfig,
};
pub use metrics::NodeMetrics;

use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::Path;

/// Network topology connecting the simulated nodes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
)]
pub enum Topology {
    Clique,
    Star,
    Grid,
    Ring,
    Chain,
}

impl Topology {
    pub fn all() -> [Topology; 5] {
        [
            Topology::Clique,
            Topology::Star,
            Topology::Grid,
            Topology::Ring,
            Topology::Chain,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Topology::Clique => "clique",
            Topology::Star => "star",
            Topology::Grid => "grid",
            Topology::Ring => "ring",
            Topology::Chain => "chain",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|topology| topology.name() == name)
    }

    /// Symmetric topologies have no favorable placement, so their results
    /// are also reported as the nonfavorable case.
    pub fn is_symmetric(&self) -> bool {
        matches!(self, Topology::Clique | Topology::Ring)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Whether the placement of services favors communication locality.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
)]
pub enum ServiceTopology {
    Fav,
    NonFav,
}

impl ServiceTopology {
    pub fn all() -> [ServiceTopology; 2] {
        [ServiceTopology::Fav, ServiceTopology::NonFav]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServiceTopology::Fav => "fav",
            ServiceTopology::NonFav => "nonfav",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|srv| srv.name() == name)
    }
}

impl fmt::Display for ServiceTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a relocation node (RN) participates in the reconfiguration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
)]
pub enum RnType {
    NoRn,
    RnAgg,
    RnNotAgg,
}

impl RnType {
    pub fn all() -> [RnType; 3] {
        [RnType::NoRn, RnType::RnAgg, RnType::RnNotAgg]
    }

    pub fn name(&self) -> &'static str {
        match self {
            RnType::NoRn => "no_rn",
            RnType::RnAgg => "rn_agg",
            RnType::RnNotAgg => "rn_not_agg",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|rn| rn.name() == name)
    }
}

impl fmt::Display for RnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializationFormat {
    BincodeGz,
    Json,
    JsonPretty,
}

pub fn serialize<T>(
    data: T,
    file: impl AsRef<Path>,
    format: SerializationFormat,
) -> Result<(), Report>
where
    T: serde::Serialize,
{
    // if the file does not exist it will be created, otherwise truncated
    let file = std::fs::File::create(file).wrap_err("serialize create file")?;
    // create a buf writer
    let mut buf = std::io::BufWriter::new(file);
    // and try to serialize
    match format {
        SerializationFormat::BincodeGz => {
            // compress using gzip
            let mut writer = flate2::write::GzEncoder::new(
                &mut buf,
                flate2::Compression::best(),
            );
            bincode::serialize_into(&mut writer, &data)
                .wrap_err("serialize")?;
            writer.finish().wrap_err("serialize finish gzip")?;
        }
        SerializationFormat::Json => {
            serde_json::to_writer(&mut buf, &data).wrap_err("serialize")?;
        }
        SerializationFormat::JsonPretty => {
            serde_json::to_writer_pretty(&mut buf, &data)
                .wrap_err("serialize")?;
        }
    }
    buf.flush().wrap_err("serialize flush")?;
    Ok(())
}

pub fn deserialize<T>(
    file: impl AsRef<Path>,
    format: SerializationFormat,
) -> Result<T, Report>
where
    T: serde::de::DeserializeOwned,
{
    // open the file in read-only
    let file = std::fs::File::open(file).wrap_err("deserialize open file")?;
    // create a buf reader
    let buf = std::io::BufReader::new(file);
    // and try to deserialize
    let data = match format {
        SerializationFormat::BincodeGz => {
            let reader = flate2::read::GzDecoder::new(buf);
            bincode::deserialize_from(reader).wrap_err("deserialize")?
        }
        SerializationFormat::Json | SerializationFormat::JsonPretty => {
            serde_json::from_reader(buf).wrap_err("deserialize")?
        }
    };
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        for topology in Topology::all() {
            assert_eq!(Topology::from_name(topology.name()), Some(topology));
        }
        for srv in ServiceTopology::all() {
            assert_eq!(ServiceTopology::from_name(srv.name()), Some(srv));
        }
        for rn in RnType::all() {
            assert_eq!(RnType::from_name(rn.name()), Some(rn));
        }
        assert_eq!(Topology::from_name("mesh"), None);
        assert_eq!(ServiceTopology::from_name("Fav"), None);
        assert_eq!(RnType::from_name(""), None);
    }

    #[test]
    fn symmetric_topologies() {
        let symmetric: Vec<_> =
            Topology::all().into_iter().filter(Topology::is_symmetric).collect();
        assert_eq!(symmetric, vec![Topology::Clique, Topology::Ring]);
    }

    #[test]
    fn serialization_formats() {
        let dir = tempfile::tempdir().unwrap();
        let data = vec![
            (Topology::Star, ServiceTopology::NonFav, RnType::RnAgg),
            (Topology::Chain, ServiceTopology::Fav, RnType::NoRn),
        ];

        for (format, file) in vec![
            (SerializationFormat::BincodeGz, "data.bincode.gz"),
            (SerializationFormat::Json, "data.json"),
            (SerializationFormat::JsonPretty, "data_pretty.json"),
        ] {
            let path = dir.path().join(file);
            serialize(&data, &path, format).unwrap();
            let loaded: Vec<(Topology, ServiceTopology, RnType)> =
                deserialize(&path, format).unwrap();
            assert_eq!(loaded, data);
        }
    }

    #[test]
    fn deserialize_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Vec<u64>, _> = deserialize(
            dir.path().join("missing.json"),
            SerializationFormat::Json,
        );
        assert!(result.is_err());
    }
}
