use crate::db::Metric;
use color_eyre::eyre;
use color_eyre::Report;
use esds_exp::{RnType, ServiceTopology, Topology};
use std::fmt::Debug;

/// Energy measure exported to CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnergyType {
    Total,
    Dynamic,
    Time,
}

impl EnergyType {
    pub fn all() -> [EnergyType; 3] {
        [EnergyType::Total, EnergyType::Dynamic, EnergyType::Time]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnergyType::Total => "total",
            EnergyType::Dynamic => "dynamic",
            EnergyType::Time => "time",
        }
    }

    pub fn metric(&self) -> Metric {
        match self {
            EnergyType::Total => Metric::Total,
            EnergyType::Dynamic => Metric::Dynamic,
            EnergyType::Time => Metric::Time,
        }
    }
}

/// Placement quality shown in the plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    NoRn,
    Best,
    Worst,
}

impl Label {
    pub fn name(&self) -> &'static str {
        match self {
            Label::NoRn => "No RN",
            Label::Best => "best",
            Label::Worst => "worst",
        }
    }
}

/// Fixed naming and ordering tables used when exporting results.
#[derive(Debug, Clone)]
pub struct PlotFmt {
    net_order: Vec<Topology>,
    srv_order: Vec<ServiceTopology>,
    rn_order: Vec<RnType>,
    srv_index: Vec<(ServiceTopology, Topology)>,
    rn_index: Vec<(Label, ServiceTopology)>,
}

impl Default for PlotFmt {
    fn default() -> Self {
        use RnType::*;
        use ServiceTopology::*;
        use Topology::*;
        Self::new(
            vec![Clique, Star, Grid, Ring, Chain],
            vec![Fav, NonFav],
            vec![NoRn, RnAgg, RnNotAgg],
            vec![
                (Fav, Clique),
                (NonFav, Clique),
                (Fav, Star),
                (NonFav, Star),
                (Fav, Grid),
                (NonFav, Grid),
                (Fav, Ring),
                (NonFav, Ring),
                (Fav, Chain),
                (NonFav, Chain),
            ],
            vec![
                (Label::NoRn, Fav),
                (Label::NoRn, NonFav),
                (Label::Best, Fav),
                (Label::Best, NonFav),
                (Label::Worst, Fav),
                (Label::Worst, NonFav),
            ],
        )
    }
}

impl PlotFmt {
    pub fn new(
        net_order: Vec<Topology>,
        srv_order: Vec<ServiceTopology>,
        rn_order: Vec<RnType>,
        srv_index: Vec<(ServiceTopology, Topology)>,
        rn_index: Vec<(Label, ServiceTopology)>,
    ) -> Self {
        Self {
            net_order,
            srv_order,
            rn_order,
            srv_index,
            rn_index,
        }
    }

    /// Divisor applied to mean and standard deviation: kJ for total energy,
    /// J for dynamic energy and hours for time.
    pub fn unit(&self, energy_type: EnergyType) -> f64 {
        match energy_type {
            EnergyType::Total => 1000.0,
            EnergyType::Dynamic => 1.0,
            EnergyType::Time => 3600.0,
        }
    }

    pub fn srv_label(&self, srv: ServiceTopology) -> Label {
        match srv {
            ServiceTopology::Fav => Label::Best,
            ServiceTopology::NonFav => Label::Worst,
        }
    }

    /// An aggregating RN is best placed on the favorable service topology,
    /// while a non-aggregating one is best placed on the nonfavorable one.
    pub fn rn_label(&self, rn: RnType, srv: ServiceTopology) -> Label {
        match (rn, srv) {
            (RnType::NoRn, _) => Label::NoRn,
            (RnType::RnAgg, ServiceTopology::Fav) => Label::Best,
            (RnType::RnAgg, ServiceTopology::NonFav) => Label::Worst,
            (RnType::RnNotAgg, ServiceTopology::Fav) => Label::Worst,
            (RnType::RnNotAgg, ServiceTopology::NonFav) => Label::Best,
        }
    }

    pub fn net_rank(&self, net: Topology) -> Result<usize, Report> {
        position(&self.net_order, net, "PlotFmt::net_rank")
    }

    pub fn srv_rank(&self, srv: ServiceTopology) -> Result<usize, Report> {
        position(&self.srv_order, srv, "PlotFmt::srv_rank")
    }

    pub fn rn_rank(&self, rn: RnType) -> Result<usize, Report> {
        position(&self.rn_order, rn, "PlotFmt::rn_rank")
    }

    pub fn srv_index(
        &self,
        srv: ServiceTopology,
        net: Topology,
    ) -> Result<usize, Report> {
        position(&self.srv_index, (srv, net), "PlotFmt::srv_index")
    }

    pub fn rn_index(
        &self,
        rn_label: Label,
        srv: ServiceTopology,
    ) -> Result<usize, Report> {
        position(&self.rn_index, (rn_label, srv), "PlotFmt::rn_index")
    }

    /// Two decimal places; `nan` if there's no data.
    pub fn value(&self, value: f64) -> String {
        if value.is_nan() {
            String::from("nan")
        } else {
            format!("{:.2}", value)
        }
    }
}

fn position<T>(order: &[T], value: T, table: &str) -> Result<usize, Report>
where
    T: PartialEq + Debug,
{
    match order.iter().position(|entry| entry == &value) {
        Some(index) => Ok(index),
        None => eyre::bail!("{}: {:?} not supported!", table, value),
    }
}
