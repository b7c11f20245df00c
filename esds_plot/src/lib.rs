#![deny(rust_2018_idioms)]

pub mod db;
mod fmt;
mod output;
mod table;

#[cfg(test)]
mod test_util;

// Re-exports.
pub use db::{LoadOptions, ResultsDB, SnapshotDir};
pub use fmt::{EnergyType, Label, PlotFmt};
pub use output::{csv_file_name, write_csv};
pub use table::{
    placement_rows, reconf_rows, PlacementKey, PlacementRow, ReconfKey,
    ReconfRow, Row,
};

use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use esds_exp::ExperimentLayout;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Logs to stderr, filtered by `RUST_LOG` (warnings by default).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Exports the energy of the reconfiguration experiments stored in
/// `results_dir`, one CSV per energy type.
pub fn reconf_energy(
    results_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    group_by: ReconfKey,
    options: &LoadOptions,
) -> Result<(), Report> {
    let db = ResultsDB::load(results_dir, ExperimentLayout::Reconf, options)
        .wrap_err("load results")?;
    let fmt = PlotFmt::default();
    for energy_type in EnergyType::all() {
        let rows = reconf_rows(&db, &fmt, energy_type, group_by)?;
        write_csv(&output_dir, energy_type, &rows)?;
    }
    Ok(())
}

/// Exports the energy of the placement experiments stored in `results_dir`,
/// one CSV per energy type.
pub fn placement_energy(
    results_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    group_by: PlacementKey,
    options: &LoadOptions,
) -> Result<(), Report> {
    let db =
        ResultsDB::load(results_dir, ExperimentLayout::Placement, options)
            .wrap_err("load results")?;
    let fmt = PlotFmt::default();
    for energy_type in EnergyType::all() {
        let rows = placement_rows(&db, &fmt, energy_type, group_by)?;
        write_csv(&output_dir, energy_type, &rows)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn read_outputs(output_dir: &Path) -> Vec<String> {
        EnergyType::all()
            .iter()
            .map(|energy_type| {
                let path = output_dir.join(csv_file_name(*energy_type));
                std::fs::read_to_string(path).unwrap()
            })
            .collect()
    }

    fn reconf_results(results_dir: &Path) {
        // two complete runs of 2 * 1 + 1 nodes, with totals 1000 and 2000
        let exp = results_dir.join("2-2-1-0");
        test_util::write_run(
            &exp.join("0"),
            &[
                test_util::node(0.0, 300.0, 0.0, 3600.0),
                test_util::node(0.0, 300.0, 50.0, 1800.0),
                test_util::node(0.0, 300.0, 50.0, 1800.0),
            ],
        );
        test_util::write_run(
            &exp.join("1"),
            &[
                test_util::node(0.0, 600.0, 100.0, 7200.0),
                test_util::node(0.0, 600.0, 100.0, 7200.0),
                test_util::node(0.0, 500.0, 100.0, 7200.0),
            ],
        );
        // an incomplete run
        test_util::write_run(
            &exp.join("2"),
            &[test_util::node(0.0, 1e9, 1e9, 1e9)],
        );
    }

    #[test]
    fn reconf_pipeline() {
        let results = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        reconf_results(results.path());

        reconf_energy(
            results.path(),
            output.path(),
            ReconfKey::Leverage,
            &LoadOptions::default(),
        )
        .unwrap();

        let header =
            "energy_mean,energy_std,leverage,n_obs,n_hops,n_deps,srv_tplgy_index";
        assert_eq!(
            read_outputs(output.path()),
            vec![
                format!("{}\r\n1.50,0.50,2,2,1,0,0\r\n", header),
                format!("{}\r\n200.00,100.00,2,2,1,0,0\r\n", header),
                format!("{}\r\n1.50,0.50,2,2,1,0,0\r\n", header),
            ]
        );
    }

    #[test]
    fn reruns_are_byte_identical() {
        let results = tempfile::tempdir().unwrap();
        reconf_results(results.path());
        let node = test_util::node(1.0, 40.0, 3.0, 10.0);
        test_util::write_experiment(results.path(), "1-1-1-0", 3, &[node; 2]);
        test_util::write_experiment(results.path(), "1-3-1-2", 1, &[node; 4]);

        let run = |snapshots: Option<PathBuf>| {
            let output = tempfile::tempdir().unwrap();
            let mut options = LoadOptions::default();
            if let Some(snapshots) = snapshots {
                options.snapshot_dir(SnapshotDir::new(snapshots));
            }
            reconf_energy(
                results.path(),
                output.path(),
                ReconfKey::Leverage,
                &options,
            )
            .unwrap();
            read_outputs(output.path())
        };

        let snapshots = tempfile::tempdir().unwrap();
        let first = run(None);
        assert_eq!(first, run(None));
        // cold and warm snapshots
        assert_eq!(first, run(Some(snapshots.path().to_path_buf())));
        assert_eq!(first, run(Some(snapshots.path().to_path_buf())));
    }

    #[test]
    fn placement_pipeline() {
        let results = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let node = test_util::node(0.0, 1000.0, 0.0, 3600.0);
        for name in &[
            "star-nonfav-rn_agg-1-2",
            "clique-fav-no_rn-1-2",
            "star-fav-rn_agg-1-2",
        ] {
            test_util::write_experiment(results.path(), name, 2, &[node; 2]);
        }

        placement_energy(
            results.path(),
            output.path(),
            PlacementKey::RnType,
            &LoadOptions::default(),
        )
        .unwrap();

        let total = &read_outputs(output.path())[0];
        assert_eq!(
            total,
            "energy_mean,energy_std,leverage,size,net_tplgy,srv_tplgy,rn_tplgy,srv_tplgy_index,rn_tplgy_index\r\n\
             2.00,0.00,1,2,clique,best,No RN,0,0\r\n\
             2.00,0.00,1,2,clique,worst,No RN,1,1\r\n\
             2.00,0.00,1,2,star,best,best,2,2\r\n\
             2.00,0.00,1,2,star,worst,worst,3,5\r\n"
        );
    }

    #[test]
    fn malformed_identifier_writes_nothing() {
        let results = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::create_dir(results.path().join("clique-fav-1-2")).unwrap();
        assert!(placement_energy(
            results.path(),
            output.path(),
            PlacementKey::RnType,
            &LoadOptions::default(),
        )
        .is_err());
        assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
    }
}
