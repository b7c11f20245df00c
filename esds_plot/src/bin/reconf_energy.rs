use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use esds_plot::{LoadOptions, ReconfKey, SnapshotDir};

// folder where the simulator stored all results
const RESULTS_DIR: &str = "simulation_metrics";

// folder where all csv files will be stored
const OUTPUT_DIR: &str = ".";

// if set, experiment data is cached in this folder
const SNAPSHOT_DIR: Option<&str> = None;

// experiments are grouped by leverage; any other parameter can be used
const GROUP_BY: ReconfKey = ReconfKey::Leverage;

fn main() -> Result<(), Report> {
    color_eyre::install()?;
    esds_plot::init_tracing();

    let mut options = LoadOptions::default();
    if let Some(snapshot_dir) = SNAPSHOT_DIR {
        options.snapshot_dir(SnapshotDir::new(snapshot_dir));
    }

    esds_plot::reconf_energy(RESULTS_DIR, OUTPUT_DIR, GROUP_BY, &options)
        .wrap_err("reconf energy")?;
    Ok(())
}
