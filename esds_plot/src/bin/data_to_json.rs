use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use esds_exp::ExperimentLayout;
use esds_plot::{LoadOptions, ResultsDB};

// folder where the simulator stored all results
const RESULTS_DIR: &str = "simulation_metrics";

// how experiment folders are named; detected from the first one if not set
const LAYOUT: Option<ExperimentLayout> = None;

const OUTPUT_FILE: &str = "catalog.json";

fn main() -> Result<(), Report> {
    color_eyre::install()?;
    esds_plot::init_tracing();

    let layout = match LAYOUT {
        Some(layout) => layout,
        None => ResultsDB::detect_layout(RESULTS_DIR)?,
    };
    let db = ResultsDB::load(RESULTS_DIR, layout, &LoadOptions::default())
        .wrap_err("load results")?;
    db.data_to_json(OUTPUT_FILE)?;
    println!("json: {} ({} experiments)", OUTPUT_FILE, db.len());
    Ok(())
}
