use esds_exp::NodeMetrics;
use std::path::Path;

pub fn node(
    tot_reconf_duration: f64,
    node_cons: f64,
    comms_cons: f64,
    global_termination_time: f64,
) -> NodeMetrics {
    NodeMetrics {
        tot_reconf_duration,
        node_cons,
        comms_cons,
        global_termination_time,
    }
}

/// Writes one node file per entry of `nodes` in `run_dir`.
pub fn write_run(run_dir: &Path, nodes: &[NodeMetrics]) {
    std::fs::create_dir_all(run_dir).unwrap();
    for (index, node) in nodes.iter().enumerate() {
        let content = format!(
            "tot_reconf_duration: {:?}\nnode_cons: {:?}\ncomms_cons: {:?}\nglobal_termination_time: {:?}\n",
            node.tot_reconf_duration,
            node.node_cons,
            node.comms_cons,
            node.global_termination_time,
        );
        let path = run_dir.join(NodeMetrics::file_name(index as u64));
        std::fs::write(path, content).unwrap();
    }
}

/// Writes runs `0..runs` of experiment `name`, all with the same nodes.
pub fn write_experiment(
    results_dir: &Path,
    name: &str,
    runs: u64,
    nodes: &[NodeMetrics],
) {
    for run_num in 0..runs {
        let run_dir = results_dir.join(name).join(run_num.to_string());
        write_run(&run_dir, nodes);
    }
}
