// fsmcheck: headless cycle analysis for saved .fsm graphs
// Build with: cargo build --features cli --bin fsmcheck

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use fsmedit::analysis::cycles::CycleAnalysis;
use fsmedit::graph_utils::graph::GraphModel;
use fsmedit::persistence::persist;

fn main() {
    env_logger::init();

    let matches = Command::new("fsmcheck")
        .about("Load a saved FSM diagram and list the simple cycles from its start node")
        .arg(
            Arg::new("file")
                .required(true)
                .value_name("FILE")
                .help("Graph file (.fsm)"),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .value_name("LABEL")
                .help("Start from the node with this label instead of the saved start node"),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .action(ArgAction::SetTrue)
                .help("List node labels and exit"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Print only the cycle paths"),
        )
        .get_matches();

    let file = PathBuf::from(matches.get_one::<String>("file").unwrap());
    let start_label = matches.get_one::<String>("start").cloned();
    let list = matches.get_flag("list");
    let quiet = matches.get_flag("quiet");

    let path = persist::with_extension(&file);
    let snapshot = match persist::load(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("failed to load '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    };
    let graph = GraphModel::from_snapshot(snapshot);

    if list {
        for node in graph.nodes() {
            let label = if node.label.is_empty() {
                "(unnamed)"
            } else {
                node.label.as_str()
            };
            let marker = if graph.start_node() == Some(node.id) {
                " *start"
            } else {
                ""
            };
            println!("{}{}", label, marker);
        }
        return;
    }

    let start = match &start_label {
        Some(label) => match graph.node_by_label(label) {
            Some(id) => id,
            None => {
                eprintln!("no node labeled '{}'", label);
                std::process::exit(1);
            }
        },
        None => match graph.start_node() {
            Some(id) => id,
            None => {
                eprintln!("graph has no start node; pass --start LABEL");
                std::process::exit(1);
            }
        },
    };

    let analysis = CycleAnalysis::analyze(&graph, start);
    if analysis.is_empty() {
        if !quiet {
            println!("No loops found.");
        }
        return;
    }
    let count = analysis.count();
    for i in 0..count {
        if quiet {
            println!("{}", analysis.describe(&graph, i));
        } else {
            println!("Loop {} of {}: {}", i + 1, count, analysis.describe(&graph, i));
        }
    }
}
