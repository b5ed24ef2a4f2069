//! Entanglement Topology Demo
//!
//! Prints the connection lists the named topologies resolve to, layer by
//! layer, for a given qubit count and block size.

use anyhow::Result;
use clap::Parser;

use alsvid_ansatz::Entanglement;
use alsvid_demos::{print_header, print_section};

#[derive(Parser, Debug)]
#[command(name = "demo-entanglement")]
#[command(about = "Show how the named entanglement topologies resolve")]
struct Args {
    /// Number of qubits
    #[arg(short, long, default_value = "4")]
    qubits: u32,

    /// Entangling block size
    #[arg(short, long, default_value = "2")]
    block_size: u32,

    /// Number of layers to resolve
    #[arg(short, long, default_value = "3")]
    layers: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    print_header("Entanglement Topologies");

    let named = [
        ("full", Entanglement::Full),
        ("linear", Entanglement::Linear),
        ("reverse_linear", Entanglement::ReverseLinear),
        ("circular", Entanglement::Circular),
        ("pairwise", Entanglement::Pairwise),
        ("sca", Entanglement::ShiftedCircularAlternating),
    ];

    for (name, topology) in named {
        print_section(name);
        for layer in 0..args.layers {
            let connections = topology.connections(args.qubits, args.block_size, layer)?;
            let rendered: Vec<String> = connections
                .iter()
                .map(|conn| format!("{conn:?}"))
                .collect();
            println!("  layer {layer}: {}", rendered.join(" "));
        }
    }

    Ok(())
}
