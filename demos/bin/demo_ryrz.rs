//! RYRZ Template Demo
//!
//! Builds the RYRZ two-local template, reports its parameter accounting,
//! serializes it to QASM3, and binds a random point within the parameter
//! bounds.

use anyhow::Result;
use clap::Parser;
use rand::Rng;
use tracing::info;

use alsvid_ansatz::{Entanglement, EntanglerGate, RyRz};
use alsvid_demos::{print_header, print_result, print_section};
use alsvid_ir::{Circuit, QubitId};

#[derive(Parser, Debug)]
#[command(name = "demo-ryrz")]
#[command(about = "Build and inspect the RYRZ two-local template")]
struct Args {
    /// Number of qubits
    #[arg(short, long, default_value = "4")]
    qubits: u32,

    /// Number of rotation/entanglement layer repetitions
    #[arg(short, long, default_value = "2")]
    reps: u32,

    /// Entanglement topology (full, linear, reverse_linear, circular,
    /// pairwise, sca)
    #[arg(short, long, default_value = "full")]
    entanglement: String,

    /// Entangler gate (cz, cx, crx, rzz, ...)
    #[arg(short = 'g', long, default_value = "cz")]
    entangler: String,

    /// Skip the trailing rotation layer
    #[arg(long)]
    skip_final_rotation_layer: bool,

    /// Only rotate qubits that are entangled
    #[arg(long)]
    skip_unentangled_qubits: bool,

    /// Insert barriers between layers
    #[arg(long)]
    barriers: bool,

    /// Parameter-name prefix
    #[arg(long, default_value = "θ")]
    prefix: String,

    /// Prepend an X on the first N qubits (reference-state preparation)
    #[arg(long, default_value = "0")]
    excitations: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    print_header("RYRZ Two-Local Template Demo");

    let entanglement: Entanglement = args.entanglement.parse()?;
    let entangler: EntanglerGate = args.entangler.parse()?;

    let mut ansatz = RyRz::new(args.qubits)
        .with_reps(args.reps)
        .with_entanglement(entanglement)
        .with_entanglement_blocks(vec![entangler.into()])
        .with_skip_final_rotation_layer(args.skip_final_rotation_layer)
        .with_skip_unentangled_qubits(args.skip_unentangled_qubits)
        .with_insert_barriers(args.barriers)
        .with_parameter_prefix(args.prefix.as_str());

    if args.excitations > 0 {
        let mut reference = Circuit::with_size("reference", args.excitations, 0);
        for i in 0..args.excitations {
            reference.x(QubitId(i))?;
        }
        ansatz = ansatz.with_initial_state(reference);
    }

    print_section("Configuration");
    print_result("Qubits", args.qubits);
    print_result("Repetitions", args.reps);
    print_result("Entanglement", &args.entanglement);
    print_result("Entangler", &args.entangler);

    print_section("Parameters");
    let num_parameters = ansatz.num_parameters()?;
    let bounds = ansatz.parameter_bounds()?;
    print_result("Free parameters", num_parameters);
    if let Some((lower, upper)) = bounds.first() {
        print_result("Bounds (each)", format!("({lower:.4}, {upper:.4})"));
    }

    info!(num_parameters, "building template");
    let circuit = ansatz.build()?;
    print_result("Circuit depth", circuit.depth());

    print_section("QASM3");
    println!("{}", alsvid_qasm3::emit(&circuit)?);

    print_section("Bound at a random point");
    let mut rng = rand::thread_rng();
    let values: Vec<f64> = bounds
        .iter()
        .map(|&(lower, upper)| rng.gen_range(lower..upper))
        .collect();
    let bound = circuit.assign(&values)?;
    println!("{}", alsvid_qasm3::emit(&bound)?);

    Ok(())
}
