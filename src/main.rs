use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use workshop_sim::simulation::{export_simulation, generate_summary, run_simulation, SimulationParams};

#[derive(Parser, Debug)]
#[command(name = "workshop_sim")]
#[command(about = "Run the crafting-workshop economy simulation")]
struct Args {
    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of simulation ticks to run
    #[arg(short, long, default_value = "600")]
    ticks: u64,

    /// Number of customer slots on the order board
    #[arg(long)]
    slots: Option<usize>,

    /// Number of production machines
    #[arg(long)]
    machines: Option<u32>,

    /// Chance that a crafted item comes out defective (0.0 - 1.0)
    #[arg(long)]
    defect_chance: Option<f32>,

    /// Simulated seconds per tick
    #[arg(long)]
    tick_seconds: Option<f32>,

    /// Export final state to a JSON file (e.g., "run.json")
    #[arg(long)]
    export: Option<String>,

    /// Print recent activity after the run
    #[arg(long)]
    log: bool,
}

fn main() {
    let args = Args::parse();

    let mut params = SimulationParams::default();
    if let Some(slots) = args.slots {
        params.customer_slots = slots;
    }
    if let Some(machines) = args.machines {
        params.machine_count = machines;
    }
    if let Some(chance) = args.defect_chance {
        params.defect_chance = chance.clamp(0.0, 1.0);
    }
    if let Some(seconds) = args.tick_seconds {
        params.seconds_per_tick = seconds.max(0.01);
    }

    // Initialize RNG
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    println!("Running workshop with seed: {}", seed);
    println!(
        "{} ticks, {} slots, {} machines",
        args.ticks, params.customer_slots, params.machine_count
    );

    let state = run_simulation(&params, args.ticks, seed, &mut rng);

    println!();
    println!("{}", generate_summary(&state));

    if args.log {
        println!("--- Recent Activity ---");
        for entry in state.activity.recent_entries(20).into_iter().rev() {
            println!(
                "[{}] tick {}: {}",
                entry.category.label(),
                entry.tick,
                entry.message
            );
        }
    }

    if let Some(path) = args.export {
        match export_simulation(&state, &path) {
            Ok(()) => println!("Exported final state to {}", path),
            Err(e) => eprintln!("Failed to export state: {}", e),
        }
    }
}
