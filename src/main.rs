//! Protocell - Entry Point
//!
//! Headless demo driver: builds a world with a default microbial chemistry,
//! spawns a population of organisms with randomized starting stocks, runs
//! the simulation for a fixed number of ticks, and prints a stock summary.

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use protocell::chemistry::catalog::{defaults, ProcessCatalog};
use protocell::chemistry::profile::{ProcessorProfile, ProfileRegistry};
use protocell::core::error::Result;
use protocell::ecs::world::World;
use protocell::simulation::tick::{run_simulation_tick, SimulationEvent};

#[derive(Parser, Debug)]
#[command(name = "protocell", about = "Metabolic process simulation demo")]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// Number of organisms to spawn
    #[arg(long, default_value_t = 20)]
    organisms: usize,

    /// RNG seed for reproducible initial stocks
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Optional process catalog TOML file (built-in chemistry if omitted)
    #[arg(long)]
    catalog: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "protocell=info".into()),
        )
        .init();

    let args = Args::parse();
    tracing::info!(?args, "Protocell starting");

    let catalog = match &args.catalog {
        Some(path) => ProcessCatalog::load_from_toml(path)?,
        None => ProcessCatalog::with_defaults(),
    };

    // One shared profile: a generalist microbe running the whole chemistry
    let mut profile = ProcessorProfile::new();
    profile.set_threshold(defaults::GLUCOSE, 5.0, 50.0);
    profile.set_threshold(defaults::PYRUVATE, 2.0, 20.0);
    profile.set_threshold(defaults::ATP, 10.0, 80.0);
    profile.set_threshold(defaults::OXYGEN, 5.0, 40.0);
    profile.set_threshold(defaults::CO2, 0.0, 10.0);
    for process in catalog.all() {
        profile.set_capacity(process.id, 1.0);
    }

    let mut profiles = ProfileRegistry::new();
    let profile_id = profiles.register(profile);

    // Spawn the population with randomized but reproducible stocks
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut world = World::new();
    for _ in 0..args.organisms {
        let id = world.spawn_organism();
        let bag = world.bag_mut(id)?;
        bag.give(defaults::GLUCOSE, rng.gen_range(10.0..60.0));
        bag.give(defaults::OXYGEN, rng.gen_range(5.0..30.0));
        bag.give(defaults::ATP, rng.gen_range(0.0..5.0));
        bag.bind_processor(profile_id);
    }

    let mut total_runs = 0usize;
    for _ in 0..args.ticks {
        let events = run_simulation_tick(&mut world, &profiles, &catalog);
        total_runs += events
            .iter()
            .filter(|e| matches!(e, SimulationEvent::ProcessRan { .. }))
            .count();
    }

    tracing::info!(
        ticks = args.ticks,
        organisms = world.entity_count(),
        total_runs,
        "simulation finished"
    );

    println!("\n=== PROTOCELL ===");
    println!(
        "{} organisms, {} ticks, {} process firings",
        world.entity_count(),
        args.ticks,
        total_runs
    );
    println!();
    println!(
        "{:<10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "organism", "glucose", "pyruvate", "atp", "oxygen", "co2"
    );
    for idx in world.organisms.iter_living() {
        let bag = &world.organisms.bags[idx];
        println!(
            "{:<10} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            idx,
            bag.amount(defaults::GLUCOSE),
            bag.amount(defaults::PYRUVATE),
            bag.amount(defaults::ATP),
            bag.amount(defaults::OXYGEN),
            bag.amount(defaults::CO2),
        );
    }

    Ok(())
}
