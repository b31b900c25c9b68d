use biome::simulation::ecosystem::Ecosystem;
use biome::simulation::geometric_utils::Position;
use biome::simulation::params::Params;
use biome::simulation::species::Species;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const TICKS: u32 = 300;

/// Starter population for a forest biome.
const STARTERS: [(Species, f32, f32); 12] = [
    (Species::Tree, 20.0, 20.0),
    (Species::Tree, 32.0, 24.0),
    (Species::Grass, 50.0, 50.0),
    (Species::Grass, 62.0, 55.0),
    (Species::Flower, 75.0, 30.0),
    (Species::Flower, 86.0, 36.0),
    (Species::Rabbit, 40.0, 70.0),
    (Species::Rabbit, 52.0, 74.0),
    (Species::Fox, 20.0, 80.0),
    (Species::Fox, 30.0, 88.0),
    (Species::Fungi, 70.0, 85.0),
    (Species::Beetle, 82.0, 90.0),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let params = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading params");
            Params::load_from_file(&path)?
        }
        None => Params::default(),
    };

    let mut ecosystem = Ecosystem::new(params);
    for (species, x, y) in STARTERS {
        if !ecosystem.place(species, Position::new(x, y)) {
            warn!(%species, x, y, "starter placement rejected");
        }
    }
    info!(population = ecosystem.organisms.len(), "starting simulation");

    let interval = ecosystem.clock().interval_ms();
    for _ in 0..TICKS {
        ecosystem.advance(interval);
    }

    info!(
        ticks = ecosystem.tick_count,
        population = ecosystem.organisms.len(),
        biome_health = ecosystem.biome_health,
        season = %ecosystem.environment.season(),
        "simulation finished"
    );

    println!("{}", serde_json::to_string_pretty(&ecosystem.snapshot())?);
    println!("{}", serde_json::to_string_pretty(ecosystem.stats().history())?);

    Ok(())
}
