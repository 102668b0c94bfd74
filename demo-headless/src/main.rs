use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reacting_flow_core::{
    CellDomain, ConvectiveCoefficient, GasCellState, Kelvin, Kilograms, KineticsConfig,
    KineticsSession, Particle, PipelineOptions, Seconds, SourceEquation, Species,
    SpeciesMassFractions, StepPipeline, Vec3,
};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Headless reacting-flow kinetics demo: a row of methane/air cells seeded with salt particles
#[derive(Parser, Debug)]
#[command(name = "reacting-flow-demo")]
#[command(about = "Two-phase kinetics kernel demo", long_about = None)]
struct Args {
    /// Number of gas cells
    #[arg(short, long, default_value_t = 8)]
    cells: usize,

    /// Particles per cell
    #[arg(short, long, default_value_t = 50)]
    particles: usize,

    /// Number of steps
    #[arg(short, long, default_value_t = 200)]
    steps: u32,

    /// Time step in seconds
    #[arg(long, default_value_t = 1e-3)]
    dt: f64,

    /// Gas temperature of the hottest cell in K (cells ramp down from it)
    #[arg(short, long, default_value_t = 1800.0)]
    temperature: f64,

    /// Initial particle mass in kg
    #[arg(long, default_value_t = 1e-7)]
    particle_mass: f64,

    /// Fixed convective coefficient in W/(m²·K) (default: Ranz-Marshall)
    #[arg(long)]
    fixed_h: Option<f64>,

    /// RNG seed for particle placement
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON parameter file; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report every N steps
    #[arg(short, long, default_value_t = 50)]
    report_interval: u32,

    /// Run validation checks instead of the demo
    #[arg(short, long)]
    validate: bool,
}

fn load_config(path: Option<&Path>) -> Result<KineticsConfig, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(KineticsConfig::default());
    };
    let text = fs::read_to_string(path)?;
    let config: KineticsConfig = serde_json::from_str(&text)?;
    info!("Loaded parameters from {}", path.display());
    Ok(config)
}

/// Stratified methane/air cells, hottest first
fn build_cells(args: &Args) -> Vec<GasCellState> {
    (0..args.cells)
        .map(|i| {
            let fraction = i as f64 / args.cells.max(1) as f64;
            let temperature = 300.0 + (args.temperature - 300.0) * (1.0 - fraction);
            let y_fuel = 0.02 + 0.04 * fraction;
            let mut cell = GasCellState::air(Kelvin::new(temperature), 1e-6);
            cell.mass_fractions = SpeciesMassFractions::from_pairs(&[
                (Species::CH4, y_fuel),
                (Species::O2, 0.233 * (1.0 - y_fuel)),
                (Species::N2, 0.767 * (1.0 - y_fuel)),
            ]);
            cell.velocity = Vec3::new(2.0, 0.0, 0.0);
            cell.turbulent_kinetic_energy = 0.5 + fraction;
            cell.dissipation_rate = 10.0 + 40.0 * fraction;
            cell
        })
        .collect()
}

fn seed_particles(args: &Args, domain: &mut CellDomain) -> Result<(), Box<dyn Error>> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut id = 0;
    for cell in 0..args.cells {
        for _ in 0..args.particles {
            let mass = args.particle_mass * rng.random_range(0.5..1.5);
            let slip = Vec3::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0), 0.0);
            let particle =
                Particle::new(id, cell, Kelvin::new(300.0), Kilograms::new(mass), 2200.0, 1100.0)
                    .with_velocity(slip);
            domain.insert_particle(particle)?;
            id += 1;
        }
    }
    Ok(())
}

fn run_demo(args: &Args) -> Result<(), Box<dyn Error>> {
    println!("=== Reacting Flow Kinetics Demo ===\n");

    if !(args.dt.is_finite() && args.dt > 0.0) {
        return Err(format!("time step must be positive, got {}", args.dt).into());
    }

    let config = load_config(args.config.as_deref())?;
    let mut session = KineticsSession::new(config)?;

    let mut domain = CellDomain::new(build_cells(args));
    seed_particles(args, &mut domain)?;
    println!(
        "Created {} cells with {} particles ({:.1e} kg nominal)",
        args.cells,
        domain.particles().len(),
        args.particle_mass
    );

    let options = PipelineOptions {
        convective_coefficient: args
            .fixed_h
            .map_or(ConvectiveCoefficient::RanzMarshall, ConvectiveCoefficient::Fixed),
        ..PipelineOptions::default()
    };
    let pipeline = StepPipeline::new(options);
    let dt = Seconds::new(args.dt);
    let initial_mass: f64 = domain.particles().iter().map(|p| *p.mass).sum();

    for step in 1..=args.steps {
        let output = pipeline.run(&mut session, &mut domain, dt)?;

        if step % args.report_interval.max(1) == 0 || step == args.steps {
            let energy: f64 = output
                .sources
                .iter()
                .map(|s| s.get(SourceEquation::Energy))
                .sum();
            let water: f64 = output.sources.iter().map(|s| s.get(SourceEquation::H2O)).sum();
            let mean_temperature = domain
                .particles()
                .iter()
                .map(|p| *p.temperature)
                .sum::<f64>()
                / domain.particles().len().max(1) as f64;
            println!(
                "[t={:.3}s] mean Tp {:.1} K, Σ energy source {:.3e} W/m³, Σ H2O source {:.3e} kg/(m³·s), limited {}/{}",
                f64::from(step) * args.dt,
                mean_temperature,
                energy,
                water,
                output.diagnostics.dehydration_limited,
                output.diagnostics.denitration_limited
            );
        }
    }

    let remaining: f64 = domain.particles().iter().map(|p| *p.mass).sum();
    let totals = session.totals();
    println!("\n=== Summary ===");
    println!("Steps: {}", session.steps());
    println!(
        "Particle mass: {:.3e} kg -> {:.3e} kg ({:.1}% released)",
        initial_mass,
        remaining,
        100.0 * (1.0 - remaining / initial_mass.max(f64::MIN_POSITIVE))
    );
    println!("Combustion energy: {:.3e} J", totals.combustion_energy);
    println!("Decomposition energy: {:.3e} J", totals.decomposition_energy);
    println!("Rate clamps: {}", totals.clamp_events);
    if totals.clamp_events > 0 {
        warn!("{} reaction rates were floored at zero", totals.clamp_events);
    }
    Ok(())
}

fn check(name: &str, passed: bool, detail: &str) -> bool {
    if passed {
        println!("  PASS: {name} ({detail})");
    } else {
        println!("  FAIL: {name} ({detail})");
    }
    passed
}

fn run_validation() -> Result<bool, Box<dyn Error>> {
    println!("=== Kinetics Validation ===\n");
    let mut session = KineticsSession::new(KineticsConfig::default())?;
    let mut all = true;

    println!("Test 1: Oxidizer-starved cell");
    let mut starved = GasCellState::air(Kelvin::new(1800.0), 1e-6);
    starved.mass_fractions =
        SpeciesMassFractions::from_pairs(&[(Species::CH4, 0.1), (Species::N2, 0.9)]);
    let rates = session.gas_reaction_rates(&starved);
    all &= check(
        "no oxygen, no fuel oxidation",
        rates.fuel_oxidation == 0.0,
        &format!("{:.3e} mol/(m³·s)", rates.fuel_oxidation),
    );

    println!("\nTest 2: Salt particle mass budget");
    let gas = GasCellState::air(Kelvin::new(1500.0), 1e-6);
    let mut particle =
        Particle::new(0, 0, Kelvin::new(1500.0), Kilograms::new(1e-9), 2200.0, 1100.0);
    let mut released = 0.0;
    for _ in 0..20 {
        let update = session.update_particle(&mut particle, &gas, 100.0, 10.0)?;
        released += update.rates.total() * 10.0;
    }
    let composition = particle.composition;
    all &= check(
        "components stay non-negative",
        composition.hydrate_mass >= 0.0
            && composition.anhydrous_salt_mass >= 0.0
            && composition.oxide_mass >= 0.0,
        &format!(
            "hydrate {:.2e}, salt {:.2e}",
            composition.hydrate_mass, composition.anhydrous_salt_mass
        ),
    );
    all &= check(
        "released mass bounded by initial mass",
        released <= 1e-9 * (1.0 + 1e-9),
        &format!("{released:.3e} kg"),
    );

    println!("\nTest 3: Quiescent EDC closure");
    let mut quiescent = GasCellState::air(Kelvin::new(1200.0), 1e-6);
    quiescent.turbulent_kinetic_energy = 0.0;
    quiescent.dissipation_rate = 0.0;
    let edc = session.edc_closure(&quiescent);
    all &= check(
        "no fine structures without turbulence",
        edc.reacting_volume_fraction == 0.0 && !edc.is_reacting(),
        &format!("τ* = {:.1e} s", edc.mixing_time_scale),
    );

    println!("\n=== Validation {} ===", if all { "Passed" } else { "Failed" });
    Ok(all)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if args.validate {
        if !run_validation()? {
            return Err("validation failed".into());
        }
        return Ok(());
    }
    run_demo(&args)
}
