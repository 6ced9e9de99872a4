//! Pulse Demo
//!
//! Defines two states, relates them with a seeded transition, excites
//! twice, then prints the observation and the full history.
//!
//! Set `RUST_LOG=absolute_core=trace` to watch each relation fire.
//! Pass a RON config path as the first argument to override the limits.

use absolute_core::{Kernel, KernelConfig};
use absolute_journal::{ExportFormat, Exporter, Reconstructor};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => KernelConfig::from_ron(&std::fs::read_to_string(path)?)?,
        None => KernelConfig::new()
            .with_max_units(200)
            .with_pulse_size(1)
            .with_seed(42),
    };

    println!("=== Absolute Kernel Pulse Demo ===\n");
    let mut kernel = Kernel::new(config)?;

    kernel.define_state("A", 1)?;
    kernel.define_state("B", 2)?;

    kernel.relate("A", "B", |a, b, rng| {
        if rng.next_f64() > 0.5 {
            a.checked_add(b)
        } else {
            None
        }
    })?;

    kernel.excite()?;
    kernel.excite()?;

    let observation = kernel.observe()?;
    println!("Observation:");
    for (id, value) in &observation {
        println!("  {} = {}", id, value);
    }
    println!(
        "\nUnits used: {} / {}",
        kernel.units_used(),
        kernel.constraints().max_units()
    );

    let trace = kernel.replay();
    let verified = Reconstructor::new(&trace).verify_observations()?;
    println!("Observations verified against trace: {}\n", verified);

    print!("{}", Exporter::new(&trace).export(ExportFormat::Text)?);
    Ok(())
}
