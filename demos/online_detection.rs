//! Sample-at-a-time detection example
//!
//! Feeds a noisy level change into the online detector and reports each
//! regime transition as it happens.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use steady_detect::{DetectorParameters, OnlineSteadyStateDetector, Regime};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Online Steady-State Detection Example ===\n");

    let mut rng = StdRng::seed_from_u64(7);
    let signal: Vec<f64> = (0..300)
        .map(|i| {
            let level = if i < 150 { 20.0 } else { 35.0 };
            level + rng.gen_range(-0.2..0.2)
        })
        .collect();

    let mut online = OnlineSteadyStateDetector::new(DetectorParameters::default())?;
    let mut previous = Regime::Unknown;

    for (i, &value) in signal.iter().enumerate() {
        let record = online.push(value)?;
        if record.regime != previous {
            println!(
                "index {:>3}: {} -> {} (t = {:.3})",
                i + 1,
                previous,
                record.regime,
                record.t_stat
            );
            previous = record.regime;
        }
    }

    println!("\nFinal regime: {}", online.current_regime());
    Ok(())
}
