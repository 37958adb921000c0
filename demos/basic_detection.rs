//! Basic steady-state detection example
//!
//! Runs the detector over the classic ten-zeros-then-tens signal and prints
//! the output table with the diagnostic corner columns.

use steady_detect::{DetectorParameters, ProgressFn, SteadyStateDetector};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Steady-State Detection Example ===\n");

    // Ten zeros, then a sustained jump to ten.
    let mut samples = vec![0.0_f64; 10];
    samples.extend(std::iter::repeat(10.0).take(40));

    let params = DetectorParameters::default();
    println!(
        "window = {}, weight = {}, thresholds = {} / {}\n",
        params.window_len, params.filter_weight, params.t_crit_lower, params.t_crit_upper
    );

    let mut last_reported = 0;
    let mut detector = SteadyStateDetector::with_reporter(
        params,
        ProgressFn(|fraction: f64| {
            let percent = (fraction * 100.0) as usize;
            if percent / 25 > last_reported / 25 {
                println!("  ... {percent}% processed");
            }
            last_reported = percent;
        }),
    );
    let result = detector.detect(&samples)?;

    println!("\n{:>5} {:>8} {:>7} {:>9}  cursors", "index", "value", "t", "regime");
    for (i, record) in result.records().iter().enumerate() {
        println!(
            "{:>5} {:>8.2} {:>7.3} {:>9} {:?}",
            i + 1,
            record.value,
            record.t_stat,
            record.regime.to_string(),
            record.cursors,
        );
    }

    println!("\nSteady fraction: {:.1}%", result.steady_fraction() * 100.0);
    for (index, from, to) in result.transitions() {
        println!("Transition at index {index}: {from} -> {to}");
    }

    Ok(())
}
