use std::sync::atomic::AtomicBool;
use std::time::Instant;

use exact_sim::{exact_observables, partition_function, EnumerationConfig, ModelParams};

const SHAPES: [(usize, usize); 4] = [(3, 3), (4, 4), (4, 5), (5, 5)];
const N_TEMPS: usize = 16;

fn main() {
    let params = ModelParams::new(1.0, 0.0);
    let betas: Vec<f64> = (0..N_TEMPS)
        .map(|i| 0.1 + 0.9 * i as f64 / (N_TEMPS - 1) as f64)
        .collect();

    println!("Temps: {}  |  J = {}  |  h = {}", N_TEMPS, params.coupling, params.field);
    println!("{}", "-".repeat(70));

    for (n_rows, n_cols) in SHAPES {
        let config = EnumerationConfig::new(n_rows, n_cols);
        let n_configs = 1u64 << config.n_sites();

        let t0 = Instant::now();
        partition_function(&config, &params, 1.0).unwrap();
        let single = t0.elapsed().as_secs_f64();

        let t0 = Instant::now();
        exact_observables(&config, &params, &betas, &AtomicBool::new(false), &|_| {}).unwrap();
        let ladder = t0.elapsed().as_secs_f64();

        println!(
            "{}x{}  |  Z: {:.3} s ({:.1} ns/config)  |  ladder: {:.3} s ({:.1} ns/config)",
            n_rows,
            n_cols,
            single,
            single / n_configs as f64 * 1e9,
            ladder,
            ladder / n_configs as f64 * 1e9,
        );
    }
}
