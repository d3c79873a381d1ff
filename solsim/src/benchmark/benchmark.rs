use std::time::Instant;

use crate::simulation::engine::{self, Engine};
use crate::simulation::forces::{compute_acceleration, compute_acceleration_par};
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec3, SystemState};

/// Helper to build a deterministic cloud of `n` bodies, no rand needed
fn make_bodies(n: usize) -> (SystemState, Vec<f64>) {
    let x = (0..n)
        .map(|i| {
            let i_f = i as f64;
            NVec3::new(
                (i_f * 0.37).sin() * 5.0,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0,
            )
        })
        .collect();

    (SystemState { x, v: vec![NVec3::zeros(); n] }, vec![1.0; n])
}

/// Sequential vs rayon force evaluation for growing N
pub fn bench_force() {
    let ns = [10, 100, 200, 400, 800, 1600, 3200];
    let (g, softening) = (0.1, 1e-2);

    for n in ns {
        let (state, masses) = make_bodies(n);

        // Warm up
        let _ = compute_acceleration(&state.x, &masses, g, softening);
        let _ = compute_acceleration_par(&state.x, &masses, g, softening);

        let t0 = Instant::now();
        let seq = compute_acceleration(&state.x, &masses, g, softening);
        let dt_seq = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        let par = compute_acceleration_par(&state.x, &masses, g, softening);
        let dt_par = t1.elapsed().as_secs_f64();

        let same = matches!((&seq, &par), (Ok(a), Ok(b)) if a == b);
        println!("N = {n:5}, sequential = {:8.6} s, rayon = {:8.6} s, identical = {}", dt_seq, dt_par, same);
    }
}

/// Cost of a full engine step (leapfrog + energy + recording)
pub fn bench_engine() {
    let ns = [10, 100, 400, 1600];
    let steps = 10;

    println!("N,sequential_ms,rayon_ms");

    for n in ns {
        let (state, masses) = make_bodies(n);
        let params = match Parameters::new(0.1, 1e-2, 1e-3, steps) {
            Ok(p) => p,
            Err(e) => {
                println!("bench_engine: {}", e);
                return;
            }
        };

        let mut row = Vec::with_capacity(2);
        for parallel in [false, true] {
            let engine = Engine { parallel, log_every: 0 };
            let t0 = Instant::now();
            let _ = engine::run(&state, &masses, &params, &engine);
            row.push(t0.elapsed().as_secs_f64() * 1000.0 / steps as f64);
        }

        println!("{},{:.6},{:.6}", n, row[0], row[1]);
    }
}
