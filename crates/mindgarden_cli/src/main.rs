//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `mindgarden_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use mindgarden_core::db::open_db_in_memory;
use mindgarden_core::{cycle_len, CYCLE};

fn main() {
    // Why: keep a tiny CLI probe to validate core crate wiring independently
    // from mobile shell runtime setup.
    println!("mindgarden_core ping={}", mindgarden_core::ping());
    println!("mindgarden_core version={}", mindgarden_core::core_version());

    println!("breathing cycle_seconds={}", cycle_len().as_secs());
    for phase in CYCLE {
        println!(
            "breathing phase={} seconds={}",
            phase.instruction(),
            phase.duration().as_secs()
        );
    }

    match open_db_in_memory() {
        Ok(_) => println!("storage probe=ok"),
        Err(err) => println!("storage probe=failed error={err}"),
    }
}
