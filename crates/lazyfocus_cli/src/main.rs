//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lazyfocus_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use lazyfocus_core::{format_clock, tips, TimerPreset};

fn main() {
    println!("lazyfocus_core ping={}", lazyfocus_core::ping());
    println!("lazyfocus_core version={}", lazyfocus_core::core_version());

    for preset in TimerPreset::ALL {
        println!(
            "preset minutes={} clock={}",
            preset.minutes(),
            format_clock(preset.seconds())
        );
    }
    for tip in tips::tips() {
        println!("tip id={} title={}", tip.id, tip.title);
    }
}
