//! Shooting Gallery Runtime
//!
//! Headless host for the gallery: builds the obstacle grid, spawns the dolly
//! and drives a scripted input session through the per-frame update.
//!
//! Run with: cargo run -p gallery_runtime
//!       or: cargo run --bin gallery -- --snapshot
//!
//! `--snapshot` prints the final frame snapshot as JSON on stdout.

mod boot_config;
mod game_systems;
mod scene;
mod session;

use boot_config::BootConfig;
use game_systems::GameWorld;
use session::ScriptedSession;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let print_snapshot = std::env::args().skip(1).any(|arg| arg == "--snapshot");

    let config = match BootConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    config.print_summary();

    let mut world = match GameWorld::new(&config) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Failed to build gallery: {}", e);
            std::process::exit(1);
        }
    };

    ScriptedSession::new(&config).run(&mut world);
    log::info!("{}", world.debug_info());

    if print_snapshot {
        match serde_json::to_string_pretty(&world.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }
}
