pub mod cards;
pub mod gameplay;
pub mod gameroom;
pub mod hosting;

// ============================================================================
// GAME CONSTANTS
// ============================================================================
/// Cards in a full deck: one per combination of the four ternary attributes.
pub const DECK_SIZE: usize = 81;
/// Board size the dealer refills toward after a match.
pub const BOARD_TARGET: usize = 12;
/// Hard cap on board growth while hunting for a playable board.
pub const BOARD_LIMIT: usize = 18;
/// Attempts allowed to stabilize an initial deal before accepting a dead board.
pub const DEAL_RETRIES: usize = 5;

// ============================================================================
// HOSTING POLICY
// ============================================================================
/// Minimum spacing between set attempts from a single connection.
pub const ATTEMPT_COOLDOWN: std::time::Duration = std::time::Duration::from_secs(1);
/// Idle time after which a room becomes eligible for eviction.
pub const IDLE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30 * 60);
/// Interval between registry eviction sweeps.
pub const SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5 * 60);
/// Longest accepted room identifier, in bytes.
pub const ROOM_ID_LIMIT: usize = 64;
/// Longest accepted display name after trimming, in bytes.
pub const NAME_LIMIT: usize = 32;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
pub fn kys() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.unwrap();
        println!();
        log::warn!("violent interrupt received, exiting immediately");
        std::process::exit(0);
    });
}
