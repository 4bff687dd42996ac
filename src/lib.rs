pub mod agent;
pub mod battleship;
pub mod belief;
pub mod error;
pub mod history;
pub mod planner;
pub mod tiger;
pub mod traits;
pub mod tree;

/// dimensional analysis types
pub type Utility = f64;
pub type Probability = f64;

// planner defaults
const DEFAULT_MAX_DEPTH: usize = 5;
const DEFAULT_DISCOUNT: Utility = 0.9;
const DEFAULT_EXPLORATION: Utility = std::f64::consts::SQRT_2;
const DEFAULT_VALUE_INIT: Utility = 0.;
const DEFAULT_VISITS_INIT: usize = 0;
const DEFAULT_BUDGET_SECS: u64 = 1;

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random() -> Self;
}

/// initialize terminal logging
pub fn log() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}
