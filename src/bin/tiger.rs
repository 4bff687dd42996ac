//! Tiger Binary
//!
//! Plays the two-door tiger puzzle: a particle-filter planner listens
//! until it is confident, then commits to a door against a hidden true
//! state.

use pomcp::agent::Agent;
use pomcp::agent::Env;
use pomcp::belief::Belief;
use pomcp::belief::Histogram;
use pomcp::belief::Particles;
use pomcp::planner::Pomcp;
use pomcp::planner::Settings;
use pomcp::tiger::Act;
use pomcp::tiger::Den;
use pomcp::tiger::Tiger;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

const DOORS: u8 = 2;
const NOISE: f64 = 0.1;
const PARTICLES: usize = 1000;
const STEPS: usize = 10;

fn main() -> anyhow::Result<()> {
    pomcp::log();
    let ref mut rng = SmallRng::from_os_rng();
    let den = Den::new(DOORS, NOISE);
    let mut env = Env::new(Tiger(rng.random_range(0..DOORS)));
    let prior = Particles::from_histogram(&Histogram::uniform(Tiger::all(DOORS)), PARTICLES, rng)?;
    let mut agent = Agent::new(den.clone(), Belief::from(prior));
    let settings = Settings {
        max_depth: 5,
        num_sims: Some(5_000),
        discount: 0.95,
        ..Settings::default()
    };
    let mut planner = Pomcp::new(settings, den);
    for step in 1..=STEPS {
        let action = planner.plan(&agent)?;
        let (observation, reward) = env.act(agent.domain(), &action, agent.history(), rng);
        log::info!("step {}: {} -> {} ({:+.0})", step, action, observation, reward);
        if let Act::Open(door) = action {
            match reward > 0. {
                true => log::info!("door {} was safe after all", door),
                false => log::warn!("mauled at door {}", door),
            }
            break;
        }
        agent.extend(action, observation);
        planner.update(&mut agent, &action, &observation, None)?;
    }
    Ok(())
}
