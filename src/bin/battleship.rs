//! Battleship Binary
//!
//! Hunts a hidden fleet with a particle-filter planner, reinvigorating
//! the belief after every real shot with history-coherent fleet shuffles.

use pomcp::agent::Agent;
use pomcp::agent::Env;
use pomcp::battleship::Fleet;
use pomcp::battleship::Ocean;
use pomcp::battleship::Shuffle;
use pomcp::belief::Belief;
use pomcp::belief::Particles;
use pomcp::planner::Pomcp;
use pomcp::planner::Settings;
use rand::rngs::SmallRng;
use rand::SeedableRng;

const PARTICLES: usize = 1000;
const STEPS: usize = 100;

fn main() -> anyhow::Result<()> {
    pomcp::log();
    let ref mut rng = SmallRng::from_os_rng();
    let mut env = Env::new(Fleet::roll(rng));
    let prior = (0..PARTICLES).map(|_| Fleet::roll(rng)).collect::<Vec<_>>();
    let mut agent = Agent::new(Ocean, Belief::from(Particles::from(prior)));
    let settings = Settings {
        max_depth: 8,
        num_sims: Some(20_000),
        discount: 1.,
        exploration: 10.,
        ..Settings::default()
    };
    let mut planner = Pomcp::new(settings, Ocean);
    for step in 1..=STEPS {
        let action = planner.plan(&agent)?;
        let (observation, reward) = env.act(agent.domain(), &action, agent.history(), rng);
        log::info!("step {}: {} -> {} ({:+.0})", step, action, observation, reward);
        agent.extend(action, observation);
        let ref shuffle = Shuffle::from(agent.history().clone());
        planner.update(&mut agent, &action, &observation, Some(shuffle))?;
        println!("{}", env.state().render(agent.history()));
        if reward > 0. {
            log::info!("fleet sunk in {} shots", step);
            break;
        }
    }
    Ok(())
}
