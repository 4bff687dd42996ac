use super::Pouct;
use super::Settings;
use crate::agent::Agent;
use crate::belief::reinvigorate;
use crate::belief::Belief;
use crate::error::Error;
use crate::error::Result;
use crate::traits::Domain;
use crate::traits::Rollout;
use crate::traits::Transform;
use crate::tree::Branch;
use crate::tree::Tree;

/// POMCP: UCT search plus a particle-filter belief carried on the tree.
///
/// The root holds a copy of the agent's particle belief, and every
/// simulation deposits its sampled state into the successor position it
/// reaches one step below the root. A real step then prunes the tree to
/// the experienced branch, whose accumulated particles become the agent's
/// next belief after reinvigoration. Filtering falls out of search.
pub struct Pomcp<D, R>(Pouct<D, R>)
where
    D: Domain,
    R: Rollout<S = D::S, A = D::A, O = D::O>;

impl<D, R> Pomcp<D, R>
where
    D: Domain,
    R: Rollout<S = D::S, A = D::A, O = D::O>,
{
    pub fn new(settings: Settings, rollout: R) -> Self {
        Self(Pouct::particled(settings, rollout))
    }

    pub fn settings(&self) -> &Settings {
        self.0.settings()
    }
    pub fn tree(&self) -> Option<&Tree<D::S, D::A, D::O>> {
        self.0.tree()
    }

    /// search for the best action at the agent's current history. the
    /// agent's belief must be held in particles.
    pub fn plan(&mut self, agent: &Agent<D>) -> Result<D::A> {
        self.0.plan(agent)
    }

    /// fold one real (action, observation) step into both the tree and
    /// the belief: re-root at the experienced branch, reinvigorate its
    /// accumulated particles back to the prior count, hand the refreshed
    /// belief to the agent, and mirror it onto the new root.
    ///
    /// unlike the sampling planner this cannot recover from a branch that
    /// was never simulated: without the leaf's particles there is nothing
    /// to filter, so an unanticipated observation is particle deprivation.
    pub fn update(
        &mut self,
        agent: &mut Agent<D>,
        action: &D::A,
        observation: &D::O,
        transform: Option<&dyn Transform<D::S>>,
    ) -> Result<()> {
        let target = match agent.prior().particles() {
            Some(particles) => particles.len(),
            None => return Err(Error::BeliefMismatch),
        };
        if agent.belief().particles().is_none() {
            return Err(Error::BeliefMismatch);
        }
        let Some(tree) = self.0.take_tree() else {
            log::warn!("nothing planned at this history, nothing to filter");
            return Err(Error::ParticleDeprivation);
        };
        if agent.history().len() != tree.history().len() + 1 {
            return Err(Error::InvalidHistory);
        }
        let keep = tree
            .follow(tree.root(), &Branch::Choice(action.clone()))
            .and_then(|child| tree.follow(child, &Branch::Signal(observation.clone())))
            .ok_or(Error::ParticleDeprivation)?;
        let mut tree = tree.adopt(keep, agent.history().clone(), true);
        let ref stale = tree
            .belief(tree.root())
            .cloned()
            .ok_or(Error::ParticleDeprivation)?;
        let refreshed = reinvigorate(stale, target, transform, self.0.rng())?;
        log::debug!(
            "filtered {} particles up to {} over {} tree vertices",
            stale.len(),
            refreshed.len(),
            tree.size()
        );
        agent.believe(Belief::from(refreshed.clone()));
        tree.endow(tree.root(), refreshed);
        self.0.set_tree(tree);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::belief::Histogram;
    use crate::belief::Particles;
    use crate::tiger::Act;
    use crate::tiger::Den;
    use crate::tiger::Growl;
    use crate::tiger::Tiger;

    fn uniform(doors: u8, n: usize) -> Particles<Tiger> {
        Particles::from((0..n).map(|i| Tiger(i as u8 % doors)).collect::<Vec<_>>())
    }

    fn settings(sims: usize, seed: u64) -> Settings {
        Settings {
            max_depth: 5,
            num_sims: Some(sims),
            discount: 0.95,
            seed: Some(seed),
            ..Settings::default()
        }
    }

    #[test]
    fn listens_twice_then_opens_the_other_door() {
        let den = Den::new(2, 0.1);
        let mut agent = Agent::new(den.clone(), Belief::from(uniform(2, 1000)));
        let mut pomcp = Pomcp::new(settings(20_000, 7), den);
        let first = pomcp.plan(&agent).unwrap();
        assert_eq!(first, Act::Listen);
        agent.extend(Act::Listen, Growl(0));
        pomcp
            .update(&mut agent, &Act::Listen, &Growl(0), None)
            .unwrap();
        pomcp.plan(&agent).unwrap();
        agent.extend(Act::Listen, Growl(0));
        pomcp
            .update(&mut agent, &Act::Listen, &Growl(0), None)
            .unwrap();
        let third = pomcp.plan(&agent).unwrap();
        assert_eq!(third, Act::Open(1));
    }

    #[test]
    fn successor_beliefs_fill_with_consistent_states() {
        let den = Den::new(2, 0.1);
        let agent = Agent::new(den.clone(), Belief::from(uniform(2, 100)));
        let mut pomcp = Pomcp::new(settings(2_000, 3), den);
        pomcp.plan(&agent).unwrap();
        let tree = pomcp.tree().unwrap();
        let heard = tree
            .follow(tree.root(), &Branch::Choice(Act::Listen))
            .and_then(|child| tree.follow(child, &Branch::Signal(Growl(0))))
            .unwrap();
        let belief = tree.belief(heard).unwrap();
        let zeros = belief.iter().filter(|s| **s == Tiger(0)).count();
        let ones = belief.iter().filter(|s| **s == Tiger(1)).count();
        assert!(zeros > 0);
        assert!(zeros > 3 * ones);
    }

    #[test]
    fn updates_reinvigorate_to_the_prior_count() {
        let den = Den::new(2, 0.1);
        let mut agent = Agent::new(den.clone(), Belief::from(uniform(2, 500)));
        let mut pomcp = Pomcp::new(settings(2_000, 5), den);
        pomcp.plan(&agent).unwrap();
        agent.extend(Act::Listen, Growl(0));
        pomcp
            .update(&mut agent, &Act::Listen, &Growl(0), None)
            .unwrap();
        let filtered = agent.belief().particles().unwrap();
        assert!(filtered.len() >= 500);
        let tree = pomcp.tree().unwrap();
        assert_eq!(tree.history().len(), 1);
        assert_eq!(tree.belief(tree.root()).unwrap().len(), filtered.len());
    }

    #[test]
    fn unanticipated_observations_are_deprivation() {
        let den = Den::new(2, 0.1);
        let mut agent = Agent::new(den.clone(), Belief::from(uniform(2, 10)));
        let mut pomcp = Pomcp::new(settings(1, 0), den);
        let action = pomcp.plan(&agent).unwrap();
        agent.extend(action.clone(), Growl(0));
        assert!(matches!(
            pomcp.update(&mut agent, &action, &Growl(0), None),
            Err(Error::ParticleDeprivation)
        ));
    }

    #[test]
    fn updates_before_planning_are_deprivation() {
        let den = Den::new(2, 0.1);
        let mut agent = Agent::new(den.clone(), Belief::from(uniform(2, 10)));
        let mut pomcp = Pomcp::new(settings(16, 0), den);
        agent.extend(Act::Listen, Growl(0));
        assert!(matches!(
            pomcp.update(&mut agent, &Act::Listen, &Growl(0), None),
            Err(Error::ParticleDeprivation)
        ));
    }

    #[test]
    fn histogram_beliefs_are_rejected() {
        let den = Den::new(2, 0.1);
        let mut agent = Agent::new(
            den.clone(),
            Belief::from(Histogram::uniform(Tiger::all(2))),
        );
        let mut pomcp = Pomcp::new(settings(16, 0), den);
        assert!(matches!(pomcp.plan(&agent), Err(Error::BeliefMismatch)));
        agent.extend(Act::Listen, Growl(0));
        assert!(matches!(
            pomcp.update(&mut agent, &Act::Listen, &Growl(0), None),
            Err(Error::BeliefMismatch)
        ));
    }
}
