use crate::belief::Belief;
use crate::error::Result;
use crate::history::History;
use crate::traits::Domain;
use crate::Utility;

/// The planning agent: owns its domain models, the prior belief it was
/// born with, the belief it currently holds, and the real
/// action-observation history it has lived through.
pub struct Agent<D: Domain> {
    domain: D,
    prior: Belief<D::S>,
    belief: Belief<D::S>,
    history: History<D::A, D::O>,
}

impl<D: Domain> Agent<D> {
    pub fn new(domain: D, prior: Belief<D::S>) -> Self {
        Self {
            belief: prior.clone(),
            prior,
            domain,
            history: History::default(),
        }
    }

    pub fn domain(&self) -> &D {
        &self.domain
    }
    pub fn prior(&self) -> &Belief<D::S> {
        &self.prior
    }
    pub fn belief(&self) -> &Belief<D::S> {
        &self.belief
    }
    pub fn history(&self) -> &History<D::A, D::O> {
        &self.history
    }

    /// one state drawn from the current belief
    pub fn sample(&self, rng: &mut dyn rand::RngCore) -> Result<D::S> {
        self.belief.sample(rng)
    }
    /// record a real action-observation pair. call this before asking the
    /// planner to update, so the tree can be re-rooted at the new history.
    pub fn extend(&mut self, action: D::A, observation: D::O) {
        self.history.push(action, observation);
    }
    /// replace the current belief wholesale
    pub fn believe(&mut self, belief: Belief<D::S>) {
        self.belief = belief;
    }
}

/// The true world the agent acts in. It holds the hidden state the agent
/// only ever sees through observations; executing an action advances the
/// state through the same generative models the planner simulates with.
pub struct Env<D: Domain> {
    state: D::S,
}

impl<D: Domain> Env<D> {
    pub fn new(state: D::S) -> Self {
        Self { state }
    }
    pub fn state(&self) -> &D::S {
        &self.state
    }
    /// execute a real action: advance the hidden state and hand back what
    /// the agent gets to see
    pub fn act(
        &mut self,
        domain: &D,
        action: &D::A,
        history: &History<D::A, D::O>,
        rng: &mut dyn rand::RngCore,
    ) -> (D::O, Utility) {
        let (next, observation, reward) = domain.step(&self.state, action, history, rng);
        self.state = next;
        (observation, reward)
    }
}
