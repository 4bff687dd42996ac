use super::*;
use crate::history::History;
use crate::Utility;

/// the full set of generative models the planner consumes, bundled behind
/// associated types so a planner can be generic over one parameter. a
/// domain is free to implement every model trait on a single struct and
/// hand out `&self` from each accessor.
pub trait Domain {
    type S: State;
    type A: Action;
    type O: Observation;
    type T: Transition<S = Self::S, A = Self::A>;
    type Z: Emission<S = Self::S, A = Self::A, O = Self::O>;
    type R: Reward<S = Self::S, A = Self::A, O = Self::O>;
    type P: Policy<S = Self::S, A = Self::A, O = Self::O>;

    fn transition(&self) -> &Self::T;
    fn emission(&self) -> &Self::Z;
    fn reward(&self) -> &Self::R;
    fn policy(&self) -> &Self::P;

    /// one black-box generative step: successor state, then reward
    /// conditioned on it, then the percept it emits.
    fn step(
        &self,
        state: &Self::S,
        action: &Self::A,
        history: &History<Self::A, Self::O>,
        rng: &mut dyn rand::RngCore,
    ) -> (Self::S, Self::O, Utility) {
        let next = self.transition().sample(state, action, rng);
        let reward = self.reward().sample(state, action, history, &next, rng);
        let observation = self.emission().sample(&next, action, rng);
        (next, observation, reward)
    }
}
