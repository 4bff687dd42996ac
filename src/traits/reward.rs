use super::*;
use crate::history::History;
use crate::Utility;

/// scalar payoff for taking `action` in `state`, conditioned on the
/// trajectory so far and the sampled successor state.
pub trait Reward {
    type S: State;
    type A: Action;
    type O: Observation;
    fn sample(
        &self,
        state: &Self::S,
        action: &Self::A,
        history: &History<Self::A, Self::O>,
        next: &Self::S,
        rng: &mut dyn rand::RngCore,
    ) -> Utility;
}
