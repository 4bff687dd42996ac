use super::*;
use crate::history::History;

/// the default policy used to bootstrap leaf values: one valid action for
/// the given state and history, typically cheap and randomized.
pub trait Rollout {
    type S: State;
    type A: Action;
    type O: Observation;
    fn rollout(
        &self,
        state: &Self::S,
        history: &History<Self::A, Self::O>,
        rng: &mut dyn rand::RngCore,
    ) -> Self::A;
}
