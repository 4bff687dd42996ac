use super::*;

/// observation emission: what the agent perceives after the world has
/// moved to `next` under `action`.
pub trait Emission {
    type S: State;
    type A: Action;
    type O: Observation;
    fn sample(&self, next: &Self::S, action: &Self::A, rng: &mut dyn rand::RngCore) -> Self::O;
}
