use super::*;

/// state evolution under an action. may be deterministic or stochastic
/// through the supplied rng; pure with respect to (state, action) otherwise.
pub trait Transition {
    type S: State;
    type A: Action;
    fn sample(&self, state: &Self::S, action: &Self::A, rng: &mut dyn rand::RngCore) -> Self::S;
}
