//! belief representations over hidden states.
//!
//! the agent's belief is either an explicit weighted histogram (useful as
//! a prior) or an unweighted particle multiset (the representation the
//! particle-filter planner maintains online). both support sampling, point
//! density queries, and most-probable-explanation extraction.

mod histogram;
mod particles;

pub use histogram::*;
pub use particles::*;

use crate::error::Result;
use crate::traits::State;
use crate::Probability;

/// an agent-side belief over hidden states.
#[derive(Debug, Clone)]
pub enum Belief<S: State> {
    Histogram(Histogram<S>),
    Particles(Particles<S>),
}

impl<S: State> Belief<S> {
    /// draw one state: weighted for a histogram, uniform for particles
    pub fn sample(&self, rng: &mut dyn rand::RngCore) -> Result<S> {
        match self {
            Belief::Histogram(h) => h.sample(rng).cloned(),
            Belief::Particles(p) => p.sample(rng).cloned(),
        }
    }
    pub fn density(&self, state: &S) -> Probability {
        match self {
            Belief::Histogram(h) => h.density(state),
            Belief::Particles(p) => p.density(state),
        }
    }
    pub fn mpe(&self) -> Result<&S> {
        match self {
            Belief::Histogram(h) => h.mpe(),
            Belief::Particles(p) => p.mpe(),
        }
    }
    pub fn particles(&self) -> Option<&Particles<S>> {
        match self {
            Belief::Particles(p) => Some(p),
            Belief::Histogram(_) => None,
        }
    }
}

impl<S: State> From<Histogram<S>> for Belief<S> {
    fn from(histogram: Histogram<S>) -> Self {
        Belief::Histogram(histogram)
    }
}

impl<S: State> From<Particles<S>> for Belief<S> {
    fn from(particles: Particles<S>) -> Self {
        Belief::Particles(particles)
    }
}
