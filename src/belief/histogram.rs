use crate::error::Error;
use crate::error::Result;
use crate::traits::State;
use crate::Probability;
use rand::seq::IndexedRandom;
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// A weighted distribution over states.
///
/// Weights need not be normalized; queries divide through by the total
/// mass. The sum of the weights of an empirical histogram is the number of
/// samples, and the weight of a state is the number of times it was seen.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram<S: State> {
    norm: Probability,
    weights: BTreeMap<S, Probability>,
}

impl<S: State> Default for Histogram<S> {
    fn default() -> Self {
        Self {
            norm: 0.,
            weights: BTreeMap::new(),
        }
    }
}

impl<S: State> Histogram<S> {
    /// equal weight on each of the given states
    pub fn uniform(states: impl IntoIterator<Item = S>) -> Self {
        states
            .into_iter()
            .fold(Self::default(), |hist, state| hist.witness(state))
    }
    /// normalized mass at a state; zero off-support or when empty
    pub fn density(&self, state: &S) -> Probability {
        match self.norm {
            n if n > 0. => self.weights.get(state).copied().unwrap_or(0.) / n,
            _ => 0.,
        }
    }
    /// record one more sample of a state
    pub fn witness(self, state: S) -> Self {
        self.credit(state, 1.)
    }
    /// record a fractional mass of a state
    pub fn credit(mut self, state: S, weight: Probability) -> Self {
        self.norm.add_assign(weight);
        self.weights.entry(state).or_insert(0.).add_assign(weight);
        self
    }
    /// draw one state with probability proportional to its weight
    pub fn sample(&self, rng: &mut dyn rand::RngCore) -> Result<&S> {
        self.weights
            .iter()
            .collect::<Vec<_>>()
            .choose_weighted(rng, |(_, weight)| **weight)
            .map(|(state, _)| *state)
            .map_err(|_| Error::ParticleDeprivation)
    }
    /// the heaviest state. ties broken by iteration order.
    pub fn mpe(&self) -> Result<&S> {
        let mut best = None;
        let mut top = Probability::NEG_INFINITY;
        for (state, weight) in self.weights.iter() {
            if *weight > top {
                top = *weight;
                best = Some(state);
            }
        }
        best.ok_or(Error::ParticleDeprivation)
    }
    pub fn support(&self) -> impl Iterator<Item = &S> {
        self.weights.keys()
    }
    pub fn len(&self) -> usize {
        self.weights.len()
    }
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
    pub fn norm(&self) -> Probability {
        self.norm
    }
}

impl<S: State> From<Vec<(S, Probability)>> for Histogram<S> {
    fn from(weights: Vec<(S, Probability)>) -> Self {
        weights
            .into_iter()
            .fold(Self::default(), |hist, (state, weight)| {
                hist.credit(state, weight)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Action;
    use crate::traits::Observation;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    impl State for u32 {}
    impl Action for u32 {}
    impl Observation for u32 {}

    #[test]
    fn densities_normalize() {
        let hist = Histogram::from(vec![(1u32, 3.), (2, 1.)]);
        assert_eq!(hist.density(&1), 0.75);
        assert_eq!(hist.density(&2), 0.25);
        assert_eq!(hist.density(&3), 0.);
    }

    #[test]
    fn empty_histogram_is_massless() {
        let hist = Histogram::<u32>::default();
        assert_eq!(hist.density(&1), 0.);
        assert!(hist.mpe().is_err());
    }

    #[test]
    fn mpe_breaks_ties_by_order() {
        let hist = Histogram::uniform(vec![7u32, 3, 5]);
        assert_eq!(hist.mpe().unwrap(), &3);
    }

    #[test]
    fn witness_accumulates_mass() {
        let hist = Histogram::default().witness(1u32).witness(1).witness(2);
        assert_eq!(hist.norm(), 3.);
        assert_eq!(hist.density(&1), 2. / 3.);
    }

    #[test]
    fn sampling_respects_support() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let hist = Histogram::from(vec![(1u32, 0.), (2, 1.)]);
        for _ in 0..32 {
            assert_eq!(hist.sample(rng).unwrap(), &2);
        }
    }
}
