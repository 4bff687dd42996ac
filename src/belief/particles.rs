use super::Histogram;
use crate::error::Error;
use crate::error::Result;
use crate::traits::State;
use crate::traits::Transform;
use crate::Probability;
use rand::seq::IndexedRandom;
use std::sync::OnceLock;

/// how density queries treat states outside the particle support
#[derive(Debug, Clone)]
pub enum Approx<S> {
    /// off-support states have zero density
    Exact,
    /// off-support states borrow the density of the nearest particle
    /// under the given distance
    Nearest(fn(&S, &S) -> f64),
}

impl<S> Default for Approx<S> {
    fn default() -> Self {
        Self::Exact
    }
}

/// An unweighted multiset of states approximating a belief.
///
/// Sampling is uniform over particles, so duplicated states carry
/// proportionally more mass. The empirical histogram is memoised; any
/// mutation replaces the cache and the next query rebuilds it in O(N).
#[derive(Debug, Clone)]
pub struct Particles<S: State> {
    states: Vec<S>,
    approx: Approx<S>,
    cache: OnceLock<Histogram<S>>,
}

impl<S: State> Particles<S> {
    /// switch off-support density queries to nearest-particle lookup
    pub fn nearest(mut self, distance: fn(&S, &S) -> f64) -> Self {
        self.approx = Approx::Nearest(distance);
        self
    }
    /// approximate a histogram by drawing the given number of particles
    pub fn from_histogram(
        histogram: &Histogram<S>,
        n: usize,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Self> {
        Ok(Self::from(
            (0..n)
                .map(|_| histogram.sample(rng).cloned())
                .collect::<Result<Vec<S>>>()?,
        ))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.states.iter()
    }

    /// one particle uniformly at random
    pub fn sample(&self, rng: &mut dyn rand::RngCore) -> Result<&S> {
        self.states.choose(rng).ok_or(Error::ParticleDeprivation)
    }
    /// the empirical distribution over particles, rebuilt on demand
    pub fn histogram(&self) -> &Histogram<S> {
        self.cache.get_or_init(|| {
            self.states
                .iter()
                .cloned()
                .fold(Histogram::default(), |hist, state| hist.witness(state))
        })
    }
    /// empirical frequency of a state. off-support queries resolve
    /// according to the approximation mode.
    pub fn density(&self, state: &S) -> Probability {
        match self.histogram().density(state) {
            mass if mass > 0. => mass,
            _ => match self.approx {
                Approx::Exact => 0.,
                Approx::Nearest(distance) => self
                    .neighbor(state, distance)
                    .map(|near| self.histogram().density(near))
                    .unwrap_or(0.),
            },
        }
    }
    /// the most frequent particle. ties broken by iteration order.
    pub fn mpe(&self) -> Result<&S> {
        self.histogram().mpe()
    }
    /// append a particle and invalidate the histogram cache
    pub fn witness(&mut self, state: S) {
        self.states.push(state);
        self.cache = OnceLock::new();
    }
    /// collapse duplicates into a weighted distribution: one entry per
    /// distinct state, weighted by its frequency
    pub fn condense(&self) -> Histogram<S> {
        self.histogram().clone()
    }
    /// feed every particle through a state abstraction
    pub fn project<T>(&self, abstraction: impl Fn(&S) -> T) -> Vec<T> {
        self.states.iter().map(abstraction).collect()
    }

    fn neighbor(&self, state: &S, distance: fn(&S, &S) -> f64) -> Option<&S> {
        let mut nearest = None;
        let mut shortest = f64::INFINITY;
        for particle in self.states.iter() {
            let length = distance(particle, state);
            if length < shortest {
                shortest = length;
                nearest = Some(particle);
            }
        }
        nearest
    }
}

impl<S: State> From<Vec<S>> for Particles<S> {
    fn from(states: Vec<S>) -> Self {
        Self {
            states,
            approx: Approx::default(),
            cache: OnceLock::new(),
        }
    }
}

/// Restore a depleted belief to `target` particles by resampling with
/// perturbation: draw uniformly from the input belief, clone, apply the
/// transform when one is supplied, append. A belief already at or above
/// the target is returned as an unchanged copy.
pub fn reinvigorate<S: State>(
    particles: &Particles<S>,
    target: usize,
    transform: Option<&dyn Transform<S>>,
    rng: &mut dyn rand::RngCore,
) -> Result<Particles<S>> {
    if particles.is_empty() {
        return Err(Error::ParticleDeprivation);
    }
    let mut refreshed = particles.clone();
    while refreshed.len() < target {
        let draw = particles.sample(rng)?.clone();
        let draw = match transform {
            Some(transform) => transform.transform(draw, rng),
            None => draw,
        };
        refreshed.witness(draw);
    }
    Ok(refreshed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    struct Bump;
    impl Transform<u32> for Bump {
        fn transform(&self, state: u32, _: &mut dyn rand::RngCore) -> u32 {
            state + 1000
        }
    }

    #[test]
    fn singleton_always_samples_itself() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let particles = Particles::from(vec![7u32]);
        for _ in 0..16 {
            assert_eq!(particles.sample(rng).unwrap(), &7);
        }
    }

    #[test]
    fn empty_belief_cannot_sample() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let particles = Particles::<u32>::from(vec![]);
        assert!(matches!(
            particles.sample(rng),
            Err(Error::ParticleDeprivation)
        ));
    }

    #[test]
    fn density_is_empirical_frequency() {
        let particles = Particles::from(vec![1u32, 1, 1, 2]);
        assert_eq!(particles.density(&1), 0.75);
        assert_eq!(particles.density(&2), 0.25);
        assert_eq!(particles.density(&3), 0.);
    }

    #[test]
    fn nearest_mode_borrows_neighbor_density() {
        let distance = |a: &u32, b: &u32| (*a as f64 - *b as f64).abs();
        let particles = Particles::from(vec![10u32, 10, 20]).nearest(distance);
        assert_eq!(particles.density(&11), 2. / 3.);
        assert_eq!(particles.density(&19), 1. / 3.);
    }

    #[test]
    fn mutation_invalidates_histogram() {
        let mut particles = Particles::from(vec![1u32]);
        assert_eq!(particles.histogram().density(&1), 1.);
        particles.witness(2);
        particles.witness(2);
        particles.witness(2);
        assert_eq!(particles.histogram().density(&1), 0.25);
    }

    #[test]
    fn mpe_is_most_frequent() {
        let particles = Particles::from(vec![5u32, 3, 3, 9, 3]);
        assert_eq!(particles.mpe().unwrap(), &3);
    }

    #[test]
    fn condense_preserves_distribution() {
        let particles = Particles::from(vec![1u32, 1, 2]);
        let reordered = Particles::from(vec![2u32, 1, 1]);
        assert_eq!(particles.condense(), reordered.condense());
        assert_eq!(particles.condense().density(&1), 2. / 3.);
        assert_eq!(particles.condense().len(), 2);
    }

    #[test]
    fn projection_maps_every_particle() {
        let particles = Particles::from(vec![1u32, 2, 3]);
        assert_eq!(particles.project(|s| s * 2), vec![2, 4, 6]);
    }

    #[test]
    fn reinvigoration_reaches_target() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let particles = Particles::from(vec![1u32]);
        let refreshed = reinvigorate(&particles, 1000, None, rng).unwrap();
        assert_eq!(refreshed.len(), 1000);
        assert!(refreshed.iter().all(|s| *s == 1));
    }

    #[test]
    fn reinvigoration_keeps_surplus() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let particles = Particles::from(vec![1u32, 2, 3]);
        let refreshed = reinvigorate(&particles, 2, None, rng).unwrap();
        assert_eq!(refreshed.len(), 3);
    }

    #[test]
    fn reinvigoration_fails_on_empty_belief() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let particles = Particles::<u32>::from(vec![]);
        assert!(matches!(
            reinvigorate(&particles, 10, None, rng),
            Err(Error::ParticleDeprivation)
        ));
    }

    #[test]
    fn reinvigoration_perturbs_additions_only() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let particles = Particles::from(vec![1u32, 2]);
        let refreshed = reinvigorate(&particles, 10, Some(&Bump), rng).unwrap();
        assert_eq!(refreshed.len(), 10);
        assert_eq!(refreshed.iter().take(2).copied().collect::<Vec<_>>(), vec![1, 2]);
        assert!(refreshed.iter().skip(2).all(|s| *s == 1001 || *s == 1002));
    }
}
