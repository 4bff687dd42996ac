use super::Act;
use super::Growl;
use super::Tiger;
use crate::history::History;
use crate::traits::*;
use crate::Probability;
use crate::Utility;
use rand::seq::IndexedRandom;
use rand::Rng;

const LISTEN: Utility = -1.;
const RELIEF: Utility = 10.;
const MAULED: Utility = -100.;

/// the tiger's den: every generative model of the puzzle on one struct.
/// listening leaves the tiger in place; opening any door makes it
/// relocate uniformly at random.
#[derive(Debug, Clone)]
pub struct Den {
    doors: u8,
    noise: Probability,
}

impl Den {
    pub fn new(doors: u8, noise: Probability) -> Self {
        assert!(doors >= 2, "the puzzle needs somewhere to hide");
        assert!((0. ..=1.).contains(&noise));
        Self { doors, noise }
    }
    pub fn doors(&self) -> u8 {
        self.doors
    }
}

impl Transition for Den {
    type S = Tiger;
    type A = Act;
    fn sample(&self, state: &Tiger, action: &Act, rng: &mut dyn rand::RngCore) -> Tiger {
        match action {
            Act::Listen => *state,
            Act::Open(_) => Tiger(rng.random_range(0..self.doors)),
        }
    }
}

impl Emission for Den {
    type S = Tiger;
    type A = Act;
    type O = Growl;
    fn sample(&self, next: &Tiger, action: &Act, rng: &mut dyn rand::RngCore) -> Growl {
        let faithful = match action {
            Act::Listen => 1. - self.noise,
            Act::Open(_) => 1. / self.doors as Probability,
        };
        match rng.random_bool(faithful) {
            true => Growl(next.0),
            false => Growl(
                *(0..self.doors)
                    .filter(|door| *door != next.0)
                    .collect::<Vec<_>>()
                    .choose(rng)
                    .expect("at least two doors"),
            ),
        }
    }
}

impl Reward for Den {
    type S = Tiger;
    type A = Act;
    type O = Growl;
    fn sample(
        &self,
        state: &Tiger,
        action: &Act,
        _: &History<Act, Growl>,
        _: &Tiger,
        _: &mut dyn rand::RngCore,
    ) -> Utility {
        match action {
            Act::Listen => LISTEN,
            Act::Open(door) => match *door == state.0 {
                true => MAULED,
                false => RELIEF,
            },
        }
    }
}

impl Policy for Den {
    type S = Tiger;
    type A = Act;
    type O = Growl;
    fn actions(&self, _: &Tiger, _: &History<Act, Growl>) -> Vec<Act> {
        (0..self.doors)
            .map(Act::Open)
            .chain(std::iter::once(Act::Listen))
            .collect()
    }
}

impl Rollout for Den {
    type S = Tiger;
    type A = Act;
    type O = Growl;
    fn rollout(&self, state: &Tiger, history: &History<Act, Growl>, rng: &mut dyn rand::RngCore) -> Act {
        *self
            .actions(state, history)
            .choose(rng)
            .expect("the den always offers actions")
    }
}

impl Domain for Den {
    type S = Tiger;
    type A = Act;
    type O = Growl;
    type T = Self;
    type Z = Self;
    type R = Self;
    type P = Self;
    fn transition(&self) -> &Self {
        self
    }
    fn emission(&self) -> &Self {
        self
    }
    fn reward(&self) -> &Self {
        self
    }
    fn policy(&self) -> &Self {
        self
    }
}
