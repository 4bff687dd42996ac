use super::Coord;
use super::Fleet;
use super::Shot;
use super::Splash;
use super::SIZE;
use crate::history::History;
use crate::traits::*;
use crate::Utility;
use std::collections::BTreeSet;

const SALVO: Utility = -1.;
const VICTORY: Utility = 100.;

/// the rules of engagement: every generative model of the game on one
/// struct. the fleet never moves; all the uncertainty is in never having
/// seen it.
#[derive(Debug, Clone, Default)]
pub struct Ocean;

impl Transition for Ocean {
    type S = Fleet;
    type A = Shot;
    fn sample(&self, state: &Fleet, _: &Shot, _: &mut dyn rand::RngCore) -> Fleet {
        state.clone()
    }
}

impl Emission for Ocean {
    type S = Fleet;
    type A = Shot;
    type O = Splash;
    fn sample(&self, next: &Fleet, action: &Shot, _: &mut dyn rand::RngCore) -> Splash {
        match next.contains(&action.0) {
            true => Splash::Hit,
            false => Splash::Miss,
        }
    }
}

impl Reward for Ocean {
    type S = Fleet;
    type A = Shot;
    type O = Splash;
    fn sample(
        &self,
        state: &Fleet,
        action: &Shot,
        history: &History<Shot, Splash>,
        _: &Fleet,
        _: &mut dyn rand::RngCore,
    ) -> Utility {
        let ref cells = state.occupied();
        if cells.len() > history.len() + 1 {
            return SALVO;
        }
        let shots = history
            .pairs()
            .map(|(Shot(coord), _)| *coord)
            .chain(std::iter::once(action.0))
            .collect::<BTreeSet<Coord>>();
        match cells.iter().all(|cell| shots.contains(cell)) {
            true => VICTORY,
            false => SALVO,
        }
    }
}

impl Policy for Ocean {
    type S = Fleet;
    type A = Shot;
    type O = Splash;
    /// every cell not yet fired upon
    fn actions(&self, _: &Fleet, history: &History<Shot, Splash>) -> Vec<Shot> {
        let shot = history
            .pairs()
            .map(|(Shot(coord), _)| *coord)
            .collect::<BTreeSet<Coord>>();
        (0..SIZE)
            .flat_map(|x| (0..SIZE).map(move |y| Coord { x, y }))
            .filter(|coord| !shot.contains(coord))
            .map(Shot)
            .collect()
    }
}

impl Rollout for Ocean {
    type S = Fleet;
    type A = Shot;
    type O = Splash;
    fn rollout(&self, _: &Fleet, _: &History<Shot, Splash>, rng: &mut dyn rand::RngCore) -> Shot {
        Shot(Coord::roll(rng))
    }
}

impl Domain for Ocean {
    type S = Fleet;
    type A = Shot;
    type O = Splash;
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
