use super::Fleet;
use super::Shot;
use super::Splash;
use crate::history::History;
use crate::traits::Transform;

/// give up after this many incoherent or illegal proposals
const ATTEMPTS: usize = 16;

/// Reinvigoration noise for fleet beliefs: rearrange the shipping while
/// honoring every splash on record.
///
/// A proposal either swaps two ships' positions or relocates one ship
/// outright, and survives only if the layout stays legal and coherent
/// with the shot history. When nothing coherent turns up within the
/// attempt budget the particle is cloned unperturbed, which keeps
/// reinvigoration total at the cost of some diversity.
pub struct Shuffle {
    history: History<Shot, Splash>,
}

impl From<History<Shot, Splash>> for Shuffle {
    fn from(history: History<Shot, Splash>) -> Self {
        Self { history }
    }
}

impl Transform<Fleet> for Shuffle {
    fn transform(&self, fleet: Fleet, rng: &mut dyn rand::RngCore) -> Fleet {
        for _ in 0..ATTEMPTS {
            let candidate = match rng.next_u32() % 2 {
                0 => fleet.swapped(rng),
                _ => fleet.relocated(rng),
            };
            if let Some(next) = candidate {
                if next.coherent(&self.history) {
                    return next;
                }
            }
        }
        fleet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battleship::Coord;
    use crate::battleship::SIZE;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn perturbations_stay_legal() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let shuffle = Shuffle::from(History::default());
        let fleet = Fleet::roll(rng);
        for _ in 0..32 {
            assert!(shuffle.transform(fleet.clone(), rng).legal());
        }
    }

    #[test]
    fn perturbations_honor_the_splashes() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let fleet = Fleet::roll(rng);
        let aboard = *fleet.occupied().iter().next().unwrap();
        let afloat = (0..SIZE)
            .flat_map(|x| (0..SIZE).map(move |y| Coord { x, y }))
            .find(|coord| !fleet.contains(coord))
            .unwrap();
        let history = History::from(vec![
            (Shot(aboard), Splash::Hit),
            (Shot(afloat), Splash::Miss),
        ]);
        let shuffle = Shuffle::from(history.clone());
        for _ in 0..32 {
            assert!(shuffle.transform(fleet.clone(), rng).coherent(&history));
        }
    }

    #[test]
    fn free_play_finds_fresh_layouts() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let shuffle = Shuffle::from(History::default());
        let fleet = Fleet::roll(rng);
        let moved = (0..32)
            .map(|_| shuffle.transform(fleet.clone(), rng))
            .filter(|next| *next != fleet)
            .count();
        assert!(moved > 0);
    }
}
