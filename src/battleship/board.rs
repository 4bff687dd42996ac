use crate::history::History;
use crate::traits::Action;
use crate::traits::Observation;
use crate::traits::State;
use crate::Arbitrary;
use rand::Rng;
use std::collections::BTreeSet;

/// the board is SIZE x SIZE cells
pub const SIZE: i8 = 10;
/// one ship of each length, largest placed first
const LENGTHS: [u8; 4] = [5, 4, 3, 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub fn valid(&self) -> bool {
        (0..SIZE).contains(&self.x) && (0..SIZE).contains(&self.y)
    }
    pub fn shift(&self, (dx, dy): (i8, i8), steps: i8) -> Coord {
        Coord {
            x: self.x + dx * steps,
            y: self.y + dy * steps,
        }
    }
    /// the 8 surrounding cells, on or off the board
    pub fn ring(&self) -> impl Iterator<Item = Coord> + '_ {
        [
            (0, 1),
            (1, 1),
            (1, 0),
            (1, -1),
            (0, -1),
            (-1, -1),
            (-1, 0),
            (-1, 1),
        ]
        .into_iter()
        .map(|delta| self.shift(delta, 1))
    }
    pub fn roll(rng: &mut dyn rand::RngCore) -> Coord {
        Coord {
            x: rng.random_range(0..SIZE),
            y: rng.random_range(0..SIZE),
        }
    }
}

impl Arbitrary for Coord {
    fn random() -> Self {
        Self::roll(&mut rand::rng())
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    fn delta(&self) -> (i8, i8) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }
    pub fn roll(rng: &mut dyn rand::RngCore) -> Heading {
        match rng.random_range(0..4) {
            0 => Heading::North,
            1 => Heading::East,
            2 => Heading::South,
            _ => Heading::West,
        }
    }
}

impl Arbitrary for Heading {
    fn random() -> Self {
        Self::roll(&mut rand::rng())
    }
}

/// a ship occupies `length` cells from its bow along its heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ship {
    pub bow: Coord,
    pub heading: Heading,
    pub length: u8,
}

impl Ship {
    pub fn cells(&self) -> Vec<Coord> {
        (0..self.length as i8)
            .map(|i| self.bow.shift(self.heading.delta(), i))
            .collect()
    }
}

/// The hidden state: a full fleet layout.
///
/// Legal layouts keep every ship on the board, with no overlap and no two
/// ships touching, not even diagonally.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fleet(Vec<Ship>);

impl State for Fleet {}

impl Fleet {
    /// rejection-sample a legal layout, largest ship first
    pub fn roll(rng: &mut dyn rand::RngCore) -> Fleet {
        let mut fleet = Fleet(vec![]);
        for length in LENGTHS {
            loop {
                let ship = Ship {
                    bow: Coord::roll(rng),
                    heading: Heading::roll(rng),
                    length,
                };
                if fleet.fits(&ship) {
                    fleet.0.push(ship);
                    break;
                }
            }
        }
        fleet
    }

    pub fn ships(&self) -> &[Ship] {
        &self.0
    }
    pub fn occupied(&self) -> BTreeSet<Coord> {
        self.0.iter().flat_map(|ship| ship.cells()).collect()
    }
    pub fn contains(&self, coord: &Coord) -> bool {
        self.0.iter().any(|ship| ship.cells().contains(coord))
    }
    /// could this ship be added without leaving the board, overlapping,
    /// or touching the ships already placed?
    pub fn fits(&self, ship: &Ship) -> bool {
        ship.cells().iter().all(|cell| {
            cell.valid() && !self.contains(cell) && cell.ring().all(|near| !self.contains(&near))
        })
    }
    /// is the whole layout placeable ship by ship?
    pub fn legal(&self) -> bool {
        let mut partial = Fleet(vec![]);
        for ship in self.0.iter() {
            if !partial.fits(ship) {
                return false;
            }
            partial.0.push(*ship);
        }
        true
    }
    /// does this layout agree with every splash observed so far?
    pub fn coherent(&self, history: &History<Shot, Splash>) -> bool {
        history.pairs().all(|(Shot(coord), splash)| match splash {
            Splash::Hit => self.contains(coord),
            Splash::Miss => !self.contains(coord),
        })
    }

    /// two ships trade bow positions, each keeping its own heading
    pub(crate) fn swapped(&self, rng: &mut dyn rand::RngCore) -> Option<Fleet> {
        let i = rng.random_range(0..self.0.len());
        let j = rng.random_range(0..self.0.len());
        if i == j {
            return None;
        }
        let mut next = self.clone();
        next.0[i].bow = self.0[j].bow;
        next.0[j].bow = self.0[i].bow;
        next.legal().then_some(next)
    }
    /// one ship steams to a fresh position and heading
    pub(crate) fn relocated(&self, rng: &mut dyn rand::RngCore) -> Option<Fleet> {
        let i = rng.random_range(0..self.0.len());
        let mut next = self.clone();
        next.0[i].bow = Coord::roll(rng);
        next.0[i].heading = Heading::roll(rng);
        next.legal().then_some(next)
    }

    /// the board as seen over a game: hits, misses, and (since this is
    /// the true fleet's own rendering) the unhit shipping
    pub fn render(&self, history: &History<Shot, Splash>) -> String {
        use colored::Colorize;
        let shots = history
            .pairs()
            .map(|(Shot(coord), splash)| (*coord, *splash))
            .collect::<std::collections::BTreeMap<_, _>>();
        let mut board = String::new();
        for y in (0..SIZE).rev() {
            for x in 0..SIZE {
                let ref coord = Coord { x, y };
                let cell = match (shots.get(coord), self.contains(coord)) {
                    (Some(Splash::Hit), _) => "x".red(),
                    (Some(Splash::Miss), _) => "o".blue(),
                    (None, true) => "#".dimmed(),
                    (None, false) => "·".normal(),
                };
                board.push_str(&format!("{} ", cell));
            }
            board.push('\n');
        }
        board
    }
}

impl Arbitrary for Fleet {
    fn random() -> Self {
        Self::roll(&mut rand::rng())
    }
}

/// fire at a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Shot(pub Coord);

impl Action for Shot {}

impl std::fmt::Display for Shot {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "shot {}", self.0)
    }
}

/// what comes back from a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Splash {
    Hit,
    Miss,
}

impl Observation for Splash {}

impl std::fmt::Display for Splash {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Splash::Hit => write!(f, "hit"),
            Splash::Miss => write!(f, "miss"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn rolled_fleets_are_legal() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..16 {
            let fleet = Fleet::roll(rng);
            assert!(fleet.legal());
            assert_eq!(fleet.occupied().len(), 14);
        }
    }

    #[test]
    fn ships_extend_from_the_bow() {
        let ship = Ship {
            bow: Coord { x: 2, y: 3 },
            heading: Heading::East,
            length: 3,
        };
        assert_eq!(
            ship.cells(),
            vec![
                Coord { x: 2, y: 3 },
                Coord { x: 3, y: 3 },
                Coord { x: 4, y: 3 }
            ]
        );
    }

    #[test]
    fn touching_ships_do_not_fit() {
        let mut fleet = Fleet(vec![]);
        let first = Ship {
            bow: Coord { x: 0, y: 0 },
            heading: Heading::East,
            length: 2,
        };
        assert!(fleet.fits(&first));
        fleet.0.push(first);
        let diagonal = Ship {
            bow: Coord { x: 2, y: 1 },
            heading: Heading::East,
            length: 2,
        };
        assert!(!fleet.fits(&diagonal));
        let clear = Ship {
            bow: Coord { x: 0, y: 2 },
            heading: Heading::East,
            length: 2,
        };
        assert!(fleet.fits(&clear));
    }

    #[test]
    fn coherence_checks_every_splash() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let fleet = Fleet::roll(rng);
        let ref aboard = fleet.occupied().into_iter().next().unwrap();
        let ref afloat = (0..SIZE)
            .flat_map(|x| (0..SIZE).map(move |y| Coord { x, y }))
            .find(|coord| !fleet.contains(coord))
            .unwrap();
        let truthful = History::from(vec![
            (Shot(*aboard), Splash::Hit),
            (Shot(*afloat), Splash::Miss),
        ]);
        let mistaken = History::from(vec![(Shot(*aboard), Splash::Miss)]);
        assert!(fleet.coherent(&truthful));
        assert!(!fleet.coherent(&mistaken));
    }
}
