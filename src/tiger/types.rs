use crate::traits::Action;
use crate::traits::Observation;
use crate::traits::State;

/// which door the tiger hides behind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tiger(pub u8);

impl Tiger {
    pub fn all(doors: u8) -> Vec<Tiger> {
        (0..doors).map(Tiger).collect()
    }
}

impl State for Tiger {}

impl std::fmt::Display for Tiger {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "tiger-{}", self.0)
    }
}

/// listen for a growl, or commit to a door
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Act {
    Listen,
    Open(u8),
}

impl Action for Act {}

impl std::fmt::Display for Act {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Act::Listen => write!(f, "listen"),
            Act::Open(door) => write!(f, "open-{}", door),
        }
    }
}

/// the door a growl seems to come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Growl(pub u8);

impl Observation for Growl {}

impl std::fmt::Display for Growl {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "growl-{}", self.0)
    }
}
