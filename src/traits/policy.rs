use super::*;
use crate::history::History;

/// enumerate the valid actions at a history position. the list must be
/// non-empty anywhere the planner can reach, and must already exclude
/// actions the domain forbids retrying (e.g. cells already shot at).
/// duplicates are harmless.
pub trait Policy {
    type S: State;
    type A: Action;
    type O: Observation;
    fn actions(&self, state: &Self::S, history: &History<Self::A, Self::O>) -> Vec<Self::A>;
}
