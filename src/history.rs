use crate::traits::Action;
use crate::traits::Observation;

/// a perfect-recall record of the (action, observation) pairs experienced
/// so far, real or simulated. grown only by appending; a history identifies
/// a position in the conceptual search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History<A, O>(Vec<(A, O)>);

impl<A, O> Default for History<A, O> {
    fn default() -> Self {
        Self(vec![])
    }
}

impl<A: Action, O: Observation> History<A, O> {
    pub fn push(&mut self, action: A, observation: O) {
        self.0.push((action, observation));
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn last(&self) -> Option<&(A, O)> {
        self.0.last()
    }
    pub fn pairs(&self) -> impl Iterator<Item = &(A, O)> {
        self.0.iter()
    }
    /// rewind to a prefix. simulation scratch histories borrow the real
    /// prefix and roll back after a rollout returns.
    pub fn truncate(&mut self, n: usize) {
        self.0.truncate(n);
    }
}

impl<A: Action, O: Observation> From<Vec<(A, O)>> for History<A, O> {
    fn from(pairs: Vec<(A, O)>) -> Self {
        Self(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::State;

    impl State for u8 {}
    impl Action for u8 {}
    impl Observation for u8 {}

    #[test]
    fn append_only_growth() {
        let mut history = History::<u8, u8>::default();
        assert!(history.is_empty());
        history.push(1, 2);
        history.push(3, 4);
        assert_eq!(history.len(), 2);
        assert_eq!(history.last(), Some(&(3, 4)));
    }

    #[test]
    fn rollback_to_prefix() {
        let mut history = History::from(vec![(1u8, 1u8), (2, 2)]);
        let base = history.len();
        history.push(3, 3);
        history.push(4, 4);
        history.truncate(base);
        assert_eq!(history, History::from(vec![(1, 1), (2, 2)]));
    }
}
