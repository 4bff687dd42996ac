//! Battleship as a POMDP: the fleet layout is the hidden state, shots are
//! actions, and hit/miss splashes are the observations.
//!
//! The domain is a stress test for particle filtering. The state space is
//! astronomically large, so beliefs collapse quickly under real shots and
//! reinvigoration has to manufacture fresh layouts that stay consistent
//! with every splash seen so far. That perturbation lives here too, as
//! the `Transform` the planner invokes blindly.

mod board;
mod ocean;
mod shuffle;

pub use board::*;
pub use ocean::*;
pub use shuffle::*;
