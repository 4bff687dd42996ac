//! The tiger puzzle, a minimal toy domain for exercising the planners.
//!
//! A tiger hides behind one of n doors. Listening costs a little and
//! yields a growl that points at the right door most of the time; opening
//! a door pays off or hurts badly, and scares the tiger into a fresh
//! hiding spot. The optimal behavior, listening until confident and then
//! opening elsewhere, emerges from search alone, which makes the domain
//! ideal for validating belief filtering and value backup end to end.

mod den;
mod types;

pub use den::*;
pub use types::*;
