/// a hidden world state. this is basically a marker trait: the planner
/// needs value equality, a stable hash or total order, and cloning.
/// two structurally equal states are interchangeable.
pub trait State:
    Clone
    + PartialEq
    + Eq
    + PartialOrd // can be ignored
    + Ord // can be ignored
    + std::hash::Hash
    + std::fmt::Debug
{
}
