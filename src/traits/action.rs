/// an agent decision. marker trait with the same value-type capabilities
/// as states: the tree keys action edges by equality.
pub trait Action:
    Clone
    + PartialEq
    + Eq
    + PartialOrd // can be ignored
    + Ord // can be ignored
    + std::hash::Hash
    + std::fmt::Debug
{
}
