/// a domain-coherent perturbation of a state, used by reinvigoration to
/// restore particle diversity after a belief collapses. the planner never
/// inspects its semantics; a domain typically rearranges the unobserved
/// parts of the state while staying consistent with everything observed.
pub trait Transform<S> {
    fn transform(&self, state: S, rng: &mut dyn rand::RngCore) -> S;
}
