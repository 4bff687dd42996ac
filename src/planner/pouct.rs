use super::Settings;
use crate::agent::Agent;
use crate::belief::Particles;
use crate::error::Error;
use crate::error::Result;
use crate::history::History;
use crate::traits::Domain;
use crate::traits::Policy;
use crate::traits::Rollout;
use crate::tree::Branch;
use crate::tree::Tree;
use crate::tree::Vertex;
use crate::Utility;
use petgraph::graph::NodeIndex;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Instant;

/// UCB1 score of an action child under a parent with `visits` total
/// visits. an untried child scores infinite, which forces at least one
/// visit per action before exploitation kicks in.
fn ucb(exploration: Utility, visits: usize, tried: usize, value: Utility) -> Utility {
    match tried {
        0 => Utility::INFINITY,
        _ => value + exploration * ((visits as Utility + 1.).ln() / tried as Utility).sqrt(),
    }
}

/// Partially observable UCT: Monte Carlo tree search over
/// action-observation histories with UCB1 action selection and
/// bootstrapped rollouts at the frontier.
///
/// One planner serves one agent. The planner owns the search tree between
/// steps so a pruned subtree can seed the next decision.
pub struct Pouct<D, R>
where
    D: Domain,
    R: Rollout<S = D::S, A = D::A, O = D::O>,
{
    settings: Settings,
    rollout: R,
    tree: Option<Tree<D::S, D::A, D::O>>,
    rng: SmallRng,
    particled: bool,
}

impl<D, R> Pouct<D, R>
where
    D: Domain,
    R: Rollout<S = D::S, A = D::A, O = D::O>,
{
    pub fn new(settings: Settings, rollout: R) -> Self {
        Self::construct(settings, rollout, false)
    }
    pub(crate) fn particled(settings: Settings, rollout: R) -> Self {
        Self::construct(settings, rollout, true)
    }
    fn construct(settings: Settings, rollout: R, particled: bool) -> Self {
        let rng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self {
            settings,
            rollout,
            tree: None,
            rng,
            particled,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    pub fn tree(&self) -> Option<&Tree<D::S, D::A, D::O>> {
        self.tree.as_ref()
    }
    pub(crate) fn take_tree(&mut self) -> Option<Tree<D::S, D::A, D::O>> {
        self.tree.take()
    }
    pub(crate) fn set_tree(&mut self, tree: Tree<D::S, D::A, D::O>) {
        self.tree = Some(tree);
    }
    pub(crate) fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// search for the best action at the agent's current history: sample a
    /// state from the belief, descend the tree, repeat until the budget
    /// runs out, then return the greedy action at the root
    pub fn plan(&mut self, agent: &Agent<D>) -> Result<D::A> {
        self.validate(agent)?;
        let budget = self.settings.budget();
        let start = Instant::now();
        let mut sims = 0;
        loop {
            let state = agent.sample(&mut self.rng)?;
            let ref mut history = agent.history().clone();
            let root = self.tree.as_ref().map(|tree| tree.root());
            self.simulate(agent, state, history, root, None, 0)?;
            sims += 1;
            if budget.exhausted(sims, start) {
                break;
            }
        }
        log::debug!("{} simulations in {:?}", sims, start.elapsed());
        let tree = self.tree.as_ref().expect("at least one simulation ran");
        tree.best(tree.root())
    }

    /// fold one real (action, observation) step into the tree: re-root at
    /// the matching grandchild when the branch was simulated, or discard
    /// the tree and let the next plan rebuild from the updated belief
    pub fn update(&mut self, agent: &Agent<D>, action: &D::A, observation: &D::O) -> Result<()> {
        let Some(tree) = self.tree.take() else {
            return Ok(());
        };
        if agent.history().len() != tree.history().len() + 1 {
            return Err(Error::InvalidHistory);
        }
        let keep = tree
            .follow(tree.root(), &Branch::Choice(action.clone()))
            .and_then(|child| tree.follow(child, &Branch::Signal(observation.clone())));
        match keep {
            Some(keep) => {
                let tree = tree.adopt(keep, agent.history().clone(), false);
                log::debug!("reusing a subtree of {} vertices", tree.size());
                self.tree = Some(tree);
            }
            None => {
                log::debug!("real branch never simulated, discarding the tree");
            }
        }
        Ok(())
    }

    /// drop a tree rooted at a history the agent has moved past, and
    /// reject particle planning over a non-particle belief
    fn validate(&mut self, agent: &Agent<D>) -> Result<()> {
        if self.particled && agent.belief().particles().is_none() {
            return Err(Error::BeliefMismatch);
        }
        if let Some(ref tree) = self.tree {
            if tree.history() != agent.history() {
                log::debug!("tree history is stale, replanning from scratch");
                self.tree = None;
            }
        }
        Ok(())
    }

    /// one recursive descent. expansion of an unvisited position performs
    /// no backup: the expanding simulation hands its rollout return to the
    /// caller's backup only. statistics are touched only after the
    /// recursive call has returned normally.
    fn simulate(
        &mut self,
        agent: &Agent<D>,
        state: D::S,
        history: &mut History<D::A, D::O>,
        node: Option<NodeIndex>,
        parent: Option<(NodeIndex, D::O)>,
        depth: usize,
    ) -> Result<Utility> {
        if depth > self.settings.max_depth {
            return Ok(0.);
        }
        let node = match node {
            Some(node) => node,
            None => {
                self.expand(agent, &state, history, parent)?;
                return Ok(self.unroll(agent, state, history, depth));
            }
        };
        if depth == 1 {
            self.tree
                .as_mut()
                .expect("descent happens inside a tree")
                .witness(node, state.clone());
        }
        let (action, child) = self.explore(node)?;
        let (next, observation, reward) =
            agent
                .domain()
                .step(&state, &action, history, &mut self.rng);
        let grandchild = self
            .tree
            .as_ref()
            .expect("descent happens inside a tree")
            .follow(child, &Branch::Signal(observation.clone()));
        history.push(action, observation.clone());
        let tail = self.simulate(
            agent,
            next,
            history,
            grandchild,
            Some((child, observation)),
            depth + 1,
        )?;
        let gain = reward + self.settings.discount * tail;
        self.tree
            .as_mut()
            .expect("descent happens inside a tree")
            .backup(node, child, gain);
        Ok(gain)
    }

    /// create the OR vertex for an unvisited history position, attach it
    /// under its parent's observation edge, and give it an untouched AND
    /// child for every valid action
    fn expand(
        &mut self,
        agent: &Agent<D>,
        state: &D::S,
        history: &History<D::A, D::O>,
        parent: Option<(NodeIndex, D::O)>,
    ) -> Result<NodeIndex> {
        let actions = agent.domain().policy().actions(state, history);
        if actions.is_empty() {
            return Err(Error::Domain(anyhow::anyhow!(
                "policy enumerated no actions at history length {}",
                history.len()
            )));
        }
        let node = match parent {
            None => {
                let tree = Tree::seed(Vertex::Root {
                    visits: self.settings.visits_init,
                    history: history.clone(),
                    belief: match self.particled {
                        true => agent.belief().particles().cloned(),
                        false => None,
                    },
                });
                let root = tree.root();
                self.tree = Some(tree);
                root
            }
            Some((parent, observation)) => self
                .tree
                .as_mut()
                .expect("interior expansion happens inside a tree")
                .attach(
                    parent,
                    Branch::Signal(observation),
                    Vertex::Or {
                        visits: self.settings.visits_init,
                        belief: match self.particled {
                            true => Some(Particles::from(vec![])),
                            false => None,
                        },
                    },
                ),
        };
        let tree = self.tree.as_mut().expect("just seeded");
        for action in actions {
            tree.sprout(
                node,
                action,
                self.settings.visits_init,
                self.settings.value_init,
            );
        }
        Ok(node)
    }

    /// UCB1 action selection at an OR vertex. ties broken by the
    /// first-encountered action.
    fn explore(&self, node: NodeIndex) -> Result<(D::A, NodeIndex)> {
        let tree = self.tree.as_ref().expect("descent happens inside a tree");
        let visits = tree.visits(node);
        let mut best = None;
        let mut top = Utility::NEG_INFINITY;
        for (action, child) in tree.choices(node) {
            let score = ucb(
                self.settings.exploration,
                visits,
                tree.visits(child),
                tree.value(child),
            );
            if score > top {
                top = score;
                best = Some((action, child));
            }
        }
        best.ok_or_else(|| Error::Domain(anyhow::anyhow!("no expanded actions to select from")))
    }

    /// bootstrapped simulation from the frontier to the horizon under the
    /// default policy. contributes a discounted return but no tree writes.
    fn unroll(
        &mut self,
        agent: &Agent<D>,
        state: D::S,
        history: &mut History<D::A, D::O>,
        depth: usize,
    ) -> Utility {
        let mut state = state;
        let mut depth = depth;
        let mut gain = 0.;
        let mut discount = 1.;
        let base = history.len();
        while depth < self.settings.max_depth {
            let action = self.rollout.rollout(&state, history, &mut self.rng);
            let (next, observation, reward) =
                agent
                    .domain()
                    .step(&state, &action, history, &mut self.rng);
            gain += reward * discount;
            discount *= self.settings.discount;
            history.push(action, observation);
            state = next;
            depth += 1;
        }
        history.truncate(base);
        gain
    }
}
