use super::Branch;
use super::Vertex;
use crate::belief::Particles;
use crate::error::Error;
use crate::error::Result;
use crate::history::History;
use crate::traits::Action;
use crate::traits::Observation;
use crate::traits::State;
use crate::Utility;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction::Outgoing;

/// The search tree, stored as an arena of vertices in a directed graph.
///
/// The graph alternates OR and AND vertices, edges labelled by the action
/// or observation that leads down them. Observation children are created
/// lazily on descent, so an absent edge means an unexplored branch. The
/// tree exclusively owns its vertices and contains no cycles; pruning
/// copies the kept subtree into a fresh arena and drops the rest.
#[derive(Debug)]
pub struct Tree<S, A, O>
where
    S: State,
    A: Action,
    O: Observation,
{
    graph: DiGraph<Vertex<S, A, O>, Branch<A, O>>,
    root: NodeIndex,
}

impl<S, A, O> Tree<S, A, O>
where
    S: State,
    A: Action,
    O: Observation,
{
    /// start a tree from a single root vertex
    pub fn seed(vertex: Vertex<S, A, O>) -> Self {
        let mut graph = DiGraph::default();
        let root = graph.add_node(vertex);
        Self { graph, root }
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }
    pub fn graph(&self) -> &DiGraph<Vertex<S, A, O>, Branch<A, O>> {
        &self.graph
    }
    pub fn size(&self) -> usize {
        self.graph.node_count()
    }
    pub fn vertex(&self, node: NodeIndex) -> &Vertex<S, A, O> {
        self.graph
            .node_weight(node)
            .expect("indices are only minted by this tree")
    }
    /// the real history this tree was rooted at
    pub fn history(&self) -> &History<A, O> {
        match self.vertex(self.root) {
            Vertex::Root { history, .. } => history,
            _ => unreachable!("the root vertex is always a root"),
        }
    }

    /// grow a new vertex under `parent` along `branch`
    pub fn attach(
        &mut self,
        parent: NodeIndex,
        branch: Branch<A, O>,
        vertex: Vertex<S, A, O>,
    ) -> NodeIndex {
        let tail = self.graph.add_node(vertex);
        self.graph.add_edge(parent, tail, branch);
        tail
    }
    /// give an OR vertex an untouched AND child for `action`, if absent
    pub fn sprout(&mut self, node: NodeIndex, action: A, visits: usize, value: Utility) {
        if self.follow(node, &Branch::Choice(action.clone())).is_none() {
            self.attach(node, Branch::Choice(action), Vertex::And { visits, value });
        }
    }

    /// step down the edge matching `branch`, if it has been explored
    pub fn follow(&self, from: NodeIndex, branch: &Branch<A, O>) -> Option<NodeIndex> {
        self.graph
            .edges_directed(from, Outgoing)
            .find(|edge| edge.weight() == branch)
            .map(|edge| edge.target())
    }
    /// the AND children of an OR vertex, in insertion order
    pub fn choices(&self, node: NodeIndex) -> Vec<(A, NodeIndex)> {
        let mut children = self
            .graph
            .edges_directed(node, Outgoing)
            .map(|edge| match edge.weight() {
                Branch::Choice(action) => (action.clone(), edge.target()),
                Branch::Signal(_) => unreachable!("or vertices only branch on actions"),
            })
            .collect::<Vec<_>>();
        children.reverse();
        children
    }

    pub fn visits(&self, node: NodeIndex) -> usize {
        self.vertex(node).visits()
    }
    /// the running mean value of an AND vertex
    pub fn value(&self, node: NodeIndex) -> Utility {
        match self.vertex(node) {
            Vertex::And { value, .. } => *value,
            _ => unreachable!("values live on and vertices"),
        }
    }
    pub fn belief(&self, node: NodeIndex) -> Option<&Particles<S>> {
        self.vertex(node).belief()
    }
    /// accumulate a simulated state into a vertex's belief, where one is
    /// attached
    pub fn witness(&mut self, node: NodeIndex, state: S) {
        if let Some(belief) = self
            .graph
            .node_weight_mut(node)
            .expect("indices are only minted by this tree")
            .belief_mut()
        {
            belief.witness(state);
        }
    }
    /// replace a vertex's belief outright
    pub fn endow(&mut self, node: NodeIndex, particles: Particles<S>) {
        match self
            .graph
            .node_weight_mut(node)
            .expect("indices are only minted by this tree")
        {
            Vertex::Root { belief, .. } => *belief = Some(particles),
            Vertex::Or { belief, .. } => *belief = Some(particles),
            Vertex::And { .. } => unreachable!("beliefs live on or vertices"),
        }
    }

    /// fold one simulated return into the statistics along an edge: the
    /// OR vertex and its chosen AND child each record the visit, and the
    /// child's value moves toward the return by an incremental mean step
    pub fn backup(&mut self, node: NodeIndex, child: NodeIndex, gain: Utility) {
        self.graph
            .node_weight_mut(node)
            .expect("indices are only minted by this tree")
            .visit();
        if let Vertex::And { visits, value } = self
            .graph
            .node_weight_mut(child)
            .expect("indices are only minted by this tree")
        {
            *visits += 1;
            *value += (gain - *value) / *visits as Utility;
        }
    }

    /// the greedy action at an OR vertex: arg-max of child values, ties
    /// broken by the first-encountered action
    pub fn best(&self, node: NodeIndex) -> Result<A> {
        let mut best = None;
        let mut top = Utility::NEG_INFINITY;
        for (action, child) in self.choices(node) {
            let value = self.value(child);
            if value > top {
                top = value;
                best = Some(action);
            }
        }
        best.ok_or_else(|| Error::Domain(anyhow::anyhow!("no actions expanded at this vertex")))
    }

    /// keep the subtree rooted at `keep`, promoting it to a root vertex
    /// that carries the extended real history. the promoted vertex keeps
    /// its visit count and, when asked to, its accumulated belief; the
    /// rest of the old tree is dropped.
    pub fn adopt(self, keep: NodeIndex, history: History<A, O>, particled: bool) -> Self {
        let promoted = match self
            .graph
            .node_weight(keep)
            .expect("indices are only minted by this tree")
        {
            Vertex::Or { visits, belief } => Vertex::Root {
                visits: *visits,
                history,
                belief: match particled {
                    true => belief.clone(),
                    false => None,
                },
            },
            _ => unreachable!("only interior or vertices get promoted"),
        };
        let mut graph = DiGraph::default();
        let root = graph.add_node(promoted);
        let mut stack = vec![(keep, root)];
        while let Some((old, new)) = stack.pop() {
            let mut edges = self
                .graph
                .edges_directed(old, Outgoing)
                .map(|edge| (edge.weight().clone(), edge.target()))
                .collect::<Vec<_>>();
            edges.reverse();
            for (branch, target) in edges {
                let vertex = self
                    .graph
                    .node_weight(target)
                    .expect("indices are only minted by this tree")
                    .clone();
                let tail = graph.add_node(vertex);
                graph.add_edge(new, tail, branch);
                stack.push((target, tail));
            }
        }
        Self { graph, root }
    }

    /// display the tree in a human-readable format
    /// be careful because it's really big and recursive
    fn show(&self, f: &mut std::fmt::Formatter, x: NodeIndex, prefix: &str) -> std::fmt::Result {
        if x == self.root {
            writeln!(f, "\nROOT   {}", self.vertex(x))?;
        }
        let mut children = self
            .graph
            .edges_directed(x, Outgoing)
            .map(|edge| (edge.weight().clone(), edge.target()))
            .collect::<Vec<_>>();
        children.reverse();
        let n = children.len();
        for (i, (branch, child)) in children.into_iter().enumerate() {
            let last = i == n - 1;
            let gaps = if last { "    " } else { "│   " };
            let stem = if last { "└" } else { "├" };
            writeln!(f, "{}{}──{} → {}", prefix, stem, branch, self.vertex(child))?;
            self.show(f, child, &format!("{}{}", prefix, gaps))?;
        }
        Ok(())
    }
}

impl<S, A, O> std::fmt::Display for Tree<S, A, O>
where
    S: State,
    A: Action,
    O: Observation,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.show(f, self.root, "")
    }
}
