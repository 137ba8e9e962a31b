// Tue Jan 13 2026 - Alex

use crate::graph::{CycleError, DeferReason, Edge, EdgeKind, Epoch, GraphError, GraphIndex};
use std::fmt;
use std::marker::PhantomData;

/// What to do when a gating edge points back into the active walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePolicy {
    /// Abort the walk with a `CycleError`.
    Strict,
    /// Skip the closing edge and keep going.
    Lenient,
}

/// Receives vertices in dependency order.
pub trait Visitor<I> {
    type Error;

    /// Called once per vertex, after all of its gating dependencies.
    fn visit(&mut self, vertex: I) -> Result<(), Self::Error>;

    /// Called right before `visit` for every pointer edge of the vertex whose
    /// target has not been emitted yet.
    fn defer(&mut self, _edge: &Edge<I>, _reason: DeferReason) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when a lenient walk drops an edge that closed a cycle.
    fn cycle_ignored(&mut self, _edge: &Edge<I>) {}
}

struct FnVisitor<F, E> {
    on_visit: F,
    _error: PhantomData<E>,
}

impl<I, E, F> Visitor<I> for FnVisitor<F, E>
where
    F: FnMut(I) -> Result<(), E>,
{
    type Error = E;

    fn visit(&mut self, vertex: I) -> Result<(), E> {
        (self.on_visit)(vertex)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Marks {
    on_stack: u32,
    emitted: u32,
}

/// Directed graph over dense indices with cycle-aware post-order walks.
///
/// Each vertex carries two stamps compared against the run epoch, so
/// starting a new walk is O(1) and never clears a collection.
#[derive(Debug, Clone)]
pub struct DependencyGraph<I> {
    adjacency: Vec<Vec<Edge<I>>>,
    marks: Vec<Marks>,
    epoch: Epoch,
    sorted: bool,
}

impl<I: GraphIndex> DependencyGraph<I> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertices],
            marks: vec![Marks::default(); vertices],
            epoch: Epoch::new(),
            sorted: true,
        }
    }

    pub fn add_vertex(&mut self, vertex: I) {
        self.ensure(vertex.index());
    }

    pub fn add_edge(&mut self, edge: Edge<I>) {
        self.ensure(edge.from.index().max(edge.to.index()));
        self.adjacency[edge.from.index()].push(edge);
        self.sorted = false;
    }

    pub fn edges_from(&self, vertex: I) -> &[Edge<I>] {
        self.adjacency.get(vertex.index()).map(|e| e.as_slice()).unwrap_or(&[])
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge<I>> {
        self.adjacency.iter().flatten()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Starts a walk under a fresh epoch. Vertices emitted by any `visit`
    /// call of the same walk are not emitted again.
    pub fn walk(&mut self, policy: CyclePolicy) -> Walk<'_, I> {
        if !self.sorted {
            for edges in &mut self.adjacency {
                edges.sort_by(|a, b| (a.to, a.site, a.kind).cmp(&(b.to, b.site, b.kind)));
            }
            self.sorted = true;
        }
        if self.epoch.advance() {
            self.marks.iter_mut().for_each(|m| *m = Marks::default());
        }
        Walk { graph: self, policy }
    }

    /// Post-order visit of `roots` and everything they depend on.
    pub fn visit_all<E, F>(&mut self, roots: &[I], on_visit: F) -> Result<(), GraphError<I, E>>
    where
        F: FnMut(I) -> Result<(), E>,
        E: fmt::Debug + fmt::Display,
    {
        let mut visitor = FnVisitor { on_visit, _error: PhantomData };
        self.walk(CyclePolicy::Strict).visit(roots, &mut visitor)
    }

    fn ensure(&mut self, index: usize) {
        if index >= self.adjacency.len() {
            self.adjacency.resize_with(index + 1, Vec::new);
            self.marks.resize(index + 1, Marks::default());
        }
    }
}

impl<I: GraphIndex> Default for DependencyGraph<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// One run over a graph. Holds the graph mutably: closing pointer edges
/// are reclassified in place.
pub struct Walk<'g, I> {
    graph: &'g mut DependencyGraph<I>,
    policy: CyclePolicy,
}

impl<'g, I: GraphIndex> Walk<'g, I> {
    pub fn is_emitted(&self, vertex: I) -> bool {
        self.graph
            .marks
            .get(vertex.index())
            .map(|m| self.graph.epoch.is_current(m.emitted))
            .unwrap_or(false)
    }

    fn is_on_stack(&self, vertex: I) -> bool {
        self.graph
            .marks
            .get(vertex.index())
            .map(|m| self.graph.epoch.is_current(m.on_stack))
            .unwrap_or(false)
    }

    /// Visits `roots` in ascending index order.
    pub fn visit<V>(&mut self, roots: &[I], visitor: &mut V) -> Result<(), GraphError<I, V::Error>>
    where
        V: Visitor<I>,
        V::Error: fmt::Debug + fmt::Display,
    {
        let mut ordered = roots.to_vec();
        ordered.sort();
        ordered.dedup();

        for root in ordered {
            self.visit_root(root, visitor)?;
        }
        Ok(())
    }

    fn visit_root<V>(&mut self, root: I, visitor: &mut V) -> Result<(), GraphError<I, V::Error>>
    where
        V: Visitor<I>,
        V::Error: fmt::Debug + fmt::Display,
    {
        self.graph.ensure(root.index());
        if self.is_emitted(root) {
            return Ok(());
        }

        let stamp = self.graph.epoch.current();
        self.graph.marks[root.index()].on_stack = stamp;
        let mut stack: Vec<(I, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let (vertex, cursor) = *frame;
            let Some(edge) = self.graph.adjacency[vertex.index()].get(cursor).copied() else {
                stack.pop();
                self.finish(vertex, visitor)?;
                continue;
            };
            frame.1 += 1;

            if !edge.kind.is_gating() || self.is_emitted(edge.to) {
                continue;
            }

            if self.is_on_stack(edge.to) {
                if edge.indirect {
                    log::debug!("Breaking cycle at {:?} -> {:?} ({:?})", vertex, edge.to, edge.site);
                    self.graph.adjacency[vertex.index()][cursor].kind = EdgeKind::MemberPointer;
                    continue;
                }
                match self.policy {
                    CyclePolicy::Strict => {
                        return Err(GraphError::Cycle(CycleError {
                            from: vertex,
                            to: edge.to,
                            kind: edge.kind,
                            site: edge.site,
                        }));
                    }
                    CyclePolicy::Lenient => {
                        visitor.cycle_ignored(&edge);
                        continue;
                    }
                }
            }

            self.graph.marks[edge.to.index()].on_stack = stamp;
            stack.push((edge.to, 0));
        }

        Ok(())
    }

    fn finish<V>(&mut self, vertex: I, visitor: &mut V) -> Result<(), GraphError<I, V::Error>>
    where
        V: Visitor<I>,
        V::Error: fmt::Debug + fmt::Display,
    {
        let edge_count = self.graph.adjacency[vertex.index()].len();
        for position in 0..edge_count {
            let edge = self.graph.adjacency[vertex.index()][position];
            if edge.kind.is_gating() || edge.to == vertex || self.is_emitted(edge.to) {
                continue;
            }
            let reason = if self.is_on_stack(edge.to) {
                DeferReason::CycleBroken
            } else {
                DeferReason::EmittedLater
            };
            visitor.defer(&edge, reason).map_err(GraphError::Visitor)?;
        }

        visitor.visit(vertex).map_err(GraphError::Visitor)?;
        let stamp = self.graph.epoch.current();
        self.graph.marks[vertex.index()].emitted = stamp;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeSite;
    use std::convert::Infallible;

    fn order(graph: &mut DependencyGraph<usize>, roots: &[usize]) -> Vec<usize> {
        let mut out = Vec::new();
        graph
            .visit_all(roots, |v| {
                out.push(v);
                Ok::<(), Infallible>(())
            })
            .unwrap();
        out
    }

    fn position(order: &[usize], vertex: usize) -> usize {
        order.iter().position(|&v| v == vertex).unwrap()
    }

    struct Recorder {
        order: Vec<usize>,
        deferred: Vec<(usize, usize, DeferReason)>,
        ignored: Vec<(usize, usize)>,
    }

    impl Recorder {
        fn new() -> Self {
            Self { order: Vec::new(), deferred: Vec::new(), ignored: Vec::new() }
        }
    }

    impl Visitor<usize> for Recorder {
        type Error = Infallible;

        fn visit(&mut self, vertex: usize) -> Result<(), Infallible> {
            self.order.push(vertex);
            Ok(())
        }

        fn defer(&mut self, edge: &Edge<usize>, reason: DeferReason) -> Result<(), Infallible> {
            self.deferred.push((edge.from, edge.to, reason));
            Ok(())
        }

        fn cycle_ignored(&mut self, edge: &Edge<usize>) {
            self.ignored.push((edge.from, edge.to));
        }
    }

    #[test]
    fn test_dependencies_come_first() {
        let mut graph = DependencyGraph::<usize>::new();
        graph.add_edge(Edge::value(0, 1, EdgeSite::Member(0)));
        graph.add_edge(Edge::inherits(1, 2));
        graph.add_edge(Edge::value(3, 2, EdgeSite::Member(0)));

        let out = order(&mut graph, &[0, 1, 2, 3]);
        assert_eq!(out.len(), 4);
        assert!(position(&out, 2) < position(&out, 1));
        assert!(position(&out, 1) < position(&out, 0));
        assert!(position(&out, 2) < position(&out, 3));
    }

    #[test]
    fn test_each_vertex_emitted_once() {
        let mut graph = DependencyGraph::<usize>::new();
        graph.add_edge(Edge::value(0, 2, EdgeSite::Member(0)));
        graph.add_edge(Edge::value(1, 2, EdgeSite::Member(0)));
        graph.add_edge(Edge::value(1, 2, EdgeSite::Member(1)));

        let out = order(&mut graph, &[0, 1, 2]);
        assert_eq!(out, vec![2, 0, 1]);
    }

    #[test]
    fn test_value_cycle_is_fatal() {
        let mut graph = DependencyGraph::<usize>::new();
        graph.add_edge(Edge::value(0, 1, EdgeSite::Member(0)));
        graph.add_edge(Edge::value(1, 0, EdgeSite::Member(0)));

        let result = graph.visit_all(&[0, 1], |_| Ok::<(), Infallible>(()));
        match result {
            Err(GraphError::Cycle(cycle)) => {
                assert_eq!(cycle.from, 1);
                assert_eq!(cycle.to, 0);
                assert_eq!(cycle.kind, EdgeKind::MemberValue);
            }
            other => panic!("expected cycle, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_self_value_edge_is_fatal() {
        let mut graph = DependencyGraph::<usize>::new();
        graph.add_edge(Edge::value(4, 4, EdgeSite::Member(2)));

        let result = graph.visit_all(&[4], |_| Ok::<(), Infallible>(()));
        assert!(matches!(result, Err(GraphError::Cycle(CycleError { from: 4, to: 4, .. }))));
    }

    #[test]
    fn test_pointer_edge_does_not_gate() {
        let mut graph = DependencyGraph::<usize>::new();
        graph.add_edge(Edge::value(0, 1, EdgeSite::Member(0)));
        graph.add_edge(Edge::pointer(1, 0, EdgeSite::Member(0)));

        let mut recorder = Recorder::new();
        graph.walk(CyclePolicy::Strict).visit(&[0, 1], &mut recorder).unwrap();

        assert_eq!(recorder.order, vec![1, 0]);
        assert_eq!(recorder.deferred, vec![(1, 0, DeferReason::CycleBroken)]);
    }

    #[test]
    fn test_pointer_to_later_vertex_is_deferred() {
        let mut graph = DependencyGraph::<usize>::new();
        graph.add_edge(Edge::pointer(0, 5, EdgeSite::Member(1)));
        graph.add_vertex(5);

        let mut recorder = Recorder::new();
        graph.walk(CyclePolicy::Strict).visit(&[0, 5], &mut recorder).unwrap();

        assert_eq!(recorder.order, vec![0, 5]);
        assert_eq!(recorder.deferred, vec![(0, 5, DeferReason::EmittedLater)]);
    }

    #[test]
    fn test_indirect_value_edge_is_reclassified_on_cycle() {
        let mut graph = DependencyGraph::<usize>::new();
        graph.add_edge(Edge::value(0, 1, EdgeSite::Member(0)));
        graph.add_edge(Edge::value(1, 0, EdgeSite::Member(3)).with_indirect(true));

        let mut recorder = Recorder::new();
        graph.walk(CyclePolicy::Strict).visit(&[0, 1], &mut recorder).unwrap();

        assert_eq!(recorder.order, vec![1, 0]);
        assert_eq!(recorder.deferred, vec![(1, 0, DeferReason::CycleBroken)]);
        assert_eq!(graph.edges_from(1)[0].kind, EdgeKind::MemberPointer);
    }

    #[test]
    fn test_lenient_policy_skips_closing_edge() {
        let mut graph = DependencyGraph::<usize>::new();
        graph.add_edge(Edge::value(0, 1, EdgeSite::Dependency));
        graph.add_edge(Edge::value(1, 0, EdgeSite::Dependency));

        let mut recorder = Recorder::new();
        graph.walk(CyclePolicy::Lenient).visit(&[0, 1], &mut recorder).unwrap();

        assert_eq!(recorder.order, vec![1, 0]);
        assert_eq!(recorder.ignored, vec![(1, 0)]);
    }

    #[test]
    fn test_insertion_order_does_not_change_result() {
        let edges = [(0, 3), (0, 1), (1, 2), (3, 2), (4, 0)];

        let mut forward = DependencyGraph::<usize>::new();
        for (from, to) in edges {
            forward.add_edge(Edge::value(from, to, EdgeSite::Member(0)));
        }
        let mut backward = DependencyGraph::<usize>::new();
        for (from, to) in edges.iter().rev() {
            backward.add_edge(Edge::value(*from, *to, EdgeSite::Member(0)));
        }

        assert_eq!(order(&mut forward, &[4, 3, 2, 1, 0]), order(&mut backward, &[0, 1, 2, 3, 4]));
    }

    #[test]
    fn test_new_walk_starts_fresh() {
        let mut graph = DependencyGraph::<usize>::new();
        graph.add_edge(Edge::value(0, 1, EdgeSite::Member(0)));

        assert_eq!(order(&mut graph, &[0]), vec![1, 0]);
        assert_eq!(order(&mut graph, &[0]), vec![1, 0]);
    }

    #[test]
    fn test_walk_remembers_emitted_across_visits() {
        let mut graph = DependencyGraph::<usize>::new();
        graph.add_edge(Edge::value(0, 1, EdgeSite::Member(0)));

        let mut recorder = Recorder::new();
        let mut walk = graph.walk(CyclePolicy::Strict);
        walk.visit(&[0], &mut recorder).unwrap();
        walk.visit(&[1], &mut recorder).unwrap();
        assert!(walk.is_emitted(1));

        assert_eq!(recorder.order, vec![1, 0]);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let depth = 200_000;
        let mut graph = DependencyGraph::with_capacity(depth);
        for v in 0..depth - 1 {
            graph.add_edge(Edge::value(v, v + 1, EdgeSite::Member(0)));
        }

        let out = order(&mut graph, &[0]);
        assert_eq!(out.len(), depth);
        assert_eq!(out[0], depth - 1);
        assert_eq!(out[depth - 1], 0);
    }
}
