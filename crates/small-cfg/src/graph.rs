use std::fmt;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, EdgeRef};
use rustc_hash::{FxHashMap, FxHashSet};
use small_ast::{Function, ProgramPoint};

use crate::builder::{Frontier, sequence_cfg};
use crate::edge::CfgEdge;

/// An owned control-flow graph keyed by structural program-point identity.
///
/// Nodes are deduplicated through an index map, so merging two graphs that
/// both mention a point yields a single node. Edges are deduplicated on the
/// full `(source, target, condition, case)` tuple; parallel edges with
/// different conditions are kept.
#[derive(Clone, Debug, Default)]
pub struct Cfg {
    graph: DiGraph<ProgramPoint, CfgEdge>,
    indices: FxHashMap<ProgramPoint, NodeIndex>,
    entry: Option<ProgramPoint>,
}

// -- Construction -----------------------------------------------------------

impl Cfg {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph of a whole function. The first statement is the entry.
    pub fn build(function: &Function) -> Self {
        let (frontier, mut cfg) = sequence_cfg(function.body(), Frontier::new());
        cfg.entry = function.body().first().map(ProgramPoint::from);
        tracing::debug!(
            function = function.name(),
            nodes = cfg.node_count(),
            edges = cfg.edge_count(),
            open_exits = frontier.len(),
            "built control-flow graph"
        );
        cfg
    }

    /// Insert `point` unless an identical point is already present.
    pub fn add_node(&mut self, point: ProgramPoint) -> NodeIndex {
        if let Some(&index) = self.indices.get(&point) {
            return index;
        }
        let index = self.graph.add_node(point.clone());
        self.indices.insert(point, index);
        index
    }

    /// Insert an edge, adding missing endpoints. Returns `false` when the
    /// exact edge already exists.
    pub fn add_edge(&mut self, source: &ProgramPoint, target: &ProgramPoint, edge: CfgEdge) -> bool {
        let from = self.add_node(source.clone());
        let to = self.add_node(target.clone());
        if self
            .graph
            .edges_connecting(from, to)
            .any(|existing| existing.weight() == &edge)
        {
            return false;
        }
        self.graph.add_edge(from, to, edge);
        true
    }

    /// Union `other` into `self`. Merging is idempotent.
    pub fn merge(&mut self, other: &Cfg) {
        for point in other.graph.node_weights() {
            self.add_node(point.clone());
        }
        for edge in other.graph.edge_references() {
            let source = &other.graph[edge.source()];
            let target = &other.graph[edge.target()];
            self.add_edge(source, target, edge.weight().clone());
        }
        if self.entry.is_none() {
            self.entry = other.entry.clone();
        }
    }

    pub fn set_entry(&mut self, point: ProgramPoint) {
        self.add_node(point.clone());
        self.entry = Some(point);
    }
}

// -- Queries ----------------------------------------------------------------

impl Cfg {
    pub fn entry(&self) -> Option<&ProgramPoint> {
        self.entry.as_ref()
    }

    pub fn contains(&self, point: &ProgramPoint) -> bool {
        self.indices.contains_key(point)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All points in insertion order.
    pub fn points(&self) -> impl Iterator<Item = &ProgramPoint> {
        self.graph.node_weights()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&ProgramPoint, &ProgramPoint, &CfgEdge)> {
        self.graph.edge_references().map(|edge| {
            (
                &self.graph[edge.source()],
                &self.graph[edge.target()],
                edge.weight(),
            )
        })
    }

    /// Edges leaving `point`, as `(target, edge)` pairs.
    pub fn outgoing(&self, point: &ProgramPoint) -> Vec<(&ProgramPoint, &CfgEdge)> {
        self.neighbors(point, Direction::Outgoing)
    }

    /// Edges entering `point`, as `(source, edge)` pairs.
    pub fn incoming(&self, point: &ProgramPoint) -> Vec<(&ProgramPoint, &CfgEdge)> {
        self.neighbors(point, Direction::Incoming)
    }

    /// Distinct successor points of `point`.
    pub fn successors(&self, point: &ProgramPoint) -> Vec<&ProgramPoint> {
        let mut seen = FxHashSet::default();
        self.outgoing(point)
            .into_iter()
            .filter_map(|(target, _)| seen.insert(target).then_some(target))
            .collect()
    }

    /// Distinct predecessor points of `point`.
    pub fn predecessors(&self, point: &ProgramPoint) -> Vec<&ProgramPoint> {
        let mut seen = FxHashSet::default();
        self.incoming(point)
            .into_iter()
            .filter_map(|(source, _)| seen.insert(source).then_some(source))
            .collect()
    }

    /// Loop heads are the `while` guards; they are the only points with
    /// incoming back edges.
    pub fn is_loop_head(&self, point: &ProgramPoint) -> bool {
        self.contains(point) && point.statement().is_loop()
    }

    /// Every point reachable from `start`, including `start` itself.
    pub fn reachable_from(&self, start: &ProgramPoint) -> FxHashSet<ProgramPoint> {
        let mut reached = FxHashSet::default();
        let Some(&index) = self.indices.get(start) else {
            return reached;
        };
        let mut dfs = Dfs::new(&self.graph, index);
        while let Some(next) = dfs.next(&self.graph) {
            reached.insert(self.graph[next].clone());
        }
        reached
    }

    pub fn point_at_line(&self, line: usize) -> Option<&ProgramPoint> {
        self.graph.node_weights().find(|point| point.line() == line)
    }

    fn neighbors(
        &self,
        point: &ProgramPoint,
        direction: Direction,
    ) -> Vec<(&ProgramPoint, &CfgEdge)> {
        let Some(&index) = self.indices.get(point) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(index, direction)
            .map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                (edge.id(), &self.graph[other], edge.weight())
            })
            .collect();
        // petgraph walks adjacency lists newest first
        edges.sort_by_key(|(id, _, _)| *id);
        edges
            .into_iter()
            .map(|(_, point, edge)| (point, edge))
            .collect()
    }
}

impl fmt::Display for Cfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entry {
            Some(entry) => writeln!(f, "entry {entry}")?,
            None => writeln!(f, "entry <none>")?,
        }
        for (source, target, edge) in self.edges() {
            if edge.is_conditional() {
                writeln!(
                    f,
                    "{} -> {} [{}: {}]",
                    source.line(),
                    target.line(),
                    edge.case,
                    edge.condition
                )?;
            } else {
                writeln!(f, "{} -> {}", source.line(), target.line())?;
            }
        }
        Ok(())
    }
}
