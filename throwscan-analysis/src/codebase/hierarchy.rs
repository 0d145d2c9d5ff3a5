//! Class and interface hierarchy.

use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::Bfs;
use petgraph::Directed;
use throwscan_core::types::{FxHashMap, TypeId};

/// Directed graph of types. Edges run from a class to its parent class and
/// to each interface it implements.
pub struct ClassHierarchy {
    graph: StableGraph<TypeId, (), Directed>,
    node_index: FxHashMap<TypeId, NodeIndex>,
}

impl ClassHierarchy {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: FxHashMap::default(),
        }
    }

    pub fn type_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn contains(&self, ty: TypeId) -> bool {
        self.node_index.contains_key(&ty)
    }

    /// Add a type, returning its node. Adding twice is a no-op.
    pub fn add_type(&mut self, ty: TypeId) -> NodeIndex {
        if let Some(&existing) = self.node_index.get(&ty) {
            return existing;
        }
        let idx = self.graph.add_node(ty);
        self.node_index.insert(ty, idx);
        idx
    }

    /// Record that `child` extends or implements `parent`.
    pub fn add_parent(&mut self, child: TypeId, parent: TypeId) {
        let c = self.add_type(child);
        let p = self.add_type(parent);
        if self.graph.find_edge(c, p).is_none() {
            self.graph.add_edge(c, p, ());
        }
    }

    /// `ty` followed by every type reachable from it, breadth first: no type
    /// comes before one that is fewer edges away from `ty`.
    /// Unknown types have only themselves as ancestor. Cycles are tolerated.
    pub fn ancestors(&self, ty: TypeId) -> Vec<TypeId> {
        let Some(&start) = self.node_index.get(&ty) else {
            return vec![ty];
        };
        let mut out = Vec::new();
        let mut bfs = Bfs::new(&self.graph, start);
        while let Some(idx) = bfs.next(&self.graph) {
            if let Some(&id) = self.graph.node_weight(idx) {
                out.push(id);
            }
        }
        out
    }

    pub fn is_subtype(&self, child: TypeId, ancestor: TypeId) -> bool {
        child == ancestor || self.ancestors(child).contains(&ancestor)
    }
}

impl Default for ClassHierarchy {
    fn default() -> Self {
        Self::new()
    }
}
