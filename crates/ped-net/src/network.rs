//! Sidewalk network representation and builder.
//!
//! # Data layout
//!
//! The graph is an explicit adjacency list: each [`SidewalkNode`] carries its
//! own neighbour IDs.  Connections are symmetric — [`SidewalkNetworkBuilder::connect`]
//! inserts the edge in both directions, and routing assumes bidirectional
//! traversal throughout.  The network is built once and read-only for the
//! duration of a simulation run.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`.  Used
//! to snap agent origins/destinations to walkable nodes, optionally filtered
//! by accessibility.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use ped_core::{GeoPoint, NodeId, ObstacleId};

// ── Accessibility ─────────────────────────────────────────────────────────────

/// How accessible a sidewalk node is to mobility-restricted pedestrians.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Accessibility {
    /// Kerb cuts, adequate width, no steps.
    #[default]
    Full,
    /// Passable with difficulty (narrow, rough surface).
    Limited,
    /// Not passable for wheeled mobility (stairs, blocked).
    None,
}

/// The accessibility a path query demands of the network.
///
/// `Full` excludes [`Accessibility::None`] nodes from snapping *and* graph
/// expansion; `Limited` only excludes them from snapping (the more
/// permissive variant); `Any` applies no filter.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccessNeed {
    #[default]
    Any,
    Limited,
    Full,
}

// ── Nodes and obstacles ───────────────────────────────────────────────────────

/// One walkable node of the sidewalk graph.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SidewalkNode {
    pub id: NodeId,
    pub pos: GeoPoint,
    /// Symmetric adjacency: if A lists B, B lists A.
    pub neighbors: Vec<NodeId>,
    /// Walkable width in metres.
    pub width_m: f64,
    pub access: Accessibility,
    /// Comfortable simultaneous occupancy (people).
    pub capacity: u32,
}

/// Category tag for a static obstacle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObstacleKind {
    Construction,
    Furniture,
    Vendor,
    Other,
}

/// A static circular obstruction on the sidewalk.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub id: ObstacleId,
    pub pos: GeoPoint,
    pub radius_m: f64,
    pub kind: ObstacleKind,
}

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// the associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Sufficient for
    /// nearest-node ordering within a city (error < 0.1 % at ≤ 60° lat).
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── SidewalkNetwork ───────────────────────────────────────────────────────────

/// The sidewalk graph plus static obstacles and a spatial index.
///
/// Build via [`SidewalkNetworkBuilder`]; immutable afterwards.
#[derive(Default)]
pub struct SidewalkNetwork {
    nodes: Vec<SidewalkNode>,
    obstacles: Vec<Obstacle>,
    spatial_idx: RTree<NodeEntry>,
}

impl std::fmt::Debug for SidewalkNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SidewalkNetwork")
            .field("nodes", &self.nodes.len())
            .field("obstacles", &self.obstacles.len())
            .finish()
    }
}

impl SidewalkNetwork {
    /// An empty network with no nodes or obstacles.  Any path query against
    /// it degrades to the direct two-point segment.
    pub fn empty() -> Self {
        SidewalkNetworkBuilder::new().build()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SidewalkNode {
        &self.nodes[id.index()]
    }

    pub fn nodes(&self) -> &[SidewalkNode] {
        &self.nodes
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Nearest node to `pos` among those satisfying `filter`, or `None` if
    /// no node passes.
    pub fn nearest_node<F>(&self, pos: GeoPoint, filter: F) -> Option<NodeId>
    where
        F: Fn(&SidewalkNode) -> bool,
    {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .map(|e| e.id)
            .find(|&id| filter(self.node(id)))
    }
}

// ── SidewalkNetworkBuilder ────────────────────────────────────────────────────

/// Construct a [`SidewalkNetwork`] incrementally, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ped_core::GeoPoint;
/// use ped_net::{Accessibility, SidewalkNetworkBuilder};
///
/// let mut b = SidewalkNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(40.71, -74.00), 2.0, Accessibility::Full, 10);
/// let c = b.add_node(GeoPoint::new(40.72, -74.00), 2.0, Accessibility::Full, 10);
/// b.connect(a, c);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.node(a).neighbors, vec![c]);
/// ```
pub struct SidewalkNetworkBuilder {
    nodes: Vec<SidewalkNode>,
    obstacles: Vec<Obstacle>,
}

impl SidewalkNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), obstacles: Vec::new() }
    }

    /// Add a sidewalk node and return its `NodeId` (sequential from 0).
    pub fn add_node(
        &mut self,
        pos: GeoPoint,
        width_m: f64,
        access: Accessibility,
        capacity: u32,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SidewalkNode {
            id,
            pos,
            neighbors: Vec::new(),
            width_m,
            access,
            capacity,
        });
        id
    }

    /// Connect two nodes **symmetrically**.  Duplicate connections are
    /// ignored; self-loops are rejected.
    pub fn connect(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        if !self.nodes[a.index()].neighbors.contains(&b) {
            self.nodes[a.index()].neighbors.push(b);
        }
        if !self.nodes[b.index()].neighbors.contains(&a) {
            self.nodes[b.index()].neighbors.push(a);
        }
    }

    /// Register a static obstacle.
    pub fn add_obstacle(&mut self, pos: GeoPoint, radius_m: f64, kind: ObstacleKind) -> ObstacleId {
        let id = ObstacleId(self.obstacles.len() as u32);
        self.obstacles.push(Obstacle { id, pos, radius_m, kind });
        id
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Position of a node added earlier (used by auto-generation to compute
    /// link distances).
    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()].pos
    }

    /// Consume the builder and produce a [`SidewalkNetwork`].
    ///
    /// Bulk-loads the R-tree in O(N log N).
    pub fn build(self) -> SidewalkNetwork {
        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .map(|n| NodeEntry { point: [n.pos.lat, n.pos.lon], id: n.id })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        SidewalkNetwork {
            nodes: self.nodes,
            obstacles: self.obstacles,
            spatial_idx,
        }
    }
}

impl Default for SidewalkNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
