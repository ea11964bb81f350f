use crate::config::LayoutConfig;
use crate::graph::{DiagramGraph, NodeKind};
use dagre_rust::{
    GraphConfig as DagreConfig, GraphEdge as DagreEdge, GraphNode as DagreNode,
    layout as dagre_layout,
};
use graphlib_rust::{Graph as DagreGraph, GraphOption};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    TopBottom,
    BottomTop,
    LeftRight,
    RightLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::TopBottom,
        Direction::BottomTop,
        Direction::LeftRight,
        Direction::RightLeft,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "TB" | "TD" => Some(Self::TopBottom),
            "BT" => Some(Self::BottomTop),
            "LR" => Some(Self::LeftRight),
            "RL" => Some(Self::RightLeft),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::TopBottom => "TB",
            Self::BottomTop => "BT",
            Self::LeftRight => "LR",
            Self::RightLeft => "RL",
        }
    }

    fn rankdir(self) -> &'static str {
        match self {
            Self::TopBottom => "tb",
            Self::BottomTop => "bt",
            Self::LeftRight => "lr",
            Self::RightLeft => "rl",
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LeftRight | Self::RightLeft)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    Top,
    Bottom,
    Left,
    Right,
}

/// Sides where edges attach: (target anchor for incoming, source anchor for
/// outgoing), per layout direction.
fn anchor_sides(direction: Direction) -> (AnchorSide, AnchorSide) {
    match direction {
        Direction::TopBottom => (AnchorSide::Top, AnchorSide::Bottom),
        Direction::BottomTop => (AnchorSide::Bottom, AnchorSide::Top),
        Direction::LeftRight => (AnchorSide::Left, AnchorSide::Right),
        Direction::RightLeft => (AnchorSide::Right, AnchorSide::Left),
    }
}

#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub id: String,
    pub kind: NodeKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub source_anchor: AnchorSide,
    pub target_anchor: AnchorSide,
}

impl NodeLayout {
    pub fn anchor_point(&self, side: AnchorSide) -> (f32, f32) {
        match side {
            AnchorSide::Top => (self.x + self.width / 2.0, self.y),
            AnchorSide::Bottom => (self.x + self.width / 2.0, self.y + self.height),
            AnchorSide::Left => (self.x, self.y + self.height / 2.0),
            AnchorSide::Right => (self.x + self.width, self.y + self.height / 2.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EdgeLayout {
    pub id: String,
    pub source: String,
    pub target: String,
    pub points: Vec<(f32, f32)>,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub direction: Direction,
    pub nodes: BTreeMap<String, NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub width: f32,
    pub height: f32,
}

/// Runs the layered layout for one direction. A fresh dagre graph value is
/// built per call, so repeated trials are independent.
pub fn compute_layout(graph: &DiagramGraph, direction: Direction, config: &LayoutConfig) -> Layout {
    let mut dagre_graph: DagreGraph<DagreConfig, DagreNode, DagreEdge> =
        DagreGraph::new(Some(GraphOption {
            directed: Some(true),
            multigraph: Some(false),
            compound: Some(false),
        }));

    let mut graph_config = DagreConfig::default();
    graph_config.rankdir = Some(direction.rankdir().to_string());
    graph_config.nodesep = Some(config.node_spacing);
    graph_config.ranksep = Some(config.rank_spacing);
    graph_config.marginx = Some(config.margin_x);
    graph_config.marginy = Some(config.margin_y);
    dagre_graph.set_graph(graph_config);

    for node in &graph.nodes {
        let mut dagre_node = DagreNode::default();
        dagre_node.width = node.width;
        dagre_node.height = node.height;
        dagre_graph.set_node(node.id.clone(), Some(dagre_node));
    }

    let mut edge_set: HashSet<(String, String)> = HashSet::new();
    for edge in &graph.edges {
        if !edge_set.insert((edge.source.clone(), edge.target.clone())) {
            continue;
        }
        let _ = dagre_graph.set_edge(&edge.source, &edge.target, Some(DagreEdge::default()), None);
    }

    dagre_layout::run_layout(&mut dagre_graph);

    let (target_anchor, source_anchor) = anchor_sides(direction);
    let mut nodes: BTreeMap<String, NodeLayout> = BTreeMap::new();
    for node in &graph.nodes {
        let Some(dagre_node) = dagre_graph.node(&node.id) else {
            continue;
        };
        nodes.insert(
            node.id.clone(),
            NodeLayout {
                id: node.id.clone(),
                kind: node.kind.clone(),
                // dagre reports centers; positions are top-left
                x: dagre_node.x - node.width / 2.0,
                y: dagre_node.y - node.height / 2.0,
                width: node.width,
                height: node.height,
                source_anchor,
                target_anchor,
            },
        );
    }

    let mut edges = Vec::with_capacity(graph.edges.len());
    for edge in &graph.edges {
        let (Some(source), Some(target)) = (nodes.get(&edge.source), nodes.get(&edge.target))
        else {
            continue;
        };
        edges.push(EdgeLayout {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
            points: vec![
                source.anchor_point(source.source_anchor),
                target.anchor_point(target.target_anchor),
            ],
        });
    }

    let (width, height) = canvas_extent(&nodes, config);
    Layout {
        direction,
        nodes,
        edges,
        width,
        height,
    }
}

fn canvas_extent(nodes: &BTreeMap<String, NodeLayout>, config: &LayoutConfig) -> (f32, f32) {
    let mut max_x = 0.0f32;
    let mut max_y = 0.0f32;
    for node in nodes.values() {
        max_x = max_x.max(node.x + node.width);
        max_y = max_y.max(node.y + node.height);
    }
    (max_x + config.margin_x, max_y + config.margin_y)
}
