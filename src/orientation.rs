use crate::config::LayoutConfig;
use crate::graph::DiagramGraph;
use crate::layout::{Direction, Layout, compute_layout};

/// Bounding-box area of the laid-out nodes: max over nodes of position plus
/// extent, per axis.
fn bounding_area(layout: &Layout) -> f32 {
    let mut max_x = 0.0f32;
    let mut max_y = 0.0f32;
    for node in layout.nodes.values() {
        max_x = max_x.max(node.x + node.width);
        max_y = max_y.max(node.y + node.height);
    }
    max_x * max_y
}

/// Lays the graph out in all four directions and keeps the one with the
/// smallest bounding-box area. Strict `<` means the earliest direction in
/// `Direction::ALL` wins ties, so the choice is stable across runs.
pub fn select_orientation(graph: &DiagramGraph, config: &LayoutConfig) -> (Direction, Layout) {
    let mut best: Option<(Direction, Layout, f32)> = None;
    for direction in Direction::ALL {
        let layout = compute_layout(graph, direction, config);
        let area = bounding_area(&layout);
        let better = match &best {
            Some((_, _, best_area)) => area < *best_area,
            None => true,
        };
        if better {
            best = Some((direction, layout, area));
        }
    }
    let (direction, layout, _) = best.expect("at least one direction evaluated");
    (direction, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_tree;
    use crate::family::{FamilyMember, FamilyTree, Gender};
    use crate::graph::build_graph;
    use crate::theme::Theme;
    use std::collections::BTreeMap;

    fn sample_graph() -> DiagramGraph {
        build_graph(&sample_tree(), &Theme::default_light(), &LayoutConfig::default())
    }

    #[test]
    fn selection_is_deterministic() {
        let config = LayoutConfig::default();
        let graph = sample_graph();
        let (first, _) = select_orientation(&graph, &config);
        let (second, _) = select_orientation(&graph, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn selects_the_smallest_area() {
        let config = LayoutConfig::default();
        let graph = sample_graph();
        let (chosen, chosen_layout) = select_orientation(&graph, &config);
        let chosen_area = bounding_area(&chosen_layout);
        for direction in Direction::ALL {
            let area = bounding_area(&compute_layout(&graph, direction, &config));
            assert!(chosen_area <= area, "{:?} beat the chosen {:?}", direction, chosen);
        }
    }

    #[test]
    fn tie_breaks_to_first_direction() {
        // A single node lays out to the same box in every direction.
        let only = FamilyMember {
            id: "solo".to_string(),
            name: "SOLO".to_string(),
            gender: Gender::Female,
            birth_date: None,
            death_date: None,
            spouse_ids: Vec::new(),
            parent_ids: Vec::new(),
            children: Vec::new(),
            notes: None,
            photo: None,
            is_bloodline: true,
        };
        let mut members = BTreeMap::new();
        members.insert(only.id.clone(), only);
        let tree = FamilyTree {
            root_member_id: "solo".to_string(),
            members,
            connections: Vec::new(),
        };
        let config = LayoutConfig::default();
        let graph = build_graph(&tree, &Theme::default_light(), &config);
        let (direction, _) = select_orientation(&graph, &config);
        assert_eq!(direction, Direction::TopBottom);
    }

    #[test]
    fn returned_layout_matches_direction() {
        let config = LayoutConfig::default();
        let graph = sample_graph();
        let (direction, layout) = select_orientation(&graph, &config);
        assert_eq!(layout.direction, direction);
    }
}
