use crate::config::LayoutConfig;
use crate::family::{FamilyMember, FamilyTree};
use crate::text_metrics;
use crate::theme::Theme;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub enum NodeKind {
    Member(FamilyMember),
    /// Synthetic couple node that merges converging parent edges before
    /// fanning out to children.
    FamilyUnit {
        label: String,
        members: Vec<String>,
    },
}

#[derive(Debug, Clone)]
pub struct DiagramNode {
    pub id: String,
    pub kind: NodeKind,
    pub width: f32,
    pub height: f32,
}

impl DiagramNode {
    pub fn label(&self) -> &str {
        match &self.kind {
            NodeKind::Member(member) => &member.name,
            NodeKind::FamilyUnit { label, .. } => label,
        }
    }

    pub fn is_family_unit(&self) -> bool {
        matches!(self.kind, NodeKind::FamilyUnit { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone)]
pub struct DiagramGraph {
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
}

impl DiagramGraph {
    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

fn push_edge(edges: &mut Vec<DiagramEdge>, source: &str, target: &str) {
    edges.push(DiagramEdge {
        id: format!("{source}-{target}"),
        source: source.to_string(),
        target: target.to_string(),
    });
}

fn member_node_width(member: &FamilyMember, theme: &Theme, config: &LayoutConfig) -> f32 {
    let label = format!("{} {}", member.name, member.gender.glyph());
    let measured = text_metrics::measure_text_width(&label, theme.font_size, &theme.font_family)
        .unwrap_or_else(|| label.chars().count() as f32 * theme.font_size * 0.56);
    (measured + config.label_padding_x * 2.0).max(config.member_width)
}

/// Derives the diagram graph from the member records: one person node per
/// member, one family-unit node per unordered spouse pair, edges
/// member -> unit -> shared children, and direct member -> child edges for
/// members without a spouse.
pub fn build_graph(tree: &FamilyTree, theme: &Theme, config: &LayoutConfig) -> DiagramGraph {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for member in tree.members.values() {
        nodes.push(DiagramNode {
            id: member.id.clone(),
            kind: NodeKind::Member(member.clone()),
            width: member_node_width(member, theme, config),
            height: config.member_height,
        });
    }

    let mut seen_units: BTreeSet<String> = BTreeSet::new();
    for member in tree.members.values() {
        for spouse_id in &member.spouse_ids {
            let mut pair = [member.id.as_str(), spouse_id.as_str()];
            pair.sort_unstable();
            let key = pair.join("-");
            if !seen_units.insert(key.clone()) {
                continue;
            }

            let (Some(first), Some(second)) =
                (tree.members.get(pair[0]), tree.members.get(pair[1]))
            else {
                continue;
            };

            let unit_id = format!("family-{key}");
            nodes.push(DiagramNode {
                id: unit_id.clone(),
                kind: NodeKind::FamilyUnit {
                    label: format!("{} + {}", first.name, second.name),
                    members: pair.iter().map(|id| id.to_string()).collect(),
                },
                width: config.unit_size,
                height: config.unit_size,
            });

            for spouse in pair {
                push_edge(&mut edges, spouse, &unit_id);
            }

            // Only children recorded under both members of the unit count as
            // the couple's children.
            for child in &first.children {
                if second.children.contains(child) {
                    push_edge(&mut edges, &unit_id, child);
                }
            }
        }
    }

    for member in tree.members.values() {
        if member.spouse_ids.is_empty() {
            for child in &member.children {
                push_edge(&mut edges, &member.id, child);
            }
        }
    }

    DiagramGraph { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_tree;
    use crate::family::{FamilyTree, Gender};
    use std::collections::BTreeMap;

    fn graph_for(tree: &FamilyTree) -> DiagramGraph {
        build_graph(tree, &Theme::default_light(), &LayoutConfig::default())
    }

    fn simple_member(id: &str, bloodline: bool) -> crate::family::FamilyMember {
        crate::family::FamilyMember {
            id: id.to_string(),
            name: id.to_uppercase(),
            gender: Gender::Male,
            birth_date: None,
            death_date: None,
            spouse_ids: Vec::new(),
            parent_ids: Vec::new(),
            children: Vec::new(),
            notes: None,
            photo: None,
            is_bloodline: bloodline,
        }
    }

    fn tree_of(members: Vec<crate::family::FamilyMember>) -> FamilyTree {
        let root = members[0].id.clone();
        let mut map = BTreeMap::new();
        for member in members {
            map.insert(member.id.clone(), member);
        }
        FamilyTree {
            root_member_id: root,
            members: map,
            connections: Vec::new(),
        }
    }

    #[test]
    fn sample_graph_counts() {
        let graph = graph_for(&sample_tree());
        let person_nodes = graph.nodes.iter().filter(|n| !n.is_family_unit()).count();
        let unit_nodes = graph.nodes.iter().filter(|n| n.is_family_unit()).count();
        assert_eq!(person_nodes, 8);
        assert_eq!(unit_nodes, 2);

        let member_to_unit = graph
            .edges
            .iter()
            .filter(|e| e.target.starts_with("family-"))
            .count();
        let unit_to_child = graph
            .edges
            .iter()
            .filter(|e| e.source.starts_with("family-"))
            .count();
        assert_eq!(member_to_unit, 4);
        assert_eq!(unit_to_child, 5);
        assert_eq!(graph.edges.len(), 9);
    }

    #[test]
    fn one_unit_per_pair_regardless_of_visit_order() {
        // Both spellings of the couple reach the builder; ids chosen so that
        // map order visits the "wrong" side first.
        let mut zed = simple_member("zed", true);
        zed.spouse_ids = vec!["amy".to_string()];
        let mut amy = simple_member("amy", false);
        amy.spouse_ids = vec!["zed".to_string()];
        let graph = graph_for(&tree_of(vec![zed, amy]));

        let units: Vec<_> = graph.nodes.iter().filter(|n| n.is_family_unit()).collect();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].id, "family-amy-zed");
        match &units[0].kind {
            NodeKind::FamilyUnit { members, .. } => {
                assert_eq!(members, &vec!["amy".to_string(), "zed".to_string()]);
            }
            NodeKind::Member(_) => panic!("expected a family unit"),
        }
    }

    #[test]
    fn unit_forms_when_only_one_side_records_the_marriage() {
        // The lexicographic single-spouse variant silently dropped this case
        // when only the "greater" id carried the link.
        let mut zed = simple_member("zed", true);
        zed.spouse_ids = vec!["amy".to_string()];
        let amy = simple_member("amy", false);
        let graph = graph_for(&tree_of(vec![zed, amy]));
        assert_eq!(graph.nodes.iter().filter(|n| n.is_family_unit()).count(), 1);
    }

    #[test]
    fn child_on_one_parent_only_gets_no_unit_edge() {
        let mut ana = simple_member("ana", true);
        ana.spouse_ids = vec!["ben".to_string()];
        ana.children = vec!["cem".to_string()];
        let mut ben = simple_member("ben", false);
        ben.spouse_ids = vec!["ana".to_string()];
        let cem = simple_member("cem", true);
        let graph = graph_for(&tree_of(vec![ana, ben, cem]));

        assert!(
            !graph
                .edges
                .iter()
                .any(|e| e.source.starts_with("family-") && e.target == "cem")
        );
    }

    #[test]
    fn spouseless_parent_draws_direct_child_edges() {
        let mut ana = simple_member("ana", true);
        ana.children = vec!["ben".to_string(), "cem".to_string()];
        let ben = simple_member("ben", true);
        let cem = simple_member("cem", true);
        let graph = graph_for(&tree_of(vec![ana, ben, cem]));

        assert_eq!(graph.nodes.iter().filter(|n| n.is_family_unit()).count(), 0);
        let direct: Vec<_> = graph.edges.iter().filter(|e| e.source == "ana").collect();
        assert_eq!(direct.len(), 2);
        assert_eq!(direct[0].id, "ana-ben");
        assert_eq!(direct[1].id, "ana-cem");
    }

    #[test]
    fn repeated_builds_are_identical() {
        let tree = sample_tree();
        let first = graph_for(&tree);
        let second = graph_for(&tree);
        assert_eq!(first.edges, second.edges);
        let first_ids: Vec<_> = first.nodes.iter().map(|n| n.id.clone()).collect();
        let second_ids: Vec<_> = second.nodes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn remarriage_yields_one_unit_per_pair() {
        let mut ali = simple_member("ali", true);
        ali.spouse_ids = vec!["bea".to_string(), "eda".to_string()];
        let mut bea = simple_member("bea", false);
        bea.spouse_ids = vec!["ali".to_string()];
        let mut eda = simple_member("eda", false);
        eda.spouse_ids = vec!["ali".to_string()];
        let graph = graph_for(&tree_of(vec![ali, bea, eda]));

        let unit_ids: Vec<_> = graph
            .nodes
            .iter()
            .filter(|n| n.is_family_unit())
            .map(|n| n.id.clone())
            .collect();
        assert_eq!(unit_ids, vec!["family-ali-bea", "family-ali-eda"]);
        // ali attaches to both of his unit nodes
        assert_eq!(
            graph
                .edges
                .iter()
                .filter(|e| e.source == "ali" && e.target.starts_with("family-"))
                .count(),
            2
        );
    }

    #[test]
    fn long_names_widen_member_nodes() {
        let config = LayoutConfig::default();
        let mut short = simple_member("a", true);
        short.name = "AL".to_string();
        let mut long = simple_member("b", true);
        long.name = "CONSTANTINOPLE-ALEXANDRETTA THE THIRD".to_string();
        let graph = graph_for(&tree_of(vec![short, long]));

        let short_node = graph.node("a").unwrap();
        let long_node = graph.node("b").unwrap();
        assert_eq!(short_node.width, config.member_width);
        assert!(long_node.width > config.member_width);
    }
}
