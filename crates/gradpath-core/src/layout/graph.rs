//! Positioned node/edge data for drawing a plan.

use serde::{Deserialize, Serialize};

use crate::session::PlanLayout;

/// Pixel grid for [`build_graph`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub column_width: f64,
    pub row_height: f64,
    pub start_x: f64,
    pub start_y: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            column_width: 200.0,
            row_height: 90.0,
            start_x: 100.0,
            start_y: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    pub credits: u32,
    pub semester: u32,
    pub vertical_index: usize,
    pub completed: bool,
    pub unresolved: bool,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// `"{source}-{target}"`.
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_x: f64,
    pub source_y: f64,
    pub target_x: f64,
    pub target_y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Place every node of `plan` on the grid and attach edge coordinates.
///
/// Column is the semester number, so completed courses (semester 0) sit
/// at `start_x`. Edges whose endpoints are not both in the plan are dropped.
pub fn build_graph(plan: &PlanLayout, grid: &GridConfig) -> GraphData {
    let nodes: Vec<GraphNode> = plan
        .nodes
        .iter()
        .map(|node| GraphNode {
            id: node.id.clone(),
            name: node.name.clone(),
            credits: node.credits,
            semester: node.semester,
            vertical_index: node.vertical_index,
            completed: node.completed,
            unresolved: node.unresolved,
            x: grid.start_x + f64::from(node.semester) * grid.column_width,
            y: grid.start_y + node.vertical_index as f64 * grid.row_height,
        })
        .collect();

    let find = |id: &str| nodes.iter().find(|n| n.id == id);
    let edges = plan
        .edges
        .iter()
        .filter_map(|edge| {
            let source = find(&edge.source)?;
            let target = find(&edge.target)?;
            Some(GraphEdge {
                id: format!("{}-{}", edge.source, edge.target),
                source: edge.source.clone(),
                target: edge.target.clone(),
                source_x: source.x,
                source_y: source.y,
                target_x: target.x,
                target_y: target.y,
            })
        })
        .collect();

    GraphData { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{LayoutEdge, LayoutNode};

    fn node(id: &str, semester: u32, vertical_index: usize) -> LayoutNode {
        LayoutNode {
            id: id.to_string(),
            name: id.to_string(),
            credits: 3,
            semester,
            vertical_index,
            completed: semester == 0,
            unresolved: false,
        }
    }

    fn edge(source: &str, target: &str) -> LayoutEdge {
        LayoutEdge {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    #[test]
    fn positions_follow_the_grid() {
        let plan = PlanLayout {
            nodes: vec![node("MATH140", 1, 0), node("CMSC131", 1, 1), node("MATH141", 2, 0)],
            edges: vec![edge("MATH140", "MATH141")],
            unassigned: vec![],
        };
        let graph = build_graph(&plan, &GridConfig::default());

        let cmsc131 = graph.nodes.iter().find(|n| n.id == "CMSC131").unwrap();
        assert_eq!((cmsc131.x, cmsc131.y), (300.0, 190.0));

        assert_eq!(graph.edges.len(), 1);
        let e = &graph.edges[0];
        assert_eq!(e.id, "MATH140-MATH141");
        assert_eq!((e.source_x, e.source_y), (300.0, 100.0));
        assert_eq!((e.target_x, e.target_y), (500.0, 100.0));
    }

    #[test]
    fn completed_courses_sit_in_the_first_column() {
        let plan = PlanLayout {
            nodes: vec![node("CMSC131", 0, 0)],
            edges: vec![],
            unassigned: vec![],
        };
        let grid = GridConfig {
            column_width: 150.0,
            row_height: 50.0,
            start_x: 10.0,
            start_y: 20.0,
        };
        let graph = build_graph(&plan, &grid);
        assert_eq!((graph.nodes[0].x, graph.nodes[0].y), (10.0, 20.0));
    }

    #[test]
    fn dangling_edges_are_dropped() {
        let plan = PlanLayout {
            nodes: vec![node("MATH141", 1, 0)],
            edges: vec![edge("MATH140", "MATH141")],
            unassigned: vec![],
        };
        assert!(build_graph(&plan, &GridConfig::default()).edges.is_empty());
    }
}
