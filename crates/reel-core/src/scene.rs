//! # Scene Module
//!
//! Arena-based visual tree produced for a single frame, and the `Scene` trait
//! every composition implements.
//!
//! ## Responsibilities
//! - **Node Storage**: `Vec<VisualNode>` arena with `NodeId` indices, root at index 0.
//! - **Hierarchy**: Parent-child relationships with cycle prevention.
//! - **Grafting**: Nesting a child scene's whole tree under a parent node.
//!
//! ## Key Types
//! - `VisualTree`: The arena container, built fresh for every frame.
//! - `VisualNode`: A shape, text or group plus its `VisualState` for that frame.
//! - `Scene`: A pure function from frame to `VisualTree`.

use crate::types::{Color, CompositionMeta, Frame, Transform};
use glam::Vec2;
use serde::Serialize;

/// Index into a `VisualTree` arena.
pub type NodeId = usize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Group,
    Rect {
        width: f32,
        height: f32,
        corner_radius: f32,
    },
    Ellipse {
        width: f32,
        height: f32,
    },
    Text {
        content: String,
        font_size: f32,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fill {
    Solid {
        color: Color,
    },
    /// CSS-style angle in degrees; stops are `(color, offset in [0, 1])`.
    LinearGradient {
        angle: f32,
        stops: Vec<(Color, f32)>,
    },
    RadialGradient {
        stops: Vec<(Color, f32)>,
    },
}

impl Fill {
    pub fn solid(color: Color) -> Self {
        Fill::Solid { color }
    }

    pub fn linear(angle: f32, stops: impl Into<Vec<(Color, f32)>>) -> Self {
        Fill::LinearGradient {
            angle,
            stops: stops.into(),
        }
    }

    pub fn radial(stops: impl Into<Vec<(Color, f32)>>) -> Self {
        Fill::RadialGradient {
            stops: stops.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub dashed: bool,
}

/// Everything about a node that animates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisualState {
    pub opacity: f32,
    pub transform: Transform,
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
    /// Gaussian blur radius in pixels.
    pub blur: f32,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            transform: Transform::IDENTITY,
            fill: None,
            stroke: None,
            blur: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisualNode {
    pub name: String,
    pub kind: NodeKind,
    /// Layout origin relative to the parent, before `state.transform`.
    pub position: Vec2,
    pub state: VisualState,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl VisualNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            position: Vec2::ZERO,
            state: VisualState::default(),
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    pub fn rect(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self::new(
            name,
            NodeKind::Rect {
                width,
                height,
                corner_radius: 0.0,
            },
        )
    }

    pub fn ellipse(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self::new(name, NodeKind::Ellipse { width, height })
    }

    pub fn text(name: impl Into<String>, content: impl Into<String>, font_size: f32) -> Self {
        Self::new(
            name,
            NodeKind::Text {
                content: content.into(),
                font_size,
            },
        )
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        if let NodeKind::Rect { corner_radius, .. } = &mut self.kind {
            *corner_radius = radius;
        }
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.state.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.state.transform = transform;
        self
    }

    pub fn fill(mut self, fill: Fill) -> Self {
        self.state.fill = Some(fill);
        self
    }

    pub fn stroke(mut self, color: Color, width: f32) -> Self {
        self.state.stroke = Some(Stroke {
            color,
            width,
            dashed: false,
        });
        self
    }

    pub fn dashed_stroke(mut self, color: Color, width: f32) -> Self {
        self.state.stroke = Some(Stroke {
            color,
            width,
            dashed: true,
        });
        self
    }

    pub fn blur(mut self, radius: f32) -> Self {
        self.state.blur = radius;
        self
    }
}

/// The visual output of one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisualTree {
    pub width: u32,
    pub height: u32,
    pub nodes: Vec<VisualNode>,
}

impl VisualTree {
    pub const ROOT: NodeId = 0;

    /// A tree holding only a full-frame root group.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            nodes: vec![VisualNode::group("root")],
        }
    }

    pub fn root(&self) -> &VisualNode {
        &self.nodes[Self::ROOT]
    }

    pub fn root_mut(&mut self) -> &mut VisualNode {
        &mut self.nodes[Self::ROOT]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Adds a detached node and returns its ID.
    pub fn add_node(&mut self, mut node: VisualNode) -> NodeId {
        node.children.clear();
        node.parent = None;
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }

    /// Adds `node` as the last child of `parent`.
    ///
    /// A missing parent leaves the node detached.
    pub fn append(&mut self, parent: NodeId, node: VisualNode) -> NodeId {
        let id = self.add_node(node);
        self.try_add_child(parent, id);
        id
    }

    /// Attempts to establish a parent-child relationship between two nodes.
    ///
    /// Returns `false` when rejected (missing nodes, self-parenting, or a cycle).
    pub fn try_add_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if parent == child {
            return false;
        }
        if self.get_node(parent).is_none() || self.get_node(child).is_none() {
            return false;
        }

        // `child` must not be an ancestor of `parent`.
        let mut current = Some(parent);
        while let Some(node_id) = current {
            if node_id == child {
                return false;
            }
            current = self.get_node(node_id).and_then(|n| n.parent);
        }

        if let Some(old_parent) = self.nodes[child].parent {
            if old_parent == parent {
                return true;
            }
            self.remove_child(old_parent, child);
        }

        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        true
    }

    /// Detaches `child` from `parent` if it is one of its children.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(p_node) = self.nodes.get_mut(parent) {
            p_node.children.retain(|&c| c != child);
        }
        if let Some(c_node) = self.nodes.get_mut(child) {
            if c_node.parent == Some(parent) {
                c_node.parent = None;
            }
        }
    }

    /// Moves every node of `subtree` under `parent`, wrapping its root as a group
    /// called `name`. Returns the ID of that group.
    pub fn graft(&mut self, parent: NodeId, name: impl Into<String>, subtree: VisualTree) -> NodeId {
        let offset = self.nodes.len();
        for mut node in subtree.nodes {
            node.children.iter_mut().for_each(|c| *c += offset);
            node.parent = node.parent.map(|p| p + offset);
            self.nodes.push(node);
        }

        let grafted_root = offset + Self::ROOT;
        self.nodes[grafted_root].name = name.into();
        self.try_add_child(parent, grafted_root);
        grafted_root
    }

    pub fn get_node(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.get(id)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut VisualNode> {
        self.nodes.get_mut(id)
    }

    /// First node named `name`, in paint order.
    pub fn find(&self, name: &str) -> Option<&VisualNode> {
        self.paint_order()
            .map(|id| &self.nodes[id])
            .find(|n| n.name == name)
    }

    /// Nodes reachable from the root, depth-first, parents before children.
    pub fn paint_order(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![Self::ROOT];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.nodes[id].children.iter().rev());
            Some(id)
        })
    }

    /// Product of opacities from the root down to `id`.
    pub fn effective_opacity(&self, id: NodeId) -> f32 {
        let mut opacity = 1.0;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.get_node(node_id) else {
                break;
            };
            opacity *= node.state.opacity;
            current = node.parent;
        }
        opacity
    }
}

/// A timed composition that renders one complete visual per frame.
///
/// `render` must depend on nothing but `frame` and the scene's own immutable
/// configuration, so any frame can be rendered at any time on any thread.
pub trait Scene: Send + Sync {
    fn meta(&self) -> &CompositionMeta;

    fn render(&self, frame: Frame) -> VisualTree;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_chain() -> (VisualTree, NodeId, NodeId) {
        let mut tree = VisualTree::new(100, 100);
        let a = tree.append(VisualTree::ROOT, VisualNode::group("a"));
        let b = tree.append(a, VisualNode::group("b"));
        (tree, a, b)
    }

    #[test]
    fn add_child_rejects_self_parent() {
        let mut tree = VisualTree::new(10, 10);
        let id = tree.add_node(VisualNode::group("lonely"));
        assert!(!tree.try_add_child(id, id));
        assert!(tree.get_node(id).unwrap().parent.is_none());
    }

    #[test]
    fn add_child_rejects_cycle() {
        let (mut tree, a, b) = tree_with_chain();
        assert!(!tree.try_add_child(b, a), "cycle creation must be rejected");
        assert!(!tree.try_add_child(b, VisualTree::ROOT));
    }

    #[test]
    fn reparent_child_detaches_from_old_parent() {
        let (mut tree, a, b) = tree_with_chain();
        assert!(tree.try_add_child(VisualTree::ROOT, b));
        assert!(!tree.get_node(a).unwrap().children.contains(&b));
        assert!(tree.root().children.contains(&b));
        assert_eq!(tree.get_node(b).unwrap().parent, Some(VisualTree::ROOT));
    }

    #[test]
    fn graft_offsets_ids_and_renames_root() {
        let (sub, _, _) = tree_with_chain();
        let mut tree = VisualTree::new(100, 100);
        let first = tree.append(VisualTree::ROOT, VisualNode::rect("bg", 100.0, 100.0));
        let grafted = tree.graft(VisualTree::ROOT, "scene", sub);

        assert_eq!(tree.len(), 5);
        assert_eq!(tree.root().children, vec![first, grafted]);
        assert_eq!(tree.get_node(grafted).unwrap().name, "scene");

        let names: Vec<&str> = tree.paint_order().map(|id| tree.nodes[id].name.as_str()).collect();
        assert_eq!(names, vec!["root", "bg", "scene", "a", "b"]);
        assert_eq!(tree.find("b").unwrap().parent, Some(grafted + 1));
    }

    #[test]
    fn effective_opacity_multiplies_ancestors() {
        let mut tree = VisualTree::new(10, 10);
        let outer = tree.append(VisualTree::ROOT, VisualNode::group("outer").opacity(0.5));
        let inner = tree.append(outer, VisualNode::rect("inner", 1.0, 1.0).opacity(0.4));
        assert!((tree.effective_opacity(inner) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn builder_clamps_opacity_and_keeps_kind() {
        let node = VisualNode::rect("card", 280.0, 220.0).rounded(24.0).opacity(1.7);
        assert_eq!(node.state.opacity, 1.0);
        assert_eq!(
            node.kind,
            NodeKind::Rect {
                width: 280.0,
                height: 220.0,
                corner_radius: 24.0
            }
        );
    }
}
