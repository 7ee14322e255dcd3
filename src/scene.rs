//! Retained scene graph.
//!
//! The session never draws anything itself: it adds, moves, retitles and
//! removes nodes through [`SceneGraph`], and the host renders whatever the
//! graph holds each frame. Host elements (the game-over overlay and its score
//! slot) are owned by the host and only looked up by name.

use crate::assets::Texture;

/// Name of the host element shown when the game ends.
pub const GAME_OVER_ELEMENT: &str = "gameOver";
/// Name of the host element that receives the final score.
pub const FINAL_SCORE_ELEMENT: &str = "finalScore";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Centre-anchored textured box.
    Sprite {
        texture: Texture,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// Top-left anchored text.
    Text { text: String, x: f32, y: f32 },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub text: String,
    pub visible: bool,
}

pub trait SceneGraph {
    fn add_child(&mut self, node: Node) -> NodeId;

    /// Removing an id that is no longer present is a no-op.
    fn remove_child(&mut self, id: NodeId);

    fn set_position(&mut self, id: NodeId, x: f32, y: f32);

    /// Only affects text nodes.
    fn set_text(&mut self, id: NodeId, text: &str);

    fn element(&self, name: &str) -> Option<ElementId>;

    fn set_element_text(&mut self, id: ElementId, text: &str);

    fn set_element_visible(&mut self, id: ElementId, visible: bool);
}

// ── In-memory stage ───────────────────────────────────────────────────────────

/// Slot-based node storage: ids stay valid until their node is removed, and
/// freed slots are reused by later nodes.
#[derive(Clone, Debug, Default)]
pub struct Stage {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    elements: Vec<Element>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hidden, empty host element.
    pub fn with_element(mut self, name: &str) -> Self {
        self.elements.push(Element {
            name: name.to_string(),
            ..Element::default()
        });
        self
    }

    /// Live nodes in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (NodeId(i), n)))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn element_named(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name == name)
    }
}

impl SceneGraph for Stage {
    fn add_child(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn remove_child(&mut self, id: NodeId) {
        if let Some(slot) = self.nodes.get_mut(id.0) {
            if slot.take().is_some() {
                self.free.push(id.0);
            }
        }
    }

    fn set_position(&mut self, id: NodeId, new_x: f32, new_y: f32) {
        match self.nodes.get_mut(id.0).and_then(Option::as_mut) {
            Some(Node::Sprite { x, y, .. }) | Some(Node::Text { x, y, .. }) => {
                *x = new_x;
                *y = new_y;
            }
            None => {}
        }
    }

    fn set_text(&mut self, id: NodeId, new_text: &str) {
        if let Some(Node::Text { text, .. }) = self.nodes.get_mut(id.0).and_then(Option::as_mut) {
            *text = new_text.to_string();
        }
    }

    fn element(&self, name: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.name == name)
            .map(ElementId)
    }

    fn set_element_text(&mut self, id: ElementId, text: &str) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.text = text.to_string();
        }
    }

    fn set_element_visible(&mut self, id: ElementId, visible: bool) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.visible = visible;
        }
    }
}
