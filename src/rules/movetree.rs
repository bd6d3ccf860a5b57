//! Arena-backed move tree
//!
//! Nodes live in a flat vector and refer to each other by index. The root is
//! always node 0. Read access goes through [`Cursor`], a cheap `Copy` view
//! that can move up and down the tree without touching it.

use super::point::{Rotation, MAX_INTERSECTIONS};
use super::properties::Properties;
use super::treepath::{InitialPath, Treepath, TreepathError};

/// Index of a node in the arena
pub type NodeId = usize;

const ROOT: NodeId = 0;
const DEFAULT_BOARD_SIZE: u32 = 19;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub properties: Properties,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Position of this node among its parent's children
    var_num: usize,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn var_num(&self) -> usize {
        self.var_num
    }
}

/// A game tree. Child 0 of every node is the mainline continuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTree {
    nodes: Vec<Node>,
}

impl Default for MoveTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveTree {
    /// Creates a tree holding a single empty root node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                properties: Properties::new(),
                parent: None,
                children: Vec::new(),
                var_num: 0,
            }],
        }
    }

    pub fn root_id(&self) -> NodeId {
        ROOT
    }

    /// Appends a child under `parent` and returns its id
    pub fn add_child(&mut self, parent: NodeId, properties: Properties) -> NodeId {
        let id = self.nodes.len();
        let var_num = self.nodes[parent].children.len();
        self.nodes.push(Node {
            properties,
            parent: Some(parent),
            children: Vec::new(),
            var_num,
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn properties_mut(&mut self, id: NodeId) -> &mut Properties {
        &mut self.nodes[id].properties
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Board intersections per side, read from the root `SZ` property.
    ///
    /// Sizes SGF coordinates cannot describe fall back to 19.
    pub fn intersections(&self) -> u32 {
        self.nodes[ROOT]
            .properties
            .get_one("SZ")
            .and_then(|sz| sz.split(':').next())
            .and_then(|sz| sz.trim().parse().ok())
            .filter(|sz| (1..=MAX_INTERSECTIONS).contains(sz))
            .unwrap_or(DEFAULT_BOARD_SIZE)
    }

    pub fn root(&self) -> Cursor<'_> {
        Cursor {
            tree: self,
            node: ROOT,
        }
    }

    pub fn cursor(&self, node: NodeId) -> Cursor<'_> {
        Cursor { tree: self, node }
    }

    /// Returns a cursor at the end of `path`, starting from the root
    pub fn cursor_at(&self, path: &Treepath) -> Result<Cursor<'_>, TreepathError> {
        let mut cursor = self.root();
        for (depth, &var) in path.iter().enumerate() {
            if !cursor.move_down(var) {
                return Err(TreepathError::OutOfBounds {
                    path: path.to_fragment_string(),
                    depth,
                    variation: var,
                });
            }
        }
        Ok(cursor)
    }

    /// Resolves an initial position, following the mainline to the end if requested
    pub fn cursor_at_initial(&self, initial: &InitialPath) -> Result<Cursor<'_>, TreepathError> {
        let mut cursor = self.cursor_at(&initial.path)?;
        if initial.to_end {
            while cursor.move_down(0) {}
        }
        Ok(cursor)
    }

    /// Node ids in pre-order starting at the root
    pub fn preorder(&self) -> Vec<NodeId> {
        self.root().descendants().map(|c| c.node_id()).collect()
    }

    /// Rotates every point-valued property of every node
    pub fn rotate(&mut self, rotation: Rotation) {
        if rotation.is_identity() {
            return;
        }
        let ints = self.intersections();
        for id in self.preorder() {
            self.nodes[id].properties.rotate(ints, rotation);
        }
    }
}

/// A read-only position in a [`MoveTree`]
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    tree: &'a MoveTree,
    node: NodeId,
}

impl<'a> Cursor<'a> {
    pub fn tree(&self) -> &'a MoveTree {
        self.tree
    }

    pub fn node_id(&self) -> NodeId {
        self.node
    }

    pub fn node(&self) -> &'a Node {
        &self.tree.nodes[self.node]
    }

    pub fn properties(&self) -> &'a Properties {
        &self.node().properties
    }

    pub fn num_children(&self) -> usize {
        self.node().children.len()
    }

    pub fn is_terminal(&self) -> bool {
        self.num_children() == 0
    }

    pub fn var_num(&self) -> usize {
        self.node().var_num
    }

    pub fn parent(&self) -> Option<Cursor<'a>> {
        self.node().parent.map(|node| Cursor {
            tree: self.tree,
            node,
        })
    }

    pub fn child(&self, n: usize) -> Option<Cursor<'a>> {
        self.node().children.get(n).map(|&node| Cursor {
            tree: self.tree,
            node,
        })
    }

    /// Moves to the parent; returns false at the root
    pub fn move_up(&mut self) -> bool {
        match self.node().parent {
            Some(parent) => {
                self.node = parent;
                true
            }
            None => false,
        }
    }

    /// Moves to child `n`; returns false if there is no such child
    pub fn move_down(&mut self, n: usize) -> bool {
        match self.node().children.get(n) {
            Some(&child) => {
                self.node = child;
                true
            }
            None => false,
        }
    }

    /// Variation numbers taken from the root to reach this node
    pub fn treepath_to_here(&self) -> Treepath {
        let mut path = Vec::new();
        let mut current = *self;
        while let Some(parent) = current.parent() {
            path.push(current.var_num());
            current = parent;
        }
        path.reverse();
        Treepath::from(path)
    }

    /// True when every step from the root took variation 0
    pub fn on_mainline(&self) -> bool {
        let mut current = *self;
        loop {
            if current.var_num() != 0 {
                return false;
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => return true,
            }
        }
    }

    /// Pre-order walk over this node and everything below it
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants {
            tree: self.tree,
            stack: vec![self.node],
        }
    }
}

/// Pre-order iterator returned by [`Cursor::descendants`]
pub struct Descendants<'a> {
    tree: &'a MoveTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Cursor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.tree.nodes[node].children.iter().rev().copied());
        Some(Cursor {
            tree: self.tree,
            node,
        })
    }
}
