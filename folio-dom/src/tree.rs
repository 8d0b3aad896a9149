use crate::{DomError, DomResult, Element, NodeId, Selector};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct NodeRecord {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An ordered element tree with stable node ids.
///
/// Nodes are created detached and become part of the page once appended
/// somewhere under the root. Removing a node drops its whole subtree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: BTreeMap<NodeId, NodeRecord>,
    root: NodeId,
    next_id: u64,
}

impl Document {
    /// Creates a document whose root is the given element.
    pub fn new(root: Element) -> Self {
        let mut doc = Self {
            nodes: BTreeMap::new(),
            root: NodeId(0),
            next_id: 0,
        };
        doc.root = doc.create(root);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Adds a detached element and returns its id.
    pub fn create(&mut self, element: Element) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            NodeRecord {
                element,
                parent: None,
                children: Vec::new(),
            },
        );
        id
    }

    /// Creates an element and appends it to `parent`.
    pub fn append_new(&mut self, parent: NodeId, element: Element) -> DomResult<NodeId> {
        self.check(parent)?;
        let id = self.create(element);
        self.append_child(parent, id)?;
        Ok(id)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(&node).map(|r| &r.element)
    }

    pub fn element(&self, node: NodeId) -> DomResult<&Element> {
        self.get(node).ok_or(DomError::NodeNotFound(node))
    }

    pub fn element_mut(&mut self, node: NodeId) -> DomResult<&mut Element> {
        self.nodes
            .get_mut(&node)
            .map(|r| &mut r.element)
            .ok_or(DomError::NodeNotFound(node))
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|r| r.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|r| r.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of live nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Structure mutation ───────────────────────────────────────

    /// Moves `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.check_insertable(parent, child)?;
        self.detach(child)?;
        self.link(parent, child, None);
        Ok(())
    }

    /// Moves `node` directly before `reference` under the same parent.
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) -> DomResult<()> {
        self.insert_relative(reference, node, 0)
    }

    /// Moves `node` directly after `reference` under the same parent.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> DomResult<()> {
        self.insert_relative(reference, node, 1)
    }

    /// Unlinks a node from its parent; its subtree stays alive.
    pub fn detach(&mut self, node: NodeId) -> DomResult<()> {
        if node == self.root {
            return Err(DomError::RootMutation);
        }
        let parent = self.nodes.get(&node).ok_or(DomError::NodeNotFound(node))?.parent;
        if let Some(parent) = parent {
            if let Some(rec) = self.nodes.get_mut(&parent) {
                rec.children.retain(|c| *c != node);
            }
        }
        if let Some(rec) = self.nodes.get_mut(&node) {
            rec.parent = None;
        }
        Ok(())
    }

    /// Detaches and drops a node and its subtree. Returns the number of nodes dropped.
    pub fn remove(&mut self, node: NodeId) -> DomResult<usize> {
        self.detach(node)?;
        let mut stack = vec![node];
        let mut removed = 0;
        while let Some(id) = stack.pop() {
            if let Some(rec) = self.nodes.remove(&id) {
                stack.extend(rec.children);
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Copies a subtree. The copy is detached.
    pub fn deep_clone(&mut self, node: NodeId) -> DomResult<NodeId> {
        let element = self.element(node)?.clone();
        let copy = self.create(element);
        let children = self.children(node).to_vec();
        for child in children {
            let child_copy = self.deep_clone(child)?;
            self.link(copy, child_copy, None);
        }
        Ok(copy)
    }

    /// Replaces the element's own text and drops any children.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) -> DomResult<()> {
        let children = self.children(node).to_vec();
        for child in children {
            self.remove(child)?;
        }
        self.element_mut(node)?.text = Some(text.into());
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────

    /// True if the node is reachable from the root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// True if `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Descendants of `scope` in document (pre-)order, excluding `scope`.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    pub fn find_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|id| self.matches(*id, selector))
    }

    pub fn find_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.matches(*id, selector))
            .collect()
    }

    /// The node itself or its nearest ancestor matching the selector.
    pub fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.matches(id, selector) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        self.get(node).is_some_and(|e| selector.matches(e))
    }

    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let (siblings, index) = self.sibling_position(node)?;
        index.checked_sub(1).map(|i| siblings[i])
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let (siblings, index) = self.sibling_position(node)?;
        siblings.get(index + 1).copied()
    }

    /// Own text of the node followed by its descendants' text, in order.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        for id in std::iter::once(node).chain(self.descendants(node)) {
            if let Some(text) = self.get(id).and_then(|e| e.text.as_deref()) {
                out.push_str(text);
            }
        }
        out
    }

    // ── Internals ────────────────────────────────────────────────

    fn check(&self, node: NodeId) -> DomResult<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(DomError::NodeNotFound(node))
        }
    }

    fn check_insertable(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.check(parent)?;
        self.check(child)?;
        if child == self.root {
            return Err(DomError::RootMutation);
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::Cycle { node: child, parent });
        }
        Ok(())
    }

    fn insert_relative(&mut self, reference: NodeId, node: NodeId, offset: usize) -> DomResult<()> {
        if reference == node {
            return Ok(());
        }
        let parent = self
            .parent(reference)
            .ok_or(DomError::Detached(reference))?;
        self.check_insertable(parent, node)?;
        self.detach(node)?;
        let index = self
            .children(parent)
            .iter()
            .position(|c| *c == reference)
            .ok_or(DomError::Detached(reference))?;
        self.link(parent, node, Some(index + offset));
        Ok(())
    }

    fn link(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        if let Some(rec) = self.nodes.get_mut(&parent) {
            match index {
                Some(i) if i <= rec.children.len() => rec.children.insert(i, child),
                _ => rec.children.push(child),
            }
        }
        if let Some(rec) = self.nodes.get_mut(&child) {
            rec.parent = Some(parent);
        }
    }

    fn sibling_position(&self, node: NodeId) -> Option<(&[NodeId], usize)> {
        let siblings = self.children(self.parent(node)?);
        let index = siblings.iter().position(|c| *c == node)?;
        Some((siblings, index))
    }
}
