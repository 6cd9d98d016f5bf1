use std::collections::HashMap;
use std::sync::mpsc::Sender;

/// Opaque handle to a node in a [`Document`].
///
/// Handles are never reused within a document lifetime: once a node is
/// removed its id stays dead and every query on it returns the empty answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Coarse change notification published on every structural edit of
/// connected nodes.
///
/// The parent id exists for trace logging; subscribers re-scan the tree
/// instead of interpreting it.
#[derive(Clone, Copy, Debug)]
pub enum Notice {
    ChildListChanged { parent: NodeId },
}

#[derive(Debug, PartialEq, Eq)]
pub enum DomError {
    MissingNode(NodeId),
    InvalidParent(NodeId),
    InvalidSibling { parent: NodeId, before: NodeId },
    CycleDetected { parent: NodeId, child: NodeId },
    ProtectedNode(NodeId),
}

enum NodeKind {
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
    },
    Text {
        text: String,
    },
}

struct NodeRecord {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeRecord {
    fn allows_children(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }
}

/// A single host document: `html` root with `head` and `body` children,
/// everything below them owned by the host.
pub struct Document {
    nodes: Vec<NodeRecord>,
    live: HashMap<NodeId, usize>,
    next_id: u32,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    observers: Vec<Sender<Notice>>,
    revision: u64,
}

const NO_CHILDREN: &[NodeId] = &[];

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            live: HashMap::new(),
            next_id: 1,
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            observers: Vec::new(),
            revision: 0,
        };
        doc.root = doc.create_element("html");
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        doc.link(doc.root, doc.head, None);
        doc.link(doc.root, doc.body, None);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Monotonic counter bumped on every mutation that actually changed
    /// something. Useful to assert that an operation was a no-op.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Subscribe a channel to structural change notices. Subscriptions are
    /// never torn down explicitly; a dropped receiver falls out of delivery
    /// on the next notice.
    pub fn observe(&mut self, tx: Sender<Notice>) {
        self.observers.push(tx);
    }

    // --- allocation ---

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.alloc(NodeKind::Element {
            name: name.to_ascii_lowercase(),
            attributes: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text {
            text: text.to_string(),
        })
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let index = self.nodes.len();
        self.nodes.push(NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        });
        self.live.insert(id, index);
        id
    }

    // --- structure ---

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insertable(parent, child)?;
        self.link(parent, child, None);
        self.revision += 1;
        self.notify_child_list(parent);
        Ok(())
    }

    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insertable(parent, child)?;
        self.link(parent, child, Some(0));
        self.revision += 1;
        self.notify_child_list(parent);
        Ok(())
    }

    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        before: NodeId,
    ) -> Result<(), DomError> {
        self.check_insertable(parent, child)?;
        let pos = self
            .record(parent)
            .and_then(|r| r.children.iter().position(|&k| k == before))
            .ok_or(DomError::InvalidSibling { parent, before })?;
        self.link(parent, child, Some(pos));
        self.revision += 1;
        self.notify_child_list(parent);
        Ok(())
    }

    /// Detach `id` and free its whole subtree. The freed ids go dead.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<(), DomError> {
        if !self.is_live(id) {
            return Err(DomError::MissingNode(id));
        }
        if id == self.root || id == self.head || id == self.body {
            return Err(DomError::ProtectedNode(id));
        }
        let parent = self.record(id).and_then(|r| r.parent);
        let notify = parent.filter(|&p| self.is_connected(p));
        if let Some(p) = parent
            && let Some(&pi) = self.live.get(&p)
        {
            self.nodes[pi].children.retain(|&k| k != id);
        }
        self.free_subtree(id);
        self.revision += 1;
        if let Some(p) = notify {
            self.notify_child_list(p);
        }
        Ok(())
    }

    fn free_subtree(&mut self, id: NodeId) {
        let Some(index) = self.live.remove(&id) else {
            return;
        };
        self.nodes[index].parent = None;
        let children = std::mem::take(&mut self.nodes[index].children);
        for child in children {
            self.free_subtree(child);
        }
    }

    fn check_insertable(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_rec = self.record(parent).ok_or(DomError::MissingNode(parent))?;
        let child_rec = self.record(child).ok_or(DomError::MissingNode(child))?;
        if !parent_rec.allows_children() {
            return Err(DomError::InvalidParent(parent));
        }
        if child_rec.parent.is_some() {
            return Err(DomError::InvalidParent(child));
        }
        if parent == child || self.is_descendant(child, parent) {
            return Err(DomError::CycleDetected { parent, child });
        }
        Ok(())
    }

    fn link(&mut self, parent: NodeId, child: NodeId, pos: Option<usize>) {
        let parent_index = self.live[&parent];
        let child_index = self.live[&child];
        match pos {
            Some(pos) => self.nodes[parent_index].children.insert(pos, child),
            None => self.nodes[parent_index].children.push(child),
        }
        self.nodes[child_index].parent = Some(parent);
    }

    // --- node queries ---

    pub fn is_live(&self, id: NodeId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(
            self.record(id),
            Some(NodeRecord {
                kind: NodeKind::Element { .. },
                ..
            })
        )
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(
            self.record(id),
            Some(NodeRecord {
                kind: NodeKind::Text { .. },
                ..
            })
        )
    }

    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        match self.record(id)? {
            NodeRecord {
                kind: NodeKind::Element { name, .. },
                ..
            } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.record(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.record(id)
            .map(|r| r.children.as_slice())
            .unwrap_or(NO_CHILDREN)
    }

    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| self.is_element(c))
    }

    /// Strict descendant check: `id` is below `ancestor`, not equal to it.
    pub fn is_descendant(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// Whether the node is attached under the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == self.root || self.is_descendant(self.root, id)
    }

    /// Preorder collection of element ids, including `from` itself when it
    /// is an element.
    pub fn collect_elements(&self, from: NodeId, out: &mut Vec<NodeId>) {
        if self.is_element(from) {
            out.push(from);
        }
        for &child in self.children(from) {
            self.collect_elements(child, out);
        }
    }

    /// First element in document order whose `id` attribute equals `dom_id`.
    pub fn element_by_id(&self, dom_id: &str) -> Option<NodeId> {
        let mut elements = Vec::new();
        self.collect_elements(self.root, &mut elements);
        elements
            .into_iter()
            .find(|&e| self.attr(e, "id") == Some(dom_id))
    }

    // --- attributes ---

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.record(id)? {
            NodeRecord {
                kind: NodeKind::Element { attributes, .. },
                ..
            } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .and_then(|(_, v)| v.as_deref()),
            _ => None,
        }
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        match self.record(id) {
            Some(NodeRecord {
                kind: NodeKind::Element { attributes, .. },
                ..
            }) => attributes.iter().any(|(k, _)| k.eq_ignore_ascii_case(name)),
            _ => false,
        }
    }

    /// Set or replace an attribute. Returns `true` when the stored value
    /// actually changed; dead ids and text nodes report `false`.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: Option<&str>) -> bool {
        let Some(&index) = self.live.get(&id) else {
            return false;
        };
        let NodeKind::Element { attributes, .. } = &mut self.nodes[index].kind else {
            return false;
        };
        let next = value.map(|v| v.to_string());
        if let Some(slot) = attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            if slot.1 == next {
                return false;
            }
            slot.1 = next;
        } else {
            attributes.push((name.to_ascii_lowercase(), next));
        }
        self.revision += 1;
        true
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> bool {
        let Some(&index) = self.live.get(&id) else {
            return false;
        };
        let NodeKind::Element { attributes, .. } = &mut self.nodes[index].kind else {
            return false;
        };
        let before = attributes.len();
        attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        if attributes.len() == before {
            return false;
        }
        self.revision += 1;
        true
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attr(id, "class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    /// Add or remove a single class token. Returns `true` when the class
    /// list actually changed, which makes re-applying the same state a
    /// detectable no-op.
    pub fn set_class_enabled(&mut self, id: NodeId, class: &str, enabled: bool) -> bool {
        if class.is_empty() || !self.is_element(id) {
            return false;
        }
        if self.has_class(id, class) == enabled {
            return false;
        }
        let current = self.attr(id, "class").unwrap_or("");
        let next = if enabled {
            let mut list = current.trim().to_string();
            if !list.is_empty() {
                list.push(' ');
            }
            list.push_str(class);
            list
        } else {
            current
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ")
        };
        if next.is_empty() {
            self.remove_attr(id, "class")
        } else {
            self.set_attr(id, "class", Some(&next))
        }
    }

    // --- character data ---

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.record(id)? {
            NodeRecord {
                kind: NodeKind::Text { text },
                ..
            } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Rewrite a text node in place. Character-data edits do not notify.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> bool {
        let Some(&index) = self.live.get(&id) else {
            return false;
        };
        let NodeKind::Text { text: existing } = &mut self.nodes[index].kind else {
            return false;
        };
        if existing == text {
            return false;
        }
        existing.clear();
        existing.push_str(text);
        self.revision += 1;
        true
    }

    // --- internal ---

    fn record(&self, id: NodeId) -> Option<&NodeRecord> {
        self.live.get(&id).map(|&index| &self.nodes[index])
    }

    fn notify_child_list(&mut self, parent: NodeId) {
        if !self.is_connected(parent) {
            return;
        }
        let notice = Notice::ChildListChanged { parent };
        log::trace!(target: "dom", "child list changed under {parent:?}");
        self.observers.retain(|tx| tx.send(notice).is_ok());
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
