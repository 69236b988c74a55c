/// Handle to a node inside a [`Document`].
///
/// Handles stay valid for the lifetime of the document; nodes are never
/// removed, only appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Hierarchical, heading-based document with per-node string properties.
///
/// The synchronizer and the overview builder only talk to the document
/// through this trait and explicit node handles.
pub trait Document {
    /// The invisible top node (level 0) that owns all top-level headings.
    fn root(&self) -> NodeId;

    fn level(&self, node: NodeId) -> usize;

    fn heading(&self, node: NodeId) -> &str;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> &[NodeId];

    fn property(&self, node: NodeId, key: &str) -> Option<&str>;

    fn set_property(&mut self, node: NodeId, key: &str, value: &str);

    fn remove_property(&mut self, node: NodeId, key: &str);

    fn needs_attention(&self, node: NodeId) -> bool;

    fn set_needs_attention(&mut self, node: NodeId, flag: bool);

    /// Append a new last child of `parent` and return its handle.
    fn append_child(&mut self, parent: NodeId, heading: &str, level: usize) -> NodeId;

    /// All nodes below `node` in document order, depth first, `node` excluded.
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = self.children(node).iter().rev().copied().collect::<Vec<_>>();

        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }

        out
    }

    /// Nearest ancestor-or-self of `node` that carries `key`.
    fn find_inherited(&self, node: NodeId, key: &str) -> Option<NodeId> {
        let mut current = Some(node);

        while let Some(candidate) = current {
            if self.property(candidate, key).is_some() {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }

        None
    }

    /// First node in document order whose `key` property equals `value`.
    fn find_by_property(&self, key: &str, value: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&node| self.property(node, key) == Some(value))
    }
}
