use crate::artifacts::outline::document::{Document, NodeId};
use crate::artifacts::outline::{ATTENTION_KEYWORD, ROOT_LEVEL};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct NodeData {
    pub(crate) heading: String,
    pub(crate) level: usize,
    pub(crate) keyword: Option<String>,
    pub(crate) properties: Vec<(String, String)>,
    pub(crate) body: Vec<String>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    /// 1-based line of the heading in the file the outline was read from.
    pub(crate) source_line: Option<usize>,
}

/// In-memory outline stored as an arena of nodes.
///
/// Node 0 is the document root. Its body holds the preamble that precedes
/// the first heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    nodes: Vec<NodeData>,
}

impl Default for Outline {
    fn default() -> Self {
        Self::new()
    }
}

impl Outline {
    pub fn new() -> Self {
        Outline {
            nodes: vec![NodeData {
                level: ROOT_LEVEL,
                ..NodeData::default()
            }],
        }
    }

    pub fn with_title(title: &str) -> Self {
        let mut outline = Self::new();
        outline.push_body_line(outline.root(), format!("#+TITLE: {title}"));
        outline
    }

    pub(crate) fn node(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.0]
    }

    fn node_mut(&mut self, node: NodeId) -> &mut NodeData {
        &mut self.nodes[node.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keyword(&self, node: NodeId) -> Option<&str> {
        self.node(node).keyword.as_deref()
    }

    pub fn set_keyword(&mut self, node: NodeId, keyword: Option<String>) {
        self.node_mut(node).keyword = keyword;
    }

    pub fn body(&self, node: NodeId) -> &[String] {
        &self.node(node).body
    }

    pub fn push_body_line(&mut self, node: NodeId, line: String) {
        self.node_mut(node).body.push(line);
    }

    pub fn properties(&self, node: NodeId) -> &[(String, String)] {
        &self.node(node).properties
    }

    pub(crate) fn set_source_line(&mut self, node: NodeId, line: usize) {
        self.node_mut(node).source_line = Some(line);
    }

    /// The heading whose section contains the 1-based `line`, or the root when
    /// the line is part of the preamble.
    pub fn node_at_line(&self, line: usize) -> NodeId {
        self.descendants(self.root())
            .into_iter()
            .take_while(|&node| {
                self.node(node)
                    .source_line
                    .is_none_or(|source_line| source_line <= line)
            })
            .filter(|&node| self.node(node).source_line.is_some())
            .last()
            .unwrap_or_else(|| self.root())
    }
}

impl Document for Outline {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn level(&self, node: NodeId) -> usize {
        self.node(node).level
    }

    fn heading(&self, node: NodeId) -> &str {
        &self.node(node).heading
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    fn property(&self, node: NodeId, key: &str) -> Option<&str> {
        self.node(node)
            .properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set_property(&mut self, node: NodeId, key: &str, value: &str) {
        let properties = &mut self.node_mut(node).properties;

        match properties.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => properties.push((key.to_string(), value.to_string())),
        }
    }

    fn remove_property(&mut self, node: NodeId, key: &str) {
        self.node_mut(node).properties.retain(|(k, _)| k != key);
    }

    fn needs_attention(&self, node: NodeId) -> bool {
        self.keyword(node) == Some(ATTENTION_KEYWORD)
    }

    fn set_needs_attention(&mut self, node: NodeId, flag: bool) {
        let keyword = flag.then(|| ATTENTION_KEYWORD.to_string());
        self.set_keyword(node, keyword);
    }

    fn append_child(&mut self, parent: NodeId, heading: &str, level: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            heading: heading.to_string(),
            level,
            parent: Some(parent),
            ..NodeData::default()
        });
        self.node_mut(parent).children.push(id);
        id
    }
}
