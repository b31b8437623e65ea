use std::sync::Arc;

use archery::ArcK;
use rpds::Vector;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::node_types::{Node, TextRange};

pub type NodeVector = Vector<Arc<Node>, ArcK>;

/// Shared handle to a child sequence. Two lists are the same list exactly when
/// their `Arc`s are pointer-equal.
pub type NodeList = Arc<NodeArray>;

/// Ordered child sequence with its sequence-level metadata.
#[derive(Debug, Clone)]
pub struct NodeArray {
    pub elements: NodeVector,
    pub has_trailing_comma: bool,
    pub range: TextRange,
}

impl NodeArray {
    pub fn new(elements: NodeVector, has_trailing_comma: bool) -> Self {
        NodeArray { elements, has_trailing_comma, range: TextRange::UNSET }
    }

    pub fn empty() -> Self {
        NodeArray::new(Vector::new_with_ptr_kind(), false)
    }

    pub fn from_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = Arc<Node>>,
    {
        NodeArray::new(nodes.into_iter().collect::<Vector<_, ArcK>>(), false)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Node>> {
        self.elements.get(index)
    }

    pub fn first(&self) -> Option<&Arc<Node>> {
        self.elements.first()
    }

    pub fn last(&self) -> Option<&Arc<Node>> {
        self.elements.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Node>> + '_ {
        self.elements.iter()
    }

    pub fn to_vec(&self) -> Vec<Arc<Node>> {
        self.elements.iter().cloned().collect()
    }
}

impl Default for NodeArray {
    fn default() -> Self {
        NodeArray::empty()
    }
}

impl FromIterator<Arc<Node>> for NodeArray {
    fn from_iter<I: IntoIterator<Item = Arc<Node>>>(iter: I) -> Self {
        NodeArray::from_nodes(iter)
    }
}

/// JSON shape: a bare array when the list carries no metadata, otherwise an
/// object with `elements`, `has_trailing_comma` and `range`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum NodeArrayRepr {
    Plain(Vec<Arc<Node>>),
    Full {
        elements: Vec<Arc<Node>>,
        #[serde(default)]
        has_trailing_comma: bool,
        #[serde(default)]
        range: TextRange,
    },
}

impl Serialize for NodeArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = if !self.has_trailing_comma && self.range.is_unset() {
            NodeArrayRepr::Plain(self.to_vec())
        } else {
            NodeArrayRepr::Full {
                elements: self.to_vec(),
                has_trailing_comma: self.has_trailing_comma,
                range: self.range,
            }
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NodeArray {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match NodeArrayRepr::deserialize(deserializer)? {
            NodeArrayRepr::Plain(elements) => NodeArray::from_nodes(elements),
            NodeArrayRepr::Full { elements, has_trailing_comma, range } => NodeArray {
                elements: elements.into_iter().collect::<Vector<_, ArcK>>(),
                has_trailing_comma,
                range,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::node::{NodeBase, Token};
    use crate::ir::syntax_kind::SyntaxKind;

    fn token(kind: SyntaxKind) -> Arc<Node> {
        Arc::new(Node::Token(Token { base: NodeBase::default(), kind }))
    }

    #[test]
    fn test_new_array_has_unset_range() {
        let array = NodeArray::from_nodes(vec![token(SyntaxKind::PlusToken)]);
        assert_eq!(array.len(), 1);
        assert!(!array.has_trailing_comma);
        assert!(array.range.is_unset());
    }

    #[test]
    fn test_json_shapes() {
        let plain = NodeArray::from_nodes(vec![token(SyntaxKind::CommaToken)]);
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.is_array());

        let mut full = plain.clone();
        full.has_trailing_comma = true;
        full.range = TextRange::new(3, 9);
        let json = serde_json::to_value(&full).unwrap();
        assert_eq!(json["has_trailing_comma"], true);
        assert_eq!(json["range"]["pos"], 3);

        let back: NodeArray = serde_json::from_value(json).unwrap();
        assert!(back.has_trailing_comma);
        assert_eq!(back.range, TextRange::new(3, 9));
        assert_eq!(back.len(), 1);
    }
}
