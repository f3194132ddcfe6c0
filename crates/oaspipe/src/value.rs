//! value representation
//!
//! A document is a tree of three node kinds
//! - mapping (order-preserving "map"/"dictionary", where the key is of type string)
//! - sequence ("list" of nodes)
//! - scalar (null, boolean, number or string)
//!
//! Scalars are opaque: they are carried through a transformation unmodified. Numbers are kept as
//! [serde_json::Number] so no precision is lost between loading and saving.
//!
use serde::{
    ser::{SerializeMap, SerializeSeq},
    Serialize, Serializer,
};

/// String keyed, order-preserving collection of nodes
pub type Mapping = indexmap::IndexMap<String, Node>;

/// All possible node types
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(Mapping),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

/// Leaf values
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

/// Kind of a [Node] without its content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Mapping,
    Sequence,
    Scalar,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Mapping => f.write_str("mapping"),
            NodeKind::Sequence => f.write_str("sequence"),
            NodeKind::Scalar => f.write_str("scalar"),
        }
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Mapping(_) => NodeKind::Mapping,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Scalar(_) => NodeKind::Scalar,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Node::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    /// String content of a string scalar
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Scalar(Scalar::String(value))
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Scalar(Scalar::Bool(value))
    }
}

macro_rules! from_integer {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::Scalar(Scalar::Number(value.into()))
                }
            }
        )+
    };
}

from_integer!(i32, i64, u64);

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Node::Mapping(value)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(value: Vec<T>) -> Self {
        Node::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => b.into(),
            Value::Number(n) => Node::Scalar(Scalar::Number(n)),
            Value::String(s) => s.into(),
            Value::Array(array) => array.into(),
            Value::Object(object) => {
                Node::Mapping(object.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Reasons a YAML value has no [Node] representation
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConversionError {
    #[error("mapping key must be a scalar, found {0}")]
    UnsupportedKey(NodeKind),
    #[error("number {0} cannot be represented")]
    NonFiniteNumber(f64),
}

impl TryFrom<serde_yaml::Value> for Node {
    type Error = ConversionError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value;

        Ok(match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => b.into(),
            Value::Number(n) => Node::Scalar(Scalar::Number(yaml_number(&n)?)),
            Value::String(s) => s.into(),
            Value::Sequence(sequence) => Node::Sequence(
                sequence
                    .into_iter()
                    .map(Node::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(mapping) => {
                let mut fields = Mapping::with_capacity(mapping.len());
                for (key, value) in mapping {
                    fields.insert(yaml_key(key)?, value.try_into()?);
                }
                Node::Mapping(fields)
            }
            // tags carry no meaning for schema documents
            Value::Tagged(tagged) => tagged.value.try_into()?,
        })
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Result<serde_json::Number, ConversionError> {
    if let Some(int) = n.as_i64() {
        return Ok(int.into());
    }
    if let Some(int) = n.as_u64() {
        return Ok(int.into());
    }

    let float = n.as_f64().unwrap_or(f64::NAN);
    serde_json::Number::from_f64(float).ok_or(ConversionError::NonFiniteNumber(float))
}

/// YAML permits non-string keys, e.g. unquoted response codes (`200:`)
fn yaml_key(key: serde_yaml::Value) -> Result<String, ConversionError> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Tagged(tagged) => yaml_key(tagged.value),
        Value::Sequence(_) => Err(ConversionError::UnsupportedKey(NodeKind::Sequence)),
        Value::Mapping(_) => Err(ConversionError::UnsupportedKey(NodeKind::Mapping)),
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Scalar(Scalar::Null) => serializer.serialize_unit(),
            Node::Scalar(Scalar::Bool(value)) => serializer.serialize_bool(*value),
            Node::Scalar(Scalar::Number(value)) => value.serialize(serializer),
            Node::Scalar(Scalar::String(value)) => serializer.serialize_str(value),
            Node::Sequence(value) => {
                let mut ser = serializer.serialize_seq(Some(value.len()))?;
                for element in value {
                    ser.serialize_element(element)?;
                }
                ser.end()
            }
            Node::Mapping(value) => {
                let mut ser = serializer.serialize_map(Some(value.len()))?;
                for (element_key, element_value) in value {
                    ser.serialize_entry(element_key, element_value)?;
                }
                ser.end()
            }
        }
    }
}
