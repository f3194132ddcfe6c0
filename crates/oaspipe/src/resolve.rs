//! path resolution against a [Mapping]
//!
//! Resolution walks the path segment by segment. A segment is looked up as a key while the
//! current node is a mapping. When the node behind a key is a sequence, the *next* segment is
//! reinterpreted as an index into it.
//!
//! Lookups never fail loudly. A missing key, a segment that is not a number, an index out of
//! bounds or a scalar in the middle of the path all resolve to `None`. When the node behind a key
//! is neither a mapping nor a sequence, the remaining path is looked up as one literal key, so
//! keys containing dots still resolve.
//!
//! Writes only ever create mappings. Writing through an existing sequence or scalar is not
//! supported and reported as [WriteError::NotAMapping].
use crate::path::{join, Path};
use crate::value::{Mapping, Node, NodeKind};

/// Dotted-path access to nested nodes
pub trait PathAccess {
    /// Node at `path`
    fn get_path(&self, path: &str) -> Option<&Node>;

    fn get_path_mut(&mut self, path: &str) -> Option<&mut Node>;

    /// Mapping at `path`, any other kind of node counts as not found
    fn get_fields(&self, path: &str) -> Option<&Mapping>;

    fn get_fields_mut(&mut self, path: &str) -> Option<&mut Mapping>;

    /// Assign `value` at `path`, creating missing intermediate mappings
    ///
    /// Intermediate mappings created before a failing segment are kept.
    fn set_path(&mut self, path: &str, value: Node) -> Result<(), WriteError>;

    /// Remove and return the node at `path`
    ///
    /// Only descends through mappings. Ancestors left empty by the removal are kept.
    fn delete_path(&mut self, path: &str) -> Option<Node>;

    /// Move the node at `src` to `dst`
    ///
    /// Returns `false` without touching the document when `src` does not resolve. The source is
    /// removed only after `dst` was written. A source reached through a sequence index is copied,
    /// since [PathAccess::delete_path] does not descend into sequences.
    fn move_path(&mut self, src: &str, dst: &str) -> Result<bool, WriteError>;
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WriteError {
    #[error("cannot write `{path}`: `{prefix}` is a {found}, not a mapping")]
    NotAMapping {
        path: String,
        prefix: String,
        found: NodeKind,
    },
}

impl PathAccess for Mapping {
    fn get_path(&self, path: &str) -> Option<&Node> {
        let hops = route(self, &Path::parse(path))?;
        follow(self, &hops)
    }

    fn get_path_mut(&mut self, path: &str) -> Option<&mut Node> {
        let hops = route(self, &Path::parse(path))?;
        follow_mut(self, &hops)
    }

    fn get_fields(&self, path: &str) -> Option<&Mapping> {
        self.get_path(path).and_then(Node::as_mapping)
    }

    fn get_fields_mut(&mut self, path: &str) -> Option<&mut Mapping> {
        self.get_path_mut(path).and_then(Node::as_mapping_mut)
    }

    fn set_path(&mut self, path: &str, value: Node) -> Result<(), WriteError> {
        set_into(self, &Path::parse(path), 0, value)
    }

    fn delete_path(&mut self, path: &str) -> Option<Node> {
        delete_from(self, &Path::parse(path), 0)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn move_path(&mut self, src: &str, dst: &str) -> Result<bool, WriteError> {
        let Some(value) = self.get_path(src).cloned() else {
            return Ok(false);
        };

        if Path::parse(src) == Path::parse(dst) {
            return Ok(true);
        }

        self.set_path(dst, value)?;
        self.delete_path(src);
        Ok(true)
    }
}

/// One concrete step from a node to one of its children
#[derive(Debug, Clone, PartialEq)]
enum Hop {
    Key(String),
    Index(usize),
}

/// Resolve `path` into concrete hops without borrowing mutably
///
/// Both [follow] and [follow_mut] take the same route, so shared and mutable lookups cannot
/// disagree.
fn route(fields: &Mapping, path: &Path) -> Option<Vec<Hop>> {
    let mut hops = vec![];
    route_into(fields, path, 0, &mut hops).then_some(hops)
}

fn route_into(fields: &Mapping, path: &Path, start: usize, hops: &mut Vec<Hop>) -> bool {
    let segments = path.segments();
    let head = segments[start].as_key();
    let next = start + 1;

    if next == segments.len() {
        hops.push(Hop::Key(head.to_string()));
        return fields.contains_key(head);
    }

    match fields.get(head) {
        Some(Node::Mapping(child)) => {
            hops.push(Hop::Key(head.to_string()));
            route_into(child, path, next, hops)
        }
        Some(Node::Sequence(items)) => {
            let segment = &segments[next];
            let Some(index) = segment.as_index() else {
                tracing::debug!(%path, segment = segment.as_key(), "segment is not a sequence index");
                return false;
            };
            let Some(element) = items.get(index) else {
                tracing::debug!(%path, index, len = items.len(), "sequence index out of bounds");
                return false;
            };

            hops.push(Hop::Key(head.to_string()));
            hops.push(Hop::Index(index));

            let after_index = next + 1;
            if after_index == segments.len() {
                return true;
            }

            match element {
                Node::Mapping(child) => route_into(child, path, after_index, hops),
                _ => false,
            }
        }
        _ => {
            let literal = path.literal_from(start);
            tracing::trace!(%path, %literal, "falling back to literal key");
            let found = fields.contains_key(&literal);
            hops.push(Hop::Key(literal));
            found
        }
    }
}

fn follow<'a>(fields: &'a Mapping, hops: &[Hop]) -> Option<&'a Node> {
    let (Hop::Key(first), rest) = hops.split_first()? else {
        return None;
    };

    let mut node = fields.get(first)?;
    for hop in rest {
        node = match (hop, node) {
            (Hop::Key(key), Node::Mapping(child)) => child.get(key)?,
            (Hop::Index(index), Node::Sequence(items)) => items.get(*index)?,
            _ => return None,
        };
    }

    Some(node)
}

fn follow_mut<'a>(fields: &'a mut Mapping, hops: &[Hop]) -> Option<&'a mut Node> {
    let (Hop::Key(first), rest) = hops.split_first()? else {
        return None;
    };

    let mut node = fields.get_mut(first)?;
    for hop in rest {
        node = match (hop, node) {
            (Hop::Key(key), Node::Mapping(child)) => child.get_mut(key)?,
            (Hop::Index(index), Node::Sequence(items)) => items.get_mut(*index)?,
            _ => return None,
        };
    }

    Some(node)
}

fn set_into(fields: &mut Mapping, path: &Path, start: usize, value: Node) -> Result<(), WriteError> {
    let segments = path.segments();
    let head = segments[start].as_key();

    if start + 1 == segments.len() {
        fields.insert(head.to_string(), value);
        return Ok(());
    }

    let child = fields
        .entry(head.to_string())
        .or_insert_with(|| Node::Mapping(Mapping::new()));

    match child {
        Node::Mapping(child) => set_into(child, path, start + 1, value),
        other => Err(WriteError::NotAMapping {
            path: path.to_string(),
            prefix: join(&segments[..=start]),
            found: other.kind(),
        }),
    }
}

fn delete_from(fields: &mut Mapping, path: &Path, start: usize) -> Option<Node> {
    let segments = path.segments();
    let head = segments[start].as_key();

    if start + 1 == segments.len() {
        return fields.shift_remove(head);
    }

    match fields.get_mut(head) {
        Some(Node::Mapping(child)) => delete_from(child, path, start + 1),
        // lookups index into sequences and never fall back here
        Some(Node::Sequence(_)) => None,
        // mirrors the literal key fallback of lookups
        _ => fields.shift_remove(path.literal_from(start).as_str()),
    }
}
