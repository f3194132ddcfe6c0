//! dotted path addressing
//!
//! A path such as `paths./outputs/{outputId}.get.parameters.0` is split on every `.` into
//! [Segment]s. A segment is not classified when parsing: whether `0` is a mapping key or a
//! sequence index depends on the kind of node it is applied to, which is only known while
//! resolving against a concrete document (see [crate::resolve]).
//!
//! Known limitation: keys that contain a `.` cannot be expressed as a nested path. The resolver
//! falls back to a literal lookup of the remaining path for those.

/// One dot-delimited component of a [Path]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment(String);

impl Segment {
    /// The segment used as a mapping key
    pub fn as_key(&self) -> &str {
        &self.0
    }

    /// The segment used as a sequence index
    ///
    /// Only plain ascii digits are accepted, signs or whitespace are not.
    pub fn as_index(&self) -> Option<usize> {
        if self.0.is_empty() || !self.0.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        self.0.parse().ok()
    }
}

/// Parsed dotted path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Parsing never fails, empty segments are kept as empty keys
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('.').map(|s| Segment(s.to_string())).collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Rejoins the segments starting at `start` into a single literal key
    pub fn literal_from(&self, start: usize) -> String {
        join(&self.segments[start.min(self.segments.len())..])
    }
}

pub(crate) fn join(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(Segment::as_key)
        .collect::<Vec<_>>()
        .join(".")
}

impl From<&str> for Path {
    fn from(value: &str) -> Self {
        Path::parse(value)
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&join(&self.segments))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keys(path: &Path) -> Vec<&str> {
        path.segments().iter().map(Segment::as_key).collect()
    }

    #[test]
    fn splits_on_every_dot() {
        let path = Path::parse("paths./outputs/{outputId}.get.responses.200");
        assert_eq!(
            keys(&path),
            ["paths", "/outputs/{outputId}", "get", "responses", "200"]
        );
        assert_eq!(path.to_string(), "paths./outputs/{outputId}.get.responses.200");
    }

    #[test]
    fn keeps_empty_segments() {
        assert_eq!(keys(&Path::parse("")), [""]);
        assert_eq!(keys(&Path::parse("a..b")), ["a", "", "b"]);
    }

    #[test]
    fn index_interpretation() {
        let index = |s: &str| Path::parse(s).segments()[0].as_index();

        assert_eq!(index("0"), Some(0));
        assert_eq!(index("12"), Some(12));
        assert_eq!(index("-1"), None);
        assert_eq!(index("+1"), None);
        assert_eq!(index("one"), None);
        assert_eq!(index(""), None);
        assert_eq!(index("99999999999999999999999"), None);
    }

    #[test]
    fn literal_from_rejoins_tail() {
        let path = Path::parse("a.b.c");
        assert_eq!(path.literal_from(1), "b.c");
        assert_eq!(path.literal_from(3), "");
    }
}
