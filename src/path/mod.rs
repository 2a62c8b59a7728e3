mod error;
mod parser;

use std::{borrow::Cow, fmt, str::FromStr};

pub use error::PathError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Represents a field in the object.
    Field(String),

    /// Represents an index in an array.
    Index(usize),

    /// The `-` token, the slot just past the last element of an array.
    Append,
}

impl Segment {
    /// Builds a segment from an already unescaped pointer token.
    pub(crate) fn from_token(token: String) -> Self {
        if token == "-" {
            return Segment::Append;
        }
        if is_array_index(&token)
            && let Ok(index) = token.parse::<usize>()
        {
            return Segment::Index(index);
        }
        Segment::Field(token)
    }

    /// The unescaped token, which is also the member name when the segment
    /// is resolved against an object.
    pub fn token(&self) -> Cow<'_, str> {
        match self {
            Segment::Field(name) => Cow::Borrowed(name),
            Segment::Index(index) => Cow::Owned(index.to_string()),
            Segment::Append => Cow::Borrowed("-"),
        }
    }
}

// RFC 6901: array indexes are "0" or digits without a leading zero
fn is_array_index(token: &str) -> bool {
    !token.is_empty()
        && token.bytes().all(|b| b.is_ascii_digit())
        && (token == "0" || !token.starts_with('0'))
}

/// A location inside a document, rooted at the diffed object.
///
/// The textual form is a JSON Pointer: `""` is the root and every segment is
/// prefixed with `/`, with `~` and `/` escaped as `~0` and `~1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Spath {
    segments: Vec<Segment>,
}

impl Spath {
    pub fn new(segments: Vec<Segment>) -> Self {
        Spath { segments }
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    /// Returns a copy of this path extended by one segment.
    pub fn child(&self, segment: Segment) -> Spath {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Spath { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn last_segment(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// The path without its last segment, `None` for the root.
    pub fn parent(&self) -> Option<Spath> {
        let (_, init) = self.segments.split_last()?;
        Some(Spath {
            segments: init.to_vec(),
        })
    }

    /// True when `self` is a proper prefix of `other`.
    pub fn is_parent_of(&self, other: &Spath) -> bool {
        self.segments.len() < other.segments.len()
            && other.segments.starts_with(&self.segments)
    }
}

impl fmt::Display for Spath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str("/")?;
            for c in segment.token().chars() {
                match c {
                    '~' => f.write_str("~0")?,
                    '/' => f.write_str("~1")?,
                    c => write!(f, "{c}")?,
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<&str> for Spath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match parser::parse_path(value) {
            Ok(("", spath)) => Ok(spath),
            Ok((rest, _)) => Err(error::trailing_input_error(value, rest)),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                Err(error::convert_verbose_error(value, e))
            }
            Err(nom::Err::Incomplete(_)) => Err(PathError::invalid_syntax(
                value.len(),
                "unexpected end of input",
            )),
        }
    }
}

impl TryFrom<String> for Spath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Spath::try_from(value.as_str())
    }
}

impl FromStr for Spath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Spath::try_from(s)
    }
}

impl From<Spath> for String {
    fn from(value: Spath) -> Self {
        value.to_string()
    }
}

impl From<Vec<Segment>> for Spath {
    fn from(segments: Vec<Segment>) -> Self {
        Spath { segments }
    }
}

impl serde::Serialize for Spath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Spath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Spath::try_from(raw.as_str()).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a Spath {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
