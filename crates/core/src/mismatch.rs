//! Mismatch diagnostics: where and why a value failed its signature.

use std::fmt;

use crate::value::Kind;

/// One step from a parent node to a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Borrowed path step used while walking; only converted to a [`Path`]
/// when something is reported.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

/// Location of a node inside a value, rendered as `$.data.items[2]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn root() -> Self {
        Path::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub(crate) fn from_steps(steps: &[Step<'_>]) -> Self {
        Path {
            segments: steps
                .iter()
                .map(|step| match *step {
                    Step::Key(k) => PathSegment::Key(k.to_string()),
                    Step::Index(i) => PathSegment::Index(i),
                })
                .collect(),
        }
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(k) if is_identifier(k) => write!(f, ".{}", k)?,
                PathSegment::Key(k) => write!(f, "[{:?}]", k)?,
                PathSegment::Index(i) => write!(f, "[{}]", i)?,
            }
        }
        Ok(())
    }
}

/// Why a node failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchReason {
    /// The value has a different kind than the signature requires.
    KindMismatch { expected: Kind, found: Kind },
    /// Same primitive kind, different content. Both sides are rendered.
    ValueMismatch { expected: String, found: String },
    /// A list signature and list value of different lengths.
    LengthMismatch { expected: usize, found: usize },
    /// The signature declares a key the value lacks.
    MissingKey { key: String },
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchReason::KindMismatch { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            MismatchReason::ValueMismatch { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            MismatchReason::LengthMismatch { expected, found } => {
                write!(f, "expected list of length {}, found length {}", expected, found)
            }
            MismatchReason::MissingKey { key } => write!(f, "missing key {:?}", key),
        }
    }
}

/// The first point at which a value failed its signature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {reason}")]
pub struct Mismatch {
    pub path: Path,
    pub reason: MismatchReason,
}

impl Mismatch {
    pub(crate) fn at(steps: &[Step<'_>], reason: MismatchReason) -> Self {
        Mismatch {
            path: Path::from_steps(steps),
            reason,
        }
    }
}
