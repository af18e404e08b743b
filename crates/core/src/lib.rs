//! shapematch-core: structural shape matching.
//!
//! Checks a [`Value`] against a partial [`Signature`]: mappings constrain
//! only the keys they declare, lists must match exactly, primitives compare
//! by kind and content, and [`ANY`] accepts anything. The entry points are
//! [`matches`] for a plain answer and [`Matcher::explain`] for a
//! [`Mismatch`] describing where the value diverged.

mod assert;
mod error;
pub mod json;
mod matcher;
mod mismatch;
mod recorder;
mod signature;
mod value;

pub use assert::check_shape;
pub use error::{ConvertError, MatchError};
pub use json::DirectiveReader;
pub use matcher::{matches, mismatch, Matcher, DEFAULT_MAX_DEPTH};
pub use mismatch::{Mismatch, MismatchReason, Path, PathSegment};
pub use recorder::CallRecorder;
pub use signature::{Signature, ANY};
pub use value::{Kind, Value};
