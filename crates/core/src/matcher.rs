//! Structural matching of values against signatures.
//!
//! Matching is recursive, depth-first and short-circuiting:
//!
//! - `Any` accepts every value.
//! - Primitives match when kind and content are equal. No coercion: the
//!   string `"1"` does not match the number `1`, and `null` does not match
//!   `undefined`.
//! - Lists match elementwise and require equal length.
//! - Mappings match when every declared key exists in the value and its
//!   element matches. Extra keys in the value are ignored.
//!
//! Mapping keys are visited in sorted order, so the reported [`Mismatch`]
//! is deterministic.

use crate::error::MatchError;
use crate::mismatch::{Mismatch, MismatchReason, Path, Step};
use crate::signature::Signature;
use crate::value::Value;

/// Default nesting limit for [`Matcher::new`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A stateless matcher with an optional nesting limit.
///
/// Value trees are owned, so cycles cannot occur; the limit only guards
/// against stack exhaustion on pathologically deep signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher {
    max_depth: Option<usize>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    pub fn new() -> Self {
        Matcher {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }

    /// A matcher without a nesting limit. It never returns an error.
    pub fn unbounded() -> Self {
        Matcher { max_depth: None }
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Returns whether `value` satisfies `signature`.
    pub fn try_matches(&self, value: &Value, signature: &Signature) -> Result<bool, MatchError> {
        Ok(self.explain(value, signature)?.is_none())
    }

    /// Returns the first mismatch, or `None` if `value` satisfies `signature`.
    pub fn explain(
        &self,
        value: &Value,
        signature: &Signature,
    ) -> Result<Option<Mismatch>, MatchError> {
        let mut trail = Vec::new();
        self.walk(value, signature, &mut trail)
    }

    fn walk<'a>(
        &self,
        value: &'a Value,
        signature: &'a Signature,
        trail: &mut Vec<Step<'a>>,
    ) -> Result<Option<Mismatch>, MatchError> {
        if let Some(limit) = self.max_depth {
            if trail.len() > limit {
                return Err(MatchError::DepthLimitExceeded {
                    limit,
                    path: Path::from_steps(trail),
                });
            }
        }

        match signature {
            Signature::Any => Ok(None),

            Signature::List(expected) => {
                let Value::List(found) = value else {
                    return Ok(Some(kind_mismatch(trail, value, signature)));
                };
                if found.len() != expected.len() {
                    return Ok(Some(Mismatch::at(
                        trail,
                        MismatchReason::LengthMismatch {
                            expected: expected.len(),
                            found: found.len(),
                        },
                    )));
                }
                for (i, (v, s)) in found.iter().zip(expected).enumerate() {
                    trail.push(Step::Index(i));
                    let outcome = self.walk(v, s, trail)?;
                    trail.pop();
                    if outcome.is_some() {
                        return Ok(outcome);
                    }
                }
                Ok(None)
            }

            Signature::Map(expected) => {
                let Value::Map(found) = value else {
                    return Ok(Some(kind_mismatch(trail, value, signature)));
                };
                for (key, s) in expected {
                    // The key must be present even when the signature accepts
                    // any value there. A key holding `Absent` is present.
                    let Some(v) = found.get(key) else {
                        return Ok(Some(Mismatch::at(
                            trail,
                            MismatchReason::MissingKey { key: key.clone() },
                        )));
                    };
                    trail.push(Step::Key(key));
                    let outcome = self.walk(v, s, trail)?;
                    trail.pop();
                    if outcome.is_some() {
                        return Ok(outcome);
                    }
                }
                Ok(None)
            }

            _ => match primitive_mismatch(value, signature) {
                Some(reason) => Ok(Some(Mismatch::at(trail, reason))),
                None => Ok(None),
            },
        }
    }
}

fn kind_mismatch(trail: &[Step<'_>], value: &Value, signature: &Signature) -> Mismatch {
    Mismatch::at(
        trail,
        MismatchReason::KindMismatch {
            expected: signature.kind(),
            found: value.kind(),
        },
    )
}

fn primitive_mismatch(value: &Value, signature: &Signature) -> Option<MismatchReason> {
    let equal = match (signature, value) {
        (Signature::String(e), Value::String(f)) => e == f,
        (Signature::Number(e), Value::Number(f)) => e == f,
        (Signature::Bool(e), Value::Bool(f)) => e == f,
        (Signature::Null, Value::Null) | (Signature::Absent, Value::Absent) => true,
        _ => false,
    };
    if equal {
        None
    } else if signature.kind() == value.kind() {
        Some(MismatchReason::ValueMismatch {
            expected: signature.to_string(),
            found: value.to_string(),
        })
    } else {
        Some(MismatchReason::KindMismatch {
            expected: signature.kind(),
            found: value.kind(),
        })
    }
}

/// Returns whether `value` satisfies `signature`, with no nesting limit.
pub fn matches(value: &Value, signature: &Signature) -> bool {
    mismatch(value, signature).is_none()
}

/// Returns the first mismatch, with no nesting limit.
pub fn mismatch(value: &Value, signature: &Signature) -> Option<Mismatch> {
    // An unbounded matcher has no failure mode.
    Matcher::unbounded()
        .explain(value, signature)
        .ok()
        .flatten()
}
