//! Assertion helpers for tests.

use crate::matcher::mismatch;
use crate::mismatch::Mismatch;
use crate::signature::Signature;
use crate::value::Value;

/// Returns `Err` with the first mismatch if `value` does not satisfy
/// `signature`.
pub fn check_shape(value: &Value, signature: &Signature) -> Result<(), Mismatch> {
    match mismatch(value, signature) {
        Some(m) => Err(m),
        None => Ok(()),
    }
}

/// Asserts that a [`Value`] satisfies a [`Signature`], panicking with the
/// first mismatch otherwise.
///
/// ```
/// use shapematch_core::{assert_shape, Signature, Value, ANY};
///
/// let report = Value::map([("id", Value::from(7)), ("url", Value::from("https://a.test"))]);
/// assert_shape!(report, Signature::map([("id", Signature::from(7)), ("url", ANY)]));
/// ```
#[macro_export]
macro_rules! assert_shape {
    ($value:expr, $signature:expr $(,)?) => {
        if let ::std::result::Result::Err(mismatch) = $crate::check_shape(&$value, &$signature) {
            ::std::panic!("value does not match signature: {}", mismatch);
        }
    };
    ($value:expr, $signature:expr, $($arg:tt)+) => {
        if let ::std::result::Result::Err(mismatch) = $crate::check_shape(&$value, &$signature) {
            ::std::panic!("{}: {}", ::std::format_args!($($arg)+), mismatch);
        }
    };
}
