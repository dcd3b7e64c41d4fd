//! Number formatting for the wire
//!
//! Quantities and cook times are `f64` internally but are usually whole.

use serde::Serializer;

/// Largest magnitude at which every integer is exactly representable in f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Serialize a whole `f64` as an integer (`10` rather than `10.0`), and
/// anything else as a float.
pub fn serialize_compact<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
