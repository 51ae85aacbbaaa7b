//! Tolerant deserializers for warehouse columns.
//!
//! Identifier columns arrive as strings or integers depending on the table
//! schema, and count columns become floats once a null sneaks into them.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Int(i64),
    Float(f64),
}

pub(super) fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Scalar::deserialize(deserializer).map(Scalar::into_string)
}

pub(super) fn opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
}

#[allow(clippy::cast_possible_truncation)]
pub(super) fn opt_count<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    Ok(
        Option::<Count>::deserialize(deserializer)?.and_then(|count| match count {
            Count::Int(i) => Some(i),
            Count::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Count::Float(_) => None,
        }),
    )
}
