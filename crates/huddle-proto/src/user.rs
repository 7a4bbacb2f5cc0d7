//! User identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Non-integral numeric id, compared by its bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatId(u64);

impl FloatId {
    /// The id as a float.
    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// Opaque user identifier assigned by the server.
///
/// Servers in the wild hand out either integers or strings (UUIDs), so both
/// are accepted. The value is only ever compared for equality. Numbers compare
/// by value: `1` and `1.0` are the same id, and ids that do not fit an `i64`
/// are kept as floats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "RawId")]
pub enum UserId {
    /// Integral numeric identifier.
    Number(i64),
    /// Numeric identifier with a fraction or outside the `i64` range.
    Float(FloatId),
    /// String identifier.
    Text(String),
}

/// Wire form of [`UserId`].
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawId {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl From<RawId> for UserId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Signed(n) => Self::Number(n),
            RawId::Unsigned(n) => Self::from_float(n as f64),
            RawId::Float(n) => Self::from_float(n),
            RawId::Text(s) => Self::Text(s),
        }
    }
}

impl From<UserId> for RawId {
    fn from(id: UserId) -> Self {
        match id {
            UserId::Number(n) => Self::Signed(n),
            UserId::Float(n) => Self::Float(n.value()),
            UserId::Text(s) => Self::Text(s),
        }
    }
}

impl UserId {
    #[allow(clippy::float_cmp)]
    fn from_float(n: f64) -> Self {
        // i64::MAX as f64 rounds up to 2^63, which is out of range.
        let in_range = n >= i64::MIN as f64 && n < i64::MAX as f64;
        if n.fract() == 0.0 && in_range {
            Self::Number(n as i64)
        } else {
            Self::Float(FloatId(n.to_bits()))
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{}", n.value()),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

/// A registered chat participant.
///
/// Issued by the registration endpoint and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    pub id: UserId,
    /// Display nickname.
    pub name: String,
}

impl User {
    /// Create a user from an id and a nickname.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}
