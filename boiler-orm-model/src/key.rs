use std::fmt;

/// A primary key value, erased over the three representations an entity key
/// may take. Any other field type on a primary key is rejected by the
/// `Entity` derive at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Opaque textual id, e.g. a UUID stored as text.
    Text(String),
    Int(i64),
    Uint(u64),
}

impl Key {
    pub const fn kind(&self) -> KeyKind {
        match self {
            Key::Text(_) => KeyKind::Text,
            Key::Int(_) => KeyKind::Int,
            Key::Uint(_) => KeyKind::Uint,
        }
    }

    /// Whether the key is at its zero value: empty string or zero numeric.
    /// An entity whose key is zero is transient (not yet persisted).
    pub fn is_zero(&self) -> bool {
        match self {
            Key::Text(value) => value.is_empty(),
            Key::Int(value) => *value == 0,
            Key::Uint(value) => *value == 0,
        }
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Text(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Text(value.to_string())
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<u64> for Key {
    fn from(value: u64) -> Self {
        Key::Uint(value)
    }
}

/// The representation an entity declares for its primary key field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Text,
    Int,
    Uint,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyKind::Text => "string",
            KeyKind::Int => "signed integer",
            KeyKind::Uint => "unsigned integer",
        };
        write!(f, "{name}")
    }
}
