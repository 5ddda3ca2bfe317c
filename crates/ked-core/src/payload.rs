//! Structured-data accessors.
//!
//! Tool integrations (the quickfix list, for one) hand the core structured
//! payloads. The core never names a serialization library's types; it reads
//! through [`Fields`], which answers each lookup with a [`Lookup`] that the
//! caller collapses with a default of its choosing.
//!
//! An implementation for `serde_json::Value` is provided behind the `json`
//! feature (on by default).

/// Outcome of one keyed lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    /// The key is absent (or the container is not a map).
    Missing,
    /// The key is present but holds another type.
    WrongType,
}

impl<T> Lookup<T> {
    /// The found value, or `default` when absent or mistyped.
    pub fn or(self, default: T) -> T {
        match self {
            Self::Found(value) => value,
            Self::Missing | Self::WrongType => default,
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Missing | Self::WrongType => None,
        }
    }

    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Key/value/array access over some structured document.
pub trait Fields {
    fn get_str(&self, key: &str) -> Lookup<&str>;
    fn get_u64(&self, key: &str) -> Lookup<u64>;
    /// The elements of an array-valued key.
    fn get_items(&self, key: &str) -> Lookup<Vec<&Self>>;
}

#[cfg(feature = "json")]
impl Fields for serde_json::Value {
    fn get_str(&self, key: &str) -> Lookup<&str> {
        match self.get(key) {
            None => Lookup::Missing,
            Some(Self::String(s)) => Lookup::Found(s.as_str()),
            Some(_) => Lookup::WrongType,
        }
    }

    fn get_u64(&self, key: &str) -> Lookup<u64> {
        match self.get(key) {
            None => Lookup::Missing,
            Some(v) => v.as_u64().map_or(Lookup::WrongType, Lookup::Found),
        }
    }

    fn get_items(&self, key: &str) -> Lookup<Vec<&Self>> {
        match self.get(key) {
            None => Lookup::Missing,
            Some(Self::Array(items)) => Lookup::Found(items.iter().collect()),
            Some(_) => Lookup::WrongType,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
