//! Course identifiers backed by a global string interner.
//!
//! Catalogs routinely carry thousands of courses and every prerequisite tree,
//! course list and semester refers back to them by id. [`Id`] keeps those
//! references at the size of a `u32` and makes equality a symbol comparison.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`].
///
/// # Thread Safety
///
/// Access goes through a `Mutex`; ids may be created from any thread.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned course identifier.
///
/// # Examples
///
/// ```
/// use degreeplan_core::identifier::Id;
///
/// let calculus = Id::new("01040012");
/// let same: Id = "01040012".into();
///
/// assert_eq!(calculus, same);
/// assert_eq!(calculus, "01040012");
/// assert!(calculus.starts_with("0104"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string slice, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Runs `f` against the underlying string without allocating.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        let value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f(value)
    }

    /// Returns `true` if the identifier starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.with_str(|value| value.starts_with(prefix))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|value| f.pad(value))
    }
}

impl std::str::FromStr for Id {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&String> for Id {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl From<String> for Id {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "01040012"`
    fn eq(&self, other: &str) -> bool {
        self.with_str(|value| value == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.with_str(|value| serializer.serialize_str(value))
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::new(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("01040012");
        let id2 = Id::new("01040012");
        let id3 = Id::new("01040013");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "01040012");
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("02340114");
        assert_eq!(format!("{id}"), "02340114");
        assert_eq!(format!("[{id:<10}]"), "[02340114  ]");
        assert_eq!(format!("[{id:>10}]"), "[  02340114]");
    }

    #[test]
    fn test_from_trait() {
        let id1: Id = "miluim_exemption".into();
        let owned = String::from("miluim_exemption");
        let id2 = Id::from(&owned);
        let id3 = Id::from(owned.clone());

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert_eq!(id1, "miluim_exemption");
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let id1 = Id::new("key1");
        let id2 = Id::new("key1");
        let id3 = Id::new("key2");

        let mut map = HashMap::new();
        map.insert(id1, "value1");
        map.insert(id3, "value2");

        assert_eq!(map.get(&id2), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_starts_with() {
        let id = Id::new("02360343");

        assert!(id.starts_with("0236"));
        assert!(id.starts_with(""));
        assert!(!id.starts_with("0234"));
        assert!(!id.starts_with("023603430"));
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("01130013");

        assert!(id == "01130013");
        assert!(id != "01130014");

        let empty = Id::new("");
        assert!(empty == "");
        assert!(empty != "non-empty");
    }
}
