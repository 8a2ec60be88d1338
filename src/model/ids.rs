use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use uuid::Uuid;

/// Type-safe identifier wrapper around an opaque string. The phantom type
/// parameter `T` prevents mixing IDs from different entity types (e.g., a
/// profile ID vs a herd ID). Identifiers coming from the document store are
/// not required to be UUIDs; locally generated ones are.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    pub value: String,
    #[serde(skip)]
    _phantom: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _phantom: PhantomData,
        }
    }

    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Foo;

    #[test]
    fn generate_creates_unique_ids() {
        let id1 = Id::<Foo>::generate();
        let id2 = Id::<Foo>::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn ids_with_same_value_are_equal() {
        let id1 = Id::<Foo>::new("uidABC");
        let id2 = Id::<Foo>::new(String::from("uidABC"));
        assert_eq!(id1, id2);
    }

    #[test]
    fn opaque_values_are_kept_verbatim() {
        let id = Id::<Foo>::new("Xk3 9_q");
        assert_eq!(id.as_str(), "Xk3 9_q");
        assert_eq!(id.to_string(), "Xk3 9_q");
    }

    #[test]
    fn serde_is_transparent() {
        let id = Id::<Foo>::new("uidABC");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"uidABC\"");
        let deserialized: Id<Foo> = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
