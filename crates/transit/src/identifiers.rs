//! Type-safe identifiers for catalogue entities.
//!
//! Names use Arc<str> for cheap cloning, handles are plain indices into the
//! catalogue's append-only storage.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.as_str().cmp(other.as_str())
            }
        }

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.as_str().hash(state);
            }
        }

        // Lets name-keyed maps be queried with a plain &str.
        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

macro_rules! impl_handle {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub(crate) u32);

        impl $name {
            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

impl_identifier!(StopIdentifier);
impl_identifier!(BusIdentifier);

impl_handle!(StopId);
impl_handle!(BusId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = StopIdentifier::new("Tolstopaltsevo");
        let id2 = StopIdentifier::new("Tolstopaltsevo");
        let id3 = id1.clone();

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert!(Arc::ptr_eq(&id1.0, &id3.0)); // Clone shares Arc
    }

    #[test]
    fn test_identifier_lookup_by_str() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(BusIdentifier::new("750"), 42);

        assert_eq!(map.get("750"), Some(&42));
        assert_eq!(map.get(&BusIdentifier::new("750")), Some(&42));
        assert_eq!(map.get("751"), None);
    }

    #[test]
    fn test_identifier_ordering() {
        let mut names = vec![
            BusIdentifier::new("828"),
            BusIdentifier::new("256"),
            BusIdentifier::new("750"),
        ];
        names.sort();

        let names: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["256", "750", "828"]);
    }

    #[test]
    fn test_identifier_display() {
        let id = BusIdentifier::new("297");
        assert_eq!(format!("{}", id), "297");
        assert_eq!(format!("{}", StopId::from_index(3)), "#3");
    }

    #[test]
    fn test_handle_index() {
        let id = StopId::from_index(7);
        assert_eq!(id.index(), 7);
        assert!(BusId::from_index(1) < BusId::from_index(2));
    }
}
