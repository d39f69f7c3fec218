//! Pluggable components
//!
//! Comparers, mergers, cleaners, filter policies and table property
//! collectors are supplied by the application. The options subsystem only
//! cares about their names: a name is written to the OPTIONS text, turned
//! back into a component by a parse hook, and compared on reopen.

mod cleaner;
mod comparer;
mod filter;
mod merger;

pub use cleaner::{ArchiveCleaner, Cleaner, DeleteCleaner, DEFAULT_CLEANER_NAME};
pub use comparer::{BytewiseComparer, Comparer, DEFAULT_COMPARER_NAME};
pub use filter::{BloomFilterPolicy, FilterPolicy};
pub use merger::{ConcatenateMerger, Merger, DEFAULT_MERGER_NAME};

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A component identified by a unique name
pub trait Named {
    fn name(&self) -> &str;
}

/// Collects user properties while a table is written
pub trait TablePropertyCollector: Named + Send + Sync {}

/// Reference to a pluggable component: its name, plus the component itself
/// once resolved.
///
/// Identity is the name alone. Two references with equal names are
/// interchangeable no matter what they resolved to.
pub struct ComponentRef<T: ?Sized> {
    name: String,
    component: Option<Arc<T>>,
}

impl<T: ?Sized> ComponentRef<T> {
    /// Reference by name only, left unresolved
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            component: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved component, if any
    pub fn component(&self) -> Option<&Arc<T>> {
        self.component.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.component.is_some()
    }

    /// Check if both references name the same component
    pub fn same_identity(&self, other: &ComponentRef<T>) -> bool {
        self.name == other.name
    }
}

impl<T: ?Sized + Named> ComponentRef<T> {
    /// Resolved reference, named after the component
    pub fn new(component: Arc<T>) -> Self {
        Self {
            name: component.name().to_string(),
            component: Some(component),
        }
    }
}

impl<T: ?Sized + Named> From<Arc<T>> for ComponentRef<T> {
    fn from(component: Arc<T>) -> Self {
        Self::new(component)
    }
}

impl<T: ?Sized> Clone for ComponentRef<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            component: self.component.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for ComponentRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRef")
            .field("name", &self.name)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl<T: ?Sized> fmt::Display for ComponentRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T: ?Sized> Serialize for ComponentRef<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_name() {
        let resolved: ComponentRef<dyn Comparer> =
            ComponentRef::new(Arc::new(BytewiseComparer) as Arc<dyn Comparer>);
        let by_name: ComponentRef<dyn Comparer> = ComponentRef::named(DEFAULT_COMPARER_NAME);

        assert!(resolved.is_resolved());
        assert!(!by_name.is_resolved());
        assert!(resolved.same_identity(&by_name));
        assert!(!by_name.same_identity(&ComponentRef::named("foo")));
    }

    #[test]
    fn test_serializes_as_name() {
        let merger: ComponentRef<dyn Merger> =
            ComponentRef::new(Arc::new(ConcatenateMerger) as Arc<dyn Merger>);
        let json = serde_json::to_string(&merger).unwrap();
        assert_eq!(json, "\"pebble.concatenate\"");
    }
}
