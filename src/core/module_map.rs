//! Insertion-ordered map keyed by module identifier.
//!
//! Every `module -> value` record the analyzer produces (the dependency tree,
//! coupling records, centrality maps, community assignments) goes through
//! this type so that iteration and serialization follow the order in which
//! modules were first seen. Hash-ordered maps would make reports and
//! tie-breaking depend on the hasher seed.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use super::types::ModuleId;

/// Map from module identifier to `V` that remembers insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleMap<V> {
    entries: Vec<(ModuleId, V)>,
    index: HashMap<ModuleId, usize>,
}

impl<V> Default for ModuleMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ModuleMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert a value. An existing key keeps its position and has its value
    /// replaced; the previous value is returned.
    pub fn insert(&mut self, module: impl Into<ModuleId>, value: V) -> Option<V> {
        let module = module.into();
        match self.index.get(&module) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.index.insert(module.clone(), self.entries.len());
                self.entries.push((module, value));
                None
            }
        }
    }

    pub fn get(&self, module: &str) -> Option<&V> {
        self.index.get(module).map(|&slot| &self.entries[slot].1)
    }

    pub fn get_mut(&mut self, module: &str) -> Option<&mut V> {
        match self.index.get(module) {
            Some(&slot) => Some(&mut self.entries[slot].1),
            None => None,
        }
    }

    pub fn contains_key(&self, module: &str) -> bool {
        self.index.contains_key(module)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ModuleId> {
        self.entries.iter().map(|(module, _)| module)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> Iter<'_, V> {
        self.into_iter()
    }

    /// Apply `f` to every value, keeping keys and order.
    pub fn map_values<U>(self, mut f: impl FnMut(&ModuleId, V) -> U) -> ModuleMap<U> {
        let entries: Vec<(ModuleId, U)> = self
            .entries
            .into_iter()
            .map(|(module, value)| {
                let mapped = f(&module, value);
                (module, mapped)
            })
            .collect();
        ModuleMap {
            entries,
            index: self.index,
        }
    }
}

impl<V> FromIterator<(ModuleId, V)> for ModuleMap<V> {
    fn from_iter<I: IntoIterator<Item = (ModuleId, V)>>(iter: I) -> Self {
        let mut map = ModuleMap::new();
        for (module, value) in iter {
            map.insert(module, value);
        }
        map
    }
}

impl<V> IntoIterator for ModuleMap<V> {
    type Item = (ModuleId, V);
    type IntoIter = std::vec::IntoIter<(ModuleId, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Borrowing iterator over `(module, value)` pairs in insertion order.
pub struct Iter<'a, V> {
    inner: std::slice::Iter<'a, (ModuleId, V)>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a ModuleId, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(module, value)| (module, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, V> IntoIterator for &'a ModuleMap<V> {
    type Item = (&'a ModuleId, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

impl<V: Serialize> Serialize for ModuleMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (module, value) in &self.entries {
            map.serialize_entry(module, value)?;
        }
        map.end()
    }
}

struct ModuleMapVisitor<V> {
    marker: PhantomData<V>,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for ModuleMapVisitor<V> {
    type Value = ModuleMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map keyed by module identifier")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = ModuleMap::with_capacity(access.size_hint().unwrap_or(0));
        // Later duplicates overwrite earlier values but keep the first position.
        while let Some((module, value)) = access.next_entry::<ModuleId, V>()? {
            map.insert(module, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for ModuleMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ModuleMapVisitor {
            marker: PhantomData,
        })
    }
}
