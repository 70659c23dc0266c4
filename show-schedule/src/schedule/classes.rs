//! Class label resolution.
//!
//! A ride is shown with a single class label built from three sources:
//! the user's override mapping, the show's class list, and the test name
//! attached to the ride itself.

use std::collections::HashMap;
use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use crate::foxvillage::ClassRecord;

/// Class records keyed by class number.
pub type ClassLookup = HashMap<String, ClassRecord>;

/// Ordered `pattern -> label` overrides for class labels.
///
/// The first pattern found inside a ride's test name wins, so order
/// matters: it is the order of the keys in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMapping(Vec<(String, String)>);

impl ClassMapping {
    /// Build a mapping from `(pattern, label)` pairs, in order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut mapping = Self::default();
        for (pattern, label) in pairs {
            mapping.insert(pattern.into(), label.into());
        }
        mapping
    }

    /// Append a pattern, or replace the label of an existing one in place.
    pub fn insert(&mut self, pattern: String, label: String) {
        match self.0.iter_mut().find(|(p, _)| *p == pattern) {
            Some(entry) => entry.1 = label,
            None => self.0.push((pattern, label)),
        }
    }

    /// Label of the first pattern contained in `test_name`.
    pub fn resolve(&self, test_name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(pattern, _)| test_name.contains(pattern.as_str()))
            .map(|(_, label)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, l)| (p.as_str(), l.as_str()))
    }
}

impl<'de> Deserialize<'de> for ClassMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = ClassMapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of class name patterns to labels")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut mapping = ClassMapping::default();
                while let Some((pattern, label)) = map.next_entry::<String, String>()? {
                    mapping.insert(pattern, label);
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}

/// Index class records by class number. Later duplicates replace earlier ones.
pub fn build_class_lookup(records: impl IntoIterator<Item = ClassRecord>) -> ClassLookup {
    records
        .into_iter()
        .map(|record| (record.class_id.clone(), record))
        .collect()
}

/// Display label for a ride in class `class_id`.
///
/// The test name (or the class name when the ride has no test) is checked
/// against `mapping` first. Without a mapping hit the label is
/// `"<id> - <class name> - <test>"`, leaving out the parts that are unknown.
pub fn format_class_string(
    class_id: &str,
    test: Option<&str>,
    lookup: &ClassLookup,
    mapping: &ClassMapping,
) -> String {
    let class_name = lookup
        .get(class_id)
        .and_then(|record| record.class_name.as_deref())
        .unwrap_or_default();
    let test = test.filter(|t| !t.is_empty());

    let full_test_name = test.unwrap_or(class_name);
    if let Some(label) = mapping.resolve(full_test_name) {
        return label.to_string();
    }

    let mut label = class_id.to_string();
    if !class_name.is_empty() {
        label.push_str(" - ");
        label.push_str(class_name);
    }
    if let Some(test) = test {
        label.push_str(" - ");
        label.push_str(test);
    }
    label
}
