// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record instances: a descriptor plus per-field values.
//!
//! A record is fully determined at construction. Declared fields take
//! their per-structure defaults unless an override supplies a value;
//! unknown override keys are accepted and stored verbatim as *extras*
//! (the override surface stays permissive, matching the asset pipeline's
//! keyword-style construction). Values are never mutated afterwards --
//! the only post-construction relation a record participates in is
//! re-parenting, which lives in [`crate::tree::RecordArena`].

use crate::descriptor::StructDescriptor;
use crate::value::FieldValue;
use std::sync::Arc;

/// An instance of a [`StructDescriptor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    descriptor: Arc<StructDescriptor>,
    values: Vec<FieldValue>,
    extras: Vec<(String, FieldValue)>,
}

impl Record {
    /// Create a record with every declared field at its default.
    pub fn new(descriptor: &Arc<StructDescriptor>) -> Self {
        let values = descriptor
            .fields()
            .iter()
            .map(|f| f.default.clone())
            .collect();
        Self {
            descriptor: descriptor.clone(),
            values,
            extras: Vec::new(),
        }
    }

    /// Create a record from defaults updated by `overrides`.
    ///
    /// Override precedence holds for every supplied key; keys not in the
    /// descriptor become extras, in the order they were supplied. Values
    /// are stored verbatim -- kind mismatches surface at encode time.
    pub fn with_overrides<I, K, V>(descriptor: &Arc<StructDescriptor>, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut record = Self::new(descriptor);
        for (name, value) in overrides {
            let name = name.into();
            match record.descriptor.field_index(&name) {
                Some(idx) => record.values[idx] = value.into(),
                None => record.extras.push((name, value.into())),
            }
        }
        record
    }

    /// The record's descriptor.
    pub fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }

    /// Structure name.
    pub fn struct_name(&self) -> &str {
        self.descriptor.name()
    }

    /// Get a field value by name (declared fields first, then extras).
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        if let Some(idx) = self.descriptor.field_index(name) {
            return self.values.get(idx);
        }
        self.extras
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Declared field values, parallel to `descriptor().fields()`.
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Extra (undeclared) override fields, in insertion order.
    pub fn extras(&self) -> &[(String, FieldValue)] {
        &self.extras
    }

    /// Iterate over all fields: declared in on-disk order, then extras.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.descriptor
            .fields()
            .iter()
            .map(|f| f.name.as_str())
            .zip(self.values.iter())
            .chain(self.extras.iter().map(|(n, v)| (n.as_str(), v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StructDescriptorBuilder;
    use crate::value::FieldValue;

    fn anim_node() -> Arc<StructDescriptor> {
        Arc::new(
            StructDescriptorBuilder::new("TkAnimNodeData")
                .string_field("Node", 0x10)
                .bool_field("CanCompress")
                .int_field("RotIndex")
                .int_field("TransIndex")
                .int_field("ScaleIndex")
                .build(),
        )
    }

    #[test]
    fn test_defaults() {
        let record = Record::new(&anim_node());
        assert_eq!(record.get("Node").and_then(|v| v.as_str()), Some(""));
        assert_eq!(
            record.get("CanCompress").and_then(|v| v.as_bool()),
            Some(false)
        );
        assert_eq!(record.get("RotIndex").and_then(|v| v.as_int()), Some(0));
    }

    #[test]
    fn test_override_precedence() {
        let record = Record::with_overrides(
            &anim_node(),
            [
                ("Node", FieldValue::from("Hip")),
                ("RotIndex", FieldValue::from(3)),
            ],
        );

        assert_eq!(record.get("Node").and_then(|v| v.as_str()), Some("Hip"));
        assert_eq!(record.get("RotIndex").and_then(|v| v.as_int()), Some(3));
        // Untouched fields keep their defaults.
        assert_eq!(record.get("TransIndex").and_then(|v| v.as_int()), Some(0));
    }

    #[test]
    fn test_unknown_keys_become_extras() {
        let record = Record::with_overrides(
            &anim_node(),
            [("Node", FieldValue::from("Spine")), ("Custom", 9.into())],
        );

        assert_eq!(record.extras().len(), 1);
        assert_eq!(record.get("Custom").and_then(|v| v.as_int()), Some(9));

        // Extras come after declared fields in iteration order.
        let names: Vec<_> = record.fields().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec![
                "Node",
                "CanCompress",
                "RotIndex",
                "TransIndex",
                "ScaleIndex",
                "Custom"
            ]
        );
    }

    #[test]
    fn test_field_order_is_declaration_order() {
        let record = Record::with_overrides(
            &anim_node(),
            // Supplied out of declared order on purpose.
            [("ScaleIndex", 5), ("RotIndex", 1)],
        );
        let names: Vec<_> = record.fields().map(|(n, _)| n).collect();
        assert_eq!(names[0], "Node");
        assert_eq!(names[2], "RotIndex");
        assert_eq!(names[4], "ScaleIndex");
    }
}
