// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for StructDescriptor.

use crate::descriptor::{FieldKind, FieldSpec, StructDescriptor};
use crate::value::FieldValue;
use std::sync::Arc;

/// Builder for creating [`StructDescriptor`] instances.
#[derive(Debug)]
pub struct StructDescriptorBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl StructDescriptorBuilder {
    /// Create a new builder for a named structure.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field with an explicit kind and the kind's zero default.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec::new(name, kind));
        self
    }

    /// Add a field with an explicit default value.
    pub fn field_with_default(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        default: impl Into<FieldValue>,
    ) -> Self {
        self.fields
            .push(FieldSpec::new(name, kind).with_default(default));
        self
    }

    /// Add a boolean field (defaults to false).
    pub fn bool_field(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Bool)
    }

    /// Add an integer field (defaults to 0).
    pub fn int_field(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Int)
    }

    /// Add a float field (defaults to 0.0).
    pub fn float_field(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Float)
    }

    /// Add a float field with an explicit default.
    pub fn float_field_with_default(self, name: impl Into<String>, default: f32) -> Self {
        self.field_with_default(name, FieldKind::Float, default)
    }

    /// Add a fixed-width string field (defaults to empty).
    pub fn string_field(self, name: impl Into<String>, width: usize) -> Self {
        self.field(name, FieldKind::String { width })
    }

    /// Add a fixed-width string field with an explicit default.
    pub fn string_field_with_default(
        self,
        name: impl Into<String>,
        width: usize,
        default: impl Into<String>,
    ) -> Self {
        self.field_with_default(name, FieldKind::String { width }, default.into())
    }

    /// Add a nested struct field (defaults to a default-constructed record).
    pub fn struct_field(self, name: impl Into<String>, nested: Arc<StructDescriptor>) -> Self {
        self.field(name, FieldKind::Struct(nested))
    }

    /// Build the descriptor, freezing field order.
    pub fn build(self) -> StructDescriptor {
        StructDescriptor::new(self.name, self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_order_and_kinds() {
        let desc = StructDescriptorBuilder::new("TkSceneNodeAttributeData")
            .string_field("Name", 0x10)
            .string_field("AltID", 0x10)
            .string_field("Value", 0x100)
            .build();

        assert_eq!(desc.name(), "TkSceneNodeAttributeData");
        assert_eq!(desc.fields().len(), 3);
        assert_eq!(desc.fields()[2].name, "Value");
        assert_eq!(desc.encoded_size(), 0x10 + 0x10 + 0x100);
    }

    #[test]
    fn test_float_defaults() {
        let desc = StructDescriptorBuilder::new("TkTransformData")
            .float_field("TransX")
            .float_field_with_default("ScaleX", 1.0)
            .build();

        assert_eq!(desc.field("TransX").map(|f| f.default.as_float()), Some(Some(0.0)));
        assert_eq!(desc.field("ScaleX").map(|f| f.default.as_float()), Some(Some(1.0)));
    }

    #[test]
    fn test_nested_field() {
        let inner = Arc::new(
            StructDescriptorBuilder::new("Inner")
                .int_field("Value")
                .build(),
        );
        let desc = StructDescriptorBuilder::new("Outer")
            .struct_field("Child", inner)
            .build();

        match &desc.fields()[0].kind {
            FieldKind::Struct(nested) => assert_eq!(nested.name(), "Inner"),
            other => panic!("expected struct kind, got {}", other.name()),
        }
    }
}
