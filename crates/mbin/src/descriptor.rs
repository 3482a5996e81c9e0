// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Struct descriptors: named record types with typed, fixed-width fields.

use crate::record::Record;
use crate::value::FieldValue;
use std::sync::Arc;

/// Field kinds and their fixed on-disk encodings.
///
/// Every kind encodes to a constant byte width regardless of content;
/// strings are null-padded up to their declared width.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Boolean, 1 byte (0 or 1).
    Bool,
    /// Signed 32-bit integer, little-endian, 4 bytes.
    Int,
    /// IEEE-754 single precision, little-endian, 4 bytes.
    Float,
    /// Fixed-width byte string, exactly `width` bytes on disk.
    String { width: usize },
    /// Nested record with its own descriptor.
    Struct(Arc<StructDescriptor>),
}

impl FieldKind {
    /// Encoded width in bytes.
    pub fn encoded_width(&self) -> usize {
        match self {
            Self::Bool => 1,
            Self::Int | Self::Float => 4,
            Self::String { width } => *width,
            Self::Struct(desc) => desc.encoded_size(),
        }
    }

    /// Short kind name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String { .. } => "string",
            Self::Struct(_) => "struct",
        }
    }

    /// Default value for this kind (zero value; nested structs get a
    /// default-constructed record).
    pub fn default_value(&self) -> FieldValue {
        match self {
            Self::Bool => FieldValue::Bool(false),
            Self::Int => FieldValue::Int(0),
            Self::Float => FieldValue::Float(0.0),
            Self::String { .. } => FieldValue::Str(String::new()),
            Self::Struct(desc) => FieldValue::Struct(Box::new(Record::new(desc))),
        }
    }
}

/// Field descriptor for struct members.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,
    /// Field kind (fixes the on-disk encoding).
    pub kind: FieldKind,
    /// Per-field default, taken when construction supplies no override.
    pub default: FieldValue,
}

impl FieldSpec {
    /// Create a field spec with the kind's zero default.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let default = kind.default_value();
        Self {
            name: name.into(),
            kind,
            default,
        }
    }

    /// Set an explicit default value.
    pub fn with_default(mut self, default: impl Into<FieldValue>) -> Self {
        self.default = default.into();
        self
    }
}

/// A named record type: ordered fields with typed defaults and fixed
/// encoded widths.
///
/// Field order is fixed at construction and defines on-disk order.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDescriptor {
    name: String,
    fields: Vec<FieldSpec>,
}

impl StructDescriptor {
    /// Create a descriptor from an ordered field list.
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Structure name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields, in on-disk order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get field index by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Total encoded size in bytes (sum of field widths, packed).
    pub fn encoded_size(&self) -> usize {
        self.fields.iter().map(|f| f.kind.encoded_width()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_widths() {
        assert_eq!(FieldKind::Bool.encoded_width(), 1);
        assert_eq!(FieldKind::Int.encoded_width(), 4);
        assert_eq!(FieldKind::Float.encoded_width(), 4);
        assert_eq!(FieldKind::String { width: 0x10 }.encoded_width(), 16);
    }

    #[test]
    fn test_field_lookup_and_order() {
        let desc = StructDescriptor::new(
            "TkTestData",
            vec![
                FieldSpec::new("Name", FieldKind::String { width: 8 }),
                FieldSpec::new("Index", FieldKind::Int),
            ],
        );

        assert_eq!(desc.name(), "TkTestData");
        assert_eq!(desc.field_index("Name"), Some(0));
        assert_eq!(desc.field_index("Index"), Some(1));
        assert!(desc.field("Missing").is_none());
        assert_eq!(desc.encoded_size(), 12);
    }

    #[test]
    fn test_nested_size() {
        let inner = Arc::new(StructDescriptor::new(
            "Inner",
            vec![
                FieldSpec::new("A", FieldKind::Float),
                FieldSpec::new("B", FieldKind::Float),
            ],
        ));
        let outer = StructDescriptor::new(
            "Outer",
            vec![
                FieldSpec::new("Tag", FieldKind::String { width: 4 }),
                FieldSpec::new("Pair", FieldKind::Struct(inner)),
            ],
        );
        assert_eq!(outer.encoded_size(), 4 + 8);
    }

    #[test]
    fn test_explicit_default() {
        let spec = FieldSpec::new("ScaleX", FieldKind::Float).with_default(1.0f32);
        assert_eq!(spec.default.as_float(), Some(1.0));
    }
}
