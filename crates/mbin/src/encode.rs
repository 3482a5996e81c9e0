// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Packed little-endian encoding for records.
//!
//! Encoding is a pure function of the field values: declared fields are
//! emitted in on-disk order with no alignment padding, and a failed
//! encode never leaves a partially written field in the output. Extras
//! (undeclared override fields) carry no declared width and are skipped.
//!
//! Nested struct fields go through the [`NestedLayout`] seam. The default
//! [`InlineLayout`] inlines the child's bytes; containers that emit
//! offsets or reference tables instead can substitute their own impl.

use crate::descriptor::{FieldKind, FieldSpec};
use crate::record::Record;
use crate::value::FieldValue;
use std::fmt;

/// Errors for record encoding.
#[derive(Debug)]
pub enum EncodeError {
    /// A value does not fit its declared fixed width.
    EncodingOverflow {
        field: String,
        len: usize,
        width: usize,
    },
    /// A stored value's type has no encoding strategy for the declared kind.
    UnknownFieldKind {
        field: String,
        expected: String,
        found: String,
    },
    /// A tree serialization pass revisited an already-visited instance.
    CyclicStructure { name: String },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EncodingOverflow { field, len, width } => {
                write!(
                    f,
                    "Value for field '{}' exceeds fixed width: {} > {} bytes",
                    field, len, width
                )
            }
            Self::UnknownFieldKind {
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "No encoding for field '{}': declared {}, stored {}",
                    field, expected, found
                )
            }
            Self::CyclicStructure { name } => {
                write!(f, "Cyclic parent relation through '{}'", name)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// Encode a record to its packed byte image (nested fields inlined).
pub fn encode_record(record: &Record) -> Result<Vec<u8>, EncodeError> {
    encode_record_with(record, &InlineLayout)
}

/// Encode a record with a caller-supplied nested layout strategy.
pub fn encode_record_with(
    record: &Record,
    layout: &dyn NestedLayout,
) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = Encoder::new();
    encoder.encode_record(record, layout)?;
    Ok(encoder.into_bytes())
}

/// Strategy for emitting nested struct fields.
pub trait NestedLayout {
    /// Emit the nested record for `field` into the encoder.
    fn encode_nested(
        &self,
        encoder: &mut Encoder,
        field: &FieldSpec,
        nested: &Record,
    ) -> Result<(), EncodeError>;
}

/// Default strategy: inline the child record's bytes at the field position.
pub struct InlineLayout;

impl NestedLayout for InlineLayout {
    fn encode_nested(
        &self,
        encoder: &mut Encoder,
        _field: &FieldSpec,
        nested: &Record,
    ) -> Result<(), EncodeError> {
        encoder.encode_record(nested, self)
    }
}

/// Packed little-endian encoder.
pub struct Encoder {
    buffer: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn put_bool(&mut self, v: bool) {
        self.buffer.push(u8::from(v));
    }

    pub fn put_i32(&mut self, v: i32) {
        self.buffer.extend(&v.to_le_bytes());
    }

    pub fn put_f32(&mut self, v: f32) {
        self.buffer.extend(&v.to_le_bytes());
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes);
    }

    /// Write a string into exactly `width` bytes, right-padded with nulls.
    ///
    /// Over-length values fail before anything is written, so a failed
    /// field never leaves partial bytes behind.
    pub fn put_padded_str(
        &mut self,
        field: &str,
        value: &str,
        width: usize,
    ) -> Result<(), EncodeError> {
        let bytes = value.as_bytes();
        if bytes.len() > width {
            return Err(EncodeError::EncodingOverflow {
                field: field.to_string(),
                len: bytes.len(),
                width,
            });
        }
        self.buffer.extend(bytes);
        self.buffer
            .extend(std::iter::repeat_n(0u8, width - bytes.len()));
        Ok(())
    }

    /// Encode all declared fields of a record, in on-disk order.
    pub fn encode_record(
        &mut self,
        record: &Record,
        layout: &dyn NestedLayout,
    ) -> Result<(), EncodeError> {
        for (spec, value) in record.descriptor().fields().iter().zip(record.values()) {
            self.encode_field(spec, value, layout)?;
        }
        for (name, _) in record.extras() {
            log::trace!(
                "skipping extra field '{}' on {} (no declared encoding)",
                name,
                record.struct_name()
            );
        }
        Ok(())
    }

    fn encode_field(
        &mut self,
        spec: &FieldSpec,
        value: &FieldValue,
        layout: &dyn NestedLayout,
    ) -> Result<(), EncodeError> {
        match (&spec.kind, value) {
            (FieldKind::Bool, FieldValue::Bool(v)) => self.put_bool(*v),
            (FieldKind::Int, FieldValue::Int(v)) => self.put_i32(*v),
            (FieldKind::Float, FieldValue::Float(v)) => self.put_f32(*v),
            (FieldKind::String { width }, FieldValue::Str(s)) => {
                self.put_padded_str(&spec.name, s, *width)?;
            }
            (FieldKind::Struct(declared), FieldValue::Struct(nested)) => {
                if declared.name() != nested.struct_name() {
                    return Err(EncodeError::UnknownFieldKind {
                        field: spec.name.clone(),
                        expected: declared.name().to_string(),
                        found: nested.struct_name().to_string(),
                    });
                }
                layout.encode_nested(self, spec, nested)?;
            }
            (kind, other) => {
                return Err(EncodeError::UnknownFieldKind {
                    field: spec.name.clone(),
                    expected: kind.name().to_string(),
                    found: other.kind_name().to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
