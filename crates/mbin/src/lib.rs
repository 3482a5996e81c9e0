// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # mbin - runtime struct descriptors for game asset records
//!
//! Deterministic, fixed-width binary serialization for the scene and
//! animation record family of a game asset pipeline. A record type is
//! described at runtime -- ordered fields with typed defaults and fixed
//! on-disk widths -- instantiated with overrides, and encoded to a
//! packed little-endian byte image.
//!
//! ## Quick Start
//!
//! ```rust
//! use mbin::{catalog, encode_record, FieldValue, Record};
//!
//! let desc = catalog::tk_anim_node_data();
//! let record = Record::with_overrides(
//!     &desc,
//!     [("Node", FieldValue::from("Hip")), ("RotIndex", FieldValue::from(3))],
//! );
//!
//! let bytes = encode_record(&record).expect("encode");
//! assert_eq!(&bytes[..3], b"Hip");          // 16-byte Node slot, null-padded
//! assert_eq!(bytes.len(), desc.encoded_size());
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StructDescriptor`] | Named record type: ordered, fixed-width fields |
//! | [`StructDescriptorBuilder`] | Fluent descriptor construction |
//! | [`Record`] | An instance: defaults updated by overrides |
//! | [`RecordArena`] | Owns records and their non-owning parent relation |
//! | [`Catalog`] | Name -> descriptor registry (built-ins + YAML layouts) |
//!
//! ## Guarantees
//!
//! - Field order is fixed at construction and defines on-disk order.
//! - Encoding is a pure function of the field values: identical records
//!   yield byte-identical output, and failures leave nothing mutated.
//! - Over-length fixed-width strings fail with
//!   [`EncodeError::EncodingOverflow`]; values are never truncated.
//! - Cyclic parent relations fail with
//!   [`EncodeError::CyclicStructure`] instead of looping.

/// Fluent builder API for struct descriptors.
pub mod builder;
/// Built-in record layouts and the name -> descriptor registry.
pub mod catalog;
/// Struct descriptors: field kinds, specs, widths.
pub mod descriptor;
/// Packed little-endian record encoding.
pub mod encode;
/// YAML layout tables (feature `layout-loaders`).
#[cfg(feature = "layout-loaders")]
pub mod loader;
/// Record instances and override construction.
pub mod record;
/// Record trees: parenting and top-down tree serialization.
pub mod tree;
/// Runtime field values.
pub mod value;

pub use builder::StructDescriptorBuilder;
pub use catalog::Catalog;
pub use descriptor::{FieldKind, FieldSpec, StructDescriptor};
pub use encode::{encode_record, encode_record_with, EncodeError, Encoder, InlineLayout, NestedLayout};
#[cfg(feature = "layout-loaders")]
pub use loader::LayoutLoader;
pub use record::Record;
pub use tree::{RecordArena, RecordId};
pub use value::FieldValue;
