// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Data-driven table of the known record layouts.
//!
//! The asset pipeline's record family is declared as plain data built
//! through the descriptor builder, and a [`Catalog`] resolves structure
//! names to shared descriptors. Only structures expressible with the
//! fixed-width kinds appear -- variable-length list members of the wider
//! family are a container concern, not part of this core.

use crate::builder::StructDescriptorBuilder;
use crate::descriptor::StructDescriptor;
use std::collections::HashMap;
use std::sync::Arc;

/// Animation node: channel indices for one named joint.
pub fn tk_anim_node_data() -> Arc<StructDescriptor> {
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

/// Local transform: translation, Euler rotation, scale. Scale defaults 1.
pub fn tk_transform_data() -> Arc<StructDescriptor> {
    Arc::new(
        StructDescriptorBuilder::new("TkTransformData")
            .float_field("TransX")
            .float_field("TransY")
            .float_field("TransZ")
            .float_field("RotX")
            .float_field("RotY")
            .float_field("RotZ")
            .float_field_with_default("ScaleX", 1.0)
            .float_field_with_default("ScaleY", 1.0)
            .float_field_with_default("ScaleZ", 1.0)
            .build(),
    )
}

/// Scene node attribute: name/alt-id keys and a wide value slot.
pub fn tk_scene_node_attribute_data() -> Arc<StructDescriptor> {
    Arc::new(
        StructDescriptorBuilder::new("TkSceneNodeAttributeData")
            .string_field("Name", 0x10)
            .string_field("AltID", 0x10)
            .string_field("Value", 0x100)
            .build(),
    )
}

/// Scene node: name, type tag and an inlined local transform.
pub fn tk_scene_node_data() -> Arc<StructDescriptor> {
    Arc::new(
        StructDescriptorBuilder::new("TkSceneNodeData")
            .string_field("Name", 0x80)
            .int_field("NameHash")
            .string_field("Type", 0x10)
            .struct_field("Transform", tk_transform_data())
            .build(),
    )
}

/// Rotation component: constant spin speed.
pub fn tk_rotation_component_data() -> Arc<StructDescriptor> {
    Arc::new(
        StructDescriptorBuilder::new("TkRotationComponentData")
            .float_field("Speed")
            .build(),
    )
}

/// Name -> descriptor registry.
#[derive(Debug, Default)]
pub struct Catalog {
    types: HashMap<String, Arc<StructDescriptor>>,
}

impl Catalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Catalog pre-loaded with the built-in record family.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(tk_anim_node_data());
        catalog.register(tk_transform_data());
        catalog.register(tk_scene_node_attribute_data());
        catalog.register(tk_scene_node_data());
        catalog.register(tk_rotation_component_data());
        catalog
    }

    /// Register a descriptor under its structure name.
    pub fn register(&mut self, descriptor: Arc<StructDescriptor>) {
        let name = descriptor.name().to_string();
        if self.types.insert(name.clone(), descriptor).is_some() {
            log::warn!("catalog: replacing layout for '{}'", name);
        }
    }

    /// Look up a descriptor by structure name.
    pub fn get(&self, name: &str) -> Option<Arc<StructDescriptor>> {
        self.types.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered structure names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
