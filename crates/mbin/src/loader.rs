// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! YAML layout loader.
//!
//! Lets layout tables live next to the assets instead of in code, with
//! the same shape the builder API produces.
//!
//! # Example YAML
//!
//! ```yaml
//! # layouts.yaml
//! structs:
//!   - name: TkJointBinding
//!     fields:
//!       - name: Joint
//!         kind: string
//!         width: 16
//!       - name: Weight
//!         kind: float
//!         default: 1.0
//!
//!   - name: TkJointEntry
//!     fields:
//!       - name: Active
//!         kind: bool
//!       - name: Binding
//!         kind: struct
//!         struct: TkJointBinding
//! ```
//!
//! Entries are processed in document order; a `struct` field must refer
//! to an earlier entry or to a layout already present in the catalog
//! being extended.

use crate::builder::StructDescriptorBuilder;
use crate::catalog::Catalog;
use crate::descriptor::{FieldKind, FieldSpec};
use crate::value::FieldValue;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// YAML layout table loader.
pub struct LayoutLoader;

/// Root YAML document structure.
#[derive(Debug, Deserialize)]
pub struct YamlLayoutDocument {
    /// Struct layouts, in definition order.
    #[serde(default)]
    pub structs: Vec<YamlStructLayout>,
}

/// A single struct layout in YAML format.
#[derive(Debug, Deserialize)]
pub struct YamlStructLayout {
    /// Structure name.
    pub name: String,
    /// Ordered field list.
    #[serde(default)]
    pub fields: Vec<YamlFieldLayout>,
}

/// A single field in YAML format.
#[derive(Debug, Deserialize)]
pub struct YamlFieldLayout {
    /// Field name.
    pub name: String,
    /// bool | int | float | string | struct
    pub kind: String,
    /// Byte width (string fields only).
    #[serde(default)]
    pub width: Option<usize>,
    /// Referenced layout name (struct fields only).
    #[serde(default, rename = "struct")]
    pub struct_name: Option<String>,
    /// Default value (scalar and string fields).
    #[serde(default)]
    pub default: Option<YamlDefault>,
}

/// Default value in YAML format.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum YamlDefault {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl LayoutLoader {
    /// Load layouts from a YAML file into a fresh catalog.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Catalog, String> {
        let yaml_content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read YAML file: {}", e))?;
        Self::parse_yaml(&yaml_content)
    }

    /// Parse YAML content into a fresh catalog.
    pub fn parse_yaml(yaml_content: &str) -> Result<Catalog, String> {
        let mut catalog = Catalog::new();
        Self::parse_yaml_into(yaml_content, &mut catalog)?;
        Ok(catalog)
    }

    /// Parse YAML content, resolving struct references against (and
    /// registering into) an existing catalog.
    pub fn parse_yaml_into(yaml_content: &str, catalog: &mut Catalog) -> Result<(), String> {
        let doc: YamlLayoutDocument =
            serde_yaml::from_str(yaml_content).map_err(|e| format!("Failed to parse YAML: {}", e))?;

        for layout in &doc.structs {
            let mut builder = StructDescriptorBuilder::new(&layout.name);
            for field in &layout.fields {
                let FieldSpec { name, kind, default } = Self::field_spec(&layout.name, field, catalog)?;
                builder = builder.field_with_default(name, kind, default);
            }
            catalog.register(Arc::new(builder.build()));
        }
        log::debug!("loaded {} struct layout(s) from YAML", doc.structs.len());
        Ok(())
    }

    fn field_spec(
        struct_name: &str,
        field: &YamlFieldLayout,
        catalog: &Catalog,
    ) -> Result<FieldSpec, String> {
        let kind = match field.kind.to_lowercase().as_str() {
            "bool" => FieldKind::Bool,
            "int" => FieldKind::Int,
            "float" => FieldKind::Float,
            "string" => {
                let width = field.width.ok_or_else(|| {
                    format!(
                        "Field '{}.{}': string fields require a width",
                        struct_name, field.name
                    )
                })?;
                FieldKind::String { width }
            }
            "struct" => {
                let target = field.struct_name.as_deref().ok_or_else(|| {
                    format!(
                        "Field '{}.{}': struct fields require a 'struct' reference",
                        struct_name, field.name
                    )
                })?;
                let nested = catalog.get(target).ok_or_else(|| {
                    format!(
                        "Field '{}.{}': unknown struct '{}' (layouts must be defined before use)",
                        struct_name, field.name, target
                    )
                })?;
                FieldKind::Struct(nested)
            }
            other => {
                return Err(format!(
                    "Field '{}.{}': invalid kind '{}'",
                    struct_name, field.name, other
                ))
            }
        };

        let mut spec = FieldSpec::new(&field.name, kind);
        if let Some(default) = &field.default {
            let value = Self::default_value(struct_name, field, &spec, default)?;
            spec = spec.with_default(value);
        }
        Ok(spec)
    }

    fn default_value(
        struct_name: &str,
        field: &YamlFieldLayout,
        spec: &FieldSpec,
        default: &YamlDefault,
    ) -> Result<FieldValue, String> {
        match (&spec.kind, default) {
            (FieldKind::Bool, YamlDefault::Bool(v)) => Ok(FieldValue::Bool(*v)),
            (FieldKind::Int, YamlDefault::Int(v)) => {
                let v = i32::try_from(*v).map_err(|_| {
                    format!(
                        "Field '{}.{}': default {} out of i32 range",
                        struct_name, field.name, v
                    )
                })?;
                Ok(FieldValue::Int(v))
            }
            // YAML `1` under a float field arrives as Int.
            (FieldKind::Float, YamlDefault::Float(v)) => Ok(FieldValue::Float(*v as f32)),
            (FieldKind::Float, YamlDefault::Int(v)) => Ok(FieldValue::Float(*v as f32)),
            (FieldKind::String { .. }, YamlDefault::Text(v)) => Ok(FieldValue::Str(v.clone())),
            (kind, _) => Err(format!(
                "Field '{}.{}': default does not match kind '{}'",
                struct_name,
                field.name,
                kind.name()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    #[test]
    fn test_parse_minimal_yaml() {
        let yaml = r#"
structs:
  - name: TkAnimNodeData
    fields:
      - name: Node
        kind: string
        width: 16
      - name: CanCompress
        kind: bool
      - name: RotIndex
        kind: int
"#;

        let catalog = LayoutLoader::parse_yaml(yaml).expect("valid YAML should parse");
        let desc = catalog.get("TkAnimNodeData").expect("layout registered");
        assert_eq!(desc.fields().len(), 3);
        assert_eq!(desc.encoded_size(), 16 + 1 + 4);
    }

    #[test]
    fn test_defaults_and_kinds() {
        let yaml = r#"
structs:
  - name: TkTransformData
    fields:
      - name: TransX
        kind: float
      - name: ScaleX
        kind: float
        default: 1.0
      - name: Tag
        kind: string
        width: 8
        default: LOCAL
"#;

        let catalog = LayoutLoader::parse_yaml(yaml).expect("parse");
        let desc = catalog.get("TkTransformData").expect("layout");
        let record = Record::new(&desc);
        assert_eq!(record.get("TransX").and_then(|v| v.as_float()), Some(0.0));
        assert_eq!(record.get("ScaleX").and_then(|v| v.as_float()), Some(1.0));
        assert_eq!(record.get("Tag").and_then(|v| v.as_str()), Some("LOCAL"));
    }

    #[test]
    fn test_nested_reference_in_order() {
        let yaml = r#"
structs:
  - name: TkJointBinding
    fields:
      - name: Joint
        kind: string
        width: 16
  - name: TkJointEntry
    fields:
      - name: Binding
        kind: struct
        struct: TkJointBinding
"#;

        let catalog = LayoutLoader::parse_yaml(yaml).expect("parse");
        let desc = catalog.get("TkJointEntry").expect("layout");
        assert_eq!(desc.encoded_size(), 16);
    }

    #[test]
    fn test_forward_reference_fails() {
        let yaml = r#"
structs:
  - name: TkJointEntry
    fields:
      - name: Binding
        kind: struct
        struct: TkJointBinding
  - name: TkJointBinding
    fields: []
"#;

        let result = LayoutLoader::parse_yaml(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("defined before use"));
    }

    #[test]
    fn test_reference_against_existing_catalog() {
        let yaml = r#"
structs:
  - name: TkPivotData
    fields:
      - name: Pivot
        kind: struct
        struct: TkTransformData
"#;

        let mut catalog = Catalog::builtin();
        LayoutLoader::parse_yaml_into(yaml, &mut catalog).expect("parse");
        let desc = catalog.get("TkPivotData").expect("layout");
        assert_eq!(desc.encoded_size(), 9 * 4);
    }

    #[test]
    fn test_missing_width_fails() {
        let yaml = r#"
structs:
  - name: Bad
    fields:
      - name: Name
        kind: string
"#;

        let result = LayoutLoader::parse_yaml(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("require a width"));
    }

    #[test]
    fn test_invalid_kind_fails() {
        let yaml = r#"
structs:
  - name: Bad
    fields:
      - name: Items
        kind: list
"#;

        let result = LayoutLoader::parse_yaml(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("invalid kind"));
    }

    #[test]
    fn test_mismatched_default_fails() {
        let yaml = r#"
structs:
  - name: Bad
    fields:
      - name: Flag
        kind: bool
        default: yes please
"#;

        let result = LayoutLoader::parse_yaml(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("does not match kind"));
    }
}
