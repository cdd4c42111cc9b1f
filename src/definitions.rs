//! Template definitions file.
//!
//! Applications that keep their templates outside code declare them in a
//! YAML file and build a [`TemplateRegistry`](crate::TemplateRegistry) from
//! it at startup, so every definition is validated before first use.
//!
//! # File Format
//!
//! ```yaml
//! include_builtins: true
//! globals:
//!   company: Acme
//!
//! functions:
//!   greet_user:
//!     params:
//!       - name
//!       - { name: age, default: 10 }
//!       - { name: footer, default: "bye", init: false }
//!     doc: |
//!       Hello, {{ name|upper }}! You are {{ age }} years old.
//! ```
//!
//! Unknown fields are ignored for forward compatibility.

use crate::decorator::FunctionDef;
use crate::error::{Result, TemplatifyError};
use crate::signature::Param;
use minijinja::Value;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Contents of a definitions file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Definitions {
    /// Register the host-style helper functions for every template.
    #[serde(default = "default_include_builtins")]
    pub include_builtins: bool,

    /// Values visible to every template.
    pub globals: BTreeMap<String, serde_yaml::Value>,

    /// Template functions keyed by name.
    pub functions: BTreeMap<String, FunctionSpec>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for Definitions {
    fn default() -> Self {
        Self {
            include_builtins: default_include_builtins(),
            globals: BTreeMap::new(),
            functions: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }
}

fn default_include_builtins() -> bool {
    true
}

/// One template function.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Parameters in declaration order.
    #[serde(default)]
    pub params: Vec<ParamSpec>,

    /// Template source. A function without one fails to load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A parameter, either a bare name or a detailed mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamSpec {
    Name(String),
    Detailed {
        name: String,
        /// `default: null` is a real default; an absent key means required.
        #[serde(
            default,
            deserialize_with = "present",
            skip_serializing_if = "Option::is_none"
        )]
        default: Option<serde_yaml::Value>,
        #[serde(default = "default_init")]
        init: bool,
    },
}

fn default_init() -> bool {
    true
}

/// Distinguishes a present `null` from an absent key.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<serde_yaml::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_yaml::Value::deserialize(deserializer).map(Some)
}

impl ParamSpec {
    pub fn name(&self) -> &str {
        match self {
            ParamSpec::Name(name) => name,
            ParamSpec::Detailed { name, .. } => name,
        }
    }

    fn to_param(&self) -> Param {
        match self {
            ParamSpec::Name(name) => Param::new(name.clone()),
            ParamSpec::Detailed {
                name,
                default,
                init,
            } => {
                let mut param = Param::new(name.clone());
                if let Some(default) = default {
                    param = param.with_default(Value::from_serialize(default));
                }
                if !init {
                    param = param.without_init();
                }
                param
            }
        }
    }
}

impl FunctionSpec {
    /// The undecorated definition for the function called `name`.
    pub fn to_function_def(&self, name: &str) -> FunctionDef {
        FunctionDef::new(name)
            .params(self.params.iter().map(ParamSpec::to_param))
            .maybe_doc(self.doc.clone())
    }
}

impl Definitions {
    /// Load definitions from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TemplatifyError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse definitions from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document is an empty definitions set.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let definitions: Definitions = serde_yaml::from_str(yaml).map_err(|e| {
            TemplatifyError::Configuration(format!("failed to parse definitions: {}", e))
        })?;

        definitions.validate()?;
        Ok(definitions)
    }

    /// Serialize definitions to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            TemplatifyError::Configuration(format!("failed to serialize definitions: {}", e))
        })
    }

    /// Validate the file-level structure.
    ///
    /// Signatures and templates are checked when the functions are decorated.
    pub fn validate(&self) -> Result<()> {
        for name in self.functions.keys() {
            if name.is_empty() {
                return Err(TemplatifyError::Configuration(
                    "definitions validation failed: function name cannot be empty".to_string(),
                ));
            }
        }

        for name in self.globals.keys() {
            if name.is_empty() {
                return Err(TemplatifyError::Configuration(
                    "definitions validation failed: global name cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Globals converted to template values.
    pub fn global_values(&self) -> BTreeMap<String, Value> {
        self.globals
            .iter()
            .map(|(name, value)| (name.clone(), Value::from_serialize(value)))
            .collect()
    }
}
