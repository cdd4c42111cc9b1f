//! Validated collection of template functions.
//!
//! A registry is the startup-time counterpart of decorating functions one by
//! one: building it decorates every definition and fails on the first one
//! that is invalid, naming it.

use crate::arguments::Arguments;
use crate::decorator::{TemplateDecorator, TemplateFn};
use crate::definitions::Definitions;
use crate::error::{Result, TemplatifyError};
use std::collections::BTreeMap;
use std::path::Path;

/// Template functions keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    functions: BTreeMap<String, TemplateFn>,
}

impl TemplateRegistry {
    /// Load a definitions file and decorate everything in it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let definitions = Definitions::load(path)?;
        let registry = Self::from_definitions(&definitions)?;
        tracing::info!(
            path = %path.display(),
            functions = registry.len(),
            "loaded template definitions"
        );
        Ok(registry)
    }

    /// Decorate every function in `definitions`.
    pub fn from_definitions(definitions: &Definitions) -> Result<Self> {
        let decorator = TemplateDecorator::with_options(
            &definitions.global_values(),
            definitions.include_builtins,
        );

        let mut registry = Self::default();
        for (name, spec) in &definitions.functions {
            let function = decorator.decorate(spec.to_function_def(name))?;
            registry.insert(function);
        }
        Ok(registry)
    }

    /// Add an already-decorated function, replacing one with the same name.
    pub fn insert(&mut self, function: TemplateFn) -> Option<TemplateFn> {
        self.functions.insert(function.name().to_string(), function)
    }

    pub fn get(&self, name: &str) -> Option<&TemplateFn> {
        self.functions.get(name)
    }

    /// Look up `name`, failing with a user error listing what exists.
    pub fn require(&self, name: &str) -> Result<&TemplateFn> {
        self.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.names().collect();
            TemplatifyError::Argument(format!(
                "unknown template function '{}' (available: {})",
                name,
                if known.is_empty() {
                    "none".to_string()
                } else {
                    known.join(", ")
                }
            ))
        })
    }

    /// Call the function called `name`.
    pub fn call(&self, name: &str, args: impl Into<Arguments>) -> Result<String> {
        self.require(name)?.call(args)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateFn> {
        self.functions.values()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
