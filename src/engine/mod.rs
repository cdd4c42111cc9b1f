//! Narrow adapter over the template engine.
//!
//! Everything templatify needs from minijinja goes through this module:
//!
//! - [`Engine::compile`] parses source into a [`CompiledTemplate`]
//! - [`CompiledTemplate::free_variables`] lists the names a caller must bind
//! - [`CompiledTemplate::render`] renders against a set of bindings
//!
//! Engines are configured with auto-escaping disabled and semi-strict
//! undefined handling: printing or iterating a name that is not bound fails
//! the render instead of producing an empty string, while truthiness checks
//! such as `{% if user.nickname %}` and `is defined` tests treat it as false.

mod builtins;

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Global functions minijinja registers on every environment.
const ENGINE_GLOBALS: &[&str] = &["range", "dict", "debug", "namespace"];

/// Configured template environment that templates are compiled against.
#[derive(Debug, Clone)]
pub struct Engine {
    env: Environment<'static>,
    globals: BTreeSet<String>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with no extra globals.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::SemiStrict);

        Self {
            env,
            globals: ENGINE_GLOBALS.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Register the host-style helper functions (`len`, `str`, `int`, ...).
    pub fn with_builtins(mut self) -> Self {
        builtins::register(&mut self.env);
        self.globals
            .extend(builtins::NAMES.iter().map(|name| name.to_string()));
        self
    }

    /// Make `value` visible to every template as `name`.
    pub fn add_global(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        self.globals.insert(name.clone());
        self.env.add_global(name, value.into());
    }

    /// Register every entry of `globals`.
    pub fn with_globals(mut self, globals: &BTreeMap<String, Value>) -> Self {
        for (name, value) in globals {
            self.add_global(name.clone(), value.clone());
        }
        self
    }

    /// Parse `source` and return the compiled template.
    ///
    /// `name` only identifies the template in engine error messages.
    pub fn compile(&self, name: &str, source: &str) -> Result<CompiledTemplate, minijinja::Error> {
        let mut env = self.env.clone();
        env.add_template_owned(name.to_string(), source.to_string())?;

        let free_variables = env
            .get_template(name)?
            .undeclared_variables(false)
            .into_iter()
            .filter(|var| !self.globals.contains(var))
            .collect();

        Ok(CompiledTemplate {
            inner: Arc::new(Compiled {
                env,
                name: name.to_string(),
                free_variables,
            }),
        })
    }
}

#[derive(Debug)]
struct Compiled {
    env: Environment<'static>,
    name: String,
    free_variables: BTreeSet<String>,
}

/// An immutable, parsed template. Cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    inner: Arc<Compiled>,
}

impl CompiledTemplate {
    /// Top-level names the template reads that are not engine globals.
    pub fn free_variables(&self) -> &BTreeSet<String> {
        &self.inner.free_variables
    }

    /// Render the template against `bindings`.
    pub fn render(&self, bindings: &BTreeMap<String, Value>) -> Result<String, minijinja::Error> {
        self.inner.env.get_template(&self.inner.name)?.render(bindings)
    }
}
