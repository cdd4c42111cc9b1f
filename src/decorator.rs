//! The template decorator.
//!
//! A [`FunctionDef`] names a function, lists its parameters and carries its
//! docstring. [`TemplateDecorator::decorate`] runs the whole pipeline once:
//!
//! 1. Reject a definition without a docstring
//! 2. Normalize the docstring (leading newline + dedent)
//! 3. Compile it through the engine
//! 4. Check every free variable of the template is a parameter (or global)
//! 5. Return a [`TemplateFn`] that binds arguments and renders
//!
//! Every definition error surfaces here, never on a later call.
//!
//! ```
//! use templatify::{Arguments, FunctionDef, Param, template};
//!
//! let greet_user = template(
//!     FunctionDef::new("greet_user")
//!         .param(Param::new("name"))
//!         .param(Param::new("age").with_default(10))
//!         .doc("Hello, {{ name|upper }}! You are {{ age }} years old."),
//! )
//! .unwrap();
//!
//! let out = greet_user.call(Arguments::new().arg("John")).unwrap();
//! assert_eq!(out, "Hello, JOHN! You are 10 years old.");
//! ```

use crate::arguments::{self, Arguments, Bindings};
use crate::dedent::normalize_docstring;
use crate::engine::{CompiledTemplate, Engine};
use crate::error::{Result, TemplatifyError};
use crate::signature::{Param, Signature, is_identifier};
use minijinja::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// An undecorated function definition: a name, parameters and a docstring.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    name: String,
    params: Vec<Param>,
    doc: Option<String>,
}

impl FunctionDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            doc: None,
        }
    }

    /// Append a parameter.
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Append several parameters.
    pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    /// Attach the docstring.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Attach the docstring if there is one.
    pub fn maybe_doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Decorator configuration: the globals and helpers every template sees.
#[derive(Debug, Clone)]
pub struct TemplateDecorator {
    engine: Engine,
}

impl Default for TemplateDecorator {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateDecorator {
    /// A decorator with the builtin helpers and no extra globals.
    pub fn new() -> Self {
        Self::with_options(&BTreeMap::new(), true)
    }

    /// A decorator with `globals` visible to every template.
    ///
    /// When `include_builtins` is set the helper functions are registered
    /// first, so an entry of `globals` with the same name replaces them.
    pub fn with_options(globals: &BTreeMap<String, Value>, include_builtins: bool) -> Self {
        let engine = if include_builtins {
            Engine::new().with_builtins()
        } else {
            Engine::new()
        };
        Self::from_engine(engine.with_globals(globals))
    }

    /// Use a pre-configured engine.
    pub fn from_engine(engine: Engine) -> Self {
        Self { engine }
    }

    /// Add one global.
    pub fn global(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.engine.add_global(name, value);
        self
    }

    /// Turn `func` into a validated template function.
    pub fn decorate(&self, func: FunctionDef) -> Result<TemplateFn> {
        let FunctionDef { name, params, doc } = func;

        if !is_identifier(&name) {
            return Err(TemplatifyError::Configuration(format!(
                "'{}' is not a valid template function name",
                name
            )));
        }

        let Some(raw_doc) = doc else {
            return Err(TemplatifyError::Configuration(format!(
                "template '{}' must have a docstring",
                name
            )));
        };
        let source = normalize_docstring(&raw_doc);

        let template = self
            .engine
            .compile(&name, &source)
            .map_err(|source| TemplatifyError::TemplateSyntax {
                function: name.clone(),
                source,
            })?;

        let signature = Signature::new(&name, params)?;

        let unknown: Vec<String> = template
            .free_variables()
            .iter()
            .filter(|var| !signature.contains(var))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(TemplatifyError::TemplateValidation {
                function: name,
                variables: unknown,
            });
        }

        tracing::debug!(
            function = %name,
            signature = %signature,
            variables = template.free_variables().len(),
            "decorated template function"
        );

        Ok(TemplateFn {
            inner: Arc::new(Inner {
                name,
                signature,
                doc: source,
                template,
            }),
        })
    }
}

/// Decorate `func` with the default decorator.
pub fn template(func: FunctionDef) -> Result<TemplateFn> {
    TemplateDecorator::new().decorate(func)
}

#[derive(Debug)]
struct Inner {
    name: String,
    signature: Signature,
    doc: String,
    template: CompiledTemplate,
}

/// A decorated template function.
///
/// Immutable; clones share the compiled template.
#[derive(Debug, Clone)]
pub struct TemplateFn {
    inner: Arc<Inner>,
}

impl TemplateFn {
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn signature(&self) -> &Signature {
        &self.inner.signature
    }

    /// The normalized template source.
    pub fn doc(&self) -> &str {
        &self.inner.doc
    }

    pub fn template(&self) -> &CompiledTemplate {
        &self.inner.template
    }

    /// Bind `args` to the signature and render.
    pub fn call(&self, args: impl Into<Arguments>) -> Result<String> {
        let bindings = arguments::bind(&self.inner.name, &self.inner.signature, args.into())?;
        self.render(&bindings)
    }

    /// Render against already-bound values.
    pub fn render(&self, bindings: &Bindings) -> Result<String> {
        self.inner
            .template
            .render(bindings)
            .map_err(|source| TemplatifyError::Render {
                function: self.inner.name.clone(),
                source,
            })
    }
}

/// `name(param, param=default)`
impl fmt::Display for TemplateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.inner.name, self.inner.signature)
    }
}
