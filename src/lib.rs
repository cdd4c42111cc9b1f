//! Templatify: turn documented function definitions into validated,
//! precompiled string templates.
//!
//! A template function is declared with a name, a parameter list and a
//! docstring. Decorating it normalizes the docstring, compiles it, and checks
//! that every variable the template reads is a parameter. All of that happens
//! once, when the function is defined; calls only bind arguments and render.
//!
//! - [`template`] / [`TemplateDecorator`]: builder front end
//! - [`template_fn!`]: doc-comment front end
//! - [`TemplateRegistry`]: many definitions from a YAML file, validated at startup

pub mod arguments;
pub mod dedent;
pub mod decorator;
pub mod definitions;
pub mod engine;
pub mod error;
pub mod exit_codes;
mod macros;
pub mod registry;
pub mod signature;

pub use arguments::{Arguments, Bindings};
pub use dedent::{dedent, normalize_docstring};
pub use decorator::{FunctionDef, TemplateDecorator, TemplateFn, template};
pub use definitions::Definitions;
pub use error::{Result, TemplatifyError};
pub use minijinja::Value;
pub use registry::TemplateRegistry;
pub use signature::{DefaultValue, Param, Signature};
