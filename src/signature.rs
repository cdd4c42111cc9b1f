//! Function signature model.
//!
//! A [`Signature`] is the ordered parameter list of a template function.
//! Parameters may carry a default (a fixed value or a factory called on every
//! invocation) and may be marked as not accepted from callers (`init = false`),
//! in which case they are always bound from their default.

use crate::error::{Result, TemplatifyError};
use minijinja::Value;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Regex pattern for valid function and parameter names.
static IDENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid identifier regex"));

/// Whether `name` can name a function or parameter.
pub(crate) fn is_identifier(name: &str) -> bool {
    IDENT_REGEX.is_match(name)
}

/// Default value of a parameter.
#[derive(Clone)]
pub enum DefaultValue {
    /// A value shared by every call.
    Value(Value),
    /// A factory invoked once per call that needs the default.
    Factory(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    /// Produce the value to bind.
    pub fn resolve(&self) -> Value {
        match self {
            DefaultValue::Value(v) => v.clone(),
            DefaultValue::Factory(f) => f(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Value(v) => write!(f, "{:?}", v),
            DefaultValue::Factory(_) => f.write_str("<factory>"),
        }
    }
}

/// A single declared parameter.
#[derive(Debug, Clone)]
pub struct Param {
    name: String,
    default: Option<DefaultValue>,
    init: bool,
}

impl Param {
    /// A required parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            init: true,
        }
    }

    /// Give the parameter a fixed default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Value(value.into()));
        self
    }

    /// Give the parameter a default computed on each call.
    pub fn with_default_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::Factory(Arc::new(factory)));
        self
    }

    /// Stop accepting this parameter from callers; it is always bound from
    /// its default.
    pub fn without_init(mut self) -> Self {
        self.init = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// Whether callers may pass this parameter.
    pub fn is_init(&self) -> bool {
        self.init
    }

    /// Whether callers must pass this parameter.
    pub fn is_required(&self) -> bool {
        self.init && self.default.is_none()
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            Some(default) => write!(f, "{}={:?}", self.name, default),
            None => f.write_str(&self.name),
        }
    }
}

/// Ordered, validated parameter list.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    /// Validate `params` as the signature of `function`.
    ///
    /// Rules:
    /// - Names must be identifiers and unique
    /// - A required parameter may not follow one with a default
    /// - Parameters that callers cannot pass must have a default
    pub fn new(function: &str, params: Vec<Param>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut saw_default = false;

        for param in &params {
            if !is_identifier(&param.name) {
                return Err(TemplatifyError::Configuration(format!(
                    "'{}' has an invalid parameter name '{}'",
                    function, param.name
                )));
            }

            if !seen.insert(param.name.as_str()) {
                return Err(TemplatifyError::Configuration(format!(
                    "'{}' declares parameter '{}' more than once",
                    function, param.name
                )));
            }

            if !param.init {
                if param.default.is_none() {
                    return Err(TemplatifyError::Configuration(format!(
                        "'{}' parameter '{}' is not accepted from callers and needs a default",
                        function, param.name
                    )));
                }
                continue;
            }

            if param.default.is_some() {
                saw_default = true;
            } else if saw_default {
                return Err(TemplatifyError::Configuration(format!(
                    "'{}' parameter '{}' without a default follows a parameter with a default",
                    function, param.name
                )));
            }
        }

        Ok(Self { params })
    }

    /// All parameters, in declaration order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Parameters callers may pass, in positional order.
    pub fn init_params(&self) -> impl Iterator<Item = &Param> {
        self.params.iter().filter(|p| p.init)
    }

    pub fn get(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Renders the caller-facing parameter list, e.g. `(name, age=10)`.
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.init_params().map(ToString::to_string).collect();
        write!(f, "({})", params.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(params: Vec<Param>) -> Result<Signature> {
        Signature::new("f", params)
    }

    #[test]
    fn accepts_required_then_default() {
        let s = sig(vec![Param::new("name"), Param::new("age").with_default(10)]).unwrap();
        assert_eq!(s.len(), 2);
        assert!(s.get("name").unwrap().is_required());
        assert!(!s.get("age").unwrap().is_required());
        assert_eq!(s.to_string(), "(name, age=10)");
    }

    #[test]
    fn empty_signature() {
        let s = sig(vec![]).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.to_string(), "()");
    }

    #[test]
    fn rejects_invalid_name() {
        for bad in ["", "1x", "a-b", "a b"] {
            let err = sig(vec![Param::new(bad)]).unwrap_err();
            assert!(matches!(err, TemplatifyError::Configuration(_)), "{bad}");
        }
    }

    #[test]
    fn rejects_duplicate_name() {
        let err = sig(vec![Param::new("x"), Param::new("x")]).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn rejects_required_after_default() {
        let err = sig(vec![Param::new("a").with_default(1), Param::new("b")]).unwrap_err();
        assert!(err.to_string().contains("'b' without a default"));
    }

    #[test]
    fn non_init_param_needs_default() {
        let err = sig(vec![Param::new("a").without_init()]).unwrap_err();
        assert!(matches!(err, TemplatifyError::Configuration(_)));
    }

    #[test]
    fn non_init_param_may_precede_required() {
        let s = sig(vec![
            Param::new("stamp").with_default("x").without_init(),
            Param::new("name"),
        ])
        .unwrap();
        assert_eq!(s.init_params().count(), 1);
        assert_eq!(s.to_string(), "(name)");
    }

    #[test]
    fn factory_default_is_called_each_time() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let counter = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&counter);
        let p = Param::new("n")
            .with_default_factory(move || Value::from(c.fetch_add(1, Ordering::SeqCst)));
        let default = p.default().unwrap();
        assert_eq!(default.resolve(), Value::from(0));
        assert_eq!(default.resolve(), Value::from(1));
        assert_eq!(p.to_string(), "n=<factory>");
    }

    #[test]
    fn string_default_displays_quoted() {
        let p = Param::new("greeting").with_default("hi");
        assert_eq!(p.to_string(), "greeting=\"hi\"");
    }
}
