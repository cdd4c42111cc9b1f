//! Call-time arguments and binding.
//!
//! [`Arguments`] collects positional and keyword values for a call.
//! [`bind`] maps them onto a [`Signature`] the way a host-language call
//! would: positionals fill caller-facing parameters in order, keywords bind
//! by name, and anything left unbound falls back to its default.

use crate::error::{Result, TemplatifyError};
use crate::signature::Signature;
use minijinja::Value;
use minijinja::value::ValueKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// Name to value mapping handed to the template.
pub type Bindings = BTreeMap<String, Value>;

/// Positional and keyword arguments for one call.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    positional: Vec<Value>,
    keywords: BTreeMap<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument, replacing an earlier one with the same name.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.insert(name.into(), value.into());
        self
    }

    /// Build keyword arguments from the fields of a serializable struct or map.
    ///
    /// ```
    /// use serde::Serialize;
    /// use templatify::Arguments;
    ///
    /// #[derive(Serialize)]
    /// struct Greeting { name: &'static str, age: u32 }
    ///
    /// let args = Arguments::from_serialize(&Greeting { name: "John", age: 3 }).unwrap();
    /// assert_eq!(args.keywords().len(), 2);
    /// ```
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        let value = Value::from_serialize(value);
        if value.kind() != ValueKind::Map {
            return Err(TemplatifyError::Argument(format!(
                "keyword arguments must serialize to a map, got {}",
                value.kind()
            )));
        }

        let keys = value
            .try_iter()
            .map_err(|e| TemplatifyError::Argument(format!("cannot read keyword arguments: {}", e)))?;

        let mut args = Self::new();
        for key in keys {
            let Some(name) = key.as_str() else {
                return Err(TemplatifyError::Argument(format!(
                    "keyword argument names must be strings, got {}",
                    key.kind()
                )));
            };
            let item = value.get_item(&key).map_err(|e| {
                TemplatifyError::Argument(format!("cannot read keyword argument '{}': {}", name, e))
            })?;
            args.keywords.insert(name.to_string(), item);
        }
        Ok(args)
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn keywords(&self) -> &BTreeMap<String, Value> {
        &self.keywords
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(positional: Vec<Value>) -> Self {
        Self {
            positional,
            keywords: BTreeMap::new(),
        }
    }
}

impl<const N: usize> From<[Value; N]> for Arguments {
    fn from(positional: [Value; N]) -> Self {
        Vec::from(positional).into()
    }
}

impl From<BTreeMap<String, Value>> for Arguments {
    fn from(keywords: BTreeMap<String, Value>) -> Self {
        Self {
            positional: Vec::new(),
            keywords,
        }
    }
}

/// Bind `args` to the parameters of `function`.
pub fn bind(function: &str, signature: &Signature, args: Arguments) -> Result<Bindings> {
    let Arguments {
        positional,
        mut keywords,
    } = args;

    let accepted = signature.init_params().count();
    if positional.len() > accepted {
        return Err(TemplatifyError::Argument(format!(
            "{}() takes {} positional argument{} but {} were given",
            function,
            accepted,
            if accepted == 1 { "" } else { "s" },
            positional.len()
        )));
    }

    let mut bindings = Bindings::new();
    for (param, value) in signature.init_params().zip(positional) {
        bindings.insert(param.name().to_string(), value);
    }

    let mut missing = Vec::new();
    for param in signature.params() {
        let name = param.name();
        let keyword = keywords.remove(name);

        if !param.is_init() {
            if keyword.is_some() {
                return Err(TemplatifyError::Argument(format!(
                    "{}() got an unexpected keyword argument '{}'",
                    function, name
                )));
            }
        } else if let Some(value) = keyword {
            if bindings.contains_key(name) {
                return Err(TemplatifyError::Argument(format!(
                    "{}() got multiple values for argument '{}'",
                    function, name
                )));
            }
            bindings.insert(name.to_string(), value);
            continue;
        } else if bindings.contains_key(name) {
            continue;
        }

        match param.default() {
            Some(default) => {
                bindings.insert(name.to_string(), default.resolve());
            }
            None => missing.push(name),
        }
    }

    if let Some(unexpected) = keywords.keys().next() {
        return Err(TemplatifyError::Argument(format!(
            "{}() got an unexpected keyword argument '{}'",
            function, unexpected
        )));
    }

    if !missing.is_empty() {
        let quoted: Vec<String> = missing.iter().map(|n| format!("'{}'", n)).collect();
        return Err(TemplatifyError::Argument(format!(
            "{}() missing {} required argument{}: {}",
            function,
            missing.len(),
            if missing.len() == 1 { "" } else { "s" },
            quoted.join(", ")
        )));
    }

    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::Param;

    fn greet_signature() -> Signature {
        Signature::new(
            "greet",
            vec![Param::new("name"), Param::new("age").with_default(10)],
        )
        .unwrap()
    }

    #[test]
    fn positional_with_default() {
        let b = bind("greet", &greet_signature(), Arguments::new().arg("John")).unwrap();
        assert_eq!(b["name"], Value::from("John"));
        assert_eq!(b["age"], Value::from(10));
    }

    #[test]
    fn keyword_overrides_default() {
        let args = Arguments::new().arg("John").kwarg("age", 42);
        let b = bind("greet", &greet_signature(), args).unwrap();
        assert_eq!(b["age"], Value::from(42));
    }

    #[test]
    fn all_keywords() {
        let args = Arguments::new().kwarg("age", 1).kwarg("name", "Ann");
        let b = bind("greet", &greet_signature(), args).unwrap();
        assert_eq!(b.len(), 2);
        assert_eq!(b["name"], Value::from("Ann"));
    }

    #[test]
    fn too_many_positionals() {
        let args = Arguments::from([Value::from("a"), Value::from(1), Value::from(2)]);
        let err = bind("greet", &greet_signature(), args).unwrap_err();
        assert_eq!(
            err.to_string(),
            "greet() takes 2 positional arguments but 3 were given"
        );
    }

    #[test]
    fn missing_required() {
        let err = bind("greet", &greet_signature(), Arguments::new()).unwrap_err();
        assert_eq!(err.to_string(), "greet() missing 1 required argument: 'name'");
    }

    #[test]
    fn duplicate_value() {
        let args = Arguments::new().arg("John").kwarg("name", "Jane");
        let err = bind("greet", &greet_signature(), args).unwrap_err();
        assert_eq!(
            err.to_string(),
            "greet() got multiple values for argument 'name'"
        );
    }

    #[test]
    fn unknown_keyword() {
        let args = Arguments::new().arg("John").kwarg("nickname", "J");
        let err = bind("greet", &greet_signature(), args).unwrap_err();
        assert_eq!(
            err.to_string(),
            "greet() got an unexpected keyword argument 'nickname'"
        );
    }

    #[test]
    fn non_init_param_is_bound_from_default_and_not_accepted() {
        let sig = Signature::new(
            "greet",
            vec![
                Param::new("name"),
                Param::new("age").with_default(10).without_init(),
            ],
        )
        .unwrap();

        let b = bind("greet", &sig, Arguments::new().arg("John")).unwrap();
        assert_eq!(b["age"], Value::from(10));

        let err = bind("greet", &sig, Arguments::new().arg("John").arg(11)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "greet() takes 1 positional argument but 2 were given"
        );

        let err = bind("greet", &sig, Arguments::new().arg("John").kwarg("age", 11)).unwrap_err();
        assert!(err.to_string().contains("unexpected keyword argument 'age'"));
    }

    #[test]
    fn from_serialize_struct() {
        #[derive(Serialize)]
        struct Greeting {
            name: String,
            age: u32,
        }

        let args = Arguments::from_serialize(&Greeting {
            name: "Ann".to_string(),
            age: 7,
        })
        .unwrap();
        let b = bind("greet", &greet_signature(), args).unwrap();
        assert_eq!(b["name"], Value::from("Ann"));
        assert_eq!(b["age"], Value::from(7));
    }

    #[test]
    fn from_serialize_rejects_non_map() {
        let err = Arguments::from_serialize(&vec![1, 2]).unwrap_err();
        assert!(matches!(err, TemplatifyError::Argument(_)));
    }
}
