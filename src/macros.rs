//! `template_fn!`: declare a template function with doc comments.

/// Declare a template function from its doc comments and parameter list.
///
/// Expands to a [`FunctionDef`](crate::FunctionDef) decorated with the
/// default decorator (or the one given after `using`), evaluating to
/// `Result<TemplateFn>`. Doc comment lines are joined with `\n` and then
/// normalized like any other docstring, so the single space `///` leaves at
/// the start of each line is removed.
///
/// ```
/// use templatify::{Arguments, template_fn};
///
/// let greet_user = template_fn! {
///     /// Hello, {{ name|upper }}! You are {{ age }} years old.
///     fn greet_user(name, age = 10)
/// }
/// .unwrap();
///
/// assert_eq!(
///     greet_user.call(Arguments::new().arg("John")).unwrap(),
///     "Hello, JOHN! You are 10 years old."
/// );
/// ```
///
/// A function without doc comments fails with a configuration error:
///
/// ```
/// use templatify::template_fn;
///
/// assert!(template_fn! { fn undocumented(x) }.is_err());
/// ```
#[macro_export]
macro_rules! template_fn {
    (
        using $decorator:expr;
        $(#[doc = $doc:literal])*
        fn $name:ident ( $($param:ident $(= $default:expr)?),* $(,)? )
    ) => {{
        let lines: &[&str] = &[$($doc),*];
        let def = $crate::FunctionDef::new(stringify!($name))
            $(.param($crate::Param::new(stringify!($param)) $(.with_default($default))?))*
            .maybe_doc(if lines.is_empty() { None } else { Some(lines.join("\n")) });
        ($decorator).decorate(def)
    }};
    (
        $(#[doc = $doc:literal])*
        fn $name:ident ( $($param:ident $(= $default:expr)?),* $(,)? )
    ) => {
        $crate::template_fn! {
            using $crate::TemplateDecorator::new();
            $(#[doc = $doc])*
            fn $name ( $($param $(= $default)?),* )
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Arguments, TemplateDecorator, TemplatifyError};

    #[test]
    fn multi_line_doc_comments_are_dedented() {
        let f = template_fn! {
            /// Dear {{ name }},
            ///
            ///   see you at {{ place }}.
            fn invite(name, place = "home")
        }
        .unwrap();
        assert_eq!(f.doc(), "Dear {{ name }},\n\n  see you at {{ place }}.");
        assert_eq!(
            f.call(Arguments::new().arg("Kim")).unwrap(),
            "Dear Kim,\n\n  see you at home."
        );
    }

    #[test]
    fn doc_attribute_with_leading_newline() {
        let f = template_fn! {
            #[doc = "
                {{ a }} + {{ b }}
            "]
            fn add(a, b)
        }
        .unwrap();
        assert_eq!(f.call(Arguments::new().arg(1).arg(2)).unwrap(), "1 + 2");
    }

    #[test]
    fn unknown_variable_is_rejected() {
        let err = template_fn! {
            /// Hello, {{ name|upper }}! You are {{ ageeee }} years old.
            fn greet_user(name, age = 10)
        }
        .unwrap_err();
        assert!(matches!(err, TemplatifyError::TemplateValidation { .. }));
    }

    #[test]
    fn missing_doc_is_rejected() {
        let err = template_fn! { fn nothing() }.unwrap_err();
        assert!(matches!(err, TemplatifyError::Configuration(_)));
    }

    #[test]
    fn custom_decorator() {
        let decorator = TemplateDecorator::new().global("site", "example.org");
        let f = template_fn! {
            using &decorator;
            /// {{ user }}@{{ site }}
            fn address(user,)
        }
        .unwrap();
        assert_eq!(f.call(Arguments::new().arg("root")).unwrap(), "root@example.org");
    }
}
