//! Host-style helper functions exposed to templates as globals.

use minijinja::value::{Value, ValueKind};
use minijinja::{Environment, Error, ErrorKind};
use std::cmp::Ordering;

/// Names registered by [`register`].
pub(crate) const NAMES: &[&str] = &["len", "str", "int", "abs", "min", "max", "sorted"];

pub(crate) fn register(env: &mut Environment<'static>) {
    env.add_function("len", len);
    env.add_function("str", to_str);
    env.add_function("int", to_int);
    env.add_function("abs", abs);
    env.add_function("min", min);
    env.add_function("max", max);
    env.add_function("sorted", sorted);
}

fn invalid(msg: String) -> Error {
    Error::new(ErrorKind::InvalidOperation, msg)
}

fn len(value: Value) -> Result<usize, Error> {
    value
        .len()
        .ok_or_else(|| invalid(format!("object of type {} has no len()", value.kind())))
}

fn to_str(value: Value) -> String {
    value.to_string()
}

fn to_int(value: Value) -> Result<i64, Error> {
    if let Some(s) = value.as_str() {
        return s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(format!("invalid literal for int(): '{}'", s)));
    }
    if value.is_integer() {
        return i64::try_from(value);
    }
    f64::try_from(value).map(|f| f.trunc() as i64)
}

fn abs(value: Value) -> Result<Value, Error> {
    if value.kind() != ValueKind::Number {
        return Err(invalid(format!("bad operand type for abs(): {}", value.kind())));
    }
    if value.is_integer() {
        let i = i64::try_from(value)?;
        return i
            .checked_abs()
            .map(Value::from)
            .ok_or_else(|| invalid("integer overflow in abs()".to_string()));
    }
    f64::try_from(value).map(|f| Value::from(f.abs()))
}

fn compare(a: &Value, b: &Value) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

fn min(items: Value) -> Result<Value, Error> {
    items
        .try_iter()?
        .min_by(compare)
        .ok_or_else(|| invalid("min() arg is an empty sequence".to_string()))
}

fn max(items: Value) -> Result<Value, Error> {
    items
        .try_iter()?
        .max_by(compare)
        .ok_or_else(|| invalid("max() arg is an empty sequence".to_string()))
}

fn sorted(items: Value) -> Result<Value, Error> {
    let mut values: Vec<Value> = items.try_iter()?.collect();
    values.sort_by(compare);
    Ok(Value::from(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str, ctx: Value) -> Result<String, Error> {
        let mut env = Environment::new();
        register(&mut env);
        env.render_str(source, ctx)
    }

    #[test]
    fn len_of_sequence_and_string() {
        let ctx = minijinja::context! { xs => vec![1, 2, 3], s => "abcd" };
        assert_eq!(render("{{ len(xs) }} {{ len(s) }}", ctx).unwrap(), "3 4");
    }

    #[test]
    fn len_of_number_fails() {
        assert!(render("{{ len(1) }}", minijinja::context! {}).is_err());
    }

    #[test]
    fn str_and_int_convert() {
        let out = render("{{ str(5) ~ '!' }} {{ int('42') + 1 }} {{ int(2.9) }}", minijinja::context! {});
        assert_eq!(out.unwrap(), "5! 43 2");
    }

    #[test]
    fn int_rejects_garbage() {
        assert!(render("{{ int('x') }}", minijinja::context! {}).is_err());
    }

    #[test]
    fn abs_min_max_sorted() {
        let ctx = minijinja::context! { xs => vec![3, -7, 5] };
        let out = render(
            "{{ abs(-4) }} {{ min(xs) }} {{ max(xs) }} {{ sorted(xs)|join(',') }}",
            ctx,
        );
        assert_eq!(out.unwrap(), "4 -7 5 -7,3,5");
    }

    #[test]
    fn min_of_empty_fails() {
        let ctx = minijinja::context! { xs => Vec::<i32>::new() };
        assert!(render("{{ min(xs) }}", ctx).is_err());
    }
}
