//! Named placeholder substitution for `format_context`

use crate::context::Context;
use crate::error::BindError;

/// Substitute every `{key}` in `template` from `ctx`
///
/// `{{` and `}}` are literal braces. A dotted key (`{user.name}`) walks nested
/// maps. Unknown keys fail with [`BindError::MissingKey`]; placeholders whose
/// value is a list, map or node fail with [`BindError::NotRenderable`].
pub fn interpolate(template: &str, ctx: &Context) -> Result<String, BindError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut key = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') => {
                            return Err(BindError::malformed(template, "nested '{' in placeholder"))
                        }
                        Some(c) => key.push(c),
                        None => return Err(BindError::malformed(template, "unclosed '{'")),
                    }
                }
                let key = key.trim();
                if key.is_empty() {
                    return Err(BindError::malformed(template, "empty placeholder"));
                }
                let path: Vec<&str> = key.split('.').collect();
                let value = ctx
                    .get_path(path.as_slice())
                    .ok_or_else(|| BindError::missing_key(key))?;
                let text = value
                    .to_text()
                    .ok_or_else(|| BindError::not_renderable(value.kind(), "a format placeholder"))?;
                out.push_str(&text);
            }
            '}' => return Err(BindError::malformed(template, "single '}' outside a placeholder")),
            c => out.push(c),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn ctx() -> Context {
        Context::new()
            .with("name", "Fred")
            .with("count", 3)
            .with("user", [("email", "fred@example.com")].into_iter().collect::<Value>())
            .with("tags", vec!["a"])
    }

    #[test]
    fn test_substitutes_named_placeholders() {
        let out = interpolate("Hello {name}, you have {count} messages", &ctx()).unwrap();
        assert_eq!(out, "Hello Fred, you have 3 messages");
    }

    #[test]
    fn test_nested_placeholder() {
        assert_eq!(interpolate("<{user.email}>", &ctx()).unwrap(), "<fred@example.com>");
    }

    #[test]
    fn test_escaped_braces() {
        assert_eq!(interpolate("{{{name}}}", &ctx()).unwrap(), "{Fred}");
    }

    #[test]
    fn test_missing_key() {
        let err = interpolate("Hi {nobody}", &ctx()).unwrap_err();
        assert!(matches!(err, BindError::MissingKey { ref key } if key == "nobody"));
    }

    #[test]
    fn test_malformed() {
        for bad in ["{name", "name}", "{}", "{a{b}}"] {
            let err = interpolate(bad, &ctx()).unwrap_err();
            assert!(
                matches!(err, BindError::MalformedFormat { .. }),
                "{bad} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_list_is_not_renderable() {
        let err = interpolate("{tags}", &ctx()).unwrap_err();
        assert!(matches!(err, BindError::NotRenderable { kind: "list", .. }));
    }
}
