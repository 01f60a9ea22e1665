//! Named-placeholder substitution for directive commands.
//!
//! `{name}` is replaced by the matching argument, `{{` and `}}` produce a
//! literal brace. A placeholder without an argument, or an unpaired brace,
//! is an error. Arguments nobody asked for are ignored.

use crate::{Error, Result};

pub fn render(template: &str, args: &[(&str, &str)]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(Error::Template(format!(
                                "unterminated placeholder '{{{}'",
                                name
                            )))
                        }
                        Some(c) => name.push(c),
                    }
                }
                let value = args
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| Error::Template(format!("no value for placeholder '{{{}}}'", name)))?;
                out.push_str(value);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(Error::Template("single '}' encountered".to_string())),
            c => out.push(c),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_named_placeholders() {
        let out = render(
            "Outline '{title}': {abstract}",
            &[("title", "T"), ("abstract", "A")],
        )
        .unwrap();
        assert_eq!(out, "Outline 'T': A");
    }

    #[test]
    fn test_render_repeated_and_unused() {
        let out = render("{x}-{x}", &[("x", "1"), ("unused", "2")]).unwrap();
        assert_eq!(out, "1-1");
    }

    #[test]
    fn test_render_escaped_braces() {
        let out = render(
            "Reply as {{\"email_subject\": ...}} about {title}",
            &[("title", "T")],
        )
        .unwrap();
        assert_eq!(out, "Reply as {\"email_subject\": ...} about T");
    }

    #[test]
    fn test_values_are_not_reinterpreted() {
        let out = render("{outline}", &[("outline", "{title} stays")]).unwrap();
        assert_eq!(out, "{title} stays");
    }

    #[test]
    fn test_render_errors() {
        assert!(matches!(render("{missing}", &[]), Err(Error::Template(_))));
        assert!(matches!(render("open {title", &[("title", "T")]), Err(Error::Template(_))));
        assert!(matches!(render("close }", &[]), Err(Error::Template(_))));
    }
}
