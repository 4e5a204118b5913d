//! `[:key]` placeholder substitution for failure messages.

use crate::value::CheckValue;

/// Replaces every `[:key]` token in `template` with the rendered value bound
/// to `key`. Lists render comma-joined. Tokens whose key is not bound are
/// left as they are.
///
/// Matching is literal; keys are never interpreted as patterns.
pub fn substitute<'a, I>(template: &str, bindings: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a CheckValue)>,
{
    let mut rendered = template.to_string();
    for (key, value) in bindings {
        let token = format!("[:{}]", key.trim());
        if rendered.contains(&token) {
            rendered = rendered.replace(&token, &value.to_string());
        }
    }
    rendered
}
