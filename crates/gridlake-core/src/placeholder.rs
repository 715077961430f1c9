use serde_yaml::Value;

/// Returns the inner path of a `${...}` token, or `None` for a literal.
pub fn placeholder_path(token: &str) -> Option<&str> {
    token
        .trim()
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .map(str::trim)
}

/// Resolves a domain-parameter token against a source's config tree.
///
/// `${name}` and `${a.b.c}` walk the dotted path through nested mappings.
/// Anything else is a literal and comes back unchanged. Missing segments,
/// non-scalar targets and empty strings all resolve to `None`.
pub fn resolve_placeholder(token: &str, tree: &Value) -> Option<String> {
    let Some(path) = placeholder_path(token) else {
        let literal = token.trim();
        return (!literal.is_empty()).then(|| literal.to_owned());
    };
    if path.is_empty() {
        return None;
    }

    let mut current = tree;
    for segment in path.split('.') {
        current = current.as_mapping()?.get(segment)?;
    }

    let resolved = match current {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => return None,
    };
    (!resolved.is_empty()).then_some(resolved)
}

/// Expands a whole-value `${VAR}` credential reference through `lookup`.
///
/// Values that are not references pass through. A reference to an unset or
/// empty variable yields `None`.
pub fn resolve_env_reference<F>(value: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match placeholder_path(value) {
        Some(name) => lookup(name).filter(|resolved| !resolved.trim().is_empty()),
        None => Some(value.to_owned()),
    }
}
