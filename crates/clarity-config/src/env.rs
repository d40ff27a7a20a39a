use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Failure while substituting environment placeholders
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExpandError {
    #[error("line {line}: environment variable `{name}` is not set")]
    Missing { line: usize, name: String },
    #[error("line {line}: unsupported placeholder scope `{key}`, only `env.` is allowed")]
    Scope { line: usize, key: String },
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `{{ env.NAME }}` or `{{ env.NAME | default("value") }}`
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\)\s*)?\}\}"#)
            .expect("placeholder pattern is valid")
    })
}

/// Substitute `{{ env.NAME }}` placeholders in raw configuration text
///
/// A `| default("...")` suffix supplies the value for unset variables.
/// Comment lines are copied verbatim so disabled settings never require
/// their variables to exist.
pub fn expand_env(input: &str) -> Result<String, ExpandError> {
    let lines: Vec<String> = input
        .lines()
        .enumerate()
        .map(|(index, line)| expand_line(index + 1, line))
        .collect::<Result<_, _>>()?;

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn expand_line(line_no: usize, line: &str) -> Result<String, ExpandError> {
    if line.trim_start().starts_with('#') {
        return Ok(line.to_owned());
    }

    let mut failure = None;

    let expanded = placeholder().replace_all(line, |caps: &Captures<'_>| {
        match resolve(line_no, &caps[1], caps.get(2).map(|m| m.as_str())) {
            Ok(value) => value,
            Err(err) => {
                failure.get_or_insert(err);
                String::new()
            }
        }
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(expanded.into_owned()),
    }
}

fn resolve(line: usize, key: &str, default: Option<&str>) -> Result<String, ExpandError> {
    let Some(name) = key.strip_prefix("env.").filter(|rest| !rest.is_empty() && !rest.contains('.')) else {
        return Err(ExpandError::Scope {
            line,
            key: key.to_owned(),
        });
    };

    match (std::env::var(name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(fallback)) => Ok(fallback.to_owned()),
        (Err(_), None) => Err(ExpandError::Missing {
            line,
            name: name.to_owned(),
        }),
    }
}
