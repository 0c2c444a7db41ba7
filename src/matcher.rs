//! Token matching against a finished [`ParameterSpec`].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::api::ParameterSpec;

// `-name`, `--name`, optionally `=value`.
static SWITCH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-{1,2}([A-Za-z_][\w-]*)(?:=(.*))?$")
        .expect("internal error - invalid switch pattern")
});

/// A value bound to a parameter by token matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchedValue {
    /// A switch given without a value.
    Flag(bool),
    /// A provided token value, not yet converted.
    Value(String),
}

/// The call-ready argument set produced by matching tokens against a spec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedCall {
    pub(crate) arguments: HashMap<String, MatchedValue>,
    pub(crate) variadic: Vec<String>,
}

impl MatchedCall {
    /// The named bindings: positional, keyword-only, and catch-all
    /// keywords.  Parameters left to their defaults are absent.
    pub fn arguments(&self) -> &HashMap<String, MatchedValue> {
        &self.arguments
    }

    /// The values absorbed by the variadic-positional slot.
    pub fn variadic(&self) -> &[String] {
        &self.variadic
    }

    /// The binding for `name`, if provided.
    pub fn get(&self, name: &str) -> Option<&MatchedValue> {
        self.arguments.get(name)
    }

    /// The boolean binding for `name`, if it was provided as a bare switch.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.arguments.get(name) {
            Some(MatchedValue::Flag(value)) => Some(*value),
            _ => None,
        }
    }
}

/// The error when the input tokens cannot be aligned to the spec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// A dashed token that is not a well-formed switch.
    #[error("invalid switch '{token}'.")]
    InvalidSwitch {
        /// The malformed token.
        token: String,
    },

    /// A switch that names no parameter, with no catch-all to absorb it.
    #[error("unknown switch '--{name}'.")]
    UnknownSwitch {
        /// The unmatched switch name.
        name: String,
    },

    /// The same parameter was bound by two switches.
    #[error("switch '--{name}' is repeated.")]
    RepeatedSwitch {
        /// The repeated (canonical) name.
        name: String,
    },

    /// A parameter without a default was never bound.
    #[error("missing required argument '{name}'.")]
    MissingArgument {
        /// The unbound name.
        name: String,
    },

    /// More positional values than positional slots, with no
    /// variadic-positional slot to absorb them.
    #[error("too many positional values (provided={provided}, expected={expected}).")]
    TooManyArguments {
        /// How many positional values were provided.
        provided: usize,
        /// How many positional slots the spec declares.
        expected: usize,
    },
}

/// Align the input tokens to the spec's parameters.
///
/// Switch tokens (`-name`, `--name`, optional `=value`) resolve through the
/// alias map in one hop and bind the named parameter; a bare switch binds a
/// boolean `true`.  A lone `--` ends switch processing.  Every other token
/// is positional: it fills the next unbound positional parameter, then the
/// variadic-positional slot.
///
/// ### Example
/// ```
/// use declarg::{extract_signature, match_tokens, Callable, MatchedValue, Param, Signature};
///
/// let spec = extract_signature(&Callable::function(
///     Signature::new()
///         .param(Param::positional("source"))
///         .param(Param::keyword("force").default(declarg::DefaultValue::Bool(false))),
/// ))
/// .unwrap();
///
/// let matched = match_tokens(&spec, &["a/b", "--force"]).unwrap();
/// assert_eq!(matched.get("source"), Some(&MatchedValue::Value("a/b".to_string())));
/// assert_eq!(matched.flag("force"), Some(true));
/// ```
pub fn match_tokens(spec: &ParameterSpec, tokens: &[&str]) -> Result<MatchedCall, MatchError> {
    let mut arguments: HashMap<String, MatchedValue> = HashMap::default();
    let mut values: Vec<String> = Vec::default();
    let mut switches_closed = false;

    for token in tokens {
        if !switches_closed && *token == "--" {
            switches_closed = true;
            continue;
        }

        if switches_closed || !token.starts_with('-') {
            values.push(token.to_string());
            continue;
        }

        let captures = SWITCH_PATTERN
            .captures(token)
            .ok_or_else(|| MatchError::InvalidSwitch {
                token: token.to_string(),
            })?;
        let name = captures
            .get(1)
            .expect("internal error - switch pattern must capture a name")
            .as_str();
        let value = captures.get(2).map(|m| m.as_str().to_string());

        let canonical = spec.resolve_alias(name).to_string();
        let addressable = spec.positionals().iter().any(|p| p == &canonical)
            || spec.keyword_only().iter().any(|p| p == &canonical);

        if !addressable && !spec.accepts_arbitrary_keywords() {
            return Err(MatchError::UnknownSwitch {
                name: name.to_string(),
            });
        }

        let binding = match value {
            Some(value) => MatchedValue::Value(value),
            None => MatchedValue::Flag(true),
        };

        if arguments.insert(canonical.clone(), binding).is_some() {
            return Err(MatchError::RepeatedSwitch { name: canonical });
        }
    }

    let mut queue = values.into_iter();

    for name in spec.positionals() {
        if arguments.contains_key(name) {
            continue;
        }

        match queue.next() {
            Some(value) => {
                arguments.insert(name.clone(), MatchedValue::Value(value));
            }
            None if spec.default_of(name).is_none() => {
                return Err(MatchError::MissingArgument { name: name.clone() });
            }
            None => {}
        }
    }

    let surplus: Vec<String> = queue.collect();
    if !surplus.is_empty() && spec.variadic().is_none() {
        return Err(MatchError::TooManyArguments {
            provided: spec.positionals().len() + surplus.len(),
            expected: spec.positionals().len(),
        });
    }

    for name in spec.keyword_only() {
        if !arguments.contains_key(name) && spec.default_of(name).is_none() {
            return Err(MatchError::MissingArgument { name: name.clone() });
        }
    }

    Ok(MatchedCall {
        arguments,
        variadic: surplus,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{extract_signature, Callable, Param, Signature};
    use crate::model::DefaultValue;
    use rstest::rstest;

    // (source, count=1, *rest, force=false, **extra) with alias f -> force.
    fn spec() -> ParameterSpec {
        let mut spec = extract_signature(&Callable::function(
            Signature::new()
                .param(Param::positional("source"))
                .param(Param::positional("count").default(DefaultValue::Int(1)))
                .param(Param::variadic("rest"))
                .param(Param::keyword("force").default(DefaultValue::Bool(false)))
                .param(Param::keyword_variadic("extra")),
        ))
        .unwrap();
        spec.aliases
            .insert("f".to_string(), "force".to_string());
        spec
    }

    // (source, force=false), no variadic slots, no aliases.
    fn closed_spec() -> ParameterSpec {
        extract_signature(&Callable::function(
            Signature::new()
                .param(Param::positional("source"))
                .param(Param::keyword("force").default(DefaultValue::Bool(false))),
        ))
        .unwrap()
    }

    #[test]
    fn positionals_fill_in_order() {
        // Setup
        let spec = spec();

        // Execute
        let matched = match_tokens(&spec, &["a", "2", "x", "y"]).unwrap();

        // Verify
        assert_eq!(
            matched.get("source"),
            Some(&MatchedValue::Value("a".to_string()))
        );
        assert_eq!(
            matched.get("count"),
            Some(&MatchedValue::Value("2".to_string()))
        );
        assert_eq!(matched.variadic(), &["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn defaulted_positional_left_unbound() {
        // Setup
        let spec = spec();

        // Execute
        let matched = match_tokens(&spec, &["a"]).unwrap();

        // Verify
        assert_eq!(
            matched.get("source"),
            Some(&MatchedValue::Value("a".to_string()))
        );
        assert_eq!(matched.get("count"), None);
        assert_eq!(matched.variadic(), &[] as &[String]);
    }

    #[rstest]
    #[case(vec!["a", "--force"], Some(true), None)]
    #[case(vec!["a", "-f"], Some(true), None)]
    #[case(vec!["a", "--force=no"], None, Some("no"))]
    fn switches(
        #[case] tokens: Vec<&str>,
        #[case] expected_flag: Option<bool>,
        #[case] expected_value: Option<&str>,
    ) {
        // Setup
        let spec = spec();

        // Execute
        let matched = match_tokens(&spec, tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(matched.flag("force"), expected_flag);
        if let Some(value) = expected_value {
            assert_eq!(
                matched.get("force"),
                Some(&MatchedValue::Value(value.to_string()))
            );
        }
    }

    #[test]
    fn switch_addresses_positional() {
        // A named switch binds the positional; the token queue skips it.
        let spec = spec();

        // Execute
        let matched = match_tokens(&spec, &["--count=2", "a"]).unwrap();

        // Verify
        assert_eq!(
            matched.get("source"),
            Some(&MatchedValue::Value("a".to_string()))
        );
        assert_eq!(
            matched.get("count"),
            Some(&MatchedValue::Value("2".to_string()))
        );
    }

    #[test]
    fn catch_all_absorbs_unknown_switch() {
        // Setup
        let spec = spec();

        // Execute
        let matched = match_tokens(&spec, &["a", "--dry-run"]).unwrap();

        // Verify
        assert_eq!(matched.flag("dry-run"), Some(true));
    }

    #[test]
    fn double_dash_closes_switches() {
        // Setup
        let spec = spec();

        // Execute
        let matched = match_tokens(&spec, &["--", "--force"]).unwrap();

        // Verify
        assert_eq!(
            matched.get("source"),
            Some(&MatchedValue::Value("--force".to_string()))
        );
        assert_eq!(matched.flag("force"), None);
    }

    #[rstest]
    #[case(vec!["a", "-"], MatchError::InvalidSwitch { token: "-".to_string() })]
    #[case(vec!["a", "-9"], MatchError::InvalidSwitch { token: "-9".to_string() })]
    #[case(
        vec!["a", "--nope"],
        MatchError::UnknownSwitch { name: "nope".to_string() }
    )]
    #[case(
        vec!["a", "--force", "--force"],
        MatchError::RepeatedSwitch { name: "force".to_string() }
    )]
    #[case(vec![], MatchError::MissingArgument { name: "source".to_string() })]
    #[case(
        vec!["a", "b"],
        MatchError::TooManyArguments { provided: 2, expected: 1 }
    )]
    fn errors(#[case] tokens: Vec<&str>, #[case] expected: MatchError) {
        // The closed spec rejects; the open spec absorbs most of these.
        let spec = closed_spec();

        // Execute
        let error = match_tokens(&spec, tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(error, expected);
    }

    #[test]
    fn repeated_switch_through_alias() {
        // Setup
        let spec = spec();

        // Execute
        let error = match_tokens(&spec, &["a", "--force", "-f"]).unwrap_err();

        // Verify
        assert_eq!(
            error,
            MatchError::RepeatedSwitch {
                name: "force".to_string(),
            }
        );
    }

    #[test]
    fn missing_keyword_only() {
        // Setup
        let spec = extract_signature(&Callable::function(
            Signature::new().param(Param::keyword("mode")),
        ))
        .unwrap();

        // Execute
        let error = match_tokens(&spec, &[]).unwrap_err();

        // Verify
        assert_eq!(
            error,
            MatchError::MissingArgument {
                name: "mode".to_string(),
            }
        );
    }

    #[test]
    fn empty_tokens_all_defaults() {
        // Setup
        let spec = extract_signature(&Callable::function(
            Signature::new().param(Param::positional("source").default(DefaultValue::Str(
                "here".to_string(),
            ))),
        ))
        .unwrap();

        // Execute
        let matched = match_tokens(&spec, &[]).unwrap();

        // Verify
        assert_eq!(matched, MatchedCall::default());
    }
}
