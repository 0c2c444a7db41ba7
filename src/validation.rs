//! Validation rules applied to a matched call before it is handed back to
//! the caller.

use thiserror::Error;

use crate::api::ParameterSpec;
use crate::matcher::{MatchedCall, MatchedValue};
use crate::model::DefaultValue;

/// The error when a validation rule rejects a matched call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// The rule names a flag that neither the spec nor the input carries.
    #[error("flag '{name}' not found in the spec or input.")]
    MissingFlag {
        /// The missing flag name.
        name: String,
    },

    /// The rule names a parameter that is not a boolean flag.
    #[error("expected '{name}' to be a boolean flag.")]
    NotBoolean {
        /// The non-boolean name.
        name: String,
    },

    /// The rule's condition does not hold.
    #[error("{message}")]
    Violation {
        /// The rule's own description of the failure.
        message: String,
    },
}

/// A validation rule: inspects the spec and the matched call, and rejects
/// the call with a [`RuleError`] when its condition does not hold.
pub type Rule = Box<dyn Fn(&ParameterSpec, &MatchedCall) -> Result<(), RuleError>>;

/// An explicit registry of named validation rules, applied in registration
/// order.
///
/// ### Example
/// ```
/// use declarg::{at_least, RuleRegistry};
///
/// let mut rules = RuleRegistry::default();
/// rules.register("need-a-mode", at_least(vec!["read".to_string(), "write".to_string()]));
/// ```
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<(String, Rule)>,
}

impl RuleRegistry {
    /// Register a rule under `name`.
    /// A repeated name replaces the earlier rule, keeping its position.
    pub fn register(&mut self, name: impl Into<String>, rule: Rule) {
        let name = name.into();

        for (existing, slot) in self.rules.iter_mut() {
            if existing == &name {
                *slot = rule;
                return;
            }
        }

        self.rules.push((name, rule));
    }

    /// Remove the rule registered under `name`, if any.
    pub fn unregister(&mut self, name: &str) {
        self.rules.retain(|(existing, _)| existing != name);
    }

    /// Apply every rule in registration order, stopping at the first
    /// rejection.
    pub fn validate(&self, spec: &ParameterSpec, matched: &MatchedCall) -> Result<(), RuleError> {
        for (_, rule) in &self.rules {
            rule(spec, matched)?;
        }

        Ok(())
    }
}

fn flag_value(spec: &ParameterSpec, matched: &MatchedCall, name: &str) -> Result<bool, RuleError> {
    match matched.get(name) {
        Some(MatchedValue::Flag(value)) => Ok(*value),
        Some(MatchedValue::Value(_)) => Err(RuleError::NotBoolean {
            name: name.to_string(),
        }),
        None => match spec.default_of(name) {
            Some(DefaultValue::Bool(value)) => Ok(*value),
            Some(_) => Err(RuleError::NotBoolean {
                name: name.to_string(),
            }),
            None => Err(RuleError::MissingFlag {
                name: name.to_string(),
            }),
        },
    }
}

/// Build a rule requiring at least one of the named boolean flags to be
/// set.
pub fn at_least(flags: Vec<String>) -> Rule {
    Box::new(move |spec, matched| {
        let mut any = false;

        for name in &flags {
            any |= flag_value(spec, matched, name)?;
        }

        if any {
            Ok(())
        } else {
            Err(RuleError::Violation {
                message: format!(
                    "at least one of the following flags must be set: {}.",
                    flags.join(", ")
                ),
            })
        }
    })
}

/// Build a rule requiring exactly one of the named boolean flags to be
/// set.
pub fn one_of(flags: Vec<String>) -> Rule {
    Box::new(move |spec, matched| {
        let mut count = 0;

        for name in &flags {
            if flag_value(spec, matched, name)? {
                count += 1;
            }
        }

        if count == 1 {
            Ok(())
        } else {
            Err(RuleError::Violation {
                message: format!(
                    "exactly one of the following flags must be set: {}.",
                    flags.join(", ")
                ),
            })
        }
    })
}
