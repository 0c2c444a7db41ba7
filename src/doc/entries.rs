use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// `name(, -alias)*: description`, with up to two leading dashes tolerated on
// the primary name.
static ENTRY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-{0,2}([A-Za-z_]\w*)((?:\s*,\s*-{0,2}[A-Za-z_]\w*)*):\s+(.+)$")
        .expect("internal error - invalid entry pattern")
});

// A description that is exactly one dashed name, which makes the line an
// alias declaration rather than an entry.
static ALIAS_VALUE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-{1,2}([A-Za-z_]\w*)$").expect("internal error - invalid alias pattern")
});

static ALIAS_TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-{0,2}([A-Za-z_]\w*)").expect("internal error - invalid alias token pattern")
});

/// The error when documented names and aliases collide.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AliasConflictError {
    /// A name was claimed by two entries/aliases in the same parse.
    #[error("name '{name}' is already claimed by another entry or alias.")]
    AlreadyClaimed {
        /// The doubly-claimed name.
        name: String,
    },

    /// An alias collides with a declared parameter name.
    #[error("alias '{alias}' is already used in the signature.")]
    ShadowsParameter {
        /// The colliding alias.
        alias: String,
    },

    /// An alias targets the variadic-keyword catch-all slot.
    #[error("alias '{alias}' cannot target the variadic-keyword parameter '{target}'.")]
    TargetsCatchAll {
        /// The offending alias.
        alias: String,
        /// The catch-all name it targets.
        target: String,
    },

    /// An alias targets another alias, so it would not resolve in one hop.
    #[error("alias '{alias}' does not resolve in one hop ('{target}' is itself an alias).")]
    Indirect {
        /// The offending alias.
        alias: String,
        /// The aliased target.
        target: String,
    },
}

fn discard(line: &str) {
    #[cfg(feature = "tracing_debug")]
    {
        debug!("Discarding documentation line with no matching entry: '{line}'.");
    }
    #[cfg(not(feature = "tracing_debug"))]
    {
        let _ = line;
    }
}

/// Parse the lines of a `key: value` block into per-parameter help text and
/// an alias map.
///
/// Three rules are tried per line, in order:
/// 1. An entry, `name(, -alias)*: description` — the primary name is
///    documented and each inline alias maps to it.  A line whose
///    description is exactly one dashed name instead declares an alias of
///    that name; the alias registers when its target is already documented
///    or when it targets its own name, and is otherwise dropped.
/// 2. A continuation of the current entry — joined to its description with
///    a single space.
/// 3. Anything else is dropped with a low-priority diagnostic.
///
/// Claiming a name that another entry or alias already holds fails with
/// [`AliasConflictError`] rather than silently overwriting.
///
/// ### Example
/// ```
/// use declarg::parse_argument_entries;
///
/// let lines = vec![
///     "aaa:  the first input".to_string(),
///     "-a:   --aaa".to_string(),
/// ];
/// let (docs, aliases) = parse_argument_entries(&lines).unwrap();
/// assert_eq!(docs.get("aaa").unwrap(), "the first input");
/// assert_eq!(aliases.get("a").unwrap(), "aaa");
/// ```
pub fn parse_argument_entries(
    lines: &[String],
) -> Result<(HashMap<String, String>, HashMap<String, String>), AliasConflictError> {
    let mut docs: HashMap<String, String> = HashMap::default();
    let mut aliases: HashMap<String, String> = HashMap::default();
    let mut current: Option<String> = None;

    for raw in lines {
        let line = raw.trim_end();

        if line.is_empty() {
            continue;
        }

        let captures = match ENTRY_PATTERN.captures(line.trim_start()) {
            Some(captures) => captures,
            None => {
                continuation(&mut docs, &current, line);
                continue;
            }
        };

        let name = captures
            .get(1)
            .expect("internal error - entry pattern must capture a name")
            .as_str();
        let inline_aliases = captures.get(2).map(|g| g.as_str()).unwrap_or("");
        let description = captures
            .get(3)
            .expect("internal error - entry pattern must capture a description")
            .as_str()
            .trim_end();

        if let Some(target) = ALIAS_VALUE_PATTERN
            .captures(description)
            .map(|c| c.get(1).expect("internal error - alias capture").as_str())
        {
            // An alias declaration.
            if !inline_aliases.is_empty() {
                discard(line);
                current = None;
                continue;
            }

            if aliases.contains_key(name) || docs.contains_key(name) {
                return Err(AliasConflictError::AlreadyClaimed {
                    name: name.to_string(),
                });
            }

            if docs.contains_key(target) || target == name {
                aliases.insert(name.to_string(), target.to_string());
            } else {
                discard(line);
            }

            current = None;
        } else {
            // An entry.
            if aliases.contains_key(name) {
                return Err(AliasConflictError::AlreadyClaimed {
                    name: name.to_string(),
                });
            }

            docs.insert(name.to_string(), description.to_string());
            current = Some(name.to_string());

            for token in ALIAS_TOKEN_PATTERN.captures_iter(inline_aliases) {
                let alias = token
                    .get(1)
                    .expect("internal error - alias token capture")
                    .as_str();

                if aliases.contains_key(alias) || docs.contains_key(alias) {
                    return Err(AliasConflictError::AlreadyClaimed {
                        name: alias.to_string(),
                    });
                }

                aliases.insert(alias.to_string(), name.to_string());
            }
        }
    }

    Ok((docs, aliases))
}

fn continuation(docs: &mut HashMap<String, String>, current: &Option<String>, line: &str) {
    match current {
        Some(name) if docs.contains_key(name) => {
            let description = docs
                .get_mut(name)
                .expect("internal error - continuation must follow an entry");
            *description = format!("{} {}", description.trim_end(), line.trim());
        }
        _ => discard(line),
    }
}
