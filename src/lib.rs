//! `declarg` derives a command line interface from a declared callable
//! signature and its documentation string.
//!
//! Instead of wiring each switch and argument by hand, you declare the
//! callable's parameter table ([`Signature`] and [`Param`]) and attach its
//! documentation string.  `declarg` then:
//! * normalizes the declaration into a canonical [`ParameterSpec`]
//!   ([`extract_signature`]), dropping receiver slots for methods, classes,
//!   and callable objects;
//! * resolves every parameter's type ([`load_type_hints`]) from its raw
//!   annotation or, best-effort, from the shape of its default value —
//!   including textual annotations such as `"Optional[int]"` parsed against
//!   a closed vocabulary ([`resolve_type`]);
//! * reads the documentation string ([`load_doc_hints`]) for description
//!   paragraphs, per-parameter help text, and switch aliases, using
//!   indentation-sensitive section splitting ([`segment_docstring`]) and a
//!   line grammar for `name: description` entries
//!   ([`parse_argument_entries`]).
//!
//! The finished spec drives the downstream plumbing: token matching
//! ([`match_tokens`]), help rendering ([`render_help`]), validation rules
//! ([`RuleRegistry`]), and the [`run`]/[`run_tokens`] entry points.
//!
//! # Usage
//! ```
//! use declarg::{run_tokens, Callable, DefaultValue, Param, RuleRegistry, Signature};
//!
//! let callable = Callable::function(
//!     Signature::new()
//!         .doc(concat!(
//!             "Copy a tree from one place to another.\n",
//!             "\n",
//!             "Args:\n",
//!             "    source:  the tree to copy\n",
//!             "    force, -f:  overwrite the destination\n",
//!         ))
//!         .param(Param::positional("source"))
//!         .param(Param::keyword("force").default(DefaultValue::Bool(false))),
//! );
//!
//! let matched = run_tokens("copier", &callable, &RuleRegistry::default(), &["a/b", "-f"])
//!     .expect("the tokens align to the declaration");
//! assert_eq!(matched.flag("force"), Some(true));
//! ```
#![deny(missing_docs)]
mod api;
mod constant;
mod doc;
mod matcher;
mod model;
mod parser;
mod typing;
mod validation;

pub use api::*;
pub use doc::*;
pub use matcher::*;
pub use model::*;
pub use parser::*;
pub use typing::*;
pub use validation::*;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
