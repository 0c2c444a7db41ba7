use std::env;

use crate::api::{parse, Callable};
use crate::constant::*;
use crate::matcher::{match_tokens, MatchedCall};
use crate::parser::{ConsoleInterface, Printer, UserInterface};
use crate::validation::RuleRegistry;

/// Run the pipeline against the Cli [`env::args`]: parse the callable,
/// honor `-h`/`--help`, match the tokens, and apply the validation rules.
///
/// On any failure the error is reported and the process exits with code
/// `1`; the help switch prints the help message and exits with code `0`.
pub fn run(program: &str, callable: &Callable, rules: &RuleRegistry) -> MatchedCall {
    let command_input: Vec<String> = env::args().skip(1).collect();
    let tokens: Vec<&str> = command_input.iter().map(AsRef::as_ref).collect();

    match run_tokens(program, callable, rules, tokens.as_slice()) {
        Ok(matched) => matched,
        Err(exit_code) => {
            std::process::exit(exit_code);
        }
    }
}

/// Run the pipeline against the input tokens.
///
/// Returns the matched call on success.  The help switch (`-h` or
/// `--help`) prints the help message and returns `Err(0)`; any parse,
/// match, or validation failure is reported and returns `Err(1)`.
///
/// ### Example
/// ```
/// use declarg::{run_tokens, Callable, Param, RuleRegistry, Signature};
///
/// let callable = Callable::function(
///     Signature::new().param(Param::positional("source")),
/// );
/// let matched = run_tokens("copier", &callable, &RuleRegistry::default(), &["a/b"]).unwrap();
/// assert!(matched.get("source").is_some());
/// ```
pub fn run_tokens(
    program: &str,
    callable: &Callable,
    rules: &RuleRegistry,
    tokens: &[&str],
) -> Result<MatchedCall, i32> {
    run_with_interface(program, callable, rules, tokens, &ConsoleInterface::default())
}

fn run_with_interface(
    program: &str,
    callable: &Callable,
    rules: &RuleRegistry,
    tokens: &[&str],
    user_interface: &(impl UserInterface + ?Sized),
) -> Result<MatchedCall, i32> {
    let spec = match parse(callable) {
        Ok(spec) => spec,
        Err(error) => {
            user_interface.print_error(error.to_string());
            return Err(1);
        }
    };

    let help_short = format!("-{HELP_SHORT}");
    let help_long = format!("--{HELP_NAME}");
    if tokens
        .iter()
        .any(|token| *token == help_short || *token == help_long)
    {
        Printer::terminal(&spec).print_help(program, user_interface);
        return Err(0);
    }

    let matched = match match_tokens(&spec, tokens) {
        Ok(matched) => matched,
        Err(error) => {
            user_interface.print_error(error.to_string());
            return Err(1);
        }
    };

    if let Err(error) = rules.validate(&spec, &matched) {
        user_interface.print_error(error.to_string());
        return Err(1);
    }

    Ok(matched)
}
