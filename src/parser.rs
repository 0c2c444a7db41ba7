//! The outer plumbing: user interface, help printing, and the `run` entry
//! point.

mod interface;
mod middleware;
mod printer;

pub(crate) use interface::*;
pub use middleware::*;
pub(crate) use printer::*;

use crate::api::ParameterSpec;

/// Render the help message for a spec against the current terminal width.
pub fn render_help(spec: &ParameterSpec, program: impl Into<String>) -> String {
    Printer::terminal(spec).render(program)
}
