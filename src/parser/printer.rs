use terminal_size::{terminal_size, Width};

use crate::api::ParameterSpec;
use crate::constant::*;
use crate::model::{Primitive, TypeDescriptor};
use crate::parser::UserInterface;

const DEFAULT_TOTAL_WIDTH: usize = 80;
const PADDING_WIDTH: usize = 3;
const INDENT_WIDTH: usize = 2;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
const MINIMUM_MIDDLE_WIDTH: usize = 17;

pub(crate) struct Printer<'s> {
    spec: &'s ParameterSpec,
    total_width: usize,
}

impl<'s> Printer<'s> {
    pub(crate) fn terminal(spec: &'s ParameterSpec) -> Self {
        let total_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            terminal_width as usize
        } else {
            DEFAULT_TOTAL_WIDTH
        };

        Self::new(spec, total_width)
    }

    pub(crate) fn new(spec: &'s ParameterSpec, total_width: usize) -> Self {
        Self { spec, total_width }
    }

    pub(crate) fn print_help(
        &self,
        program: impl Into<String>,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        user_interface.print(self.render(program));
    }

    pub(crate) fn render(&self, program: impl Into<String>) -> String {
        let mut out = vec![self.usage(program.into())];

        for description in self.spec.descriptions() {
            out.push(String::default());
            out.push(description.clone());
        }

        out.push(String::default());
        out.push("Arguments:".to_string());
        out.extend(self.argument_lines());
        out.join("\n")
    }

    fn usage(&self, program: String) -> String {
        let mut parts = vec![format!("usage: {program}"), format!("[-{HELP_SHORT}]")];

        for name in self.spec.keyword_only() {
            if self.is_flag(name) {
                parts.push(format!("[--{name}]"));
            } else {
                parts.push(format!("[--{name}={}]", meta_name(name)));
            }
        }

        for name in self.spec.positionals() {
            if self.spec.default_of(name).is_some() {
                parts.push(format!("[{}]", meta_name(name)));
            } else {
                parts.push(meta_name(name));
            }
        }

        if let Some(name) = self.spec.variadic() {
            parts.push(format!("[{} ...]", meta_name(name)));
        }

        parts.join(" ")
    }

    fn is_flag(&self, name: &str) -> bool {
        matches!(
            self.spec.types().get(name),
            Some(TypeDescriptor::Primitive(Primitive::Bool))
        )
    }

    fn rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![(
            format!("-{HELP_SHORT}, --{HELP_NAME}"),
            HELP_MESSAGE.to_string(),
        )];
        let doc = |name: &str| self.spec.docs().get(name).cloned().unwrap_or_default();

        for name in self.spec.positionals() {
            rows.push((name.clone(), doc(name)));
        }

        if let Some(name) = self.spec.variadic() {
            rows.push((name.to_string(), doc(name)));
        }

        for name in self.spec.keyword_only() {
            let mut aliases: Vec<&String> = self
                .spec
                .aliases()
                .iter()
                .filter(|(_, target)| target.as_str() == name.as_str())
                .map(|(alias, _)| alias)
                .collect();
            aliases.sort();

            let mut left = format!("--{name}");
            for alias in aliases {
                if alias.len() == 1 {
                    left.push_str(&format!(", -{alias}"));
                } else {
                    left.push_str(&format!(", --{alias}"));
                }
            }

            rows.push((left, doc(name)));
        }

        rows
    }

    fn argument_lines(&self) -> Vec<String> {
        let rows = self.rows();
        let left_width = rows
            .iter()
            .map(|(left, _)| left.len())
            .max()
            .unwrap_or_default();
        let middle_width = std::cmp::max(
            self.total_width
                .saturating_sub(INDENT_WIDTH + left_width + PADDING_WIDTH),
            MINIMUM_MIDDLE_WIDTH,
        );

        let indent = INDENT_WIDTH;
        let padding = PADDING_WIDTH;
        let mut lines = Vec::default();

        for (left, description) in rows {
            if description.is_empty() {
                lines.push(format!("{:indent$}{left}", ""));
                continue;
            }

            for (i, part) in wrap(&description, middle_width).into_iter().enumerate() {
                if i == 0 {
                    lines.push(format!("{:indent$}{left:left_width$}{:padding$}{part}", "", ""));
                } else {
                    lines.push(format!(
                        "{:indent$}{:left_width$}{:padding$}{part}",
                        "", "", ""
                    ));
                }
            }
        }

        lines
    }
}

fn meta_name(name: &str) -> String {
    name.to_ascii_uppercase().replace('-', "_")
}

fn wrap(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        if current.is_empty() {
            hard_split(width, &mut lines, &mut current, word);
        } else if current.len() + word.len() + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hard_split(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hard_split(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let mut remainder = word;

    while remainder.len() > width {
        let split = width - 1;
        lines.push(format!("{}-", &remainder[..split]));
        remainder = &remainder[split..];
    }

    current.push_str(remainder);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{parse, Callable, Param, Signature};
    use crate::model::DefaultValue;
    use crate::test::assert_contains;

    fn spec() -> ParameterSpec {
        parse(&Callable::function(
            Signature::new()
                .doc(concat!(
                    "Copy a tree from one place to another.\n",
                    "\n",
                    "Args:\n",
                    "    source:  the tree to copy\n",
                    "    destination:  where the copy lands\n",
                    "    force, -f:  overwrite the destination when it already exists\n",
                ))
                .param(Param::positional("source"))
                .param(
                    Param::positional("destination")
                        .default(DefaultValue::Str(".".to_string())),
                )
                .param(Param::variadic("filters"))
                .param(Param::keyword("force").default(DefaultValue::Bool(false)))
                .param(Param::keyword("depth").default(DefaultValue::Int(1))),
        ))
        .unwrap()
    }

    #[test]
    fn usage_line() {
        // Setup
        let spec = spec();
        let printer = Printer::new(&spec, 80);

        // Execute
        let message = printer.render("copier");

        // Verify
        assert_contains!(
            message,
            "usage: copier [-h] [--force] [--depth=DEPTH] SOURCE [DESTINATION] [FILTERS ...]"
        );
    }

    #[test]
    fn descriptions_and_rows() {
        // Setup
        let spec = spec();
        let printer = Printer::new(&spec, 80);

        // Execute
        let message = printer.render("copier");

        // Verify
        assert_contains!(message, "Copy a tree from one place to another.");
        assert_contains!(message, "Arguments:");
        assert_contains!(message, "-h, --help");
        assert_contains!(message, "Show this help message and exit.");
        assert_contains!(message, "source");
        assert_contains!(message, "the tree to copy");
        assert_contains!(message, "--force, -f");
        assert_contains!(message, "overwrite the destination when");
    }

    #[test]
    fn narrow_terminal_wraps() {
        // Setup
        let spec = spec();
        let printer = Printer::new(&spec, 40);

        // Execute
        let message = printer.render("copier");

        // Verify
        // The force row's help no longer fits on one line.
        let row_line = message
            .lines()
            .find(|line| line.contains("--force, -f"))
            .unwrap();
        assert!(!row_line.contains("already exists"));
        assert_contains!(message, "already exists");
    }

    #[test]
    fn empty_spec() {
        // Setup
        let spec = ParameterSpec::default();
        let printer = Printer::new(&spec, 80);

        // Execute
        let message = printer.render("program");

        // Verify
        assert_eq!(
            message,
            concat!("usage: program [-h]\n", "\n", "Arguments:\n", "  -h, --help   Show this help message and exit.")
        );
    }

    #[test]
    fn wrap_words() {
        assert_eq!(wrap("a b c", 10), vec!["a b c".to_string()]);
        assert_eq!(
            wrap("something pieces full more stuff", 23),
            vec!["something pieces full".to_string(), "more stuff".to_string()]
        );
        assert_eq!(
            wrap("somethingxpiecesxfullerxx", 12),
            vec!["somethingxp-".to_string(), "iecesxfulle-".to_string(), "rxx".to_string()]
        );
    }
}
