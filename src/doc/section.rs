use once_cell::sync::Lazy;
use regex::Regex;

use crate::doc::parse_argument_entries;

// A non-indented line ending in a colon, with nothing after the colon.
static HEADER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S[^:]*):\s*$").expect("internal error - invalid header pattern"));

/// One contiguous block of a documentation string: either free text (no
/// header) or a candidate block of `key: value` entries under an optional
/// header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub(crate) header: Option<String>,
    pub(crate) lines: Vec<String>,
}

impl Section {
    /// The section header, colon stripped, if any.
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// The section's content lines with their leading indentation stripped
    /// relative to the shallowest line.
    pub fn contents(&self) -> Vec<String> {
        let margin = self
            .lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| indent_of(line))
            .min()
            .unwrap_or(0);

        self.lines
            .iter()
            .map(|line| {
                if line.len() >= margin {
                    line[margin..].to_string()
                } else {
                    line.trim_start().to_string()
                }
            })
            .collect()
    }

    /// The section reconstructed as display text, indentation intact.
    pub fn text(&self) -> String {
        let body = self.lines.join("\n");
        match &self.header {
            Some(header) => format!("{header}:\n{body}"),
            None => body,
        }
    }
}

struct LineStream {
    lines: Vec<String>,
    position: usize,
}

impl LineStream {
    fn new(lines: Vec<String>) -> Self {
        Self { lines, position: 0 }
    }

    fn has_more(&self) -> bool {
        self.position < self.lines.len()
    }

    fn peek(&self) -> Option<&str> {
        self.lines.get(self.position).map(String::as_str)
    }

    fn take(&mut self) -> Option<String> {
        let line = self.lines.get(self.position).cloned();
        if line.is_some() {
            self.position += 1;
        }
        line
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

// Dedent in the documentation-string convention: the first line keeps its
// own indentation context, the remaining lines lose their common margin.
fn dedent(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    let margin = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| indent_of(line))
        .min()
        .unwrap_or(0);

    let mut out = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            out.push(line.trim_start().to_string());
        } else if line.len() >= margin {
            out.push(line[margin..].trim_end().to_string());
        } else {
            out.push(line.trim().to_string());
        }
    }

    out
}

/// Split a documentation string into its ordered sections.
///
/// A header is a non-indented line ending in a colon with nothing after it;
/// its section spans the subsequent deeper-indented lines (interior blank
/// lines are skipped, a line at or below the header's indentation ends the
/// section without being consumed).  Anything else accumulates into a
/// free-text section until a blank line.
///
/// When no section carries a header and the final section parses as
/// argument entries, that section is re-tagged with a synthetic `Args`
/// header, so a trailing unlabeled block is still recognized as parameter
/// documentation.
///
/// ### Example
/// ```
/// use declarg::segment_docstring;
///
/// let sections = segment_docstring("Greets.\n\nArgs:\n    name:  who to greet");
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[0].header(), None);
/// assert_eq!(sections[1].header(), Some("Args"));
/// ```
pub fn segment_docstring(text: &str) -> Vec<Section> {
    let mut stream = LineStream::new(dedent(text));
    let mut sections: Vec<Section> = Vec::default();

    while stream.has_more() {
        while matches!(stream.peek(), Some(line) if is_blank(line)) {
            stream.take();
        }

        let line = match stream.peek() {
            Some(line) => line,
            None => break,
        };

        if let Some(captures) = HEADER_PATTERN.captures(line) {
            let header = captures
                .get(1)
                .expect("internal error - header pattern must capture")
                .as_str()
                .to_string();
            let header_indent = indent_of(line);
            stream.take();

            let mut lines = Vec::default();
            while let Some(next) = stream.peek() {
                if is_blank(next) {
                    stream.take();
                } else if indent_of(next) > header_indent {
                    lines.push(
                        stream
                            .take()
                            .expect("internal error - take must follow peek"),
                    );
                } else {
                    break;
                }
            }

            sections.push(Section {
                header: Some(header),
                lines,
            });
        } else {
            let mut lines = Vec::default();
            while let Some(next) = stream.peek() {
                if is_blank(next) {
                    break;
                }
                lines.push(
                    stream
                        .take()
                        .expect("internal error - take must follow peek"),
                );
            }

            sections.push(Section {
                header: None,
                lines,
            });
        }
    }

    promote_trailing_entries(&mut sections);
    sections
}

// A trailing unlabeled block of pure entries doubles as the parameter
// documentation section.
fn promote_trailing_entries(sections: &mut [Section]) {
    if !sections.iter().all(|section| section.header.is_none()) {
        return;
    }

    if let Some(last) = sections.last_mut() {
        let is_entries = match parse_argument_entries(&last.contents()) {
            Ok((docs, aliases)) => !docs.is_empty() || !aliases.is_empty(),
            // A conflict still means the block is made of entries.
            Err(_) => true,
        };

        if is_entries {
            last.header = Some("Args".to_string());
        }
    }
}
