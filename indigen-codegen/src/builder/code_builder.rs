//! Code builder utility for generating properly indented C.

use super::Indent;

/// Fluent API for building code with proper indentation.
///
/// # Example
///
/// ```
/// use indigen_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::c()
///     .block("int ti_sma_start(TI_REAL const *options) {", |b| {
///         b.error_marker("return how shorter will the output be than the input")
///     })
///     .build();
///
/// assert_eq!(
///     code,
///     "int ti_sma_start(TI_REAL const *options) {\n    #error \"return how shorter will the output be than the input\"\n}\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 4-space indentation.
    pub fn c() -> Self {
        Self::new(Indent::C)
    }

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add several lines at the current indentation.
    pub fn lines<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines.into_iter().fold(self, |b, l| b.line(l.as_ref()))
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a brace block: `header`, the indented body, then `}`.
    pub fn block<F>(self, header: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.block_with_close(header, "}", f)
    }

    /// Add a block with a custom closing line (e.g. `} options;`).
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Add a single-line C comment (`/* text */`).
    pub fn comment(self, text: &str) -> Self {
        self.line(&format!("/* {} */", text))
    }

    /// Add a compile-time failure marker (`#error "text"`).
    ///
    /// Generated scaffolding uses these to flag work a human must finish;
    /// unedited output is meant to fail to compile.
    pub fn error_marker(self, text: &str) -> Self {
        self.line(&format!("#error \"{}\"", text.replace('"', "\\\"")))
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level * self.indent.width() {
            self.buffer.push(' ');
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::c()
    }
}
