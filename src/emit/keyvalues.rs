use std::fmt::Display;

const INDENT: &str = "    ";

/// Writes nested `name { "key" "value" }` blocks, one token group per line, indented by four
/// spaces per level.
///
/// Double quotes can't be escaped in this format, so they are dropped from keys and values.
#[derive(Debug, Default)]
pub struct KeyValues {
    lines: Vec<String>,
    depth: usize,
}

impl KeyValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a block with a bare name, like `solid`.
    pub fn open(&mut self, name: &str) -> &mut Self {
        self.line(name.to_string());
        self.line("{".to_string());
        self.depth += 1;
        self
    }

    /// Opens a block with a quoted name, like `"Material"`.
    pub fn open_quoted(&mut self, name: &str) -> &mut Self {
        self.line(quote(name));
        self.line("{".to_string());
        self.depth += 1;
        self
    }

    /// Writes `"key" "value"`.
    pub fn pair(&mut self, key: &str, value: impl Display) -> &mut Self {
        let line = format!("{} {}", quote(key), quote(&value.to_string()));
        self.line(line);
        self
    }

    /// Closes the innermost open block.
    ///
    /// # Panics
    ///
    /// Panics if no block is open.
    pub fn close(&mut self) -> &mut Self {
        assert!(self.depth > 0, "no block to close");
        self.depth -= 1;
        self.line("}".to_string());
        self
    }

    /// Returns the text, lines separated by `\n` with no trailing newline.
    pub fn finish(self) -> String {
        debug_assert_eq!(self.depth, 0, "unclosed block");
        self.lines.join("\n")
    }

    fn line(&mut self, text: String) {
        self.lines.push(INDENT.repeat(self.depth) + &text);
    }
}

fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    quoted.extend(text.chars().filter(|&ch| ch != '"'));
    quoted.push('"');
    quoted
}
