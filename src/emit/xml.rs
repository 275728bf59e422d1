//! A small element tree with a pretty printer. There's no XML declaration, no text content, and no
//! namespaces; that's all `.vmap` output needs.

use std::fmt::{self, Display, Write};

const INDENT: &str = "  ";

/// An element with ordered attributes and child elements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute, builder style. Attributes print in the order they were added.
    pub fn attr(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.attributes.push((name.into(), value.to_string()));
        self
    }

    /// Adds a child, builder style.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Writes the element and its descendants, one tag per line, with a trailing newline.
    /// Childless elements are self-closing.
    pub fn write_pretty(&self, out: &mut impl Write, depth: usize) -> fmt::Result {
        let indent = INDENT.repeat(depth);
        write!(out, "{}<{}", indent, self.name)?;
        for (name, value) in &self.attributes {
            write!(out, " {}=\"{}\"", name, Escaped(value))?;
        }

        if self.children.is_empty() {
            return writeln!(out, "/>");
        }

        writeln!(out, ">")?;
        for child in &self.children {
            child.write_pretty(out, depth + 1)?;
        }
        writeln!(out, "{}</{}>", indent, self.name)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        self.write_pretty(fmt, 0)
    }
}

/// Escapes text for use inside a double-quoted attribute.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for ch in self.0.chars() {
            match ch {
                '&' => fmt.write_str("&amp;")?,
                '<' => fmt.write_str("&lt;")?,
                '>' => fmt.write_str("&gt;")?,
                '"' => fmt.write_str("&quot;")?,
                _ => fmt.write_char(ch)?,
            }
        }
        Ok(())
    }
}
