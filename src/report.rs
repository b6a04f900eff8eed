//! Human-readable stderr reports.
//!
//! Every report uses the same banner layout: a divider, a title, optional
//! headed sections with indented bullet lines, and a closing divider.

use std::fmt::Write as _;

const DIVIDER_WIDTH: usize = 60;

/// A banner report rendered to stderr.
#[derive(Debug, Clone, Default)]
pub struct Report {
    title: String,
    sections: Vec<Section>,
}

#[derive(Debug, Clone, Default)]
struct Section {
    heading: Option<String>,
    lines: Vec<String>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Start a new section with a heading.
    pub fn section(&mut self, heading: impl Into<String>) -> &mut Self {
        self.sections.push(Section {
            heading: Some(heading.into()),
            lines: Vec::new(),
        });
        self
    }

    /// Add a plain line to the current section.
    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.current().lines.push(text.into());
        self
    }

    /// Add an indented bullet line to the current section.
    pub fn bullet(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.current().lines.push(format!("  - {}", text.as_ref()));
        self
    }

    fn current(&mut self) -> &mut Section {
        if self.sections.is_empty() {
            self.sections.push(Section::default());
        }
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    pub fn render(&self) -> String {
        let divider = "=".repeat(DIVIDER_WIDTH);
        let mut out = String::new();
        let _ = writeln!(out, "{divider}");
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{divider}");
        for section in &self.sections {
            if let Some(heading) = &section.heading {
                let _ = writeln!(out, "{heading}");
            }
            for line in &section.lines {
                let _ = writeln!(out, "{line}");
            }
        }
        let _ = writeln!(out, "{divider}");
        out
    }

    /// Write the report to stderr.
    pub fn emit(&self) {
        eprint!("{}", self.render());
    }
}
