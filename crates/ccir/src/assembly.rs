use crate::section::Section;

/// One entry in the data section: a synthesized label and the raw
/// (already-escaped, unquoted) literal text from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub label: String,
    pub value: String,
}

/// The whole translation unit's output: sections of instructions, the
/// extern symbol list, and the string-literal pool for the data section
/// (spec §3). `printf` is always declared extern — the language treats it
/// as a built-in, callable whether or not the source actually calls it.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub sections: Vec<Section>,
    pub externs: Vec<String>,
    pub strings: Vec<StringLiteral>,
}

impl Assembly {
    pub fn new() -> Assembly {
        Assembly { sections: Vec::new(), externs: vec!["printf".to_string()], strings: Vec::new() }
    }

    /// Returns the named section, creating it (appended at the end) if absent.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        if let Some(idx) = self.sections.iter().position(|s| s.name == name) {
            return &mut self.sections[idx];
        }
        self.sections.push(Section::new(name));
        self.sections.last_mut().unwrap()
    }

    /// Interns a raw string literal, returning its freshly synthesized
    /// `.LCi` label. No deduplication: each call mints a new label, per
    /// spec §3 ("unique labeling per emission").
    pub fn intern_string(&mut self, raw: impl Into<String>) -> String {
        let label = format!(".LC{}", self.strings.len());
        self.strings.push(StringLiteral { label: label.clone(), value: raw.into() });
        label
    }
}

impl Default for Assembly {
    fn default() -> Self {
        Assembly::new()
    }
}
