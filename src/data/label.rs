use std::fmt;

const MINUS: char = '\u{2212}';
const NBSP: char = '\u{00A0}';
const OMEGA: &str = "ω";

/// A run of label text, upright or italic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpan {
    pub text: String,
    pub italic: bool,
}

/// Legend label of one series, e.g. `ωB97X−D3 (water)` with an italic `ω`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupLabel {
    pub spans: Vec<LabelSpan>,
}

impl GroupLabel {
    /// Build the label from a method and a solvent.
    ///
    /// In the method `-` becomes a minus sign, spaces become non-breaking and
    /// every `w` becomes an italic omega. ` (solvent)` is appended unless the
    /// solvent is `no_solvent`.
    pub fn new(method: &str, solvent: &str, no_solvent: &str) -> Self {
        let mut label = GroupLabel::default();
        for ch in method.chars() {
            match ch {
                'w' => label.push(OMEGA, true),
                '-' => label.push_char(MINUS),
                ' ' => label.push_char(NBSP),
                c => label.push_char(c),
            }
        }
        if solvent != no_solvent {
            label.push(&format!("{NBSP}({solvent})"), false);
        }
        label
    }

    fn push_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.push(c.encode_utf8(&mut buf), false);
    }

    /// Append text, merging with the last span when the style matches.
    fn push(&mut self, text: &str, italic: bool) {
        match self.spans.last_mut() {
            Some(last) if last.italic == italic => last.text.push_str(text),
            _ => self.spans.push(LabelSpan {
                text: text.to_string(),
                italic,
            }),
        }
    }

    /// The label without styling.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn has_italic(&self) -> bool {
        self.spans.iter().any(|s| s.italic)
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain())
    }
}
