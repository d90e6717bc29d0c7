use crate::defines::Defines;
use crate::error::Error;
use regex::Regex;

/// Expands `@NAME@` references inside content lines.
pub struct Substitutor {
    reference_re: Regex,
}

impl Substitutor {
    pub fn new() -> Self {
        let reference_re =
            Regex::new(r"@([A-Za-z_][A-Za-z0-9_]*)@").expect("invalid reference pattern");

        Self { reference_re }
    }

    /// Replace every `@NAME@` reference in `line` with its bound value.
    ///
    /// Scanning is a single left-to-right pass over non-overlapping matches:
    /// replacement text is spliced in verbatim and never re-scanned, so a
    /// value containing `@...@`-shaped text stays literal and cannot form a
    /// new reference with the text that follows it.
    ///
    /// A reference naming an unbound identifier fails the whole run; nothing
    /// of the offending line is emitted.
    pub fn expand(&self, line: &str, line_no: usize, defines: &Defines) -> Result<String, Error> {
        if !line.contains('@') {
            return Ok(line.to_string());
        }

        let mut expanded = String::with_capacity(line.len());
        let mut tail_start = 0;

        for captures in self.reference_re.captures_iter(line) {
            let span = captures.get(0).unwrap();
            let name = captures.get(1).unwrap().as_str();

            let value = defines.get(name).ok_or_else(|| Error::UndefinedVariable {
                line: line_no,
                name: name.to_string(),
            })?;

            expanded.push_str(&line[tail_start..span.start()]);
            expanded.push_str(&value.to_string());
            tail_start = span.end();
        }

        expanded.push_str(&line[tail_start..]);
        Ok(expanded)
    }
}

impl Default for Substitutor {
    fn default() -> Self {
        Self::new()
    }
}
