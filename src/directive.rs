use regex::Regex;

/// A control line recognized by the preprocessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `@ifdef NAME`: opens a conditional region.
    Ifdef(String),
    /// `@else`: inverts the innermost open region.
    Else,
    /// `@endif`: closes the innermost open region.
    Endif,
}

/// Classifies raw input lines against the directive grammar.
///
/// A directive keyword must start the line and occupy all of it; only
/// trailing whitespace is permitted. Anything else, such as leading
/// whitespace, trailing arguments, or an `@ifdef` with a missing or
/// non-identifier name, is an ordinary content line.
pub struct DirectiveParser {
    ifdef_re: Regex,
    else_re: Regex,
    endif_re: Regex,
}

impl DirectiveParser {
    pub fn new() -> Self {
        let ifdef_re = Regex::new(r"^@ifdef\s+([A-Za-z_][A-Za-z0-9_]*)\s*$")
            .expect("invalid ifdef pattern");
        let else_re = Regex::new(r"^@else\s*$").expect("invalid else pattern");
        let endif_re = Regex::new(r"^@endif\s*$").expect("invalid endif pattern");

        Self {
            ifdef_re,
            else_re,
            endif_re,
        }
    }

    /// Return the directive on this line, or `None` for a content line.
    pub fn parse_directive(&self, line: &str) -> Option<Directive> {
        if let Some(captures) = self.ifdef_re.captures(line) {
            let name = captures.get(1).unwrap().as_str();
            return Some(Directive::Ifdef(name.to_string()));
        }

        if self.else_re.is_match(line) {
            return Some(Directive::Else);
        }

        if self.endif_re.is_match(line) {
            return Some(Directive::Endif);
        }

        None
    }
}

impl Default for DirectiveParser {
    fn default() -> Self {
        Self::new()
    }
}
