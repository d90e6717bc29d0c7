use crate::defines::Defines;
use crate::directive::{Directive, DirectiveParser};
use crate::error::Error;
use crate::subst::Substitutor;
use std::io::{BufRead, Write};

/// One open `@ifdef` region. The name and opening line are kept so an
/// unterminated region can be reported precisely at EOF.
#[derive(Debug)]
struct Frame {
    name: String,
    line: usize,
    active: bool,
}

/// Stack of open conditional regions.
///
/// Frames hold their raw `name in defines` flag; a content line is emitted
/// only when every frame on the stack is active, so an inner region can
/// never leak output past an inactive enclosing region. An empty stack
/// means active.
#[derive(Debug, Default)]
struct ConditionalStack {
    frames: Vec<Frame>,
}

impl ConditionalStack {
    fn push(&mut self, name: String, line: usize, active: bool) {
        self.frames.push(Frame { name, line, active });
    }

    /// Invert the innermost flag; false if nothing is open.
    fn invert_top(&mut self) -> bool {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.active = !frame.active;
                true
            }
            None => false,
        }
    }

    /// Drop the innermost region; false if nothing is open.
    fn pop(&mut self) -> bool {
        self.frames.pop().is_some()
    }

    fn is_active(&self) -> bool {
        self.frames.iter().all(|frame| frame.active)
    }

    fn innermost(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

/// Counters reported after a successful run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterStats {
    /// Input lines consumed, directives included.
    pub lines_read: usize,
    /// Content lines written out after substitution.
    pub lines_emitted: usize,
    /// Lines classified as `@ifdef`/`@else`/`@endif`.
    pub directives: usize,
}

/// Drives the conditional-inclusion pass over a line stream.
pub struct Filter {
    directives: DirectiveParser,
    substitutor: Substitutor,
    defines: Defines,
}

impl Filter {
    pub fn new(defines: Defines) -> Self {
        Self {
            directives: DirectiveParser::new(),
            substitutor: Substitutor::new(),
            defines,
        }
    }

    /// Filter `reader` into `writer`, one line at a time.
    ///
    /// Each emitted line is terminated by a single newline. The first error
    /// aborts the run; lines already written stay written. Input ending with
    /// an open `@ifdef` is an error.
    pub fn run<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: &mut W,
    ) -> Result<FilterStats, Error> {
        let mut stack = ConditionalStack::default();
        let mut stats = FilterStats::default();

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let raw = line?;
            let line = raw.trim_end_matches('\r');
            stats.lines_read += 1;

            if let Some(directive) = self.directives.parse_directive(line) {
                stats.directives += 1;
                self.apply(directive, line_no, &mut stack)?;
                continue;
            }

            // Inactive regions drop content before any reference scan.
            if !stack.is_active() {
                continue;
            }

            let expanded = self.substitutor.expand(line, line_no, &self.defines)?;
            writeln!(writer, "{}", expanded)?;
            stats.lines_emitted += 1;
        }

        if let Some(frame) = stack.innermost() {
            return Err(Error::UnterminatedConditional {
                line: frame.line,
                name: frame.name.clone(),
            });
        }

        Ok(stats)
    }

    /// In-memory convenience over [`run`](Self::run), used by tests and
    /// library callers that already hold the input as a string.
    pub fn filter_str(&self, input: &str) -> Result<String, Error> {
        let mut output = Vec::new();
        self.run(input.as_bytes(), &mut output)?;
        Ok(String::from_utf8(output).expect("filter output is valid UTF-8"))
    }

    /// Directives are interpreted even inside inactive regions so that
    /// nested pairs match up; only the active test consults the full stack.
    fn apply(
        &self,
        directive: Directive,
        line_no: usize,
        stack: &mut ConditionalStack,
    ) -> Result<(), Error> {
        match directive {
            Directive::Ifdef(name) => {
                let active = self.defines.contains(&name);
                stack.push(name, line_no, active);
            }
            Directive::Else => {
                if !stack.invert_top() {
                    return Err(Error::UnbalancedDirective {
                        line: line_no,
                        directive: "@else",
                    });
                }
            }
            Directive::Endif => {
                if !stack.pop() {
                    return Err(Error::UnbalancedDirective {
                        line: line_no,
                        directive: "@endif",
                    });
                }
            }
        }

        Ok(())
    }
}
