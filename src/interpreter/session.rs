use std::{io, io::Write, mem};

use log::{debug, warn};

use crate::{
    error::{Error, ParseError},
    graph::node::NodeRef,
    interpreter::{parser::core::parse_program, scope::root_scope},
};

/// Printed after every evaluated expression.
pub const SEPARATOR_WIDTH: usize = 80;

/// Settings for a [`Session`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Drops the ` @id` suffix from renders so output is reproducible.
    pub test_mode: bool,
}

/// Whether the driver should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// `.end` was reached.
    Halt,
}

/// Read-eval-print driver over one root scope.
///
/// Input is fed a line at a time. Every complete top-level expression is
/// echoed in its parsed form, evaluated against the scope, and its result (or
/// error) echoed, followed by a separator line. A line that leaves a `[` or
/// `{` open is held back until the bracket closes. `.end` halts the session
/// even then, dropping the unfinished expression.
///
/// # Example
/// ```
/// use kb::{Flow, Session, SessionOptions};
///
/// let mut session = Session::new(SessionOptions { test_mode: true });
/// let mut out = Vec::new();
///
/// assert_eq!(session.run("x = 5\nx\n.end\nnever", &mut out).unwrap(), Flow::Halt);
/// let text = String::from_utf8(out).unwrap();
/// let last = format!("\n<symbol:x>\n\n<integer:5>\n{}\n", "-".repeat(80));
/// assert!(text.ends_with(&last));
/// assert_eq!(session.errors(), 0);
/// ```
pub struct Session {
    scope:        NodeRef,
    options:      SessionOptions,
    /// Lines of an expression whose brackets are still open.
    pending:      String,
    /// Line number of the first pending line.
    pending_line: usize,
    /// Lines fed so far.
    lines:        usize,
    errors:       usize,
    halted:       bool,
}

impl Session {
    /// Creates a session over a fresh root scope.
    #[must_use]
    pub fn new(options: SessionOptions) -> Self {
        Self { scope: root_scope(),
               options,
               pending: String::new(),
               pending_line: 1,
               lines: 0,
               errors: 0,
               halted: false }
    }

    /// The session's root scope.
    #[must_use]
    pub const fn scope(&self) -> &NodeRef {
        &self.scope
    }

    /// Number of errors reported so far.
    #[must_use]
    pub const fn errors(&self) -> usize {
        self.errors
    }

    /// Binds a host node, typically a command, under its value.
    ///
    /// # Example
    /// ```
    /// use kb::{Session, SessionOptions, interpreter::evaluator::callable::Command};
    ///
    /// let mut session = Session::new(SessionOptions { test_mode: true });
    /// session.register(&Command::new("echo").applies(|argument, _| Ok(argument.clone()))
    ///                                       .into_node());
    ///
    /// let mut out = Vec::new();
    /// session.run("echo:hello", &mut out).unwrap();
    /// assert!(String::from_utf8(out).unwrap().contains("\n\n<symbol:hello>\n"));
    /// ```
    pub fn register(&mut self, node: &NodeRef) {
        debug!("register {node}");
        self.scope.bind_by_value(node);
    }

    /// Feeds one line of input, without its line break.
    ///
    /// # Errors
    /// Only failures writing to `out`; language errors are reported into
    /// `out` and counted.
    pub fn feed_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        if self.halted {
            return Ok(Flow::Halt);
        }

        self.lines += 1;
        if self.pending.is_empty() {
            self.pending_line = self.lines;
        }
        self.pending.push_str(line);
        self.pending.push('\n');

        let source = mem::take(&mut self.pending);
        match parse_program(&source, self.pending_line) {
            Ok(program) => {
                for expression in &program.expressions {
                    self.execute(expression, out)?;
                }
                if program.ended {
                    debug!("halt at line {}", self.lines);
                    self.halted = true;
                    return Ok(Flow::Halt);
                }
            },
            Err(ParseError::UnexpectedEndOfInput { .. }) => {
                debug!("holding {} line(s) for an open bracket", self.lines + 1 - self.pending_line);
                self.pending = source;
            },
            Err(e) => self.report(&e.into(), out)?,
        }

        Ok(Flow::Continue)
    }

    /// Feeds every line of `source`, then [`finish`](Self::finish)es.
    ///
    /// # Errors
    /// Only failures writing to `out`.
    pub fn run(&mut self, source: &str, out: &mut impl Write) -> io::Result<Flow> {
        for line in source.lines() {
            if self.feed_line(line, out)? == Flow::Halt {
                return Ok(Flow::Halt);
            }
        }
        self.finish(out)?;
        Ok(Flow::Continue)
    }

    /// Reports an expression left unfinished at the end of input.
    ///
    /// # Errors
    /// Only failures writing to `out`.
    pub fn finish(&mut self, out: &mut impl Write) -> io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let source = mem::take(&mut self.pending);
        match parse_program(&source, self.pending_line) {
            Err(e) => self.report(&e.into(), out),
            Ok(_) => Ok(()),
        }
    }

    fn execute(&mut self, expression: &NodeRef, out: &mut impl Write) -> io::Result<()> {
        let test_mode = self.options.test_mode;
        writeln!(out, "{}", expression.render(test_mode))?;
        match expression.evaluate(&self.scope) {
            Ok(result) => {
                writeln!(out, "{}", result.render(test_mode))?;
                separator(out)
            },
            Err(e) => self.report(&e.into(), out),
        }
    }

    fn report(&mut self, error: &Error, out: &mut impl Write) -> io::Result<()> {
        warn!("{error}");
        self.errors += 1;
        writeln!(out, "{}: {error}", error.kind())?;
        separator(out)
    }
}

fn separator(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))
}
