//! Version script parser
//!
//! A six-state machine walks the text with an explicit cursor:
//!
//! ```text
//! Name -> Opening -> Element <-> ElementCloser
//!                    Element -> Previous -> PreviousCloser -> Name
//!                               Previous -> Name
//! ```
//!
//! Blanks and `#` comments are skipped between tokens. Fatal problems stop the
//! parse with a `ParserError`; duplicate release names and symbols without a
//! scope are reported to the sink as warnings and parsing goes on.

use crate::core::diagnostics::{Diagnostic, DiagnosticSink, Level, Position, write_caret};
use crate::script::model::{GLOBAL, Map, Release, WILDCARD};
use std::fmt;

/// Fatal syntax error with the offending source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserError {
  pub filename: Option<String>,
  /// The line where the error was detected
  pub context: String,
  /// Zero-based line index
  pub line: usize,
  /// Zero-based column index
  pub column: usize,
  pub message: String,
}

impl fmt::Display for ParserError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "In file {}, line {}, column {}: {}",
      self.filename.as_deref().unwrap_or("<input>"),
      self.line + 1,
      self.column,
      self.message
    )?;
    write_caret(f, &self.context, self.column)
  }
}

impl std::error::Error for ParserError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
  Name,
  Opening,
  Element,
  ElementCloser,
  Previous,
  PreviousCloser,
}

impl State {
  fn trace(self) -> &'static str {
    match self {
      State::Name => ">>Name",
      State::Opening => ">>Opening",
      State::Element => ">>Element",
      State::ElementCloser => ">>Element closer",
      State::Previous => ">>Previous",
      State::PreviousCloser => ">>Previous closer",
    }
  }
}

/// Character cursor over the source lines
struct Cursor {
  lines: Vec<Vec<char>>,
  line: usize,
  column: usize,
}

impl Cursor {
  fn new(lines: &[String]) -> Self {
    Self {
      lines: lines.iter().map(|l| l.chars().collect()).collect(),
      line: 0,
      column: 0,
    }
  }

  fn position(&self) -> Position {
    Position::new(self.line, self.column)
  }

  fn peek(&self) -> Option<char> {
    self.lines.get(self.line).and_then(|l| l.get(self.column)).copied()
  }

  /// Skip whitespace, line ends and comments; false at end of input
  fn skip_blank(&mut self) -> bool {
    while let Some(line) = self.lines.get(self.line) {
      match line.get(self.column) {
        None => {
          self.line += 1;
          self.column = 0;
        }
        Some(c) if c.is_whitespace() => self.column += 1,
        Some('#') => self.column = line.len(),
        Some(_) => return true,
      }
    }
    false
  }

  /// Consume `\w+` on the current line
  fn word(&mut self) -> Option<String> {
    let line = self.lines.get(self.line)?;
    let start = self.column;
    let end = line[start..]
      .iter()
      .position(|c| !is_word_char(*c))
      .map_or(line.len(), |n| start + n);
    if end == start {
      return None;
    }
    self.column = end;
    Some(line[start..end].iter().collect())
  }

  fn eat(&mut self, expected: char) -> bool {
    if self.peek() == Some(expected) {
      self.column += 1;
      true
    } else {
      false
    }
  }

  /// `#`, blanks, then `released` (any case) on the rest of the current line
  fn eat_released_marker(&mut self) -> bool {
    let Some(line) = self.lines.get(self.line) else {
      return false;
    };
    let rest: String = line[self.column..].iter().collect();
    let Some(after_hash) = rest.trim_start().strip_prefix('#') else {
      return false;
    };
    let tail = after_hash.trim_start();
    let marked = tail.len() >= 8 && tail.is_char_boundary(8) && tail[..8].eq_ignore_ascii_case("released");
    if marked {
      self.column = line.len();
    }
    marked
  }
}

pub(crate) fn is_word_char(c: char) -> bool {
  c.is_alphanumeric() || c == '_'
}

struct Parser<'a> {
  cursor: Cursor,
  source: &'a [String],
  filename: Option<&'a str>,
  sink: &'a mut dyn DiagnosticSink,
}

impl Parser<'_> {
  fn error_at(&self, position: Position, message: impl Into<String>) -> ParserError {
    ParserError {
      filename: self.filename.map(str::to_string),
      context: self.source.get(position.line).cloned().unwrap_or_default(),
      line: position.line,
      column: position.column,
      message: message.into(),
    }
  }

  fn error(&self, message: impl Into<String>) -> ParserError {
    self.error_at(self.cursor.position(), message)
  }

  fn warn_at(&mut self, position: Position, message: String) {
    let context = self.source.get(position.line).cloned().unwrap_or_default();
    self
      .sink
      .emit(Diagnostic::new(Level::Warning, message).at(position, context));
  }

  fn run(mut self) -> Result<Vec<Release>, ParserError> {
    let mut releases: Vec<Release> = Vec::new();
    let mut state = State::Name;
    // Release under construction, its open scope and the pending identifier
    let mut current: Option<Release> = None;
    let mut scope: Option<String> = None;
    let mut pending = String::new();
    let mut pending_at = Position::default();
    let mut last = Position::default();

    loop {
      if !self.cursor.skip_blank() {
        break;
      }
      self.sink.debug(state.trace());

      match state {
        State::Name => {
          let Some(name) = self.cursor.word() else {
            return Err(self.error("Invalid Release identifier"));
          };
          if releases.iter().any(|r| r.name == name) {
            let position = self.cursor.position();
            self.warn_at(position, format!("Duplicated Release identifier '{}'", name));
          }
          let mut release = Release::new(name);
          release.released = self.cursor.eat_released_marker();
          current = Some(release);
          scope = None;
          state = State::Opening;
        }
        State::Opening => {
          if !self.cursor.eat('{') {
            return Err(self.error("Missing '{'"));
          }
          state = State::Element;
        }
        State::Element => {
          if self.cursor.eat('}') {
            self.sink.debug(">>Closer, jump to Previous");
            state = State::Previous;
            continue;
          }
          pending_at = self.cursor.position();
          pending = if self.cursor.eat('*') {
            WILDCARD.to_string()
          } else {
            match self.cursor.word() {
              Some(word) => word,
              None => return Err(self.error("Invalid identifier")),
            }
          };
          state = State::ElementCloser;
        }
        State::ElementCloser => {
          let Some(release) = current.as_mut() else {
            return Err(self.error("Unexpected character"));
          };
          if self.cursor.eat(':') {
            if pending == WILDCARD {
              return Err(self.error_at(pending_at, "Invalid identifier"));
            }
            release.scope_mut(&pending);
            scope = Some(std::mem::take(&mut pending));
          } else if self.cursor.eat(';') {
            let target = match scope.as_deref() {
              Some(s) => s.to_string(),
              None => {
                let message = format!(
                  "Missing visibility scope before '{}'. Symbols considered in 'global:'",
                  pending
                );
                scope = Some(GLOBAL.to_string());
                self.warn_at(pending_at, message);
                GLOBAL.to_string()
              }
            };
            release.scope_mut(&target).push(std::mem::take(&mut pending));
          } else {
            return Err(self.error(format!("Missing ';' or ':' after '{}'", pending)));
          }
          state = State::Element;
        }
        State::Previous => {
          if self.cursor.eat(';') {
            self.sink.debug(">>Empty previous");
            releases.extend(current.take());
            state = State::Name;
            continue;
          }
          match self.cursor.word() {
            Some(word) => pending = word,
            None => return Err(self.error("Invalid identifier")),
          }
          last = self.cursor.position();
          state = State::PreviousCloser;
        }
        State::PreviousCloser => {
          if !self.cursor.eat(';') {
            let message = if self.cursor.line == last.line {
              "Unexpected character"
            } else {
              "Missing ';'"
            };
            return Err(self.error(message));
          }
          if let Some(mut release) = current.take() {
            release.previous = Some(std::mem::take(&mut pending));
            releases.push(release);
          }
          state = State::Name;
        }
      }
    }

    if let Some(release) = current {
      let line = self.source.len().saturating_sub(1);
      let column = self.source.last().map_or(0, |l| l.chars().count());
      return Err(self.error_at(
        Position::new(line, column),
        format!("Unexpected end of input while parsing release '{}'", release.name),
      ));
    }

    Ok(releases)
  }
}

impl Map {
  /// Parse version script text
  ///
  /// The returned map is not checked yet.
  pub fn parse(text: &str, filename: Option<&str>, sink: &mut dyn DiagnosticSink) -> Result<Map, ParserError> {
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    let releases = Parser {
      cursor: Cursor::new(&lines),
      source: &lines,
      filename,
      sink,
    }
    .run()?;
    Ok(Map::from_parts(releases, lines, filename.map(str::to_string)))
  }
}
