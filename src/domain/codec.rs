//! Text file format for family trees.
//!
//! ```text
//! <count>
//! <name>
//! <birth year>
//! <death year, -1 when living>
//! <child count>
//! <child id> <child id> ...
//! <name>
//! ...
//! ```
//!
//! Numeric fields are whitespace-delimited tokens; the rest of their line is
//! ignored. Names take a whole line. Child ids refer to record positions in
//! the same file, so forward references are allowed.

use std::str::FromStr;

use itertools::Itertools;
use tracing::{debug, instrument, warn};

use crate::domain::entities::{death_year_from_raw, Individual, PersonId};
use crate::domain::error::{DomainError, DomainResult};

/// Serialize people in storage order.
#[instrument(level = "debug", skip_all, fields(count = people.len()))]
pub fn encode(people: &[Individual]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", people.len()));
    for person in people {
        let name = person.name().replace(['\n', '\r'], " ");
        out.push_str(&format!(
            "{}\n{}\n{}\n{}\n{}\n",
            name,
            person.birth_year(),
            person.death_year_raw(),
            person.children().len(),
            person.children().iter().join(" "),
        ));
    }
    out
}

/// Parse the file format.
///
/// Child lists are linked only after every record is read. Ids outside
/// `[0, count)` are dropped.
#[instrument(level = "debug", skip_all)]
pub fn decode(input: &str) -> DomainResult<Vec<Individual>> {
    let mut reader = RecordReader::new(input);

    let count: usize = reader.read_field("person count")?;
    debug!("decoding {} records", count);

    let mut people = Vec::new();
    let mut pending_links: Vec<Vec<i64>> = Vec::new();

    for index in 0..count {
        let name = reader.read_line(&format!("name of person #{}", index))?;
        let birth: i32 = reader.read_field(&format!("birth year of person #{}", index))?;
        let death: i32 = reader.read_field(&format!("death year of person #{}", index))?;
        let child_count: usize = reader.read_field(&format!("child count of person #{}", index))?;

        let mut children = Vec::new();
        for _ in 0..child_count {
            children.push(reader.read_token::<i64>(&format!("child id of person #{}", index))?);
        }
        reader.skip_line();

        people.push(Individual::new(name, birth, death_year_from_raw(death)));
        pending_links.push(children);
    }

    for (parent, children) in pending_links.into_iter().enumerate() {
        for child in children {
            match PersonId::try_from(child) {
                Ok(id) if id < count => people[parent].add_child(id),
                _ => warn!(
                    "dropping link from person #{} to out-of-range id {}",
                    parent, child
                ),
            }
        }
    }

    if !reader.is_exhausted() {
        debug!("ignoring trailing content after line {}", reader.line);
    }

    Ok(people)
}

/// Cursor over the input text that tracks the current line.
struct RecordReader<'a> {
    input: &'a str,
    pos: usize,
    /// 1-based line of `pos`
    line: usize,
}

impl<'a> RecordReader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn is_exhausted(&self) -> bool {
        self.rest().trim().is_empty()
    }

    fn advance(&mut self, len: usize) {
        let consumed = &self.input[self.pos..self.pos + len];
        self.line += consumed.matches('\n').count();
        self.pos += len;
    }

    /// Consume through the next newline (or to the end).
    fn skip_line(&mut self) {
        let len = match self.rest().find('\n') {
            Some(i) => i + 1,
            None => self.rest().len(),
        };
        self.advance(len);
    }

    /// Whole next line without its terminator.
    fn read_line(&mut self, expected: &str) -> DomainResult<String> {
        let rest = self.rest();
        if rest.is_empty() {
            return Err(DomainError::UnexpectedEof {
                expected: expected.to_string(),
            });
        }
        let line = match rest.find('\n') {
            Some(i) => &rest[..i],
            None => rest,
        };
        let line = line.strip_suffix('\r').unwrap_or(line).to_string();
        self.skip_line();
        Ok(line)
    }

    /// Next whitespace-delimited token, skipping blank lines.
    fn read_token<T: FromStr>(&mut self, expected: &str) -> DomainResult<T> {
        let rest = self.rest();
        let start = rest.len() - rest.trim_start().len();
        self.advance(start);

        let rest = self.rest();
        if rest.is_empty() {
            return Err(DomainError::UnexpectedEof {
                expected: expected.to_string(),
            });
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = &rest[..end];
        let value = token.parse::<T>().map_err(|_| DomainError::InvalidFormat {
            line: self.line,
            reason: format!("expected {}, found {:?}", expected, token),
        })?;
        self.advance(end);
        Ok(value)
    }

    /// Token followed by discarding the rest of its line.
    fn read_field<T: FromStr>(&mut self, expected: &str) -> DomainResult<T> {
        let value = self.read_token(expected)?;
        self.skip_line();
        Ok(value)
    }
}
