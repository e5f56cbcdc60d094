//! Interactive lookup session.
//!
//! The session is a small state machine driven by [`Session::step`]:
//!
//! ```text
//! CollectPrimary --blank/EOF--> Terminate
//! CollectPrimary --name--> FetchPrimary(name)
//! FetchPrimary   --failure--> CollectPrimary
//! FetchPrimary   --ok--> CollectComparison([country])
//! CollectComparison --blank--> CollectPrimary
//! CollectComparison --EOF--> Terminate
//! CollectComparison --name--> CollectComparison(set + country?)
//! ```
//!
//! Lookup, parse and save failures are printed and skipped; only I/O errors on the
//! session's own input/output end the run early.

use crate::api::CountrySource;
use crate::error::Failure;
use crate::models::{self, Country};
use crate::report;
use crate::stats;
use crate::storage::Store;
use log::warn;
use std::io::{self, BufRead, Write};

pub const PRIMARY_PROMPT: &str = "Country name (blank to quit): ";
pub const COMPARISON_PROMPT: &str = "Compare with (blank for new lookup): ";

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    CollectPrimary,
    FetchPrimary(String),
    /// Countries looked up since the last primary lookup, in lookup order.
    CollectComparison(Vec<Country>),
    Terminate,
}

pub struct Session<S, R, W> {
    source: S,
    store: Store,
    input: R,
    output: W,
    prompts: bool,
}

impl<S, R, W> Session<S, R, W>
where
    S: CountrySource,
    R: BufRead,
    W: Write,
{
    pub fn new(source: S, store: Store, input: R, output: W) -> Self {
        Self {
            source,
            store,
            input,
            output,
            prompts: true,
        }
    }

    /// Turn prompt printing on or off (off for scripted runs).
    pub fn with_prompts(mut self, on: bool) -> Self {
        self.prompts = on;
        self
    }

    /// Run until the user asks to stop or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        let mut state = State::CollectPrimary;
        while state != State::Terminate {
            state = self.step(state)?;
        }
        Ok(())
    }

    /// Perform one transition.
    pub fn step(&mut self, state: State) -> io::Result<State> {
        match state {
            State::CollectPrimary => Ok(match self.read_name(PRIMARY_PROMPT)? {
                Some(name) if !name.is_empty() => State::FetchPrimary(name),
                _ => State::Terminate,
            }),
            State::FetchPrimary(name) => match self.lookup(&name)? {
                Some(country) => {
                    report::write_report(&mut self.output, &country, None)?;
                    self.persist(&country)?;
                    Ok(State::CollectComparison(vec![country]))
                }
                None => Ok(State::CollectPrimary),
            },
            State::CollectComparison(mut set) => {
                let name = match self.read_name(COMPARISON_PROMPT)? {
                    None => return Ok(State::Terminate),
                    Some(name) if name.is_empty() => return Ok(State::CollectPrimary),
                    Some(name) => name,
                };
                if let Some(country) = self.lookup(&name)? {
                    set.push(country);
                    let summary = stats::summarize(&set);
                    if let Some(last) = set.last() {
                        report::write_report(&mut self.output, last, summary.as_ref())?;
                        self.persist(last)?;
                    }
                }
                Ok(State::CollectComparison(set))
            }
            State::Terminate => Ok(State::Terminate),
        }
    }

    /// Prompt and read one trimmed line; `None` at end of input.
    fn read_name(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if self.prompts {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
        }
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Fetch and parse one country, printing a diagnostic on failure.
    fn lookup(&mut self, name: &str) -> io::Result<Option<Country>> {
        let parsed = match self.source.fetch(name) {
            Ok(raw) => models::parse(Some(&raw)).map_err(|e| ("Parse", e)),
            Err(e) => Err(("Fetch", e)),
        };
        match parsed {
            Ok(country) => Ok(Some(country)),
            Err((stage, e)) => {
                self.diagnose(stage, name, &e)?;
                Ok(None)
            }
        }
    }

    fn persist(&mut self, country: &Country) -> io::Result<()> {
        // a failed save keeps the record in the running set
        if let Err(e) = self.store.save(Some(country)) {
            self.diagnose("Save", &country.name, &e)?;
        }
        Ok(())
    }

    fn diagnose(&mut self, stage: &str, name: &str, e: &Failure) -> io::Result<()> {
        warn!("{stage} failed for '{name}' ({:?}): {e}", e.kind());
        writeln!(self.output, "{stage} failed for '{name}': {e}")
    }
}

/// Input text that drives a session through `names` without prompting: the first name
/// is the primary lookup, the rest are comparisons, then a blank line ends the round.
pub fn scripted_input(names: &[String]) -> String {
    let mut s = String::new();
    for n in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        s.push_str(n);
        s.push('\n');
    }
    s.push('\n');
    s
}
