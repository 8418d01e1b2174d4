//! Selector state machine: query, suggestions, dropdown and validation for one field.
//!
//! The machine is synchronous and owns no timers. Operations that need the
//! outside world return a [`Command`] telling the driver what to do with the
//! field's debounced lookup; lookup completions come back through
//! [`Selector::finish_lookup`], which drops stale responses.

use std::collections::HashSet;

use super::filter::filter_options;
use super::lookup::meets_min_length;

/// Where a selector's options come from.
#[derive(Debug, Clone, Copy)]
pub enum Source {
    /// A fixed list, filtered synchronously on every keystroke.
    Static(&'static [&'static str]),
    /// A remote service, queried through a debounced lookup.
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Empty query, dropdown closed.
    Idle,
    /// Non-empty query, dropdown closed.
    Typing,
    /// Dropdown visible. `loading` is only ever set for remote sources.
    Open { loading: bool },
    /// Query equals the chosen option, dropdown closed.
    Selected,
}

/// Effect requested by the machine for this field's lookup timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Command {
    None,
    /// (Re)arm the debounced lookup.
    ScheduleLookup,
    /// Drop any pending lookup timer.
    CancelLookup,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("\"{value}\" is not in the list, please select an option from the suggestions")]
    NotInList { value: String },
}

#[derive(Debug, Clone)]
pub struct Selector {
    source: Source,
    phase: Phase,
    query: String,
    results: Vec<String>,
    /// Query that `results` were produced for.
    results_for: Option<String>,
    selection: Option<String>,
    highlighted: Option<usize>,
    /// Lowercased entries of every result set installed for this field.
    seen: HashSet<String>,
    error: Option<ValidationError>,
    relevant: bool,
}

impl Selector {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            phase: Phase::Idle,
            query: String::new(),
            results: Vec::new(),
            results_for: None,
            selection: None,
            highlighted: None,
            seen: HashSet::new(),
            error: None,
            relevant: true,
        }
    }

    pub fn new_static(options: &'static [&'static str]) -> Self {
        Self::new(Source::Static(options))
    }

    pub fn new_remote() -> Self {
        Self::new(Source::Remote)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Open { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Open { loading: true })
    }

    fn is_remote(&self) -> bool {
        matches!(self.source, Source::Remote)
    }

    /// Text edited by the user. The query is updated immediately; only the
    /// remote lookup is deferred.
    pub fn input(&mut self, text: impl Into<String>) -> Command {
        self.query = text.into();
        self.error = None;
        self.highlighted = None;
        if self.selection.as_deref() != Some(self.query.as_str()) {
            self.selection = None;
        }

        match self.source {
            Source::Static(options) => {
                self.results = filter_options(&self.query, options)
                    .into_iter()
                    .map(str::to_owned)
                    .collect();
                self.results_for = Some(self.query.clone());
                if self.results.is_empty() {
                    self.settle_closed();
                } else {
                    self.phase = Phase::Open { loading: false };
                }
                Command::None
            }
            Source::Remote => {
                if !meets_min_length(&self.query) {
                    self.results.clear();
                    self.results_for = None;
                    self.settle_closed();
                    return Command::CancelLookup;
                }
                if !self.relevant {
                    self.settle_closed();
                    return Command::None;
                }
                // Previous results stay visible until the new lookup lands.
                self.phase = if self.is_open() {
                    Phase::Open { loading: true }
                } else {
                    Phase::Typing
                };
                Command::ScheduleLookup
            }
        }
    }

    /// The debounced timer fired. Returns the query to look up, or `None` if
    /// no lookup should run. The query is read now, not when the timer was armed.
    pub fn begin_lookup(&mut self) -> Option<String> {
        if !self.is_remote()
            || !self.relevant
            || self.phase == Phase::Selected
            || !meets_min_length(&self.query)
        {
            return None;
        }
        self.phase = Phase::Open { loading: true };
        Some(self.query.clone())
    }

    /// Install the results of a lookup for `query`.
    ///
    /// Returns `false` and leaves the field untouched when the response is
    /// stale: the query changed since the lookup began, the user already
    /// selected an option, or the field is no longer relevant.
    pub fn finish_lookup(&mut self, query: &str, results: Vec<String>) -> bool {
        if !self.is_remote()
            || !self.relevant
            || self.phase == Phase::Selected
            || self.query != query
        {
            return false;
        }

        self.seen
            .extend(results.iter().map(|entry| entry.to_lowercase()));
        self.results = results;
        self.results_for = Some(query.to_owned());
        self.highlighted = None;
        // Open even when empty so the field can show a "no results" hint.
        self.phase = Phase::Open { loading: false };
        true
    }

    /// Choose the option at `index` of the current results.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(option) = self.results.get(index).cloned() else {
            return false;
        };
        self.seen.insert(option.to_lowercase());
        self.query = option.clone();
        self.results_for = Some(option.clone());
        self.selection = Some(option);
        self.highlighted = None;
        self.error = None;
        self.phase = Phase::Selected;
        true
    }

    /// Move the keyboard highlight down, wrapping at the end.
    pub fn highlight_next(&mut self) {
        if !self.is_open() || self.results.is_empty() {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i + 1 < self.results.len() => i + 1,
            _ => 0,
        });
    }

    /// Move the keyboard highlight up, wrapping at the start.
    pub fn highlight_prev(&mut self) {
        if !self.is_open() || self.results.is_empty() {
            return;
        }
        let last = self.results.len() - 1;
        self.highlighted = Some(match self.highlighted {
            Some(0) | None => last,
            Some(i) => i - 1,
        });
    }

    /// Keyboard confirm: select the highlighted option.
    pub fn confirm(&mut self) -> bool {
        match self.highlighted {
            Some(index) if self.is_open() => self.select(index),
            _ => false,
        }
    }

    /// Reopen the dropdown if the current query already has results. Never
    /// fetches; a pending lookup opens the dropdown itself when it lands.
    pub fn focus(&mut self) {
        if !self.relevant || self.query.is_empty() || self.is_open() {
            return;
        }
        if self.is_remote() && !meets_min_length(&self.query) {
            return;
        }
        let current = self.results_for.as_deref() == Some(self.query.as_str());
        if current && !self.results.is_empty() {
            self.phase = Phase::Open { loading: false };
        }
    }

    /// Loss of focus. Validates list membership for remote fields.
    pub fn blur(&mut self) -> Result<(), ValidationError> {
        if self.is_remote() {
            self.validate()
        } else {
            Ok(())
        }
    }

    /// Pointer activity outside the field: close without touching query or selection.
    pub fn click_outside(&mut self) {
        if self.is_open() {
            self.settle_closed();
        }
        self.highlighted = None;
    }

    /// Check the query against every entry this field has ever been offered.
    ///
    /// Static fields and irrelevant fields always pass. Empty and one-character
    /// queries pass too.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        let mismatch = self.is_remote()
            && self.relevant
            && meets_min_length(&self.query)
            && !self.seen.contains(&self.query.to_lowercase());

        if mismatch {
            let error = ValidationError::NotInList {
                value: self.query.clone(),
            };
            self.error = Some(error.clone());
            Err(error)
        } else {
            self.error = None;
            Ok(())
        }
    }

    /// Mark the field as shown or hidden by the embedding form.
    pub fn set_relevant(&mut self, relevant: bool) -> Command {
        if self.relevant == relevant {
            return Command::None;
        }
        self.relevant = relevant;
        if relevant {
            return Command::None;
        }
        self.error = None;
        self.highlighted = None;
        if self.is_open() {
            self.settle_closed();
        }
        Command::CancelLookup
    }

    fn settle_closed(&mut self) {
        self.highlighted = None;
        self.phase = if self.query.is_empty() {
            Phase::Idle
        } else if self.selection.as_deref() == Some(self.query.as_str()) {
            Phase::Selected
        } else {
            Phase::Typing
        };
    }
}
