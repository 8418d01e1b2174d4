//! The profile form: three selectors plus the plain profile fields.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::debounce::Debouncer;
use super::lookup::RemoteLookup;
use super::machine::{Selector, ValidationError};
use super::options::{ASSOCIATIONS, US_STATES};
use super::remote::{RemoteSelector, SelectorSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PersonType {
    Student,
    Retired,
    Employment,
}

impl FromStr for PersonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "retired" => Ok(Self::Retired),
            "employment" => Ok(Self::Employment),
            other => Err(format!("unknown person type: {other}")),
        }
    }
}

/// Fields backed by a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    StateResidence,
    Association,
    School,
}

const FIELDS: [Field; 3] = [Field::StateResidence, Field::Association, Field::School];

/// Keyboard interaction inside an open dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Down,
    Up,
    Enter,
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("school: {0}")]
    School(#[from] ValidationError),
    #[error("years resident must be a whole number, got \"{0}\"")]
    InvalidYearsResident(String),
}

/// A validated profile, ready for the bank-linking step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfileSubmission {
    pub state_residence: Option<String>,
    pub years_resident: Option<u16>,
    pub association: Option<String>,
    pub person_type: Option<PersonType>,
    pub school: Option<String>,
    pub employer: Option<String>,
    pub faith: Option<String>,
}

pub struct ProfileForm {
    state_residence: Selector,
    association: Selector,
    school: RemoteSelector,
    years_resident: String,
    person_type: Option<PersonType>,
    employer: String,
    faith: String,
}

impl ProfileForm {
    pub fn new(school_lookup: Arc<dyn RemoteLookup>) -> Self {
        Self::with_debouncer(school_lookup, Debouncer::default())
    }

    pub fn with_debouncer(school_lookup: Arc<dyn RemoteLookup>, debouncer: Debouncer) -> Self {
        let school = RemoteSelector::new(school_lookup, debouncer);
        // Hidden until the person type is "student".
        school.set_relevant(false);
        Self {
            state_residence: Selector::new_static(US_STATES),
            association: Selector::new_static(ASSOCIATIONS),
            school,
            years_resident: String::new(),
            person_type: None,
            employer: String::new(),
            faith: String::new(),
        }
    }

    pub fn state_residence(&self) -> &Selector {
        &self.state_residence
    }

    pub fn association(&self) -> &Selector {
        &self.association
    }

    pub fn school(&self) -> SelectorSnapshot {
        self.school.snapshot()
    }

    pub fn person_type(&self) -> Option<PersonType> {
        self.person_type
    }

    pub fn input(&mut self, field: Field, text: impl Into<String>) {
        match field {
            Field::StateResidence => {
                let _ = self.state_residence.input(text);
            }
            Field::Association => {
                let _ = self.association.input(text);
            }
            Field::School => self.school.input(text),
        }
    }

    pub fn set_years_resident(&mut self, text: impl Into<String>) {
        self.years_resident = text.into();
    }

    pub fn set_employer(&mut self, text: impl Into<String>) {
        self.employer = text.into();
    }

    pub fn set_faith(&mut self, text: impl Into<String>) {
        self.faith = text.into();
    }

    /// The school field only matters for students; switching away cancels its lookup.
    pub fn set_person_type(&mut self, person_type: Option<PersonType>) {
        self.person_type = person_type;
        self.school
            .set_relevant(person_type == Some(PersonType::Student));
    }

    pub fn select(&mut self, field: Field, index: usize) -> bool {
        match field {
            Field::StateResidence => self.state_residence.select(index),
            Field::Association => self.association.select(index),
            Field::School => self.school.select(index),
        }
    }

    /// Returns `true` when the key selected an option.
    pub fn key(&mut self, field: Field, key: Key) -> bool {
        if field == Field::School {
            return match key {
                Key::Down => {
                    self.school.highlight_next();
                    false
                }
                Key::Up => {
                    self.school.highlight_prev();
                    false
                }
                Key::Enter => self.school.confirm(),
                Key::Escape => {
                    self.school.click_outside();
                    false
                }
            };
        }

        let Some(selector) = self.local_mut(field) else {
            return false;
        };
        match key {
            Key::Down => selector.highlight_next(),
            Key::Up => selector.highlight_prev(),
            Key::Enter => return selector.confirm(),
            Key::Escape => selector.click_outside(),
        }
        false
    }

    pub fn focus(&mut self, field: Field) {
        match field {
            Field::School => self.school.focus(),
            _ => {
                if let Some(selector) = self.local_mut(field) {
                    selector.focus();
                }
            }
        }
    }

    pub fn blur(&mut self, field: Field) -> Result<(), ValidationError> {
        match field {
            Field::School => self.school.blur(),
            _ => self.local_mut(field).map_or(Ok(()), Selector::blur),
        }
    }

    /// Pointer pressed somewhere on the page; `target` is the field containing
    /// the pointer, if any. Every other dropdown closes.
    pub fn pointer_down(&mut self, target: Option<Field>) {
        for field in FIELDS {
            if Some(field) == target {
                continue;
            }
            match field {
                Field::School => self.school.click_outside(),
                _ => {
                    if let Some(selector) = self.local_mut(field) {
                        selector.click_outside();
                    }
                }
            }
        }
    }

    /// Validate and collect the profile. The school must come from the
    /// suggestion list when the person is a student.
    pub fn submit(&mut self) -> Result<ProfileSubmission, FormError> {
        let is_student = self.person_type == Some(PersonType::Student);
        if is_student {
            self.school.validate()?;
        }

        let years_resident = match self.years_resident.trim() {
            "" => None,
            raw => Some(
                raw.parse::<u16>()
                    .map_err(|_| FormError::InvalidYearsResident(raw.to_owned()))?,
            ),
        };

        Ok(ProfileSubmission {
            state_residence: non_empty(self.state_residence.query()),
            years_resident,
            association: non_empty(self.association.query()),
            person_type: self.person_type,
            school: if is_student {
                non_empty(&self.school.query())
            } else {
                None
            },
            employer: if self.person_type == Some(PersonType::Employment) {
                non_empty(&self.employer)
            } else {
                None
            },
            faith: non_empty(&self.faith),
        })
    }

    /// Cancel pending timers, as when the page unmounts.
    pub fn teardown(&self) {
        self.school.teardown();
    }

    fn local_mut(&mut self, field: Field) -> Option<&mut Selector> {
        match field {
            Field::StateResidence => Some(&mut self.state_residence),
            Field::Association => Some(&mut self.association),
            Field::School => None,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
