//! Debounced, remote-filtered autocomplete selectors and the profile form built from them.
//!
//! Static selectors (states, associations) filter an in-memory list on every
//! keystroke. The remote selector (schools) debounces keystrokes, queries the
//! universities service, discards responses for superseded queries, and
//! validates that the final text came from the suggestions.

pub mod debounce;
pub mod filter;
pub mod form;
pub mod lookup;
pub mod machine;
pub mod options;
pub mod remote;

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use filter::filter_options;
pub use form::{Field, FormError, Key, PersonType, ProfileForm, ProfileSubmission};
pub use lookup::{MAX_RESULTS, MIN_QUERY_CHARS, RemoteLookup, UniversityLookup};
pub use machine::{Command, Phase, Selector, Source, ValidationError};
pub use remote::{RemoteSelector, SelectorSnapshot};
