//! Static option lists backing the local selectors.

/// US states, alphabetical.
pub const US_STATES: &[&str] = &[
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

/// Large employers offered as suggestions.
pub const COMPANIES: &[&str] = &[
    "Apple Inc.",
    "Microsoft Corporation",
    "Amazon.com Inc.",
    "Alphabet Inc. (Google)",
    "Meta Platforms Inc. (Facebook)",
    "Tesla Inc.",
    "JPMorgan Chase & Co.",
    "Bank of America Corp.",
    "Wells Fargo & Company",
    "Goldman Sachs Group Inc.",
    "Morgan Stanley",
    "Citigroup Inc.",
    "Johnson & Johnson",
    "Procter & Gamble Co.",
    "Walmart Inc.",
    "The Coca-Cola Company",
    "PepsiCo Inc.",
    "Intel Corporation",
    "IBM Corporation",
    "Oracle Corporation",
    "Cisco Systems Inc.",
    "NVIDIA Corporation",
    "Netflix Inc.",
    "The Walt Disney Company",
    "Verizon Communications Inc.",
    "AT&T Inc.",
    "General Electric Company",
    "Boeing Company",
    "General Motors Company",
    "Ford Motor Company",
];

/// Professional associations and clubs.
///
/// Abbreviations are not unique ("AMA", "APA" appear twice).
pub const ASSOCIATIONS: &[&str] = &[
    "American Medical Association (AMA)",
    "American Bar Association (ABA)",
    "National Education Association (NEA)",
    "American Nurses Association (ANA)",
    "American Psychological Association (APA)",
    "American Dental Association (ADA)",
    "American Institute of Certified Public Accountants (AICPA)",
    "National Association of Realtors (NAR)",
    "American Society of Civil Engineers (ASCE)",
    "Institute of Electrical and Electronics Engineers (IEEE)",
    "American Chemical Society (ACS)",
    "American Association for the Advancement of Science (AAAS)",
    "American Library Association (ALA)",
    "National Association of Social Workers (NASW)",
    "American Marketing Association (AMA)",
    "Project Management Institute (PMI)",
    "Society for Human Resource Management (SHRM)",
    "American Society of Mechanical Engineers (ASME)",
    "American Planning Association (APA)",
    "National Association of Home Builders (NAHB)",
];

/// Named option lists, as exposed over the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionList {
    States,
    Associations,
    Companies,
}

impl OptionList {
    /// Resolve a list from its URL slug.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "states" => Some(Self::States),
            "associations" => Some(Self::Associations),
            "companies" => Some(Self::Companies),
            _ => None,
        }
    }

    pub fn entries(self) -> &'static [&'static str] {
        match self {
            Self::States => US_STATES,
            Self::Associations => ASSOCIATIONS,
            Self::Companies => COMPANIES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifty_states() {
        assert_eq!(US_STATES.len(), 50);
    }

    #[test]
    fn slugs_resolve() {
        assert_eq!(OptionList::from_slug("states"), Some(OptionList::States));
        assert_eq!(OptionList::from_slug("companies").map(|l| l.entries().len()), Some(30));
        assert_eq!(OptionList::from_slug("universities"), None);
    }
}
