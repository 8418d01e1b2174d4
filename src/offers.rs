//! Static refinancing offers from partner credit unions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

const APPLY_SEARCH_URL: &str = "https://www.google.com/search?q=";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum LoanKind {
    Card,
    Personal,
    Home,
}

impl LoanKind {
    pub const ALL: [LoanKind; 3] = [LoanKind::Card, LoanKind::Personal, LoanKind::Home];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Personal => "personal",
            Self::Home => "home",
        }
    }
}

impl fmt::Display for LoanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown loan kind '{0}'")]
pub struct UnknownLoanKind(pub String);

impl FromStr for LoanKind {
    type Err = UnknownLoanKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "personal" => Ok(Self::Personal),
            "home" => Ok(Self::Home),
            other => Err(UnknownLoanKind(other.to_owned())),
        }
    }
}

/// One credit union's refinancing terms for a loan kind.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreditUnionOffer {
    pub name: String,
    /// Annual percentage rate.
    pub interest_rate: f64,
    pub monthly_payment: u32,
    /// Estimated savings per year, in dollars.
    pub total_savings: u32,
    pub apply_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LoanOption {
    #[serde(rename = "type")]
    pub kind: LoanKind,
    pub title: String,
    pub current_rate: f64,
    pub new_rate: f64,
    pub savings_per_year: u32,
    pub credit_unions: Vec<CreditUnionOffer>,
}

struct OfferRow(&'static str, f64, u32, u32);

struct LoanRow {
    kind: LoanKind,
    title: &'static str,
    current_rate: f64,
    new_rate: f64,
    savings_per_year: u32,
    offers: [OfferRow; 5],
}

const LOANS: [LoanRow; 3] = [
    LoanRow {
        kind: LoanKind::Card,
        title: "Credit Card Loan",
        current_rate: 24.99,
        new_rate: 12.5,
        savings_per_year: 1250,
        offers: [
            OfferRow("First Federal Credit Union", 12.5, 450, 1250),
            OfferRow("Community Credit Union", 13.2, 465, 1180),
            OfferRow("State Employees Credit Union", 11.9, 440, 1310),
            OfferRow("Teachers Credit Union", 12.8, 455, 1220),
            OfferRow("Navy Federal Credit Union", 11.5, 435, 1350),
        ],
    },
    LoanRow {
        kind: LoanKind::Personal,
        title: "Personal Loan",
        current_rate: 18.5,
        new_rate: 8.9,
        savings_per_year: 1920,
        offers: [
            OfferRow("First Federal Credit Union", 8.9, 320, 1920),
            OfferRow("Community Credit Union", 9.5, 335, 1800),
            OfferRow("State Employees Credit Union", 8.5, 315, 1980),
            OfferRow("Teachers Credit Union", 9.2, 330, 1860),
            OfferRow("Navy Federal Credit Union", 8.2, 310, 2040),
        ],
    },
    LoanRow {
        kind: LoanKind::Home,
        title: "Home Loan",
        current_rate: 7.5,
        new_rate: 5.8,
        savings_per_year: 3400,
        offers: [
            OfferRow("First Federal Credit Union", 5.8, 1875, 3400),
            OfferRow("Community Credit Union", 6.1, 1920, 3120),
            OfferRow("State Employees Credit Union", 5.6, 1850, 3600),
            OfferRow("Teachers Credit Union", 5.9, 1890, 3360),
            OfferRow("Navy Federal Credit Union", 5.5, 1835, 3700),
        ],
    },
];

/// Search link used as the "apply" target for a credit union.
pub fn apply_url(credit_union: &str) -> String {
    let query = format!("{credit_union} apply loan");
    format!("{APPLY_SEARCH_URL}{}", urlencoding::encode(&query))
}

impl From<&LoanRow> for LoanOption {
    fn from(row: &LoanRow) -> Self {
        Self {
            kind: row.kind,
            title: row.title.to_owned(),
            current_rate: row.current_rate,
            new_rate: row.new_rate,
            savings_per_year: row.savings_per_year,
            credit_unions: row
                .offers
                .iter()
                .map(|OfferRow(name, rate, monthly, savings)| CreditUnionOffer {
                    name: (*name).to_owned(),
                    interest_rate: *rate,
                    monthly_payment: *monthly,
                    total_savings: *savings,
                    apply_url: apply_url(name),
                })
                .collect(),
        }
    }
}

/// Every loan option, in display order.
pub fn loan_options() -> Vec<LoanOption> {
    LOANS.iter().map(LoanOption::from).collect()
}

pub fn loan_option(kind: LoanKind) -> LoanOption {
    let row = match kind {
        LoanKind::Card => &LOANS[0],
        LoanKind::Personal => &LOANS[1],
        LoanKind::Home => &LOANS[2],
    };
    LoanOption::from(row)
}
