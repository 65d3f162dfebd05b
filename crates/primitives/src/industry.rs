//! Industry classification derived from SIC codes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the eleven SIC division labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Industry {
    /// SIC 0001-0999.
    Agriculture,
    /// SIC 1000-1499.
    Mining,
    /// SIC 1500-1799.
    Construction,
    /// SIC 2000-3999.
    Manufacturing,
    /// SIC 4000-4999.
    Transportation,
    /// SIC 5000-5199.
    WholesaleTrade,
    /// SIC 5200-5999.
    RetailTrade,
    /// SIC 6000-6799.
    Finance,
    /// SIC 7000-8999.
    Services,
    /// SIC 9000-9999.
    PublicAdministration,
    /// Anything unclassified, including non-numeric codes.
    Other,
}

impl Industry {
    /// Every label, in SIC order.
    pub const ALL: [Self; 11] = [
        Self::Agriculture,
        Self::Mining,
        Self::Construction,
        Self::Manufacturing,
        Self::Transportation,
        Self::WholesaleTrade,
        Self::RetailTrade,
        Self::Finance,
        Self::Services,
        Self::PublicAdministration,
        Self::Other,
    ];

    /// Classify a raw SIC code string.
    ///
    /// Only strings made entirely of ASCII digits are classified; everything
    /// else is [`Industry::Other`].
    #[must_use]
    pub fn from_sic(code: &str) -> Self {
        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Other;
        }
        code.parse::<u32>().map_or(Self::Other, Self::from_sic_number)
    }

    /// Classify a numeric SIC code.
    #[must_use]
    pub const fn from_sic_number(sic: u32) -> Self {
        match sic {
            1..=999 => Self::Agriculture,
            1000..=1499 => Self::Mining,
            1500..=1799 => Self::Construction,
            2000..=3999 => Self::Manufacturing,
            4000..=4999 => Self::Transportation,
            5000..=5199 => Self::WholesaleTrade,
            5200..=5999 => Self::RetailTrade,
            6000..=6799 => Self::Finance,
            7000..=8999 => Self::Services,
            9000..=9999 => Self::PublicAdministration,
            _ => Self::Other,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Agriculture => "Agriculture, Forestry and Fishing",
            Self::Mining => "Mining",
            Self::Construction => "Construction",
            Self::Manufacturing => "Manufacturing",
            Self::Transportation => "Transportation and other Utilities",
            Self::WholesaleTrade => "Wholesale Trade",
            Self::RetailTrade => "Retail Trade",
            Self::Finance => "Finance, Insurance and Real Estate",
            Self::Services => "Services",
            Self::PublicAdministration => "Public Administration",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Industry {
    type Err = std::convert::Infallible;

    /// Parses either a label or a raw SIC code. Never fails; unknown input is
    /// [`Industry::Other`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(Self::ALL.into_iter().find(|i| i.label() == s).unwrap_or_else(|| Self::from_sic(s)))
    }
}
