//! An enumerated calendar month and its fallible parse from a month name.

use std::{fmt::Display, str::FromStr};

use crate::Error;

/// A calendar month, used to select transactions by their month of sale
/// regardless of year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Month {
    /// The first calendar month.
    January,
    /// The second calendar month.
    February,
    /// The third calendar month.
    March,
    /// The fourth calendar month.
    April,
    /// The fifth calendar month.
    May,
    /// The sixth calendar month.
    June,
    /// The seventh calendar month.
    July,
    /// The eighth calendar month.
    August,
    /// The ninth calendar month.
    September,
    /// The tenth calendar month.
    October,
    /// The eleventh calendar month.
    November,
    /// The twelfth calendar month.
    December,
}

impl Month {
    /// The 1-based month number, e.g. 1 for January and 12 for December.
    pub fn number(&self) -> u8 {
        match self {
            Month::January => 1,
            Month::February => 2,
            Month::March => 3,
            Month::April => 4,
            Month::May => 5,
            Month::June => 6,
            Month::July => 7,
            Month::August => 8,
            Month::September => 9,
            Month::October => 10,
            Month::November => 11,
            Month::December => 12,
        }
    }
}

impl FromStr for Month {
    type Err = Error;

    /// Parse a full English month name, ignoring case.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] for anything that is not a month name,
    /// including abbreviations and month numbers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "january" => Ok(Month::January),
            "february" => Ok(Month::February),
            "march" => Ok(Month::March),
            "april" => Ok(Month::April),
            "may" => Ok(Month::May),
            "june" => Ok(Month::June),
            "july" => Ok(Month::July),
            "august" => Ok(Month::August),
            "september" => Ok(Month::September),
            "october" => Ok(Month::October),
            "november" => Ok(Month::November),
            "december" => Ok(Month::December),
            _ => Err(Error::InvalidMonth(s.to_owned())),
        }
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        };

        write!(f, "{name}")
    }
}
