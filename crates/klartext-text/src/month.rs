// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The fixed English month-abbreviation set used for date recognition,
// formatting, and (date, description) splitting.

/// A calendar month, written as its three-letter English abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn abbrev(&self) -> &'static str {
        match self {
            Self::Jan => "Jan",
            Self::Feb => "Feb",
            Self::Mar => "Mar",
            Self::Apr => "Apr",
            Self::May => "May",
            Self::Jun => "Jun",
            Self::Jul => "Jul",
            Self::Aug => "Aug",
            Self::Sep => "Sep",
            Self::Oct => "Oct",
            Self::Nov => "Nov",
            Self::Dec => "Dec",
        }
    }

    /// Exact, case-sensitive lookup (`"Jan"` matches, `"JAN"` and `"January"` do not).
    pub fn from_abbrev(token: &str) -> Option<Month> {
        Self::ALL.into_iter().find(|m| m.abbrev() == token)
    }

    /// Regex alternation of every abbreviation: `Jan|Feb|...|Dec`.
    pub fn alternation() -> String {
        Self::ALL
            .iter()
            .map(Month::abbrev)
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbrev())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact() {
        assert_eq!(Month::from_abbrev("Sep"), Some(Month::Sep));
        assert_eq!(Month::from_abbrev("sep"), None);
        assert_eq!(Month::from_abbrev("Sept"), None);
        assert_eq!(Month::from_abbrev(""), None);
    }

    #[test]
    fn alternation_lists_all_months_in_order() {
        let alt = Month::alternation();
        assert_eq!(alt, "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec");
    }
}
