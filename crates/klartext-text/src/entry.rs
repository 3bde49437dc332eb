// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Splitting a formatted line into its date token and description.
//
// The split is token-based and guarded by priority: full date, then
// month-year, then bare year. A line matching none of them has no date.

use crate::month::Month;

/// Shape of a recognised date prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateKind {
    /// `DD MMM YYYY`: the second token is a month.
    Full,
    /// `MMM YYYY`: the first token is a month.
    MonthYear,
    /// `YYYY`: the first token is four digits.
    Year,
}

impl DateKind {
    fn token_count(self) -> usize {
        match self {
            Self::Full => 3,
            Self::MonthYear => 2,
            Self::Year => 1,
        }
    }
}

/// The leading date of an entry, as its whitespace-separated tokens rejoined
/// by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateToken {
    pub kind: DateKind,
    pub text: String,
}

/// One formatted output line, split into date and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<'a> {
    pub line: &'a str,
    pub date: Option<DateToken>,
    /// Everything after the date, tokens rejoined by single spaces. When no
    /// date was found this is the whole line.
    pub description: String,
}

type Extractor = fn(&[&str]) -> Option<DateKind>;

/// Tried in order; the first guard that holds wins.
const EXTRACTORS: [Extractor; 3] = [full_date, month_year, year_only];

fn full_date(tokens: &[&str]) -> Option<DateKind> {
    (tokens.len() >= 3 && Month::from_abbrev(tokens[1]).is_some()).then_some(DateKind::Full)
}

fn month_year(tokens: &[&str]) -> Option<DateKind> {
    (tokens.len() >= 2 && Month::from_abbrev(tokens[0]).is_some()).then_some(DateKind::MonthYear)
}

fn year_only(tokens: &[&str]) -> Option<DateKind> {
    let first = tokens.first()?;
    (first.len() == 4 && first.bytes().all(|b| b.is_ascii_digit())).then_some(DateKind::Year)
}

impl<'a> Entry<'a> {
    pub fn parse(line: &'a str) -> Self {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let kind = EXTRACTORS.iter().find_map(|extract| extract(&tokens));

        match kind {
            Some(kind) => {
                let (date, rest) = tokens.split_at(kind.token_count());
                Self {
                    line,
                    date: Some(DateToken {
                        kind,
                        text: date.join(" "),
                    }),
                    description: rest.join(" "),
                }
            }
            None => Self {
                line,
                date: None,
                description: tokens.join(" "),
            },
        }
    }

    /// `date|description`, or `None` for entries without a date, which are
    /// never deduplicated.
    pub fn dedup_key(&self) -> Option<String> {
        self.date
            .as_ref()
            .map(|date| format!("{}|{}", date.text, self.description))
    }
}
