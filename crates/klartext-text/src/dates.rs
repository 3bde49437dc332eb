// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Date formatting: `D MMM YYYY` and `MMM YYYY` in any OCR spacing become
// `DD MMM YYYY` and `MMM YYYY`. Bare years need no rewrite.

use regex::Captures;

use crate::month::Month;
use crate::rules::{Replacement, RewriteRule, RuleSet};

/// Build the date table. The full-date rule runs first so its day is padded
/// before the month-year rule sees the same text.
pub fn date_rules() -> RuleSet {
    let months = Month::alternation();
    RuleSet::new(vec![
        RewriteRule::new(
            "full-date",
            &format!(r"(\d{{1,2}})\s*({months})\s*(\d{{4}})"),
            Replacement::Computed(format_full_date),
        ),
        RewriteRule::new(
            "month-year",
            &format!(r"\b({months})\s*(\d{{4}})\b"),
            Replacement::Template("${1} ${2}"),
        ),
    ])
}

/// `5`, `Jan`, `1999` -> `05 Jan 1999`.
fn format_full_date(caps: &Captures<'_>) -> String {
    format!("{:0>2} {} {}", &caps[1], &caps[2], &caps[3])
}

/// Apply `rules` to one line.
pub fn format_date(rules: &RuleSet, line: &str) -> String {
    rules.apply(line)
}
