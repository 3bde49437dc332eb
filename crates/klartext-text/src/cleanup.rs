// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Artifact cleanup: the known OCR misrecognitions of the record table.

use crate::month::Month;
use crate::rules::{Replacement, RewriteRule, RuleSet};

/// Build the artifact-cleanup table.
///
/// Order matters: placeholder brackets go before the `=` rules, dashes and
/// `=` runs go before the `NOS(` fix, and whitespace is collapsed last.
pub fn cleanup_rules() -> RuleSet {
    let months = Month::alternation();
    RuleSet::new(vec![
        // "26Jan" -> "26 Jan"
        RewriteRule::new(
            "split-digit-month",
            &format!(r"(\d+)({months})"),
            Replacement::Template("${1} ${2}"),
        ),
        RewriteRule::delete("underscore-tilde", r"[_~]"),
        RewriteRule::delete("placeholder-brackets", r"\[(?:Dj|D|X|Xj)\]"),
        // Only one or two '='; longer runs are left to `equals-run`.
        RewriteRule::delete("equals-placeholder", r"={1,2}\[(?:Xj|X)\]"),
        RewriteRule::delete("dash-run", r"(?:—|-)+\s*"),
        RewriteRule::delete("equals-run", r"=+\s*"),
        RewriteRule::new("nos-paren", r"NOS\s*\(", Replacement::Template("NOS ")),
        RewriteRule::new("collapse-whitespace", r"\s+", Replacement::Template(" ")),
    ])
}

/// Apply `rules` to one line and trim the result.
pub fn clean_description(rules: &RuleSet, line: &str) -> String {
    rules.apply(line).trim().to_string()
}
