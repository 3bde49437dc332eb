// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Read-code stripping.
//
// Codes sit at the end of a record line, usually bracketed: `(XE123)`,
// `(A55.)`, sometimes with a lost or doubled paren (`X407Z))`), sometimes bare
// (`M1612`, `7F19.`). Each deletion is anchored to end-of-line and runs once;
// a later rule may match only because an earlier one shortened the line.
// The cascade is not repeated to a fixed point.

use crate::rules::{Replacement, RewriteRule, RuleSet};

/// Build the code-stripping table, starting with the `¥` -> `Y` repair.
pub fn code_rules() -> RuleSet {
    RuleSet::new(vec![
        // OCR reads a leading 'Y' of some codes as the Yen sign.
        RewriteRule::new("yen-to-y", "¥", Replacement::Template("Y")),
        // (XE123), (A55.), (X407Z))
        RewriteRule::delete("paren-code", r"\s*\([A-Z0-9._]+\)+\s*$"),
        // X407Z))
        RewriteRule::delete("bare-code-closing-paren", r"\s+[A-Z][A-Z0-9._]+\)+\s*$"),
        // M1612
        RewriteRule::delete("bare-code", r"\s+[A-Z][A-Z0-9._]+\s*$"),
        // 7F19.
        RewriteRule::delete("digit-dot-code", r"\s+[0-9][A-Z0-9]+\.[0-9]*\s*$"),
        RewriteRule::delete("trailing-punctuation", r"\s*[.()]+\s*$"),
    ])
}

/// Apply `rules` to one line and trim the result.
pub fn remove_read_codes(rules: &RuleSet, line: &str) -> String {
    rules.apply(line).trim().to_string()
}
