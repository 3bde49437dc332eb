// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// klartext-text: turns raw OCR output of clinical record tables into clean,
// dated, deduplicated lines.
//
// The pipeline is a fixed sequence of regex rule tables (artifact cleanup,
// date formatting, Read-code stripping) applied per line, followed by a
// cross-line dedup keyed on the parsed (date, description) pair. Every stage
// is total: any input yields a string, never an error.

pub mod cleanup;
pub mod codes;
pub mod dates;
pub mod entry;
pub mod month;
pub mod normalizer;
pub mod rules;

use std::sync::LazyLock;

pub use entry::{DateKind, DateToken, Entry};
pub use month::Month;
pub use normalizer::{TextNormalizer, dedup_entries};
pub use rules::{Replacement, RewriteRule, RuleSet};

static DEFAULT_NORMALIZER: LazyLock<TextNormalizer> = LazyLock::new(TextNormalizer::new);

/// Normalize raw OCR text with the built-in rule tables.
///
/// Shorthand for `TextNormalizer::new().process_text(raw)` that reuses one
/// lazily compiled normalizer.
pub fn process_text(raw: &str) -> String {
    DEFAULT_NORMALIZER.process_text(raw)
}
