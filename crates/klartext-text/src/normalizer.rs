// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raw OCR text -> clean, deduplicated record lines.
//
// Per line: artifact cleanup, date formatting, code stripping. Then one
// cross-line dedup pass keyed on the parsed (date, description) pair.
// Normalization never fails; unexpected input just yields fewer lines.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::cleanup::{self, cleanup_rules};
use crate::codes::{self, code_rules};
use crate::dates::{self, date_rules};
use crate::entry::Entry;
use crate::rules::RuleSet;

const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// The compiled rule tables for the three per-line stages.
///
/// Holds no state between calls; one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    cleanup: RuleSet,
    dates: RuleSet,
    codes: RuleSet,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    // -- Construction -------------------------------------------------------

    /// Compile the built-in tables.
    pub fn new() -> Self {
        Self::with_rules(cleanup_rules(), date_rules(), code_rules())
    }

    /// Use custom tables for each stage.
    pub fn with_rules(cleanup: RuleSet, dates: RuleSet, codes: RuleSet) -> Self {
        Self {
            cleanup,
            dates,
            codes,
        }
    }

    // -- Stages -------------------------------------------------------------

    pub fn clean_description(&self, line: &str) -> String {
        cleanup::clean_description(&self.cleanup, line)
    }

    pub fn format_date(&self, line: &str) -> String {
        dates::format_date(&self.dates, line)
    }

    pub fn remove_read_codes(&self, line: &str) -> String {
        codes::remove_read_codes(&self.codes, line)
    }

    /// Run one raw line through cleanup, dates and codes. `None` when the
    /// line is blank to begin with or nothing is left after stripping.
    pub fn normalize_line(&self, line: &str) -> Option<String> {
        if line.trim().is_empty() {
            return None;
        }
        let cleaned = self.clean_description(line);
        let dated = self.format_date(&cleaned);
        let stripped = self.remove_read_codes(&dated);
        (!stripped.is_empty()).then_some(stripped)
    }

    // -- Pipeline -----------------------------------------------------------

    /// Normalize a whole OCR dump into newline-joined entries.
    #[instrument(level = "debug", skip_all, fields(bytes = raw.len()))]
    pub fn process_text(&self, raw: &str) -> String {
        let text = raw.replace(ZERO_WIDTH_SPACE, " ");

        let mut raw_lines = 0usize;
        let formatted: Vec<String> = text
            .split('\n')
            .inspect(|_| raw_lines += 1)
            .filter_map(|line| self.normalize_line(line))
            .collect();

        let formatted_count = formatted.len();
        let entries = dedup_entries(formatted);

        debug!(
            raw_lines,
            formatted = formatted_count,
            kept = entries.len(),
            "normalized OCR text"
        );

        entries.join("\n")
    }
}

/// Drop later entries whose `date|description` key was already seen.
///
/// Entries without a recognisable date are always kept. Order of first
/// occurrence is preserved.
pub fn dedup_entries(entries: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    entries
        .into_iter()
        .filter(|line| match Entry::parse(line).dedup_key() {
            Some(key) => seen.insert(key),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(raw: &str) -> String {
        TextNormalizer::new().process_text(raw)
    }

    #[test]
    fn two_noisy_lines_collapse_to_one_entry() {
        let raw = "26Jan1999 Chest X-ray NOS(=[X] (XE123)\n\
                   26 Jan 1999 Chest X-ray NOS (X407Z))";
        assert_eq!(process(raw), "26 Jan 1999 Chest Xray");
    }

    #[test]
    fn no_date_line_is_kept() {
        assert_eq!(process("Random OCR noise ===[X]"), "Random OCR noise");
    }

    #[test]
    fn same_entry_with_different_codes_is_deduplicated() {
        let raw = "05 Jan 1999 Blood test (XE123)\n05 Jan 1999 Blood test (X999Z))";
        assert_eq!(process(raw), "05 Jan 1999 Blood test");
    }

    #[test]
    fn zero_width_space_becomes_space() {
        let out = process("05 Jan 1999\u{200B}Asthma\u{200B}\u{200B}review");
        assert_eq!(out, "05 Jan 1999 Asthma review");
        assert!(!out.contains(ZERO_WIDTH_SPACE));
    }

    #[test]
    fn single_digit_day_is_padded() {
        assert_eq!(process("5 Jan 1999 Asthma review"), "05 Jan 1999 Asthma review");
    }

    #[test]
    fn blank_and_code_only_lines_are_dropped() {
        let raw = "\n   \n05 Jan 1999 Asthma\n(XE123)\n\t\n";
        assert_eq!(process(raw), "05 Jan 1999 Asthma");
    }

    #[test]
    fn date_only_entries_dedup_on_empty_description() {
        let raw = "05 Jan 1999 (XE123)\n05 Jan 1999 (A55.)";
        assert_eq!(process(raw), "05 Jan 1999");
    }

    #[test]
    fn first_occurrence_order_is_preserved() {
        let raw = "03 Feb 2001 Flu vaccine\n\
                   05 Jan 1999 Asthma\n\
                   03 Feb 2001 Flu vaccine (65ED.)\n\
                   1975 Appendicectomy";
        assert_eq!(
            process(raw),
            "03 Feb 2001 Flu vaccine\n05 Jan 1999 Asthma\n1975 Appendicectomy"
        );
    }

    #[test]
    fn crlf_input() {
        let raw = "05 Jan 1999 Asthma\r\n\r\n1975 Appendicectomy\r\n";
        assert_eq!(process(raw), "05 Jan 1999 Asthma\n1975 Appendicectomy");
    }

    #[test]
    fn empty_input() {
        assert_eq!(process(""), "");
        assert_eq!(process("\n\n  \u{200B}\n"), "");
    }

    #[test]
    fn month_year_entry() {
        assert_eq!(process("Oct1999 Flu vaccine (65ED.)"), "Oct 1999 Flu vaccine");
    }

    #[test]
    fn undated_duplicates_are_both_kept() {
        let raw = "Seen by nurse\nSeen by nurse";
        assert_eq!(process(raw), "Seen by nurse\nSeen by nurse");
    }

    #[test]
    fn output_is_stable_under_reprocessing() {
        let raw = "26Jan1999 Chest X-ray NOS(=[X] (XE123)\n\
                   5 Jan 1999 Blood test (X999Z))\n\
                   Oct1999 Flu vaccine\n\
                   Random OCR noise ===[X]";
        let once = process(raw);
        assert_eq!(process(&once), once);
    }

    #[test]
    fn trailing_capitals_lose_one_token_per_pass() {
        let once = process("Seen HIV CLINIC");
        assert_eq!(once, "Seen HIV");
        assert_eq!(process(&once), "Seen");
    }

    #[test]
    fn normalize_line_reports_empty_results() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize_line("   "), None);
        assert_eq!(normalizer.normalize_line("(XE123)"), None);
        assert_eq!(
            normalizer.normalize_line("5Jan1999 Asthma (XE123)").as_deref(),
            Some("05 Jan 1999 Asthma")
        );
    }

    #[test]
    fn dedup_entries_keys_on_date_and_description() {
        let entries = vec![
            "05 Jan 1999 Asthma".to_string(),
            "05 Jan 1999 Asthma".to_string(),
            "06 Jan 1999 Asthma".to_string(),
            "Oct 1999 Asthma".to_string(),
            "Oct 1999 Asthma".to_string(),
        ];
        assert_eq!(
            dedup_entries(entries),
            vec!["05 Jan 1999 Asthma", "06 Jan 1999 Asthma", "Oct 1999 Asthma"]
        );
    }

    #[test]
    fn module_level_entry_point_matches_instance() {
        let raw = "5 Jan 1999 Asthma (XE123)";
        assert_eq!(crate::process_text(raw), process(raw));
    }
}
