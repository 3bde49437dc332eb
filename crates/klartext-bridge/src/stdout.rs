// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use std::io::Write;

use klartext_core::error::Result;

use crate::traits::TextSink;

/// Prints delivered text to stdout, followed by a newline unless empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl TextSink for StdoutSink {
    fn deliver(&self, text: &str) -> Result<()> {
        let mut out = std::io::stdout().lock();
        if !text.is_empty() {
            writeln!(out, "{text}")?;
        }
        out.flush()?;
        Ok(())
    }
}
