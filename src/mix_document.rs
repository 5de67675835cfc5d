use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;

use crate::errors::MixError;
use crate::fr_record::{FrRecord, RecordRole};
use crate::text_utils::fix_text;

// @module: Mix document loading and per-record timing

// @enum: loader section states, driven purely by line-prefix matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionState {
    Idle,
    InText,
    InPhoneme,
    InLabels,
}

/// One parsed .mix transcript: the ordered FR record sequence plus the
/// header sections around it.
///
/// Loading is a single pass over the input lines. The only fatal error is
/// a malformed FR line; a document missing its Begin/End bracketing is
/// still loaded and only reported when `check` is called.
#[derive(Debug, Clone, Default)]
pub struct MixDocument {
    /// Source file path, used in diagnostics
    pub path: PathBuf,

    /// Ordered FR records, frame numbers non-decreasing
    pub records: Vec<FrRecord>,

    /// Recording path from the "Waxholm dialog." header line
    pub dialog_path: Option<String>,

    /// Decoded free-text line from the TEXT: section
    pub text: Option<String>,

    /// Decoded phonemic transcription from the PHONEME: section
    pub phoneme: Option<String>,

    /// Raw label blob from the Labels: section, continuations concatenated
    pub labels: Option<String>,
}

impl MixDocument {
    /// Load a document from a .mix file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read mix file: {}", path.display()))?;
        let doc = Self::from_string(&content, path)?;
        Ok(doc)
    }

    /// Parse a document from in-memory text, normalizing record roles.
    pub fn from_string<P: AsRef<Path>>(content: &str, path: P) -> Result<Self, MixError> {
        let mut doc = Self::from_string_raw(content, path)?;
        for record in &mut doc.records {
            record.normalize();
        }
        Ok(doc)
    }

    /// Parse without the post-parse role normalization, for callers that
    /// want the records exactly as annotated.
    pub fn from_string_raw<P: AsRef<Path>>(content: &str, path: P) -> Result<Self, MixError> {
        let mut doc = MixDocument {
            path: path.as_ref().to_path_buf(),
            ..MixDocument::default()
        };
        doc.read_data(content)?;
        Ok(doc)
    }

    // Flag-based state machine over the section markers. FR lines are
    // recognized in any state and force-exit the labels section, which
    // defends against interleaved malformed input.
    fn read_data(&mut self, content: &str) -> Result<(), MixError> {
        let mut state = SectionState::Idle;
        for line in content.lines() {
            if let Some(rest) = line.strip_prefix("Waxholm dialog.") {
                self.dialog_path = Some(rest.trim().to_string());
                continue;
            }
            if line.starts_with("TEXT:") {
                state = SectionState::InText;
                continue;
            }
            if state == SectionState::InText {
                self.text = Some(fix_text(line.trim()));
                state = SectionState::Idle;
                continue;
            }
            if let Some(rest) = line.strip_prefix("PHONEME:") {
                let part = fix_text(rest.trim());
                state = if part.ends_with('.') {
                    SectionState::Idle
                } else {
                    SectionState::InPhoneme
                };
                self.phoneme = Some(part);
                continue;
            }
            if state == SectionState::InPhoneme {
                let part = fix_text(line.trim());
                if part.ends_with('.') {
                    state = SectionState::Idle;
                }
                let acc = self.phoneme.get_or_insert_with(String::new);
                if !acc.is_empty() {
                    acc.push(' ');
                }
                acc.push_str(&part);
                continue;
            }
            if line.starts_with("FR ") {
                state = SectionState::Idle;
                self.records.push(FrRecord::from_line(line)?);
                continue;
            }
            if let Some(rest) = line.strip_prefix("Labels:") {
                self.labels = Some(rest.trim().to_string());
                state = SectionState::InLabels;
                continue;
            }
            if state == SectionState::InLabels {
                if line.starts_with(' ') || line.starts_with('\t') {
                    let acc = self.labels.get_or_insert_with(String::new);
                    acc.push_str(line.trim());
                } else {
                    state = SectionState::Idle;
                }
            }
        }
        Ok(())
    }

    /// Sanity check: there are FR records, the first has role Begin and
    /// the last has role End. Never silently repaired; with `verbose`,
    /// failures are logged with the document path.
    pub fn check(&self, verbose: bool) -> bool {
        if self.records.is_empty() {
            if verbose {
                warn!("{}: no FR records", self.path.display());
            }
            return false;
        }
        let has_start = self.records[0].role == RecordRole::Begin;
        let has_end = self.records[self.records.len() - 1].role == RecordRole::End;
        if verbose && !has_start {
            warn!("{}: missing start type", self.path.display());
        }
        if verbose && !has_end {
            warn!("{}: missing end type", self.path.display());
        }
        has_start && has_end
    }

    /// Per-record timestamps, in document order.
    ///
    /// Returns seconds (falling back to frame-derived values where the
    /// duration field is missing), or raw frame numbers with `as_frames`.
    /// An ill-formed document, or one where a record lacks the timing
    /// field entirely, yields an empty vector rather than an error so that
    /// batch scans over a large corpus degrade gracefully.
    pub fn times(&self, as_frames: bool) -> Vec<f64> {
        if !self.check(true) {
            return Vec::new();
        }
        let times: Option<Vec<f64>> = if as_frames {
            self.records.iter().map(|r| r.frame.map(f64::from)).collect()
        } else {
            self.records.iter().map(|r| r.effective_seconds()).collect()
        };
        match times {
            Some(times) => times,
            None => {
                warn!("{}: record without a timing field", self.path.display());
                Vec::new()
            }
        }
    }

    /// Adjacent (start, end) spans: `times[i]` zipped with `times[i+1]`,
    /// attributing the span to record `i`. Length is `records.len() - 1`.
    pub fn time_pairs(&self, as_frames: bool) -> Vec<(f64, f64)> {
        let times = self.times(as_frames);
        times
            .iter()
            .zip(times.iter().skip(1))
            .map(|(start, end)| (*start, *end))
            .collect()
    }
}

impl fmt::Display for MixDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Mix document")?;
        writeln!(f, "Source: {}", self.path.display())?;
        if let Some(text) = &self.text {
            writeln!(f, "Text: {}", text)?;
        }
        writeln!(f, "Records: {}", self.records.len())?;
        Ok(())
    }
}
