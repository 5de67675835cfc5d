use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::MixError;
use crate::text_utils::{fix_accents, fix_text, is_x_word};

// @module: FR frame-record parsing and role classification

/// Sample rate of the corpus recordings, used to derive seconds from
/// frame numbers when a record carries no explicit duration field.
pub const SAMPLE_RATE: f64 = 16000.0;

// @const: trailing elapsed-seconds field, e.g. " 0.262 sec"
static SECONDS_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)?)\s*sec$").unwrap());

// @const: bare numeric >w. payload (the orthographic "." quirk)
static BARE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").unwrap());

/// A record's position within an utterance's phone-alignment sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordRole {
    /// Word onset
    Begin,
    /// Word-internal phone
    Inner,
    /// Utterance terminator (`OK` / `PROBLEMS`)
    End,
    /// No role marker seen on the line
    #[default]
    Unknown,
}

impl fmt::Display for RecordRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let c = match self {
            RecordRole::Begin => "B",
            RecordRole::Inner => "I",
            RecordRole::End => "E",
            RecordRole::Unknown => "",
        };
        write!(f, "{}", c)
    }
}

/// One timestamped FR line: a phonetic event (phone, word boundary, or
/// session marker). Immutable value object once parsed.
///
/// The corrected phone (`pm`) takes precedence over the original (`phone`)
/// wherever a single authoritative phone value is needed; End records carry
/// neither.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrRecord {
    // @field: Frame number (16 kHz samples)
    pub frame: Option<u32>,

    // @field: Elapsed seconds, when the line carries a duration field
    pub seconds: Option<f64>,

    // @field: Begin/Inner/End role
    pub role: RecordRole,

    // @field: Phone code as originally annotated
    pub phone: Option<String>,

    // @field: Marker that introduced the phone ($, #, or $#)
    pub phone_type: Option<String>,

    // @field: Corrected phone code, preferred over `phone`
    pub pm: Option<String>,

    // @field: Marker that introduced the corrected phone
    pub pm_type: Option<String>,

    // @field: Orthographic word, present on word onsets
    pub word: Option<String>,

    // @field: True for bracketed X…X non-speech tokens
    pub pseudoword: Option<bool>,
}

/// Role and decoded phone split out of a `$`/`#`/`$#`-marked field
struct PhoneField {
    role: RecordRole,
    marker: String,
    phone: String,
}

fn split_phone(field: &str) -> Option<PhoneField> {
    let (role, marker, rest) = if let Some(rest) = field.strip_prefix("$#") {
        (RecordRole::Inner, "$#", rest)
    } else if let Some(rest) = field.strip_prefix('$') {
        (RecordRole::Inner, "$", rest)
    } else if let Some(rest) = field.strip_prefix('#') {
        (RecordRole::Begin, "#", rest)
    } else {
        return None;
    };
    Some(PhoneField {
        role,
        marker: marker.to_string(),
        phone: fix_text(rest),
    })
}

impl FrRecord {
    /// Parse one raw FR line into a record.
    ///
    /// The only fatal condition in the whole core: a line without the FR
    /// prefix yields `MixError::MalformedRecord`. Unrecognized subfields
    /// are ignored without error, and a missing frame or duration field
    /// leaves the corresponding value absent.
    pub fn from_line(line: &str) -> Result<Self, MixError> {
        if !line.starts_with("FR") {
            return Err(MixError::MalformedRecord {
                line: line.to_string(),
            });
        }
        let parts: Vec<&str> = line.split('\t').map(str::trim).collect();

        let mut record = FrRecord {
            frame: parts[0][2..].trim().parse().ok(),
            ..FrRecord::default()
        };

        let mut end = parts.len();
        if parts.len() > 1 {
            if let Some(caps) = SECONDS_SUFFIX.captures(parts[parts.len() - 1]) {
                record.seconds = caps[1].parse().ok();
                end -= 1;
            }
        }

        // Everything between the frame field and the trailing duration
        // field (when present) is a marker-tagged subfield.
        for subpart in &parts[1..end] {
            record.apply_subfield(subpart);
        }

        Ok(record)
    }

    fn apply_subfield(&mut self, subpart: &str) {
        if subpart.starts_with('$') || subpart.starts_with('#') {
            if let Some(ph) = split_phone(subpart) {
                self.role = ph.role;
                self.phone_type = Some(ph.marker);
                self.phone = Some(ph.phone);
            }
        } else if let Some(rest) = subpart.strip_prefix(">pm. ").or_else(|| subpart.strip_prefix(">pm ")) {
            if let Some(ph) = split_phone(rest) {
                self.pm_type = Some(ph.marker);
                self.pm = Some(ph.phone);
            }
        } else if let Some(rest) = subpart.strip_prefix(">w. ") {
            self.role = RecordRole::Begin;
            // A bare number after >w. stands for the orthographic "."
            self.word = if BARE_NUMBER.is_match(rest) {
                Some(".".to_string())
            } else {
                Some(fix_text(rest))
            };
            self.pseudoword = Some(false);
        } else if let Some(rest) = subpart.strip_prefix(">w ") {
            self.role = RecordRole::Begin;
            self.word = Some(fix_text(rest));
            self.pseudoword = Some(false);
        } else if let Some(rest) = subpart.strip_prefix("> ") {
            if is_x_word(rest) {
                self.role = RecordRole::Begin;
                self.word = Some(rest.to_string());
                self.pseudoword = Some(true);
            }
        } else if is_x_word(subpart) {
            // Bare noise token: inherit any role already seen on the line
            if self.role == RecordRole::Unknown {
                self.role = RecordRole::Begin;
            }
            self.word = Some(fix_text(subpart));
            self.pseudoword = Some(true);
        } else if subpart == "OK" || subpart == "PROBLEMS" {
            self.role = RecordRole::End;
        }
    }

    /// Post-parse normalization, applied once by the document loader.
    ///
    /// A record with no role but a corrected-phone marker is tagged from
    /// that marker; a Begin record with no word is an isolated phone, not
    /// a genuine word onset, and is re-tagged Inner (the raw format does
    /// not mark the distinction unambiguously).
    pub fn normalize(&mut self) {
        if self.role == RecordRole::Unknown {
            if let Some(pm_type) = &self.pm_type {
                self.role = match pm_type.as_str() {
                    "#" => RecordRole::Begin,
                    _ => RecordRole::Inner,
                };
            }
        }
        if self.role == RecordRole::Begin && self.get_word().is_empty() {
            self.role = RecordRole::Inner;
            self.phone_type = Some("$".to_string());
            self.pm_type = Some("$".to_string());
        }
    }

    /// The authoritative phone value: corrected (`pm`) preferred over
    /// original; End records return `None`. With `accents`, ASCII stress
    /// marks are mapped to IPA.
    pub fn get_phone(&self, accents: bool) -> Option<String> {
        let raw = self.pm.as_deref().or(self.phone.as_deref())?;
        if accents {
            Some(fix_accents(raw))
        } else {
            Some(raw.to_string())
        }
    }

    /// The orthographic word, or the empty string.
    pub fn get_word(&self) -> &str {
        self.word.as_deref().unwrap_or("")
    }

    pub fn has_word(&self) -> bool {
        self.word.is_some()
    }

    pub fn has_seconds(&self) -> bool {
        self.seconds.is_some()
    }

    /// Elapsed seconds, falling back to the frame number divided by the
    /// corpus sample rate when no duration field was present.
    pub fn effective_seconds(&self) -> Option<f64> {
        self.seconds
            .or_else(|| self.frame.map(|f| f64::from(f) / SAMPLE_RATE))
    }

    /// True for the empty-silence placeholder (word exactly `XX`); with
    /// `noise`, any bracketed `X…X` token counts.
    pub fn is_silence_word(&self, noise: bool) -> bool {
        match &self.word {
            Some(word) if noise => is_x_word(word),
            Some(word) => word == "XX",
            None => false,
        }
    }

    pub fn is_pseudoword(&self) -> bool {
        self.pseudoword.unwrap_or(false)
    }
}

impl fmt::Display for FrRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut parts = vec![format!("role: {}", self.role)];
        if let Some(frame) = self.frame {
            parts.push(format!("frame: {}", frame));
        }
        if self.role != RecordRole::End {
            if let Some(phone) = self.get_phone(false) {
                parts.push(format!("phone: {}", phone));
            }
        }
        if let Some(word) = &self.word {
            parts.push(format!("word: {}", word));
        }
        if let Some(seconds) = self.seconds {
            parts.push(format!("sec: {}", seconds));
        }
        write!(f, "FR({})", parts.join(", "))
    }
}
