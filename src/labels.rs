use std::collections::{HashMap, HashSet};
use std::fmt;

use log::debug;
use similar::{capture_diff_slices, Algorithm, DiffTag};

use crate::fr_record::{FrRecord, RecordRole};
use crate::mix_document::MixDocument;
use crate::segments::{
    collapse_glottal_closures, merge_plosive_intervals, merge_plosive_records,
    prune_empty_intervals, prune_empty_segments,
};
use crate::text_utils::fix_duration_markers;

// @module: time-aligned label extraction and dictionary derivation

/// One time-aligned label: a (start, end, label) interval triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub start: f64,
    pub end: f64,
    pub label: String,
}

impl Label {
    pub fn new<S: Into<String>>(start: f64, end: f64, label: S) -> Self {
        Label {
            start,
            end,
            label: label.into(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} --> {}: {}", self.start, self.end, self.label)
    }
}

/// A canonical-vs-spoken difference: (word, canonical pronunciation,
/// spoken pronunciation).
pub type PronComparison = (String, String, String);

// Dictionary walk over any record sequence; shared by the document
// methods and the comparison, which runs it on transformed copies.
fn dictionary_variants_of(records: &[FrRecord], accents: bool) -> Vec<(String, Vec<String>)> {
    let mut output = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut prev_word = String::new();
    for record in records {
        if record.has_word() {
            if !prev_word.is_empty() {
                output.push((prev_word.clone(), std::mem::take(&mut current)));
            }
            prev_word = record.get_word().to_string();
            if let Some(phone) = record.get_phone(accents) {
                current.push(phone);
            }
        } else if record.role == RecordRole::Inner {
            if let Some(phone) = record.get_phone(accents) {
                current.push(phone);
            }
        } else {
            // Terminating End record closes the last word
            output.push((prev_word.clone(), current));
            return output;
        }
    }
    // No terminator seen; flush what accumulated instead of dropping it
    if !prev_word.is_empty() || !current.is_empty() {
        output.push((prev_word, current));
    }
    output
}

fn dictionary_list_of(records: &[FrRecord], accents: bool) -> Vec<(String, String)> {
    dictionary_variants_of(records, accents)
        .into_iter()
        .map(|(word, phones)| (word, phones.join(" ")))
        .collect()
}

impl MixDocument {
    /// Time-aligned phone labels: each non-final record's span paired with
    /// its authoritative phone (corrected preferred over original).
    ///
    /// Empty when the document fails the well-formedness check or when the
    /// span and label counts diverge.
    pub fn phone_label_tuples(&self, as_frames: bool, accents: bool) -> Vec<Label> {
        let times = self.time_pairs(as_frames);
        if !self.check(false) || times.len() + 1 != self.records.len() {
            return Vec::new();
        }
        times
            .iter()
            .zip(&self.records)
            .map(|((start, end), record)| {
                Label::new(*start, *end, record.get_phone(accents).unwrap_or_default())
            })
            .collect()
    }

    /// Phone labels with zero-duration intervals dropped.
    pub fn prune_empty_labels(&self) -> Vec<Label> {
        prune_empty_intervals(&self.phone_label_tuples(false, true))
    }

    /// Phone labels with closure/burst pairs merged, optionally pruning
    /// zero-duration intervals first.
    pub fn merged_plosives(&self, prune_empty: bool) -> Vec<Label> {
        let labels = if prune_empty {
            self.prune_empty_labels()
        } else {
            self.phone_label_tuples(false, true)
        };
        merge_plosive_intervals(&labels)
    }

    /// Time-aligned word labels, one interval per word occurrence.
    ///
    /// A Begin record immediately followed by another Begin yields a
    /// single-phone word interval; otherwise the word's interval extends
    /// over the following Inner records and ends at its last phone, which
    /// coincides with the next word's onset when records are adjacent.
    /// A still-open word at the end of the walk is flushed.
    pub fn word_label_tuples(&self) -> Vec<Label> {
        let times = self.time_pairs(false);
        if times.is_empty() || times.len() + 1 != self.records.len() {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut open: Option<Label> = None;
        for (i, ((start, end), record)) in times.iter().zip(&self.records).enumerate() {
            if record.role == RecordRole::Begin {
                if let Some(word) = open.take() {
                    out.push(word);
                }
                if record.get_word().is_empty() {
                    debug!("Expected word on begin record: {}", record);
                }
                let label = Label::new(*start, *end, record.get_word());
                let next_is_begin = self
                    .records
                    .get(i + 1)
                    .map(|r| r.role == RecordRole::Begin)
                    .unwrap_or(false);
                if next_is_begin {
                    out.push(label);
                } else {
                    open = Some(label);
                }
            } else if let Some(word) = open.as_mut() {
                word.end = *end;
            }
        }
        if let Some(word) = open.take() {
            out.push(word);
        }
        out
    }

    /// Pronunciation dictionary from the corrected annotations: each word
    /// maps to its observed pronunciation variants, one phone vector per
    /// occurrence. For the lexical pronunciations, use the `phoneme`
    /// section instead.
    pub fn dictionary(&self, accents: bool) -> HashMap<String, Vec<Vec<String>>> {
        let mut output: HashMap<String, Vec<Vec<String>>> = HashMap::new();
        for (word, phones) in dictionary_variants_of(&self.records, accents) {
            output.entry(word).or_default().push(phones);
        }
        output
    }

    /// Order-preserving dictionary entries with duplicates: one
    /// (word, space-joined phones) pair per word occurrence.
    pub fn dictionary_list(&self, accents: bool) -> Vec<(String, String)> {
        dictionary_list_of(&self.records, accents)
    }

    /// An opinionated phoneme string for the whole utterance: the
    /// dictionary pronunciations joined (with `p:` pauses between words
    /// unless disabled), glottal closures collapsed, duration markers
    /// cleaned.
    pub fn phoneme_string(&self, insert_pauses: bool, accents: bool) -> String {
        let dict_list = self.dictionary_list(accents);
        let prons: Vec<&str> = dict_list
            .iter()
            .map(|(_, pron)| pron.as_str())
            .filter(|pron| {
                if insert_pauses {
                    *pron != "p:" && *pron != "."
                } else {
                    *pron != "."
                }
            })
            .collect();
        let joined = prons.join(if insert_pauses { " p: " } else { " " });
        fix_duration_markers(&collapse_glottal_closures(&joined))
    }

    /// `phoneme_string` split into individual phones.
    pub fn phoneme_list(&self, insert_pauses: bool, accents: bool) -> Vec<String> {
        self.phoneme_string(insert_pauses, accents)
            .split(' ')
            .map(str::to_string)
            .collect()
    }

    /// Canonical-vs-spoken pronunciation comparison.
    ///
    /// The canonical list is taken before empty-segment pruning and the
    /// spoken list after it; with `merge_plosives` both sides start from
    /// the plosive-merged record sequence, so that closure/burst notation
    /// alone never registers as a difference. When pruning drops whole
    /// words the two lists are realigned with an LCS edit script and the
    /// dropped canonical positions discarded before the 1:1 comparison.
    /// Returns only differing triples unless `only_changed` is false.
    pub fn compare_dictionary(
        &self,
        accents: bool,
        merge_plosives: bool,
        only_changed: bool,
    ) -> Vec<PronComparison> {
        let base = if merge_plosives {
            merge_plosive_records(&self.records)
        } else {
            self.records.clone()
        };
        let mut canonical = dictionary_list_of(&base, accents);
        let spoken = dictionary_list_of(&prune_empty_segments(&base), accents);

        if canonical.len() != spoken.len() {
            let words_old: Vec<&str> = canonical.iter().map(|(w, _)| w.as_str()).collect();
            let words_new: Vec<&str> = spoken.iter().map(|(w, _)| w.as_str()).collect();
            let mut skippable: HashSet<usize> = HashSet::new();
            for op in capture_diff_slices(Algorithm::Myers, &words_old, &words_new) {
                if matches!(op.tag(), DiffTag::Delete | DiffTag::Replace) {
                    skippable.extend(op.old_range());
                }
            }
            canonical = canonical
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !skippable.contains(i))
                .map(|(_, entry)| entry)
                .collect();
        }

        let mut out = Vec::new();
        for ((word, canon), (word_new, spoke)) in canonical.iter().zip(&spoken) {
            if word != word_new {
                continue;
            }
            if canon != spoke || !only_changed {
                out.push((word.clone(), canon.clone(), spoke.clone()));
            }
        }
        out
    }
}
