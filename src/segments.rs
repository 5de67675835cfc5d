use log::{debug, warn};

use crate::fr_record::FrRecord;
use crate::labels::Label;

/// Segment algorithms
///
/// Pure, sequence-to-sequence transforms over FR records and over
/// (start, end, label) interval triples. Nothing here mutates its input;
/// callers that need both the pre- and post-transform state keep the
/// input themselves.
// @const: closure phone -> burst phone for separately annotated stops
pub const CLOSURE_BURSTS: [(&str, &str); 8] = [
    ("K", "k"),
    ("G", "g"),
    ("T", "t"),
    ("D", "d"),
    ("2T", "2t"),
    ("2D", "2d"),
    ("P", "p"),
    ("B", "b"),
];

/// Burst phone corresponding to a closure phone, if any.
pub fn burst_for(closure: &str) -> Option<&'static str> {
    CLOSURE_BURSTS
        .iter()
        .find(|(c, _)| *c == closure)
        .map(|(_, b)| *b)
}

/// True when `cur` is a closure phone and `next` its burst.
pub fn is_glottal_closure(cur: &str, next: &str) -> bool {
    burst_for(cur) == Some(next)
}

/// Merge a closure/burst record pair into one record, or `None` when the
/// pair is not mergeable.
///
/// The burst record must carry no word. The merged record keeps the
/// closure's timing (the span starts at the closure onset), the burst's
/// phone fields, and inherits the closure's word and pseudoword flag.
pub fn merge_plosive_pair(fr1: &FrRecord, fr2: &FrRecord) -> Option<FrRecord> {
    if fr2.has_word() {
        return None;
    }
    let cur = fr1.get_phone(false)?;
    let next = fr2.get_phone(false)?;
    if !is_glottal_closure(&cur, &next) {
        return None;
    }
    let mut merged = fr2.clone();
    merged.frame = fr1.frame;
    merged.seconds = fr1.seconds;
    if fr1.has_word() {
        merged.word = fr1.word.clone();
        merged.pseudoword = fr1.pseudoword;
    }
    Some(merged)
}

/// Merge all closure/burst pairs in a record sequence, left to right,
/// consuming two records per merge.
pub fn merge_plosive_records(records: &[FrRecord]) -> Vec<FrRecord> {
    let mut out = Vec::with_capacity(records.len());
    let mut i = 0;
    while i + 1 < records.len() {
        if let Some(merged) = merge_plosive_pair(&records[i], &records[i + 1]) {
            debug!("Merging {} and {}", records[i], records[i + 1]);
            out.push(merged);
            i += 2;
        } else {
            out.push(records[i].clone());
            i += 1;
        }
    }
    if i < records.len() {
        out.push(records[records.len() - 1].clone());
    }
    out
}

/// Same closure/burst rule over interval triples, used when exporting
/// phone tiers rather than corrected dictionaries.
///
/// The walk stops before the final label: a trailing label is only
/// emitted as part of a merge. In this corpus the interval before the
/// terminator is silence, which downstream phone tiers drop anyway.
pub fn merge_plosive_intervals(labels: &[Label]) -> Vec<Label> {
    let mut out = Vec::with_capacity(labels.len());
    let mut i = 0;
    while i + 1 < labels.len() {
        let cur = &labels[i];
        let next = &labels[i + 1];
        if is_glottal_closure(&cur.label, &next.label) {
            out.push(Label::new(cur.start, next.end, next.label.clone()));
            i += 2;
        } else {
            out.push(cur.clone());
            i += 1;
        }
    }
    out
}

/// Drop interval triples with zero duration.
pub fn prune_empty_intervals(labels: &[Label]) -> Vec<Label> {
    labels
        .iter()
        .filter(|l| l.start != l.end)
        .cloned()
        .collect()
}

// Zero-duration silence check against a neighbor. Records without any
// timing information are kept: an absent timestamp cannot confirm an
// empty span.
fn is_empty_silence(cur: &FrRecord, neighbor: &FrRecord, include_noises: bool) -> bool {
    match (cur.effective_seconds(), neighbor.effective_seconds()) {
        (Some(a), Some(b)) => a == b && cur.is_silence_word(include_noises),
        _ => {
            if cur.is_silence_word(include_noises) {
                debug!("Missing seconds on silence record: {}", cur);
            }
            false
        }
    }
}

/// Forward pass: remove silence placeholders whose span to the following
/// record has zero duration.
pub fn prune_empty_presilences(records: &[FrRecord], include_noises: bool) -> Vec<FrRecord> {
    records
        .iter()
        .enumerate()
        .filter(|(i, r)| match records.get(i + 1) {
            Some(next) => !is_empty_silence(r, next, include_noises),
            None => true,
        })
        .map(|(_, r)| r.clone())
        .collect()
}

/// Backward pass: remove silence placeholders whose span from the
/// preceding record has zero duration.
pub fn prune_empty_postsilences(records: &[FrRecord], include_noises: bool) -> Vec<FrRecord> {
    records
        .iter()
        .enumerate()
        .filter(|(i, r)| {
            if *i == 0 {
                return true;
            }
            !is_empty_silence(r, &records[i - 1], include_noises)
        })
        .map(|(_, r)| r.clone())
        .collect()
}

/// Both pruning passes, forward then backward.
pub fn prune_empty_silences(records: &[FrRecord], include_noises: bool) -> Vec<FrRecord> {
    prune_empty_postsilences(&prune_empty_presilences(records, include_noises), include_noises)
}

/// Remove records whose frame-based span has zero duration, regardless of
/// tag. The final record is the closing boundary and is always kept.
pub fn prune_empty_segments(records: &[FrRecord]) -> Vec<FrRecord> {
    if records.len() < 2 {
        return records.to_vec();
    }
    let frames: Option<Vec<u32>> = records.iter().map(|r| r.frame).collect();
    let Some(frames) = frames else {
        warn!("record without a frame number, skipping empty-segment pruning");
        return records.to_vec();
    };
    let mut keep = Vec::with_capacity(records.len());
    for (i, record) in records[..records.len() - 1].iter().enumerate() {
        if frames[i] == frames[i + 1] {
            debug!(
                "Empty segment {} ({} --> {})",
                record.get_phone(false).unwrap_or_default(),
                frames[i],
                frames[i + 1]
            );
        } else {
            keep.push(record.clone());
        }
    }
    keep.push(records[records.len() - 1].clone());
    keep
}

/// Collapse redundant closure symbols in a space-joined phone string:
/// `X y` becomes `X` for each closure/burst pair, including the retroflex
/// variants where either side carries the `2` digit.
pub fn collapse_glottal_closures(input: &str) -> String {
    fn replace_cascading(mut text: String, pattern: &str, replacement: &str) -> String {
        while text.contains(pattern) {
            text = text.replace(pattern, replacement);
        }
        text
    }

    let mut out = format!(" {} ", input.trim());
    for (closure, burst) in CLOSURE_BURSTS {
        out = replace_cascading(out, &format!(" {} {} ", closure, burst), &format!(" {} ", closure));
    }
    for retro in ["D", "T"] {
        let lower = retro.to_lowercase();
        out = replace_cascading(
            out,
            &format!(" {} 2{} ", retro, lower),
            &format!(" 2{} ", retro),
        );
        out = replace_cascading(
            out,
            &format!(" 2{} {} ", retro, lower),
            &format!(" 2{} ", retro),
        );
    }
    out.trim().to_string()
}
