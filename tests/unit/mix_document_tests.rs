/*!
 * Tests for the document loader state machine and the timing engine
 */

use mixalign::fr_record::RecordRole;
use mixalign::MixDocument;

use crate::common;

/// Test loading the canonical sample document
#[test]
fn test_from_string_withSampleDocument_shouldLoadAllSections() {
    let doc = common::sample_document();

    assert_eq!(doc.dialog_path.as_deref(), Some("fp2038.1.08.smp"));
    assert_eq!(doc.text.as_deref(), Some("jag vill åka 17 och 45 ."));
    assert_eq!(doc.records.len(), 31);

    // Continuation lines of the labels section are concatenated
    assert_eq!(doc.labels.as_deref(), Some("all.speech"));

    // The phoneme section is decoded and kept with its terminating period
    let phoneme = doc.phoneme.as_deref().unwrap();
    assert!(phoneme.starts_with("J'A:G"));
    assert!(phoneme.contains("Å"));
    assert!(phoneme.ends_with('.'));
}

/// Test the well-formedness check on the sample
#[test]
fn test_check_withSampleDocument_shouldBeWellFormed() {
    let doc = common::sample_document();
    assert!(doc.check(false));
    assert_eq!(doc.records[0].role, RecordRole::Begin);
    assert_eq!(doc.records[30].role, RecordRole::End);
}

/// Test per-record timestamps in seconds and frames
#[test]
fn test_times_withSampleDocument_shouldMatchAnnotations() {
    let doc = common::sample_document();

    let seconds = doc.times(false);
    assert_eq!(seconds.len(), 31);
    assert_eq!(seconds[0], 0.262);
    assert_eq!(seconds[30], 2.25);

    let frames = doc.times(true);
    assert_eq!(frames[0], 4196.0);
    assert_eq!(frames[30], 36000.0);
}

/// Test adjacent-interval pairs: one fewer than the record count
#[test]
fn test_time_pairs_withSampleDocument_shouldZipAdjacent() {
    let doc = common::sample_document();
    let pairs = doc.time_pairs(false);
    assert_eq!(pairs.len(), doc.records.len() - 1);
    assert_eq!(pairs[0], (0.262, 0.320));
    assert_eq!(pairs[29], (2.050, 2.250));
}

/// Test that an ill-formed document degrades to empty timing
#[test]
fn test_times_withMissingEndRecord_shouldBeEmpty() {
    let content = "FR 100\t #A\t>w ja\t 0.100 sec\nFR 200\t $B\t 0.200 sec\n";
    let doc = MixDocument::from_string(content, "no_end.mix").unwrap();
    assert!(!doc.check(false));
    assert!(doc.times(false).is_empty());
    assert!(doc.time_pairs(false).is_empty());
}

/// Test that a document without records fails the check
#[test]
fn test_check_withNoRecords_shouldFail() {
    let doc = MixDocument::from_string("TEXT:\nhej\n", "empty.mix").unwrap();
    assert!(!doc.check(false));
}

/// Test that an FR line force-exits the labels section
#[test]
fn test_read_data_withFrInsideLabels_shouldExitLabelsState() {
    let content = "Labels: first\nFR 100\t OK\t 0.100 sec\n continuation\n";
    let doc = MixDocument::from_string(content, "interleaved.mix").unwrap();
    // The indented line after the FR record must not be appended
    assert_eq!(doc.labels.as_deref(), Some("first"));
    assert_eq!(doc.records.len(), 1);
}

/// Test multi-line phoneme sections terminated by a period
#[test]
fn test_read_data_withContinuedPhoneme_shouldConcatenate() {
    let content = "PHONEME: J A:\nG V I L.\nTEXT:\nhej\n";
    let doc = MixDocument::from_string(content, "phoneme.mix").unwrap();
    assert_eq!(doc.phoneme.as_deref(), Some("J A: G V I L."));
    assert_eq!(doc.text.as_deref(), Some("hej"));
}

/// Test that record roles are normalized on load: a # phone without a
/// word is an isolated phone, not a word onset
#[test]
fn test_from_string_withWordlessHashPhone_shouldNormalizeToInner() {
    let content = "FR 100\t #A\t 0.100 sec\nFR 200\t OK\t 0.200 sec\n";
    let doc = MixDocument::from_string(content, "wordless.mix").unwrap();
    assert_eq!(doc.records[0].role, RecordRole::Inner);

    let raw = MixDocument::from_string_raw(content, "wordless.mix").unwrap();
    assert_eq!(raw.records[0].role, RecordRole::Begin);
}
