/*!
 * Tests for label extraction and dictionary derivation
 */

use mixalign::labels::Label;

use crate::common;

/// Test time-aligned phone labels on the sample document
#[test]
fn test_phone_label_tuples_withSampleDocument_shouldAlignPhones() {
    let doc = common::sample_document();
    let labels = doc.phone_label_tuples(false, true);

    assert_eq!(labels.len(), 30);
    assert_eq!(labels[0], Label::new(0.262, 0.320, "p:"));
    assert_eq!(labels[1].label, "J");
    // Corrected phone with the apostrophe restored as IPA primary stress
    assert_eq!(labels[2].label, "ˈA:");
    // The legacy ] glyph decodes to Å
    assert_eq!(labels[8].label, "ˈÅ:");
}

/// Test that an ill-formed document yields no phone labels
#[test]
fn test_phone_label_tuples_withIllFormedDocument_shouldBeEmpty() {
    let doc = mixalign::MixDocument::from_string(
        "FR 100\t $A\t 0.100 sec\nFR 200\t $B\t 0.200 sec\n",
        "bad.mix",
    )
    .unwrap();
    assert!(doc.phone_label_tuples(false, true).is_empty());
}

/// Test merged-phone extraction with pruning disabled: 31 records yield
/// 24 merged entries
#[test]
fn test_merged_plosives_withSampleDocument_shouldYield24() {
    let doc = common::sample_document();
    let merged = doc.merged_plosives(false);
    assert_eq!(merged.len(), 24);

    // The G closure and g burst collapse into one span
    assert_eq!(merged[3], Label::new(0.460, 0.550, "g"));

    // The sample has no empty segments, so pruning changes nothing
    assert_eq!(doc.merged_plosives(true), merged);
}

/// Test word intervals: one interval per word occurrence, in order
#[test]
fn test_word_label_tuples_withSampleDocument_shouldSpanWords() {
    let doc = common::sample_document();
    let words = doc.word_label_tuples();

    let texts: Vec<&str> = words.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(
        texts,
        vec!["XX", "jag", "vill", "åka", "sjutton", "och", "fyrtiofem", "XX"]
    );

    // A Begin followed by another Begin keeps its own single-phone span
    assert_eq!(words[0], Label::new(0.262, 0.320, "XX"));
    // A multi-phone word extends to the next word's onset
    assert_eq!(words[1], Label::new(0.320, 0.550, "jag"));
    // The trailing word is flushed with its own span
    assert_eq!(words[7], Label::new(2.050, 2.250, "XX"));
}

/// Test dictionary extraction: 7 distinct words on the sample
#[test]
fn test_dictionary_withSampleDocument_shouldYieldSevenWords() {
    let doc = common::sample_document();
    let dict = doc.dictionary(true);

    assert_eq!(dict.len(), 7);
    assert_eq!(
        dict.get("vill"),
        Some(&vec![vec![
            "V".to_string(),
            "ˈI".to_string(),
            "L+".to_string()
        ]])
    );
    // The silence placeholder brackets the utterance, so it has two variants
    assert_eq!(dict.get("XX").map(|v| v.len()), Some(2));
}

/// Test the order-preserving dictionary list
#[test]
fn test_dictionary_list_withSampleDocument_shouldPreserveOrder() {
    let doc = common::sample_document();
    let list = doc.dictionary_list(true);

    assert_eq!(list.len(), 8);
    assert_eq!(list[0], ("XX".to_string(), "p:".to_string()));
    assert_eq!(list[1], ("jag".to_string(), "J ˈA: G g".to_string()));
    assert_eq!(list[7], ("XX".to_string(), "p:".to_string()));
}

/// Test the derived phoneme string: pauses inserted, closures collapsed,
/// duration markers cleaned
#[test]
fn test_phoneme_string_withSampleDocument_shouldCollapseAndPause() {
    let doc = common::sample_document();
    assert_eq!(
        doc.phoneme_string(true, true),
        "J ˈA: G p: V ˈI L p: ˈÅ: K A p: SJ ˈU T Å N p: Å K p: F ˈY 2T I F E M"
    );
}

/// Test that the comparison is empty when pruning removes nothing
#[test]
fn test_compare_dictionary_withSampleDocument_shouldFindNoChanges() {
    let doc = common::sample_document();
    assert!(doc.compare_dictionary(true, true, true).is_empty());
}

/// Test comparison realignment when pruning drops a whole word
#[test]
fn test_compare_dictionary_withDroppedWord_shouldRealign() {
    let doc = common::zero_word_document();

    // Only-changed mode: the surviving words have identical pronunciations
    assert!(doc.compare_dictionary(true, true, true).is_empty());

    // All aligned entries: "två" was dropped by pruning and is skipped
    let all = doc.compare_dictionary(true, true, false);
    let words: Vec<&str> = all.iter().map(|(w, _, _)| w.as_str()).collect();
    assert_eq!(words, vec!["ett", "tre"]);
    assert_eq!(all[0].1, all[0].2);
}
