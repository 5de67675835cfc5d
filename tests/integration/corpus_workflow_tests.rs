/*!
 * End-to-end corpus scanning tests
 */

use anyhow::Result;

use mixalign::app_config::Config;
use mixalign::app_controller::Controller;
use mixalign::MixDocument;

use crate::common;

/// Test scanning a corpus directory with one good and one ill-formed file
#[test]
fn test_run_check_withMixedCorpus_shouldReportSkipped() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "good.mix", common::SAMPLE_MIX)?;
    // Missing the terminating OK record
    common::create_test_file(
        &dir,
        "truncated.mix",
        "FR 100\t #A\t>w ja\t 0.100 sec\nFR 200\t $B\t 0.200 sec\n",
    )?;
    // Not a transcript at all; must be ignored by extension
    common::create_test_file(&dir, "notes.txt", "nothing to see here")?;

    let controller = Controller::new_for_test()?;
    let report = controller.run_check(&dir)?;

    assert_eq!(report.total, 2);
    assert_eq!(report.ok, 1);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.ill_formed.len(), 1);
    assert!(report.ill_formed[0].ends_with("truncated.mix"));
    assert!(report.failed.is_empty());
    Ok(())
}

/// Test checking a single file path instead of a directory
#[test]
fn test_run_check_withSingleFile_shouldProcessIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let file = common::create_test_file(&dir, "good.mix", common::SAMPLE_MIX)?;

    let controller = Controller::new_for_test()?;
    let report = controller.run_check(&file)?;
    assert_eq!(report.total, 1);
    assert_eq!(report.ok, 1);
    Ok(())
}

/// Test corpus-wide dictionary aggregation
#[test]
fn test_run_dict_withCorpus_shouldAggregatePronunciations() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "a.mix", common::SAMPLE_MIX)?;
    common::create_test_file(&dir, "b.mix", common::ZERO_WORD_MIX)?;

    let controller = Controller::new_for_test()?;
    let dictionary = controller.run_dict(&dir)?;

    let vill = dictionary.get("vill").expect("vill is in the dictionary");
    assert!(vill.contains("V ˈI L+"));

    // Entries from both documents are merged
    assert!(dictionary.contains_key("jag"));
    assert!(dictionary.contains_key("två"));

    // Duplicate pronunciations collapse into the set
    let xx = dictionary.get("XX").expect("XX is in the dictionary");
    assert_eq!(xx.len(), 1);
    Ok(())
}

/// Test loading a document from disk end to end
#[test]
fn test_from_path_withSampleOnDisk_shouldMatchInMemoryParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let file = common::create_test_file(&dir, "sample.mix", common::SAMPLE_MIX)?;

    let doc = MixDocument::from_path(&file)?;
    let reference = common::sample_document();
    assert_eq!(doc.records.len(), reference.records.len());
    assert_eq!(doc.text, reference.text);
    assert_eq!(doc.times(false), reference.times(false));
    assert_eq!(doc.path, file);
    Ok(())
}

/// Test that a nonexistent input path is reported as an error
#[test]
fn test_run_check_withMissingPath_shouldFail() {
    let controller = Controller::new_for_test().unwrap();
    assert!(controller.run_check(std::path::Path::new("/no/such/corpus")).is_err());
}

/// Test config round trip through the JSON file
#[test]
fn test_config_save_and_load_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.fix_accents = false;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert!(!loaded.fix_accents);
    assert_eq!(loaded.corpus_extension, "mix");

    // A missing file yields (and writes) the defaults
    let other = temp_dir.path().join("fresh.json");
    let fresh = Config::from_file_or_default(&other)?;
    assert!(fresh.fix_accents);
    assert!(other.exists());
    Ok(())
}
