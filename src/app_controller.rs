use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::mix_document::MixDocument;

// @module: Batch driver over a corpus tree

/// Outcome of scanning a corpus tree: which documents loaded, which were
/// ill-formed, and which failed to parse at all.
///
/// Skip-and-continue is the only recovery policy; accounting for skipped
/// documents is this driver's job, not the parser's.
#[derive(Debug, Default)]
pub struct ScanReport {
    // @field: Documents inspected
    pub total: usize,

    // @field: Well-formed documents
    pub ok: usize,

    // @field: Documents missing Begin/End bracketing
    pub ill_formed: Vec<PathBuf>,

    // @field: Documents that could not be parsed, with the error text
    pub failed: Vec<(PathBuf, String)>,
}

impl ScanReport {
    pub fn skipped(&self) -> usize {
        self.ill_formed.len() + self.failed.len()
    }
}

/// Main application controller for corpus processing
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // Resolve an input path to the list of transcript files under it.
    fn collect_inputs(&self, input: &Path) -> Result<Vec<PathBuf>> {
        if FileManager::file_exists(input) {
            return Ok(vec![input.to_path_buf()]);
        }
        if FileManager::dir_exists(input) {
            let files = FileManager::find_files(input, &self.config.corpus_extension)?;
            if files.is_empty() {
                return Err(anyhow!(
                    "No .{} files found under {:?}",
                    self.config.corpus_extension,
                    input
                ));
            }
            return Ok(files);
        }
        Err(anyhow!("Input path does not exist: {:?}", input))
    }

    fn progress_bar(len: usize) -> ProgressBar {
        let pb = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }

    /// Scan a file or corpus tree, reporting ill-formed and unparseable
    /// documents.
    pub fn run_check(&self, input: &Path) -> Result<ScanReport> {
        let files = self.collect_inputs(input)?;
        let mut report = ScanReport {
            total: files.len(),
            ..ScanReport::default()
        };
        let pb = Self::progress_bar(files.len());
        for file in &files {
            pb.set_message(file.display().to_string());
            match MixDocument::from_path(file) {
                Ok(doc) => {
                    if doc.check(true) {
                        report.ok += 1;
                    } else {
                        report.ill_formed.push(file.clone());
                    }
                }
                Err(e) => {
                    warn!("{}: {}", file.display(), e);
                    report.failed.push((file.clone(), e.to_string()));
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();
        info!(
            "Checked {} documents: {} ok, {} skipped",
            report.total,
            report.ok,
            report.skipped()
        );
        Ok(report)
    }

    /// Aggregate the corrected-pronunciation dictionary over a file or
    /// corpus tree: word to the set of distinct pronunciations observed.
    pub fn run_dict(&self, input: &Path) -> Result<BTreeMap<String, BTreeSet<String>>> {
        let files = self.collect_inputs(input)?;
        let mut dictionary: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let pb = Self::progress_bar(files.len());
        for file in &files {
            pb.set_message(file.display().to_string());
            match MixDocument::from_path(file) {
                Ok(doc) => {
                    for (word, pron) in doc.dictionary_list(self.config.fix_accents) {
                        if word.is_empty() {
                            continue;
                        }
                        dictionary.entry(word).or_default().insert(pron);
                    }
                }
                Err(e) => {
                    warn!("skipping {}: {}", file.display(), e);
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();
        Ok(dictionary)
    }

    /// Print per-record timestamps for one document.
    pub fn run_times(&self, file: &Path, as_frames: bool) -> Result<()> {
        let doc = MixDocument::from_path(file)?;
        let times = doc.times(as_frames);
        if times.is_empty() {
            return Err(anyhow!("{}: no usable timing information", file.display()));
        }
        for time in times {
            if as_frames {
                println!("{}", time as u64);
            } else {
                println!("{}", time);
            }
        }
        Ok(())
    }

    /// Print time-aligned phone labels for one document.
    pub fn run_phones(&self, file: &Path, merge: bool, prune: bool) -> Result<()> {
        let doc = MixDocument::from_path(file)?;
        let labels = if merge {
            doc.merged_plosives(prune)
        } else if prune {
            doc.prune_empty_labels()
        } else {
            doc.phone_label_tuples(false, self.config.fix_accents)
        };
        if labels.is_empty() {
            return Err(anyhow!("{}: no phone labels derived", file.display()));
        }
        debug!("{}: {} phone labels", file.display(), labels.len());
        for label in labels {
            println!("{}", label);
        }
        Ok(())
    }

    /// Print time-aligned word labels for one document.
    pub fn run_words(&self, file: &Path) -> Result<()> {
        let doc = MixDocument::from_path(file)?;
        let labels = doc.word_label_tuples();
        if labels.is_empty() {
            return Err(anyhow!("{}: no word labels derived", file.display()));
        }
        for label in labels {
            println!("{}", label);
        }
        Ok(())
    }

    /// Print canonical-vs-spoken pronunciation differences for one document.
    pub fn run_compare(&self, file: &Path, all: bool) -> Result<()> {
        let doc = MixDocument::from_path(file)?;
        let triples = doc.compare_dictionary(
            self.config.fix_accents,
            self.config.merge_plosives,
            !all,
        );
        for (word, canonical, spoken) in triples {
            println!("{}\t{}\t{}", word, canonical, spoken);
        }
        Ok(())
    }

    /// Print the free-text line of one document.
    pub fn run_text(&self, file: &Path) -> Result<()> {
        let doc = MixDocument::from_path(file)?;
        match doc.text {
            Some(text) => {
                println!("{}", text);
                Ok(())
            }
            None => Err(anyhow!("{}: no TEXT section", file.display())),
        }
    }

    /// Print the derived phoneme string of one document.
    pub fn run_phoneme_string(&self, file: &Path) -> Result<()> {
        let doc = MixDocument::from_path(file)?;
        println!(
            "{}",
            doc.phoneme_string(self.config.insert_pauses, self.config.fix_accents)
        );
        Ok(())
    }
}
