/*!
 * # mixalign - time-aligned labels from Waxholm .mix transcripts
 *
 * A Rust library for parsing the legacy line-oriented "Mix" speech-corpus
 * annotation format and deriving time-aligned phone and word labels.
 *
 * ## Features
 *
 * - Parse FR frame records (phonetic segmentation, timing, word annotation)
 * - Decode the legacy 6-glyph placeholder character set
 * - Per-record timestamps in seconds or frames, and adjacent-interval spans
 * - Empty-segment pruning, plosive merging, glottal-closure collapsing
 * - Phone, merged-phone and word interval extraction
 * - Pronunciation dictionary extraction and canonical-vs-spoken comparison
 * - Batch scanning over a corpus tree with skip-and-continue error handling
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `fr_record`: FR record parsing and role classification
 * - `mix_document`: document loading state machine and timing
 * - `segments`: pure sequence-to-sequence segment transforms
 * - `labels`: time-aligned label and dictionary extraction
 * - `text_utils`: legacy character set and phone-string helpers
 * - `app_config`: configuration management
 * - `app_controller`: batch driver over a corpus tree
 * - `file_utils`: file system operations
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod fr_record;
pub mod labels;
pub mod mix_document;
pub mod segments;
pub mod text_utils;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, MixError};
pub use fr_record::{FrRecord, RecordRole, SAMPLE_RATE};
pub use labels::Label;
pub use mix_document::MixDocument;
pub use segments::{
    collapse_glottal_closures, merge_plosive_pair, merge_plosive_records, prune_empty_silences,
};
pub use text_utils::{fix_accents, fix_text};
