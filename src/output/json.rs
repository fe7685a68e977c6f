//! JSON output for crawl results
//!
//! Each run writes two sibling files sharing one timestamp suffix:
//! `pages_<stamp>.json` (canonical URL -> body) and `forms_<stamp>.json`
//! (canonical URL -> form list). Both are pretty-printed with two-space
//! indentation and carry no schema version.

use crate::output::types::{CrawlResult, OutputResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp format shared by both output files
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Paths of the files written for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub pages: PathBuf,
    pub forms: PathBuf,
}

/// Returns the current local time formatted for output file names
pub fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Writes a crawl result into `output_dir` using the current time as suffix
///
/// The directory is created if it does not exist.
///
/// # Arguments
///
/// * `result` - The crawl result to persist
/// * `output_dir` - Directory that receives both files
///
/// # Returns
///
/// * `Ok(OutputFiles)` - Paths of the written files
/// * `Err(OutputError)` - Failed to create the directory, serialize or write
pub fn write_crawl_result(result: &CrawlResult, output_dir: &Path) -> OutputResult<OutputFiles> {
    write_crawl_result_with_stamp(result, output_dir, &timestamp())
}

/// Writes a crawl result with an explicit timestamp suffix
pub fn write_crawl_result_with_stamp(
    result: &CrawlResult,
    output_dir: &Path,
    stamp: &str,
) -> OutputResult<OutputFiles> {
    fs::create_dir_all(output_dir)?;

    let files = OutputFiles {
        pages: output_dir.join(format!("pages_{}.json", stamp)),
        forms: output_dir.join(format!("forms_{}.json", stamp)),
    };

    fs::write(&files.pages, serde_json::to_string_pretty(&result.pages)?)?;
    fs::write(&files.forms, serde_json::to_string_pretty(&result.forms)?)?;

    tracing::debug!(
        "Wrote {} and {}",
        files.pages.display(),
        files.forms.display()
    );

    Ok(files)
}
