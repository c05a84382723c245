use anyhow::{Context, Result, anyhow};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::wiki::Page;

// @module: File and directory utilities

/// One line of the job list: translate `source_title` into `target_language`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    pub source_title: String,
    pub source_language: String,
    /// Title of the new page; `None` means the title is translated
    pub target_title: Option<String>,
    pub target_language: String,
}

/// JSON artifact written for each translated page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub title: String,
    pub text: String,
}

impl From<&Page> for PageRecord {
    fn from(page: &Page) -> Self {
        Self {
            title: page.title.clone(),
            text: page.text.clone(),
        }
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    /// Read the tab-separated job list
    pub fn read_job_list<P: AsRef<Path>>(path: P) -> Result<Vec<TranslationJob>> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Err(anyhow!("File {:?} doesn't exist", path));
        }
        Self::parse_job_list(&Self::read_to_string(path)?)
    }

    /// Parse job list lines: `source_page \t source_language \t target_page \t target_language`
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn parse_job_list(content: &str) -> Result<Vec<TranslationJob>> {
        let mut jobs = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            let [source_title, source_language, target_title, target_language] = fields[..] else {
                return Err(anyhow!(
                    "Line {}: expected 4 tab-separated fields, found {}",
                    index + 1,
                    fields.len()
                ));
            };

            if source_title.is_empty() || source_language.is_empty() || target_language.is_empty() {
                return Err(anyhow!("Line {}: source page and both languages are required", index + 1));
            }

            jobs.push(TranslationJob {
                source_title: source_title.to_string(),
                source_language: source_language.to_string(),
                target_title: (!target_title.is_empty()).then(|| target_title.to_string()),
                target_language: target_language.to_string(),
            });
        }

        debug!("Read {} jobs", jobs.len());
        Ok(jobs)
    }

    /// `<destination>/<title>.json`, with path separators in the title replaced
    pub fn page_output_path<P: AsRef<Path>>(destination: P, title: &str) -> PathBuf {
        let file_stem: String = title
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        destination.as_ref().join(format!("{}.json", file_stem))
    }

    /// Persist a page as `{"title": ..., "text": ...}` in the destination directory
    pub fn persist_page<P: AsRef<Path>>(page: &Page, destination: P) -> Result<PathBuf> {
        let destination = destination.as_ref();
        Self::ensure_dir(destination)?;

        let path = Self::page_output_path(destination, &page.title);
        let json = serde_json::to_string(&PageRecord::from(page))
            .context("Failed to serialize page")?;
        Self::write_to_file(&path, &json)?;

        debug!("Persisted '{}' to {:?}", page.title, path);
        Ok(path)
    }
}
