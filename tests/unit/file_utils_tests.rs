/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::Path;

use wikitrans::file_utils::{FileManager, PageRecord, TranslationJob};
use wikitrans::wiki::Page;
use crate::common;

/// Test that a well-formed job list is parsed line by line
#[test]
fn test_parseJobList_withValidLines_shouldReturnJobs() -> Result<()> {
    let content = "Atlantic Ocean\ten\t\tpt\nCoastline of Brazil\ten\tLitoral do Brasil\tpt\r\n";

    let jobs = FileManager::parse_job_list(content)?;

    assert_eq!(
        jobs,
        vec![
            TranslationJob {
                source_title: "Atlantic Ocean".to_string(),
                source_language: "en".to_string(),
                target_title: None,
                target_language: "pt".to_string(),
            },
            TranslationJob {
                source_title: "Coastline of Brazil".to_string(),
                source_language: "en".to_string(),
                target_title: Some("Litoral do Brasil".to_string()),
                target_language: "pt".to_string(),
            },
        ]
    );
    Ok(())
}

/// Test that blank and comment lines are ignored
#[test]
fn test_parseJobList_withBlankAndCommentLines_shouldSkipThem() -> Result<()> {
    let content = "# source\tlang\ttarget\tlang\n\nBrazil\ten\tBrasil\tpt\n";

    let jobs = FileManager::parse_job_list(content)?;

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].target_title.as_deref(), Some("Brasil"));
    Ok(())
}

/// Test that a line with the wrong number of fields is rejected
#[test]
fn test_parseJobList_withMissingField_shouldReportLine() {
    let content = "Brazil\ten\tpt\n";

    let error = FileManager::parse_job_list(content).unwrap_err();

    assert!(error.to_string().contains("Line 1"));
}

/// Test that a missing job list is reported
#[test]
fn test_readJobList_withNonExistentFile_shouldFail() {
    assert!(FileManager::read_job_list("non_existent_jobs.tsv").is_err());
}

/// Test that a job list is read from disk
#[test]
fn test_readJobList_withExistingFile_shouldParseIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "jobs.tsv", "Brazil\ten\t\tpt\n")?;

    let jobs = FileManager::read_job_list(&path)?;

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].source_title, "Brazil");
    Ok(())
}

/// Test that the output path sanitizes path separators
#[test]
fn test_pageOutputPath_withSlashInTitle_shouldStayInDestination() {
    let path = FileManager::page_output_path(Path::new("/tmp/out"), "AC/DC");

    assert_eq!(path, Path::new("/tmp/out/AC_DC.json"));
}

/// Test that persisted pages are written as title/text JSON
#[test]
fn test_persistPage_withTranslatedPage_shouldWriteJsonRecord() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let destination = temp_dir.path().join("pages");
    let page = Page::new("Oceano Atlântico", "pt", "O '''Oceano Atlântico'''...");

    let path = FileManager::persist_page(&page, &destination)?;

    assert_eq!(path, destination.join("Oceano Atlântico.json"));
    let record: PageRecord = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(record.title, "Oceano Atlântico");
    assert_eq!(record.text, page.text);
    Ok(())
}

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&test_subdir)?;

    assert!(FileManager::dir_exists(&test_subdir));
    Ok(())
}
