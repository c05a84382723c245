/*!
 * Tests for job list processing through the controller
 */

use anyhow::Result;
use std::fs;
use std::sync::Arc;

use wikitrans::app_controller::{Controller, RunOptions, RunSummary};
use wikitrans::file_utils::{FileManager, PageRecord};
use wikitrans::providers::mock::MockTranslator;

use crate::common;

const JOB_LIST: &str = "# source\tlang\ttarget\tlang
Atlantic Ocean\ten\t\tpt
Brazil\ten\t\tpt
Atlantic Ocean\ten\t\tfr
Atlantis\ten\t\tpt
";

fn controller(wiki: Arc<wikitrans::wiki::InMemoryWiki>) -> Controller {
    Controller::with_components(common::test_config(), wiki, Arc::new(common::atlantic_translator()))
}

/// Test a run over a job list with every kind of outcome
#[tokio::test]
async fn test_run_withMixedJobList_shouldCountEveryOutcome() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "jobs.tsv", JOB_LIST)?;
    let destination = temp_dir.path().join("out");
    let controller = controller(Arc::new(common::atlantic_wiki()));

    let options = RunOptions { destination: Some(destination.clone()), save: false };
    let summary = controller.run(&input, &options).await?;

    assert_eq!(
        summary,
        RunSummary { translated: 1, already_translated: 1, unsupported: 1, failed: 1 }
    );
    assert_eq!(summary.total(), 4);

    let path = FileManager::page_output_path(&destination, "Oceano Atlântico");
    let record: PageRecord = serde_json::from_str(&fs::read_to_string(path)?)?;
    assert_eq!(record.title, "Oceano Atlântico");
    assert!(record.text.contains("[[Litoral do Brasil|costa brasileira]]"));
    Ok(())
}

/// Test that saving publishes each translated page to the wiki
#[tokio::test]
async fn test_run_withSaveOption_shouldPublishTranslatedPages() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "jobs.tsv", "Atlantic Ocean\ten\tAtlântico\tpt\n")?;
    let wiki = Arc::new(common::atlantic_wiki());
    let controller = controller(wiki.clone());

    let options = RunOptions { destination: None, save: true };
    let summary = controller.run(&input, &options).await?;

    assert_eq!(summary.translated, 1);
    let saved = wiki.saved_pages();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0.title, "Atlântico");
    assert_eq!(saved[0].1, "Translated from the English article [[:en:Atlantic Ocean]]");
    assert_eq!(wiki.sitelinks().len(), 1);
    Ok(())
}

/// Test that a translator failure is counted and the run goes on
#[tokio::test]
async fn test_run_withFailingTranslator_shouldCountFailures() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "jobs.tsv",
        "Atlantic Ocean\ten\t\tpt\nCoastline of Brazil\ten\t\tpt\n",
    )?;
    let controller = Controller::with_components(
        common::test_config(),
        Arc::new(common::atlantic_wiki()),
        Arc::new(MockTranslator::failing()),
    );

    let summary = controller.run(&input, &RunOptions::default()).await?;

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.already_translated, 1);
    Ok(())
}

/// Test that a missing or malformed job list aborts the run
#[tokio::test]
async fn test_run_withInvalidJobList_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = controller(Arc::new(common::atlantic_wiki()));

    assert!(controller.run(&temp_dir.path().join("missing.tsv"), &RunOptions::default()).await.is_err());

    let malformed = common::create_test_file(temp_dir.path(), "bad.tsv", "Atlantic Ocean\ten\n")?;
    assert!(controller.run(&malformed, &RunOptions::default()).await.is_err());
    Ok(())
}

/// Test that controllers built from components need no provider check
#[test]
fn test_testConnection_withInjectedComponents_shouldSucceed() {
    let controller = controller(Arc::new(common::atlantic_wiki()));

    let result = tokio_test::block_on(async { controller.test_connection().await });

    assert!(result.is_ok());
}
