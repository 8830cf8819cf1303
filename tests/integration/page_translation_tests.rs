/*!
 * End-to-end tests for translating pages on disk
 */

use std::fs;
use anyhow::Result;
use site_translate::app_controller::{Controller, JobOutcome, TranslationJob};
use site_translate::errors::AppError;
use site_translate::language_utils::TargetLocale;
use site_translate::providers::mock::MockTranslator;
use crate::common;

/// Test the basic translation of a page with front matter
#[tokio::test]
async fn test_run_withWorkingTranslator_shouldWriteTranslatedPageWithUpdatedLang() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "index.html", "---\nlang: en\n---\n<p>Hello</p>")?;

    let mock = MockTranslator::with_responses([("FR", "<p>Bonjour</p>")]);
    let config = common::test_config(temp_dir.path(), &["index.html"], &[TargetLocale::Fr]);
    let controller = Controller::with_config(config, Box::new(mock.clone()))?;

    let summary = controller.run(false).await;

    let output = fs::read_to_string(temp_dir.path().join("fr").join("index.html"))?;
    assert_eq!(output, "---\nlang: fr\n---\n<p>Bonjour</p>");
    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.fallbacks, 0);
    assert_eq!(mock.request_count(), 1);

    Ok(())
}

/// Test the parameters passed to the translator
#[tokio::test]
async fn test_run_withDefaultSettings_shouldRequestHtmlAwareTranslationFromEnglish() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "index.html", common::SAMPLE_PAGE)?;

    let mock = MockTranslator::working();
    let config = common::test_config(temp_dir.path(), &["index.html"], &[TargetLocale::Es]);
    let controller = Controller::with_config(config, Box::new(mock.clone()))?;

    controller.run(false).await;

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].text, common::SAMPLE_BODY);
    assert_eq!(requests[0].source_language, "EN");
    assert_eq!(requests[0].target_language, "ES");
    assert!(requests[0].preserve_formatting);
    assert_eq!(requests[0].tag_handling.as_deref(), Some("html"));

    Ok(())
}

/// Test that a failing translator still produces the page with the original body.
///
/// The job counts as succeeded; the fallback counter is what tells it apart
/// from a real translation.
#[tokio::test]
async fn test_run_withFailingTranslator_shouldWriteOriginalBodyAndCountSuccess() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "index.html", common::SAMPLE_PAGE)?;

    let config = common::test_config(temp_dir.path(), &["index.html"], &[TargetLocale::Fr, TargetLocale::Es]);
    let controller = Controller::with_config(config, Box::new(MockTranslator::failing()))?;

    let summary = controller.run(false).await;

    for locale in ["fr", "es"] {
        let output = fs::read_to_string(temp_dir.path().join(locale).join("index.html"))?;
        assert_eq!(
            output,
            format!("---\nlayout: default\ntitle: Home\nlang: {}\n---\n{}", locale, common::SAMPLE_BODY)
        );
    }
    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.fallbacks, 2);
    assert_eq!(summary.failed, 0);

    Ok(())
}

/// Test that the fallback is reported per job
#[tokio::test]
async fn test_translate_page_withFailingLocale_shouldReturnFallbackOutcome() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "contact.html", common::SAMPLE_PAGE)?;

    let config = common::test_config(temp_dir.path(), &["contact.html"], &[TargetLocale::Fr, TargetLocale::Es]);
    let controller = Controller::with_config(config, Box::new(MockTranslator::failing_for(&["ES"])))?;

    let fr = TranslationJob::new(temp_dir.path(), "contact.html", TargetLocale::Fr);
    let es = TranslationJob::new(temp_dir.path(), "contact.html", TargetLocale::Es);

    assert_eq!(controller.translate_page(&fr, false).await?, JobOutcome::Translated);
    match controller.translate_page(&es, false).await? {
        JobOutcome::FallbackOriginal { reason } => assert!(reason.contains("Quota exceeded")),
        other => panic!("expected fallback, got {:?}", other),
    }

    let fr_output = fs::read_to_string(&fr.output_path)?;
    assert!(fr_output.ends_with(&format!("[FR] {}", common::SAMPLE_BODY)));

    Ok(())
}

/// Test that dry runs neither write files nor call the translator
#[tokio::test]
async fn test_run_withDryRun_shouldNotWriteOrTranslate() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let pages = ["index.html", "contact.html", "resources/index.html"];
    for page in pages {
        common::create_test_file(temp_dir.path(), page, common::SAMPLE_PAGE)?;
    }
    let files_before = common::count_files(temp_dir.path())?;

    let mock = MockTranslator::working();
    let config = common::test_config(temp_dir.path(), &pages, &TargetLocale::ALL);
    let controller = Controller::with_config(config, Box::new(mock.clone()))?;

    let summary = controller.run(true).await;

    assert_eq!(mock.request_count(), 0);
    assert_eq!(common::count_files(temp_dir.path())?, files_before);
    assert!(!temp_dir.path().join("fr").exists());
    assert!(!temp_dir.path().join("es").exists());
    assert_eq!(summary.attempted, 6);
    assert_eq!(summary.succeeded, 6);
    assert!(summary.dry_run);

    Ok(())
}

/// Test the character count reported by a dry run
#[tokio::test]
async fn test_translate_page_withDryRun_shouldReportBodyCharacters() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "index.html", "---\nlang: en\n---\n<p>Café</p>")?;

    let config = common::test_config(temp_dir.path(), &["index.html"], &[TargetLocale::Fr]);
    let controller = Controller::with_config(config, Box::new(MockTranslator::working()))?;
    let job = TranslationJob::new(temp_dir.path(), "index.html", TargetLocale::Fr);

    assert_eq!(
        controller.translate_page(&job, true).await?,
        JobOutcome::DryRun { characters: 11 }
    );

    Ok(())
}

/// Test that missing sources are skipped without counting as attempts
#[tokio::test]
async fn test_run_withMissingSource_shouldSkipPageAndContinue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "contact.html", common::SAMPLE_PAGE)?;

    let mock = MockTranslator::working();
    let config = common::test_config(temp_dir.path(), &["missing.html", "contact.html"], &TargetLocale::ALL);
    let controller = Controller::with_config(config, Box::new(mock.clone()))?;

    let summary = controller.run(false).await;

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(mock.request_count(), 2);
    assert!(!temp_dir.path().join("fr").join("missing.html").exists());
    assert!(temp_dir.path().join("es").join("contact.html").exists());

    Ok(())
}

/// Test the direct job call on a missing source
#[tokio::test]
async fn test_translate_page_withMissingSource_shouldReturnSourceMissing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path(), &["index.html"], &[TargetLocale::Fr]);
    let mock = MockTranslator::working();
    let controller = Controller::with_config(config, Box::new(mock.clone()))?;
    let job = TranslationJob::new(temp_dir.path(), "index.html", TargetLocale::Fr);

    assert_eq!(controller.translate_page(&job, false).await?, JobOutcome::SourceMissing);
    assert_eq!(mock.request_count(), 0);

    Ok(())
}

/// Test that pages without front matter are translated whole and get no header
#[tokio::test]
async fn test_run_withoutFrontMatter_shouldTranslateWholeDocument() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let page = "<html><body><p>Hello</p></body></html>\n";
    common::create_test_file(temp_dir.path(), "newsletter_sub.html", page)?;

    let mock = MockTranslator::working();
    let config = common::test_config(temp_dir.path(), &["newsletter_sub.html"], &[TargetLocale::Fr]);
    let controller = Controller::with_config(config, Box::new(mock.clone()))?;

    controller.run(false).await;

    let output = fs::read_to_string(temp_dir.path().join("fr").join("newsletter_sub.html"))?;
    assert_eq!(output, format!("[FR] {}", page));
    assert_eq!(mock.requests()[0].text, page);

    Ok(())
}

/// Test that a missing lang field is added to the front matter
#[tokio::test]
async fn test_run_withoutLangField_shouldAppendLang() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "whoweare.html", "---\nlayout: default\n\n---\n<p>Team</p>\n")?;

    let config = common::test_config(temp_dir.path(), &["whoweare.html"], &[TargetLocale::Es]);
    let controller = Controller::with_config(config, Box::new(MockTranslator::with_responses([("ES", "<p>Equipo</p>\n")])))?;

    controller.run(false).await;

    let output = fs::read_to_string(temp_dir.path().join("es").join("whoweare.html"))?;
    assert_eq!(output, "---\nlayout: default\nlang: es\n---\n<p>Equipo</p>\n");

    Ok(())
}

/// Test that existing outputs are replaced and nested directories created
#[tokio::test]
async fn test_run_withExistingOutput_shouldOverwriteIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "resources/consent-form.html", common::SAMPLE_PAGE)?;
    common::create_test_file(temp_dir.path(), "fr/resources/consent-form.html", "stale")?;

    let config = common::test_config(temp_dir.path(), &["resources/consent-form.html"], &[TargetLocale::Fr]);
    let controller = Controller::with_config(config, Box::new(MockTranslator::working()))?;

    let summary = controller.run(false).await;

    let output = fs::read_to_string(temp_dir.path().join("fr/resources/consent-form.html"))?;
    assert!(output.starts_with("---\nlayout: default\ntitle: Home\nlang: fr\n---\n"));
    assert_ne!(output, "stale");
    assert_eq!(summary.succeeded, 1);

    Ok(())
}

/// Test that a write failure fails only its own job
#[tokio::test]
async fn test_run_withUnwritableOutput_shouldCountFailureAndContinue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "index.html", common::SAMPLE_PAGE)?;
    // A regular file where the fr/ directory must go
    common::create_test_file(temp_dir.path(), "fr", "not a directory")?;

    let config = common::test_config(temp_dir.path(), &["index.html"], &TargetLocale::ALL);
    let controller = Controller::with_config(config, Box::new(MockTranslator::working()))?;

    let summary = controller.run(false).await;

    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.succeeded, 1);
    assert!(temp_dir.path().join("es").join("index.html").exists());

    let report = summary.report_lines().join("\n");
    assert!(report.contains("Translation complete: 1/2 files"));

    Ok(())
}

/// Test that a run sends pages in configured order with locales nested inside each page
#[tokio::test]
async fn test_run_withSeveralPages_shouldTranslateInJobOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "index.html", "---\nlang: en\n---\n<p>Index</p>\n")?;
    common::create_test_file(temp_dir.path(), "contact.html", "---\nlang: en\n---\n<p>Contact</p>\n")?;

    let mock = MockTranslator::working();
    let config = common::test_config(
        temp_dir.path(),
        &["index.html", "missing.html", "contact.html"],
        &TargetLocale::ALL,
    );
    let controller = Controller::with_config(config, Box::new(mock.clone()))?;
    let planned: Vec<String> = controller.jobs()
        .into_iter()
        .filter(|job| job.source_path.exists())
        .map(|job| job.locale.api_code().to_string())
        .collect();

    let summary = controller.run(false).await;

    let sent: Vec<(String, String)> = mock.requests()
        .into_iter()
        .map(|request| (request.text, request.target_language))
        .collect();
    assert_eq!(sent, vec![
        ("<p>Index</p>\n".to_string(), "FR".to_string()),
        ("<p>Index</p>\n".to_string(), "ES".to_string()),
        ("<p>Contact</p>\n".to_string(), "FR".to_string()),
        ("<p>Contact</p>\n".to_string(), "ES".to_string()),
    ]);
    let sent_languages: Vec<String> = sent.into_iter().map(|(_, language)| language).collect();
    assert_eq!(sent_languages, planned);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.attempted, 4);

    Ok(())
}

/// Test that the failed job reports which output could not be written
#[tokio::test]
async fn test_translate_page_withUnwritableOutput_shouldReturnOutputWriteError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "index.html", common::SAMPLE_PAGE)?;
    common::create_test_file(temp_dir.path(), "fr", "not a directory")?;

    let config = common::test_config(temp_dir.path(), &["index.html"], &[TargetLocale::Fr]);
    let controller = Controller::with_config(config, Box::new(MockTranslator::working()))?;
    let job = TranslationJob::new(temp_dir.path(), "index.html", TargetLocale::Fr);

    match controller.translate_page(&job, false).await {
        Err(AppError::OutputWrite { path, .. }) => assert_eq!(path, job.output_path),
        other => panic!("expected an output write error, got {:?}", other),
    }

    Ok(())
}

/// Test that a CRLF page is written back with CRLF delimiter lines
#[tokio::test]
async fn test_run_withCrlfPage_shouldKeepCrlfLineEndings() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "index.html", "---\r\nlayout: default\r\nlang: en\r\n---\r\n<p>Hello</p>\r\n")?;

    let config = common::test_config(temp_dir.path(), &["index.html"], &[TargetLocale::Es]);
    let controller = Controller::with_config(config, Box::new(MockTranslator::with_responses([("ES", "<p>Hola</p>\r\n")])))?;

    controller.run(false).await;

    let output = fs::read_to_string(temp_dir.path().join("es").join("index.html"))?;
    assert_eq!(output, "---\r\nlayout: default\r\nlang: es\r\n---\r\n<p>Hola</p>\r\n");

    Ok(())
}
