/*!
 * Integration tests for the caption processing workflow
 */

use anyhow::Result;

use captionkit::diagnostics::DiagnosticKind;
use captionkit::dispatcher::{CaptionParser, FormatDispatcher};
use captionkit::errors::DispatchError;
use captionkit::export::LocalizationExporter;
use captionkit::validation::ValidationService;
use crate::common;

/// Test that a file can be read, validated and exported in one pass
#[test]
fn test_caption_workflow_withFullProcess_shouldSucceed() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "Chapter 1.srt")?;

    // 1. Dispatch on the extension and parse
    let parsed = FormatDispatcher::new().parse(&path)?;
    assert!(parsed.diagnostics.is_empty());
    let track = parsed.into_value();
    assert_eq!(track.id(), "Chapter 1");

    // 2. Validate
    let report = ValidationService::new().validate(&track);
    assert!(report.is_success(), "sample should validate: {}", report);

    // 3. Export
    let export = LocalizationExporter::new().export(&track)?;
    assert_eq!(export.captions[0].key, "Chapter 1 0");
    assert_eq!(export.captions[0].text, "This is a test subtitle.\n");

    // 4. Serialize
    let json = serde_json::to_value(&export)?;
    assert_eq!(json["intervals"][1]["key"], "Chapter 1 1");
    assert_eq!(json["intervals"][1]["entry_seconds"], 5.0);
    Ok(())
}

#[test]
fn test_caption_workflow_withBomAndCrlf_shouldParseLikePlainFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let plain = common::create_test_subtitle(temp_dir.path(), "plain.srt")?;
    let windows_content = format!("\u{feff}{}", common::SAMPLE_SRT.replace('\n', "\r\n"));
    let windows = common::create_test_file(temp_dir.path(), "windows.srt", &windows_content)?;

    let dispatcher = FormatDispatcher::new();
    let plain = dispatcher.parse(&plain)?.into_value();
    let windows = dispatcher.parse(&windows)?.into_value();

    assert_eq!(plain.entries(), windows.entries());
    Ok(())
}

#[test]
fn test_caption_workflow_withBadEncodingAndUnknownExtension_shouldReportEncoding() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_binary_file(temp_dir.path(), "legacy.vtt", &[b'1', b'\n', 0xFF, 0xFE])?;

    let err = FormatDispatcher::new().parse(&path).unwrap_err();

    assert!(matches!(err, DispatchError::Encoding(_)));
    Ok(())
}

#[test]
fn test_caption_workflow_withTxtAndStrayLines_shouldKeepAdvisoriesInOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "\n1\n00:00:01,000 --> 00:00:02,000\nHello\n";
    let path = common::create_test_file(temp_dir.path(), "notes.txt", content)?;

    let parsed = FormatDispatcher::new().parse(&path)?;

    assert_eq!(parsed.diagnostics.len(), 2);
    assert!(matches!(parsed.diagnostics[0].kind, DiagnosticKind::TreatedAsSrt { .. }));
    assert_eq!(parsed.diagnostics[1].kind, DiagnosticKind::StrayBlankLine);
    assert_eq!(parsed.diagnostics[1].line, Some(1));
    Ok(())
}

#[test]
fn test_caption_workflow_withEmptyFile_shouldValidateButNotExport() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "empty.srt", "")?;

    let parsed = FormatDispatcher::new().parse(&path)?;
    assert!(parsed.has(|kind| matches!(kind, DiagnosticKind::EmptyTrack)));

    let report = ValidationService::new().validate(&parsed.value);
    assert!(report.is_success());
    assert!(LocalizationExporter::new().export(&parsed.value).is_err());
    Ok(())
}
