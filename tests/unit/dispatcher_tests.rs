/*!
 * Tests for format dispatch and the UTF-8 guard
 */

use anyhow::Result;

use captionkit::diagnostics::DiagnosticKind;
use captionkit::dispatcher::{CaptionFormat, CaptionParser, FormatDispatcher, Grammar};
use captionkit::encoding::is_well_formed_utf8;
use captionkit::errors::{DispatchError, ParseErrorKind};
use captionkit::srt_parser::SrtParser;
use crate::common;

#[test]
fn test_is_well_formed_utf8_withMultiByteText_shouldAccept() {
    assert!(is_well_formed_utf8("héllo ✓ 🎬".as_bytes()));
    assert!(is_well_formed_utf8(b""));
}

#[test]
fn test_is_well_formed_utf8_withBrokenSequences_shouldReject() {
    // Latin-1 "é"
    assert!(!is_well_formed_utf8(&[b'c', b'a', b'f', 0xE9]));
    // Lead byte with nothing after it
    assert!(!is_well_formed_utf8(&[0xC3]));
    // Lone continuation byte
    assert!(!is_well_formed_utf8(&[0x80, b'a']));
    assert!(!is_well_formed_utf8(&[0xFF]));
}

#[test]
fn test_from_extension_shouldIgnoreCase() {
    assert_eq!(CaptionFormat::from_extension("SRT"), Some(CaptionFormat::Srt));
    assert_eq!(CaptionFormat::from_extension("Txt"), Some(CaptionFormat::Txt));
    assert_eq!(CaptionFormat::from_extension("vtt"), None);
}

#[test]
fn test_txt_format_shouldUseSrtGrammarAndBeDowngraded() {
    assert_eq!(CaptionFormat::Txt.grammar(), Grammar::Srt);
    assert!(CaptionFormat::Txt.is_downgraded());
    assert!(!CaptionFormat::Srt.is_downgraded());
}

#[test]
fn test_parse_withSrtFile_shouldNameTrackAfterFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "boss-fight.srt")?;

    let parsed = FormatDispatcher::new().parse(&path)?;

    assert_eq!(parsed.value.id(), "bossfight");
    assert_eq!(parsed.value.len(), 3);
    assert!(parsed.diagnostics.is_empty());
    Ok(())
}

#[test]
fn test_parse_withUppercaseExtension_shouldParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "intro.SRT")?;

    let parsed = FormatDispatcher::new().parse(&path)?;

    assert_eq!(parsed.value.len(), 3);
    Ok(())
}

#[test]
fn test_parse_withTxtFile_shouldLeadWithTreatedAsSrt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "notes.txt")?;

    let parsed = FormatDispatcher::new().parse(&path)?;

    assert_eq!(parsed.value.len(), 3);
    assert!(matches!(
        &parsed.diagnostics[0].kind,
        DiagnosticKind::TreatedAsSrt { extension } if extension == "txt"
    ));
    Ok(())
}

#[test]
fn test_parse_withUnknownExtension_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "intro.vtt")?;

    let err = FormatDispatcher::new().parse(&path).unwrap_err();

    assert!(matches!(err, DispatchError::UnsupportedFormat(ext) if ext == "vtt"));
    Ok(())
}

#[test]
fn test_parse_withoutExtension_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "intro")?;

    let err = FormatDispatcher::new().parse(&path).unwrap_err();

    assert!(matches!(err, DispatchError::NoExtension(_)));
    Ok(())
}

#[test]
fn test_parse_withMissingFile_shouldFailBeforeLookingAtExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let err = FormatDispatcher::new()
        .parse(&temp_dir.path().join("missing.vtt"))
        .unwrap_err();

    assert!(matches!(err, DispatchError::NotFound(_)));
    Ok(())
}

#[test]
fn test_parse_withDirectory_shouldFailAsNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().join("folder.srt");
    std::fs::create_dir(&dir)?;

    let err = FormatDispatcher::new().parse(&dir).unwrap_err();

    assert!(matches!(err, DispatchError::NotFound(_)));
    Ok(())
}

#[test]
fn test_parse_withLatin1Bytes_shouldFailWithEncoding() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut bytes = b"1\n00:00:01,000 --> 00:00:02,000\nCaf".to_vec();
    bytes.push(0xE9);
    let path = common::create_binary_file(temp_dir.path(), "latin.srt", &bytes)?;

    let err = FormatDispatcher::new().parse(&path).unwrap_err();

    assert!(matches!(err, DispatchError::Encoding(_)));
    assert!(err.to_string().contains("UTF-8"));
    Ok(())
}

#[test]
fn test_parse_withGrammarError_shouldWrapParseError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.srt", "2\n00:00:01,000 --> 00:00:02,000\nA\n")?;

    let err = FormatDispatcher::new().parse(&path).unwrap_err();

    match err {
        DispatchError::Parse(parse_error) => {
            assert_eq!(parse_error.line, 1);
            assert_eq!(parse_error.kind, ParseErrorKind::UnexpectedIndex { found: 2, expected: 1 });
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_parse_withNoRegisteredGrammar_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "intro.srt")?;

    let err = FormatDispatcher::empty().parse(&path).unwrap_err();

    assert!(matches!(err, DispatchError::UnsupportedFormat(_)));
    Ok(())
}

#[test]
fn test_register_shouldMakeGrammarAvailable() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "intro.srt")?;

    let mut dispatcher = FormatDispatcher::empty();
    dispatcher.register(Grammar::Srt, SrtParser::new());

    assert_eq!(dispatcher.parse(&path)?.value.len(), 3);
    Ok(())
}
