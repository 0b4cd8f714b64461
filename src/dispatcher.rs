/*!
 * Format dispatch: from a file path to a caption track.
 *
 * The dispatcher checks that the path is a regular file, gates its bytes
 * through the UTF-8 guard, resolves the extension through the format table
 * and hands the content to the parser registered for that grammar.
 *
 * Formats are data, not control flow: `.txt` is an entry in the table that
 * resolves to the SRT grammar with an advisory, and adding a grammar means
 * registering another `CaptionParser`.
 */

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use log::debug;

use crate::caption_track::CaptionTrack;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Parsed};
use crate::encoding::is_well_formed_utf8;
use crate::errors::DispatchError;
use crate::file_utils::FileManager;
use crate::srt_parser::SrtParser;

/// Line grammars the crate can read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    Srt,
}

/// File formats recognised by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptionFormat {
    Srt,
    Txt,
}

// @const: extension -> (format, grammar, read with another format's grammar)
const FORMAT_TABLE: &[(&str, CaptionFormat, Grammar, bool)] = &[
    ("srt", CaptionFormat::Srt, Grammar::Srt, false),
    ("txt", CaptionFormat::Txt, Grammar::Srt, true),
];

impl CaptionFormat {
    /// Look up a format by extension, ignoring case
    pub fn from_extension(extension: &str) -> Option<Self> {
        FORMAT_TABLE
            .iter()
            .find(|(ext, ..)| ext.eq_ignore_ascii_case(extension))
            .map(|(_, format, ..)| *format)
    }

    fn row(self) -> &'static (&'static str, CaptionFormat, Grammar, bool) {
        FORMAT_TABLE
            .iter()
            .find(|(_, format, ..)| *format == self)
            .unwrap_or(&FORMAT_TABLE[0])
    }

    pub fn extension(self) -> &'static str {
        self.row().0
    }

    /// Grammar used to read this format
    pub fn grammar(self) -> Grammar {
        self.row().2
    }

    /// Whether the format is read with another format's grammar
    pub fn is_downgraded(self) -> bool {
        self.row().3
    }
}

impl fmt::Display for CaptionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

/// Anything that turns caption files into tracks
pub trait CaptionParser {
    /// Parse already decoded content into a track called `track_id`
    fn parse_content(&self, track_id: &str, content: &str) -> Result<Parsed<CaptionTrack>, DispatchError>;

    /// Read, check and parse the file at `path`
    fn parse(&self, path: &Path) -> Result<Parsed<CaptionTrack>, DispatchError> {
        let content = read_checked(path)?;
        let track_id = CaptionTrack::for_path(path).id().to_string();
        self.parse_content(&track_id, &content)
    }
}

impl CaptionParser for SrtParser {
    fn parse_content(&self, track_id: &str, content: &str) -> Result<Parsed<CaptionTrack>, DispatchError> {
        Ok(self.parse_str(track_id, content)?)
    }
}

/// Read the file at `path` and make sure it is UTF-8 before anything else
pub fn read_checked(path: &Path) -> Result<String, DispatchError> {
    if !FileManager::file_exists(path) {
        return Err(DispatchError::NotFound(path.to_path_buf()));
    }

    let bytes = FileManager::read_bytes(path).map_err(|source| DispatchError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if !is_well_formed_utf8(&bytes) {
        return Err(DispatchError::Encoding(path.to_path_buf()));
    }

    // The guard lets a few ill-formed sequences through; decoding catches them
    String::from_utf8(bytes).map_err(|_| DispatchError::Encoding(path.to_path_buf()))
}

/// Selects a parser from the file extension
pub struct FormatDispatcher {
    parsers: HashMap<Grammar, Box<dyn CaptionParser + Send + Sync>>,
}

impl FormatDispatcher {
    /// Dispatcher with every built-in grammar registered
    pub fn new() -> Self {
        let mut dispatcher = Self::empty();
        dispatcher.register(Grammar::Srt, SrtParser::new());
        dispatcher
    }

    /// Dispatcher with no grammar registered
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Register (or replace) the parser for a grammar
    pub fn register<P>(&mut self, grammar: Grammar, parser: P)
    where
        P: CaptionParser + Send + Sync + 'static,
    {
        self.parsers.insert(grammar, Box::new(parser));
    }

    /// Resolve the format of `path` from its extension
    pub fn resolve_format(path: &Path) -> Result<CaptionFormat, DispatchError> {
        let extension =
            FileManager::extension_of(path).ok_or_else(|| DispatchError::NoExtension(path.to_path_buf()))?;
        CaptionFormat::from_extension(&extension).ok_or(DispatchError::UnsupportedFormat(extension))
    }
}

impl Default for FormatDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptionParser for FormatDispatcher {
    /// Content without a path is taken to be SRT
    fn parse_content(&self, track_id: &str, content: &str) -> Result<Parsed<CaptionTrack>, DispatchError> {
        self.parsers
            .get(&Grammar::Srt)
            .ok_or_else(|| DispatchError::UnsupportedFormat(CaptionFormat::Srt.extension().to_string()))?
            .parse_content(track_id, content)
    }

    fn parse(&self, path: &Path) -> Result<Parsed<CaptionTrack>, DispatchError> {
        let content = read_checked(path)?;
        let format = Self::resolve_format(path)?;

        let parser = self
            .parsers
            .get(&format.grammar())
            .ok_or_else(|| DispatchError::UnsupportedFormat(format.extension().to_string()))?;

        debug!("Parsing {:?} as {:?} ({})", path, format.grammar(), format);

        let track_id = CaptionTrack::for_path(path).id().to_string();
        let mut parsed = parser.parse_content(&track_id, &content)?;

        if format.is_downgraded() {
            parsed.diagnostics.insert(
                0,
                Diagnostic::general(DiagnosticKind::TreatedAsSrt {
                    extension: format.extension().to_string(),
                }),
            );
        }

        Ok(parsed)
    }
}
