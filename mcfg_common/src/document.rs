//! Parameter document model.
//!
//! The document is an ordered sequence of raw lines, each carrying its own
//! `\r\n` terminator. Index 0 is the checksum header. Blocks start after a
//! `[Name]` header line and end at the first bare-terminator line or at the
//! end of the sequence.
//!
//! All block-scoped operations tolerate absence: a missing block or key makes
//! reads return `None` and writes do nothing. Lines are never reordered,
//! inserted or removed after parsing; only their contents are replaced.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ops::Range;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::{CHECKSUM_PREFIX, LINE_TERMINATOR};
use crate::status::StatusChannel;

/// Block-scoped `key → value` mapping. Keys keep their trailing `=`.
pub type ParamMap = BTreeMap<String, i32>;

/// Document loading/saving error.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// File could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// First line is not `Checksum=<n>`.
    #[error("document does not start with a {CHECKSUM_PREFIX} line")]
    MissingChecksumHeader,
}

/// On-disk text encoding, preserved across load/save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// Bytes that were not valid UTF-8, read one byte per char.
    Latin1,
}

impl TextEncoding {
    fn decode(bytes: Vec<u8>) -> (String, Self) {
        match String::from_utf8(bytes) {
            Ok(text) => (text, Self::Utf8),
            Err(e) => {
                let text = e.into_bytes().into_iter().map(char::from).collect();
                (text, Self::Latin1)
            }
        }
    }

    fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
        }
    }
}

/// Line-oriented configuration document.
#[derive(Debug, Clone)]
pub struct ParameterDocument {
    lines: Vec<String>,
    encoding: TextEncoding,
    status: StatusChannel,
}

impl ParameterDocument {
    /// Parse a document from text.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::MissingChecksumHeader`] if the first line
    /// does not start with `Checksum=`.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let lines: Vec<String> = text
            .split_inclusive(LINE_TERMINATOR)
            .map(str::to_string)
            .collect();

        match lines.first() {
            Some(first) if first.starts_with(CHECKSUM_PREFIX) => Ok(Self {
                lines,
                encoding: TextEncoding::Utf8,
                status: StatusChannel::none(),
            }),
            _ => Err(DocumentError::MissingChecksumHeader),
        }
    }

    /// Read and parse a document file.
    ///
    /// The file is fully drained and closed before parsing.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let bytes = std::fs::read(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let (text, encoding) = TextEncoding::decode(bytes);
        let mut doc = Self::parse(&text)?;
        doc.encoding = encoding;
        tracing::debug!(
            path = %path.display(),
            lines = doc.lines.len(),
            ?encoding,
            "document loaded"
        );
        Ok(doc)
    }

    /// Write the document with a freshly computed checksum header.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let bytes = self.encoding.encode(&self.serialize());
        std::fs::write(path, bytes).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "document saved");
        Ok(())
    }

    /// Attach a status channel for recoverable warnings.
    pub fn with_status(mut self, status: StatusChannel) -> Self {
        self.status = status;
        self
    }

    /// Replace the status channel.
    pub fn set_status(&mut self, status: StatusChannel) {
        self.status = status;
    }

    /// Status channel used by this document.
    pub fn status(&self) -> &StatusChannel {
        &self.status
    }

    /// Raw lines, terminators included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Detected on-disk encoding.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    // ─── Block-scoped access ────────────────────────────────────────

    /// Index of the first line equal to `header`.
    pub fn find(&self, header: &str) -> Option<usize> {
        self.lines.iter().position(|l| strip_terminator(l) == header)
    }

    /// Span of parameter lines belonging to `header`, header excluded.
    fn block_range(&self, header: &str) -> Option<Range<usize>> {
        let start = self.find(header)? + 1;
        let end = self.lines[start..]
            .iter()
            .position(|l| l == LINE_TERMINATOR)
            .map_or(self.lines.len(), |off| start + off);
        Some(start..end)
    }

    /// Integer value of `key` inside `header`'s block.
    ///
    /// Trailing non-digit characters after the integer are ignored.
    /// Returns `None` when the block, the key or the integer is absent.
    pub fn get_value(&self, header: &str, key: &str) -> Option<i32> {
        let key = normalize_key(key);
        let range = self.block_range(header)?;
        self.lines[range]
            .iter()
            .find(|l| line_key(l) == Some(key.as_ref()))
            .and_then(|l| leading_int(&l[key.len()..]))
    }

    /// Rewrite the first `key` line of `header`'s block as `key=value`.
    ///
    /// No-op when the block or key is absent.
    pub fn set_value(&mut self, header: &str, key: &str, value: i32) {
        let key = normalize_key(key);
        let Some(range) = self.block_range(header) else {
            return;
        };
        if let Some(line) = self.lines[range]
            .iter_mut()
            .find(|l| line_key(l) == Some(key.as_ref()))
        {
            *line = format_line(&key, value);
        }
    }

    /// Ordered `(key, value)` pairs of a block.
    ///
    /// Each line is split on runs of `=`, whitespace or `.`; the first token
    /// plus `=` is the key and the second token is parsed as the value.
    /// Unparseable values read as 0 and are reported on the status channel.
    pub fn entries(&self, header: &str) -> Vec<(String, i32)> {
        let Some(range) = self.block_range(header) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(range.len());
        for line in &self.lines[range] {
            let mut tokens = line
                .split(|c: char| c == '=' || c == '.' || c.is_whitespace())
                .filter(|t| !t.is_empty());
            let Some(name) = tokens.next() else {
                continue;
            };
            let value = match tokens.next().map(str::parse::<i32>) {
                Some(Ok(v)) => v,
                _ => {
                    self.status.warn(
                        "malformed value, using 0",
                        &format!("{header} {}", strip_terminator(line)),
                    );
                    0
                }
            };
            out.push((format!("{name}="), value));
        }
        out
    }

    /// All parameters of a block as a mapping.
    pub fn collect(&self, header: &str) -> ParamMap {
        self.entries(header).into_iter().collect()
    }

    /// Rewrite every line of `header`'s block whose key is in `params`.
    ///
    /// Lines without a matching key are untouched; keys absent from the
    /// block are skipped.
    pub fn replace_all(&mut self, header: &str, params: &ParamMap) {
        let Some(range) = self.block_range(header) else {
            return;
        };
        for line in &mut self.lines[range] {
            let replacement = line_key(line)
                .and_then(|k| params.get_key_value(k))
                .map(|(k, v)| format_line(k, *v));
            if let Some(new) = replacement {
                *line = new;
            }
        }
    }

    // ─── Checksum ───────────────────────────────────────────────────

    /// 32-bit wrapping sum of every UTF-16 code unit after the header line.
    pub fn checksum(&self) -> i32 {
        self.lines
            .iter()
            .skip(1)
            .flat_map(|l| l.encode_utf16())
            .fold(0i32, |acc, unit| acc.wrapping_add(i32::from(unit)))
    }

    /// Checksum value stored in the header line.
    pub fn stored_checksum(&self) -> Option<i32> {
        self.lines
            .first()
            .and_then(|l| l.strip_prefix(CHECKSUM_PREFIX))
            .and_then(leading_int)
    }

    /// Whether the stored header matches the computed checksum.
    pub fn checksum_matches(&self) -> bool {
        self.stored_checksum() == Some(self.checksum())
    }

    /// Rewrite the header line with the computed checksum.
    pub fn recompute_checksum(&mut self) {
        let header = checksum_line(self.checksum());
        match self.lines.first_mut() {
            Some(first) => *first = header,
            None => self.lines.push(header),
        }
    }

    /// Document text with a freshly formatted checksum header.
    pub fn serialize(&self) -> String {
        let mut out = checksum_line(self.checksum());
        for line in self.lines.iter().skip(1) {
            out.push_str(line);
        }
        out
    }
}

fn checksum_line(sum: i32) -> String {
    format!("{CHECKSUM_PREFIX}{sum}{LINE_TERMINATOR}")
}

fn format_line(key: &str, value: i32) -> String {
    format!("{key}{value}{LINE_TERMINATOR}")
}

fn strip_terminator(line: &str) -> &str {
    line.strip_suffix(LINE_TERMINATOR).unwrap_or(line)
}

/// Text up to and including the first `=`.
fn line_key(line: &str) -> Option<&str> {
    line.find('=').map(|i| &line[..=i])
}

fn normalize_key(key: &str) -> Cow<'_, str> {
    if key.ends_with('=') {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(format!("{key}="))
    }
}

/// Parse an optionally signed integer prefix, ignoring what follows.
fn leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start_matches(' ');
    let sign_len = usize::from(s.starts_with('-') || s.starts_with('+'));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}
