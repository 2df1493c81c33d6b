//! CSV loader with encoding and delimiter auto-detection.
//!
//! Turns an orders file into ordered rows of `column -> Option<value>`.
//! No type coercion happens here: every present cell stays a string.

use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};

use crate::error::{CsvError, CsvResult};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// One data line keyed by header name.
///
/// Cells are kept verbatim, empty ones included. Cells missing from a short
/// row are `None`.
pub type Row = HashMap<String, Option<String>>;

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed rows, in file order
    pub records: Vec<Row>,
    /// Column headers, in file order
    pub headers: Vec<String>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
}

/// Look up a cell. `None` when the column is absent or the row is too short.
pub fn get_field<'a>(row: &'a Row, column: &str) -> Option<&'a str> {
    row.get(column).and_then(|v| v.as_deref())
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 (with or without a byte order mark) is always reported as
/// `utf-8`; chardet only guesses for everything else.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if std::str::from_utf8(body).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the named encoding.
///
/// Unknown labels fall back to UTF-8. A leading byte order mark is dropped.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let codec = Encoding::for_label(encoding.as_bytes()).unwrap_or(UTF_8);
    let (text, used, had_errors) = codec.decode(bytes);
    if had_errors {
        return Err(CsvError::Encoding(format!(
            "input is not valid {}",
            used.name()
        )));
    }
    Ok(text.into_owned())
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text with an explicit delimiter.
///
/// Rows shorter than the header are padded with `None`; rows longer than the
/// header are rejected with their line number.
///
/// # Example
/// ```ignore
/// let result = parse_str("id,order_id\nP1,O1", ',', "utf-8")?;
/// assert_eq!(result.headers, vec!["id", "order_id"]);
/// assert_eq!(get_field(&result.records[0], "order_id"), Some("O1"));
/// ```
pub fn parse_str(content: &str, delimiter: char, encoding: impl Into<String>) -> CsvResult<ParseResult> {
    let delimiter_byte = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(CsvError::InvalidDelimiter(delimiter))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut seen = HashSet::new();
    for header in &headers {
        if !seen.insert(header.as_str()) {
            return Err(CsvError::DuplicateHeader(header.clone()));
        }
    }

    let mut records = Vec::new();

    for result in reader.records() {
        let record = result?;

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(CsvError::Malformed {
                line,
                message: format!(
                    "expected {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            });
        }

        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = record.get(i).map(str::to_string);
                (header.clone(), value)
            })
            .collect();

        records.push(row);
    }

    Ok(ParseResult {
        records,
        headers,
        encoding: encoding.into(),
        delimiter,
    })
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);
    parse_str(&content, delimiter, encoding)
}

/// Parse CSV bytes with a fixed delimiter, still auto-detecting the encoding.
pub fn parse_bytes(bytes: &[u8], delimiter: char) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    parse_str(&content, delimiter, encoding)
}

/// Parse a CSV file with auto-detection of encoding and delimiter.
pub fn parse_csv_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = read_input(path.as_ref())?;
    parse_bytes_auto(&bytes)
}

/// Parse a CSV file with an explicit delimiter.
pub fn parse_csv_file<P: AsRef<Path>>(path: P, delimiter: char) -> CsvResult<ParseResult> {
    let bytes = read_input(path.as_ref())?;
    parse_bytes(&bytes, delimiter)
}

fn read_input(path: &Path) -> CsvResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CsvError::NotFound(path.to_path_buf()),
        _ => CsvError::Io(e),
    })
}
