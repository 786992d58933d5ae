//! CSV parsing for spreadsheet imports.
//!
//! Converts CSV text into one JSON object per data row, keyed by the
//! (trimmed, lowercased) header names. No locomotive-specific logic here.

use serde_json::{Map, Value};

use crate::error::{CsvError, CsvResult};

/// One data row: either its fields or the reason it could not be read.
pub type CsvRow = Result<Map<String, Value>, String>;

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Column headers, normalized
    pub headers: Vec<String>,
    /// Data rows in input order (blank lines skipped)
    pub rows: Vec<CsvRow>,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => match String::from_utf8(bytes.to_vec()) {
            Ok(s) => s,
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        },
    }
}

/// Decode an uploaded file, detecting its encoding first.
pub fn decode_upload(bytes: &[u8]) -> String {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }
    let encoding = detect_encoding(bytes);
    decode_content(bytes, &encoding)
}

/// Parse comma-separated text with a header row.
///
/// Rows shorter than the header get empty strings for the missing columns;
/// extra trailing fields are ignored.
///
/// # Example
/// ```ignore
/// use railcat::parser::parse_csv;
///
/// let parsed = parse_csv("brand,dcc_address\nRoco,3").unwrap();
/// assert_eq!(parsed.headers, vec!["brand", "dcc_address"]);
/// ```
pub fn parse_csv(content: &str) -> CsvResult<ParseResult> {
    let content = content.trim_start_matches('\u{feff}');
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().trim_matches('"').to_lowercase())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let rows = reader
        .records()
        .map(|record| -> CsvRow {
            let record = record.map_err(|e| e.to_string())?;
            let mut obj = Map::new();
            for (i, header) in headers.iter().enumerate() {
                if header.is_empty() {
                    continue;
                }
                let value = record.get(i).unwrap_or("");
                obj.insert(header.clone(), Value::String(value.to_string()));
            }
            Ok(obj)
        })
        .filter(|row: &CsvRow| match row {
            Ok(obj) => obj.values().any(|v| v.as_str().is_some_and(|s| !s.is_empty())),
            Err(_) => true,
        })
        .collect();

    Ok(ParseResult { headers, rows })
}
