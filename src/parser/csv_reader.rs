use crate::errors::{AppError, AppResult};
use crate::models::TextEncoding;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Reads a delimited text file with a header row into a DataFrame.
///
/// The file is decoded with `encoding` before parsing, so ISO-8859-1 input
/// arrives in the DataFrame as proper UTF-8 strings. Column types are inferred
/// from every row; a column that mixes numbers and text stays a string column.
///
/// # Errors
///
/// Returns `NotFound` if the file does not exist, `IoError` for other read
/// failures and `ParseError` if the content is not valid CSV in `encoding`.
pub fn read_csv(path: &Path, encoding: TextEncoding) -> AppResult<DataFrame> {
    let start = Instant::now();
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound(format!("CSV file {} does not exist", path.display()))
        } else {
            AppError::IoError(format!("Failed to read CSV file {}: {e}", path.display()))
        }
    })?;
    debug!(file = %path.display(), bytes = bytes.len(), ?encoding, "Read CSV file");

    let df = parse_csv_bytes(&bytes, encoding).map_err(|e| match e {
        AppError::ParseError(msg) => {
            AppError::ParseError(format!("Failed to parse {}: {msg}", path.display()))
        }
        other => other,
    })?;

    info!(
        file = %path.display(),
        rows = df.height(),
        columns = df.width(),
        elapsed = %crate::utils::format_duration(start.elapsed()),
        "CSV loaded"
    );

    Ok(df)
}

/// Parses in-memory CSV bytes (header row required) into a DataFrame.
pub fn parse_csv_bytes(bytes: &[u8], encoding: TextEncoding) -> AppResult<DataFrame> {
    let text = encoding.decode(bytes)?;
    let cursor = Cursor::new(text.into_owned().into_bytes());

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(cursor)
        .finish()
        .map_err(|e| AppError::ParseError(format!("Failed to read CSV: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let df = parse_csv_bytes(
            b"PLAYER_ID,PLAYER_LAST_NAME,TEAM\n1,James,LAL\n2,Curry,GSW\n",
            TextEncoding::Utf8,
        )
        .unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(
            df.get_column_names(),
            vec!["PLAYER_ID", "PLAYER_LAST_NAME", "TEAM"]
        );
        let value = df.column("TEAM").unwrap().get(1).unwrap();
        assert_eq!(value, AnyValue::String("GSW"));
    }

    #[test]
    fn latin1_cells_survive_decoding() {
        let mut bytes = b"Description,Country\n".to_vec();
        bytes.extend_from_slice(&[b'P', b'a', b't', 0xE9, b',', b'F', b'r', b'a', b'n', b'c', b'e']);
        bytes.push(b'\n');

        let df = parse_csv_bytes(&bytes, TextEncoding::Latin1).unwrap();
        let description = df.column("Description").unwrap().str().unwrap();
        assert_eq!(description.get(0), Some("Paté"));
    }

    #[test]
    fn mixed_column_is_inferred_as_string() {
        let df = parse_csv_bytes(
            b"InvoiceNo,Quantity\n536365,6\n536366,2\nC536379,-1\n",
            TextEncoding::Latin1,
        )
        .unwrap();
        let invoices = df.column("InvoiceNo").unwrap().str().unwrap();
        assert_eq!(invoices.get(2), Some("C536379"));
    }

    #[test]
    fn utf8_rejects_latin1_bytes() {
        let err = parse_csv_bytes(&[b'a', b'\n', 0xE9, b'\n'], TextEncoding::Utf8).unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_csv(&dir.path().join("absent.csv"), TextEncoding::Latin1).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
