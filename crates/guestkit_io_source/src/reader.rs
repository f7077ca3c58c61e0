//! Upload decoding: txt/csv/spreadsheet files to raw list text.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use guestkit_list::{SpecListSource, derive_file_label};
use polars::prelude::{AnyValue, CsvEncoding, CsvParseOptions, CsvReadOptions, DataFrame, SerReader};

use crate::conf::C_CELL_JOINER;
use crate::spec::{EnumSourceFileKind, SourceReadError};

////////////////////////////////////////////////////////////////////////////////
// #region Entrypoints

/// Read an uploaded file into a file-kind list source.
///
/// `idx` is the upload position, used for the fallback label.
pub fn read_source_file(
    path: impl AsRef<Path>,
    idx: usize,
) -> Result<SpecListSource, SourceReadError> {
    let path = path.as_ref();
    let c_file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    // Fail on the extension before touching the disk.
    derive_file_kind(&c_file_name)?;

    let v_bytes = std::fs::read(path).map_err(|source| SourceReadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_source_bytes(&c_file_name, v_bytes, idx)
}

/// Decode in-memory upload bytes named `file_name`.
pub fn read_source_bytes(
    file_name: &str,
    bytes: Vec<u8>,
    idx: usize,
) -> Result<SpecListSource, SourceReadError> {
    let kind = derive_file_kind(file_name)?;
    let c_text = match kind {
        EnumSourceFileKind::Text => decode_text_lossy(&bytes),
        EnumSourceFileKind::Csv => read_csv_text(bytes)?,
        EnumSourceFileKind::Spreadsheet => read_spreadsheet_text(bytes)?,
    };
    log::debug!(
        "Read {file_name:?} as {kind:?}: {} line(s).",
        c_text.lines().count()
    );
    Ok(SpecListSource::file(
        derive_file_label(Some(file_name), idx),
        c_text,
    ))
}

/// Gather every uploaded file as a list source, in upload order.
///
/// Paths are read from disk, `uploads` are `(file_name, bytes)` pairs still in
/// memory, and `decoded` are `(label, text)` pairs already turned into text.
/// Fallback labels count across all three groups.
pub fn collect_file_sources<P>(
    paths: &[P],
    uploads: Vec<(String, Vec<u8>)>,
    decoded: Vec<(String, String)>,
) -> Result<Vec<SpecListSource>, SourceReadError>
where
    P: AsRef<Path>,
{
    let mut l_sources = Vec::with_capacity(paths.len() + uploads.len() + decoded.len());
    for path in paths {
        l_sources.push(read_source_file(path, l_sources.len())?);
    }
    for (file_name, bytes) in uploads {
        l_sources.push(read_source_bytes(&file_name, bytes, l_sources.len())?);
    }
    l_sources.extend(
        decoded
            .into_iter()
            .map(|(label, text)| SpecListSource::file(label, text)),
    );
    Ok(l_sources)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Decoding

fn derive_file_kind(file_name: &str) -> Result<EnumSourceFileKind, SourceReadError> {
    EnumSourceFileKind::from_file_name(file_name)
        .ok_or_else(|| SourceReadError::UnsupportedFileType(file_name.to_string()))
}

/// UTF-8 decode, dropping invalid sequences instead of substituting them.
pub fn decode_text_lossy(bytes: &[u8]) -> String {
    let mut c_text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        c_text.push_str(chunk.valid());
    }
    c_text
}

/// Join the non-empty cells of one row.
pub fn join_row_cells<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .filter_map(|cell| {
            let c_cell = cell.as_ref().trim();
            (!c_cell.is_empty()).then(|| c_cell.to_string())
        })
        .collect::<Vec<_>>()
        .join(C_CELL_JOINER)
}

fn read_csv_text(bytes: Vec<u8>) -> Result<String, SourceReadError> {
    // Schema inference disabled: every column stays a string column.
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(
            CsvParseOptions::default()
                .with_encoding(CsvEncoding::LossyUtf8)
                .with_truncate_ragged_lines(true),
        )
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;
    derive_rows_text_from_dataframe(&df)
}

fn derive_rows_text_from_dataframe(df: &DataFrame) -> Result<String, SourceReadError> {
    let l_cols = df.get_columns();
    let mut l_lines = Vec::with_capacity(df.height());
    for n_idx_row in 0..df.height() {
        let mut l_cells = Vec::with_capacity(l_cols.len());
        for col in l_cols {
            l_cells.push(derive_text_from_any_value(col.get(n_idx_row)?));
        }
        let c_line = join_row_cells(l_cells);
        if !c_line.is_empty() {
            l_lines.push(c_line);
        }
    }
    Ok(l_lines.join("\n"))
}

fn derive_text_from_any_value(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(val) => val.to_string(),
        AnyValue::StringOwned(val) => val.to_string(),
        _ => value.to_string(),
    }
}

fn read_spreadsheet_text(bytes: Vec<u8>) -> Result<String, SourceReadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SourceReadError::EmptyWorkbook)??;

    let l_lines: Vec<String> = range
        .rows()
        .skip(1)
        .map(|row| join_row_cells(row.iter().map(derive_text_from_data)))
        .filter(|line| !line.is_empty())
        .collect();
    Ok(l_lines.join("\n"))
}

fn derive_text_from_data(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(val) => val.clone(),
        _ => cell.to_string(),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::fs;

    use guestkit_list::EnumSourceKind;
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::Workbook;

    use super::*;

    #[test]
    fn test_join_row_cells_skips_empty_cells() {
        assert_eq!(join_row_cells(["DUPONT", " ", "Jean"]), "DUPONT - Jean");
        assert_eq!(join_row_cells(Vec::<String>::new()), "");
    }

    #[test]
    fn test_decode_text_lossy_drops_invalid_bytes() {
        let v_bytes = b"DUPONT \xff\xfeJean\n".to_vec();
        assert_eq!(decode_text_lossy(&v_bytes), "DUPONT Jean\n");
    }

    #[test]
    fn test_read_text_file() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let path = tmp.path().join("mariage.invites.txt");
        fs::write(&path, "1. DUPONT Jean\n2. MARTIN Sophie\n").expect("write txt");

        let source = read_source_file(&path, 0).expect("read txt");
        assert_eq!(source.label, "mariage");
        assert_eq!(source.kind, EnumSourceKind::File);
        assert_eq!(source.text, "1. DUPONT Jean\n2. MARTIN Sophie\n");
    }

    #[test]
    fn test_read_csv_bytes_consumes_header() {
        let v_bytes = "Nom,Prénom\nDUPONT,Jean\nMARTIN,\n,\n".as_bytes().to_vec();
        let source = read_source_bytes("Invites.CSV", v_bytes, 2).expect("read csv");
        assert_eq!(source.label, "Invites");
        assert_eq!(source.text, "DUPONT - Jean\nMARTIN");
    }

    #[test]
    fn test_read_spreadsheet_first_sheet_skips_header() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Nom").expect("write");
        worksheet.write_string(0, 1, "Prénom").expect("write");
        worksheet.write_string(1, 0, "DUPONT").expect("write");
        worksheet.write_string(1, 1, "Jean").expect("write");
        worksheet.write_number(2, 0, 7).expect("write");
        worksheet.write_string(2, 1, "LEROY Anne").expect("write");
        let v_bytes = workbook.save_to_buffer().expect("save workbook");

        let source = read_source_bytes("liste.xlsx", v_bytes, 0).expect("read xlsx");
        assert_eq!(source.text, "DUPONT - Jean\n7 - LEROY Anne");
    }

    #[test]
    fn test_unsupported_extension_is_rejected_before_io() {
        let result = read_source_file("/nonexistent/liste.pdf", 0);
        assert!(matches!(result, Err(SourceReadError::UnsupportedFileType(_))));

        let result = read_source_bytes("sans_extension", vec![], 0);
        assert!(matches!(result, Err(SourceReadError::UnsupportedFileType(_))));
    }

    #[test]
    fn test_collect_file_sources_mixes_disk_and_memory_uploads() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let path = tmp.path().join("mairie.txt");
        fs::write(&path, "DUPONT Jean").expect("write txt");

        let l_sources = collect_file_sources(
            &[path],
            vec![
                ("famille.csv".to_string(), b"Nom\nMARTIN Sophie\n".to_vec()),
                ("cousins.TXT".to_string(), b"LEROY Anne".to_vec()),
            ],
            vec![("amis".to_string(), "BERNARD Luc".to_string())],
        )
        .expect("collect sources");

        let l_pairs: Vec<(&str, &str)> = l_sources
            .iter()
            .map(|source| (source.label.as_str(), source.text.as_str()))
            .collect();
        assert_eq!(
            l_pairs,
            vec![
                ("mairie", "DUPONT Jean"),
                ("famille", "MARTIN Sophie"),
                ("cousins", "LEROY Anne"),
                ("amis", "BERNARD Luc"),
            ]
        );
        assert!(l_sources.iter().all(|s| s.kind == EnumSourceKind::File));
    }

    #[test]
    fn test_collect_file_sources_stops_on_unsupported_upload() {
        let result = collect_file_sources::<&str>(
            &[],
            vec![("scan.pdf".to_string(), vec![0x25, 0x50])],
            vec![],
        );
        assert!(matches!(result, Err(SourceReadError::UnsupportedFileType(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_source_file("/nonexistent/liste.txt", 0);
        assert!(matches!(result, Err(SourceReadError::Io { .. })));
    }
}
