//! XLSX writer kernel that renders guest sheets into a styled workbook.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use guestkit_list::{SpecGuestRecord, SpecGuestSheet};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::conf::{EnumFmtKey, N_LEN_EXCEL_SHEET_NAME_MAX, derive_default_guest_formats};
use crate::spec::{
    EnumCellValue, EnumGuestColumn, SpecCellFormat, SpecGuestWorkbookOptions, SpecSheetWritten,
    SpecXlsxReport, XlsxWriteError,
};
use crate::util::{calculate_column_widths, derive_cell_value, is_hex_color, sanitize_sheet_name};

/// Resolved formats for one workbook.
#[derive(Debug, Clone)]
struct SpecGuestFormats {
    fmt_header: SpecCellFormat,
    fmt_body: SpecCellFormat,
    fmt_surname: SpecCellFormat,
    fmt_given_names: SpecCellFormat,
    fmt_vip: SpecCellFormat,
}

impl SpecGuestFormats {
    fn from_options(options: &SpecGuestWorkbookOptions) -> Result<Self, XlsxWriteError> {
        let dict_fmt =
            derive_default_guest_formats(&options.color_surname, &options.color_given_names);
        let get = |key: EnumFmtKey| {
            dict_fmt.get(key.as_str()).cloned().ok_or_else(|| {
                XlsxWriteError::InvalidOption(format!("Missing default format: {}", key.as_str()))
            })
        };
        Ok(Self {
            fmt_header: get(EnumFmtKey::Header)?,
            fmt_body: get(EnumFmtKey::Body)?,
            fmt_surname: get(EnumFmtKey::Surname)?,
            fmt_given_names: get(EnumFmtKey::GivenNames)?,
            fmt_vip: get(EnumFmtKey::Vip)?,
        })
    }

    fn for_cell(
        &self,
        column: EnumGuestColumn,
        if_vip_row: bool,
        options: &SpecGuestWorkbookOptions,
    ) -> &SpecCellFormat {
        if if_vip_row && options.if_highlight_vip {
            return &self.fmt_vip;
        }
        match column {
            EnumGuestColumn::Surname => &self.fmt_surname,
            EnumGuestColumn::GivenNames => &self.fmt_given_names,
            _ => &self.fmt_body,
        }
    }
}

/// Stateful workbook writer.
pub struct GuestXlsxWriter {
    path_file_out: Option<PathBuf>,
    workbook: Workbook,
    formats: SpecGuestFormats,
    write_options: SpecGuestWorkbookOptions,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecXlsxReport>,
    if_closed: bool,
}

impl GuestXlsxWriter {
    /// Create writer bound to an output path.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(
        path_file_out: PathBuf,
        write_options: SpecGuestWorkbookOptions,
    ) -> Result<Self, XlsxWriteError> {
        Self::create(Some(path_file_out), write_options)
    }

    /// Create writer whose workbook is only ever returned as bytes.
    pub fn in_memory(write_options: SpecGuestWorkbookOptions) -> Result<Self, XlsxWriteError> {
        Self::create(None, write_options)
    }

    fn create(
        path_file_out: Option<PathBuf>,
        write_options: SpecGuestWorkbookOptions,
    ) -> Result<Self, XlsxWriteError> {
        validate_workbook_options(&write_options)?;
        Ok(Self {
            path_file_out,
            workbook: Workbook::new(),
            formats: SpecGuestFormats::from_options(&write_options)?,
            write_options,
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            if_closed: false,
        })
    }

    /// Return output file path, if bound to one.
    pub fn file_out(&self) -> Option<&Path> {
        self.path_file_out.as_deref()
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), XlsxWriteError> {
        if self.if_closed {
            return Ok(());
        }
        let Some(path_file_out) = &self.path_file_out else {
            return Err(XlsxWriteError::InvalidOption(
                "In-memory writer has no output path; use into_bytes().".to_string(),
            ));
        };
        self.workbook.save(path_file_out)?;
        log::info!("Saved workbook {}.", path_file_out.display());
        self.if_closed = true;
        Ok(())
    }

    /// Serialize the workbook to XLSX bytes.
    pub fn into_bytes(mut self) -> Result<Vec<u8>, XlsxWriteError> {
        if self.if_closed {
            return Err(XlsxWriteError::Closed);
        }
        Ok(self.workbook.save_to_buffer()?)
    }

    /// Write several sheets in order.
    pub fn write_sheets(&mut self, sheets: &[SpecGuestSheet]) -> Result<(), XlsxWriteError> {
        for sheet in sheets {
            self.write_sheet(sheet)?;
        }
        Ok(())
    }

    /// Write one sheet: styled header, one row per record, fitted widths.
    pub fn write_sheet(&mut self, sheet: &SpecGuestSheet) -> Result<(), XlsxWriteError> {
        if self.if_closed {
            return Err(XlsxWriteError::Closed);
        }

        let mut report = SpecXlsxReport::default();
        let c_name_sanitized = sanitize_sheet_name(&sheet.sheet_name, "_");
        let sheet_name_unique = self.derive_unique_sheet_name(&c_name_sanitized);
        if sheet_name_unique != sheet.sheet_name {
            log::warn!(
                "Sheet {:?} written as {sheet_name_unique:?}.",
                sheet.sheet_name
            );
            report.warn(format!(
                "Sheet name {:?} renamed to {sheet_name_unique:?}.",
                sheet.sheet_name
            ));
        }

        let l_columns = self.write_options.columns();
        let l_widths = calculate_column_widths(&sheet.records, &l_columns, &self.write_options);
        let fmt_header = derive_rust_xlsx_format(&self.formats.fmt_header);

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet_name_unique)?;

        write_header(worksheet, &l_columns, &fmt_header)?;
        for (n_idx_row, record) in sheet.records.iter().enumerate() {
            write_record_row(
                worksheet,
                n_idx_row + 1,
                record,
                &l_columns,
                &self.formats,
                &self.write_options,
            )?;
        }

        for (n_idx_col, n_width) in l_widths.iter().enumerate() {
            worksheet.set_column_width(cast_col_num(n_idx_col)?, *n_width as f64)?;
        }
        if self.write_options.if_freeze_header {
            worksheet.set_freeze_panes(1, 0)?;
        }

        log::debug!(
            "Wrote sheet {sheet_name_unique:?}: {} row(s).",
            sheet.records.len()
        );
        report.sheets.push(SpecSheetWritten {
            sheet_name: sheet_name_unique,
            cnt_rows: sheet.records.len(),
        });
        self.l_reports.push(report);
        Ok(())
    }

    /// Excel compares sheet names case-insensitively; keys are kept lowercased.
    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if self.set_sheet_names_existing.insert(name.to_lowercase()) {
            return name.to_string();
        }

        let base_name: String = name
            .chars()
            .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
            .collect();

        let mut n_idx = 2usize;
        loop {
            let candidate: String = format!("{base_name}__{n_idx}")
                .chars()
                .take(N_LEN_EXCEL_SHEET_NAME_MAX)
                .collect();
            if self.set_sheet_names_existing.insert(candidate.to_lowercase()) {
                return candidate;
            }
            n_idx += 1;
        }
    }
}

/// Render sheets straight to XLSX bytes (download-style output).
pub fn render_workbook_bytes(
    sheets: &[SpecGuestSheet],
    write_options: SpecGuestWorkbookOptions,
) -> Result<Vec<u8>, XlsxWriteError> {
    let mut writer = GuestXlsxWriter::in_memory(write_options)?;
    writer.write_sheets(sheets)?;
    writer.into_bytes()
}

/// Render sheets into a workbook file and return the per-sheet reports.
pub fn write_workbook(
    path_file_out: PathBuf,
    sheets: &[SpecGuestSheet],
    write_options: SpecGuestWorkbookOptions,
) -> Result<Vec<SpecXlsxReport>, XlsxWriteError> {
    let mut writer = GuestXlsxWriter::new(path_file_out, write_options)?;
    writer.write_sheets(sheets)?;
    writer.close()?;
    Ok(writer.report())
}

fn validate_workbook_options(options: &SpecGuestWorkbookOptions) -> Result<(), XlsxWriteError> {
    for (c_field, c_color) in [
        ("color_surname", &options.color_surname),
        ("color_given_names", &options.color_given_names),
    ] {
        if !is_hex_color(c_color) {
            return Err(XlsxWriteError::InvalidOption(format!(
                "{c_field} must be a #RRGGBB color, got {c_color:?}."
            )));
        }
    }
    if options.width_cell_max == 0 {
        return Err(XlsxWriteError::InvalidOption(
            "width_cell_max must be >= 1.".to_string(),
        ));
    }
    Ok(())
}

fn write_header(
    worksheet: &mut Worksheet,
    columns: &[EnumGuestColumn],
    fmt_header: &Format,
) -> Result<(), XlsxWriteError> {
    for (n_idx_col, column) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, cast_col_num(n_idx_col)?, column.header(), fmt_header)?;
    }
    Ok(())
}

fn write_record_row(
    worksheet: &mut Worksheet,
    row_idx: usize,
    record: &SpecGuestRecord,
    columns: &[EnumGuestColumn],
    formats: &SpecGuestFormats,
    options: &SpecGuestWorkbookOptions,
) -> Result<(), XlsxWriteError> {
    for (n_idx_col, column) in columns.iter().enumerate() {
        let format = derive_rust_xlsx_format(formats.for_cell(*column, record.if_vip, options));
        write_cell_with_format(
            worksheet,
            row_idx,
            n_idx_col,
            &derive_cell_value(record, *column),
            &format,
        )?;
    }
    Ok(())
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), XlsxWriteError> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;
    match value {
        EnumCellValue::None => {
            worksheet.write_blank(n_row, n_col, format)?;
        }
        EnumCellValue::String(val) => {
            worksheet.write_string_with_format(n_row, n_col, val, format)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(n_row, n_col, *val, format)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if spec.italic.unwrap_or(false) {
        format = format.set_italic();
    }

    if let Some(align) = spec.align.as_deref().and_then(derive_format_align) {
        format = format.set_align(align);
    }
    if let Some(align) = spec.valign.as_deref().and_then(derive_format_align) {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }
    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32, XlsxWriteError> {
    u32::try_from(value)
        .map_err(|_| XlsxWriteError::IndexOverflow(format!("row index overflow: {value}")))
}

fn cast_col_num(value: usize) -> Result<u16, XlsxWriteError> {
    u16::try_from(value)
        .map_err(|_| XlsxWriteError::IndexOverflow(format!("column index overflow: {value}")))
}
