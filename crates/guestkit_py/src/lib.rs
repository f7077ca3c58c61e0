use std::collections::BTreeMap;
use std::path::PathBuf;

use guestkit_io_source::{
    SourceReadError, collect_file_sources, read_source_bytes as rs_read_source_bytes,
    read_source_file as rs_read_source_file,
};
use guestkit_io_xlsx::{
    EnumOutputFileKind, SpecGuestWorkbookOptions, SpecXlsxReport, XlsxWriteError,
    derive_output_file_name_now, render_workbook_bytes, write_workbook as rs_write_workbook,
};
use guestkit_list::{
    GuestListError, ReportMerge, SpecGuestListRun, SpecGuestRecord, SpecGuestSheet,
    SpecMergeOptions, SpecProcessOptions, collect_sources,
};
use pyo3::exceptions::{PyOSError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::pybacked::PyBackedBytes;
use pyo3::types::PyBytes;

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "guestkit.list.v1";
const C_BRIDGE_TRANSPORT: &str = "rust_native";

////////////////////////////////////////////////////////////////////////////////
// #region PyClasses

#[pyclass(name = "GuestRecord")]
#[derive(Debug, Clone)]
struct PyGuestRecord {
    #[pyo3(get)]
    rank: u32,
    #[pyo3(get)]
    surname: String,
    #[pyo3(get)]
    given_names: String,
    #[pyo3(get)]
    table: Option<u32>,
    #[pyo3(get)]
    remarks: String,
    #[pyo3(get)]
    if_vip: bool,
    #[pyo3(get)]
    origin: String,
}

impl From<SpecGuestRecord> for PyGuestRecord {
    fn from(record: SpecGuestRecord) -> Self {
        Self {
            rank: record.rank,
            surname: record.surname,
            given_names: record.given_names,
            table: record.table,
            remarks: record.remarks,
            if_vip: record.if_vip,
            origin: record.origin,
        }
    }
}

impl From<PyGuestRecord> for SpecGuestRecord {
    fn from(record: PyGuestRecord) -> Self {
        Self {
            rank: record.rank,
            surname: record.surname,
            given_names: record.given_names,
            table: record.table,
            remarks: record.remarks,
            if_vip: record.if_vip,
            origin: record.origin,
        }
    }
}

#[pymethods]
impl PyGuestRecord {
    #[new]
    #[pyo3(signature = (
        rank,
        surname,
        given_names,
        table = None,
        remarks = String::new(),
        if_vip = false,
        origin = String::new()
    ))]
    fn new(
        rank: u32,
        surname: String,
        given_names: String,
        table: Option<u32>,
        remarks: String,
        if_vip: bool,
        origin: String,
    ) -> Self {
        Self {
            rank,
            surname,
            given_names,
            table,
            remarks,
            if_vip,
            origin,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "GuestRecord(rank={}, surname={:?}, given_names={:?}, table={:?}, vip={})",
            self.rank, self.surname, self.given_names, self.table, self.if_vip
        )
    }
}

#[pyclass(name = "GuestSheet")]
#[derive(Debug, Clone)]
struct PyGuestSheet {
    #[pyo3(get)]
    sheet_name: String,
    #[pyo3(get)]
    records: Vec<PyGuestRecord>,
}

impl From<SpecGuestSheet> for PyGuestSheet {
    fn from(sheet: SpecGuestSheet) -> Self {
        Self {
            sheet_name: sheet.sheet_name,
            records: sheet.records.into_iter().map(PyGuestRecord::from).collect(),
        }
    }
}

impl From<PyGuestSheet> for SpecGuestSheet {
    fn from(sheet: PyGuestSheet) -> Self {
        Self {
            sheet_name: sheet.sheet_name,
            records: sheet.records.into_iter().map(SpecGuestRecord::from).collect(),
        }
    }
}

#[pymethods]
impl PyGuestSheet {
    #[new]
    fn new(sheet_name: String, records: Vec<PyGuestRecord>) -> Self {
        Self {
            sheet_name,
            records,
        }
    }

    fn __len__(&self) -> usize {
        self.records.len()
    }
}

#[pyclass(name = "ReportMerge")]
#[derive(Debug, Clone)]
struct PyReportMerge {
    inner: ReportMerge,
}

#[pymethods]
impl PyReportMerge {
    #[getter]
    fn cnt_sources(&self) -> u64 {
        self.inner.cnt_sources
    }

    #[getter]
    fn cnt_sources_dropped(&self) -> u64 {
        self.inner.cnt_sources_dropped
    }

    #[getter]
    fn cnt_records(&self) -> u64 {
        self.inner.cnt_records
    }

    #[getter]
    fn cnt_replacements(&self) -> u64 {
        self.inner.cnt_replacements
    }

    #[getter]
    fn cnt_vip(&self) -> u64 {
        self.inner.cnt_vip
    }

    #[getter]
    fn warnings(&self) -> Vec<String> {
        self.inner.warnings.clone()
    }

    fn to_dict(&self) -> BTreeMap<String, u64> {
        self.inner.to_dict()
    }

    #[pyo3(signature = (prefix = "[MERGE]"))]
    fn format(&self, prefix: &str) -> String {
        self.inner.format(prefix)
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }
}

#[pyclass(name = "GuestListRun")]
#[derive(Debug, Clone)]
struct PyGuestListRun {
    #[pyo3(get)]
    sheets: Vec<PyGuestSheet>,
    #[pyo3(get)]
    groups: Vec<PyGuestSheet>,
    #[pyo3(get)]
    report: PyReportMerge,
}

impl From<SpecGuestListRun> for PyGuestListRun {
    fn from(run: SpecGuestListRun) -> Self {
        Self {
            sheets: run.sheets.into_iter().map(PyGuestSheet::from).collect(),
            groups: run.groups.into_iter().map(PyGuestSheet::from).collect(),
            report: PyReportMerge { inner: run.report },
        }
    }
}

#[pymethods]
impl PyGuestListRun {
    #[getter]
    fn cnt_records(&self) -> usize {
        self.groups.iter().map(|group| group.records.len()).sum()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ErrorMapping

fn map_guest_list_error(exception: GuestListError) -> PyErr {
    PyValueError::new_err(exception.to_string())
}

fn map_source_read_error(exception: SourceReadError) -> PyErr {
    match exception {
        SourceReadError::Io { .. } => PyOSError::new_err(exception.to_string()),
        _ => PyValueError::new_err(exception.to_string()),
    }
}

fn map_xlsx_write_error(exception: XlsxWriteError) -> PyErr {
    match exception {
        XlsxWriteError::InvalidOption(message) => PyValueError::new_err(message),
        _ => PyRuntimeError::new_err(exception.to_string()),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Parsing

fn parse_output_file_kind(value: &str) -> PyResult<EnumOutputFileKind> {
    match value {
        "single" => Ok(EnumOutputFileKind::SingleList),
        "fused" => Ok(EnumOutputFileKind::Fused),
        "multi" => Ok(EnumOutputFileKind::MultiSheet),
        _ => Err(PyValueError::new_err(format!(
            "Invalid output kind: `{value}`. Expected one of: ['single', 'fused', 'multi']"
        ))),
    }
}

#[allow(clippy::too_many_arguments)]
fn derive_merge_options(
    if_table_numbering: bool,
    rank_start: u32,
    table_start: u32,
    spacing_file: u32,
    spacing_pasted: u32,
    if_single_sheet: bool,
    if_recalculate_rank: bool,
) -> SpecMergeOptions {
    SpecMergeOptions {
        if_table_numbering,
        rank_start,
        table_start,
        spacing_file,
        spacing_pasted,
        if_single_sheet,
        if_recalculate_rank,
        ..SpecMergeOptions::default()
    }
}

fn derive_workbook_options(
    if_table_column: bool,
    if_freeze_header: bool,
    if_highlight_vip: bool,
    color_surname: Option<String>,
    color_given_names: Option<String>,
) -> SpecGuestWorkbookOptions {
    let cfg_default = SpecGuestWorkbookOptions::default();
    SpecGuestWorkbookOptions {
        if_table_column,
        if_freeze_header,
        if_highlight_vip,
        color_surname: color_surname.unwrap_or(cfg_default.color_surname.clone()),
        color_given_names: color_given_names.unwrap_or(cfg_default.color_given_names.clone()),
        ..cfg_default
    }
}

fn derive_upload_pairs(uploads: Vec<(String, PyBackedBytes)>) -> Vec<(String, Vec<u8>)> {
    uploads
        .into_iter()
        .map(|(file_name, data)| (file_name, data.to_vec()))
        .collect()
}

fn derive_spec_sheets(sheets: Vec<PyGuestSheet>) -> Vec<SpecGuestSheet> {
    sheets.into_iter().map(SpecGuestSheet::from).collect()
}

fn derive_report_tuples(l_reports: Vec<SpecXlsxReport>) -> Vec<(String, usize)> {
    l_reports
        .into_iter()
        .flat_map(|report| report.sheets)
        .map(|sheet| (sheet.sheet_name, sheet.cnt_rows))
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Functions

#[pyfunction(name = "normalize_text")]
fn normalize_text_py(text: &str) -> String {
    guestkit_list::normalize_text(text)
}

/// Return `(surname, given_names)`.
#[pyfunction(name = "split_name")]
fn split_name_py(text: &str) -> (String, String) {
    guestkit_list::split_name(text).into_parts()
}

#[pyfunction(name = "process_list")]
#[pyo3(signature = (
    text,
    if_table_numbering = true,
    rank_start = 1,
    table_start = 1,
    label = "Liste"
))]
fn process_list_py(
    text: &str,
    if_table_numbering: bool,
    rank_start: u32,
    table_start: u32,
    label: &str,
) -> Vec<PyGuestRecord> {
    let cfg_process_options = SpecProcessOptions {
        if_table_numbering,
        rank_start,
        table_start: if_table_numbering.then_some(table_start),
        label: label.to_string(),
        ..SpecProcessOptions::default()
    };
    guestkit_list::process_list(text, &cfg_process_options)
        .into_iter()
        .map(PyGuestRecord::from)
        .collect()
}

/// Return `[(label, text), ...]`.
#[pyfunction(name = "split_pasted_blob")]
fn split_pasted_blob_py(text: &str) -> Vec<(String, String)> {
    guestkit_list::split_pasted_blob(text)
        .into_iter()
        .map(|source| (source.label, source.text))
        .collect()
}

#[pyfunction(name = "run_single_list")]
#[pyo3(signature = (
    text,
    if_table_numbering = true,
    rank_start = 1,
    table_start = 1
))]
fn run_single_list_py(
    text: &str,
    if_table_numbering: bool,
    rank_start: u32,
    table_start: u32,
) -> PyResult<PyGuestListRun> {
    let cfg_merge_options =
        derive_merge_options(if_table_numbering, rank_start, table_start, 0, 0, true, false);
    guestkit_list::run_single_list(text, &cfg_merge_options)
        .map(PyGuestListRun::from)
        .map_err(map_guest_list_error)
}

/// Fuse uploads and pasted text.
///
/// Files come as paths (`files`), in-memory `(file_name, bytes)` pairs
/// (`uploads`), or `(label, text)` pairs from `read_source_*` (`file_sources`).
#[pyfunction(name = "run_fusion")]
#[pyo3(signature = (
    files = None,
    pasted_text = "",
    uploads = None,
    file_sources = None,
    if_table_numbering = true,
    rank_start = 1,
    table_start = 1,
    spacing_file = 5,
    spacing_pasted = 3,
    if_single_sheet = true,
    if_recalculate_rank = true
))]
#[allow(clippy::too_many_arguments)]
fn run_fusion_py(
    py: Python<'_>,
    files: Option<Vec<String>>,
    pasted_text: &str,
    uploads: Option<Vec<(String, PyBackedBytes)>>,
    file_sources: Option<Vec<(String, String)>>,
    if_table_numbering: bool,
    rank_start: u32,
    table_start: u32,
    spacing_file: u32,
    spacing_pasted: u32,
    if_single_sheet: bool,
    if_recalculate_rank: bool,
) -> PyResult<PyGuestListRun> {
    let cfg_merge_options = derive_merge_options(
        if_table_numbering,
        rank_start,
        table_start,
        spacing_file,
        spacing_pasted,
        if_single_sheet,
        if_recalculate_rank,
    );
    let l_paths = files.unwrap_or_default();
    let l_uploads = derive_upload_pairs(uploads.unwrap_or_default());
    let l_decoded = file_sources.unwrap_or_default();
    let c_pasted_text = pasted_text.to_string();

    let run = py.allow_threads(|| -> PyResult<SpecGuestListRun> {
        let l_files = collect_file_sources(&l_paths, l_uploads, l_decoded)
            .map_err(map_source_read_error)?;
        let l_sources = collect_sources(l_files, &c_pasted_text);
        guestkit_list::run_fusion(&l_sources, &cfg_merge_options).map_err(map_guest_list_error)
    })?;
    Ok(PyGuestListRun::from(run))
}

/// Return `(label, text)`.
#[pyfunction(name = "read_source_file")]
#[pyo3(signature = (path, idx = 0))]
fn read_source_file_py(py: Python<'_>, path: String, idx: usize) -> PyResult<(String, String)> {
    let source = py
        .allow_threads(|| rs_read_source_file(&path, idx))
        .map_err(map_source_read_error)?;
    Ok((source.label, source.text))
}

/// Return `(label, text)` for an in-memory upload.
#[pyfunction(name = "read_source_bytes")]
#[pyo3(signature = (file_name, data, idx = 0))]
fn read_source_bytes_py(
    py: Python<'_>,
    file_name: String,
    data: PyBackedBytes,
    idx: usize,
) -> PyResult<(String, String)> {
    let v_bytes = data.to_vec();
    let source = py
        .allow_threads(|| rs_read_source_bytes(&file_name, v_bytes, idx))
        .map_err(map_source_read_error)?;
    Ok((source.label, source.text))
}

#[pyfunction(name = "render_workbook")]
#[pyo3(signature = (
    sheets,
    if_table_column = true,
    if_freeze_header = true,
    if_highlight_vip = true,
    color_surname = None,
    color_given_names = None
))]
fn render_workbook_py(
    py: Python<'_>,
    sheets: Vec<PyGuestSheet>,
    if_table_column: bool,
    if_freeze_header: bool,
    if_highlight_vip: bool,
    color_surname: Option<String>,
    color_given_names: Option<String>,
) -> PyResult<Py<PyBytes>> {
    let cfg_workbook_options = derive_workbook_options(
        if_table_column,
        if_freeze_header,
        if_highlight_vip,
        color_surname,
        color_given_names,
    );
    let l_sheets = derive_spec_sheets(sheets);
    let v_bytes = py
        .allow_threads(|| render_workbook_bytes(&l_sheets, cfg_workbook_options))
        .map_err(map_xlsx_write_error)?;
    Ok(PyBytes::new(py, &v_bytes).unbind())
}

/// Write sheets to `file_out`; return `[(sheet_name, cnt_rows), ...]`.
#[pyfunction(name = "write_workbook")]
#[pyo3(signature = (
    file_out,
    sheets,
    if_table_column = true,
    if_freeze_header = true,
    if_highlight_vip = true,
    color_surname = None,
    color_given_names = None
))]
#[allow(clippy::too_many_arguments)]
fn write_workbook_py(
    py: Python<'_>,
    file_out: String,
    sheets: Vec<PyGuestSheet>,
    if_table_column: bool,
    if_freeze_header: bool,
    if_highlight_vip: bool,
    color_surname: Option<String>,
    color_given_names: Option<String>,
) -> PyResult<Vec<(String, usize)>> {
    let cfg_workbook_options = derive_workbook_options(
        if_table_column,
        if_freeze_header,
        if_highlight_vip,
        color_surname,
        color_given_names,
    );
    let l_sheets = derive_spec_sheets(sheets);
    let l_reports = py
        .allow_threads(|| {
            rs_write_workbook(PathBuf::from(file_out), &l_sheets, cfg_workbook_options)
        })
        .map_err(map_xlsx_write_error)?;
    Ok(derive_report_tuples(l_reports))
}

#[pyfunction(name = "derive_output_file_name")]
fn derive_output_file_name_py(kind: &str) -> PyResult<String> {
    Ok(derive_output_file_name_now(parse_output_file_kind(kind)?))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[pymodule]
fn _guestkit_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PyGuestRecord>()?;
    module.add_class::<PyGuestSheet>()?;
    module.add_class::<PyReportMerge>()?;
    module.add_class::<PyGuestListRun>()?;
    module.add_function(wrap_pyfunction!(normalize_text_py, module)?)?;
    module.add_function(wrap_pyfunction!(split_name_py, module)?)?;
    module.add_function(wrap_pyfunction!(process_list_py, module)?)?;
    module.add_function(wrap_pyfunction!(split_pasted_blob_py, module)?)?;
    module.add_function(wrap_pyfunction!(run_single_list_py, module)?)?;
    module.add_function(wrap_pyfunction!(run_fusion_py, module)?)?;
    module.add_function(wrap_pyfunction!(read_source_file_py, module)?)?;
    module.add_function(wrap_pyfunction!(read_source_bytes_py, module)?)?;
    module.add_function(wrap_pyfunction!(render_workbook_py, module)?)?;
    module.add_function(wrap_pyfunction!(write_workbook_py, module)?)?;
    module.add_function(wrap_pyfunction!(derive_output_file_name_py, module)?)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}
