//! `guestkit_io_source` v1:
//! Turns uploaded guest-list files into raw list sources.
//!
//! - `conf`   : extensions and the cell joiner
//! - `spec`   : file kinds and errors
//! - `reader` : txt/csv/spreadsheet decoding
pub mod conf;
pub mod reader;
pub mod spec;

pub use conf::C_CELL_JOINER;
pub use reader::{
    collect_file_sources, decode_text_lossy, join_row_cells, read_source_bytes, read_source_file,
};
pub use spec::{EnumSourceFileKind, SourceReadError};
