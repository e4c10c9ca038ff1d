//! Editable data grid engine
//!
//! Parses a delimited-text blob into a header + rows matrix, runs the
//! navigation/edit state machine over it, and writes every committed change
//! straight back into the blob.

pub mod columns;
pub mod decoration;
pub mod document;
pub mod edit;
pub mod format;
pub mod layout;
pub mod model;
pub mod mutation;
pub mod navigation;
pub mod numeric;
pub mod parser;
pub mod selection;
pub mod state;

pub use columns::{Alignment, CellFormat, ColumnMetadata};
pub use document::{GridDocument, RowFlags};
pub use edit::{CellEdit, CellEditState};
pub use layout::ResizeSession;
pub use model::{CellPosition, Dimensions, Literal, Matrix, Numeric, Row, Separator, HEADER_ROW};
pub use mutation::{apply_edit, classify_paste, GridEdit, PasteKind};
pub use navigation::Direction;
pub use numeric::to_number;
pub use parser::{detect_separator, parse, parse_numeric, parse_with, serialize, ParseOptions};
pub use selection::Selection;
pub use state::{GridMode, GridState};
