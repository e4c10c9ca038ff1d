//! Grid model for the Elm-style architecture
//!
//! The model owns the document (blob + column metadata) and the session
//! state layered over it. The matrix is never stored: every read parses the
//! blob, so the blob stays the single source of truth.

use crate::config::GridConfig;
use crate::grid::decoration::{decorate, CellDecoration};
use crate::grid::{
    apply_edit, format, CellPosition, Dimensions, GridDocument, GridEdit, GridState, Matrix,
    ParseOptions, ResizeSession, Separator,
};
use crate::keymap::{load_keymap, KeyContext, Keymap};

/// Complete state of one grid block
#[derive(Debug, Clone)]
pub struct GridModel {
    pub document: GridDocument,
    pub state: GridState,
    /// Live column resize (owns pointer events while Some)
    pub resize: Option<ResizeSession>,
    pub keymap: Keymap,
    pub config: GridConfig,
}

impl GridModel {
    pub fn new(mut document: GridDocument, config: GridConfig) -> Self {
        let keymap = load_keymap(&config.keymap);
        document.normalize(&ParseOptions::from(&config));
        Self {
            document,
            state: GridState::default(),
            resize: None,
            keymap,
            config,
        }
    }

    pub fn from_text(data: &str) -> Self {
        Self::new(GridDocument::new(data), GridConfig::default())
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::from(&self.config)
    }

    /// Fresh string-preserving matrix from the blob
    pub fn matrix(&self) -> Matrix {
        self.parse().0
    }

    pub fn parse(&self) -> (Matrix, Separator) {
        self.document.parse(&self.parse_options())
    }

    pub fn dimensions(&self) -> Dimensions {
        self.matrix().dimensions()
    }

    /// Context for keymap lookup
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            editing: self.state.is_editing(),
            has_selection: self.state.has_range(),
        }
    }

    /// Apply an edit and drop session state the new shape invalidates
    pub fn apply(&mut self, edit: &GridEdit) -> bool {
        let changed = apply_edit(&mut self.document, edit, &self.config);
        if changed && edit.is_structural() {
            let dims = self.dimensions();
            self.state.discard_if_out_of_bounds(dims);
        }
        changed
    }

    /// Replace the document, keeping the session only if it still fits
    pub fn load(&mut self, mut document: GridDocument) {
        document.normalize(&self.parse_options());
        self.document = document;
        self.resize = None;
        let dims = self.dimensions();
        self.state.discard_if_out_of_bounds(dims);
        tracing::debug!("Loaded grid document: {}x{}", dims.rows, dims.cols);
    }

    /// Widths to draw, live during a resize
    pub fn column_widths(&self) -> &[f64] {
        match &self.resize {
            Some(session) => session.widths(),
            None => &self.document.columns.widths,
        }
    }

    /// Cell text as displayed outside edit mode
    ///
    /// Headers and labels are shown raw; values go through the column format.
    pub fn display_text(&self, pos: CellPosition) -> String {
        let raw = self.matrix().cell_text(pos);
        if pos.is_header() || pos.col == 0 {
            return raw;
        }
        let columns = &self.document.columns;
        format::render(
            &raw,
            columns.format(pos.col),
            columns.precision(pos.col),
            &self.config.locale,
        )
    }

    /// Per-cell decorations for the current data
    pub fn decorations(&self) -> Vec<Vec<CellDecoration>> {
        decorate(
            &self.matrix(),
            &self.document.columns,
            &self.document.row_flags,
        )
    }
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new(GridDocument::default(), GridConfig::default())
    }
}
