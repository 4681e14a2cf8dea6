/// Scroll state of a list with uniform row height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollViewport {
    /// Scroll offset of the first visible pixel.
    pub offset: f32,
    /// Visible height of the list.
    pub height: f32,
    /// Height of one row.
    pub row_height: f32,
}

impl Default for ScrollViewport {
    fn default() -> Self {
        Self {
            offset: 0.0,
            height: 0.0,
            row_height: 1.0,
        }
    }
}

impl ScrollViewport {
    /// Adjusts `offset` by the least amount that shows row `index` fully.
    ///
    /// A row taller than the viewport is aligned to its top edge.
    pub fn scroll_into_view(&mut self, index: usize) {
        let top = index as f32 * self.row_height;
        let bottom = top + self.row_height;
        if top < self.offset {
            self.offset = top;
        } else if bottom > self.offset + self.height {
            self.offset = (bottom - self.height).min(top);
        }
    }
}

/// Single selection over the visible rows of a list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionController {
    selected: Option<usize>,
    len: usize,
    viewport: ScrollViewport,
}

impl SelectionController {
    /// Creates a controller over `len` rows with nothing selected.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }

    /// Rows were rebuilt: the selection is dropped and scrolling restarts.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.selected = None;
        self.viewport.offset = 0.0;
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list has no rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Selected row index.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Scroll state.
    pub fn viewport(&self) -> &ScrollViewport {
        &self.viewport
    }

    /// Updates the list geometry reported by the UI.
    pub fn set_viewport(&mut self, height: f32, row_height: f32) {
        self.viewport.height = height.max(0.0);
        self.viewport.row_height = row_height.max(f32::EPSILON);
    }

    /// Sets the scroll offset after a user scroll.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.viewport.offset = offset.max(0.0);
    }

    /// Selects a row (mouse click). Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Drops the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Moves the selection down one row. No-op without a selection or at
    /// the last row.
    pub fn increment(&mut self) -> bool {
        match self.selected {
            Some(i) if i + 1 < self.len => {
                self.selected = Some(i + 1);
                self.viewport.scroll_into_view(i + 1);
                true
            }
            _ => false,
        }
    }

    /// Moves the selection up one row. No-op without a selection or at row 0.
    pub fn decrement(&mut self) -> bool {
        match self.selected {
            Some(i) if i > 0 => {
                self.selected = Some(i - 1);
                self.viewport.scroll_into_view(i - 1);
                true
            }
            _ => false,
        }
    }
}
