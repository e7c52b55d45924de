// UI control state tracking and hit-testing
//
// Rects are filled in by the painter on every paint, so hit-testing always
// matches what is on screen, including row positions after a deletion.

use windows::Win32::Foundation::RECT;

/// A clickable button
#[derive(Debug, Clone)]
pub struct ButtonState {
    pub rect: RECT,
    pub text: String,
}

impl ButtonState {
    pub fn new(text: &str) -> Self {
        Self {
            rect: RECT::default(),
            text: text.to_string(),
        }
    }
}

/// One project entry in the sidebar list
#[derive(Debug, Clone)]
pub struct ProjectItem {
    pub name: String,
    pub rect: RECT,
}

/// One color row in the main area. `index` is the position in the project
/// at the time of the last paint.
#[derive(Debug, Clone)]
pub struct ColorRow {
    pub index: usize,
    pub hex: String,
    pub copy_rect: RECT,
    pub delete_rect: RECT,
}

/// What a click landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    AddProject,
    DeleteProject,
    Project(String),
    CopyColor { index: usize, hex: String },
    DeleteColor(usize),
}

/// Complete UI state
pub struct UiState {
    pub add_project_btn: ButtonState,
    pub delete_project_btn: ButtonState,
    pub project_items: Vec<ProjectItem>,
    /// Visible area of the project list in the sidebar
    pub project_list_rect: RECT,
    pub project_scroll: i32,
    pub max_project_scroll: i32,

    pub color_rows: Vec<ColorRow>,
    /// Visible area of the color list; rows scrolled outside it are not clickable
    pub list_rect: RECT,
    /// Vertical scroll offset of the color list, in pixels
    pub scroll_offset: i32,
    pub max_scroll: i32,

    /// Row whose Copy button shows "OK!"
    pub copied_index: Option<usize>,

    pub toast_message: String,
    pub toast_visible: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            add_project_btn: ButtonState::new("+ Add Project"),
            delete_project_btn: ButtonState::new("Delete Selected"),
            project_items: Vec::new(),
            project_list_rect: RECT::default(),
            project_scroll: 0,
            max_project_scroll: 0,

            color_rows: Vec::new(),
            list_rect: RECT::default(),
            scroll_offset: 0,
            max_scroll: 0,

            copied_index: None,

            toast_message: String::new(),
            toast_visible: false,
        }
    }

    pub fn hit_test(&self, x: i32, y: i32) -> Option<Hit> {
        if point_in_rect(x, y, &self.add_project_btn.rect) {
            return Some(Hit::AddProject);
        }
        if point_in_rect(x, y, &self.delete_project_btn.rect) {
            return Some(Hit::DeleteProject);
        }
        if point_in_rect(x, y, &self.project_list_rect) {
            return self
                .project_items
                .iter()
                .find(|item| point_in_rect(x, y, &item.rect))
                .map(|item| Hit::Project(item.name.clone()));
        }
        if !point_in_rect(x, y, &self.list_rect) {
            return None;
        }
        for row in &self.color_rows {
            if point_in_rect(x, y, &row.copy_rect) {
                return Some(Hit::CopyColor {
                    index: row.index,
                    hex: row.hex.clone(),
                });
            }
            if point_in_rect(x, y, &row.delete_rect) {
                return Some(Hit::DeleteColor(row.index));
            }
        }
        None
    }

    /// Scroll the color list by `delta` pixels, clamped to the content.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        scroll_clamped(&mut self.scroll_offset, delta, self.max_scroll)
    }

    /// Scroll the sidebar project list by `delta` pixels.
    pub fn scroll_projects_by(&mut self, delta: i32) -> bool {
        scroll_clamped(&mut self.project_scroll, delta, self.max_project_scroll)
    }

    /// Drop row hit areas after the list changed under them. Clicks land
    /// nowhere until the next paint lays the rows out again.
    pub fn forget_color_rows(&mut self) {
        self.color_rows.clear();
    }
}

fn scroll_clamped(offset: &mut i32, delta: i32, max: i32) -> bool {
    let next = offset.saturating_add(delta).clamp(0, max.max(0));
    let changed = next != *offset;
    *offset = next;
    changed
}

/// Check if a point is inside a rect
pub fn point_in_rect(x: i32, y: i32, r: &RECT) -> bool {
    x >= r.left && x < r.right && y >= r.top && y < r.bottom
}
