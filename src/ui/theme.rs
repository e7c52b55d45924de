use windows::Win32::Foundation::COLORREF;

// ── Palette (COLORREF is 0x00BBGGRR) ─────────────────────────────────────────

/// Main area background: #1A1A1A
pub const CLR_BACKGROUND: COLORREF = COLORREF(0x001A1A1A);

/// Sidebar background: #212121
pub const CLR_SIDEBAR: COLORREF = COLORREF(0x00212121);

/// Row / card background: #2B2B2B
pub const CLR_CARD: COLORREF = COLORREF(0x002B2B2B);

/// Selected project highlight: #404040
pub const CLR_SELECTED: COLORREF = COLORREF(0x00404040);

/// Primary text: #F2F2F2
pub const CLR_FOREGROUND: COLORREF = COLORREF(0x00F2F2F2);

/// Secondary text: #9E9E9E
pub const CLR_MUTED_FG: COLORREF = COLORREF(0x009E9E9E);

/// Borders: #3A3A3A
pub const CLR_BORDER: COLORREF = COLORREF(0x003A3A3A);

/// Primary button: #1F6AA5
pub const CLR_BUTTON: COLORREF = COLORREF(0x00A56A1F);

/// Destructive button: #D32F2F
pub const CLR_DANGER: COLORREF = COLORREF(0x002F2FD3);

/// "OK!" flash after copying: #2E7D32
pub const CLR_SUCCESS: COLORREF = COLORREF(0x00327D2E);

// ── Dimensions ───────────────────────────────────────────────────────────────

/// Main window client area dimensions
pub const WINDOW_WIDTH: i32 = 700;
pub const WINDOW_HEIGHT: i32 = 500;

pub const SIDEBAR_WIDTH: i32 = 200;
pub const PADDING: i32 = 20;

pub const BUTTON_HEIGHT: i32 = 30;
pub const INPUT_HEIGHT: i32 = 26;
pub const PROJECT_ITEM_HEIGHT: i32 = 30;

pub const ROW_HEIGHT: i32 = 44;
pub const ROW_GAP: i32 = 8;
pub const SWATCH_SIZE: i32 = 30;

pub const CARD_RADIUS: i32 = 8;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub const FONT_SIZE_TITLE: i32 = -20;
pub const FONT_SIZE_HEADER: i32 = -18;
pub const FONT_SIZE_BODY: i32 = -14;
pub const FONT_SIZE_SMALL: i32 = -12;

pub const FONT_NAME: &str = "Segoe UI";
pub const FONT_MONO_NAME: &str = "Consolas";
