// GDI owner-draw rendering: project sidebar on the left, color rows on the right

use super::controls::*;
use super::theme::*;
use hexhunter_shared::{Rgb, Session};
use windows::Win32::Foundation::{COLORREF, RECT};
use windows::Win32::Graphics::Gdi::*;

/// Top of the project name input, positioned by the window code
pub const INPUT_TOP: i32 = PADDING + 40;

/// Vertical distance between project entries in the sidebar
pub const PROJECT_STEP: i32 = PROJECT_ITEM_HEIGHT + 4;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn create_font(size: i32, weight: i32, family: &str) -> HFONT {
    let face: Vec<u16> = family.encode_utf16().chain(std::iter::once(0)).collect();
    unsafe {
        let mut lf = LOGFONTW {
            lfHeight: size,
            lfWeight: weight,
            lfQuality: CLEARTYPE_QUALITY,
            lfCharSet: DEFAULT_CHARSET,
            ..Default::default()
        };
        let len = face.len().min(32);
        lf.lfFaceName[..len].copy_from_slice(&face[..len]);
        CreateFontIndirectW(&lf)
    }
}

fn fill_rect_color(hdc: HDC, r: &RECT, color: COLORREF) {
    unsafe {
        let brush = CreateSolidBrush(color);
        FillRect(hdc, r, brush);
        let _ = DeleteObject(HGDIOBJ::from(brush));
    }
}

fn draw_rounded_rect(hdc: HDC, r: &RECT, radius: i32, fill: COLORREF, border: COLORREF) {
    unsafe {
        let fill_brush = CreateSolidBrush(fill);
        let border_pen = CreatePen(PS_SOLID, 1, border);
        let old_brush = SelectObject(hdc, HGDIOBJ::from(fill_brush));
        let old_pen = SelectObject(hdc, HGDIOBJ::from(border_pen));
        let _ = RoundRect(hdc, r.left, r.top, r.right, r.bottom, radius, radius);
        SelectObject(hdc, old_pen);
        SelectObject(hdc, old_brush);
        let _ = DeleteObject(HGDIOBJ::from(fill_brush));
        let _ = DeleteObject(HGDIOBJ::from(border_pen));
    }
}

fn draw_text_simple(hdc: HDC, text: &str, x: i32, y: i32, color: COLORREF, font: HFONT) {
    unsafe {
        let old_font = SelectObject(hdc, HGDIOBJ::from(font));
        SetTextColor(hdc, color);
        SetBkMode(hdc, TRANSPARENT);
        let wide: Vec<u16> = text.encode_utf16().collect();
        let _ = TextOutW(hdc, x, y, &wide);
        SelectObject(hdc, old_font);
    }
}

fn measure_text(hdc: HDC, text: &str, font: HFONT) -> (i32, i32) {
    unsafe {
        let old_font = SelectObject(hdc, HGDIOBJ::from(font));
        let wide: Vec<u16> = text.encode_utf16().collect();
        let mut size = windows::Win32::Foundation::SIZE::default();
        let _ = GetTextExtentPoint32W(hdc, &wide, &mut size);
        SelectObject(hdc, old_font);
        (size.cx, size.cy)
    }
}

fn draw_text_centered(hdc: HDC, text: &str, r: &RECT, color: COLORREF, font: HFONT) {
    let (tw, th) = measure_text(hdc, text, font);
    let x = r.left + (r.right - r.left - tw) / 2;
    let y = r.top + (r.bottom - r.top - th) / 2;
    draw_text_simple(hdc, text, x, y, color, font);
}

fn draw_button(hdc: HDC, r: &RECT, text: &str, fill: COLORREF, font: HFONT) {
    draw_rounded_rect(hdc, r, CARD_RADIUS, fill, fill);
    draw_text_centered(hdc, text, r, CLR_FOREGROUND, font);
}

/// GDI color for a stored `#RRGGBB` entry
fn swatch_color(hex: &str) -> Option<COLORREF> {
    let rgb: Rgb = hex.parse().ok()?;
    Some(COLORREF(
        ((rgb.b as u32) << 16) | ((rgb.g as u32) << 8) | rgb.r as u32,
    ))
}

// ── Main paint function ─────────────────────────────────────────────────────

pub fn paint(hdc: HDC, client: &RECT, state: &mut UiState, session: &Session, hotkey: &str) {
    fill_rect_color(hdc, client, CLR_BACKGROUND);

    let fonts = Fonts::create();

    draw_sidebar(hdc, client, state, session, &fonts);
    draw_main_area(hdc, client, state, session, hotkey, &fonts);

    if state.toast_visible {
        draw_toast(hdc, client, state, &fonts);
    }

    fonts.destroy();
}

// ── Font cache ──────────────────────────────────────────────────────────────

struct Fonts {
    title: HFONT,
    header: HFONT,
    body: HFONT,
    body_bold: HFONT,
    small: HFONT,
    mono: HFONT,
}

impl Fonts {
    fn create() -> Self {
        Self {
            title: create_font(FONT_SIZE_TITLE, 600, FONT_NAME),
            header: create_font(FONT_SIZE_HEADER, 600, FONT_NAME),
            body: create_font(FONT_SIZE_BODY, 400, FONT_NAME),
            body_bold: create_font(FONT_SIZE_BODY, 700, FONT_NAME),
            small: create_font(FONT_SIZE_SMALL, 400, FONT_NAME),
            mono: create_font(FONT_SIZE_BODY, 500, FONT_MONO_NAME),
        }
    }

    fn destroy(&self) {
        unsafe {
            let _ = DeleteObject(HGDIOBJ::from(self.title));
            let _ = DeleteObject(HGDIOBJ::from(self.header));
            let _ = DeleteObject(HGDIOBJ::from(self.body));
            let _ = DeleteObject(HGDIOBJ::from(self.body_bold));
            let _ = DeleteObject(HGDIOBJ::from(self.small));
            let _ = DeleteObject(HGDIOBJ::from(self.mono));
        }
    }
}

// ── Section renderers ───────────────────────────────────────────────────────

fn draw_sidebar(hdc: HDC, client: &RECT, state: &mut UiState, session: &Session, fonts: &Fonts) {
    let sidebar = RECT {
        left: 0,
        top: 0,
        right: SIDEBAR_WIDTH,
        bottom: client.bottom,
    };
    fill_rect_color(hdc, &sidebar, CLR_SIDEBAR);

    let x = PADDING;
    let right = SIDEBAR_WIDTH - PADDING;
    draw_text_simple(hdc, "Projects", x, PADDING, CLR_FOREGROUND, fonts.title);

    // The name input is a child EDIT control at INPUT_TOP; the button sits below it
    let add_top = INPUT_TOP + INPUT_HEIGHT + 8;
    state.add_project_btn.rect = RECT {
        left: x,
        top: add_top,
        right,
        bottom: add_top + BUTTON_HEIGHT,
    };
    draw_button(
        hdc,
        &state.add_project_btn.rect,
        &state.add_project_btn.text,
        CLR_BUTTON,
        fonts.body,
    );

    let delete_top = client.bottom - PADDING - BUTTON_HEIGHT;
    state.delete_project_btn.rect = RECT {
        left: x,
        top: delete_top,
        right,
        bottom: delete_top + BUTTON_HEIGHT,
    };
    draw_button(
        hdc,
        &state.delete_project_btn.rect,
        &state.delete_project_btn.text,
        CLR_DANGER,
        fonts.body,
    );

    let list_top = add_top + BUTTON_HEIGHT + 16;
    let list_bottom = delete_top - 12;
    draw_text_simple(
        hdc,
        "Your Projects",
        x,
        list_top,
        CLR_MUTED_FG,
        fonts.small,
    );

    let list_rect = RECT {
        left: x - 6,
        top: list_top + 22,
        right: right + 6,
        bottom: list_bottom,
    };
    state.project_list_rect = list_rect;
    state.project_items.clear();

    let projects = session.list_projects();
    let content_height = projects.len() as i32 * PROJECT_STEP;
    state.max_project_scroll = (content_height - (list_rect.bottom - list_rect.top)).max(0);
    state.project_scroll = state.project_scroll.clamp(0, state.max_project_scroll);

    unsafe {
        IntersectClipRect(
            hdc,
            list_rect.left,
            list_rect.top,
            list_rect.right,
            list_rect.bottom,
        );
    }

    for (i, name) in projects.into_iter().enumerate() {
        let top = list_rect.top + i as i32 * PROJECT_STEP - state.project_scroll;
        if top + PROJECT_ITEM_HEIGHT < list_rect.top {
            continue;
        }
        if top > list_rect.bottom {
            break;
        }
        let rect = RECT {
            left: list_rect.left,
            top,
            right: list_rect.right,
            bottom: top + PROJECT_ITEM_HEIGHT,
        };
        let selected = session.active_project() == Some(name.as_str());
        let fill = if selected { CLR_SELECTED } else { CLR_SIDEBAR };
        draw_rounded_rect(hdc, &rect, CARD_RADIUS, fill, CLR_BORDER);

        let (_, th) = measure_text(hdc, &name, fonts.body);
        draw_text_simple(
            hdc,
            &name,
            rect.left + 10,
            rect.top + (PROJECT_ITEM_HEIGHT - th) / 2,
            CLR_FOREGROUND,
            if selected { fonts.body_bold } else { fonts.body },
        );

        state.project_items.push(ProjectItem { name, rect });
    }

    unsafe {
        SelectClipRgn(hdc, None);
    }
}

fn draw_main_area(
    hdc: HDC,
    client: &RECT,
    state: &mut UiState,
    session: &Session,
    hotkey: &str,
    fonts: &Fonts,
) {
    let x = SIDEBAR_WIDTH + PADDING;
    let right = client.right - PADDING;

    let header = match session.active_project() {
        Some(name) => format!("Project: {name}"),
        None if session.list_projects().is_empty() => "Select or Create a Project".to_string(),
        None => "Select a Project".to_string(),
    };
    draw_text_simple(hdc, &header, x, PADDING, CLR_FOREGROUND, fonts.header);

    let hint = format!("Press {hotkey} to capture the pixel under the cursor");
    draw_text_simple(hdc, &hint, x, PADDING + 28, CLR_MUTED_FG, fonts.small);

    let list_rect = RECT {
        left: x,
        top: PADDING + 60,
        right,
        bottom: client.bottom - PADDING,
    };
    state.list_rect = list_rect;
    state.color_rows.clear();

    let colors = session.active_colors();
    if session.active_project().is_some() && colors.is_empty() {
        draw_text_simple(
            hdc,
            "No colors yet.",
            x,
            list_rect.top + 8,
            CLR_MUTED_FG,
            fonts.body,
        );
    }

    let content_height = colors.len() as i32 * (ROW_HEIGHT + ROW_GAP);
    state.max_scroll = (content_height - (list_rect.bottom - list_rect.top)).max(0);
    state.scroll_offset = state.scroll_offset.clamp(0, state.max_scroll);

    unsafe {
        IntersectClipRect(
            hdc,
            list_rect.left,
            list_rect.top,
            list_rect.right,
            list_rect.bottom,
        );
    }

    for (index, hex) in colors.iter().enumerate() {
        let top = list_rect.top + index as i32 * (ROW_HEIGHT + ROW_GAP) - state.scroll_offset;
        if top + ROW_HEIGHT < list_rect.top {
            continue;
        }
        if top > list_rect.bottom {
            break;
        }
        let row = draw_color_row(hdc, index, hex, top, &list_rect, state.copied_index, fonts);
        state.color_rows.push(row);
    }

    unsafe {
        SelectClipRgn(hdc, None);
    }
}

fn draw_color_row(
    hdc: HDC,
    index: usize,
    hex: &str,
    top: i32,
    list_rect: &RECT,
    copied_index: Option<usize>,
    fonts: &Fonts,
) -> ColorRow {
    let rect = RECT {
        left: list_rect.left,
        top,
        right: list_rect.right,
        bottom: top + ROW_HEIGHT,
    };
    draw_rounded_rect(hdc, &rect, CARD_RADIUS, CLR_CARD, CLR_BORDER);

    let swatch_top = top + (ROW_HEIGHT - SWATCH_SIZE) / 2;
    let swatch = RECT {
        left: rect.left + 10,
        top: swatch_top,
        right: rect.left + 10 + SWATCH_SIZE,
        bottom: swatch_top + SWATCH_SIZE,
    };
    match swatch_color(hex) {
        Some(color) => draw_rounded_rect(hdc, &swatch, 6, color, CLR_BORDER),
        None => draw_rounded_rect(hdc, &swatch, 6, CLR_CARD, CLR_MUTED_FG),
    }

    let (_, th) = measure_text(hdc, hex, fonts.mono);
    draw_text_simple(
        hdc,
        hex,
        swatch.right + 14,
        top + (ROW_HEIGHT - th) / 2,
        CLR_FOREGROUND,
        fonts.mono,
    );

    let button_top = top + (ROW_HEIGHT - 28) / 2;
    let delete_rect = RECT {
        left: rect.right - 10 - 30,
        top: button_top,
        right: rect.right - 10,
        bottom: button_top + 28,
    };
    draw_button(hdc, &delete_rect, "X", CLR_DANGER, fonts.body_bold);

    let copy_rect = RECT {
        left: delete_rect.left - 8 - 56,
        top: button_top,
        right: delete_rect.left - 8,
        bottom: button_top + 28,
    };
    if copied_index == Some(index) {
        draw_button(hdc, &copy_rect, "OK!", CLR_SUCCESS, fonts.small);
    } else {
        draw_button(hdc, &copy_rect, "Copy", CLR_BUTTON, fonts.small);
    }

    ColorRow {
        index,
        hex: hex.to_string(),
        copy_rect,
        delete_rect,
    }
}

fn draw_toast(hdc: HDC, client: &RECT, state: &UiState, fonts: &Fonts) {
    let msg = &state.toast_message;
    if msg.is_empty() {
        return;
    }

    let (tw, th) = measure_text(hdc, msg, fonts.body_bold);
    let toast_w = tw + 48;
    let toast_h = th + 24;
    let main_left = SIDEBAR_WIDTH;
    let toast_x = main_left + (client.right - main_left - toast_w) / 2;
    let toast_y = client.bottom - toast_h - 24;

    let toast_rect = RECT {
        left: toast_x,
        top: toast_y,
        right: toast_x + toast_w,
        bottom: toast_y + toast_h,
    };
    draw_rounded_rect(
        hdc,
        &toast_rect,
        CARD_RADIUS,
        CLR_FOREGROUND,
        CLR_FOREGROUND,
    );
    draw_text_simple(
        hdc,
        msg,
        toast_x + (toast_w - tw) / 2,
        toast_y + (toast_h - th) / 2,
        CLR_BACKGROUND,
        fonts.body_bold,
    );
}
