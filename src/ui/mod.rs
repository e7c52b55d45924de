pub mod controls;
pub mod painting;
pub mod theme;

use controls::*;
use theme::*;

use crate::tray;
use hexhunter_shared::{ColorCaptured, Rgb, Session, UiDispatcher};

use std::cell::RefCell;
use std::rc::Rc;

use windows::core::PCWSTR;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::*;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::*;

const CLASS_NAME: &str = "HexHunterMainWnd\0";
const WM_TRAY_CALLBACK: u32 = tray::WM_TRAY_ICON;
const TOAST_TIMER_ID: usize = 100;
const COPIED_TIMER_ID: usize = 101;

/// Posted by the hotkey thread; WPARAM carries `Rgb::to_bits`
pub const WM_CAPTURED: u32 = WM_APP + 20;

/// Child control ID of the project name input
const IDC_PROJECT_NAME: usize = 2001;
const ES_AUTOHSCROLL: u32 = 0x0080;
const WHEEL_NOTCH: i32 = 120;

/// Window state stored in GWLP_USERDATA
struct WndState {
    ui: UiState,
    session: Session,
    hotkey_label: String,
    edit: HWND,
    /// Toast text left by the `on_color_captured` subscriber
    capture_toast: Rc<RefCell<Option<String>>>,
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Borrow the state attached to `hwnd`, if the window has one yet.
///
/// Only called on the UI thread, and never while another borrow from the
/// same message is live.
unsafe fn state_mut<'a>(hwnd: HWND) -> Option<&'a mut WndState> {
    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut WndState;
    ptr.as_mut()
}

/// Create the main window (initially hidden). The window owns `session`
/// from here on; every store mutation happens inside its window procedure.
pub fn create_window(mut session: Session, hotkey_label: &str) -> Option<HWND> {
    let class_name = wide(CLASS_NAME);

    unsafe {
        let hinstance = GetModuleHandleW(PCWSTR::null()).unwrap_or_default();

        let wc = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(wnd_proc),
            hInstance: hinstance.into(),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            hbrBackground: CreateSolidBrush(CLR_BACKGROUND),
            hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
            hIcon: LoadIconW(None, IDI_APPLICATION).unwrap_or_default(),
            ..Default::default()
        };

        RegisterClassW(&wc);

        // Calculate window size to get desired client area
        let mut wr = RECT {
            left: 0,
            top: 0,
            right: WINDOW_WIDTH,
            bottom: WINDOW_HEIGHT,
        };
        let style = WS_OVERLAPPED | WS_CAPTION | WS_SYSMENU | WS_MINIMIZEBOX;
        let _ = AdjustWindowRectEx(&mut wr, style, false, WINDOW_EX_STYLE::default());

        let title = wide("HexHunter");

        let hwnd = match CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            PCWSTR(class_name.as_ptr()),
            PCWSTR(title.as_ptr()),
            style,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            wr.right - wr.left,
            wr.bottom - wr.top,
            None,
            None,
            Some(hinstance.into()),
            None,
        ) {
            Ok(hwnd) => hwnd,
            Err(e) => {
                tracing::error!(error = %e, "main window not created");
                return None;
            }
        };

        let edit_class = wide("EDIT");
        let empty = wide("");
        let edit = CreateWindowExW(
            WS_EX_CLIENTEDGE,
            PCWSTR(edit_class.as_ptr()),
            PCWSTR(empty.as_ptr()),
            WINDOW_STYLE(WS_CHILD.0 | WS_VISIBLE.0 | WS_TABSTOP.0 | ES_AUTOHSCROLL),
            PADDING,
            painting::INPUT_TOP,
            SIDEBAR_WIDTH - PADDING * 2,
            INPUT_HEIGHT,
            Some(hwnd),
            Some(HMENU(IDC_PROJECT_NAME as *mut _)),
            Some(hinstance.into()),
            None,
        )
        .unwrap_or_default();

        let capture_toast = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&capture_toast);
        session.subscribe(move |captured: &ColorCaptured| {
            *sink.borrow_mut() = Some(capture_message(captured));
        });

        let state = Box::new(WndState {
            ui: UiState::new(),
            session,
            hotkey_label: hotkey_label.to_string(),
            edit,
            capture_toast,
        });
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, Box::into_raw(state) as isize);

        Some(hwnd)
    }
}

/// Show and focus the main window
pub fn show_window(hwnd: HWND) {
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = SetForegroundWindow(hwnd);
    }
}

/// Hide the main window
pub fn hide_window(hwnd: HWND) {
    unsafe {
        let _ = ShowWindow(hwnd, SW_HIDE);
    }
}

/// Trigger a repaint
pub fn invalidate(hwnd: HWND) {
    unsafe {
        let _ = InvalidateRect(Some(hwnd), None, true);
    }
}

/// Show a toast message
pub fn show_toast(hwnd: HWND, message: &str) {
    unsafe {
        let Some(state) = state_mut(hwnd) else {
            return;
        };
        set_toast(hwnd, &mut state.ui, message);
    }
}

fn set_toast(hwnd: HWND, ui: &mut UiState, message: &str) {
    ui.toast_message = message.to_string();
    ui.toast_visible = true;
    invalidate(hwnd);

    // Auto-hide after 2 seconds
    unsafe {
        SetTimer(Some(hwnd), TOAST_TIMER_ID, 2000, None);
    }
}

/// Hands captured colors to the window's thread via its message queue.
/// Holds the handle as an integer so it can move to the hotkey thread.
pub struct WindowDispatcher {
    hwnd: isize,
}

impl WindowDispatcher {
    pub fn new(hwnd: HWND) -> Self {
        Self {
            hwnd: hwnd.0 as isize,
        }
    }
}

impl UiDispatcher for WindowDispatcher {
    fn dispatch(&self, color: Rgb) -> bool {
        unsafe {
            PostMessageW(
                Some(HWND(self.hwnd as *mut _)),
                WM_CAPTURED,
                WPARAM(color.to_bits() as usize),
                LPARAM(0),
            )
            .is_ok()
        }
    }
}

// ── Click handling ──────────────────────────────────────────────────────────

fn read_edit_text(edit: HWND) -> String {
    unsafe {
        let len = GetWindowTextLengthW(edit);
        if len <= 0 {
            return String::new();
        }
        let mut buf = vec![0u16; len as usize + 1];
        let copied = GetWindowTextW(edit, &mut buf);
        String::from_utf16_lossy(&buf[..copied.max(0) as usize])
    }
}

fn clear_edit_text(edit: HWND) {
    let empty = wide("");
    unsafe {
        let _ = SetWindowTextW(edit, PCWSTR(empty.as_ptr()));
    }
}

fn copy_to_clipboard(hex: &str) -> bool {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(hex)) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "clipboard copy failed");
            false
        }
    }
}

fn on_click(hwnd: HWND, state: &mut WndState, hit: Hit) {
    match hit {
        Hit::AddProject => {
            let name = read_edit_text(state.edit);
            match state.session.add_project(name.trim()) {
                Ok(()) => {
                    clear_edit_text(state.edit);
                    state.ui.scroll_offset = 0;
                    // New projects go last; the next paint clamps this to the end
                    state.ui.project_scroll = i32::MAX;
                }
                Err(e) => set_toast(hwnd, &mut state.ui, &e.to_string()),
            }
        }
        Hit::DeleteProject => {
            if let Err(e) = state.session.delete_active_project() {
                set_toast(hwnd, &mut state.ui, &e.to_string());
            }
            state.ui.scroll_offset = 0;
        }
        Hit::Project(name) => {
            if state.session.select_project(&name).is_ok() {
                state.ui.scroll_offset = 0;
                state.ui.copied_index = None;
            }
        }
        Hit::CopyColor { index, hex } => {
            if copy_to_clipboard(&hex) {
                state.ui.copied_index = Some(index);
                unsafe {
                    SetTimer(Some(hwnd), COPIED_TIMER_ID, 1000, None);
                }
            }
        }
        Hit::DeleteColor(index) => {
            let Some(project) = state.session.active_project().map(str::to_owned) else {
                return;
            };
            if state.session.delete_color(&project, index).is_ok() {
                state.ui.copied_index = None;
                state.ui.forget_color_rows();
            }
        }
    }
    invalidate(hwnd);
}

fn capture_message(captured: &ColorCaptured) -> String {
    format!("{} saved to {}", captured.hex, captured.project)
}

fn on_captured(hwnd: HWND, state: &mut WndState, color: Rgb) {
    if let Err(e) = state.session.handle_capture(color) {
        tracing::warn!(error = %e, color = %color, "capture not stored");
        set_toast(hwnd, &mut state.ui, &e.to_string());
        return;
    }
    let message = state.capture_toast.borrow_mut().take();
    if let Some(message) = message {
        set_toast(hwnd, &mut state.ui, &message);
    }
}

/// Window procedure
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_PAINT => {
            let mut ps = PAINTSTRUCT::default();
            let hdc = BeginPaint(hwnd, &mut ps);

            // Double-buffer to avoid flicker
            let mut client = RECT::default();
            let _ = GetClientRect(hwnd, &mut client);

            let mem_dc = CreateCompatibleDC(Some(hdc));
            let mem_bmp = CreateCompatibleBitmap(hdc, client.right, client.bottom);
            let old_bmp = SelectObject(mem_dc, HGDIOBJ::from(mem_bmp));

            if let Some(state) = state_mut(hwnd) {
                painting::paint(
                    mem_dc,
                    &client,
                    &mut state.ui,
                    &state.session,
                    &state.hotkey_label,
                );
            }

            let _ = BitBlt(
                hdc,
                0,
                0,
                client.right,
                client.bottom,
                Some(mem_dc),
                0,
                0,
                SRCCOPY,
            );

            SelectObject(mem_dc, old_bmp);
            let _ = DeleteObject(HGDIOBJ::from(mem_bmp));
            let _ = DeleteDC(mem_dc);
            let _ = EndPaint(hwnd, &ps);
            LRESULT(0)
        }

        WM_LBUTTONDOWN => {
            let Some(state) = state_mut(hwnd) else {
                return DefWindowProcW(hwnd, msg, wparam, lparam);
            };
            let x = (lparam.0 & 0xFFFF) as i16 as i32;
            let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;

            match state.ui.hit_test(x, y) {
                Some(hit) => {
                    on_click(hwnd, state, hit);
                    LRESULT(0)
                }
                None => DefWindowProcW(hwnd, msg, wparam, lparam),
            }
        }

        WM_MOUSEWHEEL => {
            if let Some(state) = state_mut(hwnd) {
                let delta = ((wparam.0 >> 16) & 0xFFFF) as i16 as i32;
                // Wheel coordinates are screen-relative
                let mut pt = POINT {
                    x: (lparam.0 & 0xFFFF) as i16 as i32,
                    y: ((lparam.0 >> 16) & 0xFFFF) as i16 as i32,
                };
                let _ = ScreenToClient(hwnd, &mut pt);
                let scrolled = if pt.x < SIDEBAR_WIDTH {
                    state
                        .ui
                        .scroll_projects_by(-delta * painting::PROJECT_STEP / WHEEL_NOTCH)
                } else {
                    state.ui.scroll_by(-delta * (ROW_HEIGHT + ROW_GAP) / WHEEL_NOTCH)
                };
                if scrolled {
                    invalidate(hwnd);
                }
            }
            LRESULT(0)
        }

        WM_CAPTURED => {
            if let Some(state) = state_mut(hwnd) {
                on_captured(hwnd, state, Rgb::from_bits(wparam.0 as u32));
            }
            LRESULT(0)
        }

        WM_COMMAND => {
            let cmd = (wparam.0 & 0xFFFF) as u32;
            match cmd {
                tray::IDM_SHOW => {
                    show_window(hwnd);
                }
                tray::IDM_QUIT => {
                    tray::remove_tray_icon(hwnd);
                    let _ = DestroyWindow(hwnd);
                }
                _ => {}
            }
            LRESULT(0)
        }

        WM_TRAY_CALLBACK => {
            let event = (lparam.0 & 0xFFFF) as u32;
            match event {
                WM_LBUTTONUP => {
                    show_window(hwnd);
                }
                WM_RBUTTONUP => {
                    tray::show_context_menu(hwnd);
                }
                _ => {}
            }
            LRESULT(0)
        }

        WM_TIMER => {
            let timer_id = wparam.0;
            if let Some(state) = state_mut(hwnd) {
                if timer_id == TOAST_TIMER_ID {
                    state.ui.toast_visible = false;
                    state.ui.toast_message.clear();
                } else if timer_id == COPIED_TIMER_ID {
                    state.ui.copied_index = None;
                }
                invalidate(hwnd);
            }
            let _ = KillTimer(Some(hwnd), timer_id);
            LRESULT(0)
        }

        WM_CLOSE => {
            // Hide to tray instead of quitting
            hide_window(hwnd);
            LRESULT(0)
        }

        WM_DESTROY => {
            let ptr = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) as *mut WndState;
            if !ptr.is_null() {
                drop(Box::from_raw(ptr));
            }
            PostQuitMessage(0);
            LRESULT(0)
        }

        WM_ERASEBKGND => {
            // Handled in WM_PAINT with double buffering
            LRESULT(1)
        }

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
