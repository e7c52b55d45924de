// System tray icon with context menu

use windows::core::PCWSTR;
use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, LoadIconW, SetForegroundWindow,
    TrackPopupMenu, IDI_APPLICATION, MF_SEPARATOR, MF_STRING, TPM_BOTTOMALIGN, TPM_LEFTALIGN,
    WM_APP,
};

/// Custom message ID for tray icon callbacks
pub const WM_TRAY_ICON: u32 = WM_APP + 1;

/// Menu item IDs
pub const IDM_SHOW: u32 = 1001;
pub const IDM_QUIT: u32 = 1002;

fn wide_str(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Add the system tray icon. `tooltip` is truncated to the shell's 127 characters.
pub fn add_tray_icon(hwnd: HWND, tooltip: &str) -> bool {
    unsafe {
        let mut nid = NOTIFYICONDATAW {
            cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: hwnd,
            uID: 1,
            uFlags: NIF_ICON | NIF_MESSAGE | NIF_TIP,
            uCallbackMessage: WM_TRAY_ICON,
            ..Default::default()
        };

        if let Ok(icon) = LoadIconW(None, IDI_APPLICATION) {
            nid.hIcon = icon;
        }

        let tip = wide_str(tooltip);
        let len = tip.len().min(nid.szTip.len());
        nid.szTip[..len].copy_from_slice(&tip[..len]);
        if let Some(last) = nid.szTip.last_mut() {
            *last = 0;
        }

        let added = Shell_NotifyIconW(NIM_ADD, &nid).as_bool();
        if !added {
            tracing::warn!("tray icon not added");
        }
        added
    }
}

/// Remove the system tray icon
pub fn remove_tray_icon(hwnd: HWND) {
    unsafe {
        let nid = NOTIFYICONDATAW {
            cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: hwnd,
            uID: 1,
            ..Default::default()
        };
        let _ = Shell_NotifyIconW(NIM_DELETE, &nid);
    }
}

/// Show the tray context menu
pub fn show_context_menu(hwnd: HWND) {
    unsafe {
        let Ok(menu) = CreatePopupMenu() else {
            return;
        };
        let show_text = wide_str("Show HexHunter");
        let quit_text = wide_str("Quit");

        let _ = AppendMenuW(menu, MF_STRING, IDM_SHOW as usize, PCWSTR(show_text.as_ptr()));
        let _ = AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null());
        let _ = AppendMenuW(menu, MF_STRING, IDM_QUIT as usize, PCWSTR(quit_text.as_ptr()));

        let mut pt = POINT::default();
        let _ = GetCursorPos(&mut pt);

        // Required for TrackPopupMenu to work correctly with tray icons
        let _ = SetForegroundWindow(hwnd);

        let _ = TrackPopupMenu(
            menu,
            TPM_LEFTALIGN | TPM_BOTTOMALIGN,
            pt.x,
            pt.y,
            Some(0),
            hwnd,
            None,
        );

        let _ = DestroyMenu(menu);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tray_message_is_private_to_the_app() {
        assert_eq!(WM_TRAY_ICON, 0x8001);
        assert_ne!(WM_TRAY_ICON, crate::ui::WM_CAPTURED);
    }
}
