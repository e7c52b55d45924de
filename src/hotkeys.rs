// Global capture hotkey using Win32 RegisterHotKey on the listener thread
//
// A thread-level registration (no window) posts WM_HOTKEY to the registering
// thread's queue, so the listener thread runs its own small message loop.

use hexhunter_shared::{HookEvent, Hotkey, HotkeyError, HotkeyHook, StopSignal};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS, MOD_NOREPEAT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetMessageW, PeekMessageW, PostThreadMessageW, MSG, PM_NOREMOVE, WM_HOTKEY, WM_QUIT, WM_USER,
};

/// Hotkey ID (unique within the registering thread)
pub const HOTKEY_CAPTURE: i32 = 1;

#[derive(Default)]
pub struct Win32Hook {
    registered: bool,
}

/// Posts WM_QUIT to the listener thread
pub struct QuitThread(u32);

impl StopSignal for QuitThread {
    fn signal(&self) {
        unsafe {
            let _ = PostThreadMessageW(self.0, WM_QUIT, WPARAM(0), LPARAM(0));
        }
    }
}

impl HotkeyHook for Win32Hook {
    type Stop = QuitThread;

    fn register(&mut self, hotkey: &Hotkey) -> Result<QuitThread, HotkeyError> {
        let mods = HOT_KEY_MODIFIERS(hotkey.modifiers.bits() | MOD_NOREPEAT.0);

        unsafe {
            // Make sure this thread has a message queue before anyone posts to it
            let mut msg = MSG::default();
            let _ = PeekMessageW(&mut msg, None, WM_USER, WM_USER, PM_NOREMOVE);

            RegisterHotKey(None, HOTKEY_CAPTURE, mods, hotkey.key)
                .map_err(|e| HotkeyError::Registration(format!("{hotkey}: {e}")))?;
            self.registered = true;

            Ok(QuitThread(GetCurrentThreadId()))
        }
    }

    fn wait(&mut self) -> HookEvent {
        let mut msg = MSG::default();
        unsafe {
            loop {
                // 0 on WM_QUIT, -1 on error
                if GetMessageW(&mut msg, None, 0, 0).0 <= 0 {
                    return HookEvent::Closed;
                }
                if msg.message == WM_HOTKEY && msg.wParam.0 as i32 == HOTKEY_CAPTURE {
                    return HookEvent::Pressed;
                }
            }
        }
    }

    fn unregister(&mut self) {
        if self.registered {
            unsafe {
                let _ = UnregisterHotKey(None, HOTKEY_CAPTURE);
            }
            self.registered = false;
        }
    }
}
