// Prevents console window in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(windows)]
mod hotkeys;
#[cfg(windows)]
mod sampler;
#[cfg(windows)]
mod tray;
#[cfg(windows)]
mod ui;

#[cfg(windows)]
fn main() {
    use hexhunter_shared::{
        config, logging, CaptureCoordinator, ColorStore, HotkeyListener, Session, DATA_FILE,
    };
    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, TranslateMessage, MSG,
    };

    // Single-instance check
    if is_already_running() {
        return;
    }

    let cfg = config::load_config();
    if !config::config_path().exists() {
        config::save_config(&cfg);
    }
    logging::init(&cfg.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "HexHunter starting");

    let session = Session::new(ColorStore::open(DATA_FILE));

    let hotkey = cfg.capture_hotkey();
    let hotkey_label = hotkey.to_string();

    let Some(hwnd) = ui::create_window(session, &hotkey_label) else {
        std::process::exit(1);
    };

    tray::add_tray_icon(hwnd, &format!("HexHunter ({hotkey_label})"));

    // Hotkey presses are sampled on the listener thread and posted to the window
    let coordinator = CaptureCoordinator::new(
        sampler::Screen,
        sampler::Screen,
        ui::WindowDispatcher::new(hwnd),
    );
    let mut listener = HotkeyListener::new(hotkey);
    if let Err(e) = listener.start(hotkeys::Win32Hook::default(), move || {
        coordinator.on_hotkey()
    }) {
        tracing::error!(error = %e, "capture hotkey unavailable");
        ui::show_toast(hwnd, &format!("Capture hotkey {hotkey_label} unavailable"));
    }

    // Show and focus main window on startup
    ui::show_window(hwnd);

    // Win32 message loop
    unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    // Cleanup
    listener.stop();
    tracing::info!("HexHunter stopped");
}

#[cfg(not(windows))]
fn main() {
    hexhunter_shared::logging::init("info");
    tracing::error!("HexHunter requires Windows");
    eprintln!("HexHunter requires Windows: the capture hotkey and screen sampler use Win32.");
    std::process::exit(1);
}

/// Check if another instance is already running
#[cfg(windows)]
fn is_already_running() -> bool {
    use windows::core::PCWSTR;
    use windows::Win32::System::Threading::{
        CreateMutexW, OpenMutexW, SYNCHRONIZATION_ACCESS_RIGHTS,
    };

    const SINGLE_INSTANCE_MUTEX: &str = "HexHunterMutex\0";
    let name: Vec<u16> = SINGLE_INSTANCE_MUTEX.encode_utf16().collect();

    unsafe {
        let existing = OpenMutexW(
            SYNCHRONIZATION_ACCESS_RIGHTS(0x001F0001), // MUTEX_ALL_ACCESS
            false,
            PCWSTR(name.as_ptr()),
        );
        if existing.is_ok() {
            return true;
        }

        // This instance owns the mutex until exit
        let _ = CreateMutexW(None, true, PCWSTR(name.as_ptr()));
        false
    }
}
