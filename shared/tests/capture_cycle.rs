// End-to-end capture cycle: hotkey thread → sampler → UI-thread queue → session → disk

use hexhunter_shared::store::{self, DATA_FILE};
use hexhunter_shared::{
    CaptureCoordinator, CaptureError, ColorCaptured, ColorStore, CursorSource, HookEvent, Hotkey,
    HotkeyError, HotkeyHook, HotkeyListener, ListenerState, PixelSampler, Rgb, Session,
    StopSignal,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;
use tempfile::TempDir;

struct QueueHook {
    events: mpsc::Receiver<HookEvent>,
    stop: mpsc::Sender<HookEvent>,
}

struct QueueStop(mpsc::Sender<HookEvent>);

impl StopSignal for QueueStop {
    fn signal(&self) {
        let _ = self.0.send(HookEvent::Closed);
    }
}

impl HotkeyHook for QueueHook {
    type Stop = QueueStop;

    fn register(&mut self, _hotkey: &Hotkey) -> Result<QueueStop, HotkeyError> {
        Ok(QueueStop(self.stop.clone()))
    }

    fn wait(&mut self) -> HookEvent {
        self.events.recv().unwrap_or(HookEvent::Closed)
    }

    fn unregister(&mut self) {}
}

struct DeniedHook;

struct NeverStop;

impl StopSignal for NeverStop {
    fn signal(&self) {}
}

impl HotkeyHook for DeniedHook {
    type Stop = NeverStop;

    fn register(&mut self, _hotkey: &Hotkey) -> Result<NeverStop, HotkeyError> {
        Err(HotkeyError::Registration("permission denied".into()))
    }

    fn wait(&mut self) -> HookEvent {
        HookEvent::Closed
    }

    fn unregister(&mut self) {}
}

struct Cursor(i32, i32);

impl CursorSource for Cursor {
    fn cursor_position(&self) -> Result<(i32, i32), CaptureError> {
        Ok((self.0, self.1))
    }
}

/// 100x100 screen; (10, 20) is magenta with an alpha channel, everything else grey.
struct Screen;

impl PixelSampler for Screen {
    fn sample(&self, x: i32, y: i32) -> Result<Rgb, CaptureError> {
        if !(0..100).contains(&x) || !(0..100).contains(&y) {
            return Err(CaptureError::OffScreen { x, y });
        }
        if (x, y) == (10, 20) {
            Rgb::from_channels(&[255, 0, 170, 255])
        } else {
            Rgb::from_channels(&[0x80, 0x80, 0x80])
        }
    }
}

fn start_listener(
    cursor: Cursor,
) -> (HotkeyListener, mpsc::Sender<HookEvent>, mpsc::Receiver<Rgb>) {
    let (press_tx, press_rx) = mpsc::channel();
    let hook = QueueHook {
        events: press_rx,
        stop: press_tx.clone(),
    };
    let (ui_tx, ui_rx) = mpsc::channel();
    let coordinator = CaptureCoordinator::new(cursor, Screen, ui_tx);

    let mut listener = HotkeyListener::new(Hotkey::DEFAULT);
    listener
        .start(hook, move || coordinator.on_hotkey())
        .expect("listener should start");
    (listener, press_tx, ui_rx)
}

#[test]
fn hotkey_press_stores_color_of_pixel_under_cursor() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join(DATA_FILE);
    let mut session = Session::new(ColorStore::open(&path));

    let notified = Rc::new(RefCell::new(Vec::<ColorCaptured>::new()));
    let sink = notified.clone();
    session.subscribe(move |c: &ColorCaptured| sink.borrow_mut().push(c.clone()));

    let (mut listener, presses, ui_queue) = start_listener(Cursor(10, 20));
    presses.send(HookEvent::Pressed).unwrap();

    // The test thread plays the UI thread: drain the queue and apply.
    let color = ui_queue
        .recv_timeout(Duration::from_secs(2))
        .expect("capture should be posted to the UI queue");
    session.handle_capture(color).unwrap();
    listener.stop();

    assert_eq!(session.list_colors("Default"), ["#FF00AA"]);
    assert_eq!(notified.borrow().len(), 1);
    assert_eq!(notified.borrow()[0].project, "Default");
    assert_eq!(notified.borrow()[0].hex, "#FF00AA");

    let on_disk = store::read(&path).unwrap();
    assert_eq!(on_disk["Default"], vec!["#FF00AA"]);
}

#[test]
fn off_screen_cursor_posts_nothing() {
    let (mut listener, presses, ui_queue) = start_listener(Cursor(-50, 20));
    presses.send(HookEvent::Pressed).unwrap();
    assert!(ui_queue.recv_timeout(Duration::from_millis(200)).is_err());
    assert_eq!(listener.state(), ListenerState::Listening);
    listener.stop();
}

#[test]
fn repeated_presses_append_in_order() {
    let dir = TempDir::new().expect("should create temp dir");
    let mut session = Session::new(ColorStore::open(dir.path().join(DATA_FILE)));
    session.add_project("Branding").unwrap();

    let (mut listener, presses, ui_queue) = start_listener(Cursor(10, 20));
    for _ in 0..3 {
        presses.send(HookEvent::Pressed).unwrap();
    }
    for _ in 0..3 {
        let color = ui_queue.recv_timeout(Duration::from_secs(2)).unwrap();
        session.handle_capture(color).unwrap();
    }
    listener.stop();

    assert_eq!(
        session.list_colors("Branding"),
        ["#FF00AA", "#FF00AA", "#FF00AA"]
    );
    assert!(session.list_colors("Default").is_empty());
}

#[test]
fn denied_registration_leaves_app_usable() {
    let dir = TempDir::new().expect("should create temp dir");
    let mut session = Session::new(ColorStore::open(dir.path().join(DATA_FILE)));

    let mut listener = HotkeyListener::new(Hotkey::DEFAULT);
    let err = listener.start(DeniedHook, || {}).unwrap_err();
    assert!(matches!(err, HotkeyError::Registration(_)));
    assert_eq!(listener.state(), ListenerState::Stopped);

    session.add_project("Still works").unwrap();
    assert_eq!(session.list_projects(), vec!["Default", "Still works"]);
}

#[test]
fn store_survives_restart() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join(DATA_FILE);
    {
        let mut session = Session::new(ColorStore::open(&path));
        session.add_project("Empty").unwrap();
        session.add_project("Palette").unwrap();
        for rgb in [Rgb::new(1, 2, 3), Rgb::new(4, 5, 6), Rgb::new(1, 2, 3)] {
            session.handle_capture(rgb).unwrap();
        }
    }

    let reopened = Session::new(ColorStore::open(&path));
    assert_eq!(reopened.list_projects(), vec!["Default", "Empty", "Palette"]);
    assert!(reopened.list_colors("Empty").is_empty());
    assert_eq!(
        reopened.list_colors("Palette"),
        ["#010203", "#040506", "#010203"]
    );
    assert_eq!(reopened.active_project(), Some("Default"));
}
