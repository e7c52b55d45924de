// Background global-hotkey listener
//
// The OS hook lives on its own thread so it keeps working while the UI
// thread is busy, and so the hook never runs UI code. Presses are handed
// to a callback on that thread; the callback must only post work to the UI.

use crate::error::HotkeyError;
use crate::hotkey::Hotkey;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

/// Listener lifecycle. There is no paused state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Stopped,
    Listening,
}

/// What a blocked [`HotkeyHook::wait`] woke up for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    Pressed,
    Closed,
}

/// Wakes a listener thread blocked in [`HotkeyHook::wait`] so it can exit.
pub trait StopSignal: Send + 'static {
    fn signal(&self);
}

/// OS-specific global hotkey registration.
///
/// All methods are called on the listener thread, which matters for
/// platforms where hotkey registration is bound to the registering thread.
pub trait HotkeyHook: Send + 'static {
    type Stop: StopSignal;

    fn register(&mut self, hotkey: &Hotkey) -> Result<Self::Stop, HotkeyError>;

    /// Block until the hotkey fires or the stop signal arrives.
    fn wait(&mut self) -> HookEvent;

    fn unregister(&mut self);
}

struct Running {
    stop: Box<dyn StopSignal>,
    thread: JoinHandle<()>,
}

pub struct HotkeyListener {
    hotkey: Hotkey,
    running: Option<Running>,
}

impl HotkeyListener {
    pub fn new(hotkey: Hotkey) -> Self {
        Self {
            hotkey,
            running: None,
        }
    }

    pub fn state(&self) -> ListenerState {
        match &self.running {
            Some(running) if !running.thread.is_finished() => ListenerState::Listening,
            _ => ListenerState::Stopped,
        }
    }

    /// Spawn the listener thread and register the hotkey on it.
    ///
    /// Returns once registration has either succeeded (now Listening) or
    /// failed (still Stopped, error returned for the caller to log).
    pub fn start<H, F>(&mut self, hook: H, on_press: F) -> Result<(), HotkeyError>
    where
        H: HotkeyHook,
        F: FnMut() + Send + 'static,
    {
        if self.state() == ListenerState::Listening {
            return Err(HotkeyError::AlreadyListening);
        }
        // Reap a thread that exited on its own
        if let Some(stale) = self.running.take() {
            let _ = stale.thread.join();
        }

        let hotkey = self.hotkey;
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<H::Stop, HotkeyError>>(1);

        let thread = thread::Builder::new()
            .name("hotkey-listener".into())
            .spawn(move || listen(hook, hotkey, ready_tx, on_press))
            .map_err(HotkeyError::Spawn)?;

        match ready_rx.recv() {
            Ok(Ok(stop)) => {
                tracing::info!(hotkey = %hotkey, "hotkey listener started");
                self.running = Some(Running {
                    stop: Box::new(stop),
                    thread,
                });
                Ok(())
            }
            Ok(Err(e)) => {
                let _ = thread.join();
                tracing::warn!(hotkey = %hotkey, error = %e, "hotkey listener not started");
                Err(e)
            }
            Err(_) => {
                let _ = thread.join();
                Err(HotkeyError::Registration(
                    "listener thread exited before registering".into(),
                ))
            }
        }
    }

    /// Unregister and wait for the listener thread to finish.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.stop.signal();
            if running.thread.join().is_err() {
                tracing::error!("hotkey listener thread panicked");
            }
            tracing::info!(hotkey = %self.hotkey, "hotkey listener stopped");
        }
    }
}

impl Drop for HotkeyListener {
    // Signal only: joining here could hold up process exit.
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            running.stop.signal();
        }
    }
}

fn listen<H, F>(
    mut hook: H,
    hotkey: Hotkey,
    ready: mpsc::SyncSender<Result<H::Stop, HotkeyError>>,
    mut on_press: F,
) where
    H: HotkeyHook,
    F: FnMut(),
{
    match hook.register(&hotkey) {
        Ok(stop) => {
            if ready.send(Ok(stop)).is_err() {
                hook.unregister();
                return;
            }
        }
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    }
    drop(ready);

    while hook.wait() == HookEvent::Pressed {
        tracing::debug!(hotkey = %hotkey, "hotkey pressed");
        on_press();
    }

    hook.unregister();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Hook driven by a channel: the test sends presses, the stop signal sends Closed.
    pub(crate) struct ChannelHook {
        events: mpsc::Receiver<HookEvent>,
        sender: mpsc::Sender<HookEvent>,
        fail_with: Option<String>,
        unregistered: Arc<Mutex<bool>>,
    }

    pub(crate) struct ChannelStop(mpsc::Sender<HookEvent>);

    impl StopSignal for ChannelStop {
        fn signal(&self) {
            let _ = self.0.send(HookEvent::Closed);
        }
    }

    impl ChannelHook {
        pub(crate) fn new() -> (Self, mpsc::Sender<HookEvent>) {
            let (sender, events) = mpsc::channel();
            let hook = Self {
                events,
                sender: sender.clone(),
                fail_with: None,
                unregistered: Arc::new(Mutex::new(false)),
            };
            (hook, sender)
        }

        fn failing(reason: &str) -> Self {
            let (mut hook, _) = Self::new();
            hook.fail_with = Some(reason.to_string());
            hook
        }
    }

    impl HotkeyHook for ChannelHook {
        type Stop = ChannelStop;

        fn register(&mut self, _hotkey: &Hotkey) -> Result<ChannelStop, HotkeyError> {
            match &self.fail_with {
                Some(reason) => Err(HotkeyError::Registration(reason.clone())),
                None => Ok(ChannelStop(self.sender.clone())),
            }
        }

        fn wait(&mut self) -> HookEvent {
            self.events.recv().unwrap_or(HookEvent::Closed)
        }

        fn unregister(&mut self) {
            *self.unregistered.lock().unwrap() = true;
        }
    }

    fn wait_for(count: &AtomicUsize, expected: usize) {
        for _ in 0..200 {
            if count.load(Ordering::SeqCst) >= expected {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("callback ran {} times, expected {expected}", count.load(Ordering::SeqCst));
    }

    #[test]
    fn test_new_listener_is_stopped() {
        let listener = HotkeyListener::new(Hotkey::DEFAULT);
        assert_eq!(listener.state(), ListenerState::Stopped);
    }

    #[test]
    fn test_press_invokes_callback_and_keeps_listening() {
        let (hook, presses) = ChannelHook::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();

        let mut listener = HotkeyListener::new(Hotkey::DEFAULT);
        listener
            .start(hook, move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        assert_eq!(listener.state(), ListenerState::Listening);

        presses.send(HookEvent::Pressed).unwrap();
        presses.send(HookEvent::Pressed).unwrap();
        wait_for(&count, 2);
        assert_eq!(listener.state(), ListenerState::Listening);

        listener.stop();
        assert_eq!(listener.state(), ListenerState::Stopped);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_stop_unregisters_hook() {
        let (hook, _presses) = ChannelHook::new();
        let unregistered = hook.unregistered.clone();
        let mut listener = HotkeyListener::new(Hotkey::DEFAULT);
        listener.start(hook, || {}).unwrap();

        listener.stop();
        assert!(*unregistered.lock().unwrap());
    }

    #[test]
    fn test_registration_failure_stays_stopped() {
        let mut listener = HotkeyListener::new(Hotkey::DEFAULT);
        let err = listener
            .start(ChannelHook::failing("access denied"), || {})
            .unwrap_err();
        assert!(matches!(err, HotkeyError::Registration(ref msg) if msg == "access denied"));
        assert_eq!(listener.state(), ListenerState::Stopped);
    }

    #[test]
    fn test_second_start_is_rejected() {
        let (hook, _presses) = ChannelHook::new();
        let (second, _) = ChannelHook::new();
        let mut listener = HotkeyListener::new(Hotkey::DEFAULT);
        listener.start(hook, || {}).unwrap();

        assert!(matches!(
            listener.start(second, || {}),
            Err(HotkeyError::AlreadyListening)
        ));
        listener.stop();
    }

    #[test]
    fn test_restart_after_stop() {
        let mut listener = HotkeyListener::new(Hotkey::DEFAULT);
        let (hook, _presses) = ChannelHook::new();
        listener.start(hook, || {}).unwrap();
        listener.stop();

        let (hook, _presses) = ChannelHook::new();
        listener.start(hook, || {}).unwrap();
        assert_eq!(listener.state(), ListenerState::Listening);
        listener.stop();
    }

    #[test]
    fn test_stop_when_stopped_is_noop() {
        let mut listener = HotkeyListener::new(Hotkey::DEFAULT);
        listener.stop();
        assert_eq!(listener.state(), ListenerState::Stopped);
    }
}
