//! Core of HexHunter: the project color store, the capture pipeline that
//! turns a global hotkey press into a stored `#RRGGBB` value, and the
//! background hotkey listener. Platform code plugs in through the
//! [`CursorSource`], [`PixelSampler`], [`UiDispatcher`] and [`HotkeyHook`] traits.

pub mod color;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod hotkey;
pub mod listener;
pub mod logging;
pub mod session;
pub mod store;

pub use color::Rgb;
pub use coordinator::{CaptureCoordinator, CursorSource, PixelSampler, UiDispatcher};
pub use error::{CaptureError, HotkeyError, PersistenceError, ValidationError};
pub use hotkey::{Hotkey, Modifiers};
pub use listener::{HookEvent, HotkeyHook, HotkeyListener, ListenerState, StopSignal};
pub use session::{ColorCaptured, Session};
pub use store::{ColorStore, DATA_FILE, DEFAULT_PROJECT};
