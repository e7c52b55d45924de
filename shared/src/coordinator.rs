// Listener-thread half of a capture cycle: cursor → pixel → post to the UI thread
//
// The store is never touched here. The sampled color crosses to the UI
// thread by value, where `Session::handle_capture` resolves the project
// and appends it.

use crate::color::Rgb;
use crate::error::CaptureError;
use std::sync::mpsc;

/// Reads the pointer position in absolute screen coordinates.
pub trait CursorSource {
    fn cursor_position(&self) -> Result<(i32, i32), CaptureError>;
}

/// Reads one pixel at absolute screen coordinates.
pub trait PixelSampler {
    fn sample(&self, x: i32, y: i32) -> Result<Rgb, CaptureError>;
}

/// Post-and-return handoff onto the UI thread. Returns false if the UI is gone.
pub trait UiDispatcher {
    fn dispatch(&self, color: Rgb) -> bool;
}

impl UiDispatcher for mpsc::Sender<Rgb> {
    fn dispatch(&self, color: Rgb) -> bool {
        self.send(color).is_ok()
    }
}

pub struct CaptureCoordinator<C, S, D> {
    cursor: C,
    sampler: S,
    dispatcher: D,
}

impl<C, S, D> CaptureCoordinator<C, S, D>
where
    C: CursorSource,
    S: PixelSampler,
    D: UiDispatcher,
{
    pub fn new(cursor: C, sampler: S, dispatcher: D) -> Self {
        Self {
            cursor,
            sampler,
            dispatcher,
        }
    }

    /// Sample the pixel under the cursor.
    pub fn sample_at_cursor(&self) -> Result<Rgb, CaptureError> {
        let (x, y) = self.cursor.cursor_position()?;
        let color = self.sampler.sample(x, y)?;
        tracing::debug!(x, y, color = %color, "pixel sampled");
        Ok(color)
    }

    /// Hotkey callback. Failures are logged and end this cycle only.
    pub fn on_hotkey(&self) {
        match self.sample_at_cursor() {
            Ok(color) => {
                if !self.dispatcher.dispatch(color) {
                    tracing::warn!(color = %color, "UI thread gone, capture dropped");
                }
            }
            Err(e) => tracing::warn!(error = %e, "capture aborted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FixedCursor(Result<(i32, i32), CaptureError>);

    impl CursorSource for FixedCursor {
        fn cursor_position(&self) -> Result<(i32, i32), CaptureError> {
            self.0.clone()
        }
    }

    /// One 40x40 display whose pixel at (10, 20) carries an alpha channel.
    struct FakeScreen {
        calls: Cell<usize>,
    }

    impl PixelSampler for FakeScreen {
        fn sample(&self, x: i32, y: i32) -> Result<Rgb, CaptureError> {
            self.calls.set(self.calls.get() + 1);
            if !(0..40).contains(&x) || !(0..40).contains(&y) {
                return Err(CaptureError::OffScreen { x, y });
            }
            if (x, y) == (10, 20) {
                return Rgb::from_channels(&[255, 0, 170, 255]);
            }
            Ok(Rgb::new(0, 0, 0))
        }
    }

    fn screen() -> FakeScreen {
        FakeScreen {
            calls: Cell::new(0),
        }
    }

    #[test]
    fn test_capture_posts_color_under_cursor() {
        let (tx, rx) = mpsc::channel();
        let coordinator = CaptureCoordinator::new(FixedCursor(Ok((10, 20))), screen(), tx);

        coordinator.on_hotkey();

        let posted = rx.try_recv().expect("color should be posted");
        assert_eq!(posted.to_hex(), "#FF00AA");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_off_screen_capture_posts_nothing() {
        let (tx, rx) = mpsc::channel();
        let coordinator = CaptureCoordinator::new(FixedCursor(Ok((-1, 5000))), screen(), tx);

        assert_eq!(
            coordinator.sample_at_cursor(),
            Err(CaptureError::OffScreen { x: -1, y: 5000 })
        );
        coordinator.on_hotkey();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_cursor_failure_skips_sampling() {
        let (tx, rx) = mpsc::channel();
        let cursor = FixedCursor(Err(CaptureError::Unavailable("no desktop".into())));
        let coordinator = CaptureCoordinator::new(cursor, screen(), tx);

        coordinator.on_hotkey();
        assert!(rx.try_recv().is_err());
        assert_eq!(coordinator.sampler.calls.get(), 0);
    }

    #[test]
    fn test_closed_ui_does_not_panic() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let coordinator = CaptureCoordinator::new(FixedCursor(Ok((10, 20))), screen(), tx);
        coordinator.on_hotkey();
    }
}
