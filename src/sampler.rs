// Cursor position and single-pixel screen capture via GDI

use hexhunter_shared::{CaptureError, CursorSource, PixelSampler, Rgb};
use windows::Win32::Foundation::POINT;
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits,
    MonitorFromPoint, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, CAPTUREBLT,
    DIB_RGB_COLORS, HDC, HGDIOBJ, MONITOR_DEFAULTTONULL, ROP_CODE, SRCCOPY,
};
use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

/// The desktop as seen by GDI. Stateless; a DC is taken per sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct Screen;

impl CursorSource for Screen {
    fn cursor_position(&self) -> Result<(i32, i32), CaptureError> {
        let mut pt = POINT::default();
        unsafe { GetCursorPos(&mut pt) }.map_err(|e| CaptureError::Unavailable(e.to_string()))?;
        Ok((pt.x, pt.y))
    }
}

impl PixelSampler for Screen {
    fn sample(&self, x: i32, y: i32) -> Result<Rgb, CaptureError> {
        unsafe {
            if MonitorFromPoint(POINT { x, y }, MONITOR_DEFAULTTONULL).is_invalid() {
                return Err(CaptureError::OffScreen { x, y });
            }

            let screen = GetDC(None);
            if screen.is_invalid() {
                return Err(CaptureError::Unavailable("no screen device context".into()));
            }
            let result = copy_pixel(screen, x, y);
            ReleaseDC(None, screen);
            result
        }
    }
}

/// Blit one pixel into a 32bpp bitmap and read it back as BGRA.
unsafe fn copy_pixel(screen: HDC, x: i32, y: i32) -> Result<Rgb, CaptureError> {
    let mem_dc = CreateCompatibleDC(Some(screen));
    let mem_bmp = CreateCompatibleBitmap(screen, 1, 1);
    let old_bmp = SelectObject(mem_dc, HGDIOBJ::from(mem_bmp));

    // CAPTUREBLT includes layered windows in the copy
    let blit = BitBlt(
        mem_dc,
        0,
        0,
        1,
        1,
        Some(screen),
        x,
        y,
        ROP_CODE(SRCCOPY.0 | CAPTUREBLT.0),
    );
    SelectObject(mem_dc, old_bmp);

    let mut info = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: 1,
            biHeight: -1, // top-down
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut bgra = [0u8; 4];
    let lines = GetDIBits(
        mem_dc,
        mem_bmp,
        0,
        1,
        Some(bgra.as_mut_ptr().cast()),
        &mut info,
        DIB_RGB_COLORS,
    );

    let _ = DeleteObject(HGDIOBJ::from(mem_bmp));
    let _ = DeleteDC(mem_dc);

    blit.map_err(|e| CaptureError::Unavailable(format!("BitBlt: {e}")))?;
    if lines == 0 {
        return Err(CaptureError::Unavailable("GetDIBits returned no rows".into()));
    }

    let [b, g, r, a] = bgra;
    Rgb::from_channels(&[r, g, b, a])
}
