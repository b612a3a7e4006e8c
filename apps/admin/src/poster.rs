//! # Merchant QR Poster
//!
//! Renders the printable onboarding poster for one merchant.
//!
//! ## Layout (pixels)
//! ```text
//!   0 ┌──────────────────────────────┐ 768
//!     │                              │
//!     │   background, scaled to      │
//!     │   cover and centre-cropped   │
//!     │                              │
//! 780 │      ┌──────────────┐        │
//!     │      │   QR, EC=H   │ 512    │
//!     │      │  4-module    │        │
//!     │      │  quiet zone  │        │
//!     │      └──────────────┘        │
//!1280 │      ·· merchant id ··       │  36px bold, centred, max 700 wide
//!     │                              │
//!1780 └──────────────────────────────┘
//!            128           640
//! ```
//!
//! Only dark modules are painted, so the background shows through the light
//! ones. Without a background the canvas is white.

use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{imageops::FilterType, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use qrcode::{Color, EcLevel, QrCode};
use tracing::debug;

use crate::config::QrSettings;
use crate::error::{AppError, AppResult};

pub const POSTER_WIDTH: u32 = 768;
pub const POSTER_HEIGHT: u32 = 1780;

pub const QR_LEFT: u32 = 128;
pub const QR_TOP: u32 = 780;
pub const QR_SIZE: u32 = 512;
pub const QUIET_ZONE_MODULES: usize = 4;

pub const LABEL_TOP: i32 = 1280;
pub const LABEL_MAX_WIDTH: u32 = 700;
pub const LABEL_PX: f32 = 36.0;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Poster renderer with its background and font loaded once.
pub struct PosterRenderer {
    background: Option<RgbaImage>,
    font: Option<FontVec>,
}

impl PosterRenderer {
    pub fn new(background: Option<RgbaImage>, font: Option<FontVec>) -> Self {
        PosterRenderer { background, font }
    }

    /// Loads the background and label font named in `[qr]`.
    pub fn from_settings(settings: &QrSettings) -> AppResult<Self> {
        let background = match &settings.background {
            Some(path) => {
                debug!(?path, "Loading poster background");
                let img = image::open(path)?;
                Some(
                    img.resize_to_fill(POSTER_WIDTH, POSTER_HEIGHT, FilterType::Triangle)
                        .to_rgba8(),
                )
            }
            None => None,
        };

        let font = match &settings.label_font {
            Some(path) => Some(load_font(path)?),
            None => None,
        };

        Ok(PosterRenderer::new(background, font))
    }

    pub fn has_label(&self) -> bool {
        self.font.is_some()
    }

    /// Draws the poster for `link`, labelled with `label`.
    pub fn render(&self, link: &str, label: &str) -> AppResult<RgbaImage> {
        let mut canvas = match &self.background {
            Some(bg) => bg.clone(),
            None => RgbaImage::from_pixel(POSTER_WIDTH, POSTER_HEIGHT, WHITE),
        };

        let code = QrCode::with_error_correction_level(link.as_bytes(), EcLevel::H)?;
        draw_modules(&mut canvas, &code);

        if let Some(font) = &self.font {
            draw_label(&mut canvas, font, label);
        }

        Ok(canvas)
    }

    /// Renders and writes a PNG to `path`.
    pub fn write(&self, link: &str, label: &str, path: &Path) -> AppResult<()> {
        let poster = self.render(link, label)?;
        poster.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

fn load_font(path: &Path) -> AppResult<FontVec> {
    let bytes = std::fs::read(path)?;
    FontVec::try_from_vec(bytes)
        .map_err(|e| AppError::Config(format!("qr.label_font {}: {}", path.display(), e)))
}

/// Paints the dark modules inside the QR box. Module edges are rounded per
/// module so neighbours meet without gaps.
fn draw_modules(canvas: &mut RgbaImage, code: &QrCode) {
    let width = code.width();
    let span = width + 2 * QUIET_ZONE_MODULES;
    let module = QR_SIZE as f64 / span as f64;
    let edge = |i: usize| (i as f64 * module).round() as i32;

    for (idx, color) in code.to_colors().into_iter().enumerate() {
        if color != Color::Dark {
            continue;
        }
        let col = idx % width + QUIET_ZONE_MODULES;
        let row = idx / width + QUIET_ZONE_MODULES;

        let x0 = edge(col);
        let y0 = edge(row);
        let w = (edge(col + 1) - x0).max(1) as u32;
        let h = (edge(row + 1) - y0).max(1) as u32;

        draw_filled_rect_mut(
            canvas,
            Rect::at(QR_LEFT as i32 + x0, QR_TOP as i32 + y0).of_size(w, h),
            BLACK,
        );
    }
}

/// Largest scale up to [`LABEL_PX`] at which `text` fits the label width.
fn label_scale(font: &FontVec, text: &str) -> PxScale {
    let scale = PxScale::from(LABEL_PX);
    let (w, _) = text_size(scale, font, text);
    if w <= LABEL_MAX_WIDTH || w == 0 {
        scale
    } else {
        PxScale::from(LABEL_PX * LABEL_MAX_WIDTH as f32 / w as f32)
    }
}

fn draw_label(canvas: &mut RgbaImage, font: &FontVec, text: &str) {
    let scale = label_scale(font, text);
    let (w, _) = text_size(scale, font, text);
    let x = (POSTER_WIDTH as i32 - w as i32) / 2;
    draw_text_mut(canvas, BLACK, x, LABEL_TOP, scale, font, text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_poster_geometry() {
        let renderer = PosterRenderer::new(None, None);
        let poster = renderer
            .render("https://tiffinwala.page.link/?link=x", "TW-1")
            .unwrap();

        assert_eq!(poster.dimensions(), (POSTER_WIDTH, POSTER_HEIGHT));

        // Quiet zone and everything outside the box stay white.
        assert_eq!(*poster.get_pixel(QR_LEFT + 2, QR_TOP + 2), WHITE);
        assert_eq!(*poster.get_pixel(10, 10), WHITE);
        assert_eq!(*poster.get_pixel(QR_LEFT - 1, QR_TOP + 256), WHITE);
        assert_eq!(*poster.get_pixel(QR_LEFT + QR_SIZE, QR_TOP + 256), WHITE);

        // Top-left finder pattern starts right after the quiet zone.
        let code = QrCode::with_error_correction_level(b"https://tiffinwala.page.link/?link=x", EcLevel::H).unwrap();
        let module = QR_SIZE as f64 / (code.width() + 2 * QUIET_ZONE_MODULES) as f64;
        let finder = (QUIET_ZONE_MODULES as f64 * module + module / 2.0) as u32;
        assert_eq!(*poster.get_pixel(QR_LEFT + finder, QR_TOP + finder), BLACK);
    }

    #[test]
    fn test_background_shows_through() {
        let dir = tempfile::tempdir().unwrap();
        let bg_path = dir.path().join("bg.png");
        RgbaImage::from_pixel(40, 90, Rgba([200, 30, 30, 255]))
            .save(&bg_path)
            .unwrap();

        let settings = QrSettings {
            background: Some(bg_path),
            ..QrSettings::default()
        };
        let renderer = PosterRenderer::from_settings(&settings).unwrap();
        assert!(!renderer.has_label());

        let poster = renderer.render("TW-1", "TW-1").unwrap();
        assert_eq!(poster.dimensions(), (POSTER_WIDTH, POSTER_HEIGHT));
        assert_eq!(*poster.get_pixel(5, 5), Rgba([200, 30, 30, 255]));
        assert_eq!(*poster.get_pixel(QR_LEFT + 2, QR_TOP + 2), Rgba([200, 30, 30, 255]));
    }

    #[test]
    fn test_write_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merchant-qr-TW-1.png");
        PosterRenderer::new(None, None)
            .write("TW-1", "TW-1", &path)
            .unwrap();

        let reread = image::open(&path).unwrap();
        assert_eq!(reread.width(), POSTER_WIDTH);
        assert_eq!(reread.height(), POSTER_HEIGHT);
    }

    #[test]
    fn test_bad_font_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        assert!(matches!(load_font(&path), Err(AppError::Config(_))));
    }
}
