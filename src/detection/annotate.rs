use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::sync::OnceLock;
use tracing::debug;

use crate::models::Detection;

const BOX_COLOR: Rgb<u8> = Rgb([64, 132, 244]);
const LABEL_TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const BOX_THICKNESS: i32 = 2;
const LABEL_FONT_SIZE: f32 = 18.0;
const LABEL_HEIGHT: i32 = 22;
// Rough per-character advance; good enough to size the label chip
const LABEL_CHAR_WIDTH: f32 = 9.5;
const LABEL_TEXT_PADDING: i32 = 2;

/// Common system locations for a usable sans-serif TTF
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

static LABEL_FONT: OnceLock<Option<FontVec>> = OnceLock::new();

/// Font for label text, discovered once per process.
///
/// When no font is available the annotated image still carries the boxes,
/// just without the text chips.
fn label_font() -> Option<&'static FontVec> {
    LABEL_FONT
        .get_or_init(|| {
            for path in FONT_SEARCH_PATHS {
                if let Ok(data) = std::fs::read(path) {
                    if let Ok(font) = FontVec::try_from_vec(data) {
                        debug!("label font loaded from {path}");
                        return Some(font);
                    }
                }
            }
            debug!("no label font found; annotating with boxes only");
            None
        })
        .as_ref()
}

/// Burn bounding boxes and `name confidence` labels into a copy of `image`.
///
/// The output corresponds 1:1 to `detections`; an empty list returns an
/// unmarked copy.
pub fn annotate(image: &RgbImage, detections: &[Detection]) -> RgbImage {
    let mut canvas = image.clone();
    for det in detections {
        draw_detection(&mut canvas, det);
    }
    canvas
}

fn draw_detection(canvas: &mut RgbImage, det: &Detection) {
    let (img_w, img_h) = (canvas.width() as i32, canvas.height() as i32);

    let x_min = (det.bbox.x.floor() as i32).clamp(0, img_w - 1);
    let y_min = (det.bbox.y.floor() as i32).clamp(0, img_h - 1);
    let x_max = (det.bbox.right().ceil() as i32).clamp(0, img_w - 1);
    let y_max = (det.bbox.bottom().ceil() as i32).clamp(0, img_h - 1);

    if x_min >= x_max || y_min >= y_max {
        return;
    }

    for inset in 0..BOX_THICKNESS {
        let width = x_max - x_min - 2 * inset;
        let height = y_max - y_min - 2 * inset;
        if width <= 0 || height <= 0 {
            break;
        }
        let rect = Rect::at(x_min + inset, y_min + inset).of_size(width as u32, height as u32);
        draw_hollow_rect_mut(canvas, rect, BOX_COLOR);
    }

    let Some(font) = label_font() else {
        return;
    };

    let label = format!("{} {:.2}", det.class_name, det.confidence);
    let text_width = (label.len() as f32 * LABEL_CHAR_WIDTH) as i32;

    // Chip sits above the box, or inside it when the box touches the top edge
    let label_x = x_min;
    let label_y = if y_min >= LABEL_HEIGHT {
        y_min - LABEL_HEIGHT
    } else {
        y_min
    };

    let chip_width = text_width.min(img_w - label_x);
    if chip_width <= 0 {
        return;
    }

    let chip = Rect::at(label_x, label_y).of_size(chip_width as u32, LABEL_HEIGHT as u32);
    draw_filled_rect_mut(canvas, chip, BOX_COLOR);
    draw_text_mut(
        canvas,
        LABEL_TEXT_COLOR,
        label_x + LABEL_TEXT_PADDING,
        label_y + LABEL_TEXT_PADDING,
        PxScale::from(LABEL_FONT_SIZE),
        font,
        &label,
    );
}
