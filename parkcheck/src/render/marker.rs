//! Location marker drawn over the stitched map.

use image::{Rgba, RgbaImage};

/// Marker fill color.
pub const MARKER_FILL: Rgba<u8> = Rgba([220, 53, 69, 255]);

/// Marker outline color.
pub const MARKER_OUTLINE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Outline thickness in pixels.
const OUTLINE_WIDTH: i64 = 2;

/// Marker radius for an image of the given size: `max(6, size / 50)`.
pub fn marker_radius(image_size: u32) -> u32 {
    (image_size / 50).max(6)
}

/// Draws a filled disc of `radius` with a white outline centered on
/// `(cx, cy)`. Pixels outside the image are skipped.
pub fn draw_marker(image: &mut RgbaImage, cx: i64, cy: i64, radius: u32) {
    let inner = radius as i64;
    let outer = inner + OUTLINE_WIDTH;

    fill_disc(image, cx, cy, outer, MARKER_OUTLINE);
    fill_disc(image, cx, cy, inner, MARKER_FILL);
}

fn fill_disc(image: &mut RgbaImage, cx: i64, cy: i64, radius: i64, color: Rgba<u8>) {
    let width = image.width() as i64;
    let height = image.height() as i64;
    let r2 = radius * radius;

    for y in (cy - radius).max(0)..=(cy + radius).min(height - 1) {
        for x in (cx - radius).max(0)..=(cx + radius).min(width - 1) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r2 {
                image.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_radius() {
        assert_eq!(marker_radius(128), 6);
        assert_eq!(marker_radius(300), 6);
        assert_eq!(marker_radius(512), 10);
        assert_eq!(marker_radius(2048), 40);
    }

    #[test]
    fn test_draw_marker_colors() {
        let mut image = RgbaImage::new(64, 64);
        draw_marker(&mut image, 32, 32, 6);

        assert_eq!(*image.get_pixel(32, 32), MARKER_FILL);
        assert_eq!(*image.get_pixel(38, 32), MARKER_FILL);
        assert_eq!(*image.get_pixel(39, 32), MARKER_OUTLINE);
        assert_eq!(*image.get_pixel(40, 32), MARKER_OUTLINE);
        assert_eq!(image.get_pixel(41, 32)[3], 0);
        assert_eq!(image.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_draw_marker_clips_at_edges() {
        let mut image = RgbaImage::new(16, 16);
        draw_marker(&mut image, 0, 15, 6);

        assert_eq!(*image.get_pixel(0, 15), MARKER_FILL);
        assert_eq!(image.get_pixel(15, 0)[3], 0);
    }
}
