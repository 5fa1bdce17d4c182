use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Proportional resize to a target width; height follows the sprite's aspect
/// ratio. Lanczos keeps the sprites free of aliasing at arbitrary scale
/// factors. A width of 0 yields an empty image, which blends as a no-op.
pub fn resize_to_width(asset: &RgbaImage, width: u32) -> RgbaImage {
    if width == 0 {
        return RgbaImage::new(0, 0);
    }

    let height = (width as f32 * asset.height() as f32 / asset.width() as f32)
        .round()
        .max(1.0) as u32;

    imageops::resize(asset, width, height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sprite(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([10, 200, 30, 255]))
    }

    #[test]
    fn preserves_aspect_ratio() {
        let resized = resize_to_width(&sprite(100, 50), 40);
        assert_eq!((resized.width(), resized.height()), (40, 20));
    }

    #[test]
    fn upscales_too() {
        let resized = resize_to_width(&sprite(16, 16), 64);
        assert_eq!((resized.width(), resized.height()), (64, 64));
    }

    #[test]
    fn rounds_derived_height() {
        // 7 * 15 / 10 = 10.5, rounds up
        let resized = resize_to_width(&sprite(10, 15), 7);
        assert_eq!((resized.width(), resized.height()), (7, 11));
    }

    #[test]
    fn never_flattens_to_zero_height() {
        let resized = resize_to_width(&sprite(100, 1), 3);
        assert_eq!((resized.width(), resized.height()), (3, 1));
    }

    #[test]
    fn zero_width_degenerates_to_empty() {
        let resized = resize_to_width(&sprite(16, 16), 0);
        assert_eq!((resized.width(), resized.height()), (0, 0));
    }

    #[test]
    fn leaves_the_source_untouched() {
        let original = sprite(16, 16);
        let _ = resize_to_width(&original, 8);
        assert_eq!(original, sprite(16, 16));
    }
}
