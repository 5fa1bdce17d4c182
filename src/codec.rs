use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat};

use crate::error::{Error, Result};

/// Raster formats the pipeline round-trips. Anything else is rejected at
/// decode time, so an unsupported output format is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Png,
    Jpeg,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match *self {
            Format::Png => "png",
            Format::Jpeg => "jpeg",
        }
    }
}

pub fn decode(bytes: &[u8]) -> Result<(DynamicImage, Format)> {
    let format = match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => Format::Png,
        Ok(ImageFormat::Jpeg) => Format::Jpeg,
        _ => return Err(Error::UnsupportedFormat),
    };

    let img = image::load_from_memory_with_format(
        bytes,
        match format {
            Format::Png => ImageFormat::Png,
            Format::Jpeg => ImageFormat::Jpeg,
        },
    )
    .map_err(Error::Decode)?;

    Ok((img, format))
}

pub fn encode(img: &DynamicImage, format: Format) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    match format {
        Format::Png => {
            let rgba = img.to_rgba8();
            PngEncoder::new(&mut out)
                .write_image(&rgba, rgba.width(), rgba.height(), ExtendedColorType::Rgba8)
                .map_err(|source| Error::Encode {
                    format: "png",
                    source,
                })?;
        }
        Format::Jpeg => {
            // jpeg carries no alpha channel
            let rgb = img.to_rgb8();
            JpegEncoder::new(&mut out)
                .write_image(&rgb, rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
                .map_err(|source| Error::Encode {
                    format: "jpeg",
                    source,
                })?;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample() -> DynamicImage {
        let img = RgbaImage::from_fn(8, 6, |x, y| {
            Rgba([(x * 30) as u8, (y * 40) as u8, 128, 255])
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn decode_reports_png() {
        let bytes = encode(&sample(), Format::Png).unwrap();
        let (img, format) = decode(&bytes).unwrap();

        assert_eq!(format, Format::Png);
        assert_eq!((img.width(), img.height()), (8, 6));
    }

    #[test]
    fn decode_reports_jpeg() {
        let bytes = encode(&sample(), Format::Jpeg).unwrap();
        let (img, format) = decode(&bytes).unwrap();

        assert_eq!(format, Format::Jpeg);
        assert_eq!((img.width(), img.height()), (8, 6));
    }

    #[test]
    fn decode_rejects_unknown_bytes() {
        let result = decode(b"not an image at all");
        assert!(matches!(result, Err(Error::UnsupportedFormat)));
    }

    #[test]
    fn png_round_trip_is_lossless() {
        let src = sample();
        let bytes = encode(&src, Format::Png).unwrap();
        let (img, _) = decode(&bytes).unwrap();

        assert_eq!(img.to_rgba8(), src.to_rgba8());
    }

    #[test]
    fn jpeg_encode_accepts_rgba_input() {
        // alpha gets dropped on the way out rather than failing the encode
        let bytes = encode(&sample(), Format::Jpeg).unwrap();
        assert!(!bytes.is_empty());
    }
}
