use image::{DynamicImage, RgbaImage, imageops};
use log::*;
use std::path::Path;

use crate::{RemapError, Result, open_image, save_image};

/// Rows added above and below when nothing else is asked for
pub const DEFAULT_PAD_ROWS: u32 = 6;

/// Decodes `input`, adds `rows` transparent rows above and below it, and writes the result to
/// `output`. Returns the padded dimensions.
pub fn pad_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    rows: u32,
) -> Result<(u32, u32)> {
    let image = open_image(input)?;
    let padded = pad_image(&image, rows)?;
    save_image(&padded, output)?;
    Ok(padded.dimensions())
}

/// Returns a copy of `image` with `rows` fully transparent rows above and below it.
pub fn pad_image(image: &DynamicImage, rows: u32) -> Result<RgbaImage> {
    let (width, height) = (image.width(), image.height());
    let new_height = rows
        .checked_mul(2)
        .and_then(|extra| extra.checked_add(height))
        .ok_or(RemapError::InvalidDimensions {
            width: u64::from(width),
            height: u64::from(height) + 2 * u64::from(rows),
        })?;

    let mut canvas = RgbaImage::new(width, new_height);
    imageops::replace(&mut canvas, &image.to_rgba8(), 0, i64::from(rows));
    debug!("Padded {width}x{height} image to {width}x{new_height}");
    Ok(canvas)
}

#[cfg(test)]
mod test {
    use super::*;
    use image::{Rgb, RgbImage, Rgba};
    use tempfile::tempdir;

    #[test]
    fn test_pad_image() {
        let src = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8, y as u8, 7, 100 + x as u8]));
        let out = pad_image(&DynamicImage::ImageRgba8(src.clone()), DEFAULT_PAD_ROWS).unwrap();

        assert_eq!(out.dimensions(), (3, 14));
        for (x, y, p) in out.enumerate_pixels() {
            if (6..8).contains(&y) {
                assert_eq!(p, src.get_pixel(x, y - 6));
            } else {
                assert_eq!(*p, Rgba([0, 0, 0, 0]));
            }
        }
    }

    #[test]
    fn test_pad_zero_rows() {
        let src = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        let out = pad_image(&DynamicImage::ImageRgb8(src), 0).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        assert!(out.pixels().all(|p| *p == Rgba([1, 2, 3, 255])));
    }

    #[test]
    fn test_pad_overflow() {
        let src = DynamicImage::ImageRgba8(RgbaImage::new(1, 1));
        assert!(matches!(
            pad_image(&src, u32::MAX / 2 + 1),
            Err(RemapError::InvalidDimensions { width: 1, .. })
        ));
    }

    #[test]
    fn test_pad_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("discord.png");
        RgbImage::from_pixel(5, 3, Rgb([40, 50, 60]))
            .save(&input)
            .unwrap();

        assert_eq!(pad_file(&input, &input, 2).unwrap(), (5, 7));

        let reread = open_image(&input).unwrap().to_rgba8();
        assert_eq!(*reread.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*reread.get_pixel(4, 2), Rgba([40, 50, 60, 255]));
        assert_eq!(*reread.get_pixel(4, 4), Rgba([40, 50, 60, 255]));
        assert_eq!(*reread.get_pixel(4, 5), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_pad_file_missing_input() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.png");
        assert!(matches!(
            pad_file(dir.path().join("nope.png"), &output, 6),
            Err(RemapError::FileNotFound(_))
        ));
        assert!(!output.exists());
    }
}
