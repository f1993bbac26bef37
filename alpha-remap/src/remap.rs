use image::{
    ColorType, DynamicImage, GrayImage, ImageError, ImageFormat, ImageReader, Rgba, RgbaImage,
};
use log::*;
use std::{borrow::Cow, io::Cursor, path::Path};

use crate::{RemapError, Result, color_mode, open_image, save_image};

/// Rebuilds the image at `input` from its own alpha channel and writes it to `output`.
///
/// `output` may be the same path as `input`, in which case the file is re-encoded in place.
/// Nothing is written unless decoding and the mode check succeed. Returns the color type the
/// input was decoded as.
pub fn remap_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<ColorType> {
    let image = open_image(input)?;
    let remapped = remap_image(&image)?;
    save_image(&remapped, output)?;
    Ok(image.color())
}

/// Process raw image data, returning a PNG
pub fn remap_bytes(input: &[u8]) -> Result<Vec<u8>> {
    let img_in = ImageReader::new(Cursor::new(input))
        .with_guessed_format()
        .map_err(|e| RemapError::Decode(ImageError::IoError(e)))?
        .decode()
        .map_err(RemapError::Decode)?;
    let img_out = remap_image(&img_in)?;
    let mut writer = Cursor::new(Vec::new());
    img_out
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(RemapError::Encode)?;
    Ok(writer.into_inner())
}

/// Builds a new RGBA image by pasting the alpha plane of `image` onto a fully transparent
/// canvas, using that same plane as the paste mask.
///
/// The result keeps the source's alpha values and has zeroed color channels. Images with
/// fewer than four channels are rejected.
pub fn remap_image(image: &DynamicImage) -> Result<RgbaImage> {
    let color = image.color();
    if color.channel_count() < 4 {
        return Err(RemapError::Format {
            mode: color_mode(color),
        });
    }

    let source: Cow<RgbaImage> = match image.as_rgba8() {
        Some(rgba) => Cow::Borrowed(rgba),
        None => Cow::Owned(image.to_rgba8()),
    };
    let alpha = extract_alpha(&source);

    let mut canvas = RgbaImage::new(source.width(), source.height());
    paste_plane(&mut canvas, &alpha, &alpha, (0, 0));
    debug!(
        "Remapped {}x{} {} image",
        canvas.width(),
        canvas.height(),
        color_mode(color)
    );
    Ok(canvas)
}

/// Copies the alpha channel of `image` into its own plane.
pub fn extract_alpha(image: &RgbaImage) -> GrayImage {
    let mut plane = GrayImage::new(image.width(), image.height());
    for (Rgba([_, _, _, alpha_channel]), p) in image.pixels().zip(plane.pixels_mut()) {
        p.0[0] = *alpha_channel;
    }
    plane
}

/// Pastes a single-band `plane` onto `dest` at `offset`, gated by `mask`.
///
/// A single band only feeds the destination's alpha band: each incoming pixel is
/// `(0, 0, 0, plane)`. Where the mask is 0 the destination is left alone, elsewhere the
/// incoming pixel is composited over it. Anything falling outside `dest` is clipped.
///
/// # Panics
///
/// Panics if `plane` and `mask` are not the same size.
pub fn paste_plane(dest: &mut RgbaImage, plane: &GrayImage, mask: &GrayImage, offset: (i64, i64)) {
    assert_eq!(
        plane.dimensions(),
        mask.dimensions(),
        "Paste mask must match the pasted plane"
    );
    let (off_x, off_y) = offset;
    let (dest_w, dest_h) = (i64::from(dest.width()), i64::from(dest.height()));

    for (x, y, value) in plane.enumerate_pixels() {
        let (dx, dy) = (off_x + i64::from(x), off_y + i64::from(y));
        if dx < 0 || dy < 0 || dx >= dest_w || dy >= dest_h {
            continue;
        }
        if mask.get_pixel(x, y).0[0] == 0 {
            continue;
        }
        composite_over(
            dest.get_pixel_mut(dx as u32, dy as u32),
            Rgba([0, 0, 0, value.0[0]]),
        );
    }
}

/// Non-premultiplied source-over, rounded to the nearest integer.
fn composite_over(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let src_a = u32::from(src[3]);
    let dst_a = u32::from(dst[3]);
    if src_a == 0 {
        return;
    }
    if src_a == 255 || dst_a == 0 {
        *dst = src;
        return;
    }

    // Everything below is scaled by 255 * 255
    let out_a = src_a * 255 + dst_a * (255 - src_a);
    for c in 0..3 {
        let num = u32::from(src[c]) * src_a * 255 + u32::from(dst[c]) * dst_a * (255 - src_a);
        dst.0[c] = ((num + out_a / 2) / out_a) as u8;
    }
    dst.0[3] = ((out_a + 127) / 255) as u8;
}
