use image::{ColorType, DynamicImage, ImageError, ImageReader, RgbaImage};
use log::*;
use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub mod config;
pub mod pad;
pub mod remap;

pub use pad::{pad_file, pad_image};
pub use remap::{extract_alpha, paste_plane, remap_bytes, remap_file, remap_image};

pub type Result<T> = std::result::Result<T, RemapError>;

#[derive(Debug, Error)]
pub enum RemapError {
    #[error("No image found at {0:?}")]
    FileNotFound(PathBuf),
    #[error("Couldn't decode image: {0}")]
    Decode(#[source] ImageError),
    #[error("Image mode {mode} has no alpha channel to split out")]
    Format { mode: &'static str },
    #[error("Couldn't encode image: {0}")]
    Encode(#[source] ImageError),
    #[error("A {width}x{height} image can't be represented")]
    InvalidDimensions { width: u64, height: u64 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Short mode name for a decoded color type, e.g. `RGBA` or `RGB;16`
pub fn color_mode(color: ColorType) -> &'static str {
    match color {
        ColorType::L8 => "L",
        ColorType::La8 => "LA",
        ColorType::Rgb8 => "RGB",
        ColorType::Rgba8 => "RGBA",
        ColorType::L16 => "I;16",
        ColorType::La16 => "LA;16",
        ColorType::Rgb16 => "RGB;16",
        ColorType::Rgba16 => "RGBA;16",
        ColorType::Rgb32F => "RGBF",
        ColorType::Rgba32F => "RGBAF",
        _ => "unknown",
    }
}

/// Opens and decodes the image at `path`, guessing the format from its contents.
pub fn open_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    let reader = match ImageReader::open(path) {
        Ok(r) => r,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(RemapError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(RemapError::Decode(ImageError::IoError(e))),
    };
    info!("Reading {}", path.display());
    let image = reader
        .with_guessed_format()
        .map_err(|e| RemapError::Decode(ImageError::IoError(e)))?
        .decode()
        .map_err(RemapError::Decode)?;
    debug!(
        "Decoded {}x{} {} image",
        image.width(),
        image.height(),
        color_mode(image.color())
    );
    Ok(image)
}

/// Writes `image` to `path`, picking the format from the file extension.
/// Any existing file at `path` is replaced.
pub fn save_image<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();
    image.save(path).map_err(RemapError::Encode)?;
    info!("Wrote {}", path.display());
    Ok(())
}
