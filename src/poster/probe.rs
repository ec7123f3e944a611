use std::io::Cursor;

use image::ImageReader;

use super::error::PosterError;

/// Pixel dimensions of a poster image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Minimum acceptable poster size. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub min_width: u32,
    pub min_height: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_width: 800,
            min_height: 1000,
        }
    }
}

impl Thresholds {
    pub fn passes(&self, dimensions: Dimensions) -> bool {
        dimensions.height >= self.min_height && dimensions.width >= self.min_width
    }
}

/// Read the width and height from the image header without decoding pixels.
///
/// `reference` only labels the error.
pub fn probe(bytes: &[u8], reference: &str) -> Result<Dimensions, PosterError> {
    let decode_err = |source| PosterError::Decode {
        reference: reference.to_string(),
        source,
    };

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?;
    let (width, height) = reader.into_dimensions().map_err(decode_err)?;
    Ok(Dimensions { width, height })
}
