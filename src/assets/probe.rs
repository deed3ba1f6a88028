use std::{io::Cursor, path::Path};

use anyhow::Context;

use crate::foundation::error::CuecastResult;

/// Intrinsic `(width, height)` of encoded image bytes, without decoding pixels.
pub fn probe_image_size(bytes: &[u8]) -> CuecastResult<(u32, u32)> {
    let dims = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("guess image format")?
        .into_dimensions()
        .context("read image dimensions")?;
    Ok(dims)
}

/// Intrinsic `(width, height)` of an image file.
pub fn probe_image_file(path: &Path) -> CuecastResult<(u32, u32)> {
    let dims = image::image_dimensions(path)
        .with_context(|| format!("read image dimensions '{}'", path.display()))?;
    Ok(dims)
}

/// Read font bytes for text measurement.
pub fn read_font_file(path: &Path) -> CuecastResult<Vec<u8>> {
    let bytes = std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/probe.rs"]
mod tests;
