//! Image dimension lookup.
//!
//! Only the file header is read, so this is cheap even for large images.

use std::path::Path;

use super::model::ImageSize;
use crate::error::LabelportError;

/// Reads the pixel dimensions of an image file from its header.
///
/// # Errors
/// Fails if the file cannot be read, its format is not recognized, or a side
/// does not fit in `u32` or is zero.
pub fn read_image_size(path: &Path) -> Result<ImageSize, LabelportError> {
    let size = imagesize::size(path).map_err(|source| LabelportError::ImageSizeRead {
        path: path.to_path_buf(),
        source,
    })?;

    let invalid = |message: String| LabelportError::ImageSizeInvalid {
        path: path.to_path_buf(),
        message,
    };

    let width = u32::try_from(size.width)
        .map_err(|_| invalid(format!("width {} does not fit in u32", size.width)))?;
    let height = u32::try_from(size.height)
        .map_err(|_| invalid(format!("height {} does not fit in u32", size.height)))?;

    let image_size = ImageSize::new(width, height);
    if image_size.is_empty() {
        return Err(invalid(format!("{}x{} has a zero side", width, height)));
    }

    Ok(image_size)
}
