// One error type for the whole preview.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

use crate::types::ImageRole;

#[derive(Error, Debug)]
pub enum Error {
    /// Creating the window failed.
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Pushing a frame to the window failed.
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// Opening or decoding one of the three source images failed.
    #[error("Failed to load {role} image '{}': {source}", .path.display())]
    Load {
        role: ImageRole,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An image or canvas with no area; nothing can be fitted onto it.
    #[error("{what} has zero area ({width}x{height})")]
    ZeroArea {
        what: String,
        width: u32,
        height: u32,
    },

    /// A raster target does not match the canvas it is rendered for.
    #[error("Frame buffer is {got_w}x{got_h}, expected {want_w}x{want_h}")]
    BufferMismatch {
        want_w: usize,
        want_h: usize,
        got_w: usize,
        got_h: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_area_message_names_the_image() {
        let err = Error::ZeroArea {
            what: "design image".to_string(),
            width: 0,
            height: 12,
        };
        assert_eq!(err.to_string(), "design image has zero area (0x12)");
    }

    #[test]
    fn load_message_includes_role_and_path() {
        let err = Error::Load {
            role: ImageRole::Displacement,
            path: PathBuf::from("maps/folds.png"),
            source: image::ImageError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "missing",
            )),
        };
        let msg = err.to_string();
        assert!(msg.contains("displacement"));
        assert!(msg.contains("maps/folds.png"));
    }

    #[test]
    fn buffer_mismatch_message() {
        let err = Error::BufferMismatch { want_w: 10, want_h: 10, got_w: 5, got_h: 10 };
        assert_eq!(err.to_string(), "Frame buffer is 5x10, expected 10x10");
    }
}
