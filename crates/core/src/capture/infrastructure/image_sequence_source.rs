use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("failed to list frame directory {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no frame images found in {path}")]
    Empty { path: PathBuf },
    #[error("failed to decode frame {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Adapts a directory of still images to the [`FrameSource`] seam.
///
/// Files are ordered by name and converted to grayscale on read, standing
/// in for a live camera during replay and testing. Decoding is lazy: a
/// frame is loaded when the pipeline asks for it.
#[derive(Debug)]
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    next: usize,
}

impl ImageSequenceSource {
    pub fn open(dir: &Path) -> Result<Self, SequenceError> {
        let entries = fs::read_dir(dir).map_err(|source| SequenceError::ListDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_image(p))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(SequenceError::Empty {
                path: dir.to_path_buf(),
            });
        }
        Ok(Self { paths, next: 0 })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let Some(path) = self.paths.get(self.next) else {
            return Ok(None);
        };
        let img = image::open(path)
            .map_err(|source| SequenceError::Decode {
                path: path.clone(),
                source,
            })?
            .to_luma8();
        let (width, height) = img.dimensions();
        let frame = Frame::new(img.into_raw(), width, height, self.next);
        self.next += 1;
        Ok(Some(frame))
    }

    fn close(&mut self) {
        self.next = self.paths.len();
    }
}
