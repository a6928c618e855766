use std::path::{Path, PathBuf};

use image::GrayImage;
use thiserror::Error;

use crate::tracking::domain::descriptor::FaceDescriptor;
use crate::tracking::domain::target_store::TargetStore;

#[derive(Error, Debug)]
pub enum TargetStoreError {
    #[error("failed to read reference image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to write reference image {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("descriptor buffer does not match its dimensions")]
    InvalidBuffer,
}

/// Persists the reference descriptor as a grayscale raster image.
///
/// The file format follows the path extension; the default is PNG so the
/// reloaded reference is bit-identical to the bootstrap crop. A missing
/// file on load means no prior state, not an error.
pub struct ImageTargetStore {
    path: PathBuf,
}

impl ImageTargetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TargetStore for ImageTargetStore {
    fn load(&self) -> Result<Option<FaceDescriptor>, Box<dyn std::error::Error>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let img = image::open(&self.path)
            .map_err(|source| TargetStoreError::Read {
                path: self.path.clone(),
                source,
            })?
            .to_luma8();
        let (width, height) = img.dimensions();
        Ok(Some(FaceDescriptor::new(img.into_raw(), width, height)))
    }

    fn save(&self, descriptor: &FaceDescriptor) -> Result<(), Box<dyn std::error::Error>> {
        let img = GrayImage::from_raw(
            descriptor.width(),
            descriptor.height(),
            descriptor.pixels().to_vec(),
        )
        .ok_or(TargetStoreError::InvalidBuffer)?;
        img.save(&self.path).map_err(|source| TargetStoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}
