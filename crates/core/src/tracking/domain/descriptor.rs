use ndarray::s;

use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// The grayscale representation of one face, cropped from a frame.
///
/// The session reference and all per-frame candidates share this type; the
/// reference is immutable once bootstrapped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceDescriptor {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl FaceDescriptor {
    pub fn new(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize),
            "pixel length must equal width * height"
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Crops `region` out of `frame`, clamped to the frame bounds.
    ///
    /// Returns `None` when the intersection with the frame is empty.
    pub fn crop(frame: &Frame, region: &Region) -> Option<Self> {
        let (x0, y0, x1, y1) = region.intersect_frame(frame.width(), frame.height())?;
        let view = frame.as_ndarray();
        let crop = view.slice(s![y0 as usize..y1 as usize, x0 as usize..x1 as usize]);
        Some(Self::new(
            crop.iter().copied().collect(),
            x1 - x0,
            y1 - y0,
        ))
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
