/// A face bounding box proposed by the detector for one frame.
///
/// Coordinates are in frame pixels. Boxes may extend past the frame edges;
/// descriptor cropping clamps to the visible intersection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal center of the box, in frame pixels.
    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Intersection with a `frame_width` x `frame_height` frame as
    /// `(x0, y0, x1, y1)`, or `None` when the box lies entirely outside.
    pub fn intersect_frame(&self, frame_width: u32, frame_height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = self.x.clamp(0, frame_width as i32);
        let y0 = self.y.clamp(0, frame_height as i32);
        let x1 = (self.x + self.width).clamp(0, frame_width as i32);
        let y1 = (self.y + self.height).clamp(0, frame_height as i32);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}
