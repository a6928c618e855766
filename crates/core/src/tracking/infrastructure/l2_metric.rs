use image::imageops::{self, FilterType};
use image::GrayImage;

use crate::tracking::domain::descriptor::FaceDescriptor;
use crate::tracking::domain::descriptor_metric::DescriptorMetric;

/// Euclidean-norm descriptor metric.
///
/// Resizes the candidate to the reference's dimensions (bilinear), then
/// returns the L2 norm of the pixel-intensity difference. An identical
/// same-size candidate scores exactly 0.
pub struct L2DescriptorMetric;

impl DescriptorMetric for L2DescriptorMetric {
    fn distance(&self, reference: &FaceDescriptor, candidate: &FaceDescriptor) -> f64 {
        let resized = resize_to(candidate, reference.width(), reference.height());
        reference
            .pixels()
            .iter()
            .zip(resized.iter())
            .map(|(&a, &b)| {
                let d = a as f64 - b as f64;
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}

fn resize_to(descriptor: &FaceDescriptor, width: u32, height: u32) -> Vec<u8> {
    if descriptor.width() == width && descriptor.height() == height {
        return descriptor.pixels().to_vec();
    }
    let img = GrayImage::from_raw(
        descriptor.width(),
        descriptor.height(),
        descriptor.pixels().to_vec(),
    )
    .expect("descriptor pixel length must match dimensions");
    imageops::resize(&img, width, height, FilterType::Triangle).into_raw()
}
