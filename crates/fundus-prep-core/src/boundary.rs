//! Foreground boundary detection on near-black backgrounds.
//!
//! Fundus photographs are a bright disc on a black surround. The detector
//! thresholds intensity, traces the outer borders of the connected
//! foreground regions, and returns the bounding box of the region with the
//! largest enclosed area. Smaller specks such as sensor dust or burned-in
//! labels lose to the disc.

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::point::Point;

use crate::decode::DecodedImage;
use crate::luminance::to_intensity;

/// Pixels with intensity strictly above this value are foreground.
pub const FOREGROUND_THRESHOLD: u8 = 10;

/// Axis-aligned bounding rectangle in pixels, inclusive of border pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingRect {
    /// One past the rightmost column.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// One past the bottom row.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Binarize the intensity image: foreground 255, background 0.
pub fn binarize(image: &DecodedImage, threshold: u8) -> GrayImage {
    let mut mask = to_intensity(image);
    for px in mask.pixels_mut() {
        *px = Luma([if px.0[0] > threshold { 255 } else { 0 }]);
    }
    mask
}

/// Copy of `mask` inside a one-pixel background frame.
///
/// The tracer misreads regions that touch column 0 or fill the whole mask,
/// so every region must be surrounded by background.
fn with_background_frame(mask: &GrayImage) -> GrayImage {
    let mut framed = GrayImage::new(mask.width() + 2, mask.height() + 2);
    image::imageops::replace(&mut framed, mask, 1, 1);
    framed
}

/// Outer borders of regions not enclosed by any other region, in mask
/// coordinates.
fn external_contours(mask: &GrayImage) -> Vec<Contour<u32>> {
    find_contours::<u32>(&with_background_frame(mask))
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|mut c| {
            // Framed points are never on the frame itself, so x, y >= 1
            for p in &mut c.points {
                p.x -= 1;
                p.y -= 1;
            }
            c
        })
        .collect()
}

/// Polygon area enclosed by a traced border (shoelace formula).
///
/// Single-pixel and single-line regions enclose zero area.
pub fn contour_area(points: &[Point<u32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();
    twice.abs() as f64 / 2.0
}

/// Smallest rectangle covering every border point.
pub fn bounding_rect(points: &[Point<u32>]) -> Option<BoundingRect> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(BoundingRect {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Bounding box of the largest foreground region, or `None` if the image
/// has no pixel above [`FOREGROUND_THRESHOLD`].
///
/// Regions are compared by enclosed area; on equal area the region traced
/// first (raster order of its top-left border pixel) wins.
pub fn find_foreground_bounds(image: &DecodedImage) -> Option<BoundingRect> {
    let mask = binarize(image, FOREGROUND_THRESHOLD);

    let mut best: Option<(f64, Contour<u32>)> = None;
    for contour in external_contours(&mask) {
        let area = contour_area(&contour.points);
        match &best {
            Some((best_area, _)) if area <= *best_area => {}
            _ => best = Some((area, contour)),
        }
    }

    best.and_then(|(_, contour)| bounding_rect(&contour.points))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(img: &mut DecodedImage, x: u32, y: u32, w: u32, h: u32, rgb: [u8; 3]) {
        for py in y..y + h {
            for px in x..x + w {
                let idx = img.index(px, py);
                img.pixels[idx..idx + 3].copy_from_slice(&rgb);
            }
        }
    }

    #[test]
    fn test_binarize_threshold_is_strict() {
        let img = DecodedImage::new(3, 1, vec![10, 10, 10, 11, 11, 11, 0, 0, 0]);
        let mask = binarize(&img, FOREGROUND_THRESHOLD);

        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        assert_eq!(mask.get_pixel(1, 0).0[0], 255);
        assert_eq!(mask.get_pixel(2, 0).0[0], 0);
    }

    #[test]
    fn test_black_image_has_no_bounds() {
        assert_eq!(find_foreground_bounds(&DecodedImage::black(40, 30)), None);
    }

    #[test]
    fn test_below_threshold_image_has_no_bounds() {
        let img = DecodedImage::new(20, 20, vec![9u8; 20 * 20 * 3]);
        assert_eq!(find_foreground_bounds(&img), None);
    }

    #[test]
    fn test_centered_square() {
        let mut img = DecodedImage::black(100, 100);
        fill(&mut img, 25, 25, 50, 50, [255, 255, 255]);

        assert_eq!(
            find_foreground_bounds(&img),
            Some(BoundingRect {
                x: 25,
                y: 25,
                width: 50,
                height: 50
            })
        );
    }

    #[test]
    fn test_largest_region_wins() {
        let mut img = DecodedImage::black(120, 80);
        // Small bright speck near the origin is traced first
        fill(&mut img, 2, 2, 4, 4, [255, 255, 255]);
        // Dimmer but much larger disc stand-in
        fill(&mut img, 40, 10, 60, 60, [90, 40, 20]);

        let rect = find_foreground_bounds(&img).unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (40, 10, 60, 60));
    }

    #[test]
    fn test_equal_area_tie_keeps_first_found() {
        let mut img = DecodedImage::black(60, 40);
        fill(&mut img, 40, 5, 10, 10, [200, 200, 200]);
        fill(&mut img, 5, 20, 10, 10, [200, 200, 200]);

        // The upper region starts on an earlier raster row
        let rect = find_foreground_bounds(&img).unwrap();
        assert_eq!((rect.x, rect.y), (40, 5));
    }

    #[test]
    fn test_hole_does_not_shrink_bounds() {
        let mut img = DecodedImage::black(50, 50);
        fill(&mut img, 5, 5, 40, 40, [150, 150, 150]);
        fill(&mut img, 15, 15, 20, 20, [0, 0, 0]);
        // Island inside the hole is not an external region
        fill(&mut img, 22, 22, 6, 6, [150, 150, 150]);

        let rect = find_foreground_bounds(&img).unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (5, 5, 40, 40));
    }

    #[test]
    fn test_region_touching_edges() {
        let mut img = DecodedImage::black(30, 20);
        fill(&mut img, 0, 0, 30, 20, [40, 40, 40]);

        let rect = find_foreground_bounds(&img).unwrap();
        assert_eq!((rect.x, rect.y, rect.right(), rect.bottom()), (0, 0, 30, 20));
    }

    #[test]
    fn test_region_on_left_edge() {
        let mut img = DecodedImage::black(30, 20);
        fill(&mut img, 0, 5, 10, 5, [200, 200, 200]);

        let rect = find_foreground_bounds(&img).unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (0, 5, 10, 5));
    }

    #[test]
    fn test_region_on_each_edge() {
        let cases = [(0, 0, 4, 20), (26, 0, 4, 20), (0, 0, 30, 3), (0, 17, 30, 3)];
        for (x, y, w, h) in cases {
            let mut img = DecodedImage::black(30, 20);
            fill(&mut img, x, y, w, h, [200, 200, 200]);

            let rect = find_foreground_bounds(&img).unwrap();
            assert_eq!(
                (rect.x, rect.y, rect.width, rect.height),
                (x, y, w, h),
                "region at ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_tiny_full_frame() {
        let img = DecodedImage::new(2, 2, vec![255u8; 12]);
        assert_eq!(
            find_foreground_bounds(&img),
            Some(BoundingRect {
                x: 0,
                y: 0,
                width: 2,
                height: 2
            })
        );
    }

    #[test]
    fn test_frame_keeps_mask_in_center() {
        let mut mask = GrayImage::new(3, 2);
        mask.put_pixel(0, 0, Luma([255]));

        let framed = with_background_frame(&mask);
        assert_eq!(framed.dimensions(), (5, 4));
        assert_eq!(framed.get_pixel(1, 1).0[0], 255);
        assert_eq!(framed.get_pixel(0, 0).0[0], 0);
        assert_eq!(framed.pixels().filter(|p| p.0[0] == 255).count(), 1);
    }

    #[test]
    fn test_single_pixel_region() {
        let mut img = DecodedImage::black(10, 10);
        fill(&mut img, 7, 3, 1, 1, [255, 255, 255]);

        let rect = find_foreground_bounds(&img).unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (7, 3, 1, 1));
    }

    #[test]
    fn test_contour_area_of_square_border() {
        let points = vec![
            Point::new(0u32, 0u32),
            Point::new(0, 4),
            Point::new(4, 4),
            Point::new(4, 0),
        ];
        assert_eq!(contour_area(&points), 16.0);
        assert_eq!(contour_area(&points[..2]), 0.0);
    }

    #[test]
    fn test_bounding_rect_empty() {
        assert_eq!(bounding_rect(&[]), None);
    }
}
