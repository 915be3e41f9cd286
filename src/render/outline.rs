//! Highlight outlines.
//!
//! Derives selection/hover overlay art from a tile sheet: an edge-detection
//! pass marks contrast boundaries, fully opaque edge pixels are recoloured
//! to a single highlight colour, and the result is padded exactly like the
//! plain sheet so both outputs share one layout.

use image::{Rgba, RgbaImage};

use crate::error::Result;
use crate::types::{Colour, PadConfig};

use super::tiler::pad;

/// 3x3 "find edges" kernel, row-major. Weights sum to zero, so flat areas go
/// to zero and any change in a channel survives.
const FIND_EDGES: [i32; 9] = [-1, -1, -1, -1, 8, -1, -1, -1, -1];

/// Alpha a filtered pixel must have, exactly, to count as an edge.
pub const EDGE_ALPHA: u8 = 255;

/// Run the find-edges filter over every channel, alpha included.
///
/// Each channel is convolved independently and clamped to `0..=255`. The
/// outermost rows and columns are copied from the source unchanged, as is
/// any raster narrower or shorter than the kernel.
pub fn find_edges(source: &RgbaImage) -> RgbaImage {
    let (width, height) = source.dimensions();
    let mut edges = source.clone();

    if width < 3 || height < 3 {
        return edges;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sums = [0i32; 4];
            for (i, weight) in FIND_EDGES.iter().enumerate() {
                let (kx, ky) = (i as u32 % 3, i as u32 / 3);
                let px = source.get_pixel(x + kx - 1, y + ky - 1);
                for (sum, &channel) in sums.iter_mut().zip(px.0.iter()) {
                    *sum += weight * channel as i32;
                }
            }
            edges.put_pixel(x, y, Rgba(sums.map(|s| s.clamp(0, 255) as u8)));
        }
    }

    edges
}

/// Replace every pixel whose alpha is exactly [`EDGE_ALPHA`] with `colour`.
///
/// All four channels are overwritten, so `colour`'s own alpha is carried
/// through. Pixels with any other alpha keep whatever the filter produced.
pub fn recolor_edges(mut edges: RgbaImage, colour: Colour) -> RgbaImage {
    let fill = Rgba::from(colour);
    for px in edges.pixels_mut().filter(|px| px[3] == EDGE_ALPHA) {
        *px = fill;
    }
    edges
}

/// Build the highlighted, padded variant of a tile sheet.
pub fn highlighted_and_padded(
    source: &RgbaImage,
    colour: Colour,
    config: &PadConfig,
) -> Result<RgbaImage> {
    config.validate()?;

    let outline = recolor_edges(find_edges(source), colour);
    pad(&outline, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    #[test]
    fn test_find_edges_flat_interior_is_zero() {
        let source = RgbaImage::from_pixel(5, 5, RED);
        let edges = find_edges(&source);

        // Interior of a uniform image cancels out on every channel
        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(edges.get_pixel(x, y).0, [0, 0, 0, 0]);
            }
        }
    }

    #[test]
    fn test_find_edges_copies_border() {
        let source = RgbaImage::from_pixel(5, 4, RED);
        let edges = find_edges(&source);

        for x in 0..5 {
            assert_eq!(*edges.get_pixel(x, 0), RED);
            assert_eq!(*edges.get_pixel(x, 3), RED);
        }
        for y in 0..4 {
            assert_eq!(*edges.get_pixel(0, y), RED);
            assert_eq!(*edges.get_pixel(4, y), RED);
        }
    }

    #[test]
    fn test_find_edges_small_image_unchanged() {
        let source = RgbaImage::from_fn(2, 7, |x, y| Rgba([x as u8, y as u8, 9, 200]));
        assert_eq!(find_edges(&source), source);
    }

    #[test]
    fn test_find_edges_marks_inner_boundary_of_sprite() {
        // Opaque 3x3 square centred in a transparent 7x7 canvas
        let mut source = RgbaImage::from_pixel(7, 7, CLEAR);
        for y in 2..5 {
            for x in 2..5 {
                source.put_pixel(x, y, RED);
            }
        }
        let edges = find_edges(&source);

        // Every opaque pixel touches transparency, so alpha saturates
        for y in 2..5 {
            for x in 2..5 {
                if (x, y) != (3, 3) {
                    assert_eq!(edges.get_pixel(x, y)[3], 255, "({}, {})", x, y);
                }
            }
        }
        // The centre sees only opaque neighbours
        assert_eq!(edges.get_pixel(3, 3)[3], 0);
        // Transparent pixels next to the sprite go negative and clamp to zero
        assert_eq!(edges.get_pixel(1, 3)[3], 0);
    }

    #[test]
    fn test_find_edges_partial_alpha() {
        // Single pixel of alpha 30 among alpha 0: 8 * 30 = 240
        let mut source = RgbaImage::from_pixel(3, 3, CLEAR);
        source.put_pixel(1, 1, Rgba([0, 0, 0, 30]));
        let edges = find_edges(&source);
        assert_eq!(edges.get_pixel(1, 1)[3], 240);
    }

    #[test]
    fn test_recolor_threshold_is_exact() {
        let mut edges = RgbaImage::from_pixel(3, 1, CLEAR);
        edges.put_pixel(0, 0, Rgba([12, 34, 56, 255]));
        edges.put_pixel(1, 0, Rgba([12, 34, 56, 254]));
        edges.put_pixel(2, 0, Rgba([7, 8, 9, 0]));

        let colour = Colour::new(0, 200, 100, 255);
        let recoloured = recolor_edges(edges, colour);

        assert_eq!(recoloured.get_pixel(0, 0).0, [0, 200, 100, 255]);
        assert_eq!(recoloured.get_pixel(1, 0).0, [12, 34, 56, 254]);
        assert_eq!(recoloured.get_pixel(2, 0).0, [7, 8, 9, 0]);
    }

    #[test]
    fn test_recolor_carries_colour_alpha() {
        let edges = RgbaImage::from_pixel(1, 1, RED);
        let recoloured = recolor_edges(edges, Colour::new(1, 2, 3, 128));
        assert_eq!(recoloured.get_pixel(0, 0).0, [1, 2, 3, 128]);
    }

    #[test]
    fn test_highlighted_matches_padded_layout() {
        let source = RgbaImage::from_pixel(32, 48, RED);
        let config = PadConfig::default();

        let highlighted = highlighted_and_padded(&source, Colour::WHITE, &config).unwrap();
        let padded = pad(&source, &config).unwrap();

        assert_eq!(highlighted.dimensions(), padded.dimensions());
        assert_eq!(highlighted.dimensions(), (34, 52));
    }

    #[test]
    fn test_highlighted_outlines_sheet_border() {
        // An opaque sheet only has edges along the copied outer border
        let source = RgbaImage::from_pixel(32, 32, RED);
        let highlighted =
            highlighted_and_padded(&source, Colour::WHITE, &PadConfig::default()).unwrap();

        assert_eq!(highlighted.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(highlighted.get_pixel(33, 33).0, [255, 255, 255, 255]);
        assert_eq!(highlighted.get_pixel(5, 5).0, [0, 0, 0, 0]);
        // Gutter stays clear
        assert_eq!(highlighted.get_pixel(16, 5).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_highlighted_rejects_invalid_config() {
        let source = RgbaImage::from_pixel(16, 16, RED);
        let config = PadConfig {
            block_size: 0,
            gutter: 2,
        };
        assert!(highlighted_and_padded(&source, Colour::WHITE, &config).is_err());
    }

    #[test]
    fn test_highlighted_leaves_source_untouched() {
        let source = RgbaImage::from_pixel(16, 16, RED);
        let before = source.clone();
        let _ = highlighted_and_padded(&source, Colour::WHITE, &PadConfig::default()).unwrap();
        assert_eq!(source, before);
    }
}
