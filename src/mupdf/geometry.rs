//! Page geometry
//!
//! MuPDF reports glyph positions in page space: origin top-left, y down,
//! with `/Rotate`, the crop box origin and `/UserUnit` already applied.
//! Annotation dictionaries live in PDF user space, so every rectangle is
//! mapped back through the inverse of the page CTM before it is written.

use mupdf::Quad;

use crate::document::Rect;

/// Affine map from page space to user space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTransform {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl PageTransform {
    /// Invert a page CTM given as `[a, b, c, d, e, f]`
    ///
    /// Returns `None` for a degenerate matrix.
    pub fn inverse_of([a, b, c, d, e, f]: [f32; 6]) -> Option<Self> {
        let det = a * d - b * c;
        if det.abs() < f32::EPSILON {
            return None;
        }
        let (ia, ib, ic, id) = (d / det, -b / det, -c / det, a / det);
        Some(Self {
            a: ia,
            b: ib,
            c: ic,
            d: id,
            e: -(e * ia + f * ic),
            f: -(e * ib + f * id),
        })
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    /// Map a page-space rectangle to a user-space quad
    ///
    /// Corners keep their reading orientation, so on a rotated page the
    /// quad's "upper" edge is still the top of the glyphs.
    pub fn to_user(&self, rect: Rect) -> UserQuad {
        let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
        UserQuad {
            corners: [
                self.apply(left, top),
                self.apply(right, top),
                self.apply(left, bottom),
                self.apply(right, bottom),
            ],
        }
    }
}

/// Quadrilateral in user space, corners in QuadPoints order
/// (upper-left, upper-right, lower-left, lower-right)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserQuad {
    corners: [(f32, f32); 4],
}

impl UserQuad {
    pub fn quad_points(&self) -> [f32; 8] {
        let [(x0, y0), (x1, y1), (x2, y2), (x3, y3)] = self.corners;
        [x0, y0, x1, y1, x2, y2, x3, y3]
    }

    /// Bounding box as `[x0, y0, x1, y1]`
    pub fn bounds(&self) -> [f32; 4] {
        self.corners.iter().fold(
            [f32::MAX, f32::MAX, f32::MIN, f32::MIN],
            |[x0, y0, x1, y1], &(x, y)| [x0.min(x), y0.min(y), x1.max(x), y1.max(y)],
        )
    }
}

/// Axis-aligned page-space bounds of a search hit
pub fn quad_bounds(quad: &Quad) -> Rect {
    let xs = [quad.ul.x, quad.ur.x, quad.ll.x, quad.lr.x];
    let ys = [quad.ul.y, quad.ur.y, quad.ll.y, quad.lr.y];
    let lo = |v: [f32; 4]| v.into_iter().fold(f32::MAX, f32::min);
    let hi = |v: [f32; 4]| v.into_iter().fold(f32::MIN, f32::max);
    Rect::from_ltrb(lo(xs), lo(ys), hi(xs), hi(ys))
}
