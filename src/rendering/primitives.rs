// src/rendering/primitives.rs

use super::colors::{scale, Rgb};
use gtk4::cairo::{self, LinearGradient};

fn trace_quad(cr: &cairo::Context, pts: &[[f64; 2]; 4]) {
    cr.move_to(pts[0][0], pts[0][1]);
    for p in &pts[1..] {
        cr.line_to(p[0], p[1]);
    }
    cr.close_path();
}

/// Fills one box face. A soft gradient along the face's first edge fakes a
/// light coming from the upper left.
pub fn fill_face(
    cr: &cairo::Context,
    pts: &[[f64; 2]; 4],
    color: Rgb,
    shade: f64,
) -> Result<(), cairo::Error> {
    let lit = scale(color, shade * 1.08);
    let shadow = scale(color, shade * 0.86);

    let gradient = LinearGradient::new(pts[0][0], pts[0][1], pts[2][0], pts[2][1]);
    gradient.add_color_stop_rgb(0.0, lit.0, lit.1, lit.2);
    gradient.add_color_stop_rgb(1.0, shadow.0, shadow.1, shadow.2);

    cr.set_source(&gradient)?;
    trace_quad(cr, pts);
    cr.fill()
}

pub fn stroke_face(
    cr: &cairo::Context,
    pts: &[[f64; 2]; 4],
    color: (f64, f64, f64, f64),
    width: f64,
) -> Result<(), cairo::Error> {
    cr.set_source_rgba(color.0, color.1, color.2, color.3);
    cr.set_line_width(width);
    cr.set_line_join(cairo::LineJoin::Round);
    trace_quad(cr, pts);
    cr.stroke()
}

/// Maps the unit square onto the parallelogram spanned by `origin`, `u_end`
/// and `v_end`. Returns `None` for a collapsed face.
pub fn face_matrix(origin: [f64; 2], u_end: [f64; 2], v_end: [f64; 2]) -> Option<cairo::Matrix> {
    let xx = u_end[0] - origin[0];
    let yx = u_end[1] - origin[1];
    let xy = v_end[0] - origin[0];
    let yy = v_end[1] - origin[1];
    if (xx * yy - xy * yx).abs() < 1e-6 {
        return None;
    }
    Some(cairo::Matrix::new(xx, yx, xy, yy, origin[0], origin[1]))
}

/// Draws `text` centred on (cx, cy) in the current user space.
pub fn centered_text(
    cr: &cairo::Context,
    text: &str,
    cx: f64,
    cy: f64,
    size: f64,
    weight: cairo::FontWeight,
) -> Result<(), cairo::Error> {
    cr.select_font_face("Sans", cairo::FontSlant::Normal, weight);
    cr.set_font_size(size);
    let ext = cr.text_extents(text)?;
    cr.move_to(
        cx - ext.width() / 2.0 - ext.x_bearing(),
        cy - ext.height() / 2.0 - ext.y_bearing(),
    );
    cr.show_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_matrix_maps_unit_square() {
        let m = face_matrix([10.0, 20.0], [40.0, 25.0], [12.0, 60.0]).unwrap();
        let (x, y) = m.transform_point(1.0, 1.0);
        assert!((x - 42.0).abs() < 1e-9);
        assert!((y - 65.0).abs() < 1e-9);
        let (x0, y0) = m.transform_point(0.0, 0.0);
        assert_eq!((x0, y0), (10.0, 20.0));
    }

    #[test]
    fn test_face_matrix_rejects_collapsed() {
        assert!(face_matrix([0.0, 0.0], [5.0, 5.0], [10.0, 10.0]).is_none());
    }
}
