use eframe::egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, StrokeKind, Vec2,
};

use crate::scene::{Marker, MarkerRole};
use crate::viewport::ViewTransform;

/// Color ramp by absolute depth; deeper levels reuse the last entry.
const DEPTH_COLORS: [Color32; 6] = [
    Color32::from_rgb(102, 126, 234),
    Color32::from_rgb(118, 75, 162),
    Color32::from_rgb(31, 139, 255),
    Color32::from_rgb(23, 162, 140),
    Color32::from_rgb(214, 129, 53),
    Color32::from_rgb(196, 74, 96),
];

const ACCENT_COLOR: Color32 = Color32::from_rgb(31, 139, 255);
const SELECTED_COLOR: Color32 = Color32::from_rgb(245, 206, 93);

pub(super) fn accent_color() -> Color32 {
    ACCENT_COLOR
}

pub(super) fn depth_color(depth: usize) -> Color32 {
    DEPTH_COLORS[depth.min(DEPTH_COLORS.len() - 1)]
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, transform: ViewTransform) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (56.0 * transform.scale.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.min + transform.translate;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn draw_edge(painter: &Painter, start: Pos2, end: Pos2, scale: f32) {
    painter.line_segment(
        [start, end],
        Stroke::new(
            (2.0 * scale).clamp(1.0, 4.0),
            Color32::from_rgba_unmultiplied(255, 255, 255, 64),
        ),
    );
}

pub(super) fn draw_marker(
    painter: &Painter,
    marker: &Marker,
    origin: Pos2,
    transform: ViewTransform,
    emphasized: bool,
    selected: bool,
) {
    let center = transform.to_screen(origin, marker.position);
    let size: Vec2 = marker.size() * transform.scale;
    let rect = Rect::from_center_size(center, size);
    if !painter.clip_rect().intersects(rect.expand(6.0)) {
        return;
    }

    let rounding = size.y / 2.0;
    let base = depth_color(marker.depth);
    let mut fill = match marker.role {
        MarkerRole::Center => base,
        MarkerRole::Ancestor => dim_color(base, 0.62),
        MarkerRole::Child => blend_color(base, Color32::from_rgb(19, 23, 29), 0.18),
    };
    if emphasized && marker.role != MarkerRole::Center {
        fill = blend_color(fill, Color32::WHITE, 0.2);
    }

    painter.rect_filled(rect, rounding, fill);

    let stroke = if selected {
        Stroke::new(3.0 * transform.scale, SELECTED_COLOR)
    } else if marker.role == MarkerRole::Center {
        Stroke::new(2.0 * transform.scale, Color32::from_rgba_unmultiplied(255, 255, 255, 150))
    } else {
        Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
    };
    painter.rect_stroke(rect, rounding, stroke, StrokeKind::Outside);

    let font_size = match marker.role {
        MarkerRole::Center => 17.0,
        MarkerRole::Ancestor | MarkerRole::Child => 13.0,
    } * transform.scale;
    painter.text(
        center,
        Align2::CENTER_CENTER,
        &marker.label,
        FontId::proportional(font_size.max(6.0)),
        Color32::from_gray(245),
    );
}
