use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Pos2, pos2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement<T> {
    pub item: T,
    pub position: Pos2,
}

/// Spreads `items` evenly on a circle around `center`, starting directly
/// above it and proceeding clockwise in screen coordinates. Positions are
/// rounded to whole pixels.
pub fn layout_radial<T: Copy>(center: Pos2, items: &[T], radius: f32) -> Vec<Placement<T>> {
    let n = items.len();

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let angle = (TAU * index as f32) / n as f32 - FRAC_PI_2;
            Placement {
                item: *item,
                position: pos2(
                    (center.x + radius * angle.cos()).round(),
                    (center.y + radius * angle.sin()).round(),
                ),
            }
        })
        .collect()
}
