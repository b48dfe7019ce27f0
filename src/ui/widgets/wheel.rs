use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine},
        Widget,
    },
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::wheel::{LabelPlacement, Wheel};

/// Canvas units per text row; one column is one unit.
const ROW_UNITS: f64 = 2.0;
/// Space kept above the circle for the pointer.
const POINTER_MARGIN: f64 = 3.0;
/// Inner end of the slice spokes, as a fraction of the radius.
const HUB_RADIUS: f64 = 0.15;

pub struct WheelColors {
    pub background: Color,
    pub outline: Color,
    pub pointer: Color,
    pub label: Color,
    pub highlight: Color,
}

/// The wheel turned by `rotation` degrees, with the static pointer on top.
pub struct WheelView<'a> {
    pub wheel: &'a Wheel,
    pub rotation: f64,
    pub highlight: Option<usize>,
    pub colors: WheelColors,
}

/// Wheel radius in canvas units for an area of this size.
pub fn wheel_radius(area: Rect) -> f64 {
    let half_width = area.width as f64 / 2.0;
    let half_height = area.height as f64;
    (half_width.min(half_height) - POINTER_MARGIN).max(0.0)
}

fn column_of(area: Rect, x: f64) -> f64 {
    (area.x as f64 + area.width as f64 / 2.0 + x).floor()
}

fn row_of(area: Rect, y: f64) -> f64 {
    (area.y as f64 + area.height as f64 / 2.0 - y / ROW_UNITS).floor()
}

fn column_inside(area: Rect, column: f64) -> bool {
    column >= area.x as f64 && column < (area.x + area.width) as f64
}

fn row_inside(area: Rect, row: f64) -> bool {
    row >= area.y as f64 && row < (area.y + area.height) as f64
}

/// Terminal cell holding the canvas point `(x, y)`, if it is inside `area`.
pub fn cell_at(area: Rect, x: f64, y: f64) -> Option<(u16, u16)> {
    let column = column_of(area, x);
    let row = row_of(area, y);
    (column_inside(area, column) && row_inside(area, row)).then_some((column as u16, row as u16))
}

/// Text runs for one label as `(column, row, text)`. Labels whose rotated
/// text is closer to vertical are stacked one glyph per row; terminal cells
/// cannot turn glyphs any further than that. Glyphs falling outside `area`
/// are clipped one by one, so a label near the edge stays partly visible.
pub fn label_cells(
    area: Rect,
    placement: &LabelPlacement<'_>,
    rotation: f64,
    radius: f64,
) -> Vec<(u16, u16, String)> {
    let (dx, dy) = placement.offset(rotation);
    let (x, y) = (dx * radius, dy * radius);

    if placement.reads_horizontally(rotation) {
        let row = row_of(area, y);
        if !row_inside(area, row) {
            return Vec::new();
        }

        let half_width = placement.label.width() as f64 / 2.0;
        let mut column = column_of(area, x - half_width);
        let mut start = None;
        let mut run = String::new();
        for glyph in placement.label.chars() {
            let glyph_width = glyph.width().unwrap_or(0) as f64;
            let last = column + (glyph_width - 1.0).max(0.0);
            if column_inside(area, column) && column_inside(area, last) {
                start.get_or_insert(column);
                run.push(glyph);
            }
            column += glyph_width;
        }
        return start
            .map(|column| vec![(column as u16, row as u16, run)])
            .unwrap_or_default();
    }

    let column = column_of(area, x);
    if !column_inside(area, column) {
        return Vec::new();
    }

    let count = placement.label.chars().count() as f64;
    let top = row_of(area, y + (count - 1.0) * ROW_UNITS / 2.0);
    placement
        .label
        .chars()
        .enumerate()
        .map(|(offset, glyph)| (top + offset as f64, glyph))
        .filter(|(row, _)| row_inside(area, *row))
        .map(|(row, glyph)| (column as u16, row as u16, glyph.to_string()))
        .collect()
}

impl WheelView<'_> {
    fn draw(&self, ctx: &mut Context<'_>, radius: f64) {
        ctx.draw(&Circle {
            x: 0.0,
            y: 0.0,
            radius,
            color: self.colors.outline,
        });

        for placement in self.wheel.placements() {
            let angle = (placement.base_angle - self.rotation).to_radians();
            let (sin, cos) = angle.sin_cos();
            ctx.draw(&CanvasLine {
                x1: radius * HUB_RADIUS * sin,
                y1: radius * HUB_RADIUS * cos,
                x2: radius * sin,
                y2: radius * cos,
                color: self.colors.outline,
            });
        }

        // Pointer stays put while the wheel turns under it
        let tip = radius - 1.0;
        let base = radius + POINTER_MARGIN - 0.5;
        for (x1, y1, x2, y2) in [
            (-2.0, base, 0.0, tip),
            (2.0, base, 0.0, tip),
            (-2.0, base, 2.0, base),
        ] {
            ctx.draw(&CanvasLine {
                x1,
                y1,
                x2,
                y2,
                color: self.colors.pointer,
            });
        }
    }
}

impl Widget for WheelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let radius = wheel_radius(area);
        if radius < 4.0 {
            return;
        }

        let half_width = area.width as f64 / 2.0;
        let half_height = area.height as f64;

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(self.colors.background)
            .x_bounds([-half_width, half_width])
            .y_bounds([-half_height, half_height])
            .paint(|ctx| self.draw(ctx, radius))
            .render(area, buf);

        for placement in self.wheel.placements() {
            let style = if Some(placement.index) == self.highlight {
                Style::default()
                    .fg(self.colors.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.colors.label)
            };

            for (column, row, text) in label_cells(area, &placement, self.rotation, radius) {
                let room = (area.x + area.width).saturating_sub(column) as usize;
                buf.set_stringn(column, row, &text, room, style);
            }
        }

        if let Some((column, row)) = cell_at(area, 0.0, radius + POINTER_MARGIN - 1.0) {
            buf.set_string(
                column,
                row,
                "▼",
                Style::default()
                    .fg(self.colors.pointer)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}
