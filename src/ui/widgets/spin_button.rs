use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// Width of the pressed button relative to its resting size.
const PRESSED_SCALE: f64 = 0.8;

pub struct SpinButton<'a> {
    pub label: &'a str,
    pub pressed: bool,
    pub busy: bool,
    pub color: Color,
    pub text_color: Color,
}

/// Area the button occupies inside `area`; shrinks while pressed.
pub fn button_rect(area: Rect, pressed: bool) -> Rect {
    if !pressed || area.width < 4 {
        return area;
    }
    let width = ((area.width as f64 * PRESSED_SCALE).round() as u16).max(4);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

impl Widget for SpinButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = button_rect(area, self.pressed);

        let mut text_style = Style::default()
            .fg(self.text_color)
            .bg(self.color)
            .add_modifier(Modifier::BOLD);
        if self.busy {
            text_style = text_style.add_modifier(Modifier::DIM);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if self.pressed {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(Style::default().fg(self.color).bg(self.color));

        Paragraph::new(self.label)
            .block(block)
            .alignment(Alignment::Center)
            .style(text_style)
            .render(rect, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_button_shrinks_around_centre() {
        let area = Rect::new(10, 2, 20, 3);
        assert_eq!(button_rect(area, false), area);

        let pressed = button_rect(area, true);
        assert_eq!(pressed.width, 16);
        assert_eq!(pressed.x, 12);
        assert_eq!(pressed.y, 2);
        assert_eq!(pressed.height, 3);
    }

    #[test]
    fn narrow_button_keeps_its_size() {
        let area = Rect::new(0, 0, 3, 3);
        assert_eq!(button_rect(area, true), area);
    }

    #[test]
    fn renders_label() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        SpinButton {
            label: "Spin",
            pressed: false,
            busy: false,
            color: Color::Blue,
            text_color: Color::White,
        }
        .render(area, &mut buf);

        let middle: String = (0..area.width)
            .map(|x| buf.get(x, 1).symbol().to_string())
            .collect();
        assert!(middle.contains("Spin"));
    }
}
