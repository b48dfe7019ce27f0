use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Padding each side of the label once fully revealed.
const MAX_PADDING: usize = 3;

/// Shows the resolved label, growing and fading in while it is revealed.
pub struct Readout<'a> {
    pub selection: Option<&'a str>,
    pub reveal: f64,
    pub color: Color,
    pub muted: Color,
    pub settled_at: Option<DateTime<Local>>,
}

/// Terminal stand-in for a scale effect: the frame around the label widens.
pub fn framed_label(label: &str, reveal: f64) -> String {
    let padding = (reveal.clamp(0.0, 1.0) * MAX_PADDING as f64).round() as usize;
    let gap = " ".repeat(padding);
    format!("»{gap}{label}{gap}«")
}

impl Widget for Readout<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match self.selection {
            Some(label) => {
                let mut style = Style::default().fg(self.color);
                if self.reveal >= 1.0 {
                    style = style.add_modifier(Modifier::BOLD);
                }
                let mut spans = vec![Span::styled(framed_label(label, self.reveal), style)];
                if let Some(at) = self.settled_at {
                    spans.push(Span::styled(
                        format!("  {}", at.format("%H:%M:%S")),
                        Style::default().fg(self.muted).add_modifier(Modifier::ITALIC),
                    ));
                }
                Line::from(spans)
            }
            None => Line::from(Span::styled(
                "Spin the wheel to pick a genre",
                Style::default().fg(self.muted).add_modifier(Modifier::ITALIC),
            )),
        };

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
