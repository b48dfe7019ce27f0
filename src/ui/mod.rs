pub mod theme;
pub mod widgets;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Instant;

use crate::app::{App, Config};
use crate::wheel::SpinPhase;
use theme::Theme;
use widgets::{Readout, SpinButton, WheelColors, WheelView};

const BUTTON_WIDTH: u16 = 20;

/// Screen regions, shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub wheel: Rect,
    pub readout: Rect,
    pub button: Rect,
    pub footer: Rect,
}

pub fn layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Wheel
            Constraint::Length(1), // Readout
            Constraint::Length(3), // Spin button
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let button_row = chunks[3];
    let width = BUTTON_WIDTH.min(button_row.width);
    let button = Rect {
        x: button_row.x + (button_row.width - width) / 2,
        width,
        ..button_row
    };

    AppLayout {
        header: chunks[0],
        wheel: chunks[1],
        readout: chunks[2],
        button,
        footer: chunks[4],
    }
}

pub fn render(f: &mut Frame, app: &App) {
    let size = f.size();
    let now = Instant::now();
    let config = app.state.config.read();
    let theme = Theme::from_config(&config);
    let spinner = &app.state.spinner;
    let regions = layout(size);

    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, size);

    render_header(f, regions.header, &config.general.app_name, &theme);

    let highlight = match spinner.phase() {
        SpinPhase::Spinning { .. } => None,
        _ => spinner.selection_index(),
    };
    f.render_widget(
        WheelView {
            wheel: spinner.wheel(),
            rotation: spinner.displayed_rotation(now),
            highlight,
            colors: WheelColors {
                background: theme.background,
                outline: theme.wheel_color,
                pointer: theme.pointer_color,
                label: theme.label_color,
                highlight: theme.selection_color,
            },
        },
        regions.wheel,
    );

    let reveal = spinner.reveal_progress(now);
    f.render_widget(
        Readout {
            selection: spinner.selection(),
            reveal,
            color: theme.reveal_color(reveal),
            muted: Color::Gray,
            settled_at: spinner.settled_at(),
        },
        regions.readout,
    );

    f.render_widget(
        SpinButton {
            label: &config.ui.button_label,
            pressed: spinner.is_pressed(now),
            busy: !spinner.is_idle(),
            color: theme.button_color,
            text_color: theme.button_text_color,
        },
        regions.button,
    );

    render_footer(f, regions.footer, app, &config, &theme);
}

fn render_header(f: &mut Frame, area: Rect, app_name: &str, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.foreground));

    let text = Paragraph::new(app_name.to_string())
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD));

    f.render_widget(text, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App, config: &Config, theme: &Theme) {
    let spinner = &app.state.spinner;
    let phase_color = if spinner.is_idle() {
        theme.selection_color
    } else {
        Color::Yellow
    };

    let help_spans = vec![
        Span::raw(format!(
            "[{}/Enter] Spin │ [{}/Esc] Quit │ {} │ spins: {} │ ",
            config.ui.spin_key,
            config.ui.quit_key,
            spinner.variant().as_str(),
            spinner.spins()
        )),
        Span::styled(
            format!("({})", spinner.phase().as_str()),
            Style::default().fg(phase_color).add_modifier(Modifier::BOLD),
        ),
    ];

    let block = Block::default().borders(Borders::ALL);
    let paragraph = Paragraph::new(Line::from(help_spans))
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));

    f.render_widget(paragraph, area);
}
