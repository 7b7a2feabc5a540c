use crate::palette::Palette;

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
};

/// Styles shared by every panel of the hook form.
pub struct Theme;

impl Theme {
    pub fn label() -> Style {
        Style::default()
            .fg(Palette::ACCENT.tui())
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default()
            .fg(Palette::SUCCESS.tui())
            .add_modifier(Modifier::BOLD)
    }

    pub fn danger() -> Style {
        Style::default()
            .fg(Palette::DANGER.tui())
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted() -> Style {
        Style::default().add_modifier(Modifier::DIM)
    }

    pub fn hook(selected: bool) -> Style {
        let style = Style::default().fg(Palette::HOOK.tui());
        if selected {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    /// Rounded panel; the border is highlighted when the panel has focus.
    pub fn panel<'a>(title: impl Into<String>, focused: bool) -> Block<'a> {
        let border = if focused {
            Palette::ACCENT.tui()
        } else {
            Palette::BORDER.tui()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(Self::title_line(title))
            .title_alignment(Alignment::Left)
    }

    fn title_line(title: impl Into<String>) -> Line<'static> {
        Line::from(vec![Span::styled(
            format!(" {} ", title.into()),
            Self::label(),
        )])
    }

    /// Footer line of `key action` pairs separated by bullets.
    pub fn key_hints(hints: &[(&str, &str)]) -> Line<'static> {
        let mut spans = Vec::with_capacity(hints.len() * 3);
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" • "));
            }
            spans.push(Span::styled(
                format!(" {key} "),
                Style::default()
                    .fg(Color::White)
                    .bg(Palette::ACCENT.tui())
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(format!(" {action}")));
        }
        Line::from(spans)
    }
}
