use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use std::time::Duration;

const BRAILLE: &[char] = &['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];
const FRAME_INTERVAL: Duration = Duration::from_millis(80);

/// Loading glyph derived from how long the lookup has been pending.
pub fn glyph_at(elapsed: Duration) -> char {
    let frame = (elapsed.as_millis() / FRAME_INTERVAL.as_millis()) as usize;
    BRAILLE[frame % BRAILLE.len()]
}

pub fn loading_span(elapsed: Duration, label: &str) -> Vec<Span> {
    vec![
        Span::styled(
            format!("  {} ", glyph_at(elapsed)),
            Style::new().color(Color::Cyan),
        )
        .no_wrap(),
        Span::styled(label.to_string(), Style::new().color(Color::DarkGrey)).no_wrap(),
    ]
}
