use super::Autocomplete;
use crate::core::search::ghost::ghost_suffix;
use crate::terminal::CursorPos;
use crate::ui::span::{Span, SpanLine};
use crate::ui::spinner::loading_span;
use crate::ui::style::{Color, Style};
use crate::widgets::inputs::text_edit;
use crate::widgets::traits::{DrawOutput, RenderContext};
use unicode_width::UnicodeWidthStr;

pub(super) fn draw(widget: &Autocomplete, ctx: &RenderContext) -> DrawOutput {
    let mut lines = vec![input_line(widget, ctx)];

    if let Some(since) = widget.resolver.loading_since() {
        let elapsed = widget.now.saturating_duration_since(since);
        lines.push(loading_span(elapsed, "searching…"));
    }

    if widget.shows_list() {
        lines.extend(list_lines(widget, ctx));
    }

    DrawOutput {
        lines,
        cursor: if ctx.focused { cursor_pos(widget) } else { None },
    }
}

pub(super) fn cursor_pos(widget: &Autocomplete) -> Option<CursorPos> {
    if widget.config.disabled {
        return None;
    }
    let col = prompt_prefix(widget, true)
        .iter()
        .map(Span::width)
        .sum::<usize>()
        + text_edit::before_cursor(&widget.text, widget.cursor).width();
    Some(CursorPos {
        col: col.min(u16::MAX as usize) as u16,
        row: 0,
    })
}

fn prompt_prefix(widget: &Autocomplete, focused: bool) -> Vec<Span> {
    let mut spans = vec![
        Span::styled(
            format!("{} ", widget.base.focus_marker(focused)),
            Style::new().color(Color::Cyan),
        )
        .no_wrap(),
    ];
    if !widget.base.label().is_empty() {
        spans.push(Span::styled(format!("{} ", widget.base.label()), Style::new().bold()).no_wrap());
    }
    spans
}

fn input_line(widget: &Autocomplete, ctx: &RenderContext) -> SpanLine {
    let mut line = prompt_prefix(widget, ctx.focused);
    let text_style = if widget.config.disabled {
        Style::new().color(Color::DarkGrey)
    } else {
        Style::default()
    };
    let ghost_style = Style::new().color(Color::DarkGrey);

    if widget.text.is_empty() {
        if let Some(placeholder) = widget.placeholder() {
            line.push(Span::styled(placeholder.to_string(), ghost_style).no_wrap());
        }
        return line;
    }

    line.push(Span::styled(widget.text.clone(), text_style).no_wrap());

    let at_end = widget.cursor >= text_edit::char_count(&widget.text);
    if at_end
        && let Some(placeholder) = widget.placeholder()
        && placeholder.starts_with(widget.text.as_str())
        && let Some(suffix) = ghost_suffix(placeholder, &widget.text)
    {
        line.push(Span::styled(suffix.to_string(), ghost_style).no_wrap());
    }
    line
}

fn list_lines(widget: &Autocomplete, ctx: &RenderContext) -> Vec<SpanLine> {
    let total = widget.visible.len();
    let mut viewport = ctx.viewport;
    viewport.clamp(total);
    let (start, end) = viewport.visible_range(total);

    let mut lines = Vec::with_capacity(end - start + 1);
    for (index, candidate) in widget.visible[start..end].iter().enumerate() {
        let index = start + index;
        let label = widget.label_of(candidate);
        if index == widget.highlighted {
            lines.push(vec![
                Span::styled("  › ", Style::new().color(Color::Cyan)).no_wrap(),
                Span::styled(label.to_string(), Style::new().color(Color::Cyan).bold()).no_wrap(),
            ]);
        } else {
            lines.push(vec![Span::new(format!("    {label}")).no_wrap()]);
        }
    }

    if let Some(footer) = viewport.footer(total) {
        lines.push(vec![
            Span::styled(format!("    {footer}"), Style::new().color(Color::DarkGrey)).no_wrap(),
        ]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use crate::core::candidate::Candidate;
    use crate::core::config::AutocompleteConfig;
    use crate::terminal::{KeyCode, KeyEvent, TerminalSize};
    use crate::ui::span::line_text;
    use crate::widgets::components::autocomplete::Autocomplete;
    use crate::widgets::components::scroll::ListViewport;
    use crate::widgets::traits::{Drawable, Interactive, RenderContext};

    fn widget() -> Autocomplete {
        let source = ["Apple", "Apricot", "Avocado", "Banana"]
            .into_iter()
            .map(|label| Candidate::labeled("label", label))
            .collect::<Vec<_>>();
        Autocomplete::new(AutocompleteConfig::new("label"), source.into(), "")
            .expect("valid config")
    }

    fn ctx() -> RenderContext {
        RenderContext::new(TerminalSize {
            width: 80,
            height: 24,
        })
    }

    fn texts(widget: &Autocomplete, ctx: &RenderContext) -> Vec<String> {
        widget.draw(ctx).lines.iter().map(line_text).collect()
    }

    #[test]
    fn empty_input_shows_placeholder_only() {
        let widget = widget();
        assert_eq!(texts(&widget, &ctx()), vec!["> write something...".to_string()]);
    }

    #[test]
    fn typing_shows_ghost_suffix_and_marks_highlight() {
        let mut widget = widget();
        widget.on_key(KeyEvent::plain(KeyCode::Char('a')));
        widget.on_key(KeyEvent::plain(KeyCode::Char('p')));

        let lines = texts(&widget, &ctx());
        assert_eq!(lines[0], "> apple");
        assert_eq!(lines[1], "  › Apple");
        assert_eq!(lines[2], "    Apricot");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn viewport_limits_rows_and_adds_footer() {
        let mut widget = widget();
        widget.on_key(KeyEvent::plain(KeyCode::Char('a')));
        let ctx = ctx().with_viewport(ListViewport::new(Some(2)));

        let lines = texts(&widget, &ctx);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "    [1-2 of 3] ↓");
    }

    #[test]
    fn unfocused_widget_draws_no_cursor() {
        let widget = widget();
        let output = widget.draw(&ctx().with_focused(false));
        assert!(output.cursor.is_none());
        assert_eq!(line_text(&output.lines[0]), "  write something...");
    }

    #[test]
    fn cursor_follows_text_width() {
        let mut widget = widget().with_label("Fruit");
        widget.on_key(KeyEvent::plain(KeyCode::Char('b')));
        let cursor = widget.cursor_pos().expect("cursor");
        assert_eq!(cursor.col, "> Fruit b".len() as u16);
        assert_eq!(cursor.row, 0);
    }
}
