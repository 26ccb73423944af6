//! Markdown to styled terminal text.
//!
//! Walks the `pulldown_cmark` event stream and builds owned `ratatui` lines.
//! Supports headings, emphasis, inline and fenced code, lists, block quotes,
//! links, rules and simple tables. Raw HTML, images and footnotes are
//! skipped.
use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

const RULE_WIDTH: usize = 40;

const DIM_STYLE: Style = Style::new().fg(Color::DarkGray);

const CODE_STYLE: Style = Style::new().fg(Color::White);

const INLINE_CODE_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .bg(Color::DarkGray);

const LINK_STYLE: Style = Style::new()
    .fg(Color::Cyan)
    .add_modifier(Modifier::UNDERLINED);

/// Renders markdown into styled text.
///
/// # Arguments
///
/// * `content` - The markdown source
///
/// # Returns
///
/// Owned text that does not borrow from `content`.
#[must_use]
pub fn render(content: &str) -> Text<'static>
{
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut writer = Writer::default();

    for event in Parser::new_ext(content, options)
    {
        writer.handle(event);
    }

    writer.text
}

/// Plain text of a rendered line, used for searching.
#[must_use]
pub fn line_text(line: &Line<'_>) -> String
{
    line.spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect()
}

/// Accumulates lines while walking the event stream.
#[derive(Default)]
struct Writer
{
    /// Lines produced so far
    text: Text<'static>,
    /// Inline style stack; each entry is patched onto its parent
    styles: Vec<Style>,
    /// Prefix spans repeated on every new line (block quotes, code blocks)
    line_prefixes: Vec<Span<'static>>,
    /// List nesting; `Some(n)` is an ordered list at item `n`
    list_indices: Vec<Option<u64>>,
    /// Inside a fenced or indented code block
    in_code_block: bool,
    /// Target of the link being written
    link_url: Option<String>,
    /// A blank line goes before the next block
    needs_newline: bool,
    /// Cell index within the current table row
    table_cell: usize,
    /// A list marker was just written; the item's first paragraph joins it
    pending_item: bool,
}

impl Writer
{
    /// Current inline style.
    fn style(&self) -> Style
    {
        self.styles
            .last()
            .copied()
            .unwrap_or_default()
    }

    /// Pushes a style on top of the current one.
    fn push_style(&mut self, overlay: Style)
    {
        self.styles.push(self.style().patch(overlay));
    }

    /// Drops the innermost style.
    fn pop_style(&mut self)
    {
        self.styles.pop();
    }

    /// Starts a new line with the active prefixes.
    fn push_line(&mut self, line: Line<'static>)
    {
        let mut line = line;

        for prefix in self.line_prefixes.iter().rev()
        {
            line.spans.insert(0, prefix.clone());
        }

        self.text.lines.push(line);
    }

    /// Appends a span to the last line, starting one if there is none.
    fn push_span(&mut self, span: Span<'static>)
    {
        if let Some(line) = self.text.lines.last_mut()
        {
            line.push_span(span);
        }
        else
        {
            self.push_line(Line::from(span));
        }
    }

    /// Emits the pending blank line between blocks.
    fn blank_line_if_needed(&mut self)
    {
        if self.needs_newline
        {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    /// Dispatches a single parser event.
    fn handle(&mut self, event: Event<'_>)
    {
        match event
        {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) =>
            {
                self.push_span(Span::styled(code.into_string(), INLINE_CODE_STYLE));
            }
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.push_line(Line::default()),
            Event::Rule =>
            {
                self.blank_line_if_needed();
                self.push_line(Line::from(Span::styled("─".repeat(RULE_WIDTH), DIM_STYLE)));
                self.needs_newline = true;
            }
            Event::TaskListMarker(checked) =>
            {
                self.push_span(Span::raw(if checked { "[x] " } else { "[ ] " }));
            }
            // HTML, footnotes, math
            _ =>
            {}
        }
    }

    /// Handles the start of a block or inline element.
    fn open(&mut self, tag: Tag<'_>)
    {
        let joins_item = self.pending_item && matches!(tag, Tag::Paragraph);
        self.pending_item = false;

        match tag
        {
            Tag::Paragraph =>
            {
                if joins_item
                {
                    return;
                }
                self.blank_line_if_needed();
                self.push_line(Line::default());
            }
            Tag::Heading { level, .. } =>
            {
                self.blank_line_if_needed();

                let style = heading_style(level);
                let marker = format!("{} ", "#".repeat(heading_depth(level)));

                self.push_line(Line::from(Span::styled(marker, style)));
                self.push_style(style);
            }
            Tag::BlockQuote(_) =>
            {
                self.blank_line_if_needed();
                self.line_prefixes
                    .push(Span::styled("│ ", DIM_STYLE));
                self.push_style(Style::new().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) =>
            {
                self.blank_line_if_needed();

                let lang = match &kind
                {
                    CodeBlockKind::Fenced(lang) => lang.as_ref(),
                    CodeBlockKind::Indented => "",
                };

                let top = if lang.is_empty()
                {
                    Line::from(Span::styled("╭──", DIM_STYLE))
                }
                else
                {
                    Line::from(vec![
                        Span::styled("╭── ", DIM_STYLE),
                        Span::styled(lang.to_owned(), DIM_STYLE.add_modifier(Modifier::BOLD)),
                    ])
                };

                self.push_line(top);
                self.line_prefixes
                    .push(Span::styled("│ ", DIM_STYLE));
                self.in_code_block = true;
            }
            Tag::List(start) =>
            {
                if self.list_indices.is_empty()
                {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item =>
            {
                self.push_line(Line::default());

                let indent = "  ".repeat(
                    self.list_indices
                        .len()
                        .saturating_sub(1),
                );

                if let Some(index) = self.list_indices.last_mut()
                {
                    let marker = match index
                    {
                        None => format!("{indent}• "),
                        Some(number) =>
                        {
                            let marker = format!("{indent}{number}. ");
                            *number = number.saturating_add(1);
                            marker
                        }
                    };

                    self.push_span(Span::styled(marker, Style::new().fg(Color::Yellow)));
                }
                self.pending_item = true;
            }
            Tag::Table(_) => self.blank_line_if_needed(),
            Tag::TableHead | Tag::TableRow =>
            {
                self.table_cell = 0;
                self.push_line(Line::default());
            }
            Tag::TableCell =>
            {
                if self.table_cell > 0
                {
                    self.push_span(Span::styled(" │ ", DIM_STYLE));
                }
                self.table_cell = self.table_cell.saturating_add(1);
            }
            Tag::Emphasis => self.push_style(Style::new().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::new().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough =>
            {
                self.push_style(Style::new().add_modifier(Modifier::CROSSED_OUT));
            }
            Tag::Link { dest_url, .. } =>
            {
                self.link_url = Some(dest_url.into_string());
                self.push_style(LINK_STYLE);
            }
            // Images, definitions, metadata
            _ =>
            {}
        }
    }

    /// Handles the end of a block or inline element.
    fn close(&mut self, tag: TagEnd)
    {
        match tag
        {
            TagEnd::Paragraph | TagEnd::Table => self.needs_newline = true,
            TagEnd::Heading(_) =>
            {
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::BlockQuote(_) =>
            {
                self.line_prefixes.pop();
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::CodeBlock =>
            {
                self.in_code_block = false;
                self.line_prefixes.pop();
                self.push_line(Line::from(Span::styled("╰──", DIM_STYLE)));
                self.needs_newline = true;
            }
            TagEnd::List(_) =>
            {
                self.list_indices.pop();
                self.needs_newline = true;
            }
            TagEnd::TableHead =>
            {
                self.push_line(Line::from(Span::styled("─".repeat(RULE_WIDTH), DIM_STYLE)));
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link =>
            {
                self.pop_style();

                if let Some(url) = self.link_url.take()
                {
                    self.push_span(Span::raw(" ("));
                    self.push_span(Span::styled(url, LINK_STYLE));
                    self.push_span(Span::raw(")"));
                }
            }
            _ =>
            {}
        }
    }

    /// Writes text, either as code lines or inline in the current style.
    fn text(&mut self, text: &CowStr<'_>)
    {
        // ratatui renders tabs as zero width
        let text = text.replace('\t', "    ");

        if self.in_code_block
        {
            for line in text.lines()
            {
                self.push_line(Line::from(Span::styled(line.to_owned(), CODE_STYLE)));
            }
            return;
        }

        self.pending_item = false;
        let style = self.style();
        self.push_span(Span::styled(text, style));
    }
}

/// Style of a heading by level.
const fn heading_style(level: HeadingLevel) -> Style
{
    match level
    {
        HeadingLevel::H1 => Style::new()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD.union(Modifier::UNDERLINED)),
        HeadingLevel::H2 => Style::new()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        HeadingLevel::H3 => Style::new()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        _ => Style::new()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    }
}

/// Number of `#` characters for a heading level.
const fn heading_depth(level: HeadingLevel) -> usize
{
    match level
    {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn plain_lines(content: &str) -> Vec<String>
    {
        render(content)
            .lines
            .iter()
            .map(line_text)
            .collect()
    }

    #[test]
    fn heading_text_carries_heading_style()
    {
        let text = render("## Dictionaries");
        let line = &text.lines[0];

        assert_eq!(line_text(line), "## Dictionaries");
        assert!(
            line.spans
                .iter()
                .all(|span| span.style.add_modifier.contains(Modifier::BOLD))
        );
    }

    #[test]
    fn paragraphs_are_separated_by_a_blank_line()
    {
        assert_eq!(plain_lines("first\n\nsecond"), vec!["first", "", "second"]);
    }

    #[test]
    fn soft_breaks_join_lines()
    {
        assert_eq!(plain_lines("one\ntwo"), vec!["one two"]);
    }

    #[test]
    fn lists_get_markers()
    {
        assert_eq!(plain_lines("- a\n- b"), vec!["• a", "• b"]);
        assert_eq!(plain_lines("3. x\n4. y"), vec!["3. x", "4. y"]);
    }

    #[test]
    fn loose_list_items_stay_on_the_marker_line()
    {
        let lines = plain_lines("- a\n\n- b");

        assert_eq!(lines[0], "• a");
        assert!(lines.contains(&"• b".to_owned()));
    }

    #[test]
    fn nested_lists_are_indented()
    {
        let lines = plain_lines("- outer\n  - inner");

        assert_eq!(lines[0], "• outer");
        assert_eq!(lines[1], "  • inner");
    }

    #[test]
    fn fenced_code_keeps_lines_and_language()
    {
        let lines = plain_lines("```python\nx = 1\nprint(x)\n```");

        assert_eq!(lines, vec!["╭── python", "│ x = 1", "│ print(x)", "╰──"]);
    }

    #[test]
    fn links_show_their_target()
    {
        let lines = plain_lines("[docs](https://docs.python.org)");

        assert_eq!(lines, vec!["docs (https://docs.python.org)"]);
    }

    #[test]
    fn inline_code_is_highlighted()
    {
        let text = render("call `len()` here");
        let code = text.lines[0]
            .spans
            .iter()
            .find(|span| span.content == "len()")
            .expect("inline code span");

        assert_eq!(code.style, INLINE_CODE_STYLE);
    }

    #[test]
    fn tables_render_cells_in_a_row()
    {
        let lines = plain_lines("| a | b |\n|---|---|\n| 1 | 2 |");

        assert_eq!(lines[0], "a │ b");
        assert_eq!(lines[2], "1 │ 2");
    }

    #[test]
    fn block_quotes_are_prefixed()
    {
        assert_eq!(plain_lines("> note"), vec!["│ note"]);
    }

    #[test]
    fn missing_placeholder_renders_as_plain_text()
    {
        assert_eq!(plain_lines("❌ Missing: pcc/ch5_if.md"), vec!["❌ Missing: pcc/ch5_if.md"]);
    }
}
