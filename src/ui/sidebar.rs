//! Sidebar with the "Category" and "Book" selectors.
//!
//! The sidebar shows the current value of each selector. Picking a new
//! value happens in a popup list, the terminal stand-in for a dropdown.
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use textwrap::wrap;

use crate::catalog::{Book, Category};
use crate::navigation::NavigationState;

const PICKER_HIGHLIGHT_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

const SIDEBAR_BORDER_STYLE: Style = Style::new().fg(Color::Gray);

const TITLE_STYLE: Style = Style::new()
    .fg(Color::White)
    .add_modifier(Modifier::BOLD);

const PICKER_HIGHLIGHT_SYMBOL: &str = "> ";

/// Label of the empty choice in both selectors.
pub const NONE_LABEL: &str = "None";

/// One of the two sidebar selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector
{
    /// The "Category" selector
    Category,
    /// The "Book" selector
    Book,
}

impl Selector
{
    /// Heading shown above the selector.
    #[must_use]
    pub const fn title(self) -> &'static str
    {
        match self
        {
            Self::Category => "Pick a Category",
            Self::Book => "Pick a Book",
        }
    }

    /// Options in display order, "None" first.
    #[must_use]
    pub fn options(self) -> Vec<&'static str>
    {
        let labels: Vec<&'static str> = match self
        {
            Self::Category => Category::ALL
                .into_iter()
                .map(Category::label)
                .collect(),
            Self::Book => Book::ALL
                .into_iter()
                .map(Book::label)
                .collect(),
        };

        std::iter::once(NONE_LABEL)
            .chain(labels)
            .collect()
    }

    /// Index of the selector's current value within [`Self::options`].
    #[must_use]
    pub fn current_index(self, navigation: &NavigationState) -> usize
    {
        let position = match self
        {
            Self::Category => navigation
                .primary()
                .and_then(|current| Category::ALL.iter().position(|category| *category == current)),
            Self::Book => navigation
                .book()
                .and_then(|current| Book::ALL.iter().position(|book| *book == current)),
        };

        position.map_or(0, |index| index.saturating_add(1))
    }

    /// Applies the option at `index` to the navigation state.
    ///
    /// Index 0 and out of range indices select none.
    #[must_use]
    pub fn apply(self, navigation: NavigationState, index: usize) -> NavigationState
    {
        let choice = index.checked_sub(1);

        match self
        {
            Self::Category =>
            {
                navigation.select_primary(choice.and_then(|idx| Category::ALL.get(idx).copied()))
            }
            Self::Book => navigation.select_book(choice.and_then(|idx| Book::ALL.get(idx).copied())),
        }
    }
}

/// Popup list used to pick a selector value.
#[derive(Debug, Clone)]
pub struct Picker
{
    /// Selector being edited
    selector: Selector,
    /// Option labels, "None" first
    options: Vec<&'static str>,
    /// Highlighted option
    state: ListState,
}

impl Picker
{
    /// Opens a picker for `selector` with its current value highlighted.
    #[must_use]
    pub fn new(selector: Selector, navigation: &NavigationState) -> Self
    {
        let mut state = ListState::default();
        state.select(Some(selector.current_index(navigation)));

        Self {
            selector,
            options: selector.options(),
            state,
        }
    }

    /// Selector being edited.
    #[must_use]
    pub const fn selector(&self) -> Selector
    {
        self.selector
    }

    /// Index of the highlighted option.
    #[must_use]
    pub fn highlighted(&self) -> usize
    {
        self.state.selected().unwrap_or(0)
    }

    /// Moves the highlight down, wrapping to the top.
    pub fn next(&mut self)
    {
        let next = self.highlighted().saturating_add(1);
        let next = if next >= self.options.len() { 0 } else { next };

        self.state.select(Some(next));
    }

    /// Moves the highlight up, wrapping to the bottom.
    pub fn previous(&mut self)
    {
        let previous = match self.highlighted()
        {
            0 => self.options.len().saturating_sub(1),
            index => index.saturating_sub(1),
        };

        self.state.select(Some(previous));
    }

    /// Renders the picker as a popup over `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect)
    {
        let height = u16::try_from(self.options.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let width = 40.min(area.width);

        let popup = Rect::new(
            area.x
                .saturating_add(area.width.saturating_sub(width) / 2),
            area.y
                .saturating_add(area.height.saturating_sub(height) / 2),
            width,
            height,
        );

        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|label| ListItem::new(Line::raw(*label)))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.selector.title())
                    .title_style(TITLE_STYLE),
            )
            .highlight_style(PICKER_HIGHLIGHT_STYLE)
            .highlight_symbol(PICKER_HIGHLIGHT_SYMBOL);

        frame.render_widget(Clear, popup);
        frame.render_stateful_widget(list, popup, &mut self.state);
    }
}

/// Renders the sidebar: both selectors with their current values and a
/// short key reference.
pub fn render_sidebar(frame: &mut Frame, area: Rect, navigation: &NavigationState)
{
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(SIDEBAR_BORDER_STYLE)
        .title("Navigation")
        .title_alignment(Alignment::Left)
        .title_style(TITLE_STYLE);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(4), Constraint::Min(0)])
        .split(inner);

    let category = navigation
        .primary()
        .map_or(NONE_LABEL, Category::label);
    let book = navigation
        .book()
        .map_or(NONE_LABEL, Book::label);

    render_selector(frame, chunks[0], Selector::Category, 'c', category);
    render_selector(frame, chunks[1], Selector::Book, 'b', book);

    let hints = Paragraph::new(vec![
        Line::from(Span::styled("h/l: switch tab", SIDEBAR_BORDER_STYLE)),
        Line::from(Span::styled("?: help  q: quit", SIDEBAR_BORDER_STYLE)),
    ]);
    frame.render_widget(hints, chunks[2]);
}

/// Renders one selector with its key and current value.
fn render_selector(frame: &mut Frame, area: Rect, selector: Selector, key: char, value: &str)
{
    // 2 for the indentation
    let wrap_width = usize::from(area.width)
        .saturating_sub(2)
        .max(1);

    let mut lines = vec![Line::from(vec![
        Span::styled(selector.title(), TITLE_STYLE),
        Span::styled(format!(" [{key}]"), SIDEBAR_BORDER_STYLE),
    ])];

    lines.extend(
        wrap(value, wrap_width)
            .into_iter()
            .map(|part| Line::from(format!("  {part}"))),
    );

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::navigation::View;

    #[test]
    fn options_start_with_none()
    {
        let categories = Selector::Category.options();
        let books = Selector::Book.options();

        assert_eq!(categories.len(), 8);
        assert_eq!(books.len(), 3);
        assert_eq!(categories[0], NONE_LABEL);
        assert_eq!(books[0], NONE_LABEL);
        assert_eq!(categories[4], "📊 Data Science");
    }

    #[test]
    fn apply_maps_indices_to_transitions()
    {
        let state = Selector::Category.apply(NavigationState::new(), 4);
        assert_eq!(state.current_view(), View::PrimaryCategory(Category::DataScience));

        let state = Selector::Book.apply(state, 1);
        assert_eq!(state.current_view(), View::BookCategory(Book::PythonCrashCourse));
        assert_eq!(state.primary(), None);

        let state = Selector::Book.apply(state, 0);
        assert_eq!(state.current_view(), View::Home);
    }

    #[test]
    fn current_index_reflects_state()
    {
        let state = NavigationState::new().select_book(Some(Book::AutomateTheBoringStuff));

        assert_eq!(Selector::Book.current_index(&state), 2);
        assert_eq!(Selector::Category.current_index(&state), 0);
    }

    #[test]
    fn picker_wraps_around()
    {
        let mut picker = Picker::new(Selector::Book, &NavigationState::new());
        assert_eq!(picker.highlighted(), 0);

        picker.previous();
        assert_eq!(picker.highlighted(), 2);

        picker.next();
        assert_eq!(picker.highlighted(), 0);
    }
}
