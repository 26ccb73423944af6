//! Application module for the dev hub.
//!
//! This module provides the main application state and logic. It holds the
//! navigation state, resolves the active tab's document on every render and
//! handles scrolling, searching and the selector popups.
use log::{debug, error};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
};

use super::home::profile_lines;
use super::markdown::{self, line_text};
use super::sidebar::{Picker, Selector, render_sidebar};
use crate::assets::Assets;
use crate::catalog::Tab;
use crate::navigation::{NavigationState, View};
use crate::resolver::ContentResolver;

/// Width of the sidebar in columns.
const SIDEBAR_WIDTH: u16 = 30;

const TAB_HIGHLIGHT_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

const SEARCH_HIGHLIGHT_STYLE: Style = Style::new().bg(Color::DarkGray);

/// Application mode that determines the current UI state.
///
/// Controls what is displayed and how user input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode
{
    /// Normal reading mode - default state
    Normal,
    /// Help overlay is displayed
    Help,
    /// Search mode - accepting search input
    Search,
    /// A selector popup is open
    Picker,
}

/// Main application state for the dev hub.
pub struct App
{
    /// Current values of the sidebar selectors
    pub navigation: NavigationState,
    /// Reads the documents behind the tabs
    resolver: ContentResolver,
    /// Index of the active tab within the current view
    pub tab_index: usize,
    /// Current scroll position in the page, in wrapped rows
    pub scroll: usize,
    /// Inner width of the page pane at the last draw, 0 before the first
    page_width: u16,
    /// Inner height of the page pane at the last draw
    page_height: u16,
    /// Current application mode
    pub mode: AppMode,
    /// Open selector popup, if any
    picker: Option<Picker>,
    /// Current search query text
    pub search_text: String,
    /// Line numbers where search results were found
    pub search_results: Vec<usize>,
    /// Index of the currently selected search result
    pub current_search_index: usize,
    /// Flag indicating if the application should exit
    pub should_quit: bool,
}

impl App
{
    /// Creates a new App instance.
    ///
    /// # Arguments
    ///
    /// * `resolver` - Resolver for the documents behind the tabs
    /// * `navigation` - Initial selector values
    #[must_use]
    pub const fn new(resolver: ContentResolver, navigation: NavigationState) -> Self
    {
        Self {
            navigation,
            resolver,
            tab_index: 0,
            scroll: 0,
            page_width: 0,
            page_height: 0,
            mode: AppMode::Normal,
            picker: None,
            search_text: String::new(),
            search_results: Vec::new(),
            current_search_index: 0,
            should_quit: false,
        }
    }

    /// The page currently shown.
    #[must_use]
    pub const fn view(&self) -> View
    {
        self.navigation.current_view()
    }

    /// The active tab, or `None` on the home page.
    #[must_use]
    pub fn current_tab(&self) -> Option<&'static Tab>
    {
        self.view().tabs().get(self.tab_index)
    }

    /// Lines of the current page.
    ///
    /// The active tab's document is read again on every call. A read error
    /// only affects this tab: it is logged and shown in place of the text.
    #[must_use]
    pub fn page_lines(&self) -> Vec<Line<'static>>
    {
        let Some(tab) = self.current_tab()
        else
        {
            return profile_lines(&Assets::locate(self.resolver.root()));
        };

        match self.resolver.resolve(tab.path)
        {
            Ok(content) => markdown::render(&content).lines,
            Err(err) =>
            {
                error!("{err:#}");
                vec![Line::raw(format!("⚠️ {err:#}"))]
            }
        }
    }

    /// Renders the application UI to the provided frame.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render the UI to
    pub fn render(&mut self, frame: &mut Frame)
    {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(frame.area());

        render_sidebar(frame, chunks[0], &self.navigation);

        let view = self.view();
        let content_area = if view.tabs().is_empty()
        {
            chunks[1]
        }
        else
        {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(chunks[1]);

            self.render_tabs(frame, rows[0]);
            rows[1]
        };

        self.render_page(frame, content_area);

        match self.mode
        {
            AppMode::Help => Self::render_help(frame),
            AppMode::Search => self.render_search(frame),
            AppMode::Picker =>
            {
                let area = frame.area();
                if let Some(picker) = self.picker.as_mut()
                {
                    picker.render(frame, area);
                }
            }
            AppMode::Normal =>
            {}
        }
    }

    /// Renders the tab strip of the current view.
    fn render_tabs(&self, frame: &mut Frame, area: Rect)
    {
        let view = self.view();
        let labels = view
            .tabs()
            .iter()
            .map(|tab| tab.label);

        let tabs = Tabs::new(labels)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(view.title()),
            )
            .select(self.tab_index)
            .highlight_style(TAB_HIGHLIGHT_STYLE);

        frame.render_widget(tabs, area);
    }

    /// Renders the home page or the active tab's document.
    ///
    /// Records the pane size so scrolling can be measured in wrapped rows.
    fn render_page(&mut self, frame: &mut Frame, area: Rect)
    {
        // Borders take one cell on each side
        self.page_width = area.width.saturating_sub(2);
        self.page_height = area.height.saturating_sub(2);

        let lines = self.page_lines();
        self.scroll = self.scroll.min(self.max_scroll(&lines));

        let lines: Vec<Line> = lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                if self.search_results.contains(&index)
                {
                    line.patch_style(SEARCH_HIGHLIGHT_STYLE)
                }
                else
                {
                    line
                }
            })
            .collect();

        let title = match self.current_tab()
        {
            Some(tab) => format!(
                "{} ({}/{}) - Press ? for help",
                tab.label,
                self.tab_index.saturating_add(1),
                self.view().tabs().len()
            ),
            None => format!("{} - Press ? for help", self.view().title()),
        };

        let paragraph = Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title),
            )
            .wrap(Wrap { trim: false })
            .scroll((u16::try_from(self.scroll).unwrap_or(u16::MAX), 0));

        frame.render_widget(paragraph, area);
    }

    /// Renders the help overlay with keyboard shortcuts.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render the help overlay to
    fn render_help(frame: &mut Frame)
    {
        // Create a centered rectangle.
        let area = centered_rect(60, 70, frame.area());

        // Clear the area first to make it fully opaque
        frame.render_widget(Clear, area);

        let text = Text::from(vec![
            Line::from("Dev Hub Help:"),
            Line::from(""),
            Line::from("c: Pick a category"),
            Line::from("b: Pick a book"),
            Line::from("h/l, ←/→ or Shift-Tab/Tab: Previous/next tab"),
            Line::from("j/k or ↓/↑: Scroll down/up"),
            Line::from("Space or PgDn/PgUp: Scroll page down/up"),
            Line::from("g/G: Go to start/end of page"),
            Line::from("/: Search"),
            Line::from("n/N: Next/previous search result"),
            Line::from("Esc: Clear search highlights"),
            Line::from("q: Quit"),
            Line::from("?: Toggle help"),
        ]);

        let help_box = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help"),
            )
            .wrap(Wrap { trim: true });

        frame.render_widget(help_box, area);
    }

    /// Renders the search input box.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render the search box to
    fn render_search(&self, frame: &mut Frame)
    {
        let full = frame.area();
        let area = Rect::new(
            full.width / 4,
            full.height.saturating_sub(3),
            full.width / 2,
            3.min(full.height),
        );

        // Clear the area first to make it fully opaque
        frame.render_widget(Clear, area);

        let search_box = Paragraph::new(format!("/{}", self.search_text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search"),
        );

        frame.render_widget(search_box, area);
    }

    /// Opens the popup for `selector` with its current value highlighted.
    pub fn open_picker(&mut self, selector: Selector)
    {
        self.picker = Some(Picker::new(selector, &self.navigation));
        self.mode = AppMode::Picker;
    }

    /// Moves the popup highlight down.
    pub fn picker_next(&mut self)
    {
        if let Some(picker) = self.picker.as_mut()
        {
            picker.next();
        }
    }

    /// Moves the popup highlight up.
    pub fn picker_previous(&mut self)
    {
        if let Some(picker) = self.picker.as_mut()
        {
            picker.previous();
        }
    }

    /// Applies the highlighted popup option and closes the popup.
    pub fn confirm_picker(&mut self)
    {
        if let Some(picker) = self.picker.take()
        {
            let navigation = picker
                .selector()
                .apply(self.navigation, picker.highlighted());
            self.set_navigation(navigation);
        }
        self.mode = AppMode::Normal;
    }

    /// Closes the popup without changing anything.
    pub fn cancel_picker(&mut self)
    {
        self.picker = None;
        self.mode = AppMode::Normal;
    }

    /// Replaces the navigation state, starting the new view at its first
    /// tab.
    pub fn set_navigation(&mut self, navigation: NavigationState)
    {
        if navigation != self.navigation
        {
            debug!("View changed to {:?}", navigation.current_view());
        }

        self.navigation = navigation;
        self.tab_index = 0;
        self.reset_page();
    }

    /// Switches to the next tab, wrapping around.
    pub fn next_tab(&mut self)
    {
        let count = self.view().tabs().len();

        if count == 0
        {
            return;
        }

        self.tab_index = self.tab_index.saturating_add(1) % count;
        self.reset_page();
    }

    /// Switches to the previous tab, wrapping around.
    pub fn prev_tab(&mut self)
    {
        let count = self.view().tabs().len();

        if count == 0
        {
            return;
        }

        self.tab_index = if self.tab_index == 0
        {
            count.saturating_sub(1)
        }
        else
        {
            self.tab_index.saturating_sub(1)
        };
        self.reset_page();
    }

    /// Scrolls to the top and drops search results.
    fn reset_page(&mut self)
    {
        self.scroll = 0;
        self.reset_search_highlights();
    }

    /// Scrolls the page up by the specified amount.
    ///
    /// # Arguments
    ///
    /// * `amount` - Number of lines to scroll up
    pub const fn scroll_up(&mut self, amount: usize)
    {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    /// Scrolls the page down by the specified amount.
    ///
    /// Stops once the last row of the page reaches the bottom of the pane.
    ///
    /// # Arguments
    ///
    /// * `amount` - Number of rows to scroll down
    pub fn scroll_down(&mut self, amount: usize)
    {
        let max_scroll = self.max_scroll(&self.page_lines());

        self.scroll = self
            .scroll
            .saturating_add(amount)
            .min(max_scroll);
    }

    /// Scrolls down by one pane height.
    pub fn page_down(&mut self)
    {
        self.scroll_down(self.page_rows());
    }

    /// Scrolls up by one pane height.
    pub fn page_up(&mut self)
    {
        self.scroll_up(self.page_rows());
    }

    /// Rows shown at once, at least one.
    fn page_rows(&self) -> usize
    {
        usize::from(self.page_height).max(1)
    }

    /// Largest scroll offset that still fills the pane.
    fn max_scroll(&self, lines: &[Line]) -> usize
    {
        let total: usize = lines
            .iter()
            .map(|line| wrapped_rows(line, self.page_width))
            .sum();

        total.saturating_sub(self.page_rows())
    }

    /// Toggles the help overlay.
    pub fn toggle_help(&mut self)
    {
        self.mode = if self.mode == AppMode::Help
        {
            AppMode::Normal
        }
        else
        {
            AppMode::Help
        };
    }

    /// Enters search mode, clearing any previous search.
    pub fn enter_search_mode(&mut self)
    {
        self.mode = AppMode::Search;
        self.search_text.clear();
    }

    /// Exits search mode and returns to normal mode.
    pub const fn exit_search_mode(&mut self)
    {
        self.mode = AppMode::Normal;
    }

    /// Adds a character to the search text.
    ///
    /// # Arguments
    ///
    /// * `ch` - The character to add
    pub fn add_search_char(&mut self, ch: char)
    {
        self.search_text.push(ch);
    }

    /// Removes the last character from the search text.
    pub fn remove_search_char(&mut self)
    {
        self.search_text.pop();
    }

    /// Performs a search using the current search text.
    ///
    /// Finds all lines of the current page containing the search text,
    /// ignoring case. If results are found, jumps to the first result.
    pub fn perform_search(&mut self)
    {
        if self.search_text.is_empty()
        {
            self.search_results.clear();
            return;
        }

        let needle = self.search_text.to_lowercase();

        self.search_results = self
            .page_lines()
            .iter()
            .enumerate()
            .filter(|(_, line)| {
                line_text(line)
                    .to_lowercase()
                    .contains(&needle)
            })
            .map(|(index, _)| index)
            .collect();

        self.current_search_index = 0;

        if !self.search_results.is_empty()
        {
            self.jump_to_search_result();
        }
    }

    /// Moves to the next search result.
    pub fn next_search_result(&mut self)
    {
        if self.search_results.is_empty()
        {
            return;
        }

        self.current_search_index =
            self.current_search_index.saturating_add(1) % self.search_results.len();
        self.jump_to_search_result();
    }

    /// Moves to the previous search result.
    pub fn prev_search_result(&mut self)
    {
        if self.search_results.is_empty()
        {
            return;
        }

        self.current_search_index = if self.current_search_index == 0
        {
            self.search_results.len().saturating_sub(1)
        }
        else
        {
            self.current_search_index.saturating_sub(1)
        };

        self.jump_to_search_result();
    }

    /// Clears the search results and their highlights.
    pub fn reset_search_highlights(&mut self)
    {
        self.search_results.clear();
        self.current_search_index = 0;
    }

    /// Jumps to the current search result by scrolling to its line.
    ///
    /// Results are line indices, so the rows of every wrapped line above the
    /// hit are added up to get the scroll offset.
    fn jump_to_search_result(&mut self)
    {
        let Some(&hit) = self
            .search_results
            .get(self.current_search_index)
        else
        {
            return;
        };

        let lines = self.page_lines();
        let row: usize = lines
            .iter()
            .take(hit)
            .map(|line| wrapped_rows(line, self.page_width))
            .sum();

        self.scroll = row.min(self.max_scroll(&lines));
    }
}

/// Number of rows `line` takes when wrapped to `width` columns.
///
/// Before the first draw the width is unknown and every line counts as one
/// row.
fn wrapped_rows(line: &Line, width: u16) -> usize
{
    if width == 0
    {
        return 1;
    }

    Paragraph::new(line.clone())
        .wrap(Wrap { trim: false })
        .line_count(width)
        .max(1)
}

/// Creates a centered rectangle inside the given area.
///
/// # Arguments
///
/// * `percent_x` - Width of the rectangle as a percentage of the parent area
/// * `percent_y` - Height of the rectangle as a percentage of the parent area
/// * `area` - Parent rectangle
///
/// # Returns
///
/// A new rectangle positioned in the center of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect
{
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
