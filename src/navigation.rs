//! Navigation state shared by the two sidebar selectors.
//!
//! The "Category" and "Book" selectors are mutually exclusive: picking a
//! value in one resets the other to none. Transitions take the state by
//! value and hand back the new one, so the caller owns the only copy.
use crate::catalog::{Book, Category, Tab};

/// Which page the main area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View
{
    /// Profile page, shown when nothing is selected
    Home,
    /// Tabs of a top-level category
    PrimaryCategory(Category),
    /// Tabs of a book
    BookCategory(Book),
}

impl View
{
    /// Tabs shown for this view. Empty for the home page.
    #[must_use]
    pub const fn tabs(self) -> &'static [Tab]
    {
        match self
        {
            Self::Home => &[],
            Self::PrimaryCategory(category) => category.tabs(),
            Self::BookCategory(book) => book.tabs(),
        }
    }

    /// Title of the view.
    #[must_use]
    pub const fn title(self) -> &'static str
    {
        match self
        {
            Self::Home => "🏠 Home",
            Self::PrimaryCategory(category) => category.label(),
            Self::BookCategory(book) => book.label(),
        }
    }
}

/// Current values of both sidebar selectors.
///
/// At most one of the two is `Some` at a time. The default value has both
/// set to none, which is the home view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState
{
    /// Value of the "Category" selector
    primary: Option<Category>,
    /// Value of the "Book" selector
    book: Option<Book>,
}

impl NavigationState
{
    /// Fresh session state: nothing selected.
    #[must_use]
    pub const fn new() -> Self
    {
        Self {
            primary: None,
            book: None,
        }
    }

    /// Selects a top-level category, clearing the book unless `category`
    /// is none.
    #[must_use]
    pub const fn select_primary(self, category: Option<Category>) -> Self
    {
        let book = if category.is_some() { None } else { self.book };

        Self {
            primary: category,
            book,
        }
    }

    /// Selects a book, clearing the category unless `book` is none.
    #[must_use]
    pub const fn select_book(self, book: Option<Book>) -> Self
    {
        let primary = if book.is_some() { None } else { self.primary };

        Self { primary, book }
    }

    /// The page to show for this state.
    ///
    /// A selected category wins over a selected book; with neither the
    /// home page is shown.
    #[must_use]
    pub const fn current_view(&self) -> View
    {
        match (self.primary, self.book)
        {
            (Some(category), _) => View::PrimaryCategory(category),
            (None, Some(book)) => View::BookCategory(book),
            (None, None) => View::Home,
        }
    }

    /// Value of the "Category" selector.
    #[must_use]
    pub const fn primary(&self) -> Option<Category>
    {
        self.primary
    }

    /// Value of the "Book" selector.
    #[must_use]
    pub const fn book(&self) -> Option<Book>
    {
        self.book
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn fresh_session_is_home()
    {
        let state = NavigationState::new();

        assert_eq!(state.current_view(), View::Home);
        assert_eq!(state, NavigationState::default());
    }

    #[test]
    fn selecting_a_category_shows_it_and_clears_book()
    {
        for category in Category::ALL
        {
            let state = NavigationState::new()
                .select_book(Some(Book::PythonCrashCourse))
                .select_primary(Some(category));

            assert_eq!(state.current_view(), View::PrimaryCategory(category));
            assert_eq!(state.book(), None);
        }
    }

    #[test]
    fn selecting_a_book_shows_it_and_clears_category()
    {
        for book in Book::ALL
        {
            let state = NavigationState::new()
                .select_primary(Some(Category::Notes))
                .select_book(Some(book));

            assert_eq!(state.current_view(), View::BookCategory(book));
            assert_eq!(state.primary(), None);
        }
    }

    #[test]
    fn data_science_then_crash_course_lands_on_the_book()
    {
        let state = NavigationState::new()
            .select_primary(Some(Category::DataScience))
            .select_book(Some(Book::PythonCrashCourse));

        assert_eq!(state.current_view(), View::BookCategory(Book::PythonCrashCourse));
        assert_eq!(state.primary(), None);
    }

    #[test]
    fn most_recent_selection_wins()
    {
        let state = NavigationState::new()
            .select_book(Some(Book::AutomateTheBoringStuff))
            .select_primary(Some(Category::Dashboard))
            .select_book(Some(Book::PythonCrashCourse))
            .select_primary(Some(Category::AdvancedPython));

        assert_eq!(state.current_view(), View::PrimaryCategory(Category::AdvancedPython));

        // Selecting the same thing again changes nothing.
        assert_eq!(state.select_primary(Some(Category::AdvancedPython)), state);
    }

    #[test]
    fn selecting_none_keeps_the_other_selector()
    {
        let state = NavigationState::new()
            .select_book(Some(Book::PythonCrashCourse))
            .select_primary(None);

        assert_eq!(state.current_view(), View::BookCategory(Book::PythonCrashCourse));

        let state = NavigationState::new()
            .select_primary(Some(Category::Notes))
            .select_book(None);

        assert_eq!(state.current_view(), View::PrimaryCategory(Category::Notes));
    }

    #[test]
    fn deselecting_returns_home()
    {
        let state = NavigationState::new()
            .select_primary(Some(Category::StandardLibrary))
            .select_primary(None);

        assert_eq!(state.current_view(), View::Home);
        assert!(state.current_view().tabs().is_empty());
    }
}
