//! Catalog of the cheat-sheet content.
//!
//! Every category and book known to the hub is listed here, together with
//! the fixed tab set it shows. Paths are relative to the content root and
//! are never discovered by scanning the filesystem.
use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};

/// A single tab: the label shown in the tab strip and the markdown file
/// behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tab
{
    /// Label shown in the tab strip
    pub label: &'static str,
    /// Path of the markdown document, relative to the content root
    pub path: &'static str,
}

/// Shorthand for building the static tab tables.
const fn tab(label: &'static str, path: &'static str) -> Tab
{
    Tab { label, path }
}

/// Top-level categories offered by the "Category" selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category
{
    /// Overview, roadmap and reading list
    Dashboard,
    /// Core language constructs
    CoreLanguage,
    /// Standard library modules
    StandardLibrary,
    /// Data science stack
    DataScience,
    /// Automation and scripting
    Automation,
    /// Advanced language features
    AdvancedPython,
    /// Free-form notes
    Notes,
}

/// Books offered by the "Book" selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Book
{
    /// Python Crash Course chapter notes
    PythonCrashCourse,
    /// Automate the Boring Stuff chapter notes
    AutomateTheBoringStuff,
}

const DASHBOARD_TABS: &[Tab] = &[
    tab("Overview", "dashboard/overview.md"),
    tab("Roadmap", "dashboard/roadmap.md"),
    tab("Books", "dashboard/books.md"),
    tab("Interactivity", "dashboard/interactivity.md"),
];

const CORE_LANGUAGE_TABS: &[Tab] = &[
    tab("Variables", "python_core/variables.md"),
    tab("Dictionaries", "python_core/dicts.md"),
    tab("Sets", "python_core/sets.md"),
    tab("Control Flow", "python_core/control_flow.md"),
    tab("Functions", "python_core/functions.md"),
    tab("Classes", "python_core/classes.md"),
    tab("Exceptions", "python_core/exceptions.md"),
    tab("Modules", "python_core/modules.md"),
    tab("Comprehensions", "python_core/comprehensions.md"),
    tab("Iterators", "python_core/iterators.md"),
    tab("Decorators", "python_core/decorators.md"),
    tab("Context Managers", "python_core/context_managers.md"),
    tab("List", "python_core/list.md"),
    tab("Tuples", "python_core/tuples.md"),
    tab("If", "python_core/if.md"),
];

const STANDARD_LIBRARY_TABS: &[Tab] = &[
    tab("File I/O", "stdlib/fileio.md"),
    tab("OS/Pathlib", "stdlib/os_pathlib.md"),
    tab("Datetime", "stdlib/datetime.md"),
    tab("Math/Random", "stdlib/math_random.md"),
    tab("Regex", "stdlib/regex.md"),
    tab("Collections", "stdlib/collections.md"),
    tab("Itertools", "stdlib/itertools.md"),
    tab("Logging", "stdlib/logging.md"),
    tab("Argparse", "stdlib/argparse.md"),
];

const DATA_SCIENCE_TABS: &[Tab] = &[
    tab("Pandas", "datasci/pandas.md"),
    tab("NumPy", "datasci/numpy.md"),
    tab("Matplotlib", "datasci/matplotlib.md"),
    tab("Seaborn", "datasci/seaborn.md"),
    tab("SciPy", "datasci/scipy.md"),
    tab("Scikit-learn", "datasci/sklearn.md"),
    tab("Jupyter", "datasci/jupyter.md"),
];

const AUTOMATION_TABS: &[Tab] = &[
    tab("Streamlit", "automated/streamlit.md"),
    tab("Excel", "automated/excel.md"),
    tab("CSV & JSON", "automated/csv_json.md"),
    tab("Web", "automated/web.md"),
    tab("Email", "automated/email.md"),
    tab("APIs", "automated/apis.md"),
    tab("PyAutoGUI", "automated/pyautogui.md"),
    tab("Schedule", "automated/schedule.md"),
];

const ADVANCED_TABS: &[Tab] = &[
    tab("Typing", "advanced/typing.md"),
    tab("Dataclasses", "advanced/dataclasses.md"),
    tab("Dunder Methods", "advanced/dunder.md"),
    tab("Concurrency", "advanced/concurrency.md"),
];

const NOTES_TABS: &[Tab] = &[
    tab("General Tips", "notes/general_tips.md"),
    tab("Best Practices", "notes/best_practices.md"),
    tab("Common Pitfalls", "notes/common_pitfalls.md"),
];

const PCC_TABS: &[Tab] = &[
    tab("Ch2: Variables & Data Types", "pcc/ch2_variables.md"),
    tab("Ch3: Lists", "pcc/ch3_lists.md"),
    tab("Ch4: Working with Lists", "pcc/ch4_working_lists.md"),
    tab("Ch5: if Statements", "pcc/ch5_if.md"),
    tab("Ch6: Dictionaries", "pcc/ch6_dicts.md"),
    tab("Ch7: User Input & while Loops", "pcc/ch7_loops.md"),
    tab("Ch8: Functions", "pcc/ch8_functions.md"),
    tab("Ch9: Classes", "pcc/ch9_classes.md"),
    tab("Ch10: Files & Exceptions", "pcc/ch10_files_exceptions.md"),
    tab("Ch11: Testing", "pcc/ch11_testing.md"),
];

const ATBS_TABS: &[Tab] = &[
    tab("Ch1: Python Basics", "atbs/ch1_basics.md"),
    tab("Ch2: Flow Control", "atbs/ch2_flow_control.md"),
    tab("Ch3: Functions", "atbs/ch3_functions.md"),
    tab("Ch4: Lists", "atbs/ch4_lists.md"),
    tab("Ch5: Dictionaries", "atbs/ch5_dicts.md"),
    tab("Ch6: Manipulating Strings", "atbs/ch6_strings.md"),
    tab("Ch7: Regular Expressions", "atbs/ch7_regex.md"),
    tab("Ch8: Input Validation", "atbs/ch8_input_validation.md"),
    tab("Ch9: Reading and Writing Files", "atbs/ch9_files.md"),
];

impl Category
{
    /// Selector order.
    pub const ALL: [Self; 7] = [
        Self::Dashboard,
        Self::CoreLanguage,
        Self::StandardLibrary,
        Self::DataScience,
        Self::Automation,
        Self::AdvancedPython,
        Self::Notes,
    ];

    /// Label shown in the "Category" selector.
    #[must_use]
    pub const fn label(self) -> &'static str
    {
        match self
        {
            Self::Dashboard => "🖥️ Dashboard",
            Self::CoreLanguage => "🐍 Core Language",
            Self::StandardLibrary => "📦 Standard Library",
            Self::DataScience => "📊 Data Science",
            Self::Automation => "🤖 Automation & Scripting",
            Self::AdvancedPython => "🎯 Advanced Python",
            Self::Notes => "📚 Notes",
        }
    }

    /// Short name accepted on the command line.
    #[must_use]
    pub const fn slug(self) -> &'static str
    {
        match self
        {
            Self::Dashboard => "dashboard",
            Self::CoreLanguage => "python_core",
            Self::StandardLibrary => "stdlib",
            Self::DataScience => "datasci",
            Self::Automation => "automated",
            Self::AdvancedPython => "advanced",
            Self::Notes => "notes",
        }
    }

    /// The fixed tab set of this category.
    #[must_use]
    pub const fn tabs(self) -> &'static [Tab]
    {
        match self
        {
            Self::Dashboard => DASHBOARD_TABS,
            Self::CoreLanguage => CORE_LANGUAGE_TABS,
            Self::StandardLibrary => STANDARD_LIBRARY_TABS,
            Self::DataScience => DATA_SCIENCE_TABS,
            Self::Automation => AUTOMATION_TABS,
            Self::AdvancedPython => ADVANCED_TABS,
            Self::Notes => NOTES_TABS,
        }
    }
}

impl Book
{
    /// Selector order.
    pub const ALL: [Self; 2] = [Self::PythonCrashCourse, Self::AutomateTheBoringStuff];

    /// Label shown in the "Book" selector.
    #[must_use]
    pub const fn label(self) -> &'static str
    {
        match self
        {
            Self::PythonCrashCourse => "📘 Python Crash Course",
            Self::AutomateTheBoringStuff => "📗 Automate the Boring Stuff",
        }
    }

    /// Short name accepted on the command line.
    #[must_use]
    pub const fn slug(self) -> &'static str
    {
        match self
        {
            Self::PythonCrashCourse => "pcc",
            Self::AutomateTheBoringStuff => "atbs",
        }
    }

    /// The fixed tab set of this book.
    #[must_use]
    pub const fn tabs(self) -> &'static [Tab]
    {
        match self
        {
            Self::PythonCrashCourse => PCC_TABS,
            Self::AutomateTheBoringStuff => ATBS_TABS,
        }
    }
}

impl fmt::Display for Category
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        formatter.write_str(self.label())
    }
}

impl fmt::Display for Book
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        formatter.write_str(self.label())
    }
}

impl FromStr for Category
{
    type Err = anyhow::Error;

    fn from_str(name: &str) -> Result<Self>
    {
        let name = name.trim();

        Self::ALL
            .into_iter()
            .find(|category| {
                category.slug().eq_ignore_ascii_case(name) || category.label() == name
            })
            .ok_or_else(|| anyhow!("Unknown category: {name}"))
    }
}

impl FromStr for Book
{
    type Err = anyhow::Error;

    fn from_str(name: &str) -> Result<Self>
    {
        let name = name.trim();

        Self::ALL
            .into_iter()
            .find(|book| book.slug().eq_ignore_ascii_case(name) || book.label() == name)
            .ok_or_else(|| anyhow!("Unknown book: {name}"))
    }
}

/// Every document the catalog refers to, in selector and tab order.
#[must_use]
pub fn all_tabs() -> impl Iterator<Item = &'static Tab>
{
    Category::ALL
        .into_iter()
        .flat_map(Category::tabs)
        .chain(Book::ALL.into_iter().flat_map(Book::tabs))
}

#[cfg(test)]
mod tests
{
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn selectors_offer_expected_option_counts()
    {
        // Plus one "None" entry each in the sidebar.
        assert_eq!(Category::ALL.len() + 1, 8);
        assert_eq!(Book::ALL.len() + 1, 3);
    }

    #[test]
    fn every_entry_has_tabs()
    {
        for category in Category::ALL
        {
            assert!(!category.tabs().is_empty(), "{category} has no tabs");
        }
        for book in Book::ALL
        {
            assert!(!book.tabs().is_empty(), "{book} has no tabs");
        }
    }

    #[test]
    fn paths_are_unique_relative_markdown_files()
    {
        let mut seen = HashSet::new();

        for entry in all_tabs()
        {
            assert!(seen.insert(entry.path), "duplicate path {}", entry.path);
            assert!(entry.path.ends_with(".md"));
            assert!(!entry.path.starts_with('/'));
        }
    }

    #[test]
    fn paths_live_under_the_slug_directory()
    {
        for category in Category::ALL
        {
            let prefix = format!("{}/", category.slug());
            assert!(category.tabs().iter().all(|entry| entry.path.starts_with(&prefix)));
        }
        for book in Book::ALL
        {
            let prefix = format!("{}/", book.slug());
            assert!(book.tabs().iter().all(|entry| entry.path.starts_with(&prefix)));
        }
    }

    #[test]
    fn parses_slugs_and_labels()
    {
        assert_eq!("datasci".parse::<Category>().ok(), Some(Category::DataScience));
        assert_eq!("DataSci".parse::<Category>().ok(), Some(Category::DataScience));
        assert_eq!("📊 Data Science".parse::<Category>().ok(), Some(Category::DataScience));
        assert_eq!("pcc".parse::<Book>().ok(), Some(Book::PythonCrashCourse));
        assert_eq!(
            "📗 Automate the Boring Stuff".parse::<Book>().ok(),
            Some(Book::AutomateTheBoringStuff)
        );
    }

    #[test]
    fn rejects_unknown_names()
    {
        assert!("cooking".parse::<Category>().is_err());
        assert!("pcc".parse::<Category>().is_err());
        assert!("datasci".parse::<Book>().is_err());
    }

    #[test]
    fn first_tab_of_core_language_is_variables()
    {
        assert_eq!(
            Category::CoreLanguage.tabs().first(),
            Some(&Tab {
                label: "Variables",
                path: "python_core/variables.md",
            })
        );
    }
}
