//! Home page: the profile block shown when no selector is active.
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::assets::{Assets, ProfileImage, Resume};
use crate::catalog::{self, Book, Category};

const HEADING_STYLE: Style = Style::new()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

const LABEL_STYLE: Style = Style::new().fg(Color::Gray);

const LINK_STYLE: Style = Style::new()
    .fg(Color::Cyan)
    .add_modifier(Modifier::UNDERLINED);

const NOTICE_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::ITALIC);

const BIO: [&str; 3] = [
    "Systems developer working mostly in Python, with a habit of writing",
    "everything down. This hub collects the cheat sheets and book notes",
    "built up along the way. Pick a category or a book in the sidebar.",
];

const LINKS: [(&str, &str); 3] = [
    ("Python docs", "https://docs.python.org/3/"),
    ("Python Crash Course", "https://nostarch.com/python-crash-course-3rd-edition"),
    ("Automate the Boring Stuff", "https://automatetheboringstuff.com/"),
];

/// Builds the lines of the home page.
///
/// # Arguments
///
/// * `assets` - Result of probing the optional profile assets
#[must_use]
pub fn profile_lines(assets: &Assets) -> Vec<Line<'static>>
{
    let mut lines = vec![
        Line::from(Span::styled("🐍 MG Systems Dev Hub", HEADING_STYLE)),
        Line::default(),
    ];

    lines.extend(BIO.iter().map(|text| Line::raw(*text)));
    lines.push(Line::default());

    let image = match &assets.profile_image
    {
        ProfileImage::Local(path) => path.display().to_string(),
        ProfileImage::Placeholder(url) => (*url).to_owned(),
    };
    lines.push(field("Profile image", image));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled("Metrics", HEADING_STYLE)));
    lines.push(field("Categories", Category::ALL.len().to_string()));
    lines.push(field("Books", Book::ALL.len().to_string()));
    lines.push(field("Cheat sheets", catalog::all_tabs().count().to_string()));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled("Links", HEADING_STYLE)));
    lines.extend(LINKS.iter().map(|(label, url)| {
        Line::from(vec![
            Span::styled(format!("  {label}: "), LABEL_STYLE),
            Span::styled(*url, LINK_STYLE),
        ])
    }));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled("Résumé", HEADING_STYLE)));
    lines.push(match &assets.resume
    {
        Resume::Available { path, size } => field("File", format!("{} ({size} bytes)", path.display())),
        Resume::Unavailable => Line::from(Span::styled("  Résumé not available yet.", NOTICE_STYLE)),
    });

    lines
}

/// A "label: value" line.
fn field(label: &str, value: String) -> Line<'static>
{
    Line::from(vec![
        Span::styled(format!("  {label}: "), LABEL_STYLE),
        Span::raw(value),
    ])
}

#[cfg(test)]
mod tests
{
    use std::path::PathBuf;

    use super::*;
    use crate::assets::PLACEHOLDER_IMAGE_URL;
    use crate::ui::markdown::line_text;

    fn text_of(lines: &[Line<'_>]) -> String
    {
        lines
            .iter()
            .map(line_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn missing_assets_show_fallbacks()
    {
        let assets = Assets {
            profile_image: ProfileImage::Placeholder(PLACEHOLDER_IMAGE_URL),
            resume: Resume::Unavailable,
        };
        let text = text_of(&profile_lines(&assets));

        assert!(text.contains(PLACEHOLDER_IMAGE_URL));
        assert!(text.contains("Résumé not available yet."));
    }

    #[test]
    fn present_resume_is_listed()
    {
        let assets = Assets {
            profile_image: ProfileImage::Local(PathBuf::from("/hub/assets/profile.png")),
            resume: Resume::Available {
                path: PathBuf::from("/hub/assets/resume.pdf"),
                size: 2048,
            },
        };
        let text = text_of(&profile_lines(&assets));

        assert!(text.contains("/hub/assets/profile.png"));
        assert!(text.contains("/hub/assets/resume.pdf (2048 bytes)"));
        assert!(!text.contains("not available"));
    }

    #[test]
    fn metrics_count_the_catalog()
    {
        let assets = Assets {
            profile_image: ProfileImage::Placeholder(PLACEHOLDER_IMAGE_URL),
            resume: Resume::Unavailable,
        };
        let text = text_of(&profile_lines(&assets));

        assert!(text.contains("Categories: 7"));
        assert!(text.contains("Books: 2"));
        assert!(text.contains(&format!("Cheat sheets: {}", catalog::all_tabs().count())));
    }
}
