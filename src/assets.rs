//! Optional static assets shown on the home page.
//!
//! Both the profile image and the résumé may be absent; the home page then
//! falls back to a placeholder instead of failing.
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the profile image, relative to the content root.
pub const PROFILE_IMAGE_PATH: &str = "assets/profile.png";

/// Location of the résumé, relative to the content root.
pub const RESUME_PATH: &str = "assets/resume.pdf";

/// Image shown when no profile image is present.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/150";

/// What the home page shows for the profile image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileImage
{
    /// Image found on disk
    Local(PathBuf),
    /// No image; use the placeholder URL
    Placeholder(&'static str),
}

/// What the home page shows for the résumé.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resume
{
    /// Résumé found on disk, with its size in bytes
    Available
    {
        /// Full path of the file
        path: PathBuf,
        /// Size of the file
        size: u64,
    },
    /// No résumé; show a notice instead
    Unavailable,
}

/// Result of probing the optional assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets
{
    /// Profile image or its placeholder
    pub profile_image: ProfileImage,
    /// Résumé or the notice
    pub resume: Resume,
}

impl Assets
{
    /// Looks for the optional assets under `root`.
    ///
    /// Any failure to stat a file is treated as absence.
    #[must_use]
    pub fn locate(root: &Path) -> Self
    {
        let image = root.join(PROFILE_IMAGE_PATH);
        let profile_image = if image.is_file()
        {
            ProfileImage::Local(image)
        }
        else
        {
            ProfileImage::Placeholder(PLACEHOLDER_IMAGE_URL)
        };

        let resume_path = root.join(RESUME_PATH);
        let resume = match fs::metadata(&resume_path)
        {
            Ok(meta) if meta.is_file() => Resume::Available {
                path: resume_path,
                size: meta.len(),
            },
            _ => Resume::Unavailable,
        };

        Self {
            profile_image,
            resume,
        }
    }
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn absent_assets_fall_back()
    {
        let dir = TempDir::new().unwrap();
        let assets = Assets::locate(dir.path());

        assert_eq!(assets.profile_image, ProfileImage::Placeholder(PLACEHOLDER_IMAGE_URL));
        assert_eq!(assets.resume, Resume::Unavailable);
    }

    #[test]
    fn present_assets_are_found()
    {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join(PROFILE_IMAGE_PATH), b"png").unwrap();
        fs::write(dir.path().join(RESUME_PATH), b"%PDF-1.7").unwrap();

        let assets = Assets::locate(dir.path());

        assert_eq!(
            assets.profile_image,
            ProfileImage::Local(dir.path().join(PROFILE_IMAGE_PATH))
        );
        assert_eq!(
            assets.resume,
            Resume::Available {
                path: dir.path().join(RESUME_PATH),
                size: 8,
            }
        );
    }
}
