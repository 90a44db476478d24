// Cache path utilities.
// Constructs one cache file path per screen name and reply setting.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/tweetbox on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tweetbox").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to a user's timelines directory.
pub fn user_dir(root: &Path, screen_name: &str) -> PathBuf {
    root.join("timelines").join(sanitize_name(screen_name))
}

/// Path to the cached timeline for a screen name and reply setting.
pub fn timeline_path(root: &Path, screen_name: &str, include_replies: bool) -> PathBuf {
    let file = if include_replies {
        "replies.json"
    } else {
        "no_replies.json"
    };
    user_dir(root, screen_name).join(file)
}

/// Sanitize a name for use in filesystem paths.
/// Screen names are case-insensitive upstream, so they are lowercased.
/// Distinct inputs may collide (`a.b` and `a_b`); real screen names only
/// contain letters, digits and underscores, which never collide.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .trim_start_matches('@')
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.' => '_',
            _ => c.to_ascii_lowercase(),
        })
        .collect();
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("simple"), "simple");
        assert_eq!(sanitize_name("With/Slash"), "with_slash");
        assert_eq!(sanitize_name("@DustedDesign"), "dusteddesign");
        assert_eq!(sanitize_name(".."), "__");
        assert_eq!(sanitize_name(""), "_");
        assert_eq!(sanitize_name("Real_Name_42"), "real_name_42");
    }

    #[test]
    fn test_timeline_paths() {
        let root = Path::new("/cache");

        let p = timeline_path(root, "bob", false);
        assert!(p.ends_with("timelines/bob/no_replies.json"));

        let p = timeline_path(root, "Bob", true);
        assert!(p.ends_with("timelines/bob/replies.json"));
    }

    #[test]
    fn test_distinct_users_get_distinct_paths() {
        let root = Path::new("/cache");
        assert_ne!(
            timeline_path(root, "alice", false),
            timeline_path(root, "bob", false)
        );
        assert_ne!(
            timeline_path(root, "alice", false),
            timeline_path(root, "alice", true)
        );
    }
}
