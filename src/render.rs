// Post text linkification.
// Wraps URLs, @mentions and #hashtags in anchor markup.

use std::sync::LazyLock;

use regex::Regex;

use crate::twitter::Post;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(https?://[^\s"<>]+)"#).expect("valid URL pattern"));

static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(^|\s)@([^\s"<:]*)"#).expect("valid mention pattern"));

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(^|\s)#([^\s"<:]*)"#).expect("valid hashtag pattern"));

/// Convert URLs, mentions and hashtags in `text` to hyperlinks.
///
/// Runs URLs first, then mentions, then hashtags. Not idempotent: feeding
/// rendered output back in wraps the URLs inside `href` attributes again, so
/// text must only be rendered once.
pub fn render(text: &str) -> String {
    let text = URL.replace_all(text, r#"<a href="${1}">${1}</a>"#);
    let text = MENTION
        .replace_all(&text, r#"${1}<a href="http://twitter.com/${2}">@${2}</a>"#)
        .into_owned();
    HASHTAG
        .replace_all(&text, r#"${1}<a href="http://twitter.com/search?q=%23${2}">#${2}</a>"#)
        .into_owned()
}

/// Render a post's text in place.
pub fn render_post(post: &mut Post) {
    post.text = render(&post.text);
}
