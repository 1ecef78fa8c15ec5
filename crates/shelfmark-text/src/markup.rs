//! Markup-to-text extraction.

use tracing::debug;

/// Converts HTML markup into readable text.
///
/// Uses `htmd` to produce Markdown, which keeps headings, lists and links
/// legible. If the converter rejects the input, falls back to [`strip_tags`].
#[must_use]
pub fn markup_to_text(markup: &str) -> String {
    if markup.trim().is_empty() {
        return String::new();
    }

    match htmd::convert(markup) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            debug!(error = %e, "htmd conversion failed, stripping tags");
            strip_tags(markup)
        }
    }
}

/// Removes tags and collapses whitespace, keeping only character data.
///
/// Content of `<script>` and `<style>` elements is dropped.
#[must_use]
pub fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start..];
        let Some(end) = after.find('>') else {
            // Unterminated tag: treat the remainder as text.
            out.push_str(after);
            rest = "";
            break;
        };

        let tag = after[1..end].trim().to_ascii_lowercase();
        rest = &after[end + 1..];

        // Skip element bodies only for an opening tag with a matching close.
        let name = tag
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default();
        if matches!(name, "script" | "style") && !tag.ends_with('/') {
            let close = format!("</{name}");
            let skip = rest
                .to_ascii_lowercase()
                .find(&close)
                .and_then(|pos| rest[pos..].find('>').map(|gt| pos + gt + 1));
            if let Some(skip) = skip {
                rest = &rest[skip..];
            }
        }
        out.push(' ');
    }
    out.push_str(rest);

    decode_entities(&out)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
