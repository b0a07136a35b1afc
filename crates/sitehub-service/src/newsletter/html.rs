//! Plain-text rendering of newsletter HTML.

/// Remove markup tags, keeping the text between them.
///
/// Comments and the contents of `<script>`/`<style>` elements are dropped.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        if let Some(comment) = tail.strip_prefix("<!--") {
            rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
            continue;
        }

        let Some(end) = tail.find('>') else {
            // Unterminated tag: keep it as text.
            out.push_str(tail);
            return out;
        };
        let tag = tail[1..end].trim_start_matches('/').to_ascii_lowercase();
        rest = &tail[end + 1..];

        for raw in ["script", "style"] {
            let opens_raw = tag.starts_with(raw)
                && !tail.starts_with("</")
                && tag[raw.len()..]
                    .chars()
                    .next()
                    .is_none_or(|c| c.is_whitespace() || c == '/');
            if opens_raw {
                let closing = format!("</{raw}");
                rest = rest
                    .to_ascii_lowercase()
                    .find(&closing)
                    .and_then(|i| rest[i..].find('>').map(|j| &rest[i + j + 1..]))
                    .unwrap_or("");
            }
        }
    }
    out.push_str(rest);
    out
}
