use axum::response::Html;

#[macro_export]
macro_rules! include_res {
    (bytes, $p:expr) => {
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}

/// Substitutes `{key}` placeholders in one pass, so substituted text is
/// never scanned again. Unknown placeholders are left alone. Values go in
/// as given; escape user text first.
pub fn fill<V: AsRef<str>>(template: &str, values: &[(&str, V)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let known = tail[1..]
            .find('}')
            .map(|end| &tail[1..1 + end])
            .and_then(|key| values.iter().find(|(name, _)| *name == key));
        match known {
            Some((key, value)) => {
                out.push_str(value.as_ref());
                rest = &tail[key.len() + 2..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Wraps a page body in the shared layout.
pub fn page(title: &str, body: &str) -> Html<String> {
    let title = escape(title);
    Html(fill(
        include_res!(str, "/pages/layout.html"),
        &[("title", title.as_str()), ("body", body)],
    ))
}

pub fn sorry(what: &str) -> Html<String> {
    let what = escape(what);
    page(
        "Not found",
        &fill(include_res!(str, "/pages/sorry.html"), &[("what", what.as_str())]),
    )
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Markdown to html. Raw html in the source is shown as text, and links or
/// images pointing anywhere but http, https, mailto or a relative path lose
/// their target.
pub fn markdown(source: &str) -> String {
    use pulldown_cmark::{CowStr, Event, Parser, Tag};

    let parser = Parser::new(source).map(|event| match event {
        Event::Html(html) | Event::InlineHtml(html) => Event::Text(html),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) if !safe_url(&dest_url) => {
            Event::Start(Tag::Link { link_type, dest_url: CowStr::Borrowed(""), title, id })
        }
        Event::Start(Tag::Image { link_type, dest_url, title, id }) if !safe_url(&dest_url) => {
            Event::Start(Tag::Image { link_type, dest_url: CowStr::Borrowed(""), title, id })
        }
        _ => event,
    });

    let mut html_output = String::new();
    pulldown_cmark::html::push_html(&mut html_output, parser);
    html_output
}

fn safe_url(url: &str) -> bool {
    match url.find([':', '/', '?', '#']) {
        Some(end) if url[end..].starts_with(':') => {
            matches!(url[..end].to_ascii_lowercase().as_str(), "http" | "https" | "mailto")
        }
        _ => true,
    }
}
