//! Shared HTML components used across all pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde_json::Value;

use vitrina_content::{Lang, translate};

/// Inline CSS for all pages.
///
/// Flat, modern design. No borders/shadows, spacing and subtle background
/// shifts for hierarchy.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#fafafa;--fg:#111;--fg2:#555;--fg3:#999;--accent:#0a6e4f;--accent-hover:#08593f;--surface:#fff;--border:rgba(10,110,79,.15)}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:1.5rem 1rem}
main{max-width:960px;width:100%;flex:1}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}
img{max-width:100%;height:auto}

nav{display:flex;gap:1.25rem;align-items:baseline;max-width:960px;width:100%;padding-bottom:1.5rem}
nav .brand{font-weight:700;font-size:1.15rem;color:var(--fg);margin-right:auto}
nav .lang{font-size:.85rem;color:var(--fg3)}

h1{font-size:1.75rem;font-weight:700;letter-spacing:-.02em;margin-bottom:1rem}
h2{font-size:1.25rem;font-weight:600;margin:2rem 0 .75rem}

.card{padding:1.5rem;border:1px solid var(--border);border-radius:10px;background:var(--surface)}
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(260px,1fr));gap:1rem}
.project-card{display:block;color:var(--fg);border:1px solid var(--border);border-radius:10px;overflow:hidden;transition:border-color .15s}
.project-card:hover{border-color:var(--accent);text-decoration:none}
.project-card img{width:100%;aspect-ratio:16/10;object-fit:cover;display:block}
.project-card .body{padding:.85rem 1rem}
.project-card .title{font-weight:600}
.project-card .meta{font-size:.85rem;color:var(--fg3)}

.hero{width:100%;border-radius:10px;overflow:hidden;margin-bottom:1.5rem}
.hero img{width:100%;aspect-ratio:21/9;object-fit:cover;display:block}

.stats{display:flex;gap:2rem;flex-wrap:wrap;margin:1rem 0}
.stat .value{font-size:1.6rem;font-weight:700;color:var(--accent)}
.stat .label{font-size:.85rem;color:var(--fg3)}

.team{display:grid;grid-template-columns:repeat(auto-fill,minmax(200px,1fr));gap:1rem}
.member{text-align:center;padding:1rem;border:1px solid var(--border);border-radius:10px;background:var(--surface)}
.member img{width:96px;height:96px;border-radius:50%;object-fit:cover;margin-bottom:.5rem}
.member .name{font-weight:600}
.member .position{font-size:.85rem;color:var(--fg3)}
.member .bio{font-size:.9rem;color:var(--fg2);margin-top:.5rem}

.detail-body{margin:1rem 0;color:var(--fg2);line-height:1.75;white-space:pre-wrap}
.gallery{display:grid;grid-template-columns:repeat(auto-fill,minmax(220px,1fr));gap:.5rem;margin:1rem 0}
.gallery img{width:100%;aspect-ratio:4/3;object-fit:cover;border-radius:8px}

.empty{color:var(--fg3);padding:2rem 0}
.back{display:inline-block;margin-bottom:1rem;font-size:.9rem}

.footer{text-align:center;margin-top:2rem;padding-top:.75rem;font-size:.8rem;color:var(--fg3);width:100%;max-width:960px}

@media(prefers-color-scheme:dark){
:root{--bg:#0a0f0d;--fg:#e5e5e5;--fg2:#a0a0a0;--fg3:#666;--accent:#34d399;--accent-hover:#6ee7b7;--surface:#111816;--border:rgba(52,211,153,.2)}
}
"#;

/// Render the full HTML page shell with `<head>`, navigation, and body
/// content. The navigation labels come from the translation catalog for the
/// requested language, and every link carries the `lang` query parameter so
/// the choice sticks across pages.
pub fn layout(site_name: &str, lang: Lang, title: &str, content: Markup) -> Markup {
    let suffix = format!("?lang={}", lang.code());
    html! {
        (DOCTYPE)
        html lang=(lang.code()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | " (site_name) }
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                nav {
                    a class="brand" href={"/" (suffix)} { (site_name) }
                    a href={"/" (suffix)} { (translate(lang, "nav.home")) }
                    a href={"/projects" (suffix)} { (translate(lang, "nav.projects")) }
                    a href={"/team" (suffix)} { (translate(lang, "nav.team")) }
                    span class="lang" {
                        a href={"?lang=es"} { "ES" } " / " a href={"?lang=en"} { "EN" }
                    }
                }
                main { (content) }
                footer class="footer" { "© " (site_name) }
            }
        }
    }
}

/// Extract the plain text from a rich-text document value.
///
/// Walks the node tree collecting every `value` leaf, joining paragraphs
/// with blank lines. Anything that is not a rich-text document (a bare
/// string, null) degrades gracefully.
pub fn rich_text_plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => {
            let mut paragraphs = Vec::new();
            collect_text(value, &mut paragraphs);
            paragraphs.join("\n\n")
        }
        _ => String::new(),
    }
}

fn collect_text(node: &Value, out: &mut Vec<String>) {
    match node {
        Value::Array(items) => {
            for item in items {
                collect_text(item, out);
            }
        }
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("value") {
                if !text.trim().is_empty() {
                    out.push(text.trim().to_string());
                }
            }
            if let Some(content) = map.get("content") {
                collect_text(content, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rich_text_extracts_paragraphs() {
        let document = json!({
            "nodeType": "document",
            "content": [
                {"nodeType": "paragraph", "content": [{"nodeType": "text", "value": "First."}]},
                {"nodeType": "paragraph", "content": [{"nodeType": "text", "value": "Second."}]}
            ]
        });
        assert_eq!(rich_text_plain(&document), "First.\n\nSecond.");
    }

    #[test]
    fn rich_text_handles_plain_string() {
        assert_eq!(rich_text_plain(&json!("just text")), "just text");
        assert_eq!(rich_text_plain(&Value::Null), "");
    }

    #[test]
    fn layout_escapes_dynamic_values() {
        let page = layout("<b>Site</b>", Lang::Es, "Title", html! { p { "hola" } });
        let rendered = page.into_string();
        assert!(rendered.contains("&lt;b&gt;Site&lt;/b&gt;"));
        assert!(!rendered.contains("<b>Site</b>"));
    }

    #[test]
    fn layout_nav_follows_language() {
        let en = layout("Site", Lang::En, "T", html! {}).into_string();
        assert!(en.contains("lang=\"en\""));
        assert!(en.contains(">Projects<"));
        let es = layout("Site", Lang::Es, "T", html! {}).into_string();
        assert!(es.contains(">Proyectos<"));
    }
}
