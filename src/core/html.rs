// src/core/html.rs
//
// Small helpers over `scraper` shared by the locator strategies and the
// markup normalizer.

use scraper::{ElementRef, Selector};
use tracing::debug;

use super::sanitize::{non_empty, normalize_ws};

/// Compile a CSS selector; a bad selector is logged and treated as "no match".
pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(s) => Some(s),
        Err(e) => {
            debug!("bad selector {css:?}: {e}");
            None
        }
    }
}

/// Visible text of an element, whitespace-collapsed. Text nodes are joined
/// with a space so `<b>Jane</b><i>Doe</i>` reads "Jane Doe".
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<Vec<_>>().join(" "))
}

const HIDDEN: [&str; 4] = ["script", "style", "noscript", "template"];

/// Like [`text_of`], minus anything inside script/style/noscript/template.
/// Used where free text is mined for contact details.
pub fn visible_text(el: ElementRef<'_>) -> String {
    let parts: Vec<&str> = el
        .descendants()
        .filter_map(|n| {
            let text = n.value().as_text()?;
            let hidden = n
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|a| HIDDEN.contains(&a.value().name()));
            (!hidden).then_some(&**text)
        })
        .collect();
    normalize_ws(&parts.join(" "))
}

/// First non-empty text, trying `selectors` in priority order.
/// Within one selector, elements are taken in document order.
pub fn first_text(root: ElementRef<'_>, selectors: &[&str]) -> Option<String> {
    for css in selectors {
        let Some(sel) = selector(css) else { continue };
        if let Some(t) = root.select(&sel).map(text_of).find(|t| !t.is_empty()) {
            return Some(t);
        }
    }
    None
}

/// First `a[href]` under `root` whose href satisfies `keep`.
pub fn first_href(root: ElementRef<'_>, keep: impl Fn(&str) -> bool) -> Option<String> {
    let sel = selector("a[href]")?;
    root.select(&sel)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .find(|h| keep(h))
        .and_then(non_empty)
}

/// Text of every element matching `css`, in document order.
pub fn texts(root: ElementRef<'_>, css: &str) -> Vec<String> {
    match selector(css) {
        Some(sel) => root.select(&sel).map(text_of).collect(),
        None => Vec::new(),
    }
}
