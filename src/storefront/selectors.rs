//! CSS selectors for the Metrotukku search results page.
//!
//! Update this file when the storefront changes its markup, and refresh
//! `tests/fixtures/listing_page.html` to match.

use scraper::Selector;
use std::sync::LazyLock;

/// One listing in the product grid.
pub static ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".product-list-item").unwrap());

/// Product name link; listings without one are ad slots or placeholders.
pub static MAIN_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".productMainLink").unwrap());

/// Product code attribute on the name link.
pub static CODE_ATTR: &str = "data-product-code";

/// Fallback product code text node.
pub static CODE_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".product-code-container").unwrap());

/// Thumbnail image.
pub static THUMB_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".thumb img").unwrap());

/// Displayed price, e.g. "12,50 €".
pub static PRICE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".price").unwrap());

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_selectors_parse() {
        // Forcing each LazyLock catches invalid selector syntax.
        let _ = &*ITEM;
        let _ = &*MAIN_LINK;
        let _ = &*CODE_CONTAINER;
        let _ = &*THUMB_IMAGE;
        let _ = &*PRICE;
    }

    #[test]
    fn test_thumb_image_requires_thumb_ancestor() {
        let html = Html::parse_fragment(
            r#"<div><img src="/a.jpg"><div class="thumb"><img src="/b.jpg"></div></div>"#,
        );
        let srcs: Vec<_> =
            html.select(&THUMB_IMAGE).filter_map(|e| e.value().attr("src")).collect();
        assert_eq!(srcs, vec!["/b.jpg"]);
    }
}
