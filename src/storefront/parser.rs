//! HTML parser for the Metrotukku listing page.

use crate::config::StorefrontConfig;
use crate::storefront::models::ProductRecord;
use crate::storefront::selectors;
use scraper::{ElementRef, Html};
use thiserror::Error;
use tracing::{debug, trace};

/// Markup that does not match the listing layout closely enough to build a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("product link for '{name}' has no href")]
    MissingHref { name: String },

    #[error("no product code for {url}: neither a data-product-code attribute nor a .product-code-container")]
    MissingProductCode { url: String },
}

/// Parser for listing pages.
pub struct Parser {
    config: StorefrontConfig,
}

impl Parser {
    /// Creates a parser that resolves relative links against the configured origin.
    pub fn new(config: StorefrontConfig) -> Self {
        Self { config }
    }

    /// Parses a listing page into records, in page order.
    ///
    /// Listings without a name link are skipped. A listing with a name link but
    /// no resolvable product code aborts the whole parse.
    pub fn parse_listing(&self, html: &str) -> Result<Vec<ProductRecord>, ExtractError> {
        let document = Html::parse_document(html);

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for element in document.select(&selectors::ITEM) {
            match self.parse_item(element)? {
                Some(record) => {
                    trace!("Parsed product: {} - {}", record.code, record.name);
                    records.push(record);
                }
                None => {
                    trace!("Skipping listing without a product link");
                    skipped += 1;
                }
            }
        }

        debug!("Parsed {} products ({} listings skipped)", records.len(), skipped);

        Ok(records)
    }

    /// Builds a record from one `.product-list-item` node.
    fn parse_item(&self, element: ElementRef) -> Result<Option<ProductRecord>, ExtractError> {
        let Some(link) = element.select(&selectors::MAIN_LINK).next() else {
            return Ok(None);
        };

        let name = link.text().collect::<String>().trim().to_string();

        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| ExtractError::MissingHref { name: name.clone() })?;
        let url = self.config.absolute_url(href);

        let code = match link.value().attr(selectors::CODE_ATTR) {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => element
                .select(&selectors::CODE_CONTAINER)
                .next()
                .map(|e| e.text().collect::<String>().trim().to_string())
                .ok_or_else(|| ExtractError::MissingProductCode { url: url.clone() })?,
        };

        let image_url = element
            .select(&selectors::THUMB_IMAGE)
            .next()
            .and_then(|e| e.value().attr("src"))
            .filter(|src| !src.is_empty())
            .map(|src| self.config.absolute_url(src));

        let price_text =
            element.select(&selectors::PRICE).next().map(|e| e.text().collect::<String>());
        let price = parse_price(price_text.as_deref());

        Ok(Some(ProductRecord { name, price, url, image_url, code }))
    }
}

/// Parses a displayed euro price such as "12,50 €".
///
/// Anything that does not yield a finite, non-negative number becomes 0.0.
pub fn parse_price(text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return 0.0;
    };

    let normalized = text.replace('€', "").replace(',', ".");

    match normalized.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> Parser {
        Parser::new(StorefrontConfig::default())
    }

    fn wrap(items: &str) -> String {
        format!("<html><body><div class=\"product-list\">{}</div></body></html>", items)
    }

    // Price parsing tests

    #[test]
    fn test_parse_price_comma_decimal() {
        assert_eq!(parse_price(Some("12,50 €")), 12.50);
        assert_eq!(parse_price(Some("0,99€")), 0.99);
        assert_eq!(parse_price(Some("  7 € ")), 7.0);
        assert_eq!(parse_price(Some("3.10")), 3.10);
    }

    #[test]
    fn test_parse_price_with_surrounding_whitespace() {
        assert_eq!(parse_price(Some("\n    4,20 €\n  ")), 4.20);
        assert_eq!(parse_price(Some("\u{a0}4,20\u{a0}€")), 4.20);
    }

    #[test]
    fn test_parse_price_fallbacks() {
        assert_eq!(parse_price(None), 0.0);
        assert_eq!(parse_price(Some("")), 0.0);
        assert_eq!(parse_price(Some("abc")), 0.0);
        assert_eq!(parse_price(Some("€")), 0.0);
    }

    #[test]
    fn test_parse_price_thousands_separator_is_not_understood() {
        // "1 234,50" has an inner space, which is not a valid float
        assert_eq!(parse_price(Some("1 234,50 €")), 0.0);
        assert_eq!(parse_price(Some("1.234,50 €")), 0.0);
    }

    #[test]
    fn test_parse_price_rejects_non_finite_and_negative() {
        assert_eq!(parse_price(Some("inf")), 0.0);
        assert_eq!(parse_price(Some("NaN")), 0.0);
        assert_eq!(parse_price(Some("-5,00 €")), 0.0);
    }

    // Listing parsing tests

    #[test]
    fn test_parse_full_item() {
        let html = wrap(
            r#"<div class="product-list-item">
                <div class="thumb"><img src="/medias/kahvi.jpg"></div>
                <a class="productMainLink" href="/fi/EUR/product/123" data-product-code="123">
                    Juhla Mokka 500g
                </a>
                <span class="price">5,49 €</span>
            </div>"#,
        );

        let records = parser().parse_listing(&html).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.name, "Juhla Mokka 500g");
        assert_eq!(record.url, "https://www.metrotukku.fi/fi/EUR/product/123");
        assert_eq!(
            record.image_url.as_deref(),
            Some("https://www.metrotukku.fi/medias/kahvi.jpg")
        );
        assert_eq!(record.code, "123");
        assert_eq!(record.price, 5.49);
    }

    #[test]
    fn test_code_falls_back_to_container() {
        let html = wrap(
            r#"<div class="product-list-item">
                <a class="productMainLink" href="/p/9">Sokeri</a>
                <div class="product-code-container"> 998877 </div>
            </div>"#,
        );

        let records = parser().parse_listing(&html).unwrap();
        assert_eq!(records[0].code, "998877");
    }

    #[test]
    fn test_empty_code_attribute_falls_back_to_container() {
        let html = wrap(
            r#"<div class="product-list-item">
                <a class="productMainLink" href="/p/9" data-product-code="">Sokeri</a>
                <div class="product-code-container">555</div>
            </div>"#,
        );

        let records = parser().parse_listing(&html).unwrap();
        assert_eq!(records[0].code, "555");
    }

    #[test]
    fn test_missing_code_is_an_error() {
        let html = wrap(
            r#"<div class="product-list-item">
                <a class="productMainLink" href="/p/9">Sokeri</a>
            </div>"#,
        );

        let err = parser().parse_listing(&html).unwrap_err();
        assert_eq!(
            err,
            ExtractError::MissingProductCode {
                url: "https://www.metrotukku.fi/p/9".to_string()
            }
        );
    }

    #[test]
    fn test_missing_href_is_an_error() {
        let html = wrap(
            r#"<div class="product-list-item">
                <a class="productMainLink" data-product-code="1">Suola</a>
            </div>"#,
        );

        let err = parser().parse_listing(&html).unwrap_err();
        assert!(err.to_string().contains("Suola"));
    }

    #[test]
    fn test_item_without_link_is_skipped() {
        let html = wrap(
            r#"<div class="product-list-item"><span class="price">1,00 €</span></div>
               <div class="product-list-item">
                   <a class="productMainLink" href="/p/2" data-product-code="2">Jauho</a>
               </div>"#,
        );

        let records = parser().parse_listing(&html).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Jauho");
    }

    #[test]
    fn test_missing_price_and_image_default() {
        let html = wrap(
            r#"<div class="product-list-item">
                <div class="thumb"><img alt="no source"></div>
                <a class="productMainLink" href="/p/3" data-product-code="3">Riisi</a>
            </div>"#,
        );

        let records = parser().parse_listing(&html).unwrap();
        assert_eq!(records[0].price, 0.0);
        assert!(records[0].image_url.is_none());
    }

    #[test]
    fn test_empty_image_src_is_absent() {
        let html = wrap(
            r#"<div class="product-list-item">
                <div class="thumb"><img src=""></div>
                <a class="productMainLink" href="/p/3" data-product-code="3">Riisi</a>
            </div>"#,
        );

        let records = parser().parse_listing(&html).unwrap();
        assert!(records[0].image_url.is_none());
    }

    #[test]
    fn test_unparsable_price_defaults_to_zero() {
        let html = wrap(
            r#"<div class="product-list-item">
                <a class="productMainLink" href="/p/4" data-product-code="4">Pasta</a>
                <span class="price">Kysy hintaa</span>
            </div>"#,
        );

        let records = parser().parse_listing(&html).unwrap();
        assert_eq!(records[0].price, 0.0);
    }

    #[test]
    fn test_uses_configured_origin() {
        let config =
            StorefrontConfig { origin: "http://localhost:4000".to_string(), ..Default::default() };
        let html = wrap(
            r#"<div class="product-list-item">
                <a class="productMainLink" href="/fi/EUR/product/123" data-product-code="1">X</a>
            </div>"#,
        );

        let records = Parser::new(config).parse_listing(&html).unwrap();
        assert_eq!(records[0].url, "http://localhost:4000/fi/EUR/product/123");
    }

    #[test]
    fn test_parse_empty_page() {
        let records = parser().parse_listing("<html><body></body></html>").unwrap();
        assert!(records.is_empty());
    }
}
