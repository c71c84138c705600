use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

use crate::urls;

/// One customer review as it appears on a product page, before it is
/// tagged with the category and product it came from. All fields are
/// free text; `rating` keeps the raw leading token of the stars display
/// (e.g. "4.5") rather than a parsed number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub title: String,
    pub rating: String,
    pub body: String,
    pub author: String,
    pub date: String,
}

pub struct Extractor {
    // Ordered fallback chains: each selector is tried in turn until one
    // yields a non-empty match set, so new site layouts slot in by
    // appending a selector rather than touching the traversal.
    review_blocks: Vec<Selector>,
    product_anchors: Vec<Selector>,
    title: Selector,
    body: Selector,
    stars: Selector,
    review_meta: Selector,
    meta_span: Selector,
}

impl Extractor {
    pub fn new() -> Self {
        Extractor {
            review_blocks: vec![
                Selector::parse("article.-review, div.-review, article.review, div.review")
                    .unwrap(),
                Selector::parse("section.card.aim article").unwrap(),
            ],
            product_anchors: vec![
                Selector::parse("a.core").unwrap(),
                Selector::parse("article a").unwrap(),
            ],
            title: Selector::parse("h3").unwrap(),
            body: Selector::parse("p").unwrap(),
            stars: Selector::parse(".stars").unwrap(),
            review_meta: Selector::parse("div.-df.-j-bet.-i-ctr.-gy5").unwrap(),
            meta_span: Selector::parse("span").unwrap(),
        }
    }

    /// Extracts all reviews found on one page, in document order. Missing
    /// sub-elements degrade to empty strings; a block with neither a title
    /// nor a body is dropped entirely.
    pub fn parse_reviews(&self, html: &str) -> Vec<Review> {
        let document = Html::parse_document(html);
        let mut reviews = Vec::new();

        for block in select_with_fallback(&document, &self.review_blocks) {
            let title = first_text(block, &self.title);
            let body = first_text(block, &self.body);

            let rating = first_text(block, &self.stars)
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string();

            let (date, author) = self.parse_meta(block);

            if title.is_empty() && body.is_empty() {
                continue;
            }

            reviews.push(Review {
                title,
                rating,
                body,
                author,
                date,
            });
        }

        reviews
    }

    // The metadata container holds exactly two inline spans: date first,
    // reviewer second. An optional "by " prefix on the reviewer is dropped.
    fn parse_meta(&self, block: ElementRef) -> (String, String) {
        let Some(meta) = block.select(&self.review_meta).next() else {
            return (String::new(), String::new());
        };

        let mut spans = meta.select(&self.meta_span);
        let date = spans.next().map(element_text).unwrap_or_default();
        let author = spans
            .next()
            .map(|span| strip_author_prefix(&element_text(span)))
            .unwrap_or_default();

        (date, author)
    }

    /// Extracts product links from a category listing page, resolved
    /// against `base_url` and normalized. De-duplicated by normalized URL,
    /// first occurrence wins, document order preserved.
    pub fn parse_product_links(&self, html: &str, base_url: &Url) -> Vec<String> {
        let document = Html::parse_document(html);
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for anchor in select_with_fallback(&document, &self.product_anchors) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if href.is_empty() {
                continue;
            }
            let Some(resolved) = urls::resolve(base_url, href) else {
                continue;
            };
            let link = urls::normalize(resolved).to_string();
            if seen.insert(link.clone()) {
                links.push(link);
            }
        }

        links
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Extractor::new()
    }
}

fn select_with_fallback<'a>(document: &'a Html, chain: &[Selector]) -> Vec<ElementRef<'a>> {
    for selector in chain {
        let matched: Vec<_> = document.select(selector).collect();
        if !matched.is_empty() {
            return matched;
        }
    }
    Vec::new()
}

fn first_text(block: ElementRef, selector: &Selector) -> String {
    block
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

fn element_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_author_prefix(text: &str) -> String {
    match text.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("by ") => text[3..].trim().to_string(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review_block(title: &str, body: &str) -> String {
        format!(
            r#"<article class="-review">
                 <h3>{title}</h3>
                 <div class="stars _s">4.5 out of 5</div>
                 <p>{body}</p>
                 <div class="-df -j-bet -i-ctr -gy5">
                   <span>12-01-2024</span><span>by Jane Doe</span>
                 </div>
               </article>"#
        )
    }

    #[test]
    fn extracts_all_fields() {
        let html = review_block("Great phone", "Really solid build.");
        let reviews = Extractor::new().parse_reviews(&html);
        assert_eq!(reviews.len(), 1);
        let r = &reviews[0];
        assert_eq!(r.title, "Great phone");
        assert_eq!(r.body, "Really solid build.");
        assert_eq!(r.rating, "4.5");
        assert_eq!(r.date, "12-01-2024");
        assert_eq!(r.author, "Jane Doe");
    }

    #[test]
    fn drops_block_with_empty_title_and_body() {
        let html = r#"<div class="review">
                        <div class="stars">5 stars</div>
                      </div>"#;
        assert!(Extractor::new().parse_reviews(html).is_empty());
    }

    #[test]
    fn keeps_body_only_block_with_empty_title() {
        let html = r#"<div class="-review"><p>Does the job.</p></div>"#;
        let reviews = Extractor::new().parse_reviews(html);
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].title, "");
        assert_eq!(reviews[0].body, "Does the job.");
        assert_eq!(reviews[0].rating, "");
        assert_eq!(reviews[0].author, "");
        assert_eq!(reviews[0].date, "");
    }

    #[test]
    fn author_prefix_is_stripped_case_insensitively() {
        for (raw, expected) in [
            ("by Jane Doe", "Jane Doe"),
            ("By Jane Doe", "Jane Doe"),
            ("BY Jane Doe", "Jane Doe"),
            ("Jane Doe", "Jane Doe"),
            ("Bystander", "Bystander"),
        ] {
            assert_eq!(strip_author_prefix(raw), expected, "input {raw:?}");
        }
    }

    #[test]
    fn rating_keeps_first_token_only() {
        let html = review_block("T", "B");
        let reviews = Extractor::new().parse_reviews(&html);
        assert_eq!(reviews[0].rating, "4.5");
    }

    #[test]
    fn falls_back_to_secondary_review_selector() {
        let html = r#"<section class="card aim">
                        <article><h3>Okay product</h3></article>
                      </section>"#;
        let reviews = Extractor::new().parse_reviews(html);
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].title, "Okay product");
    }

    #[test]
    fn product_links_are_resolved_and_deduplicated() {
        let base = Url::parse("https://x.test/category/phones").unwrap();
        let html = r#"
            <a class="core" href="/product/beta">Beta</a>
            <a class="core" href="/product/alpha?ref=promo">Alpha</a>
            <a class="core" href="/product/beta#reviews">Beta again</a>
            <a class="core" href="">ignored</a>
        "#;
        let links = Extractor::new().parse_product_links(html, &base);
        assert_eq!(
            links,
            vec![
                "https://x.test/product/beta".to_string(),
                "https://x.test/product/alpha".to_string(),
            ]
        );
    }

    #[test]
    fn product_links_fall_back_to_article_anchors() {
        let base = Url::parse("https://x.test/").unwrap();
        let html = r#"<article><a href="/product/gamma">Gamma</a></article>"#;
        let links = Extractor::new().parse_product_links(html, &base);
        assert_eq!(links, vec!["https://x.test/product/gamma".to_string()]);
    }

    #[test]
    fn no_links_on_page_yields_empty() {
        let base = Url::parse("https://x.test/").unwrap();
        let html = "<html><body><p>nothing here</p></body></html>";
        assert!(Extractor::new().parse_product_links(html, &base).is_empty());
    }
}
