use log::{info, warn};
use serde::Serialize;
use url::Url;

use crate::extractor::{Extractor, Review};
use crate::fetcher::{Fetcher, ScrapeError};
use crate::registry::CategoryRegistry;
use crate::throttle::Throttle;
use crate::urls;

/// A review tagged with where it came from. Field order is the CSV
/// column order.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRecord {
    pub category: String,
    pub product_url: String,
    pub title: String,
    pub rating: String,
    pub body: String,
    pub author: String,
    pub date: String,
}

pub struct Crawler {
    fetcher: Fetcher,
    extractor: Extractor,
    throttle: Throttle,
}

impl Crawler {
    pub fn new(throttle: Throttle) -> Self {
        Crawler {
            fetcher: Fetcher::new(),
            extractor: Extractor::new(),
            throttle,
        }
    }

    /// Walks a product's review pages starting at page 1. The first page
    /// that yields no reviews ends the walk; that is the only
    /// end-of-results signal the sites provide. Fetch errors propagate
    /// and abort the whole run.
    pub fn crawl_product_reviews(
        &self,
        product_url: &str,
        max_pages: u32,
    ) -> Result<Vec<Review>, ScrapeError> {
        let base = urls::normalize(parse_url(product_url)?);
        let mut all_reviews = Vec::new();

        for page in 1..=max_pages {
            let html = self.fetcher.fetch(base.as_str(), &[("page", page.to_string())])?;
            let reviews = self.extractor.parse_reviews(&html);
            if reviews.is_empty() {
                break;
            }
            all_reviews.extend(reviews);
            if page < max_pages {
                self.throttle.pause();
            }
        }

        Ok(all_reviews)
    }

    /// Walks a category's listing pages, crawling every product found on
    /// each page and tagging its reviews with the category key and product
    /// URL. An empty listing page ends the walk. The throttle applies once
    /// per listing page, after its whole product batch.
    pub fn crawl_category(
        &self,
        category_key: &str,
        category_url: &str,
        category_pages: u32,
        review_pages: u32,
    ) -> Result<Vec<ReviewRecord>, ScrapeError> {
        let base = parse_url(category_url)?;
        let mut records = Vec::new();

        for page in 1..=category_pages {
            let html = self.fetcher.fetch(base.as_str(), &[("page", page.to_string())])?;
            let product_urls = self.extractor.parse_product_links(&html, &base);
            if product_urls.is_empty() {
                break;
            }
            info!(
                "Category '{}' page {}: {} products",
                category_key,
                page,
                product_urls.len()
            );

            for product_url in &product_urls {
                let reviews = self.crawl_product_reviews(product_url, review_pages)?;
                records.extend(reviews.into_iter().map(|review| ReviewRecord {
                    category: category_key.to_string(),
                    product_url: product_url.clone(),
                    title: review.title,
                    rating: review.rating,
                    body: review.body,
                    author: review.author,
                    date: review.date,
                }));
            }

            if page < category_pages {
                self.throttle.pause();
            }
        }

        Ok(records)
    }

    /// Crawls every requested category in order. Keys missing from the
    /// registry are skipped, not errors.
    pub fn crawl_categories(
        &self,
        registry: &CategoryRegistry,
        categories: &[String],
        category_pages: u32,
        review_pages: u32,
    ) -> Result<Vec<ReviewRecord>, ScrapeError> {
        let mut records = Vec::new();

        for key in categories {
            let Some(category_url) = registry.get(key) else {
                warn!("Unknown category '{}', skipping", key);
                continue;
            };
            records.extend(self.crawl_category(
                key,
                category_url,
                category_pages,
                review_pages,
            )?);
        }

        Ok(records)
    }
}

fn parse_url(raw: &str) -> Result<Url, ScrapeError> {
    Url::parse(raw).map_err(|e| ScrapeError::InvalidUrl(raw.to_string(), e))
}
