/// Ordered, immutable mapping from category key to its canonical listing
/// URL. Built once at startup and injected into the crawler, so tests can
/// substitute a stub registry pointing at local endpoints.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    entries: Vec<(String, String)>,
}

impl CategoryRegistry {
    /// The built-in catalog of crawlable categories.
    pub fn default_catalog() -> Self {
        [
            ("electronics", "https://www.konga.com/category/electronics-5261"),
            ("home_office", "https://www.konga.com/category/home-kitchen-602"),
            (
                "health_beauty_personal_care",
                "https://www.konga.com/category/beauty-health-personal-care-4",
            ),
            ("phones_tablets", "https://www.konga.com/category/phones-tablets-5294"),
            ("fashion", "https://www.konga.com/category/konga-fashion-1259"),
        ]
        .into_iter()
        .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, url)| url.as_str())
    }

    /// Keys in declaration order; the default CLI category set.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, U: Into<String>> FromIterator<(K, U)> for CategoryRegistry {
    fn from_iter<T: IntoIterator<Item = (K, U)>>(iter: T) -> Self {
        CategoryRegistry {
            entries: iter
                .into_iter()
                .map(|(key, url)| (key.into(), url.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_lookup() {
        let registry = CategoryRegistry::default_catalog();
        assert_eq!(registry.len(), 5);
        assert_eq!(
            registry.get("electronics"),
            Some("https://www.konga.com/category/electronics-5261")
        );
        assert_eq!(registry.get("no_such_category"), None);
    }

    #[test]
    fn keys_preserve_declaration_order() {
        let registry: CategoryRegistry =
            [("b", "https://x.test/b"), ("a", "https://x.test/a")]
                .into_iter()
                .collect();
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
