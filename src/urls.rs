use url::Url;

/// Strips the query string and fragment, leaving scheme/host/path untouched.
/// Used both to canonicalize a product page before paginating its reviews
/// and to de-duplicate discovered product links.
pub fn normalize(mut url: Url) -> Url {
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Resolves a possibly-relative href against a base URL. Unresolvable
/// hrefs yield None rather than an error; callers just skip them.
pub fn resolve(base: &Url, href: &str) -> Option<Url> {
    base.join(href).ok()
}
