//! Affiliate short-link redirects for static hosting

use indexmap::IndexSet;

use crate::content::{AffiliateLink, Resolver};
use crate::helpers;

/// Links that resolve, one per usable short code, in collection order
pub fn targets<'a>(resolver: &Resolver<'a>) -> Vec<&'a AffiliateLink> {
    let codes: IndexSet<&str> = resolver
        .store()
        .affiliate_links
        .iter()
        .map(|l| l.short_code.as_str())
        .collect();

    codes
        .into_iter()
        .filter(|code| {
            let ok = helpers::is_route_segment(code);
            if !ok {
                tracing::warn!("Skipping redirect with unusable short code {:?}", code);
            }
            ok
        })
        .filter_map(|code| match resolver.affiliate_link(code) {
            Ok(link) => Some(link),
            Err(e) => {
                tracing::warn!("Skipping redirect: {}", e);
                None
            }
        })
        .collect()
}

/// A `_redirects` file: one `/go/{code} {url} {status}` line per link
pub fn table(links: &[&AffiliateLink], status: u16) -> String {
    let mut out = String::new();
    for link in links {
        out.push_str(&format!(
            "{} {} {}\n",
            helpers::redirect_path(&link.short_code),
            link.destination_url.trim(),
            status
        ));
    }
    out
}
