//! Active-link detection.

use crate::element::Node;
use crate::link::{CompatLinkDescriptor, LinkTarget, find_first_link};
use crate::path::{MatchStrategy, evaluate_path_match, resolve_absolute_path_from_relative};

/// Strips `?query` and `#fragment`.
fn pathname_of(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    &target[..end]
}

/// Whether the first link among `children` points at `current_pathname`.
///
/// A relative `to` is resolved against the current pathname first. Returns
/// `None` when `children` contain no link.
pub fn use_link_path_match(children: &[Node], current_pathname: &str, strategy: MatchStrategy) -> Option<bool> {
    let link = find_first_link(children)?;
    let descriptor = CompatLinkDescriptor::inspect(link)?;

    let expected = match &descriptor.target {
        LinkTarget::To(to) if !to.starts_with('/') => resolve_absolute_path_from_relative(current_pathname, pathname_of(to)),
        target => pathname_of(target.value()?).to_string(),
    };
    let matched = evaluate_path_match(pathname_of(current_pathname), &expected, strategy);
    log::trace!("link match: {current_pathname} vs {expected} ({strategy}): {matched}");
    Some(matched)
}
