//! Resolution of page links against an API base URL.

use url::Url;

use crate::PaginationError;

/// Resolve a page link to an absolute URL.
///
/// Absolute links are used verbatim. Relative links are appended to the base
/// URL path, so a base of `https://host/api` and a link of `/items/?page=2`
/// resolve to `https://host/api/items/?page=2` rather than replacing the base
/// path.
///
/// # Errors
///
/// Returns [`PaginationError::EmptyLink`] for blank links and
/// [`PaginationError::InvalidLink`] when the result is not a valid URL.
///
/// # Examples
///
/// ```
/// use pagination::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://console.invalid/api/").map_err(|e| e.to_string())?;
/// let url = resolve_link(&base, "/associates/?page=2").map_err(|e| e.to_string())?;
/// assert_eq!(url.as_str(), "https://console.invalid/api/associates/?page=2");
/// # Ok::<(), String>(())
/// ```
pub fn resolve_link(base: &Url, link: &str) -> Result<Url, PaginationError> {
    let trimmed = link.trim();
    if trimmed.is_empty() {
        return Err(PaginationError::EmptyLink);
    }

    match Url::parse(trimmed) {
        Ok(absolute) => Ok(absolute),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let joined = format!(
                "{}/{}",
                base.as_str().trim_end_matches('/'),
                trimmed.trim_start_matches('/')
            );
            Url::parse(&joined).map_err(|error| invalid_link(trimmed, &error))
        }
        Err(error) => Err(invalid_link(trimmed, &error)),
    }
}

fn invalid_link(link: &str, error: &url::ParseError) -> PaginationError {
    PaginationError::InvalidLink {
        link: link.to_owned(),
        message: error.to_string(),
    }
}
