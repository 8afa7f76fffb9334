//! Tag input handling.
//!
//! Tags are an ordered list. Duplicates are kept as entered; search only
//! cares about membership.

/// Splits comma-separated input into tags, trimming each and dropping empties.
///
/// ```
/// use folio::tags::parse_tags;
///
/// assert_eq!(parse_tags("work, urgent,,  home "), vec!["work", "urgent", "home"]);
/// assert_eq!(parse_tags("a,a"), vec!["a", "a"]);
/// assert!(parse_tags(" , ").is_empty());
/// ```
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn format_tags(tags: &[String]) -> String {
    tags.join(", ")
}
