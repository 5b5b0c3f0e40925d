//! String conversion utilities.

/// Converts a blank string to `None`, otherwise returns `Some(value)`.
///
/// Catalog feeds often send `""` or whitespace for a missing description.
///
/// # Examples
///
/// ```
/// use streamview_domain::common::none_if_empty;
///
/// assert_eq!(none_if_empty("hello"), Some("hello"));
/// assert_eq!(none_if_empty(""), None);
/// assert_eq!(none_if_empty("   "), None);
/// ```
pub fn none_if_empty(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Owned version of [`none_if_empty`] for when you have a `String`.
///
/// # Examples
///
/// ```
/// use streamview_domain::common::some_if_not_empty;
///
/// assert_eq!(some_if_not_empty("hello".to_string()), Some("hello".to_string()));
/// assert_eq!(some_if_not_empty(String::new()), None);
/// ```
pub fn some_if_not_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
