//! Recommendation Key Module
//!
//! Builds the normalized composite key addressing the recommendation cache.

// == Build Key ==
/// Builds a stable key from recommendation filter parameters.
///
/// Every field is tagged and `|`-joined. Absent fields become an empty
/// marker; strings are trimmed and lowercased so that equivalent queries
/// collide.
///
/// ```
/// use product_catalog::cache::build_key;
///
/// assert_eq!(
///     build_key(Some(10), None, Some(" Toy "), None, Some(7)),
///     "min:10|max:|type:toy|category:|age:7"
/// );
/// ```
pub fn build_key(
    min_price: Option<i64>,
    max_price: Option<i64>,
    product_type: Option<&str>,
    category: Option<&str>,
    age: Option<u32>,
) -> String {
    [
        format!("min:{}", number_or_empty(min_price)),
        format!("max:{}", number_or_empty(max_price)),
        format!("type:{}", normalize(product_type)),
        format!("category:{}", normalize(category)),
        format!("age:{}", number_or_empty(age)),
    ]
    .join("|")
}

fn number_or_empty<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn normalize(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_lowercase()).unwrap_or_default()
}
