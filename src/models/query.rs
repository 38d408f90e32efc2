//! Recommendation query model
//!
//! Filter parameters of a recommendation request and the age-range grammar
//! used to match them against `recommendedAgeGroup`.

use serde::Deserialize;

use crate::cache::build_key;

/// Filters of a recommendation query. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationQuery {
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub category: Option<String>,
    pub age: Option<u32>,
}

impl RecommendationQuery {
    /// Normalized key addressing this query in the recommendation cache.
    pub fn cache_key(&self) -> String {
        build_key(
            self.min_price,
            self.max_price,
            self.product_type.as_deref(),
            self.category.as_deref(),
            self.age,
        )
    }

    /// The type filter, if present and not blank.
    pub fn type_filter(&self) -> Option<&str> {
        non_blank(self.product_type.as_deref())
    }

    /// The category filter, if present and not blank.
    pub fn category_filter(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    /// Returns true if `price` lies within the inclusive bounds.
    pub fn matches_price(&self, price: i64) -> bool {
        self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// == Age Range ==
/// A parsed `recommendedAgeGroup` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeRange {
    /// `"L-H"`, both ends inclusive
    Between(u32, u32),
    /// `"L+"`
    AtLeast(u32),
    /// `"N"`
    Exactly(u32),
}

impl AgeRange {
    /// Parses a range string, returning None if it is malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.contains('-') {
            // Only the first two segments count: "1-2-3" reads as 1..=2
            let mut parts = raw.split('-');
            let low = parts.next()?.trim().parse().ok()?;
            let high = parts.next()?.trim().parse().ok()?;
            Some(AgeRange::Between(low, high))
        } else if let Some(low) = raw.strip_suffix('+') {
            low.trim().parse().ok().map(AgeRange::AtLeast)
        } else {
            raw.parse().ok().map(AgeRange::Exactly)
        }
    }

    pub fn contains(&self, age: u32) -> bool {
        match *self {
            AgeRange::Between(low, high) => age >= low && age <= high,
            AgeRange::AtLeast(low) => age >= low,
            AgeRange::Exactly(value) => age == value,
        }
    }
}

/// Decides whether a product's age group admits `age`.
///
/// A missing age or a blank range always matches. A range that cannot be
/// parsed matches only when `permissive` is set.
pub fn age_matches(range: &str, age: Option<u32>, permissive: bool) -> bool {
    let Some(age) = age else {
        return true;
    };
    if range.trim().is_empty() {
        return true;
    }
    match AgeRange::parse(range) {
        Some(parsed) => parsed.contains(age),
        None => permissive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ranges() {
        assert_eq!(AgeRange::parse("5-10"), Some(AgeRange::Between(5, 10)));
        assert_eq!(AgeRange::parse(" 6 - 12 "), Some(AgeRange::Between(6, 12)));
        assert_eq!(AgeRange::parse("10+"), Some(AgeRange::AtLeast(10)));
        assert_eq!(AgeRange::parse("3"), Some(AgeRange::Exactly(3)));
    }

    #[test]
    fn test_parse_extra_segments_use_first_two() {
        let range = AgeRange::parse("1-2-3").unwrap();
        assert_eq!(range, AgeRange::Between(1, 2));
        assert!(range.contains(2));
        assert!(!range.contains(3));
        assert!(!age_matches("1-2-3", Some(3), true));
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(AgeRange::parse("toddler"), None);
        assert_eq!(AgeRange::parse("5-"), None);
        assert_eq!(AgeRange::parse("+"), None);
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let range = AgeRange::Between(5, 10);
        assert!(range.contains(5));
        assert!(range.contains(10));
        assert!(!range.contains(4));
        assert!(!range.contains(11));
    }

    #[test]
    fn test_age_matches_policy() {
        assert!(age_matches("5-10", None, false));
        assert!(age_matches("", Some(3), false));
        assert!(age_matches("10+", Some(40), false));
        assert!(!age_matches("10+", Some(9), true));
        assert!(age_matches("teens", Some(9), true));
        assert!(!age_matches("teens", Some(9), false));
    }

    #[test]
    fn test_query_price_bounds() {
        let query = RecommendationQuery {
            min_price: Some(100),
            max_price: Some(200),
            ..Default::default()
        };
        assert!(query.matches_price(100));
        assert!(query.matches_price(200));
        assert!(!query.matches_price(99));
        assert!(!query.matches_price(201));
        assert!(RecommendationQuery::default().matches_price(i64::MAX));
    }

    #[test]
    fn test_blank_filters_ignored() {
        let query = RecommendationQuery {
            product_type: Some("  ".to_string()),
            category: Some(" Kids ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.type_filter(), None);
        assert_eq!(query.category_filter(), Some("Kids"));
    }

    #[test]
    fn test_query_deserialize_camel_case() {
        let query: RecommendationQuery =
            serde_json::from_str(r#"{"minPrice": 5, "type": "Toy", "age": 7}"#).unwrap();
        assert_eq!(query.min_price, Some(5));
        assert_eq!(query.product_type.as_deref(), Some("Toy"));
        assert_eq!(query.age, Some(7));
        assert_eq!(query.max_price, None);
    }
}
