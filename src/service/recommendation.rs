//! Recommendation Service
//!
//! Filtered recommendation queries cached by their normalized key, and
//! similar-product lookups ranked by price distance.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{ProductCache, RecommendationCache};
use crate::error::Result;
use crate::models::{age_matches, same_label, ProductRecord, RecommendationQuery};
use crate::store::RecordStore;

// == Recommendation Service ==
#[derive(Clone)]
pub struct RecommendationService {
    store: Arc<dyn RecordStore>,
    recommendation_cache: Arc<dyn RecommendationCache>,
    product_cache: Arc<dyn ProductCache>,
    /// Unparseable age ranges match every age when set
    permissive_age_match: bool,
}

impl RecommendationService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        recommendation_cache: Arc<dyn RecommendationCache>,
        product_cache: Arc<dyn ProductCache>,
        permissive_age_match: bool,
    ) -> Self {
        Self {
            store,
            recommendation_cache,
            product_cache,
            permissive_age_match,
        }
    }

    // == Recommend ==
    /// Returns the products matching every filter of `query`.
    ///
    /// Results are cached under the normalized query key and every returned
    /// product is also written to the point-lookup cache.
    pub fn recommend(&self, query: &RecommendationQuery) -> Result<Vec<ProductRecord>> {
        let key = query.cache_key();
        if let Some(cached) = self.recommendation_cache.get(&key) {
            debug!("Recommendation cache hit for {}", key);
            return Ok(cached);
        }
        debug!("Recommendation cache miss for {}", key);

        let candidates = if let Some(product_type) = query.type_filter() {
            self.store.find_by_type(product_type)?
        } else if let Some(category) = query.category_filter() {
            self.store.find_by_category(category)?
        } else {
            self.store.find_all()?
        };

        let category = query.category_filter();
        let results: Vec<ProductRecord> = candidates
            .into_iter()
            .filter(|p| query.matches_price(p.price))
            .filter(|p| {
                age_matches(
                    &p.recommended_age_group,
                    query.age,
                    self.permissive_age_match,
                )
            })
            .filter(|p| category.map_or(true, |c| same_label(&p.category, c)))
            .collect();

        self.recommendation_cache.put(&key, &results);
        for record in &results {
            self.product_cache.put(record);
        }
        Ok(results)
    }

    // == Recommend Similar ==
    /// Up to `limit` other products sharing the base product's type or
    /// category, closest in price first. Unknown ids yield an empty list.
    pub fn recommend_similar(&self, product_id: &str, limit: usize) -> Result<Vec<ProductRecord>> {
        let Some(base) = self.store.find_by_id(product_id)? else {
            return Ok(Vec::new());
        };

        let mut similar: Vec<ProductRecord> = self
            .store
            .find_all()?
            .into_iter()
            .filter(|p| p.id != base.id)
            .filter(|p| {
                same_label(&p.product_type, &base.product_type)
                    || same_label(&p.category, &base.category)
            })
            .collect();

        similar.sort_by_key(|p| p.price.abs_diff(base.price));
        similar.truncate(limit);
        Ok(similar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CompositeKeyRecommendationCache, KeyBasedLruCache};
    use crate::models::fixtures::product;
    use crate::service::test_support::CountingStore;

    struct Harness {
        service: RecommendationService,
        store: Arc<CountingStore>,
        recommendation_cache: Arc<CompositeKeyRecommendationCache>,
        product_cache: Arc<KeyBasedLruCache>,
    }

    fn harness(permissive: bool) -> Harness {
        let store = Arc::new(CountingStore::seeded());
        let recommendation_cache = Arc::new(CompositeKeyRecommendationCache::new(10));
        let product_cache = Arc::new(KeyBasedLruCache::new(100));
        let service = RecommendationService::new(
            store.clone(),
            recommendation_cache.clone(),
            product_cache.clone(),
            permissive,
        );
        Harness {
            service,
            store,
            recommendation_cache,
            product_cache,
        }
    }

    fn ids(records: &[ProductRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_second_identical_query_hits_cache() {
        let h = harness(true);
        let query = RecommendationQuery {
            product_type: Some("Toy".to_string()),
            ..Default::default()
        };
        let equivalent = RecommendationQuery {
            product_type: Some("  toy ".to_string()),
            ..Default::default()
        };

        let first = h.service.recommend(&query).unwrap();
        let second = h.service.recommend(&equivalent).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(h.store.reads(), 1);
        assert_eq!(h.recommendation_cache.len(), 1);
    }

    #[test]
    fn test_results_backfill_product_cache() {
        let h = harness(true);
        h.service
            .recommend(&RecommendationQuery {
                category: Some("adults".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert!(h.product_cache.get_by_id("p4").is_some());
    }

    #[test]
    fn test_price_and_age_filters() {
        let h = harness(true);
        let results = h
            .service
            .recommend(&RecommendationQuery {
                min_price: Some(800),
                max_price: Some(2999),
                age: Some(11),
                ..Default::default()
            })
            .unwrap();

        // p1/p2 are 5-10, p2 is also below min; p3 6-12 and p4 10+ match
        assert_eq!(ids(&results), vec!["p3", "p4"]);
    }

    #[test]
    fn test_type_and_category_combined() {
        let h = harness(true);
        let results = h
            .service
            .recommend(&RecommendationQuery {
                product_type: Some("Toy".to_string()),
                category: Some("Adults".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_malformed_age_range_policy() {
        for (permissive, expected) in [(true, 1), (false, 0)] {
            let h = harness(permissive);
            let mut odd = product("x1", "Puzzle", 100);
            odd.recommended_age_group = "all ages".to_string();
            h.store.inner.save(odd).unwrap();

            let results = h
                .service
                .recommend(&RecommendationQuery {
                    product_type: Some("Puzzle".to_string()),
                    age: Some(4),
                    ..Default::default()
                })
                .unwrap();
            assert_eq!(results.len(), expected);
        }
    }

    #[test]
    fn test_catalog_writes_do_not_invalidate_results() {
        let h = harness(true);
        let query = RecommendationQuery {
            product_type: Some("Game".to_string()),
            ..Default::default()
        };
        assert_eq!(h.service.recommend(&query).unwrap().len(), 1);

        h.store.inner.save(product("g2", "Game", 10)).unwrap();

        assert_eq!(h.service.recommend(&query).unwrap().len(), 1);
    }

    #[test]
    fn test_category_filter_folds_non_ascii_case() {
        let h = harness(true);
        let mut radio = product("e1", "Radio", 4500);
        radio.category = "Électronique".to_string();
        h.store.inner.save(radio).unwrap();

        let results = h
            .service
            .recommend(&RecommendationQuery {
                category: Some("électronique".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ids(&results), vec!["e1"]);

        let mut speaker = product("e2", "Speaker", 4000);
        speaker.category = "ÉLECTRONIQUE".to_string();
        h.store.inner.save(speaker).unwrap();

        let similar = h.service.recommend_similar("e1", 5).unwrap();
        assert_eq!(ids(&similar), vec!["e2"]);
    }

    #[test]
    fn test_recommend_similar_orders_by_price_distance() {
        let h = harness(true);
        let similar = h.service.recommend_similar("p1", 5).unwrap();

        // p1 costs 1999: p3 is 1000 away, p2 is 1200 away; p4 shares nothing
        assert_eq!(ids(&similar), vec!["p3", "p2"]);
    }

    #[test]
    fn test_recommend_similar_limit_and_unknown() {
        let h = harness(true);
        assert_eq!(h.service.recommend_similar("p1", 1).unwrap().len(), 1);
        assert!(h.service.recommend_similar("nope", 5).unwrap().is_empty());
    }
}
