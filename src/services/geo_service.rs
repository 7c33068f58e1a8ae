use dashmap::DashMap;
use metrics::counter;

use crate::intelligence::geo::{normalize_text, GeoMatcher};
use crate::models::GeoResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MemoKey {
    Event(String),
    Text(String),
}

/// Memoized front for [`GeoMatcher`].
///
/// The memo is append-only and remembers misses as well as hits. Two callers
/// racing on the same key may both run inference; the first insert is kept.
#[derive(Default)]
pub struct GeoService {
    matcher: GeoMatcher,
    memo: DashMap<MemoKey, Option<GeoResult>>,
}

impl GeoService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Infer from title and question text, memoized by the normalized text.
    pub fn infer_geo(&self, title: &str, question: &str) -> Option<GeoResult> {
        let key = MemoKey::Text(normalize_text(title, question));
        self.memoized(key, || self.matcher.infer(title, question))
    }

    /// Infer for an event, memoized by event id. Later calls for the same
    /// event return the first answer even if the text changed.
    pub fn infer_for_event(
        &self,
        event_id: &str,
        title: &str,
        question: &str,
    ) -> Option<GeoResult> {
        let key = MemoKey::Event(event_id.to_string());
        self.memoized(key, || self.matcher.infer(title, question))
    }

    pub fn resolve_country_name(&self, text: &str) -> Option<String> {
        self.matcher.resolve_country_name(text).map(str::to_string)
    }

    pub fn match_us_state(&self, text: &str) -> Option<GeoResult> {
        self.matcher.match_us_state(text)
    }

    pub fn clear_cache(&self) {
        self.memo.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.memo.len()
    }

    fn memoized(
        &self,
        key: MemoKey,
        infer: impl FnOnce() -> Option<GeoResult>,
    ) -> Option<GeoResult> {
        if let Some(hit) = self.memo.get(&key) {
            counter!("geo_cache_hits_total").increment(1);
            return hit.value().clone();
        }

        let result = infer();
        counter!("geo_inferences_total").increment(1);

        self.memo.entry(key).or_insert(result).value().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_results_are_memoized() {
        let geo = GeoService::new();
        assert_eq!(geo.infer_geo("Will bitcoin hit 200k", ""), None);
        assert_eq!(geo.cache_len(), 1);
        assert_eq!(geo.infer_geo("Will bitcoin hit 200k", ""), None);
        assert_eq!(geo.cache_len(), 1);
    }

    #[test]
    fn test_event_memo_keeps_first_answer() {
        let geo = GeoService::new();
        let first = geo.infer_for_event("e1", "Governor of Texas", "").unwrap();
        let second = geo.infer_for_event("e1", "Election in Germany", "").unwrap();
        assert_eq!(first, second);
        assert_eq!(second.region.as_deref(), Some("Texas"));

        geo.clear_cache();
        assert_eq!(geo.cache_len(), 0);
        let fresh = geo.infer_for_event("e1", "Election in Germany", "").unwrap();
        assert_eq!(fresh.country.as_deref(), Some("Germany"));
    }

    #[test]
    fn test_text_memo_ignores_case_and_spacing() {
        let geo = GeoService::new();
        geo.infer_geo("Governor of  Texas", "");
        geo.infer_geo("governor of texas", "");
        assert_eq!(geo.cache_len(), 1);
    }
}
