use super::*;
use crate::constants::{TRUSTED_SOURCE_SCORE, UNKNOWN_SOURCE_SCORE, UNTRUSTED_SOURCE_SCORE};

const EPS: f64 = 1e-12;

mod trust_tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = TrustTable::default();
        assert_eq!(table.domains(), ["bbc.com", "reuters.com", "theguardian.com"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_new_normalizes_entries() {
        let table = TrustTable::new(["  BBC.com", "", "bbc.com", "Reuters.COM"]);
        assert_eq!(table.domains(), ["bbc.com", "reuters.com"]);
    }

    #[test]
    fn test_absent_or_empty_source_is_neutral() {
        let table = TrustTable::default();
        assert_eq!(source_score(&table, None), UNKNOWN_SOURCE_SCORE);
        assert_eq!(source_score(&table, Some("")), UNKNOWN_SOURCE_SCORE);
        assert_eq!(UNKNOWN_SOURCE_SCORE, 0.5);
    }

    #[test]
    fn test_trusted_sources_score_low() {
        let table = TrustTable::default();
        for source in [
            "bbc.com",
            "https://www.bbc.com/news/world-123",
            "WWW.REUTERS.COM",
            "theguardian.com/uk",
            "Reported by TheGuardian.com staff",
        ] {
            assert_eq!(source_score(&table, Some(source)), 0.1, "source {source:?}");
        }
        assert_eq!(TRUSTED_SOURCE_SCORE, 0.1);
    }

    #[test]
    fn test_other_sources_score_high() {
        let table = TrustTable::default();
        for source in ["infowars.com", "bbc.co.uk", "some blog", " "] {
            assert_eq!(source_score(&table, Some(source)), 0.8, "source {source:?}");
        }
        assert_eq!(UNTRUSTED_SOURCE_SCORE, 0.8);
    }

    #[test]
    fn test_empty_table_trusts_nothing() {
        let table = TrustTable::new(Vec::<String>::new());
        assert!(table.is_empty());
        assert_eq!(source_score(&table, Some("bbc.com")), 0.8);
    }
}

mod fuser_tests {
    use super::*;

    #[test]
    fn test_fuse_formula() {
        for (p, c) in [(0.0, 0.1), (0.25, 0.5), (0.5, 0.8), (0.9, 0.1), (1.0, 0.8)] {
            assert!((fuse(p, c) - (0.7 * p + 0.3 * c)).abs() < EPS);
        }
    }

    #[test]
    fn test_fuse_stays_in_unit_interval() {
        assert!((fuse(0.0, 0.0)).abs() < EPS);
        assert!((fuse(1.0, 1.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_label_threshold_is_strict() {
        assert_eq!(predicted_label(0.5), FakeLabel::Real);
        assert_eq!(predicted_label(0.500_000_1), FakeLabel::Fake);
        assert_eq!(predicted_label(0.0), FakeLabel::Real);
        assert_eq!(predicted_label(1.0), FakeLabel::Fake);
    }
}

mod score_result_tests {
    use super::*;

    #[test]
    fn test_new_derives_label_and_score() {
        let result = ScoreResult::new("Breaking News".to_string(), 0.9, 0.1);
        assert_eq!(result.pred_label, FakeLabel::Fake);
        assert!((result.final_score - 0.66).abs() < EPS);
    }

    #[test]
    fn test_serializes_label_as_integer() {
        let result = ScoreResult::new(String::new(), 0.2, 0.5);
        let json = serde_json::to_value(&result).expect("serializes");

        assert_eq!(json["pred_label"], serde_json::json!(0));
        assert_eq!(json["extracted_text"], serde_json::json!(""));
        let obj = json.as_object().expect("object");
        assert_eq!(obj.len(), 4);
        assert!(obj.contains_key("prob_fake"));
        assert!(obj.contains_key("final_score"));
    }
}
