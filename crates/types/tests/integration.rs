//! Integration tests for types

#[cfg(test)]
mod tests {
    use pagesum_types::*;
    use std::time::Duration;

    #[test]
    fn test_batch_state_admission() {
        assert!(BatchState::Idle.accepts_run());
        assert!(BatchState::Completed.accepts_run());
        assert!(!BatchState::Running.accepts_run());
        assert_eq!(BatchState::default(), BatchState::Idle);
    }

    #[test]
    fn test_duplicate_urls_are_independent() {
        let outcomes = vec![
            FetchOutcome::Success {
                url: "https://example.com".into(),
                byte_length: 10,
            },
            FetchOutcome::Success {
                url: "https://example.com".into(),
                byte_length: 12,
            },
        ];
        let result = BatchResult::from_outcomes(outcomes, Duration::from_secs(1));
        assert_eq!(result.total_bytes, 22);
        assert_eq!(result.outcome_count(), 2);
    }

    #[test]
    fn test_color_choice_serialization() {
        let json = serde_json::to_string(&ColorChoice::Never).unwrap();
        assert_eq!(json, r#""never""#);
        let state = serde_json::to_string(&BatchState::Running).unwrap();
        assert_eq!(state, r#""running""#);
    }
}
