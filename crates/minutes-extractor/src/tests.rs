//! End-to-end tests for the Extractor pipeline

use crate::{ExtractionOutcome, Extractor, ExtractorConfig, ExtractorError};
use minutes_domain::ExtractedItem;
use minutes_llm::{LlmError, MockProvider};
use proptest::prelude::*;

fn extractor(response: &str) -> Extractor<MockProvider> {
    Extractor::new(MockProvider::new(response), ExtractorConfig::default())
}

fn item(task: &str, owner: Option<&str>, due: Option<&str>) -> ExtractedItem {
    ExtractedItem::new(task, owner.map(str::to_string), due.map(str::to_string))
}

const TRANSCRIPT: &str = "Sam will send the report by Friday. Lee books the venue.";

#[tokio::test]
async fn test_clean_array_round_trips() {
    let ex = extractor(r#"[{"task":"Send report","owner":"Sam","due_date":"Friday"}]"#);
    let items = ex.extract(TRANSCRIPT).await.unwrap();
    assert_eq!(items, vec![item("Send report", Some("Sam"), Some("Friday"))]);
}

#[tokio::test]
async fn test_fenced_output() {
    let ex = extractor("```json\n[{\"task\":\"X\"}]\n```");
    let items = ex.extract(TRANSCRIPT).await.unwrap();
    assert_eq!(items, vec![item("X", None, None)]);
}

#[tokio::test]
async fn test_prose_wrapped_array() {
    let ex = extractor(r#"Sure! Here you go: [{"task":"Y"}] Hope that helps."#);
    let items = ex.extract(TRANSCRIPT).await.unwrap();
    assert_eq!(items, vec![item("Y", None, None)]);
}

#[tokio::test]
async fn test_no_items_prose() {
    let ex = extractor("No action items.");
    let report = ex.extract_with_report(TRANSCRIPT).await.unwrap();
    assert!(report.items.is_empty());
    assert_eq!(report.outcome, ExtractionOutcome::NoJsonSpan);
}

#[tokio::test]
async fn test_bad_element_does_not_discard_rest() {
    let ex = extractor(r#"[17, {"task":"Valid"}]"#);
    let report = ex.extract_with_report(TRANSCRIPT).await.unwrap();
    assert_eq!(
        report.items,
        vec![item("Untitled task 1", None, None), item("Valid", None, None)]
    );
    assert_eq!(report.placeholder_count(), 1);
}

#[tokio::test]
async fn test_odd_envelope_is_empty_success() {
    let provider = MockProvider::failing(LlmError::InvalidResponse("no candidates".into()));
    let ex = Extractor::new(provider, ExtractorConfig::default());
    let report = ex.extract_with_report(TRANSCRIPT).await.unwrap();
    assert!(report.items.is_empty());
    assert_eq!(report.outcome, ExtractionOutcome::EmptyEnvelope);
    assert_eq!(report.metadata.completion_chars, 0);
}

#[tokio::test]
async fn test_missing_credential_fails() {
    let provider = MockProvider::failing(LlmError::Configuration("GEMINI_API_KEY not set".into()));
    let ex = Extractor::new(provider, ExtractorConfig::default());
    let err = ex.extract(TRANSCRIPT).await.unwrap_err();
    assert!(matches!(err, ExtractorError::Configuration(_)));
}

#[tokio::test]
async fn test_provider_status_fails() {
    let provider = MockProvider::failing(LlmError::Provider {
        status: 503,
        body: "overloaded".into(),
    });
    let ex = Extractor::new(provider, ExtractorConfig::default());
    let err = ex.extract(TRANSCRIPT).await.unwrap_err();
    assert!(matches!(
        err,
        ExtractorError::Provider(LlmError::Provider { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_transport_failure_fails() {
    let provider = MockProvider::failing(LlmError::Communication("connection refused".into()));
    let ex = Extractor::new(provider, ExtractorConfig::default());
    assert!(ex.extract(TRANSCRIPT).await.is_err());
}

#[tokio::test]
async fn test_exactly_one_call_with_transcript_in_prompt() {
    let provider = MockProvider::new("[]");
    let ex = Extractor::new(provider.clone(), ExtractorConfig::default());
    ex.extract(TRANSCRIPT).await.unwrap();

    assert_eq!(provider.call_count(), 1);
    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.ends_with(TRANSCRIPT));
}

#[tokio::test]
async fn test_length_is_not_checked_in_core() {
    let ex = extractor(r#"[{"task":"Short"}]"#);
    let items = ex.extract("hi").await.unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn test_report_metadata() {
    let ex = extractor("[]");
    let report = ex.extract_with_report(TRANSCRIPT).await.unwrap();
    assert_eq!(report.metadata.provider, "mock");
    assert_eq!(report.metadata.model, "mock");
    assert_eq!(report.metadata.completion_chars, 2);
    assert_eq!(report.outcome, ExtractionOutcome::Parsed);
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #[test]
    fn prop_arbitrary_output_never_fails(response in ".*") {
        let ex = extractor(&response);
        let result = block_on(ex.extract(TRANSCRIPT));
        prop_assert!(result.is_ok());
    }

    #[test]
    fn prop_every_item_has_a_task(response in r#"\[(\{"task": ?"[a-z ]{0,8}"\}|[0-9]{1,3}|null|"x"|\{\})(, ?(\{"task": ?"[a-z ]{0,8}"\}|[0-9]{1,3}|null|"x"|\{\})){0,6}\]"#) {
        let ex = extractor(&response);
        let items = block_on(ex.extract(TRANSCRIPT)).unwrap();
        prop_assert!(!items.is_empty());
        for item in items {
            prop_assert!(!item.task.trim().is_empty());
        }
    }
}
