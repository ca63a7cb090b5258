//! End-to-end assessment through the public API with the mock collaborator.

use bmi_stylist::adapters::ai::{MockGenerationAdapter, MockRoute};
use bmi_stylist::domain::{
    BmiCategory, DomainError, HeightUnit, Measurement, ResolverStrategy, WeightUnit,
};
use bmi_stylist::ports::UnitResolver;
use bmi_stylist::usecases::{
    AssessmentService, CommentaryService, DelegatingResolver, DeterministicResolver,
};
use std::sync::Arc;

fn assessment(
    resolver: Arc<dyn UnitResolver>,
    mock: Arc<MockGenerationAdapter>,
) -> AssessmentService {
    let commentary = Arc::new(CommentaryService::new(mock, "openai/gpt-4o".to_string()));
    AssessmentService::new(resolver, commentary)
}

#[tokio::test]
async fn stone_and_feet_with_split_commentary() {
    let mock = Arc::new(
        MockGenerationAdapter::with_delay(0)
            .with_failure(MockRoute::Critic, "API error 503 Service Unavailable")
            .with_reply(MockRoute::Stylist, "Monochrome, darling. Always monochrome."),
    );
    let service = assessment(Arc::new(DeterministicResolver::new()), mock.clone());
    let mut session = service.new_session();

    let report = service
        .assess(
            &mut session,
            &Measurement::new(11.0, WeightUnit::Stone),
            &Measurement::new(5.7, HeightUnit::Foot),
        )
        .await
        .expect("deterministic assessment");

    // 69.85 kg / (1.7374 m)^2
    assert!((report.reading.bmi - 23.14).abs() < 0.01);
    assert_eq!(report.reading.category, BmiCategory::Normal);
    assert_eq!(report.reading.strategy, ResolverStrategy::Deterministic);

    match &report.commentary.critique {
        Err(DomainError::Generation(msg)) => assert!(msg.contains("503")),
        other => panic!("expected critique failure, got {:?}", other),
    }
    assert_eq!(
        report.commentary.style_advice.as_deref().ok(),
        Some("Monochrome, darling. Always monochrome.")
    );

    let stylist_request = mock
        .requests()
        .into_iter()
        .find(|(_, msgs)| msgs[0].content.contains("fashion stylist"))
        .expect("stylist request sent");
    assert!(stylist_request.1[1].content.starts_with("The BMI is 23.1"));
}

#[tokio::test]
async fn delegated_conversion_matches_deterministic_when_collaborator_behaves() {
    let mock = Arc::new(
        MockGenerationAdapter::with_delay(0)
            .with_reply(MockRoute::UnitConversion, "bmi_calculator 69.8533 1.7018"),
    );
    let delegated = assessment(
        Arc::new(DelegatingResolver::new(mock.clone(), "moonshotai/kimi-k2".to_string())),
        mock.clone(),
    );
    let deterministic = assessment(Arc::new(DeterministicResolver::new()), mock);

    let weight = Measurement::new(154.0, WeightUnit::Pound);
    let height = Measurement::new(67.0, HeightUnit::Inch);

    let mut session = delegated.new_session();
    let a = delegated.measure(&mut session, &weight, &height).await.unwrap();
    let mut other = deterministic.new_session();
    let b = deterministic.measure(&mut other, &weight, &height).await.unwrap();

    assert_eq!(a.strategy, ResolverStrategy::Delegated);
    assert_eq!(b.strategy, ResolverStrategy::Deterministic);
    assert!((a.bmi - b.bmi).abs() < 0.01);
    assert_eq!(a.category, b.category);
    assert_eq!(session.exchanges(), 1);
    assert_eq!(other.exchanges(), 0);
}

#[test]
fn unsupported_unit_tag_is_rejected_before_any_request() {
    let err = "furlongs".parse::<HeightUnit>().unwrap_err();
    assert!(matches!(err, DomainError::UnsupportedUnit(_)));
}
