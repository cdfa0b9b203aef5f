use foodshare::{
    scorer::{fit, Candidate, ClaimHistory, Model},
    ClaimStatus, NewClaim,
};
use pretty_assertions::assert_eq;
use tests::FoodTest;

/// The scenario plus eight more claims, for twelve in total, half of them
/// completed.
fn history_test() -> FoodTest {
    let test = FoodTest::scenario();
    let statuses = [
        (1, ClaimStatus::Completed),
        (4, ClaimStatus::Completed),
        (2, ClaimStatus::Completed),
        (5, ClaimStatus::Cancelled),
        (5, ClaimStatus::Pending),
        (3, ClaimStatus::Cancelled),
        (5, ClaimStatus::Cancelled),
        (3, ClaimStatus::Pending),
    ];
    for (food_id, status) in statuses {
        test.db
            .claims()
            .insert(&NewClaim {
                food_id,
                receiver_id: 1,
                status: Some(status),
                timestamp: None,
            })
            .unwrap();
    }
    test
}

#[test]
fn scenario_history_is_insufficient() {
    // Three completed claims and a single pending one cannot be stratified
    let test = FoodTest::scenario();
    let err = Model::fit_from(&test.db).unwrap_err();
    assert!(err.is_insufficient_data());
    assert!(err.to_string().contains("4 claims"), "{err}");
}

#[test]
fn empty_history_is_insufficient() {
    let test = FoodTest::new();
    let history = ClaimHistory::load(&test.db).unwrap();
    assert!(history.is_empty());
    assert!(fit(&history).unwrap_err().is_insufficient_data());
}

#[test]
fn history_joins_listing_features() {
    let test = history_test();
    let history = ClaimHistory::load(&test.db).unwrap();

    assert_eq!(history.len(), 12);
    assert_eq!(history.completed(), 6);

    let first = &history.samples[0];
    assert!(first.completed);
    assert_eq!(first.candidate.quantity, 40);
    assert_eq!(first.candidate.location.as_deref(), Some("Chennai"));
    assert_eq!(first.candidate.meal_type.as_deref(), Some("Lunch"));
}

#[test]
fn fitted_model_scores_candidates() {
    let test = history_test();
    let model = Model::fit_from(&test.db).unwrap();

    let summary = model.summary();
    assert_eq!(summary.test_size, 3);
    assert_eq!(summary.train_size, 9);
    assert_eq!(summary.positive_rate, 0.5);

    let known = model.predict(&Candidate {
        quantity: 40,
        provider_type: Some("Restaurant".into()),
        location: Some("Chennai".into()),
        food_type: Some("Vegetarian".into()),
        meal_type: Some("Lunch".into()),
    });
    let unseen = model.predict(&Candidate {
        quantity: 1000,
        provider_type: Some("Food Truck".into()),
        location: Some("Madurai".into()),
        food_type: None,
        meal_type: Some("Brunch".into()),
    });

    for prediction in [known, unseen] {
        assert!((0.0..=1.0).contains(&prediction.probability));
        assert_eq!(
            prediction.confidence,
            prediction.probability.max(1.0 - prediction.probability)
        );
    }
}

#[test]
fn fitting_is_deterministic() {
    let test = history_test();
    let history = ClaimHistory::load(&test.db).unwrap();

    let a = fit(&history).unwrap();
    let b = fit(&history).unwrap();
    assert_eq!(a.summary(), b.summary());
    assert_eq!(a.coefficients(), b.coefficients());
}
