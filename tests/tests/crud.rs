use foodshare::{
    ClaimStatus, Expiry, NewClaim, NewFoodListing, NewProvider, NewReceiver,
};
use pretty_assertions::assert_eq;
use tests::{days_from_today, FoodTest};

fn provider(name: &str, city: &str) -> NewProvider {
    NewProvider {
        name: name.to_string(),
        kind: Some("Restaurant".into()),
        address: Some("1 Main St".into()),
        city: Some(city.into()),
        contact: Some("555-0100".into()),
    }
}

fn listing(food_name: &str, provider_id: Option<i64>) -> NewFoodListing {
    NewFoodListing {
        food_name: food_name.to_string(),
        quantity: 12,
        expiry_date: Some(days_from_today(3).into()),
        provider_id,
        provider_type: Some("Restaurant".into()),
        location: Some("Chennai".into()),
        food_type: Some("Vegetarian".into()),
        meal_type: Some("Lunch".into()),
    }
}

#[test]
fn provider_insert_get_update() {
    let test = FoodTest::new();
    let providers = test.db.providers();

    let created = providers.insert(&provider("  Anna's Kitchen ", "new delhi")).unwrap();
    assert_eq!(created.name, "Anna's Kitchen");
    assert_eq!(created.city.as_deref(), Some("New Delhi"));
    assert_eq!(providers.get(created.provider_id).unwrap(), Some(created.clone()));

    let mut changes = created.clone().into_new();
    changes.contact = Some("  ".into());
    changes.kind = Some("Cafe".into());
    let updated = providers.update(created.provider_id, &changes).unwrap();

    assert_eq!(updated.kind.as_deref(), Some("Cafe"));
    assert_eq!(updated.contact, None);
    assert_eq!(providers.all().unwrap(), [updated]);
    assert_eq!(providers.cities().unwrap(), ["New Delhi"]);
}

#[test]
fn receiver_insert_get_update() {
    let test = FoodTest::new();
    let receivers = test.db.receivers();

    let created = receivers
        .insert(&NewReceiver {
            name: "Hope Shelter".into(),
            kind: Some("Shelter".into()),
            city: Some("pune".into()),
            contact: None,
        })
        .unwrap();
    assert_eq!(created.city.as_deref(), Some("Pune"));

    let mut changes = created.clone().into_new();
    changes.name = "Hope Shelter East".into();
    receivers.update(created.receiver_id, &changes).unwrap();

    let read = receivers.get(created.receiver_id).unwrap().unwrap();
    assert_eq!(read.name, "Hope Shelter East");
    assert_eq!(receivers.all().unwrap().len(), 1);
}

#[test]
fn blank_names_are_rejected() {
    let test = FoodTest::new();

    let err = test.db.providers().insert(&provider("   ", "Pune")).unwrap_err();
    assert!(err.is_validation());
    assert!(test.db.providers().all().unwrap().is_empty());
}

#[test]
fn listing_round_trip_and_delete() {
    let test = FoodTest::new();
    let provider = test.db.providers().insert(&provider("Fresh Mart", "Chennai")).unwrap();
    let listings = test.db.listings();

    let created = listings
        .insert(&listing("Rice", Some(provider.provider_id)))
        .unwrap();
    assert_eq!(created.quantity, 12);
    assert_eq!(created.expiry_date, Some(Expiry::Date(days_from_today(3))));
    assert_eq!(listings.get(created.food_id).unwrap(), Some(created.clone()));

    let mut changes = created.clone().into_new();
    changes.quantity = 30;
    changes.location = Some(" vellore ".into());
    let updated = listings.update(created.food_id, &changes).unwrap();
    assert_eq!(updated.quantity, 30);
    assert_eq!(updated.location.as_deref(), Some("Vellore"));

    listings.delete(created.food_id).unwrap();
    assert_eq!(listings.get(created.food_id).unwrap(), None);
    assert!(listings.delete(created.food_id).unwrap_err().is_record_not_found());
}

#[test]
fn listing_validation() {
    let test = FoodTest::new();
    let listings = test.db.listings();

    let mut negative = listing("Rice", None);
    negative.quantity = -1;
    assert!(listings.insert(&negative).unwrap_err().is_validation());

    let err = listings.insert(&listing("Rice", Some(99))).unwrap_err();
    assert!(err.is_referential_integrity());

    // A listing without a provider is allowed
    listings.insert(&listing("Rice", None)).unwrap();

    let err = listings.update(42, &listing("Rice", None)).unwrap_err();
    assert!(err.is_record_not_found());
}

#[test]
fn claim_round_trip() {
    let test = FoodTest::scenario();
    let claims = test.db.claims();

    let created = claims
        .insert(&NewClaim {
            food_id: 5,
            receiver_id: 2,
            status: Some(ClaimStatus::Pending),
            timestamp: Some("2025-04-01 12:00:00".into()),
        })
        .unwrap();
    assert_eq!(created.claim_id, 5);
    assert_eq!(claims.get(5).unwrap(), Some(created.clone()));

    let mut changes = created.into_new();
    changes.status = Some(ClaimStatus::Cancelled);
    let updated = claims.update(5, &changes).unwrap();
    assert_eq!(updated.status, Some(ClaimStatus::Cancelled));
    assert_eq!(claims.all().unwrap().len(), 5);
}

#[test]
fn claims_need_existing_listing_and_receiver() {
    let test = FoodTest::scenario();
    let claims = test.db.claims();

    let bad_listing = NewClaim {
        food_id: 99,
        receiver_id: 1,
        status: Some(ClaimStatus::Pending),
        timestamp: None,
    };
    let err = claims.insert(&bad_listing).unwrap_err();
    assert!(err.is_referential_integrity());
    assert!(err.to_string().contains("food_listings"), "{err}");

    let bad_receiver = NewClaim {
        food_id: 1,
        receiver_id: 99,
        ..bad_listing
    };
    assert!(claims.insert(&bad_receiver).unwrap_err().is_referential_integrity());

    assert_eq!(claims.all().unwrap().len(), 4);
}

#[test]
fn claimed_listing_cannot_be_deleted() {
    let test = FoodTest::scenario();

    let err = test.db.listings().delete(1).unwrap_err();
    assert!(err.is_referential_integrity());
    assert!(test.db.listings().get(1).unwrap().is_some());

    // Listing 5 has no claims
    test.db.listings().delete(5).unwrap();
}

#[test]
fn claim_views() {
    let test = FoodTest::scenario();
    let claims = test.db.claims();

    let summaries = claims.summaries().unwrap();
    assert_eq!(summaries.len(), 4);
    assert_eq!(summaries[0].claim_id, 4);
    assert_eq!(summaries[0].food_name.as_deref(), Some("Soup"));
    assert_eq!(summaries[0].receiver_name.as_deref(), Some("Care NGO"));
    assert_eq!(summaries[0].status, Some(ClaimStatus::Pending));

    let claimable = claims.claimable_listings().unwrap();
    assert_eq!(claimable.len(), 1);
    assert_eq!(claimable[0].food_id, 5);
    assert_eq!(claimable[0].provider_name, "Daily Bread");

    // Cancelling the pending claim frees listing 3 again
    let mut claim = claims.get(4).unwrap().unwrap().into_new();
    claim.status = Some(ClaimStatus::Cancelled);
    claims.update(4, &claim).unwrap();

    let ids: Vec<i64> = claims
        .claimable_listings()
        .unwrap()
        .iter()
        .map(|l| l.food_id)
        .collect();
    assert_eq!(ids, [3, 5]);

    assert_eq!(
        claims.status_counts().unwrap(),
        [
            (ClaimStatus::Pending, 0),
            (ClaimStatus::Completed, 3),
            (ClaimStatus::Cancelled, 1),
        ]
    );
}

#[test]
fn lowercase_cancellation_frees_listing() {
    let test = FoodTest::scenario();

    test.db
        .execute("UPDATE claims SET status = 'cancelled' WHERE claim_id = 4", &[])
        .unwrap();

    let ids: Vec<i64> = test
        .db
        .claims()
        .claimable_listings()
        .unwrap()
        .iter()
        .map(|l| l.food_id)
        .collect();
    assert_eq!(ids, [3, 5]);
    assert_eq!(
        test.db.claims().get(4).unwrap().unwrap().status,
        Some(ClaimStatus::Cancelled)
    );
}

#[test]
fn unknown_status_is_not_written() {
    let test = FoodTest::scenario();

    let err = test
        .db
        .claims()
        .insert(&NewClaim {
            food_id: 5,
            receiver_id: 1,
            status: Some(ClaimStatus::Other("Lost".into())),
            timestamp: None,
        })
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(test.db.claims().all().unwrap().len(), 4);
}
