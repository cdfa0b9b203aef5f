use foodshare::{
    chart::{category_counts, CategoryCount, Dimension},
    repo::ListingFilter,
    Report,
};
use pretty_assertions::assert_eq;
use tests::{days_from_today, FoodTest};

fn pairs(report: Report, test: &FoodTest, key: &str, value: &str) -> Vec<(String, i64)> {
    report
        .run(&test.db, None)
        .unwrap()
        .map_rows(|row| Ok((row.get(key)?, row.get(value)?)))
        .unwrap()
}

#[test]
fn providers_per_city() {
    let test = FoodTest::scenario();
    assert_eq!(
        pairs(Report::ProvidersPerCity, &test, "city", "providers_count"),
        [("Chennai".to_string(), 2), ("Pune".to_string(), 1)]
    );
}

#[test]
fn claim_status_distribution() {
    let test = FoodTest::scenario();
    let table = Report::ClaimStatusDistribution.run(&test.db, None).unwrap();

    assert_eq!(table.columns(), ["status", "cnt", "pct"]);
    let rows: Vec<(String, i64, f64)> = table
        .map_rows(|row| Ok((row.get("status")?, row.get("cnt")?, row.get("pct")?)))
        .unwrap();
    assert_eq!(
        rows,
        [
            ("Completed".to_string(), 3, 75.0),
            ("Pending".to_string(), 1, 25.0)
        ]
    );
}

#[test]
fn listing_totals() {
    let test = FoodTest::scenario();

    let total: i64 = Report::TotalQuantity
        .run(&test.db, None)
        .unwrap()
        .first()
        .unwrap()
        .get("total_quantity_available")
        .unwrap();
    assert_eq!(total, 150);

    assert_eq!(
        pairs(Report::ListingsPerCity, &test, "city", "listings_count"),
        [("Chennai".to_string(), 3), ("Pune".to_string(), 2)]
    );
    assert_eq!(
        pairs(Report::QuantityByProviderType, &test, "provider_type", "total_quantity"),
        [
            ("Grocery Store".to_string(), 60),
            ("Restaurant".to_string(), 50),
            ("Supermarket".to_string(), 40),
        ]
    );
}

#[test]
fn providers_in_city() {
    let test = FoodTest::scenario();

    let table = Report::ProvidersInCity.run(&test.db, Some("Chennai")).unwrap();
    assert_eq!(table.columns(), ["name", "type", "address", "city", "contact"]);
    let names: Vec<String> = table.map_rows(|row| row.get("name")).unwrap();
    assert_eq!(names, ["Anna's Kitchen", "Fresh Mart"]);

    assert!(Report::ProvidersInCity
        .run(&test.db, Some("Atlantis"))
        .unwrap()
        .is_empty());
}

#[test]
fn claim_reports() {
    let test = FoodTest::scenario();

    let mut successful = pairs(
        Report::SuccessfulClaimsPerProvider,
        &test,
        "name",
        "successful_claims",
    );
    successful.sort();
    assert_eq!(
        successful,
        [
            ("Anna's Kitchen".to_string(), 1),
            ("Daily Bread".to_string(), 1),
            ("Fresh Mart".to_string(), 1),
        ]
    );

    let per_food = pairs(Report::ClaimsPerFood, &test, "food_name", "claim_count");
    assert_eq!(per_food.len(), 5);
    assert_eq!(per_food[4], ("Curry".to_string(), 0));

    let active = pairs(Report::MostActiveReceivers, &test, "name", "claims_count");
    assert_eq!(active.len(), 2);
    assert!(active.iter().all(|(_, n)| *n == 2));
}

#[test]
fn expiring_and_unclaimed() {
    let test = FoodTest::scenario();

    let expiring = Report::ExpiringSoon.run(&test.db, None).unwrap();
    let rows: Vec<(i64, String)> = expiring
        .map_rows(|row| Ok((row.get("food_id")?, row.get("expiry_date")?)))
        .unwrap();
    assert_eq!(
        rows,
        [
            (1, days_from_today(-1).to_string()),
            (3, days_from_today(1).to_string()),
        ]
    );

    let unclaimed = Report::UnclaimedListings.run(&test.db, None).unwrap();
    let names: Vec<String> = unclaimed.map_rows(|row| row.get("food_name")).unwrap();
    assert_eq!(names, ["Curry"]);
}

#[test]
fn reports_by_name() {
    let test = FoodTest::scenario();

    let report: Report = "food-type-frequency".parse().unwrap();
    let mut frequency = pairs(report, &test, "food_type", "appearances");
    frequency.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    assert_eq!(
        frequency,
        [
            ("Vegan".to_string(), 2),
            ("Vegetarian".to_string(), 2),
            ("Non-Vegetarian".to_string(), 1),
        ]
    );
}

#[test]
fn chart_counts() {
    let test = FoodTest::scenario();

    let meals = category_counts(&test.db, Dimension::MealType).unwrap();
    let expected = [("Dinner", 2), ("Breakfast", 1), ("Lunch", 1), ("Snacks", 1)]
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        });
    assert_eq!(meals, expected);

    let cities = category_counts(&test.db, Dimension::Location).unwrap();
    assert_eq!(cities[0].category, "Chennai");
    assert_eq!(cities[0].count, 3);
}

#[test]
fn listing_filters() {
    let test = FoodTest::scenario();
    let listings = test.db.listings();

    let all = listings.filter(&ListingFilter::default()).unwrap();
    assert_eq!(all.len(), 5);
    assert!(all.column_index("provider_name").is_some());
    assert!(all.column_index("provider_contact").is_some());

    let filter = ListingFilter {
        location: Some("Chennai".into()),
        food_type: Some("Vegetarian".into()),
        ..ListingFilter::default()
    };
    let names: Vec<String> = listings
        .filter(&filter)
        .unwrap()
        .map_rows(|row| row.get("food_name"))
        .unwrap();
    assert_eq!(names, ["Rice", "Soup"]);

    let by_provider = ListingFilter {
        provider_id: Some(3),
        ..ListingFilter::default()
    };
    let table = listings.filter(&by_provider).unwrap();
    assert_eq!(table.len(), 2);
    let provider: String = table.first().unwrap().get("provider_name").unwrap();
    assert_eq!(provider, "Daily Bread");

    let options = listings.filter_options().unwrap();
    assert_eq!(options.locations, ["Chennai", "Pune"]);
    assert_eq!(options.meal_types, ["Breakfast", "Dinner", "Lunch", "Snacks"]);
    assert_eq!(
        options.providers,
        [
            (1, "Anna's Kitchen".to_string()),
            (3, "Daily Bread".to_string()),
            (2, "Fresh Mart".to_string()),
        ]
    );
}
