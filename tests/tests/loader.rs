use foodshare::{loader::LoadOutcome, schema, ClaimStatus, Expiry, Loader, MissingCsv, Value};
use pretty_assertions::assert_eq;
use tests::{days_from_today, FoodTest};

#[test]
fn loads_every_table() {
    let test = FoodTest::new();
    test.write_scenario();

    let report = test.load().unwrap();
    assert!(report.is_complete());
    assert_eq!(report.rows("providers"), Some(3));
    assert_eq!(report.rows("receivers"), Some(2));
    assert_eq!(report.rows("food_listings"), Some(5));
    assert_eq!(report.rows("claims"), Some(4));

    for table in ["providers", "receivers", "food_listings", "claims"] {
        assert!(test.db.table_exists(table).unwrap(), "{table}");
    }
}

#[test]
fn cells_are_normalized() {
    let test = FoodTest::scenario();

    let cities: Vec<String> = test
        .db
        .query("SELECT city FROM providers ORDER BY provider_id", &[])
        .unwrap()
        .map_rows(|row| row.get("city"))
        .unwrap();
    assert_eq!(cities, ["Chennai", "Chennai", "Pune"]);

    let soup = test.db.listings().get(3).unwrap().unwrap();
    assert_eq!(soup.expiry_date, Some(Expiry::Date(days_from_today(1))));

    let claim = test.db.claims().get(2).unwrap().unwrap();
    assert_eq!(claim.timestamp.as_deref(), Some("2025-03-06 09:30:00"));
}

#[test]
fn loading_twice_gives_identical_tables() {
    let test = FoodTest::scenario();

    let snapshot = || {
        schema::Schema::FOOD
            .tables
            .iter()
            .map(|table| {
                let sql = format!("SELECT * FROM {}", table.name);
                (*test.db.query(&sql, &[]).unwrap()).clone()
            })
            .collect::<Vec<_>>()
    };

    let first = snapshot();
    test.load().unwrap();
    assert_eq!(snapshot(), first);
}

#[test]
fn reload_replaces_rows() {
    let test = FoodTest::scenario();
    assert_eq!(test.db.providers().all().unwrap().len(), 3);

    test.write_csv(
        "providers_data.csv",
        "provider_id,name,type,address,city,contact\n7,Solo Cafe,Cafe,,Goa,\n",
    );
    test.load().unwrap();

    let providers = test.db.providers().all().unwrap();
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0].provider_id, 7);
    assert_eq!(providers[0].address, None);
}

#[test]
fn missing_csv_is_skipped_by_default() {
    let test = FoodTest::new();
    test.write_scenario();
    test.remove_csv("claims_data.csv");

    let report = test.load().unwrap();
    assert!(!report.is_complete());
    assert_eq!(report.skipped().collect::<Vec<_>>(), ["claims"]);
    assert!(matches!(
        report.tables[3].outcome,
        LoadOutcome::Skipped { .. }
    ));

    assert_eq!(report.rows("food_listings"), Some(5));
    assert!(test.db.claims().all().unwrap().is_empty());
}

#[test]
fn missing_csv_can_fail_before_loading() {
    let test = FoodTest::new();
    test.write_scenario();
    test.remove_csv("receivers_data.csv");

    let err = Loader::new(&test.db)
        .missing_csv(MissingCsv::Fail)
        .load(&test.sources())
        .unwrap_err();
    assert!(err.is_csv_load());

    // Nothing was loaded, not even the tables whose files exist
    assert!(test.db.providers().all().unwrap().is_empty());
}

#[test]
fn failed_table_load_keeps_previous_rows() {
    let test = FoodTest::scenario();

    test.write_csv(
        "food_listings_data.csv",
        "food_id,food_name,quantity\n1,Rice,10\n2,Beans,-4\n",
    );
    let err = test.load().unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("row 3"), "{err}");

    assert_eq!(test.db.listings().all().unwrap().len(), 5);
}

#[test]
fn missing_required_column_aborts_table() {
    let test = FoodTest::new();
    test.write_scenario();
    test.write_csv("providers_data.csv", "provider_id,city\n1,Pune\n");

    let err = test.load().unwrap_err();
    assert!(err.is_csv_load());
    assert!(err.to_string().contains("name"), "{err}");
}

#[test]
fn unparseable_dates_are_kept_verbatim() {
    let test = FoodTest::new();
    test.write_scenario();
    test.write_csv(
        "food_listings_data.csv",
        "food_id,food_name,expiry_date\n1,Rice,next week\n",
    );
    test.load().unwrap();

    let table = test
        .db
        .query("SELECT expiry_date FROM food_listings", &[])
        .unwrap();
    assert_eq!(table.rows().next().unwrap().values(), [Value::from("next week")]);
}

#[test]
fn unparseable_dates_read_back_as_text() {
    let test = FoodTest::new();
    test.write_scenario();
    test.write_csv(
        "food_listings_data.csv",
        "food_id,food_name,expiry_date\n1,Rice,next week\n2,Bread,2025-06-01\n",
    );
    test.load().unwrap();

    let listings = test.db.listings().all().unwrap();
    assert_eq!(
        listings[0].expiry_date,
        Some(Expiry::Unparsed("next week".into()))
    );
    assert_eq!(
        listings[1].expiry_date.as_ref().and_then(Expiry::date),
        chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
    );
}

#[test]
fn unusual_claim_statuses_are_readable() {
    let test = FoodTest::new();
    test.write_scenario();
    test.write_csv(
        "claims_data.csv",
        "claim_id,food_id,receiver_id,status,timestamp\n\
         1,1,1,completed,\n\
         2,2,2,In Progress,\n\
         3,3,1,,\n\
         4,4,2,CANCELLED,\n",
    );
    test.load().unwrap();

    let statuses: Vec<_> = test
        .db
        .claims()
        .all()
        .unwrap()
        .into_iter()
        .map(|claim| claim.status)
        .collect();
    assert_eq!(
        statuses,
        [
            Some(ClaimStatus::Completed),
            Some(ClaimStatus::Other("In Progress".into())),
            None,
            Some(ClaimStatus::Cancelled),
        ]
    );

    assert_eq!(test.db.claims().summaries().unwrap().len(), 4);
    assert_eq!(
        test.db.claims().status_counts().unwrap(),
        [
            (ClaimStatus::Pending, 0),
            (ClaimStatus::Completed, 1),
            (ClaimStatus::Cancelled, 1),
            (ClaimStatus::Other("In Progress".into()), 1),
        ]
    );
}

#[test]
fn reload_with_dangling_references_succeeds() {
    let test = FoodTest::scenario();

    // Claims point at listings that the new file no longer has
    test.write_csv(
        "food_listings_data.csv",
        "food_id,food_name,quantity\n9,Dal,12\n",
    );
    let report = test.load().unwrap();
    assert_eq!(report.rows("food_listings"), Some(1));
    assert_eq!(report.rows("claims"), Some(4));

    let summaries = test.db.claims().summaries().unwrap();
    assert!(summaries.iter().all(|s| s.food_name.is_none()));
}
