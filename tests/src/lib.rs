//! Shared setup for the integration tests: a fresh database plus a scratch
//! directory of CSV files, removed again when the test ends.

use chrono::{Days, NaiveDate, Utc};
use foodshare::{CsvSources, Db, LoadReport, Loader};
use std::path::{Path, PathBuf};

/// One test's database and CSV directory.
pub struct FoodTest {
    pub db: Db,
    dir: PathBuf,
}

impl FoodTest {
    /// An empty in-memory database and an empty CSV directory.
    pub fn new() -> FoodTest {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = std::env::temp_dir().join(format!("foodshare-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        FoodTest {
            db: Db::in_memory().unwrap(),
            dir,
        }
    }

    /// Like [`FoodTest::new`] with the scenario CSVs written and loaded.
    pub fn scenario() -> FoodTest {
        let test = FoodTest::new();
        test.write_scenario();
        test.load().unwrap();
        test
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn sources(&self) -> CsvSources {
        CsvSources::in_dir(&self.dir)
    }

    pub fn write_csv(&self, name: &str, contents: &str) {
        std::fs::write(self.dir.join(name), contents).unwrap();
    }

    pub fn remove_csv(&self, name: &str) {
        std::fs::remove_file(self.dir.join(name)).unwrap();
    }

    /// Writes the four scenario files.
    pub fn write_scenario(&self) {
        for (name, contents) in scenario_csvs() {
            self.write_csv(name, &contents);
        }
    }

    pub fn load(&self) -> foodshare::Result<LoadReport> {
        Loader::new(&self.db).load(&self.sources())
    }
}

impl Default for FoodTest {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FoodTest {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

/// Today's date as SQLite's `DATE('now')` sees it.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// `today()` shifted by `days`, which may be negative.
pub fn days_from_today(days: i64) -> NaiveDate {
    let today = today();
    if days >= 0 {
        today + Days::new(days as u64)
    } else {
        today - Days::new(days.unsigned_abs())
    }
}

/// Three providers in two cities, two receivers, five listings and four
/// claims (three completed, one pending).
///
/// Headers and cells carry stray whitespace and odd casing, and one expiry
/// date is written `MM/DD/YYYY`, the way exported spreadsheets tend to look.
/// Listing 1 expired yesterday and listing 3 expires tomorrow; the rest
/// expire in a month.
pub fn scenario_csvs() -> [(&'static str, String); 4] {
    let yesterday = days_from_today(-1).format("%Y-%m-%d");
    let tomorrow = days_from_today(1).format("%m/%d/%Y");
    let later = days_from_today(30).format("%Y-%m-%d");

    [
        (
            "providers_data.csv",
            "\
 Provider_ID ,Name,Type,Address,CITY,Contact
1,Anna's Kitchen,Restaurant,12 Beach Rd, chennai ,+91-900000001
2,Fresh Mart,Grocery Store,4 Market St,Chennai,+91-900000002
3,Daily Bread,Supermarket,9 Hill Rd,PUNE,+91-900000003
"
            .to_string(),
        ),
        (
            "receivers_data.csv",
            "\
Receiver_ID,Name,Type,City,Contact
1,Hope Shelter,Shelter,Chennai,hope@example.org
2,Care NGO,NGO,pune,care@example.org
"
            .to_string(),
        ),
        (
            "food_listings_data.csv",
            format!(
                "\
Food_ID,Food_Name,Quantity,Expiry_Date,Provider_ID,Provider_Type,Location,Food_Type,Meal_Type
1,Rice,40,{yesterday},1,Restaurant,Chennai,Vegetarian,Lunch
2,Bread,25,{later},3,Supermarket,Pune,Vegan,Breakfast
3,Soup,10,{tomorrow},1,Restaurant,Chennai,Vegetarian,Dinner
4,Apples,60,{later},2,Grocery Store,Chennai,Vegan,Snacks
5,Curry,15,{later},3,Supermarket,Pune,Non-Vegetarian,Dinner
"
            ),
        ),
        (
            "claims_data.csv",
            "\
Claim_ID,Food_ID,Receiver_ID,Status,Timestamp
1,1,1,Completed,2025-03-05 10:00:00
2,2,2,Completed,3/6/2025 9:30
3,4,1,Completed,2025-03-07 18:45:00
4,3,2,Pending,2025-03-08 08:15:00
"
            .to_string(),
        ),
    ]
}
