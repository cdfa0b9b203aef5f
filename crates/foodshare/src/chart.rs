//! Category counts over listings, for bar charts.

use crate::Db;

use foodshare_core::{err, Error, Result};

use std::{fmt, str::FromStr};

/// A listing column that can be charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Location,
    FoodType,
    MealType,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Self::Location, Self::FoodType, Self::MealType];

    pub fn column(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::FoodType => "food_type",
            Self::MealType => "meal_type",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Location => "City",
            Self::FoodType => "Food type",
            Self::MealType => "Meal type",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|dim| dim.column().eq_ignore_ascii_case(&s))
            .ok_or_else(|| err!("unknown chart dimension `{s}`"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Listings per value of `dimension`, most frequent first. Ties are ordered
/// by category; listings with no value are left out.
pub fn category_counts(db: &Db, dimension: Dimension) -> Result<Vec<CategoryCount>> {
    let column = dimension.column();
    let sql = format!(
        "SELECT {column} AS category, COUNT(*) AS n FROM food_listings \
         WHERE {column} IS NOT NULL GROUP BY {column} ORDER BY n DESC, {column} ASC"
    );

    db.query(&sql, &[])?.map_rows(|row| {
        Ok(CategoryCount {
            category: row.get("category")?,
            count: row.get("n")?,
        })
    })
}
