//! The fixed catalogue of read-only reports.

use crate::Db;

use foodshare_core::{err, Error, Result, ResultTable, Value};

use std::{fmt, str::FromStr, sync::Arc};

/// A canned analytics query.
///
/// Every report is a single read statement run through [`Db::query`], so
/// results are cached until the next write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Report {
    ProvidersPerCity,
    ReceiversPerCity,
    QuantityByProviderType,
    ProvidersInCity,
    MostActiveReceivers,
    TotalQuantity,
    ListingsPerCity,
    FoodTypeFrequency,
    ClaimsPerFood,
    SuccessfulClaimsPerProvider,
    ClaimStatusDistribution,
    ExpiringSoon,
    UnclaimedListings,
}

impl Report {
    pub const ALL: [Report; 13] = [
        Self::ProvidersPerCity,
        Self::ReceiversPerCity,
        Self::QuantityByProviderType,
        Self::ProvidersInCity,
        Self::MostActiveReceivers,
        Self::TotalQuantity,
        Self::ListingsPerCity,
        Self::FoodTypeFrequency,
        Self::ClaimsPerFood,
        Self::SuccessfulClaimsPerProvider,
        Self::ClaimStatusDistribution,
        Self::ExpiringSoon,
        Self::UnclaimedListings,
    ];

    /// Kebab-case identifier used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::ProvidersPerCity => "providers-per-city",
            Self::ReceiversPerCity => "receivers-per-city",
            Self::QuantityByProviderType => "quantity-by-provider-type",
            Self::ProvidersInCity => "providers-in-city",
            Self::MostActiveReceivers => "most-active-receivers",
            Self::TotalQuantity => "total-quantity",
            Self::ListingsPerCity => "listings-per-city",
            Self::FoodTypeFrequency => "food-type-frequency",
            Self::ClaimsPerFood => "claims-per-food",
            Self::SuccessfulClaimsPerProvider => "successful-claims-per-provider",
            Self::ClaimStatusDistribution => "claim-status-distribution",
            Self::ExpiringSoon => "expiring-soon",
            Self::UnclaimedListings => "unclaimed-listings",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::ProvidersPerCity => "Geographic provider distribution",
            Self::ReceiversPerCity => "Receiver network",
            Self::QuantityByProviderType => "Top provider categories",
            Self::ProvidersInCity => "Provider directory for a city",
            Self::MostActiveReceivers => "Most active receivers",
            Self::TotalQuantity => "Total food available",
            Self::ListingsPerCity => "City ranking by listings",
            Self::FoodTypeFrequency => "Popular food types",
            Self::ClaimsPerFood => "Claims per food item",
            Self::SuccessfulClaimsPerProvider => "Provider success",
            Self::ClaimStatusDistribution => "Claim status distribution",
            Self::ExpiringSoon => "Expiring soon",
            Self::UnclaimedListings => "Unclaimed listings",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::ProvidersPerCity => "Number of providers in each city.",
            Self::ReceiversPerCity => "Number of receivers in each city.",
            Self::QuantityByProviderType => {
                "Total quantity listed by each type of provider, largest first."
            }
            Self::ProvidersInCity => "Name, type, address and contact of every provider in a city.",
            Self::MostActiveReceivers => "Receivers ranked by how many claims they have made.",
            Self::TotalQuantity => "Sum of the quantity across all listings.",
            Self::ListingsPerCity => "Cities ranked by number of listings.",
            Self::FoodTypeFrequency => "How often each food type is listed.",
            Self::ClaimsPerFood => "Claims made against each listing, including unclaimed ones.",
            Self::SuccessfulClaimsPerProvider => "Completed claims per provider.",
            Self::ClaimStatusDistribution => "Claim count and share of the total for each status.",
            Self::ExpiringSoon => "Listings whose expiry date is within the next two days.",
            Self::UnclaimedListings => "Listings that have never been claimed.",
        }
    }

    /// Name of the single parameter this report takes, if any.
    pub fn param(self) -> Option<&'static str> {
        match self {
            Self::ProvidersInCity => Some("city"),
            _ => None,
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Self::ProvidersPerCity => {
                "SELECT city, COUNT(*) AS providers_count FROM providers \
                 GROUP BY city ORDER BY providers_count DESC"
            }
            Self::ReceiversPerCity => {
                "SELECT city, COUNT(*) AS receivers_count FROM receivers \
                 GROUP BY city ORDER BY receivers_count DESC"
            }
            Self::QuantityByProviderType => {
                "SELECT provider_type, SUM(quantity) AS total_quantity FROM food_listings \
                 GROUP BY provider_type ORDER BY total_quantity DESC"
            }
            Self::ProvidersInCity => {
                "SELECT name, type, address, city, contact FROM providers \
                 WHERE city = ?1 ORDER BY name"
            }
            Self::MostActiveReceivers => {
                "SELECT r.receiver_id, r.name, COUNT(*) AS claims_count FROM claims c \
                 JOIN receivers r ON r.receiver_id = c.receiver_id \
                 GROUP BY r.receiver_id, r.name ORDER BY claims_count DESC"
            }
            Self::TotalQuantity => {
                "SELECT SUM(quantity) AS total_quantity_available FROM food_listings"
            }
            Self::ListingsPerCity => {
                "SELECT location AS city, COUNT(*) AS listings_count FROM food_listings \
                 GROUP BY location ORDER BY listings_count DESC"
            }
            Self::FoodTypeFrequency => {
                "SELECT food_type, COUNT(*) AS appearances FROM food_listings \
                 GROUP BY food_type ORDER BY appearances DESC"
            }
            Self::ClaimsPerFood => {
                "SELECT f.food_id, f.food_name, COUNT(c.claim_id) AS claim_count \
                 FROM food_listings f LEFT JOIN claims c ON c.food_id = f.food_id \
                 GROUP BY f.food_id, f.food_name ORDER BY claim_count DESC"
            }
            Self::SuccessfulClaimsPerProvider => {
                "SELECT p.provider_id, p.name, COUNT(*) AS successful_claims FROM claims c \
                 JOIN food_listings f ON f.food_id = c.food_id \
                 JOIN providers p ON p.provider_id = f.provider_id \
                 WHERE LOWER(c.status) = 'completed' \
                 GROUP BY p.provider_id, p.name ORDER BY successful_claims DESC"
            }
            Self::ClaimStatusDistribution => {
                "WITH total AS (SELECT COUNT(*) AS n FROM claims) \
                 SELECT status, COUNT(*) AS cnt, \
                 ROUND(100.0 * COUNT(*) / (SELECT n FROM total), 2) AS pct \
                 FROM claims GROUP BY status ORDER BY cnt DESC"
            }
            Self::ExpiringSoon => {
                "SELECT food_id, food_name, quantity, expiry_date, location FROM food_listings \
                 WHERE DATE(expiry_date) <= DATE('now', '+2 days') \
                 ORDER BY DATE(expiry_date) ASC"
            }
            Self::UnclaimedListings => {
                "SELECT f.food_id, f.food_name, f.quantity, f.location FROM food_listings f \
                 LEFT JOIN claims c ON c.food_id = f.food_id WHERE c.claim_id IS NULL"
            }
        }
    }

    /// Runs the report. `param` must be given exactly when [`Report::param`]
    /// is `Some`.
    pub fn run(self, db: &Db, param: Option<&str>) -> Result<Arc<ResultTable>> {
        let params: Vec<Value> = match (self.param(), param) {
            (Some(_), Some(value)) => vec![value.into()],
            (None, None) => vec![],
            (expected, _) => return Err(Error::report_parameter(self.name(), expected)),
        };

        log::debug!("running report; name={}", self.name());
        db.query(self.sql(), &params)
            .map_err(|err| err.context(err!("report `{}` failed", self.name())))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Report {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|report| report.name() == s.trim())
            .ok_or_else(|| err!("unknown report `{s}`"))
    }
}
