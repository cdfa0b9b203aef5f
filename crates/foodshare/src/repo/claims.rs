use super::{clean, ensure_exists};
use crate::Db;

use foodshare_core::{
    record::{Claim, ClaimStatus, NewClaim},
    schema, Error, Result,
};

/// A claim joined with the names it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSummary {
    pub claim_id: i64,
    pub food_name: Option<String>,
    pub receiver_name: Option<String>,
    pub status: Option<ClaimStatus>,
}

/// A listing with no active claim against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimableListing {
    pub food_id: i64,
    pub food_name: String,
    pub provider_name: String,
}

/// Access to the `claims` table.
#[derive(Debug, Clone, Copy)]
pub struct Claims<'a> {
    db: &'a Db,
}

impl<'a> Claims<'a> {
    pub(crate) fn new(db: &'a Db) -> Self {
        Self { db }
    }

    pub fn all(&self) -> Result<Vec<Claim>> {
        self.db
            .query("SELECT * FROM claims ORDER BY claim_id", &[])?
            .map_rows(Claim::from_row)
    }

    pub fn get(&self, claim_id: i64) -> Result<Option<Claim>> {
        self.db
            .query(
                "SELECT * FROM claims WHERE claim_id = ?1",
                &[claim_id.into()],
            )?
            .first()
            .map(Claim::from_row)
            .transpose()
    }

    /// Records a new claim. The listing and receiver must both exist.
    pub fn insert(&self, claim: &NewClaim) -> Result<Claim> {
        claim.validate()?;
        let claim = normalize(claim);

        let claim_id = self.db.transaction(|tx| {
            ensure_exists(tx, "claims.food_id", &schema::FOOD_LISTINGS, claim.food_id)?;
            ensure_exists(tx, "claims.receiver_id", &schema::RECEIVERS, claim.receiver_id)?;

            tx.execute(
                "INSERT INTO claims (food_id, receiver_id, status, timestamp) \
                 VALUES (?1, ?2, ?3, ?4)",
                &claim.params(),
            )?;
            Ok(tx.last_insert_id())
        })?;

        log::info!(
            "created claim #{claim_id}; food_id={} receiver_id={} status={:?}",
            claim.food_id,
            claim.receiver_id,
            claim.status
        );
        self.fetch(claim_id)
    }

    pub fn update(&self, claim_id: i64, claim: &NewClaim) -> Result<Claim> {
        claim.validate()?;
        let claim = normalize(claim);

        let mut params = claim.params();
        params.push(claim_id.into());

        self.db.transaction(|tx| {
            ensure_exists(tx, "claims.food_id", &schema::FOOD_LISTINGS, claim.food_id)?;
            ensure_exists(tx, "claims.receiver_id", &schema::RECEIVERS, claim.receiver_id)?;

            let count = tx.execute(
                "UPDATE claims SET food_id = ?1, receiver_id = ?2, status = ?3, \
                 timestamp = ?4 WHERE claim_id = ?5",
                &params,
            )?;
            if count == 0 {
                return Err(Error::record_not_found("claims", claim_id));
            }
            Ok(())
        })?;

        self.fetch(claim_id)
    }

    /// Every claim with its food and receiver names, newest first.
    pub fn summaries(&self) -> Result<Vec<ClaimSummary>> {
        self.db
            .query(
                "SELECT c.claim_id, f.food_name, r.name AS receiver_name, c.status \
                 FROM claims c \
                 LEFT JOIN food_listings f ON f.food_id = c.food_id \
                 LEFT JOIN receivers r ON r.receiver_id = c.receiver_id \
                 ORDER BY c.claim_id DESC",
                &[],
            )?
            .map_rows(|row| {
                Ok(ClaimSummary {
                    claim_id: row.get("claim_id")?,
                    food_name: row.get("food_name")?,
                    receiver_name: row.get("receiver_name")?,
                    status: row.get("status")?,
                })
            })
    }

    /// Listings that have a provider and no claim other than cancelled ones.
    ///
    /// A claim with no status still counts as active.
    pub fn claimable_listings(&self) -> Result<Vec<ClaimableListing>> {
        self.db
            .query(
                "SELECT f.food_id, f.food_name, p.name AS provider_name \
                 FROM food_listings f \
                 JOIN providers p ON p.provider_id = f.provider_id \
                 WHERE f.food_id NOT IN ( \
                     SELECT food_id FROM claims \
                     WHERE COALESCE(LOWER(TRIM(status)), '') != 'cancelled' \
                     AND food_id IS NOT NULL \
                 ) \
                 ORDER BY f.food_id",
                &[],
            )?
            .map_rows(|row| {
                Ok(ClaimableListing {
                    food_id: row.get("food_id")?,
                    food_name: row.get("food_name")?,
                    provider_name: row.get("provider_name")?,
                })
            })
    }

    /// Number of claims in each status.
    ///
    /// The known statuses come first and report zero when unused; any other
    /// stored status follows. Claims with no status are not counted.
    pub fn status_counts(&self) -> Result<Vec<(ClaimStatus, i64)>> {
        let rows = self.db.query(
            "SELECT status, COUNT(*) AS n FROM claims \
             WHERE status IS NOT NULL GROUP BY status ORDER BY status",
            &[],
        )?;

        let mut counts: Vec<_> = ClaimStatus::ALL.map(|status| (status, 0)).into();
        for row in rows.rows() {
            let status: ClaimStatus = row.get("status")?;
            let n: i64 = row.get("n")?;
            match counts.iter_mut().find(|(s, _)| *s == status) {
                Some(entry) => entry.1 += n,
                None => counts.push((status, n)),
            }
        }
        Ok(counts)
    }

    fn fetch(&self, claim_id: i64) -> Result<Claim> {
        self.get(claim_id)?
            .ok_or_else(|| Error::record_not_found("claims", claim_id))
    }
}

fn normalize(claim: &NewClaim) -> NewClaim {
    NewClaim {
        food_id: claim.food_id,
        receiver_id: claim.receiver_id,
        status: claim.status.clone(),
        timestamp: clean(&claim.timestamp),
    }
}
