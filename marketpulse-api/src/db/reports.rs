//! Report persistence
//!
//! Reports are created by the analyze endpoint, listed and fetched by their
//! owner, and optionally renamed. There is no delete: a report is a
//! permanent record once created. The demo seed lives here too.

use chrono::{DateTime, Utc};
use marketpulse_common::{AnalysisData, Error, Report, Result};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Owner of the seeded demonstration report
pub const DEMO_USER_ID: &str = "demo";
/// Seed report location
pub const DEMO_ADDRESS: &str = "742 Evergreen Terrace, Springfield, IL";
/// Seed report business type
pub const DEMO_BUSINESS_TYPE: &str = "Coffee Shop";

const REPORT_COLUMNS: &str = "id, user_id, name, address, business_type, data, created_at";

/// Insert a new report owned by `user_id`
///
/// `data` has already been validated as `AnalysisData` by the generator;
/// from here on it is carried as opaque JSON.
pub async fn create_report(
    pool: &SqlitePool,
    user_id: &str,
    address: &str,
    business_type: &str,
    data: &AnalysisData,
) -> Result<Report> {
    let data_json =
        serde_json::to_string(data).map_err(|e| Error::Internal(format!("Encode report data: {}", e)))?;
    let created_at = Utc::now();

    let row = sqlx::query("INSERT INTO reports (user_id, address, business_type, data, created_at) VALUES (?, ?, ?, ?, ?) RETURNING id")
        .bind(user_id)
        .bind(address)
        .bind(business_type)
        .bind(&data_json)
        .bind(created_at)
        .fetch_one(pool)
        .await?;

    Ok(Report {
        id: row.get("id"),
        user_id: user_id.to_string(),
        name: None,
        address: address.to_string(),
        business_type: business_type.to_string(),
        data: serde_json::to_value(data)
            .map_err(|e| Error::Internal(format!("Encode report data: {}", e)))?,
        created_at,
    })
}

/// Fetch one report iff it exists and is owned by `user_id`
///
/// Ownership mismatch and nonexistence are indistinguishable to the caller.
pub async fn get_report(pool: &SqlitePool, id: i64, user_id: &str) -> Result<Option<Report>> {
    let row = sqlx::query(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports WHERE id = ? AND user_id = ?"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    row.map(map_report).transpose()
}

/// All reports owned by `user_id`, newest first
pub async fn list_reports(pool: &SqlitePool, user_id: &str) -> Result<Vec<Report>> {
    let rows = sqlx::query(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports WHERE user_id = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(map_report).collect()
}

/// Set the display name of an owned report; `NotFound` when no row matched
pub async fn rename_report(
    pool: &SqlitePool,
    id: i64,
    user_id: &str,
    name: &str,
) -> Result<Report> {
    let row = sqlx::query(&format!(
        "UPDATE reports SET name = ? WHERE id = ? AND user_id = ? RETURNING {REPORT_COLUMNS}"
    ))
    .bind(name)
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => map_report(row),
        None => Err(Error::NotFound(format!("Report {} not found", id))),
    }
}

/// Insert the demonstration report iff the reports table is empty
///
/// Single conditional INSERT so concurrent process startups cannot both
/// seed. Returns whether a row was inserted.
pub async fn ensure_demo_report(pool: &SqlitePool) -> Result<bool> {
    let data_json = serde_json::to_string(&demo_analysis())
        .map_err(|e| Error::Internal(format!("Encode seed data: {}", e)))?;

    let result = sqlx::query(
        r#"
        INSERT INTO reports (user_id, name, address, business_type, data, created_at)
        SELECT ?, ?, ?, ?, ?, ?
        WHERE NOT EXISTS (SELECT 1 FROM reports)
        "#,
    )
    .bind(DEMO_USER_ID)
    .bind("Sample Report")
    .bind(DEMO_ADDRESS)
    .bind(DEMO_BUSINESS_TYPE)
    .bind(&data_json)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

fn map_report(row: SqliteRow) -> Result<Report> {
    let id: i64 = row.get("id");
    let data_json: String = row.get("data");
    let data = serde_json::from_str(&data_json)
        .map_err(|e| Error::Internal(format!("Report {} has unreadable data: {}", id, e)))?;

    Ok(Report {
        id,
        user_id: row.get("user_id"),
        name: row.get("name"),
        address: row.get("address"),
        business_type: row.get("business_type"),
        data,
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    })
}

/// Hardcoded analysis payload for the demonstration report
fn demo_analysis() -> AnalysisData {
    use marketpulse_common::analysis::*;

    AnalysisData {
        market_size: MarketSize {
            tam: MarketSegment {
                value: 8_500_000.0,
                description: "Annual coffee and light-food spend within a 5-mile radius".into(),
            },
            sam: MarketSegment {
                value: 2_100_000.0,
                description: "Spend reachable by an independent sit-down coffee shop".into(),
            },
            som: MarketSegment {
                value: 380_000.0,
                description: "Realistic first-year capture given three established competitors".into(),
            },
        },
        demographics: Demographics {
            population: 46_500.0,
            median_income: 58_200.0,
            age_groups: vec![
                AgeGroup { range: "18-24".into(), percentage: 13.0 },
                AgeGroup { range: "25-44".into(), percentage: 36.0 },
                AgeGroup { range: "45-64".into(), percentage: 31.0 },
                AgeGroup { range: "65+".into(), percentage: 20.0 },
            ],
            description: "Mixed residential and commercial corridor with a strong commuter base"
                .into(),
        },
        psychographics: Psychographics {
            interests: vec!["specialty coffee".into(), "remote work".into(), "local events".into()],
            lifestyle: "Commuters and remote workers who treat cafes as a third place".into(),
            buying_behavior: "Weekday-morning habitual purchases, loyalty-program responsive".into(),
        },
        weather: WeatherImpact {
            seasonal_trends: "Hot summers and snowy winters with mild shoulder seasons".into(),
            impact_on_business: "Hot-drink sales peak November through February; iced drinks carry the summer".into(),
        },
        traffic: TrafficProfile {
            typical_traffic: "Steady weekday vehicle flow with heavy morning peaks".into(),
            challenges: vec!["limited street parking".into(), "construction on the main artery".into()],
            peak_hours: "7-9am and 4-6pm weekdays".into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    #[tokio::test]
    async fn create_then_get_round_trips_data() {
        let pool = memory_pool().await;
        let data = demo_analysis();

        let created = create_report(&pool, "user-1", "1 Main St", "Bakery", &data)
            .await
            .expect("create failed");

        let fetched = get_report(&pool, created.id, "user-1")
            .await
            .expect("get failed")
            .expect("report missing");

        assert_eq!(fetched.address, "1 Main St");
        assert_eq!(fetched.business_type, "Bakery");
        assert_eq!(fetched.name, None);
        assert_eq!(fetched.data, serde_json::to_value(&data).unwrap());
    }

    #[tokio::test]
    async fn get_is_owner_scoped() {
        let pool = memory_pool().await;
        let created = create_report(&pool, "user-1", "1 Main St", "Bakery", &demo_analysis())
            .await
            .unwrap();

        let other = get_report(&pool, created.id, "user-2").await.unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn list_is_newest_first_and_owner_scoped() {
        let pool = memory_pool().await;
        let first = create_report(&pool, "user-1", "1 First St", "Bakery", &demo_analysis())
            .await
            .unwrap();
        let second = create_report(&pool, "user-1", "2 Second St", "Gym", &demo_analysis())
            .await
            .unwrap();
        create_report(&pool, "user-2", "3 Third St", "Florist", &demo_analysis())
            .await
            .unwrap();

        let reports = list_reports(&pool, "user-1").await.unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].id, second.id);
        assert_eq!(reports[1].id, first.id);
        assert!(reports.iter().all(|r| r.user_id == "user-1"));
    }

    #[tokio::test]
    async fn rename_updates_only_name() {
        let pool = memory_pool().await;
        let created = create_report(&pool, "user-1", "1 Main St", "Bakery", &demo_analysis())
            .await
            .unwrap();

        let renamed = rename_report(&pool, created.id, "user-1", "My Report")
            .await
            .unwrap();

        assert_eq!(renamed.name.as_deref(), Some("My Report"));
        assert_eq!(renamed.address, created.address);
        assert_eq!(renamed.data, created.data);
        assert_eq!(renamed.created_at, created.created_at);
    }

    #[tokio::test]
    async fn rename_of_foreign_report_is_not_found_and_leaves_row_unchanged() {
        let pool = memory_pool().await;
        let created = create_report(&pool, "user-1", "1 Main St", "Bakery", &demo_analysis())
            .await
            .unwrap();

        let result = rename_report(&pool, created.id, "user-2", "Hijacked").await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        let unchanged = get_report(&pool, created.id, "user-1").await.unwrap().unwrap();
        assert_eq!(unchanged.name, None);
    }

    #[tokio::test]
    async fn seed_inserts_once_on_empty_table() {
        let pool = memory_pool().await;

        assert!(ensure_demo_report(&pool).await.unwrap());
        assert!(!ensure_demo_report(&pool).await.unwrap());

        let reports = list_reports(&pool, DEMO_USER_ID).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].address, DEMO_ADDRESS);
        assert_eq!(reports[0].business_type, DEMO_BUSINESS_TYPE);
    }

    #[tokio::test]
    async fn seed_skips_non_empty_table() {
        let pool = memory_pool().await;
        create_report(&pool, "user-1", "1 Main St", "Bakery", &demo_analysis())
            .await
            .unwrap();

        assert!(!ensure_demo_report(&pool).await.unwrap());
        assert!(list_reports(&pool, DEMO_USER_ID).await.unwrap().is_empty());
    }
}
