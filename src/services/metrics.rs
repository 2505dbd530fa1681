use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_gauge, register_gauge_vec, CounterVec, Gauge, GaugeVec};
use sqlx::PgPool;
use tracing::{info, warn};

lazy_static! {
    // ── Event counters ──────────────────────────────────────────────────────
    pub static ref LOGINS_COUNTER: CounterVec = register_counter_vec!(
        "api_logins_total",
        "Login attempts by status",
        &["status"]
    ).unwrap();

    pub static ref REGISTRATIONS_COUNTER: CounterVec = register_counter_vec!(
        "api_registrations_total",
        "Registration attempts by status",
        &["status"]
    ).unwrap();

    pub static ref AUTH_REJECTIONS_COUNTER: CounterVec = register_counter_vec!(
        "api_auth_rejections_total",
        "Requests refused by the auth gate, by reason",
        &["reason"]
    ).unwrap();

    // ── Catalog metrics ─────────────────────────────────────────────────────
    pub static ref USERS_GAUGE: GaugeVec = register_gauge_vec!(
        "catalog_users_total",
        "Registered users by role",
        &["role"]
    ).unwrap();

    pub static ref MOVIES_GAUGE: Gauge = register_gauge!(
        "catalog_movies_total",
        "Movies in the catalog"
    ).unwrap();
}

/// Spawn the background metrics collector (refreshes every 5 minutes).
pub fn start(pool: PgPool) {
    tokio::spawn(async move {
        loop {
            if let Err(e) = collect(&pool).await {
                warn!("Metrics: collection failed: {}", e);
            }
            tokio::time::sleep(tokio::time::Duration::from_secs(300)).await;
        }
    });
}

async fn collect(pool: &PgPool) -> anyhow::Result<()> {
    let user_counts: Vec<(String, i64)> =
        sqlx::query_as("SELECT role, COUNT(*)::BIGINT FROM users GROUP BY role")
            .fetch_all(pool)
            .await?;
    for (role, count) in user_counts {
        USERS_GAUGE.with_label_values(&[&role]).set(count as f64);
    }

    let movies: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM movies")
        .fetch_one(pool)
        .await?;
    MOVIES_GAUGE.set(movies as f64);

    info!("Metrics: collected ({} movies)", movies);
    Ok(())
}
