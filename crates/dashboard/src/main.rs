use anyhow::Context;
use serde::Serialize;

use skyhub_dashboard::{ActivityEntry, Dashboard, DashboardConfig, DashboardSnapshot};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    snapshot: DashboardSnapshot,
    categories: Vec<String>,
    recent_activity: Vec<ActivityEntry>,
}

fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::from_env().context("invalid configuration")?;
    skyhub_observability::init(&config.log);

    let dashboard = if config.seed {
        Dashboard::seeded().context("failed to load demo data")?
    } else {
        tracing::warn!("SKYHUB_SEED disabled; starting with an empty dashboard");
        Dashboard::new()
    };

    let report = Report {
        snapshot: dashboard.snapshot(),
        categories: dashboard
            .inventory
            .categories()
            .into_iter()
            .map(str::to_string)
            .collect(),
        recent_activity: dashboard.recent_activity(config.activity_limit),
    };

    let analytics = &report.snapshot.analytics;
    tracing::info!(
        completion_rate = analytics.order_completion_rate,
        active_drones = analytics.active_drone_count(),
        "analytics computed"
    );

    for alert in &report.snapshot.alerts {
        tracing::warn!(item = %alert.name, quantity = alert.quantity, status = %alert.status, "stock alert");
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
