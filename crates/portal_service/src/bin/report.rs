//! Declaration Portal - chart and deadline report
//!
//! Loads the portal configuration and both chart files, then logs a summary
//! of the charts and whether each deadline is still open.
//!
//! # Usage
//!
//! ```bash
//! PORTAL_REVENUE_CHART_PATH=charts/receitas.json \
//! PORTAL_EXPENSE_CHART_PATH=charts/despesas.json \
//! cargo run --bin portal-report
//! ```
//!
//! # Environment Variables
//!
//! * `PORTAL_DECLARATION_DEADLINE` - Declaration/expense deadline, local time (default: 2026-03-31T23:59:59)
//! * `PORTAL_REVENUE_DEADLINE` - Revenue deadline, local time (default: 2026-03-15T23:59:59)
//! * `PORTAL_TIMEZONE` - IANA timezone of the deadlines (default: America/Sao_Paulo)
//! * `PORTAL_FULL_FINALISTICA_ACCOUNTS` - Comma-separated auto-fill accounts
//! * `PORTAL_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `PORTAL_LOG_JSON` - `true` for JSON log lines

use core_kernel::{Clock, SystemClock};
use portal_service::{init_tracing, Portal, PortalConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = PortalConfig::from_env()?;
    init_tracing(&config.log_level, config.log_json);

    let chart = Portal::load_chart(&config)?;
    let now = SystemClock.now();

    for (label, tree) in [("revenue", &chart.revenue), ("expense", &chart.expense)] {
        tracing::info!(
            chart = label,
            accounts = tree.len(),
            analytical = tree.analytical_accounts().count(),
            groups = tree.groups().len(),
            collapsed = tree.collapse_view().hidden().count(),
            "chart loaded"
        );
    }

    let settings = config.editor_settings()?;
    for (label, deadline) in [
        ("declaration", settings.expense_deadline),
        ("revenue", settings.revenue_deadline),
    ] {
        tracing::info!(deadline = label, at = %deadline, open = deadline.is_open(now), "deadline");
    }

    Ok(())
}
