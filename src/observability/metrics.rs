//! Metrics collection.
//!
//! # Metrics
//! - `router_resolutions_total` (counter): successful resolutions by route
//! - `router_not_found_total` (counter): paths with no matching route
//! - `router_view_loads_total` (counter): lazy view loads by component, outcome
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no-ops until a recorder is installed
//! - Labels limited to route and component names (bounded by the table)

pub const RESOLUTIONS_TOTAL: &str = "router_resolutions_total";
pub const NOT_FOUND_TOTAL: &str = "router_not_found_total";
pub const VIEW_LOADS_TOTAL: &str = "router_view_loads_total";

/// Record a successful path resolution.
pub fn record_resolution(route: &str) {
    ::metrics::counter!(RESOLUTIONS_TOTAL, "route" => route.to_string()).increment(1);
}

/// Record a path that matched no route.
pub fn record_not_found() {
    ::metrics::counter!(NOT_FOUND_TOTAL).increment(1);
}

/// Record the outcome of a lazy view load.
pub fn record_view_load(component: &str, success: bool) {
    let outcome = if success { "loaded" } else { "failed" };
    ::metrics::counter!(
        VIEW_LOADS_TOTAL,
        "component" => component.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
