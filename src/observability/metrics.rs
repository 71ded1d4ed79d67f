//! Metrics collection and exposition.
//!
//! # Metrics
//! - `killboard_requests_total` (counter): page requests by page and status
//! - `killboard_request_duration_seconds` (histogram): request latency
//! - `killboard_redirects_total` (counter): stale links redirected
//! - `killboard_assembly_duration_seconds` (histogram): time spent in `assemble`
//! - `killboard_assembly_slots` (histogram): slots rendered per page
//! - `killboard_unresolved_callbacks_total` (counter): callbacks that produced nothing, by slot
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed, so the core can
//!   record unconditionally
//! - Label values come from fixed sets; page names outside [`BOARD_PAGES`]
//!   are recorded as `other`

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Pages recorded under their own name.
pub const BOARD_PAGES: [&str; 14] = [
    "home",
    "kills",
    "losses",
    "awards",
    "search",
    "kill_detail",
    "kill_related",
    "pilot_detail",
    "corp_detail",
    "alliance_detail",
    "system_detail",
    "invtype",
    "about",
    "redirect",
];

const OTHER_PAGE: &str = "other";

/// Label for a requested page name; the name comes from the client.
pub fn page_label(page: &str) -> &'static str {
    BOARD_PAGES
        .iter()
        .copied()
        .find(|known| *known == page)
        .unwrap_or(OTHER_PAGE)
}

pub fn record_request(page: &str, status: u16, start: Instant) {
    let page = page_label(page);
    let status = status.to_string();
    counter!("killboard_requests_total", "page" => page, "status" => status.clone())
        .increment(1);
    histogram!("killboard_request_duration_seconds", "page" => page, "status" => status)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_redirect() {
    counter!("killboard_redirects_total").increment(1);
}

pub fn record_assembly(slots: usize, start: Instant) {
    histogram!("killboard_assembly_duration_seconds").record(start.elapsed().as_secs_f64());
    histogram!("killboard_assembly_slots").record(slots as f64);
}

pub fn record_unresolved_callback(slot: &str) {
    counter!("killboard_unresolved_callbacks_total", "slot" => slot.to_string()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_label_folds_unknown_pages() {
        assert_eq!(page_label("kill_detail"), "kill_detail");
        assert_eq!(page_label("redirect"), "redirect");
        assert_eq!(page_label("junk1"), "other");
        assert_eq!(page_label(""), "other");
    }

    #[test]
    fn test_junk_pages_share_one_series() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            let start = Instant::now();
            for i in 0..50 {
                record_request(&format!("junk{i}"), 200, start);
            }
            record_request("home", 200, start);
        });

        let rendered = handle.render();
        let series: Vec<_> = rendered
            .lines()
            .filter(|l| l.starts_with("killboard_requests_total{"))
            .collect();
        assert_eq!(series.len(), 2, "{rendered}");
        assert!(series.iter().any(|l| l.contains("page=\"other\"") && l.ends_with(" 50")));
    }
}
