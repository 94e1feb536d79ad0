use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static PITCHES_CREATED: AtomicU64 = AtomicU64::new(0);
static VIEWS_RECORDED: AtomicU64 = AtomicU64::new(0);
static VIEW_FAILURES: AtomicU64 = AtomicU64::new(0);

pub fn increment_pitches_created() {
    PITCHES_CREATED.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_views_recorded() {
    VIEWS_RECORDED.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_view_failures() {
    VIEW_FAILURES.fetch_add(1, Ordering::Relaxed);
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetricsResponse {
    pub pitches_created_total: u64,
    pub pitch_views_recorded_total: u64,
    pub pitch_view_failures_total: u64,
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "System metrics", body = MetricsResponse)
    )
)]
pub async fn get_metrics() -> HttpResponse {
    let created = PITCHES_CREATED.load(Ordering::Relaxed);
    let views = VIEWS_RECORDED.load(Ordering::Relaxed);
    let failures = VIEW_FAILURES.load(Ordering::Relaxed);

    let metrics = format!(
        "# HELP pitches_created_total Total number of pitches created\n\
         # TYPE pitches_created_total counter\n\
         pitches_created_total {}\n\
         \n\
         # HELP pitch_views_recorded_total Total number of view increments recorded\n\
         # TYPE pitch_views_recorded_total counter\n\
         pitch_views_recorded_total {}\n\
         \n\
         # HELP pitch_view_failures_total Total number of failed view increments\n\
         # TYPE pitch_view_failures_total counter\n\
         pitch_view_failures_total {}\n",
        created, views, failures
    );

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics)
}
