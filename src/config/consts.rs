// src/config/consts.rs

// Site
pub const GARMIN_CONNECT_URL: &str = "https://connect.garmin.com";
pub const GPX_EXPORT_PATH: &str = "/modern/proxy/download-service/export/gpx/activity/";

// Snapshots
pub const DAY_PAGE_FILE: &str = "day.html";
pub const SUMMARY_FILE: &str = "summary.html";
pub const STEPS_FILE: &str = "steps.html";
pub const SLEEP_FILE: &str = "sleep.html";
pub const ACTIVITIES_FILE: &str = "activities.html";
pub const BREAKDOWN_FILE: &str = "breakdown.html";
pub const STEPS_DETAILS_FILE: &str = "steps_details.json";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "days";
pub const STEP_DETAILS_PREFIX: &str = "steps_details_";
pub const ACTIVITIES_DETAIL_FILE: &str = "activities";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Concurrency
pub const WORKERS: usize = 4;
