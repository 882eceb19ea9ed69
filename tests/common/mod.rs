// tests/common/mod.rs
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

/// A full daily-summary page in the upstream layout. `kcal` ends up in the
/// stats strip and `run_kcal` in the first activity row.
pub fn day_page(steps_total: &str, run_kcal: &str) -> String {
    format!(
        r#"<html><body>
        <div class="content page steps sleep calories timeline">
          <div class="span4 page-navigation"><span class="like js-like-count">2 likes</span></div>
          <div class="note-container"><textarea id="noteTextarea">Easy day, "rest"</textarea></div>
          <div class="row-fluid bottom-m">
            <div class="span4 text-center charts">
              <div class="data-bit">{steps_total}</div>
              <div class="h5">Goal: 10.000</div>
            </div>
            <div class="span8 daily-summary-stats-placeholder">
              <div class="row-fluid top-xl">
                <div class="data-bit">2.210</div>
                <div class="data-bit">6,4 km</div>
                <div class="data-bit">8.700</div>
              </div>
            </div>
          </div>
          <div class="tab-content">
            <div id="pane2"><svg><g>
              <text><tspan>5%</tspan></text><text><tspan>10%</tspan></text>
              <text><tspan>50%</tspan></text><text><tspan>35%</tspan></text>
            </g></svg></div>
            <div id="pane4"><table>
              <tr><th>Time</th><th>Calories</th><th>Time</th><th>Distance</th><th>Type</th><th>Name</th></tr>
              <tr><td>07:15 AM</td><td>{run_kcal}</td><td>00:10:00</td><td>2 km</td><td>Running</td>
                  <td><a href="/modern/activity/111">Morning Run</a></td></tr>
              <tr><td>06:00 PM</td><td>250</td><td>00:05:00</td><td>1,5 km</td><td>Walking</td>
                  <td><a href="/modern/activity/222">Walk</a></td></tr>
            </table></div>
            <div id="pane5">
              <div class="equation centered">
                <div class="data-bit">7:10</div><div class="data-bit">0:20</div><div class="data-bit">7:30 hrs</div>
              </div>
              <div class="time-inline-edit-placeholder">11:00 PM</div>
              <div class="time-inline-edit-placeholder">6:30 AM</div>
              <div class="sleep-chart-secondary deep-sleep-circle-chart-placeholder"><span>1:30 hrs</span></div>
              <div class="sleep-chart-secondary light-sleep-circle-chart-placeholder"><span>5:20 hrs</span></div>
              <div class="sleep-chart-secondary awake-circle-chart-placeholder"><span>0:20 hrs</span></div>
            </div>
          </div>
        </div>
        </body></html>"#
    )
}

/// Three bins; the first one belongs to the previous day, like the site sends them.
pub fn step_bins(date: NaiveDate) -> String {
    let prev = date.pred_opt().unwrap();
    format!(
        r#"[
          {{"startGMT": "{prev}T23:45:00.0", "steps": 12}},
          {{"startGMT": "{date}T00:00:00.0", "steps": 0}},
          {{"startGMT": "{date}T00:15:00.0", "steps": "1.204"}}
        ]"#
    )
}

/// Capture one day as `<root>/<date>/day.html` (+ step bins).
pub fn write_snapshot(root: &Path, date: NaiveDate, page: &str) {
    let dir = root.join(date.format("%Y-%m-%d").to_string());
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("day.html"), page).unwrap();
    fs::write(dir.join("steps_details.json"), step_bins(date)).unwrap();
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
