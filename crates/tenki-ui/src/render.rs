//! Plain-text rendering of the region menu and the forecast view.

use tenki_forecast::{regions, DayForecast, ForecastPair, Temperature, REGIONS};
use unicode_width::UnicodeWidthStr;

use crate::models::forecast_model::ViewState;

pub const PROMPT_MESSAGE: &str = "Choose a region to get the weather forecast.";
pub const UNAVAILABLE_MESSAGE: &str =
    "No weather data available. The server may be experiencing an error.";
/// Shown in place of a temperature the service did not report.
pub const NO_DATA: &str = "no data";

const PANEL_GAP: &str = "  │  ";

/// The selector: a blank option followed by every region in order.
pub fn render_menu() -> String {
    let mut out = String::from("Regions:\n   -  (none)\n");
    for (i, region) in REGIONS.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}  {} {} [{}]\n",
            i + 1,
            region.display_name,
            region.local_name,
            region.id
        ));
    }
    out.push_str("Enter a number or region id to fetch, '-' to clear, 'l' to list, 'q' to quit.");
    out
}

pub fn render(view: &ViewState) -> String {
    match view {
        ViewState::Unselected => PROMPT_MESSAGE.to_string(),
        ViewState::Loading { region_id } => {
            format!("Fetching forecast for {}...", regions::label(region_id))
        }
        ViewState::Unavailable { .. } => UNAVAILABLE_MESSAGE.to_string(),
        ViewState::Loaded {
            region_id,
            forecast,
        } => render_forecast(region_id, forecast),
    }
}

fn render_forecast(region_id: &str, forecast: &ForecastPair) -> String {
    let heading = match regions::find(region_id) {
        Some(region) => format!("{} ({})", region.display_name, region.local_name),
        None => region_id.to_string(),
    };
    let left = panel("Today", &forecast.today);
    let right = panel("Tomorrow", &forecast.tomorrow);
    format!("{}\n\n{}", heading, side_by_side(&left, &right))
}

fn panel(title: &str, day: &DayForecast) -> Vec<String> {
    vec![
        title.to_string(),
        day.date.clone(),
        format!("{} {}", day.icon().glyph(), day.icon_url),
        day.condition.clone(),
        format!("High: {}", format_temperature(day.high)),
        format!("Low:  {}", format_temperature(day.low)),
        format!("Rain: {}%", format_number(day.precipitation_percent)),
    ]
}

fn side_by_side(left: &[String], right: &[String]) -> String {
    let width = left.iter().map(|l| display_width(l)).max().unwrap_or(0);
    let rows = left.len().max(right.len());

    (0..rows)
        .map(|i| {
            let l = left.get(i).map(String::as_str).unwrap_or("");
            let r = right.get(i).map(String::as_str).unwrap_or("");
            let pad = " ".repeat(width - display_width(l));
            format!("{}{}{}{}", l, pad, PANEL_GAP, r).trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `23℃`, or the no-data marker.
pub fn format_temperature(temperature: Temperature) -> String {
    temperature
        .celsius()
        .map_or_else(|| NO_DATA.to_string(), |c| format!("{}℃", format_number(c)))
}

/// Shortest decimal form: `22.5`, and `23` rather than `23.0`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Avoid printing "-0".
        return "0".to_string();
    }
    n.to_string()
}

/// Terminal column width. Ambiguous-width characters such as `℃` count as
/// two columns, as they do in CJK terminals.
fn display_width(s: &str) -> usize {
    s.width_cjk()
}
