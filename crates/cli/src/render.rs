use std::fmt::Write;

use gold_position_core::format::{
    format_asset_amount, format_currency, format_signed_percent, split_whole_fraction,
};
use gold_position_core::models::chart::PerformanceSeries;
use gold_position_core::models::position::Theme;
use gold_position_core::models::quote::ChangeDirection;
use gold_position_core::{GoldPositionTracker, Tab};

const RULE: &str = "────────────────────────────────────────────";

pub fn error_screen(message: &str) -> String {
    format!("{RULE}\n  ⚠  Error\n  {message}\n{RULE}")
}

/// Market status line, account line and the headline total value.
pub fn header(tracker: &GoldPositionTracker) -> String {
    let mut out = String::new();
    let snapshot = tracker.snapshot();
    let (quote, rate) = match (tracker.quote(), tracker.rate()) {
        (Some(q), Some(r)) => (q, r),
        _ => return "Loading...\n".to_string(),
    };

    let change = match quote.change_direction {
        ChangeDirection::Up => "▲",
        ChangeDirection::Down => "▼",
    };
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "  Gold investment  [position open]   {} {}",
        change,
        format_signed_percent(quote.percent_change)
    );
    let _ = writeln!(
        out,
        "  Ounce gold: {} ₺   USD/TRY: {}",
        format_currency(quote.buying_price_local(&rate)),
        format_currency(rate.quote_to_local)
    );
    let _ = writeln!(
        out,
        "  Ref {}   Gold amount: {}",
        tracker.transaction_id().unwrap_or("-"),
        format_asset_amount(snapshot.asset_amount)
    );
    let _ = writeln!(out, "{RULE}");

    let (whole, cents) = split_whole_fraction(snapshot.current_value_local);
    let _ = writeln!(out, "  Total position value");
    let _ = writeln!(out, "  {whole} ₺ ,{cents}");
    out
}

/// One line of the animated profit/loss counter.
pub fn counter_line(profit_loss: f64, percent: f64) -> String {
    let sign = if profit_loss >= 0.0 { "+" } else { "-" };
    format!(
        "  {sign}{} ₺  ({})",
        format_currency(profit_loss.abs()),
        format_signed_percent(percent)
    )
}

/// The active tab's panel.
pub fn panel(tracker: &GoldPositionTracker) -> String {
    match tracker.active_tab() {
        Tab::Position => position_panel(tracker),
        Tab::Summary => summary_panel(tracker),
    }
}

fn position_panel(tracker: &GoldPositionTracker) -> String {
    let mut out = String::new();
    let snapshot = tracker.snapshot();
    let params = tracker.params();
    let (quote, rate) = match (tracker.quote(), tracker.rate()) {
        (Some(q), Some(r)) => (q, r),
        _ => return out,
    };

    let _ = writeln!(out, "{RULE}\n  POSITION");
    let _ = writeln!(out, "  Invested        {} ₺", format_currency(snapshot.investment_local));
    let _ = writeln!(out, "  Current value   {} ₺", format_currency(snapshot.current_value_local));
    let _ = writeln!(out, "  Gold amount     {}", format_asset_amount(snapshot.asset_amount));
    let _ = writeln!(
        out,
        "  Entry price     {} ₺",
        format_currency(rate.to_local(params.entry_price_quote))
    );
    let _ = writeln!(
        out,
        "  Current price   {} ₺",
        format_currency(quote.buying_price_local(&rate))
    );
    let _ = writeln!(
        out,
        "  TP {} ₺   +{} ₺",
        format_currency(rate.to_local(params.target_price_quote)),
        format_currency(snapshot.displayed_target_profit())
    );
    let _ = writeln!(
        out,
        "  SL {} ₺   -{} ₺",
        format_currency(rate.to_local(params.stop_loss_quote)),
        format_currency(snapshot.displayed_potential_loss())
    );
    out
}

fn summary_panel(tracker: &GoldPositionTracker) -> String {
    let mut out = String::new();
    let snapshot = tracker.snapshot();
    let (quote, rate) = match (tracker.quote(), tracker.rate()) {
        (Some(q), Some(r)) => (q, r),
        _ => return out,
    };

    let _ = writeln!(out, "{RULE}\n  SUMMARY");
    let _ = writeln!(out, "  Invested        {} ₺", format_currency(snapshot.investment_local));
    let _ = writeln!(out, "  Current value   {} ₺", format_currency(snapshot.current_value_local));
    let _ = writeln!(
        out,
        "  {}",
        counter_line(snapshot.profit_loss_local, snapshot.profit_loss_percent).trim_start()
    );

    if let Some(progress) = tracker.target_progress() {
        let _ = writeln!(
            out,
            "  To target       ${:.2}  ({} ₺)",
            progress.distance_quote,
            format_currency(progress.distance_local)
        );
        let _ = writeln!(
            out,
            "  Target reached  {:.1}%  +{} ₺ at target",
            progress.progress_percent,
            format_currency(snapshot.displayed_target_profit())
        );
    }

    let stats = quote.statistics.to_local(&rate);
    if let Some(prev) = stats.previous_close {
        let _ = writeln!(out, "  Previous close  {} ₺", format_currency(prev));
    }
    for (label, low, high) in stats.ranges() {
        let fmt = |v: Option<f64>| v.map(format_currency).unwrap_or_else(|| "N/A".into());
        let _ = writeln!(out, "  {label:<8} low {} ₺  high {} ₺", fmt(low), fmt(high));
    }
    out
}

pub fn chart_caption(series: &PerformanceSeries) -> String {
    format!(
        "{RULE}\n  Performance (simulated, {} points, range {:.2}% .. {:.2}%)\n{RULE}\n",
        series.points.len(),
        series.min_value,
        series.max_value
    )
}

/// A standalone 200 x 80 SVG of the simulated performance curve.
pub fn chart_svg(series: &PerformanceSeries, theme: Theme, profit: bool) -> String {
    let background = match theme {
        Theme::Dark => "#0A0A0A",
        Theme::Light => "#FFFFFF",
    };
    let stroke = if profit { "#10B981" } else { "#EF4444" };

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 80" width="400" height="160">"#
    );
    let _ = writeln!(svg, r#"  <rect width="200" height="80" fill="{background}"/>"#);
    let _ = writeln!(
        svg,
        r#"  <path d="{}" fill="none" stroke="{stroke}" stroke-width="2" stroke-linecap="round"/>"#,
        series.path
    );
    if let Some(last) = series.points.last() {
        let _ = writeln!(
            svg,
            r#"  <circle cx="{}" cy="{}" r="3" fill="{stroke}"/>"#,
            last.x, last.y
        );
    }
    svg.push_str("</svg>\n");
    svg
}
