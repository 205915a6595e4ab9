//! Colorful console output for planning events.
//!
//! Provides a custom `tracing` layer that formats engine events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Training, allocation, route and plan lifecycle
//! - **WARN**: Raised alerts
//! - **DEBUG**: Per-epoch training loss

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[cfg(test)]
mod tests;

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static RUN_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn,reliefroute_engine=info,reliefroute=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ReliefConsoleLayer)
            .try_init();
    });
}

// Marks the start of a training or planning run for elapsed time tracking.
fn mark_run_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    RUN_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = RUN_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 ____      _ _       __ ____             _
|  _ \ ___| (_) ___ / _|  _ \ ___  _   _| |_ ___
| |_) / _ \ | |/ _ \ |_| |_) / _ \| | | | __/ _ \
|  _ <  __/ | |  __/  _|  _ < (_) | |_| | ||  __/
|_| \_\___|_|_|\___|_| |_| \_\___/ \__,_|\__\___|
"#;

    let version_line = format!(
        "             v{} - Food Distribution Planning\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats planning events with colors.
pub struct ReliefConsoleLayer;

impl<S: Subscriber> Layer<S> for ReliefConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        // Accept events from engine and planner modules
        if !target.starts_with("reliefroute_engine") && !target.starts_with("reliefroute::") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let level = *metadata.level();
        let output = format_event(&visitor, level);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    area: Option<String>,
    kind: Option<String>,
    message: Option<String>,
    rows: Option<u64>,
    arity: Option<u64>,
    epochs: Option<u64>,
    epoch: Option<u64>,
    items: Option<u64>,
    stops: Option<u64>,
    areas: Option<u64>,
    alerts: Option<u64>,
    mse: Option<f64>,
    base: Option<f64>,
    adjusted: Option<f64>,
    total_stock: Option<f64>,
    allocated: Option<f64>,
    distance: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "area" => self.area = Some(s.trim_matches('"').to_string()),
            "kind" => self.kind = Some(s),
            "message" => self.message = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "rows" => self.rows = Some(value),
            "arity" => self.arity = Some(value),
            "epochs" => self.epochs = Some(value),
            "epoch" => self.epoch = Some(value),
            "items" => self.items = Some(value),
            "stops" => self.stops = Some(value),
            "areas" => self.areas = Some(value),
            "alerts" => self.alerts = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "mse" => self.mse = Some(value),
            "base" => self.base = Some(value),
            "adjusted" => self.adjusted = Some(value),
            "total_stock" => self.total_stock = Some(value),
            "allocated" => self.allocated = Some(value),
            "distance" => self.distance = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "area" => self.area = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "training_start" => format_training_start(v),
        "training_end" => format_training_end(v),
        "epoch" => format_epoch(v, level),
        "allocation" => format_allocation(v),
        "route_built" => format_route(v),
        "alert_raised" => format_alert(v),
        "plan_start" => format_plan_start(v),
        "plan_end" => format_plan_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_training_start(v: &EventVisitor) -> String {
    mark_run_start();
    let rows = v.rows.unwrap_or(0);
    let arity = v.arity.unwrap_or(0);
    let epochs = v.epochs.unwrap_or(0);

    format!(
        "{} {} Training │ {} rows │ {} features │ {} epochs",
        format_elapsed(),
        "▶".bright_green().bold(),
        rows.to_formatted_string(&Locale::en).bright_yellow(),
        arity.to_formatted_string(&Locale::en).bright_yellow(),
        epochs.to_formatted_string(&Locale::en).bright_yellow(),
    )
}

fn format_training_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Training complete │ mse {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_quantity(v.mse.unwrap_or(0.0)).bright_magenta(),
    )
}

fn format_epoch(v: &EventVisitor, level: Level) -> String {
    if level < Level::DEBUG {
        return String::new();
    }

    format!(
        "{} {} Epoch {:>6} │ mse {}",
        format_elapsed(),
        "·".bright_black(),
        v.epoch.unwrap_or(0).to_formatted_string(&Locale::en).bright_black(),
        format_quantity(v.mse.unwrap_or(0.0)).bright_black(),
    )
}

fn format_allocation(v: &EventVisitor) -> String {
    let area = v.area.as_deref().unwrap_or("?");
    let base = v.base.unwrap_or(0.0);
    let adjusted = v.adjusted.unwrap_or(0.0);
    let items = v.items.unwrap_or(0);

    format!(
        "{} {} {} │ required {} │ adjusted {} │ {} items",
        format_elapsed(),
        "→".bright_blue(),
        area.white().bold(),
        format_quantity(base).yellow(),
        format_quantity(adjusted).bright_yellow().bold(),
        items.to_formatted_string(&Locale::en).white(),
    )
}

fn format_route(v: &EventVisitor) -> String {
    let stops = v.stops.unwrap_or(0);

    format!(
        "{} {} Route │ {} stops",
        format_elapsed(),
        "⇢".bright_blue(),
        stops.to_formatted_string(&Locale::en).bright_yellow(),
    )
}

fn format_alert(v: &EventVisitor) -> String {
    let kind = v.kind.as_deref().unwrap_or("Alert");
    let message = v.message.as_deref().unwrap_or("");

    format!(
        "{} {} {} │ {}",
        format_elapsed(),
        "⚠".bright_red().bold(),
        kind.bright_red(),
        message.white(),
    )
}

fn format_plan_start(v: &EventVisitor) -> String {
    mark_run_start();
    let areas = v.areas.unwrap_or(0);
    let items = v.items.unwrap_or(0);
    let stock = v.total_stock.unwrap_or(0.0);

    format!(
        "{} {} Planning │ {} areas │ {} items │ {} units in stock",
        format_elapsed(),
        "▶".bright_green().bold(),
        areas.to_formatted_string(&Locale::en).bright_yellow(),
        items.to_formatted_string(&Locale::en).bright_yellow(),
        format_quantity(stock).bright_yellow(),
    )
}

fn format_plan_end(v: &EventVisitor) -> String {
    let areas = v.areas.unwrap_or(0);
    let allocated = v.allocated.unwrap_or(0.0);
    let distance = v.distance.unwrap_or(0.0);
    let alerts = v.alerts.unwrap_or(0);

    let mut output = format!(
        "{} {} Plan complete │ {} allocated │ route {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_quantity(allocated).bright_yellow().bold(),
        format!("{:.2}", distance).bright_magenta(),
    );
    if alerts > 0 {
        output.push_str(&format!(
            " │ {} alerts",
            alerts.to_formatted_string(&Locale::en).bright_red().bold()
        ));
    }

    // Summary box
    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output.push_str(&box_row("Areas served:", &areas.to_formatted_string(&Locale::en)));
    output.push('\n');
    output.push_str(&box_row("Units allocated:", &format_quantity(allocated)));
    output.push('\n');
    output.push_str(&box_row("Route length:", &format!("{:.2}", distance)));
    output.push('\n');
    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn box_row(label: &str, value: &str) -> String {
    format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        label,
        value,
        "║".bright_cyan()
    )
}

/// Formats a quantity with thousands separators and two decimals.
fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = (value.abs() * 100.0).round() as u64;
    let whole = (rounded / 100).to_formatted_string(&Locale::en);
    let sign = if value < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, whole, rounded % 100)
}
