//! Text rendering of a plan.

use std::fmt::Write;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use serde::Serialize;

use reliefroute::{AlertStatus, CenterStatus, DistributionPlan, Point, TrainingReport};

/// Everything `plan --json` prints.
#[derive(Debug, Serialize)]
pub struct PlanOutput<'a> {
    pub training: TrainingReport,
    pub centers: Vec<CenterStatus>,
    pub plan: &'a DistributionPlan,
}

const SEPARATOR: &str = "══════════════════════════════════════════════════";

pub fn render(output: &PlanOutput<'_>) -> String {
    let mut out = String::new();
    let plan = output.plan;

    section(&mut out, "Distribution Centers");
    for center in &output.centers {
        let _ = writeln!(
            out,
            "  {:<8} at {}  capacity {}  utilization {:.1}%",
            center.id.as_str().white().bold(),
            point(center.location),
            units(center.capacity).bright_yellow(),
            center.utilization * 100.0,
        );
    }

    section(&mut out, "Demand Predictions");
    let _ = writeln!(
        out,
        "  trained on {} rows over {} epochs, final mse {:.4}",
        output.training.rows, output.training.epochs, output.training.final_mse
    );
    for area in &plan.areas {
        let _ = writeln!(
            out,
            "  {:<8} {} units",
            area.area_id.as_str().white().bold(),
            format!("{:.2}", area.predicted_demand).bright_yellow(),
        );
    }

    section(&mut out, "Resource Allocation");
    for area in &plan.areas {
        let allocation = &area.allocation;
        let _ = writeln!(out, "  {}", area.area_id.as_str().white().bold());
        let _ = writeln!(out, "    base quantity:     {:.2}", allocation.base_quantity);
        let _ = writeln!(
            out,
            "    adjusted quantity: {}",
            format!("{:.2}", allocation.adjusted_quantity).bright_yellow()
        );
        for (item, quantity) in &allocation.food_allocation {
            let _ = writeln!(out, "      - {item:<10} {quantity:>10.2} units");
        }
    }

    section(&mut out, "Delivery Route");
    let _ = writeln!(out, "  Start: depot {}", point(plan.route.depot()));
    for (i, (id, stop)) in plan
        .visiting_order
        .iter()
        .zip(plan.route.deliveries())
        .enumerate()
    {
        let _ = writeln!(
            out,
            "  Stop {}: {} {}",
            i + 1,
            id.as_str().white().bold(),
            point(*stop)
        );
    }
    let _ = writeln!(
        out,
        "  Total distance: {}",
        format!("{:.2}", plan.route.total_distance()).bright_magenta()
    );

    section(&mut out, "Alerts");
    let active: Vec<_> = plan
        .alerts
        .iter()
        .filter(|alert| alert.status == AlertStatus::Active)
        .collect();
    if active.is_empty() {
        let _ = writeln!(out, "  {}", "No active alerts".bright_green());
    } else {
        for alert in active {
            let _ = writeln!(
                out,
                "  {} {} ({})",
                "!".bright_red().bold(),
                alert.message,
                alert.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
    }

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", SEPARATOR.bright_cyan());
    let _ = writeln!(out, "{}", title.bright_white().bold());
}

fn point(p: Point) -> String {
    format!("({}, {})", p.x, p.y)
}

fn units(value: f64) -> String {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        (value as u64).to_formatted_string(&Locale::en)
    } else {
        format!("{value:.2}")
    }
}
