use colored::{Color, Colorize};
use mortgage_calc_core::display::{format_usd, interest_headline};
use mortgage_calc_core::MortgageSummary;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{as_decimal, format_scalar, SUMMARY_FIELDS};
use crate::preferences::Theme;

/// Colours for one theme.
struct Palette {
    heading: Color,
    accent: Color,
    warning: Color,
    error: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                heading: Color::Black,
                accent: Color::Blue,
                warning: Color::Yellow,
                error: Color::Red,
            },
            Theme::Dark => Palette {
                heading: Color::BrightWhite,
                accent: Color::BrightCyan,
                warning: Color::BrightYellow,
                error: Color::BrightRed,
            },
        }
    }
}

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value, theme: Theme) {
    let palette = Palette::for_theme(theme);
    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                print_summary(result, map, &palette);
            } else if let Some(Value::Object(errors)) = map.get("errors") {
                print_validation(errors, &palette);
            } else {
                println!("{}", flat_table(map));
            }
        }
        _ => println!("{}", format_scalar(value)),
    }
}

fn print_summary(result: &Map<String, Value>, envelope: &Map<String, Value>, palette: &Palette) {
    println!("{}", "Your Mortgage Summary".color(palette.heading).bold());
    println!("{}", summary_table(result));

    if let Some(summary) = parse_summary(result) {
        let term = envelope
            .get("assumptions")
            .and_then(|a| a.get("loan_term_years"))
            .and_then(as_decimal);
        println!("\n{}", interest_headline(&summary, term).color(palette.accent));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".color(palette.warning).bold());
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s.color(palette.warning));
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn summary_table(result: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, label) in SUMMARY_FIELDS {
        if let Some(val) = result.get(key) {
            let shown = as_decimal(val)
                .map(format_usd)
                .unwrap_or_else(|| format_scalar(val));
            builder.push_record([label.to_string(), shown]);
        }
    }
    builder.build()
}

fn parse_summary(result: &Map<String, Value>) -> Option<MortgageSummary> {
    serde_json::from_value(Value::Object(result.clone())).ok()
}

fn print_validation(errors: &Map<String, Value>, palette: &Palette) {
    if errors.is_empty() {
        println!("{}", "All inputs are valid".color(palette.accent).bold());
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(["Field", "Error"]);
    for (field, msg) in errors {
        builder.push_record([field.clone(), format_scalar(msg)]);
    }
    println!("{}", "Please correct the following:".color(palette.error).bold());
    println!("{}", builder.build());
}

fn flat_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), format_scalar(val)]);
    }
    builder.build()
}
