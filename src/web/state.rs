use crate::services::api::CatalogSource;
use crate::services::format::{self, Locale};
use crate::Config;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tera::{Tera, Value};

pub struct AppState {
    pub config: Config,
    pub source: Arc<dyn CatalogSource>,
    pub templates: Tera,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn CatalogSource>) -> Result<Self> {
        let mut templates = Tera::default();

        let locale = config.site.locale;
        templates.register_filter(
            "format_date",
            move |value: &Value, args: &HashMap<String, Value>| format_date_filter(value, args, locale),
        );
        templates.register_filter("measure", measure_filter);
        templates.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html")),
            ("macros.html", include_str!("../../templates/macros.html")),
            ("index.html", include_str!("../../templates/index.html")),
            ("rankings.html", include_str!("../../templates/rankings.html")),
            ("weight_class.html", include_str!("../../templates/weight_class.html")),
            ("fighters.html", include_str!("../../templates/fighters.html")),
            ("fighter.html", include_str!("../../templates/fighter.html")),
            ("fighter_stats.html", include_str!("../../templates/fighter_stats.html")),
            ("events.html", include_str!("../../templates/events.html")),
            ("event.html", include_str!("../../templates/event.html")),
            ("upcoming.html", include_str!("../../templates/upcoming.html")),
            ("compare.html", include_str!("../../templates/compare.html")),
            ("not_found.html", include_str!("../../templates/not_found.html")),
            ("load_error.html", include_str!("../../templates/load_error.html")),
        ])?;

        Ok(Self {
            config,
            source,
            templates,
        })
    }

    pub fn locale(&self) -> Locale {
        self.config.site.locale
    }
}

/// `{{ date | format_date }}` for the long form, `format_date(style="short")`
/// for fight lists. Null renders the TBA placeholder.
fn format_date_filter(
    value: &Value,
    args: &HashMap<String, Value>,
    locale: Locale,
) -> tera::Result<Value> {
    let raw = match value {
        Value::Null => None,
        Value::String(s) => Some(s.as_str()),
        _ => return Err(tera::Error::msg("format_date requires a string")),
    };
    let formatted = match args.get("style").and_then(|v| v.as_str()) {
        Some("short") => format::short_date(raw, locale),
        _ => format::format_date(raw, locale),
    };
    Ok(Value::String(formatted))
}

fn measure_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let unit = args.get("unit").and_then(|v| v.as_str()).unwrap_or("");
    let number = value.as_i64().and_then(|n| i32::try_from(n).ok());
    Ok(Value::String(format::measurement(number, unit)))
}
