//! Display text: dates, weight-class names, fight outcomes and breadcrumbs.

use crate::models::{Event, Fight, Fighter, WeightClass};
use crate::services::slug::{slug_label, slugify};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl std::str::FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ru" | "ru-ru" => Ok(Self::Ru),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ru => write!(f, "ru"),
            Self::En => write!(f, "en"),
        }
    }
}

const MONTHS_RU: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа", "сентября",
    "октября", "ноября", "декабря",
];

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    None
}

/// Long date, e.g. "9 марта 2024 г." or "March 9, 2024".
///
/// Missing dates render as TBA; unparseable ones are shown as sent.
pub fn format_date(raw: Option<&str>, locale: Locale) -> String {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return match locale {
            Locale::Ru => "Дата TBA".to_string(),
            Locale::En => "Date TBA".to_string(),
        };
    };
    match parse_date(raw) {
        Some(date) => long_date(date, locale),
        None => raw.to_string(),
    }
}

pub fn long_date(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::Ru => format!(
            "{} {} {} г.",
            date.day(),
            MONTHS_RU[date.month0() as usize],
            date.year()
        ),
        Locale::En => date.format("%B %-d, %Y").to_string(),
    }
}

/// Short numeric date used in fight lists, e.g. "09.03.2024".
pub fn short_date(raw: Option<&str>, locale: Locale) -> String {
    match raw.and_then(parse_date) {
        Some(date) => match locale {
            Locale::Ru => date.format("%d.%m.%Y").to_string(),
            Locale::En => date.format("%m/%d/%Y").to_string(),
        },
        None => match locale {
            Locale::Ru => "Дата неизвестна".to_string(),
            Locale::En => "Date unknown".to_string(),
        },
    }
}

/// Russian names for the standard divisions, keyed by slug.
pub fn weight_class_ru(slug: &str) -> Option<&'static str> {
    let name = match slug {
        "heavyweight" => "Тяжелый вес",
        "light_heavyweight" => "Полутяжелый вес",
        "middleweight" => "Средний вес",
        "welterweight" => "Полусредний вес",
        "lightweight" => "Легкий вес",
        "featherweight" => "Полулегкий вес",
        "bantamweight" => "Легчайший вес",
        "flyweight" => "Наилегчайший вес",
        "women's_featherweight" => "Женский полулегкий вес",
        "women's_bantamweight" => "Женский легчайший вес",
        "women's_flyweight" => "Женский наилегчайший вес",
        "women's_strawweight" => "Женский минимальный вес",
        "pound_for_pound" | "men's_pound_for_pound" => "Вне весовых категорий",
        "women's_pound_for_pound" => "Женский рейтинг вне весовых категорий",
        _ => return None,
    };
    Some(name)
}

/// Localized division name for an English one; unknown names pass through.
pub fn weight_class_name(name_en: &str, locale: Locale) -> String {
    match locale {
        Locale::En => name_en.to_string(),
        Locale::Ru => slugify(name_en)
            .ok()
            .and_then(|slug| weight_class_ru(slug.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| name_en.to_string()),
    }
}

pub fn card_type_label(card_type: Option<&str>, locale: Locale) -> String {
    let Some(card_type) = card_type else {
        return String::new();
    };
    let label = match (card_type.trim().to_lowercase().as_str(), locale) {
        ("main card", Locale::Ru) => "Основная карта",
        ("preliminary card", Locale::Ru) => "Предварительная карта",
        ("early preliminary card", Locale::Ru) => "Ранняя предварительная карта",
        ("main card", Locale::En) => "Main card",
        ("preliminary card", Locale::En) => "Preliminary card",
        ("early preliminary card", Locale::En) => "Early preliminary card",
        _ => return card_type.to_string(),
    };
    label.to_string()
}

pub fn record(wins: i32, losses: i32, draws: i32) -> String {
    format!("{}-{}-{}", wins, losses, draws)
}

pub fn fighter_record(fighter: &Fighter) -> String {
    record(fighter.wins, fighter.losses, fighter.draws)
}

/// Value with unit, or a dash when absent.
pub fn measurement(value: Option<i32>, unit: &str) -> String {
    match value {
        Some(v) if v > 0 => format!("{} {}", v, unit),
        _ => "—".to_string(),
    }
}

pub fn unknown_fighter(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "Неизвестный боец",
        Locale::En => "Unknown fighter",
    }
}

pub fn fighter_label(fighter: &Fighter, locale: Locale) -> String {
    fighter
        .label()
        .map(str::to_string)
        .unwrap_or_else(|| unknown_fighter(locale).to_string())
}

/// Text a list or heading shows for a record, with a fallback when the
/// backend left the name out.
pub trait DisplayLabel {
    fn display_label(&self, locale: Locale) -> String;
}

impl DisplayLabel for Fighter {
    fn display_label(&self, locale: Locale) -> String {
        fighter_label(self, locale)
    }
}

impl DisplayLabel for WeightClass {
    fn display_label(&self, locale: Locale) -> String {
        let en = self.name_en.as_deref().filter(|n| !n.trim().is_empty());
        let ru = Some(self.name_ru.as_str()).filter(|n| !n.trim().is_empty());
        let label = match locale {
            Locale::Ru => ru
                .map(str::to_string)
                .or_else(|| en.map(|n| weight_class_name(n, locale)))
                .or_else(|| self.label().map(str::to_string)),
            Locale::En => en.or_else(|| self.label()).map(str::to_string),
        };
        label.unwrap_or_else(|| match locale {
            Locale::Ru => "Неизвестная категория".to_string(),
            Locale::En => "Unknown division".to_string(),
        })
    }
}

impl DisplayLabel for Event {
    fn display_label(&self, locale: Locale) -> String {
        if self.name.trim().is_empty() {
            match locale {
                Locale::Ru => "Событие без названия".to_string(),
                Locale::En => "Untitled event".to_string(),
            }
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
    NoContest,
    Unknown,
}

impl Outcome {
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Win, Locale::Ru) => "Победа",
            (Self::Loss, Locale::Ru) => "Поражение",
            (Self::Draw, Locale::Ru) => "Ничья",
            (Self::NoContest, Locale::Ru) => "Не состоялся",
            (Self::Unknown, Locale::Ru) => "Неизвестно",
            (Self::Win, Locale::En) => "Win",
            (Self::Loss, Locale::En) => "Loss",
            (Self::Draw, Locale::En) => "Draw",
            (Self::NoContest, Locale::En) => "No contest",
            (Self::Unknown, Locale::En) => "Unknown",
        }
    }
}

/// Result flags arrive as "1", "true" or the spelled-out result.
fn flag_set(flag: Option<&str>, word: &str) -> bool {
    match flag.map(str::trim) {
        Some(v) => v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case(word),
        None => false,
    }
}

fn same_name(a: &str, fighter: &Fighter) -> bool {
    let a = a.trim();
    !a.is_empty()
        && [Some(fighter.name.as_str()), Some(fighter.name_ru.as_str()), fighter.name_en.as_deref()]
            .into_iter()
            .flatten()
            .any(|n| n.trim().eq_ignore_ascii_case(a))
}

/// Which corner `fighter` fought in, 1 or 2.
pub fn corner(fight: &Fight, fighter: &Fighter) -> Option<u8> {
    if fight.fighter1_name.as_deref().is_some_and(|n| same_name(n, fighter)) {
        Some(1)
    } else if fight.fighter2_name.as_deref().is_some_and(|n| same_name(n, fighter)) {
        Some(2)
    } else {
        None
    }
}

/// Result of `fight` from `fighter`'s side. The win/loss flags are stored from
/// the red corner's point of view.
pub fn outcome_for(fight: &Fight, fighter: &Fighter) -> Outcome {
    let Some(side) = corner(fight, fighter) else {
        return Outcome::Unknown;
    };
    let win = flag_set(fight.is_win.as_deref(), "win");
    let loss = flag_set(fight.is_loss.as_deref(), "loss");
    if win {
        return if side == 1 { Outcome::Win } else { Outcome::Loss };
    }
    if loss {
        return if side == 1 { Outcome::Loss } else { Outcome::Win };
    }
    if flag_set(fight.is_draw.as_deref(), "draw") {
        return Outcome::Draw;
    }
    if flag_set(fight.is_nc.as_deref(), "no contest") {
        return Outcome::NoContest;
    }
    Outcome::Unknown
}

pub fn opponent<'a>(fight: &'a Fight, fighter: &Fighter) -> Option<&'a str> {
    match corner(fight, fighter) {
        Some(1) => fight.fighter2_name.as_deref(),
        Some(2) => fight.fighter1_name.as_deref(),
        _ => None,
    }
}

/// Result line for an event card.
pub fn result_text(fight: &Fight, locale: Locale) -> String {
    if let Some(winner) = fight.winner_name.as_deref().filter(|w| !w.trim().is_empty()) {
        return match locale {
            Locale::Ru => format!("Победитель: {}", winner),
            Locale::En => format!("Winner: {}", winner),
        };
    }
    if flag_set(fight.is_draw.as_deref(), "draw") {
        return Outcome::Draw.label(locale).to_string();
    }
    if flag_set(fight.is_nc.as_deref(), "no contest") {
        return Outcome::NoContest.label(locale).to_string();
    }
    match locale {
        Locale::Ru => "Результат неизвестен".to_string(),
        Locale::En => "Result unknown".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub path: String,
}

fn section_label(segment: &str, locale: Locale) -> Option<&'static str> {
    let label = match (segment, locale) {
        ("rankings", Locale::Ru) => "Рейтинги",
        ("events", Locale::Ru) => "События",
        ("fighters", Locale::Ru) => "Бойцы",
        ("upcoming", Locale::Ru) => "Предстоящие бои",
        ("compare", Locale::Ru) => "Сравнение",
        ("stats", Locale::Ru) => "Статистика",
        ("rankings", Locale::En) => "Rankings",
        ("events", Locale::En) => "Events",
        ("fighters", Locale::En) => "Fighters",
        ("upcoming", Locale::En) => "Upcoming",
        ("compare", Locale::En) => "Compare",
        ("stats", Locale::En) => "Stats",
        _ => return None,
    };
    Some(label)
}

/// Trail from the home page down to `path`. Segments are expected decoded.
pub fn breadcrumbs(path: &str, locale: Locale) -> Vec<Breadcrumb> {
    let home = match locale {
        Locale::Ru => "Главная",
        Locale::En => "Home",
    };
    let mut crumbs = vec![Breadcrumb {
        label: home.to_string(),
        path: "/".to_string(),
    }];

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut current = String::new();
    for (i, segment) in segments.iter().enumerate() {
        current.push('/');
        current.push_str(segment);

        let parent = i.checked_sub(1).and_then(|p| segments.get(p)).copied();
        let label = match parent {
            None => section_label(segment, locale)
                .map(str::to_string)
                .unwrap_or_else(|| slug_label(segment)),
            Some("rankings") if locale == Locale::Ru => weight_class_ru(&segment.to_lowercase())
                .map(str::to_string)
                .unwrap_or_else(|| slug_label(segment)),
            Some(_) if *segment == "stats" => section_label(segment, locale)
                .map(str::to_string)
                .unwrap_or_default(),
            Some(_) => slug_label(segment),
        };
        crumbs.push(Breadcrumb {
            label,
            path: current.clone(),
        });
    }
    crumbs
}
