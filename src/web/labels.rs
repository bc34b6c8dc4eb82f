//! Interface text handed to templates as `t`.

use crate::services::format::Locale;
use std::collections::HashMap;

/// (key, Russian, English)
const LABELS: &[(&str, &str, &str)] = &[
    ("rankings", "Рейтинги", "Rankings"),
    ("fighters", "Бойцы", "Fighters"),
    ("events", "События", "Events"),
    ("upcoming", "Предстоящие бои", "Upcoming fights"),
    ("compare", "Сравнение", "Compare"),
    ("compare_now", "Сравнить", "Compare now"),
    ("clear", "Сбросить", "Clear"),
    ("pick_two", "Выберите двух бойцов для сравнения", "Pick two fighters to compare"),
    ("difference", "Разница", "Difference"),
    ("stats", "Статистика", "Stats"),
    ("detailed_stats", "Подробная статистика", "Detailed stats"),
    ("back_to_fighter", "К профилю бойца", "Back to fighter"),
    ("p4p", "Вне весовых категорий", "Pound for pound"),
    ("men", "Мужские дивизионы", "Men's divisions"),
    ("women", "Женские дивизионы", "Women's divisions"),
    ("champion", "Чемпион", "Champion"),
    ("no_rankings", "Рейтинг пока пуст", "No rankings yet"),
    ("weight_limit", "Лимит веса", "Weight limit"),
    ("fighter", "Боец", "Fighter"),
    ("record", "Рекорд", "Record"),
    ("country", "Страна", "Country"),
    ("weight_class", "Весовая категория", "Weight class"),
    ("height", "Рост", "Height"),
    ("weight", "Вес", "Weight"),
    ("reach", "Размах рук", "Reach"),
    ("age", "Возраст", "Age"),
    ("cm", "см", "cm"),
    ("kg", "кг", "kg"),
    ("years", "лет", "yrs"),
    ("career", "Карьера", "Career"),
    ("recent_fights", "Последние бои", "Recent fights"),
    ("showing", "Показано", "Showing"),
    ("of", "из", "of"),
    ("shown", "Найдено", "Found"),
    ("no_fights", "Нет данных о боях", "No fights recorded"),
    ("no_fighters", "Бойцы не найдены", "No fighters found"),
    ("search", "Найти", "Search"),
    ("search_placeholder", "Имя или страна", "Name or country"),
    ("all_weight_classes", "Все категории", "All weight classes"),
    ("date", "Дата", "Date"),
    ("opponent", "Соперник", "Opponent"),
    ("result", "Результат", "Result"),
    ("method", "Метод", "Method"),
    ("event", "Турнир", "Event"),
    ("location", "Место", "Location"),
    ("venue", "Арена", "Venue"),
    ("attendance", "Зрителей", "Attendance"),
    ("fight_card", "Кард", "Fight card"),
    ("title_fight", "Титульный бой", "Title fight"),
    ("main_event", "Главный бой", "Main event"),
    ("main_events_only", "Только главные бои", "Main events only"),
    ("show_all_fights", "Все бои", "All fights"),
    ("no_upcoming", "Нет запланированных боев", "No fights scheduled"),
    ("tab_all", "Все", "All"),
    ("tab_upcoming", "Предстоящие", "Upcoming"),
    ("tab_past", "Прошедшие", "Past"),
    ("no_events", "Событий нет", "No events"),
    ("total_fighters", "Бойцов", "Fighters"),
    ("total_weight_classes", "Весовых категорий", "Weight classes"),
    ("total_fights", "Боев", "Fights"),
    ("total_upcoming_fights", "Предстоящих боев", "Upcoming fights"),
    ("top_countries", "Больше всего бойцов", "Top countries"),
    ("total_rounds", "Раундов", "Rounds"),
    ("significant_strikes", "Значимые удары", "Significant strikes"),
    ("takedowns", "Тейкдауны", "Takedowns"),
    ("knockdowns", "Нокдауны", "Knockdowns"),
    ("submission_attempts", "Попытки сабмишена", "Submission attempts"),
    ("reversals", "Реверсалы", "Reversals"),
    ("not_found", "Не найдено", "Not found"),
    ("not_found_text", "Такой страницы нет или запись была удалена.", "Nothing matches this address."),
    ("load_error", "Ошибка загрузки", "Could not load data"),
    ("retry", "Повторить", "Retry"),
];

pub fn labels(locale: Locale) -> HashMap<&'static str, &'static str> {
    LABELS
        .iter()
        .map(|&(key, ru, en)| match locale {
            Locale::Ru => (key, ru),
            Locale::En => (key, en),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<_> = LABELS.iter().map(|(k, _, _)| *k).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), LABELS.len());
    }

    #[test]
    fn every_key_is_translated() {
        for (key, ru, en) in LABELS {
            assert!(!ru.is_empty() && !en.is_empty(), "missing text for {}", key);
        }
    }
}
