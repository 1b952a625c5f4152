use crate::models::VenueRecord;

/// Dish category and the substrings that identify it in requests and menus
struct Dish {
    name: &'static str,
    keywords: &'static [&'static str],
}

const DISHES: &[Dish] = &[
    Dish { name: "піца", keywords: &["піц", "pizza"] },
    Dish { name: "паста", keywords: &["паст", "спагеті", "pasta"] },
    Dish { name: "бургер", keywords: &["бургер", "burger", "гамбургер"] },
    Dish { name: "суші", keywords: &["суш", "sushi", "рол"] },
    Dish { name: "салат", keywords: &["салат", "salad"] },
    Dish { name: "хумус", keywords: &["хумус", "hummus"] },
    Dish { name: "фалафель", keywords: &["фалафель", "falafel"] },
    Dish { name: "шаурма", keywords: &["шаурм", "shawarma"] },
    Dish { name: "стейк", keywords: &["стейк", "steak", "мясо"] },
    Dish { name: "риба", keywords: &["риб", "fish", "лосось"] },
    Dish { name: "курка", keywords: &["курк", "курич", "chicken"] },
    Dish { name: "десерт", keywords: &["десерт", "торт", "тірамісу", "морозиво"] },
];

impl Dish {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|kw| lowered.contains(kw))
    }
}

/// Dish categories mentioned in the request, in table order
fn requested_dishes(request: &str) -> Vec<&'static Dish> {
    let lowered = request.to_lowercase();
    DISHES.iter().filter(|dish| dish.matches(&lowered)).collect()
}

/// Narrows candidates to venues whose menu offers a requested dish
///
/// Returns the input unchanged when the request names no dish, or when no
/// venue's menu matches: a dish constraint never empties the candidate set.
/// Surviving candidates keep their relative order.
pub fn filter_by_menu<'a>(request: &str, candidates: Vec<&'a VenueRecord>) -> Vec<&'a VenueRecord> {
    let requested = requested_dishes(request);

    if requested.is_empty() {
        tracing::debug!(candidates = candidates.len(), "General request, no dish filter");
        return candidates;
    }

    let dish_names: Vec<&str> = requested.iter().map(|dish| dish.name).collect();

    let matching: Vec<&'a VenueRecord> = candidates
        .iter()
        .copied()
        .filter(|venue| {
            let menu = venue.menu_text().to_lowercase();
            requested.iter().any(|dish| dish.matches(&menu))
        })
        .collect();

    if matching.is_empty() {
        tracing::warn!(
            dishes = ?dish_names,
            candidates = candidates.len(),
            "No venue menu matches requested dishes, keeping all candidates"
        );
        return candidates;
    }

    tracing::info!(
        dishes = ?dish_names,
        kept = matching.len(),
        of = candidates.len(),
        "Filtered candidates by menu"
    );

    matching
}
