// ── Offer catalog filter ──
//
// Tag-based tabs over the landing collection. A product can sit in several
// tabs, and one carrying none of the tab tags is shown in none of them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::model::Product;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[default]
    #[strum(to_string = "Popular")]
    Popular,
    #[strum(to_string = "Hotels")]
    Hotels,
    #[strum(to_string = "Cruise")]
    Cruise,
    #[strum(to_string = "Exclusive Deals", serialize = "exclusive", serialize = "exclusive-deals")]
    ExclusiveDeals,
}

impl Category {
    /// Tab label shown to travelers.
    pub fn label(self) -> String {
        self.to_string()
    }

    /// Product tag that puts a product into this tab.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Popular => "Popular",
            Self::Hotels => "Hotels",
            Self::Cruise => "Cruise",
            Self::ExclusiveDeals => "Exclusive",
        }
    }

    /// All tabs, in display order.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// Products carrying `category`'s tag, in catalog order.
pub fn filter(products: &[Product], category: Category) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.has_tag(category.tag()))
        .collect()
}

/// Every tab with its listing.
pub fn partition(products: &[Product]) -> Vec<(Category, Vec<&Product>)> {
    Category::iter()
        .map(|c| (c, filter(products, c)))
        .collect()
}

/// Selected-tab state. Plain index, nothing persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogTabs {
    active: Category,
}

impl CatalogTabs {
    pub fn active(&self) -> Category {
        self.active
    }

    pub fn select(&mut self, category: Category) {
        self.active = category;
    }

    /// Select by position. Out-of-range indexes leave the selection alone.
    pub fn select_index(&mut self, index: usize) -> Option<Category> {
        let category = Category::iter().nth(index)?;
        self.active = category;
        Some(category)
    }

    /// Listing of the active tab.
    pub fn listing<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        filter(products, self.active)
    }
}

/// Destination shown on an offer card: the first tag that looks like a
/// place (`"Orlando, FL"`, `"Poconos PA"`), else `""`.
pub fn location_from_tags(tags: &[String]) -> &str {
    tags.iter()
        .find(|t| t.contains(',') || t.contains("FL") || t.contains("PA"))
        .map_or("", String::as_str)
}

/// `"Choice A"`, `"Choice B"`, … for bonus products in cart order.
pub fn bonus_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => format!("Choice {}", char::from(b'A' + i)),
        _ => format!("Choice {}", index + 1),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Money;

    fn product(title: &str, tags: &[&str]) -> Product {
        Product {
            id: format!("gid://shopify/Product/{title}"),
            handle: title.to_lowercase(),
            title: title.into(),
            description: String::new(),
            image: None,
            min_price: Money {
                amount: "49.0".into(),
                currency_code: "USD".into(),
            },
            max_price: Money {
                amount: "49.0".into(),
                currency_code: "USD".into(),
            },
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            variant_id: None,
        }
    }

    fn titles(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn filter_matches_exact_tag() {
        let products = vec![
            product("Orlando", &["Popular", "Hotels"]),
            product("Bahamas", &["Cruise"]),
            product("Vegas", &["popular"]),
        ];
        assert_eq!(titles(&filter(&products, Category::Popular)), vec!["Orlando"]);
        assert_eq!(titles(&filter(&products, Category::Hotels)), vec!["Orlando"]);
        assert_eq!(titles(&filter(&products, Category::Cruise)), vec!["Bahamas"]);
    }

    #[test]
    fn exclusive_tab_uses_exclusive_tag() {
        let products = vec![product("Maui", &["Exclusive"])];
        assert_eq!(
            titles(&filter(&products, Category::ExclusiveDeals)),
            vec!["Maui"]
        );
        assert!(products[0].is_exclusive());
    }

    #[test]
    fn untagged_product_appears_in_no_tab() {
        let products = vec![product("Aspen", &["Winter"])];
        for (_, listing) in partition(&products) {
            assert!(listing.is_empty());
        }
    }

    #[test]
    fn partition_lists_every_tab_in_order() {
        let tabs: Vec<Category> = partition(&[]).into_iter().map(|(c, _)| c).collect();
        assert_eq!(tabs, Category::all());
        assert_eq!(
            tabs.iter().map(|c| c.label()).collect::<Vec<_>>(),
            vec!["Popular", "Hotels", "Cruise", "Exclusive Deals"]
        );
    }

    #[test]
    fn tabs_select_by_index() {
        let mut tabs = CatalogTabs::default();
        assert_eq!(tabs.active(), Category::Popular);
        assert_eq!(tabs.select_index(2), Some(Category::Cruise));
        assert_eq!(tabs.select_index(9), None);
        assert_eq!(tabs.active(), Category::Cruise);
        tabs.select(Category::Hotels);
        assert_eq!(tabs.active(), Category::Hotels);
    }

    #[test]
    fn category_parses_loosely() {
        assert_eq!(Category::from_str("cruise").ok(), Some(Category::Cruise));
        assert_eq!(
            Category::from_str("exclusive").ok(),
            Some(Category::ExclusiveDeals)
        );
        assert_eq!(
            Category::from_str("Exclusive Deals").ok(),
            Some(Category::ExclusiveDeals)
        );
        assert!(Category::from_str("all").is_err());
    }

    #[test]
    fn location_takes_first_place_like_tag() {
        let tags = |t: &[&str]| t.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>();
        assert_eq!(location_from_tags(&tags(&["Popular", "Orlando, FL"])), "Orlando, FL");
        assert_eq!(location_from_tags(&tags(&["Poconos PA", "Key West FL"])), "Poconos PA");
        assert_eq!(location_from_tags(&tags(&["Cruise"])), "");
    }

    #[test]
    fn bonus_labels_are_lettered() {
        assert_eq!(bonus_label(0), "Choice A");
        assert_eq!(bonus_label(1), "Choice B");
        assert_eq!(bonus_label(25), "Choice Z");
        assert_eq!(bonus_label(26), "Choice 27");
    }
}
