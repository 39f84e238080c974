//! Facets for narrowing a recipe list.
//!
//! Every facet is an independent predicate, so the order in which they are
//! checked does not change the result.

use super::recipe::{Difficulty, Recipe};
use cookbook_errors::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use uuid::Uuid;

/// Named cooking-time buckets. Both ends of every range are inclusive, so a
/// 15 minute recipe is both `Quick` and `Medium`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFilter {
    #[default]
    All,
    Quick,
    Medium,
    Long,
}

impl TimeFilter {
    pub fn range(&self) -> (u32, u32) {
        match self {
            Self::All => (0, 9999),
            Self::Quick => (0, 15),
            Self::Medium => (15, 30),
            Self::Long => (30, 9999),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Quick => "Quick (<15)",
            Self::Medium => "Medium (15-30)",
            Self::Long => "Long (30+)",
        }
    }

    fn matches(&self, cooking_time: u32) -> bool {
        if *self == Self::All {
            return true;
        }
        let (min, max) = self.range();
        cooking_time >= min && cooking_time <= max
    }
}

impl FromStr for TimeFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "quick" => Ok(Self::Quick),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            other => Err(AppError::validation(format!("Unknown time filter: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    fn matches(&self, difficulty: Difficulty) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == difficulty,
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "easy" => Ok(Self::Only(Difficulty::Easy)),
            "medium" => Ok(Self::Only(Difficulty::Medium)),
            "hard" => Ok(Self::Only(Difficulty::Hard)),
            other => Err(AppError::validation(format!("Unknown difficulty: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeQuery {
    pub keyword: String,
    pub time: TimeFilter,
    pub difficulty: DifficultyFilter,
    pub favorites_only: bool,
}

impl RecipeQuery {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, recipe: &Recipe, favorites: &HashSet<Uuid>) -> bool {
        if self.favorites_only && !favorites.contains(&recipe.id) {
            return false;
        }

        let keyword = self.keyword.to_lowercase();
        if !keyword.is_empty() {
            let hit = [&recipe.title, &recipe.description, &recipe.category]
                .iter()
                .any(|field| field.to_lowercase().contains(&keyword));
            if !hit {
                return false;
            }
        }

        self.time.matches(recipe.cooking_time) && self.difficulty.matches(recipe.difficulty)
    }

    /// Narrows `recipes` keeping their original order.
    pub fn apply(&self, recipes: &[Recipe], favorites: &HashSet<Uuid>) -> Vec<Recipe> {
        recipes
            .iter()
            .filter(|recipe| self.matches(recipe, favorites))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::fixtures::recipe;

    fn titles(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let recipes = vec![
            recipe("Pasta Bake", 40, Difficulty::Medium),
            recipe("Tea", 5, Difficulty::Easy),
        ];
        let query = RecipeQuery {
            keyword: "pa".into(),
            ..Default::default()
        };

        let found = query.apply(&recipes, &HashSet::new());
        assert_eq!(titles(&found), vec!["Pasta Bake"]);
    }

    #[test]
    fn test_keyword_searches_description_and_category() {
        let mut soup = recipe("Minestrone", 45, Difficulty::Medium);
        soup.category = "Soups".into();
        let mut tea = recipe("Chai", 10, Difficulty::Easy);
        tea.description = "Spiced milk TEA".into();
        let recipes = vec![soup, tea];

        let by_category = RecipeQuery {
            keyword: "soup".into(),
            ..Default::default()
        };
        assert_eq!(
            titles(&by_category.apply(&recipes, &HashSet::new())),
            vec!["Minestrone"]
        );

        let by_description = RecipeQuery {
            keyword: "tea".into(),
            ..Default::default()
        };
        assert_eq!(
            titles(&by_description.apply(&recipes, &HashSet::new())),
            vec!["Chai"]
        );
    }

    #[test]
    fn test_fifteen_minutes_is_quick_and_medium() {
        let recipes = vec![recipe("Omelette", 15, Difficulty::Easy)];

        for time in [TimeFilter::Quick, TimeFilter::Medium] {
            let query = RecipeQuery {
                time,
                ..Default::default()
            };
            assert_eq!(query.apply(&recipes, &HashSet::new()).len(), 1, "{time:?}");
        }

        let long = RecipeQuery {
            time: TimeFilter::Long,
            ..Default::default()
        };
        assert!(long.apply(&recipes, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_bucket_upper_bound() {
        let recipes = vec![
            recipe("Roast", 9999, Difficulty::Hard),
            recipe("Brisket", 10_000, Difficulty::Hard),
        ];
        let long = RecipeQuery {
            time: TimeFilter::Long,
            ..Default::default()
        };
        assert_eq!(titles(&long.apply(&recipes, &HashSet::new())), vec!["Roast"]);

        let all = RecipeQuery::default();
        assert_eq!(all.apply(&recipes, &HashSet::new()).len(), 2);
    }

    #[test]
    fn test_difficulty_and_favorites() {
        let tea = recipe("Tea", 5, Difficulty::Easy);
        let toast = recipe("Toast", 3, Difficulty::Easy);
        let stew = recipe("Stew", 90, Difficulty::Hard);
        let favorites: HashSet<Uuid> = [toast.id, stew.id].into_iter().collect();
        let recipes = vec![tea, toast, stew];

        let query = RecipeQuery {
            difficulty: DifficultyFilter::Only(Difficulty::Easy),
            favorites_only: true,
            ..Default::default()
        };
        assert_eq!(titles(&query.apply(&recipes, &favorites)), vec!["Toast"]);
    }

    #[test]
    fn test_default_query_keeps_everything_in_order() {
        let recipes = vec![
            recipe("C", 50, Difficulty::Hard),
            recipe("A", 5, Difficulty::Easy),
            recipe("B", 20, Difficulty::Medium),
        ];
        let query = RecipeQuery::default();
        assert!(query.is_default());
        assert_eq!(query.apply(&recipes, &HashSet::new()), recipes);
    }

    #[test]
    fn test_parse_facets() {
        assert_eq!("".parse::<TimeFilter>().unwrap(), TimeFilter::All);
        assert_eq!("Quick".parse::<TimeFilter>().unwrap(), TimeFilter::Quick);
        assert!("soon".parse::<TimeFilter>().is_err());

        assert_eq!(
            "hard".parse::<DifficultyFilter>().unwrap(),
            DifficultyFilter::Only(Difficulty::Hard)
        );
        assert_eq!("all".parse::<DifficultyFilter>().unwrap(), DifficultyFilter::All);
        assert!("extreme".parse::<DifficultyFilter>().is_err());
    }
}
