use cookbook_errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper end of the longest cooking-time bucket.
pub const MAX_COOKING_TIME: u32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Self::Easy),
            "Medium" => Ok(Self::Medium),
            "Hard" => Ok(Self::Hard),
            other => Err(AppError::validation(format!("Unknown difficulty: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub cooking_time: u32,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub image_url: Option<String>,
    pub created_by: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Recipe {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.created_by == user_id
    }
}

/// Fields a user fills in when creating a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub cooking_time: i64,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl NewRecipe {
    /// Trims text fields, drops blank list entries and checks every required field.
    pub fn validated(self) -> Result<RecipeDraft, AppError> {
        Ok(RecipeDraft {
            title: required_text("title", &self.title)?,
            description: required_text("description", &self.description)?,
            category: required_text("category", &self.category)?,
            difficulty: self.difficulty,
            cooking_time: cooking_time(self.cooking_time)?,
            ingredients: required_lines("ingredients", self.ingredients)?,
            steps: required_lines("steps", self.steps)?,
        })
    }
}

/// A `NewRecipe` that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub cooking_time: u32,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl RecipeDraft {
    pub fn into_recipe(self, created_by: &str, image_url: Option<String>) -> Recipe {
        Recipe {
            id: uuid::Uuid::new_v4(),
            title: self.title,
            description: self.description,
            category: self.category,
            difficulty: self.difficulty,
            cooking_time: self.cooking_time,
            ingredients: self.ingredients,
            steps: self.steps,
            image_url,
            created_by: created_by.to_string(),
            created_at: chrono::Utc::now(),
        }
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub cooking_time: Option<i64>,
    pub ingredients: Option<Vec<String>>,
    pub steps: Option<Vec<String>>,
    pub image_url: Option<String>,
}

impl RecipePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.difficulty.is_none()
            && self.cooking_time.is_none()
            && self.ingredients.is_none()
            && self.steps.is_none()
            && self.image_url.is_none()
    }

    /// Validates the supplied fields and writes them onto `recipe`.
    pub fn apply_to(self, recipe: &mut Recipe) -> Result<(), AppError> {
        if let Some(title) = self.title {
            recipe.title = required_text("title", &title)?;
        }
        if let Some(description) = self.description {
            recipe.description = required_text("description", &description)?;
        }
        if let Some(category) = self.category {
            recipe.category = required_text("category", &category)?;
        }
        if let Some(difficulty) = self.difficulty {
            recipe.difficulty = difficulty;
        }
        if let Some(minutes) = self.cooking_time {
            recipe.cooking_time = cooking_time(minutes)?;
        }
        if let Some(ingredients) = self.ingredients {
            recipe.ingredients = required_lines("ingredients", ingredients)?;
        }
        if let Some(steps) = self.steps {
            recipe.steps = required_lines("steps", steps)?;
        }
        if let Some(image_url) = self.image_url {
            recipe.image_url = Some(image_url);
        }
        Ok(())
    }
}

/// Totals shown above the recipe list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub recipe_count: usize,
    pub total_minutes: u64,
    pub easy_count: usize,
}

impl CollectionStats {
    pub fn from_recipes<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> Self {
        recipes
            .into_iter()
            .fold(Self::default(), |mut stats, recipe| {
                stats.recipe_count += 1;
                stats.total_minutes += u64::from(recipe.cooking_time);
                if recipe.difficulty == Difficulty::Easy {
                    stats.easy_count += 1;
                }
                stats
            })
    }
}

fn required_text(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn required_lines(field: &str, lines: Vec<String>) -> Result<Vec<String>, AppError> {
    let lines: Vec<String> = lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(lines)
}

fn cooking_time(minutes: i64) -> Result<u32, AppError> {
    u32::try_from(minutes)
        .ok()
        .filter(|m| (1..=MAX_COOKING_TIME).contains(m))
        .ok_or_else(|| AppError::validation("Please enter a valid cooking time (in minutes)"))
}
