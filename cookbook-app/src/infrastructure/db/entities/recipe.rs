use cookbook_errors::AppError;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub cooking_time: i32,
    pub ingredients: Json,
    pub steps: Json,
    pub image_url: Option<String>,
    pub created_by: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorites,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<&crate::domain::Recipe> for ActiveModel {
    type Error = DbErr;

    fn try_from(recipe: &crate::domain::Recipe) -> Result<Self, Self::Error> {
        use sea_orm::ActiveValue::Set;

        let cooking_time = i32::try_from(recipe.cooking_time).map_err(|_| {
            DbErr::Custom(format!(
                "recipe {} cooking_time {} does not fit the column",
                recipe.id, recipe.cooking_time
            ))
        })?;

        Ok(Self {
            id: Set(recipe.id),
            title: Set(recipe.title.clone()),
            description: Set(recipe.description.clone()),
            category: Set(recipe.category.clone()),
            difficulty: Set(recipe.difficulty.as_str().to_string()),
            cooking_time: Set(cooking_time),
            ingredients: Set(Json::from(recipe.ingredients.clone())),
            steps: Set(Json::from(recipe.steps.clone())),
            image_url: Set(recipe.image_url.clone()),
            created_by: Set(recipe.created_by.clone()),
            created_at: Set(recipe.created_at),
        })
    }
}

/// Stored rows are checked before they reach the domain; anything that does
/// not fit the recipe shape is rejected instead of patched up.
impl TryFrom<Model> for crate::domain::Recipe {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let malformed = |field: &str| {
            AppError::RemoteFailure(format!("recipe {} has malformed {field}", model.id))
        };

        let difficulty = model
            .difficulty
            .parse()
            .map_err(|_| malformed("difficulty"))?;
        let cooking_time = u32::try_from(model.cooking_time)
            .ok()
            .filter(|m| *m > 0)
            .ok_or_else(|| malformed("cooking_time"))?;
        let ingredients = string_list(&model.ingredients).ok_or_else(|| malformed("ingredients"))?;
        let steps = string_list(&model.steps).ok_or_else(|| malformed("steps"))?;

        Ok(Self {
            id: model.id,
            title: model.title,
            description: model.description,
            category: model.category,
            difficulty,
            cooking_time,
            ingredients,
            steps,
            image_url: model.image_url.filter(|url| !url.is_empty()),
            created_by: model.created_by,
            created_at: model.created_at,
        })
    }
}

fn string_list(value: &Json) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}
