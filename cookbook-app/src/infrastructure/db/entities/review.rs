use cookbook_errors::AppError;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub rating: i32,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::recipe::Entity",
        from = "Column::RecipeId",
        to = "super::recipe::Column::Id",
        on_delete = "Cascade"
    )]
    Recipe,
}

impl Related<super::recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipe.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for crate::domain::Review {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        if !(crate::domain::MIN_RATING..=crate::domain::MAX_RATING).contains(&model.rating) {
            return Err(AppError::RemoteFailure(format!(
                "review {} has rating {} out of range",
                model.id, model.rating
            )));
        }

        Ok(Self {
            id: model.id,
            recipe_id: model.recipe_id,
            user_id: model.user_id,
            user_name: model.user_name,
            rating: model.rating,
            comment: model.comment,
            created_at: model.created_at,
        })
    }
}
