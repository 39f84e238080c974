use super::check_write_quota;
use crate::error::ApiError;
use crate::session;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cookbook_app::application::RecipeBrowser;
use cookbook_app::domain::{
    CollectionStats, Difficulty, ImageUpload, NewRecipe, Recipe, RecipePatch, RecipeQuery,
};
use cookbook_app::infrastructure::security::InputSanitizer;
use cookbook_app::AppContext;
use cookbook_errors::AppError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use uuid::Uuid;

const RECIPE_PART: &str = "recipe";
const IMAGE_PART: &str = "image";

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub q: String,
    pub time: Option<String>,
    pub difficulty: Option<String>,
    #[serde(default)]
    pub favorites_only: bool,
}

impl ListParams {
    fn into_query(self) -> Result<RecipeQuery, AppError> {
        Ok(RecipeQuery {
            keyword: self.q,
            time: self.time.as_deref().unwrap_or_default().parse()?,
            difficulty: self.difficulty.as_deref().unwrap_or_default().parse()?,
            favorites_only: self.favorites_only,
        })
    }
}

#[derive(Serialize)]
pub struct ListResponse {
    pub recipes: Vec<Recipe>,
    pub stats: CollectionStats,
    pub query: RecipeQuery,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[derive(Serialize)]
pub struct RecipeResponse {
    pub recipe: Recipe,
    pub favorite: bool,
}

/// Ingredients and steps arrive either as a list or as one entry per line.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Lines {
    List(Vec<String>),
    Text(String),
}

impl From<Lines> for Vec<String> {
    fn from(lines: Lines) -> Self {
        match lines {
            Lines::List(list) => list,
            Lines::Text(text) => InputSanitizer::split_lines(&text),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecipeForm {
    title: String,
    description: String,
    category: String,
    difficulty: Difficulty,
    cooking_time: i64,
    ingredients: Lines,
    steps: Lines,
}

impl From<RecipeForm> for NewRecipe {
    fn from(form: RecipeForm) -> Self {
        Self {
            title: form.title,
            description: form.description,
            category: form.category,
            difficulty: form.difficulty,
            cooking_time: form.cooking_time,
            ingredients: form.ingredients.into(),
            steps: form.steps.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecipePatchForm {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    difficulty: Option<Difficulty>,
    cooking_time: Option<i64>,
    ingredients: Option<Lines>,
    steps: Option<Lines>,
    image_url: Option<String>,
}

impl From<RecipePatchForm> for RecipePatch {
    fn from(form: RecipePatchForm) -> Self {
        Self {
            title: form.title,
            description: form.description,
            category: form.category,
            difficulty: form.difficulty,
            cooking_time: form.cooking_time,
            ingredients: form.ingredients.map(Into::into),
            steps: form.steps.map(Into::into),
            image_url: form.image_url,
        }
    }
}

/// GET /api/recipes
pub async fn list(
    State(ctx): State<AppContext>,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let auth = session::auth_context(&session).await?;
    let query = params.into_query()?;

    let browser = RecipeBrowser::load(&ctx.recipes, &ctx.favorites, &auth)
        .await?
        .with_query(query);

    let stats = browser.stats();
    let query = browser.query().clone();
    Ok(Json(ListResponse {
        recipes: browser.into_filtered(),
        stats,
        query,
    }))
}

/// GET /api/users/{uid}/recipes
pub async fn list_by_creator(
    State(ctx): State<AppContext>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    Ok(Json(ctx.recipes.list_by_creator(&uid).await?))
}

/// POST /api/recipes (multipart: `recipe` JSON, optional `image` file)
pub async fn create(
    State(ctx): State<AppContext>,
    session: Session,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let auth = session::auth_context(&session).await?;
    let (form, image) = read_recipe_parts::<RecipeForm>(multipart).await?;
    check_write_quota(&ctx, &auth)?;

    let id = ctx.recipes.create(&auth, form.into(), image).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /api/recipes/{id}
pub async fn get(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let auth = session::auth_context(&session).await?;
    let recipe = ctx.recipes.get(id).await?.ok_or(AppError::NotFound)?;
    let favorite = ctx.favorites.is_favorite(&auth, id).await?;
    Ok(Json(RecipeResponse { recipe, favorite }))
}

/// PUT /api/recipes/{id} (multipart like create, every field optional)
pub async fn update(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Recipe>, ApiError> {
    let auth = session::auth_context(&session).await?;
    let (form, image) = read_recipe_parts::<RecipePatchForm>(multipart).await?;
    check_write_quota(&ctx, &auth)?;

    let recipe = ctx.recipes.update(&auth, id, form.into(), image).await?;
    Ok(Json(recipe))
}

/// DELETE /api/recipes/{id}
pub async fn delete(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let auth = session::auth_context(&session).await?;
    ctx.recipes.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reads the JSON `recipe` part and the optional `image` part. Other parts
/// are ignored.
async fn read_recipe_parts<T: DeserializeOwned>(
    mut multipart: Multipart,
) -> Result<(T, Option<ImageUpload>), ApiError> {
    let mut fields = None;
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RECIPE_PART => {
                let text = field.text().await.map_err(multipart_error)?;
                let parsed: T = serde_json::from_str(&text).map_err(|e| {
                    tracing::warn!("Rejected recipe form: {}", e);
                    AppError::validation(format!("Recipe form is not valid: {e}"))
                })?;
                fields = Some(parsed);
            }
            IMAGE_PART => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                if bytes.is_empty() {
                    continue;
                }

                let mut upload = ImageUpload::jpeg(bytes.to_vec());
                if let Some(file_name) = file_name {
                    upload.file_name = file_name;
                }
                if let Some(content_type) = content_type {
                    upload.content_type = content_type;
                }
                image = Some(upload);
            }
            _ => {}
        }
    }

    let fields = fields.ok_or_else(|| AppError::validation("Missing recipe form"))?;
    Ok((fields, image))
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    tracing::warn!("Multipart read error: {}", err);
    AppError::validation(err.body_text()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_accepts_text_or_list() {
        let form: RecipeForm = serde_json::from_value(serde_json::json!({
            "title": "Pancakes",
            "description": "Fluffy",
            "category": "Breakfast",
            "difficulty": "Easy",
            "cooking_time": 20,
            "ingredients": "2 eggs\n\n 1 cup milk \n",
            "steps": ["Mix", "Fry"],
        }))
        .unwrap();

        let draft = NewRecipe::from(form);
        assert_eq!(draft.ingredients, vec!["2 eggs", "1 cup milk"]);
        assert_eq!(draft.steps, vec!["Mix", "Fry"]);
    }

    #[test]
    fn test_patch_form_defaults_to_empty() {
        let form: RecipePatchForm = serde_json::from_str("{}").unwrap();
        assert!(RecipePatch::from(form).is_empty());
    }

    #[test]
    fn test_list_params() {
        let params = ListParams {
            q: "pa".into(),
            time: Some("quick".into()),
            difficulty: None,
            favorites_only: true,
        };
        let query = params.into_query().unwrap();
        assert_eq!(query.keyword, "pa");
        assert_eq!(query.time, cookbook_app::domain::TimeFilter::Quick);
        assert!(query.favorites_only);

        let bad = ListParams {
            q: String::new(),
            time: Some("forever".into()),
            difficulty: None,
            favorites_only: false,
        };
        assert!(bad.into_query().is_err());
    }
}
