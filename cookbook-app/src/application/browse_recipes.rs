use super::{FavoritesLedger, RecipeCatalog};
use crate::domain::{
    AuthContext, CollectionStats, DifficultyFilter, Recipe, RecipeQuery, TimeFilter,
};
use cookbook_errors::AppError;
use std::collections::HashSet;
use uuid::Uuid;

/// The recipe list screen: every recipe, the caller's favorites, the active
/// facets and the list they produce. The filtered list is rebuilt from
/// scratch whenever any input changes.
#[derive(Debug, Clone, Default)]
pub struct RecipeBrowser {
    recipes: Vec<Recipe>,
    favorites: HashSet<Uuid>,
    query: RecipeQuery,
    filtered: Vec<Recipe>,
}

impl RecipeBrowser {
    pub fn new(recipes: Vec<Recipe>, favorites: HashSet<Uuid>) -> Self {
        let mut browser = Self {
            recipes,
            favorites,
            ..Default::default()
        };
        browser.refilter();
        browser
    }

    /// Reads the collection and the caller's favorites.
    pub async fn load(
        catalog: &RecipeCatalog,
        ledger: &FavoritesLedger,
        ctx: &AuthContext,
    ) -> Result<Self, AppError> {
        let recipes = catalog.list_all().await?;
        let favorites = ledger.favorite_ids(ctx).await?;
        Ok(Self::new(recipes, favorites))
    }

    pub fn with_query(mut self, query: RecipeQuery) -> Self {
        self.query = query;
        self.refilter();
        self
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.query.keyword = keyword.into();
        self.refilter();
    }

    pub fn set_time_filter(&mut self, time: TimeFilter) {
        self.query.time = time;
        self.refilter();
    }

    pub fn set_difficulty_filter(&mut self, difficulty: DifficultyFilter) {
        self.query.difficulty = difficulty;
        self.refilter();
    }

    pub fn set_favorites_only(&mut self, favorites_only: bool) {
        self.query.favorites_only = favorites_only;
        self.refilter();
    }

    pub fn set_recipes(&mut self, recipes: Vec<Recipe>) {
        self.recipes = recipes;
        self.refilter();
    }

    pub fn set_favorites(&mut self, favorites: HashSet<Uuid>) {
        self.favorites = favorites;
        self.refilter();
    }

    /// Clears every facet.
    pub fn reset(&mut self) {
        self.query = RecipeQuery::default();
        self.refilter();
    }

    pub fn query(&self) -> &RecipeQuery {
        &self.query
    }

    pub fn filtered(&self) -> &[Recipe] {
        &self.filtered
    }

    pub fn is_favorite(&self, recipe_id: Uuid) -> bool {
        self.favorites.contains(&recipe_id)
    }

    /// Stats over the filtered list.
    pub fn stats(&self) -> CollectionStats {
        CollectionStats::from_recipes(&self.filtered)
    }

    pub fn into_filtered(self) -> Vec<Recipe> {
        self.filtered
    }

    fn refilter(&mut self) {
        self.filtered = self.query.apply(&self.recipes, &self.favorites);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::recipe;
    use crate::domain::{AuthUser, Difficulty};
    use crate::infrastructure::db::{test_connection, FavoriteRepository, RecipeRepository};
    use crate::infrastructure::image_host::FakeImageHost;
    use std::sync::Arc;

    fn titles(browser: &RecipeBrowser) -> Vec<&str> {
        browser.filtered().iter().map(|r| r.title.as_str()).collect()
    }

    fn sample() -> Vec<Recipe> {
        vec![
            recipe("Pasta Bake", 40, Difficulty::Medium),
            recipe("Tea", 5, Difficulty::Easy),
            recipe("Omelette", 15, Difficulty::Easy),
            recipe("Beef Stew", 120, Difficulty::Hard),
        ]
    }

    #[test]
    fn test_reset_restores_original_order() {
        let recipes = sample();
        let favorite = recipes[3].id;
        let mut browser = RecipeBrowser::new(recipes, HashSet::from([favorite]));

        browser.set_keyword("e");
        browser.set_time_filter(TimeFilter::Long);
        browser.set_difficulty_filter(DifficultyFilter::Only(Difficulty::Hard));
        browser.set_favorites_only(true);
        assert_eq!(titles(&browser), vec!["Beef Stew"]);

        browser.reset();
        assert!(browser.query().is_default());
        assert_eq!(
            titles(&browser),
            vec!["Pasta Bake", "Tea", "Omelette", "Beef Stew"]
        );
    }

    #[test]
    fn test_boundary_recipe_in_two_buckets() {
        let mut browser = RecipeBrowser::new(sample(), HashSet::new());

        browser.set_time_filter(TimeFilter::Quick);
        assert_eq!(titles(&browser), vec!["Tea", "Omelette"]);

        browser.set_time_filter(TimeFilter::Medium);
        assert_eq!(titles(&browser), vec!["Omelette"]);
    }

    #[test]
    fn test_facets_follow_new_data() {
        let mut browser = RecipeBrowser::new(sample(), HashSet::new());
        browser.set_favorites_only(true);
        assert!(browser.filtered().is_empty());

        let tea = browser.recipes[1].id;
        browser.set_favorites(HashSet::from([tea]));
        assert_eq!(titles(&browser), vec!["Tea"]);
        assert!(browser.is_favorite(tea));

        browser.set_recipes(vec![recipe("Tea", 5, Difficulty::Easy)]);
        assert!(browser.filtered().is_empty());
    }

    #[test]
    fn test_stats_follow_filter() {
        let mut browser = RecipeBrowser::new(sample(), HashSet::new());
        let all = browser.stats();
        assert_eq!(all.recipe_count, 4);
        assert_eq!(all.total_minutes, 180);
        assert_eq!(all.easy_count, 2);

        browser.set_difficulty_filter(DifficultyFilter::Only(Difficulty::Easy));
        let easy = browser.stats();
        assert_eq!(easy.recipe_count, 2);
        assert_eq!(easy.total_minutes, 20);
    }

    #[tokio::test]
    async fn test_load_with_favorites() {
        let db = test_connection().await;
        let recipes = RecipeRepository::new(db.clone());
        let catalog = RecipeCatalog::new(recipes.clone(), Arc::new(FakeImageHost::new()));
        let ledger = FavoritesLedger::new(FavoriteRepository::new(db), recipes.clone());

        for stored in sample() {
            recipes.create(&stored).await.unwrap();
        }
        let ctx = AuthContext::signed_in(AuthUser {
            uid: "ana".into(),
            email: "ana@example.com".into(),
            display_name: None,
        });
        let stew = catalog
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .find(|r| r.title == "Beef Stew")
            .unwrap();
        ledger.toggle(&ctx, stew.id, false).await.unwrap();

        let mut browser = RecipeBrowser::load(&catalog, &ledger, &ctx).await.unwrap();
        assert_eq!(browser.filtered().len(), 4);
        browser.set_favorites_only(true);
        assert_eq!(titles(&browser), vec!["Beef Stew"]);

        let anonymous = RecipeBrowser::load(&catalog, &ledger, &AuthContext::anonymous())
            .await
            .unwrap()
            .with_query(RecipeQuery {
                favorites_only: true,
                ..Default::default()
            });
        assert!(anonymous.filtered().is_empty());
    }
}
