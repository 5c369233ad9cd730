//! Recipe and favorites endpoints

use std::sync::Arc;

use recipebox_domain::constants::RECIPES_PER_PAGE;
use recipebox_domain::{filter_by_name, paginate, Page, Recipe, RecipeDraft};
use tracing::{debug, info, instrument};

use super::envelope::{RecipeEnvelope, RecipeListEnvelope};
use crate::gateway::{FormPart, GatewayError, RequestGateway, RequestSpec};

/// Recipe CRUD and favorites over the gateway
#[derive(Debug, Clone)]
pub struct RecipeApi {
    gateway: Arc<RequestGateway>,
}

impl RecipeApi {
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self { gateway }
    }

    /// All recipes visible to the signed-in user
    ///
    /// # Errors
    ///
    /// Propagates gateway errors
    #[instrument(skip(self))]
    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, GatewayError> {
        self.fetch_list("/recipes").await
    }

    /// Dashboard view: name filter plus a page of [`RECIPES_PER_PAGE`]
    ///
    /// # Errors
    ///
    /// Propagates gateway errors
    pub async fn search_recipes(
        &self,
        query: &str,
        page: usize,
    ) -> Result<Page<Recipe>, GatewayError> {
        let recipes = self.list_recipes().await?;
        let matches = filter_by_name(&recipes, query);
        Ok(paginate(&matches, page, RECIPES_PER_PAGE))
    }

    /// Recipes created by the signed-in user
    ///
    /// # Errors
    ///
    /// Propagates gateway errors
    #[instrument(skip(self))]
    pub async fn my_recipes(&self) -> Result<Vec<Recipe>, GatewayError> {
        self.fetch_list("/recipes/my").await
    }

    /// # Errors
    ///
    /// Returns `ServerError` with status 404 for unknown ids
    #[instrument(skip(self))]
    pub async fn get_recipe(&self, id: &str) -> Result<Recipe, GatewayError> {
        let path = format!("/recipe/{}", urlencoding::encode(id));
        let envelope: RecipeEnvelope = self.gateway.send(RequestSpec::get(path)).await?.json()?;
        Ok(envelope.into_recipe())
    }

    /// Validate and submit a new recipe
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for an empty name or no ingredients, before any
    /// network call is made
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_recipe(&self, draft: RecipeDraft) -> Result<Recipe, GatewayError> {
        let spec = draft_request(RequestSpec::post("/recipes"), draft)?;
        let envelope: RecipeEnvelope = self.gateway.send(spec).await?.json()?;
        let recipe = envelope.into_recipe();
        info!(recipe_id = %recipe.id, "recipe created");
        Ok(recipe)
    }

    /// # Errors
    ///
    /// Returns `InvalidRequest` for an invalid draft, otherwise gateway errors
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn update_recipe(
        &self,
        id: &str,
        draft: RecipeDraft,
    ) -> Result<Recipe, GatewayError> {
        let path = format!("/edit/recipe/{}", urlencoding::encode(id));
        let spec = draft_request(RequestSpec::put(path), draft)?;
        let envelope: RecipeEnvelope = self.gateway.send(spec).await?.json()?;
        info!(recipe_id = %id, "recipe updated");
        Ok(envelope.into_recipe())
    }

    /// # Errors
    ///
    /// Propagates gateway errors
    #[instrument(skip(self))]
    pub async fn delete_recipe(&self, id: &str) -> Result<(), GatewayError> {
        let path = format!("/delete/recipe/{}", urlencoding::encode(id));
        self.gateway.send(RequestSpec::delete(path)).await?;
        info!(recipe_id = %id, "recipe deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates gateway errors
    #[instrument(skip(self))]
    pub async fn favorites(&self) -> Result<Vec<Recipe>, GatewayError> {
        self.fetch_list("/favorites").await
    }

    /// # Errors
    ///
    /// Propagates gateway errors
    #[instrument(skip(self))]
    pub async fn add_favorite(&self, id: &str) -> Result<(), GatewayError> {
        let path = format!("/favorites/{}", urlencoding::encode(id));
        self.gateway.send(RequestSpec::post(path)).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates gateway errors
    #[instrument(skip(self))]
    pub async fn remove_favorite(&self, id: &str) -> Result<(), GatewayError> {
        let path = format!("/favorites/{}", urlencoding::encode(id));
        self.gateway.send(RequestSpec::delete(path)).await?;
        Ok(())
    }

    async fn fetch_list(&self, path: &str) -> Result<Vec<Recipe>, GatewayError> {
        let envelope: RecipeListEnvelope =
            self.gateway.send(RequestSpec::get(path)).await?.json()?;
        let recipes = envelope.into_recipes();
        debug!(path, count = recipes.len(), "fetched recipes");
        Ok(recipes)
    }
}

/// Attach a validated draft: multipart when images are present, JSON otherwise.
fn draft_request(spec: RequestSpec, draft: RecipeDraft) -> Result<RequestSpec, GatewayError> {
    let draft = draft.normalized()?;

    if !draft.has_images() {
        return spec.json(&draft);
    }

    let mut parts = vec![
        FormPart::text("name", draft.name),
        FormPart::text("description", draft.description),
        FormPart::text("duration", draft.duration),
        FormPart::text("instructions", draft.instructions),
    ];
    parts.extend(draft.ingredients.into_iter().map(|i| FormPart::text("ingredients", i)));
    parts.extend(
        draft
            .images
            .into_iter()
            .map(|img| FormPart::file("image", img.filename, img.content_type, img.bytes)),
    );

    Ok(spec.multipart(parts))
}
