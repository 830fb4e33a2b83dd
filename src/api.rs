//! HTTP client for the recipe-manager REST backend.
//!
//! Thin typed wrappers over the backend endpoints; every call returns the
//! deserialized body or an error carrying the backend's `detail` message.

use crate::model::{Recipe, RecipeSummary, ShoppingList, TokenResponse, UserInfo};
use anyhow::{bail, Context, Result};
use serde_json::json;
use std::time::Duration;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("sous/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.token.as_deref() {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Surface the backend's `{"detail": ...}` message on non-2xx responses.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let detail = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
            .unwrap_or_else(|| status.to_string());
        bail!("{detail} (HTTP {})", status.as_u16());
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let resp = self
            .request(reqwest::Method::POST, "/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .context("login request")?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn me(&self) -> Result<UserInfo> {
        let resp = self
            .request(reqwest::Method::GET, "/api/auth/me")
            .send()
            .await
            .context("fetch current user")?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn list_recipes(&self, query: Option<&str>) -> Result<Vec<RecipeSummary>> {
        let mut req = self.request(reqwest::Method::GET, "/api/recipes");
        if let Some(q) = query {
            if !q.is_empty() {
                req = req.query(&[("q", q)]);
            }
        }
        let resp = req.send().await.context("list recipes")?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn get_recipe(&self, recipe_id: &str) -> Result<Recipe> {
        let resp = self
            .request(reqwest::Method::GET, &format!("/api/recipes/{recipe_id}"))
            .send()
            .await
            .context("fetch recipe")?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// Parse a recipe from a URL, then persist it. The import endpoint only
    /// parses; saving the parsed recipe is a second call.
    pub async fn import_from_url(&self, url: &str) -> Result<Recipe> {
        let resp = self
            .request(reqwest::Method::POST, "/api/import/url")
            .json(&json!({ "url": url }))
            .send()
            .await
            .context("import recipe from url")?;
        let parsed: serde_json::Value = Self::check(resp).await?.json().await?;

        let resp = self
            .request(reqwest::Method::POST, "/api/recipes")
            .json(&parsed)
            .send()
            .await
            .context("save imported recipe")?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn shopping_lists(&self) -> Result<Vec<ShoppingList>> {
        let resp = self
            .request(reqwest::Method::GET, "/api/shopping")
            .send()
            .await
            .context("list shopping lists")?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn create_shopping_list(&self, name: &str) -> Result<ShoppingList> {
        let resp = self
            .request(reqwest::Method::POST, "/api/shopping")
            .json(&json!({ "name": name }))
            .send()
            .await
            .context("create shopping list")?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn add_from_recipe(
        &self,
        list_id: &str,
        recipe_id: &str,
        ingredient_ids: &[String],
    ) -> Result<ShoppingList> {
        let resp = self
            .request(
                reqwest::Method::POST,
                &format!("/api/shopping/{list_id}/add-from-recipe"),
            )
            .json(&json!({ "recipe_id": recipe_id, "ingredient_ids": ingredient_ids }))
            .send()
            .await
            .context("add ingredients to shopping list")?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn toggle_item(&self, list_id: &str, item_id: &str) -> Result<ShoppingList> {
        let resp = self
            .request(
                reqwest::Method::PATCH,
                &format!("/api/shopping/{list_id}/items/{item_id}/check"),
            )
            .send()
            .await
            .context("toggle shopping item")?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn delete_shopping_list(&self, list_id: &str) -> Result<()> {
        let resp = self
            .request(reqwest::Method::DELETE, &format!("/api/shopping/{list_id}"))
            .send()
            .await
            .context("delete shopping list")?;
        Self::check(resp).await?;
        Ok(())
    }
}
