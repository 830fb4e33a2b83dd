use crate::api::ApiClient;
use crate::model::RecipeSummary;
use crate::storage;
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "sous",
    version,
    about = "Terminal recipe manager with guided cook mode"
)]
pub struct Cli {
    /// Base URL of the recipe backend
    #[arg(long, default_value = "http://localhost:8000")]
    pub server: String,

    /// Print JSON and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Print a plain-text recipe listing and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Operate on a single recipe by id (with --json/--text)
    #[arg(long)]
    pub recipe: Option<String>,

    /// Filter the recipe listing by a search query
    #[arg(long)]
    pub query: Option<String>,

    /// Import a recipe from a URL, save it, and exit
    #[arg(long)]
    pub import_url: Option<String>,

    /// Log in with this email (paired with --password); the token is cached
    #[arg(long)]
    pub email: Option<String>,

    /// Password for --email
    #[arg(long)]
    pub password: Option<String>,

    /// Bearer token, overriding the cached one
    #[arg(long)]
    pub token: Option<String>,

    /// Forget the cached token and exit
    #[arg(long)]
    pub logout: bool,
}

pub async fn run(args: Cli) -> Result<()> {
    if args.logout {
        storage::clear_token()?;
        println!("Logged out.");
        return Ok(());
    }

    let token = args.token.clone().or_else(storage::load_token);
    let mut api = ApiClient::new(&args.server, token)?;

    if let (Some(email), Some(password)) = (args.email.as_deref(), args.password.as_deref()) {
        let resp = api.login(email, password).await.context("login failed")?;
        storage::save_token(&resp.access_token)?;
        api.set_token(resp.access_token);
        eprintln!("Logged in as {email}.");
    } else if !api.has_token() {
        anyhow::bail!(
            "not logged in: run `sous --email you@example.com --password …` once \
             (or pass --token)"
        );
    }

    if let Some(url) = args.import_url.as_deref() {
        let recipe = api.import_from_url(url).await?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&recipe)?);
        } else {
            println!("Imported \"{}\" ({})", recipe.title, recipe.id);
        }
        return Ok(());
    }

    if args.json {
        return run_json(&args, &api).await;
    }
    if args.text {
        return run_text(&args, &api).await;
    }

    #[cfg(feature = "tui")]
    {
        crate::tui::run(args, api).await
    }
    #[cfg(not(feature = "tui"))]
    {
        // Fallback when built without TUI support.
        run_text(&args, &api).await
    }
}

async fn run_json(args: &Cli, api: &ApiClient) -> Result<()> {
    let out = match args.recipe.as_deref() {
        Some(id) => serde_json::to_string_pretty(&api.get_recipe(id).await?)?,
        None => serde_json::to_string_pretty(&api.list_recipes(args.query.as_deref()).await?)?,
    };
    println!("{out}");
    Ok(())
}

async fn run_text(args: &Cli, api: &ApiClient) -> Result<()> {
    match args.recipe.as_deref() {
        Some(id) => {
            let recipe = api.get_recipe(id).await?;
            println!("{}", recipe.title);
            if let Some(desc) = recipe.description.as_deref() {
                println!("{desc}");
            }
            println!();
            println!("Ingredients:");
            for ing in &recipe.ingredients {
                println!("  - {}", format_ingredient_line(ing.quantity.as_deref(), ing.unit.as_deref(), &ing.name));
            }
            println!();
            println!("Steps:");
            for (i, step) in recipe.ordered_steps().iter().enumerate() {
                let timer = step
                    .timer_seconds
                    .map(|s| format!("  [{} min]", s.div_ceil(60)))
                    .unwrap_or_default();
                println!("  {}. {}{timer}", i + 1, step.description);
            }
        }
        None => {
            let recipes = api.list_recipes(args.query.as_deref()).await?;
            for line in format_recipe_listing(&recipes) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn format_ingredient_line(quantity: Option<&str>, unit: Option<&str>, name: &str) -> String {
    match (quantity, unit) {
        (Some(q), Some(u)) => format!("{q} {u} {name}"),
        (Some(q), None) => format!("{q} {name}"),
        _ => name.to_string(),
    }
}

fn format_recipe_listing(recipes: &[RecipeSummary]) -> Vec<String> {
    if recipes.is_empty() {
        return vec!["No recipes.".to_string()];
    }
    recipes
        .iter()
        .map(|r| {
            let time = r
                .total_time
                .map(|t| format!(" ({t} min)"))
                .unwrap_or_default();
            let cuisine = r
                .cuisine
                .as_deref()
                .map(|c| format!(" [{c}]"))
                .unwrap_or_default();
            format!("{}  {}{time}{cuisine}", r.id, r.title)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredient_line_formats_partial_fields() {
        assert_eq!(
            format_ingredient_line(Some("2"), Some("tbsp"), "olive oil"),
            "2 tbsp olive oil"
        );
        assert_eq!(format_ingredient_line(Some("4"), None, "eggs"), "4 eggs");
        assert_eq!(format_ingredient_line(None, None, "salt"), "salt");
    }

    #[test]
    fn listing_handles_empty_and_optional_fields() {
        assert_eq!(format_recipe_listing(&[]), vec!["No recipes.".to_string()]);

        let recipes: Vec<RecipeSummary> = serde_json::from_str(
            r#"[{"id": "r1", "title": "Toast", "total_time": 5, "cuisine": "Breakfast"},
                {"id": "r2", "title": "Water"}]"#,
        )
        .unwrap();
        let lines = format_recipe_listing(&recipes);
        assert_eq!(lines[0], "r1  Toast (5 min) [Breakfast]");
        assert_eq!(lines[1], "r2  Water");
    }
}
