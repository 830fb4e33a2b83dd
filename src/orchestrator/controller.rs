//! Request lifecycle controller.
//!
//! Receives commands from the UI thread, runs the backend calls, and emits
//! events back so the UI never blocks on network I/O.

use crate::api::ApiClient;
use crate::model::{AppEvent, InfoEvent};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Commands emitted by UI layers toward the backend.
#[derive(Debug, Clone)]
pub(crate) enum ApiCommand {
    LoadMe,
    LoadRecipes { query: Option<String> },
    LoadRecipe { recipe_id: String },
    ImportUrl { url: String },
    LoadShopping,
    CreateList { name: String },
    AddFromRecipe {
        list_id: String,
        recipe_id: String,
        ingredient_ids: Vec<String>,
    },
    ToggleItem { list_id: String, item_id: String },
    DeleteList { list_id: String },
    Quit,
}

/// Serve API commands until the UI hangs up or sends `Quit`. Requests are
/// spawned so a slow call never delays the next command.
pub(crate) async fn run_controller(
    api: ApiClient,
    event_tx: UnboundedSender<AppEvent>,
    mut cmd_rx: UnboundedReceiver<ApiCommand>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        if matches!(cmd, ApiCommand::Quit) {
            break;
        }
        let api = api.clone();
        let tx = event_tx.clone();
        tokio::spawn(async move { handle_command(api, tx, cmd).await });
    }
}

async fn handle_command(api: ApiClient, tx: UnboundedSender<AppEvent>, cmd: ApiCommand) {
    // Sends can only fail when the UI is gone; nothing left to report to.
    match cmd {
        ApiCommand::LoadMe => match api.me().await {
            Ok(user) => {
                let _ = tx.send(AppEvent::UserLoaded { user });
            }
            Err(e) => send_error(&tx, "checking login", e),
        },
        ApiCommand::LoadRecipes { query } => match api.list_recipes(query.as_deref()).await {
            Ok(recipes) => {
                let _ = tx.send(AppEvent::RecipesLoaded { recipes });
            }
            Err(e) => send_error(&tx, "loading recipes", e),
        },
        ApiCommand::LoadRecipe { recipe_id } => match api.get_recipe(&recipe_id).await {
            Ok(recipe) => {
                let _ = tx.send(AppEvent::RecipeLoaded {
                    recipe: Box::new(recipe),
                });
            }
            Err(e) => send_error(&tx, "loading recipe", e),
        },
        ApiCommand::ImportUrl { url } => match api.import_from_url(&url).await {
            Ok(recipe) => {
                let _ = tx.send(AppEvent::RecipeImported {
                    recipe: Box::new(recipe),
                });
            }
            Err(e) => send_error(&tx, "importing recipe", e),
        },
        ApiCommand::LoadShopping => match api.shopping_lists().await {
            Ok(lists) => {
                let _ = tx.send(AppEvent::ShoppingLoaded { lists });
            }
            Err(e) => send_error(&tx, "loading shopping lists", e),
        },
        ApiCommand::CreateList { name } => match api.create_shopping_list(&name).await {
            Ok(list) => {
                let _ = tx.send(AppEvent::ShoppingUpdated { list: Box::new(list) });
            }
            Err(e) => send_error(&tx, "creating shopping list", e),
        },
        ApiCommand::AddFromRecipe {
            list_id,
            recipe_id,
            ingredient_ids,
        } => match api.add_from_recipe(&list_id, &recipe_id, &ingredient_ids).await {
            Ok(list) => {
                let _ = tx.send(AppEvent::Info(InfoEvent::Message(format!(
                    "Added {} ingredient(s) to \"{}\"",
                    ingredient_ids.len(),
                    list.name
                ))));
                let _ = tx.send(AppEvent::ShoppingUpdated { list: Box::new(list) });
            }
            Err(e) => send_error(&tx, "adding ingredients", e),
        },
        ApiCommand::ToggleItem { list_id, item_id } => {
            match api.toggle_item(&list_id, &item_id).await {
                Ok(list) => {
                    let _ = tx.send(AppEvent::ShoppingUpdated { list: Box::new(list) });
                }
                Err(e) => send_error(&tx, "updating shopping item", e),
            }
        }
        ApiCommand::DeleteList { list_id } => match api.delete_shopping_list(&list_id).await {
            Ok(()) => {
                let _ = tx.send(AppEvent::ShoppingDeleted { list_id });
            }
            Err(e) => send_error(&tx, "deleting shopping list", e),
        },
        ApiCommand::Quit => {}
    }
}

fn send_error(tx: &UnboundedSender<AppEvent>, action: &'static str, err: anyhow::Error) {
    let _ = tx.send(AppEvent::Info(InfoEvent::ApiError {
        action,
        error: format!("{err:#}"),
    }));
}
