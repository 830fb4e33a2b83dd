use crate::model::{Recipe, RecipeSummary, ShoppingList, UserInfo};
use crate::session::SessionController;

/// Which line-input prompt is active, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    None,
    Search,
    ImportUrl,
    NewList,
}

impl InputMode {
    pub fn prompt(self) -> &'static str {
        match self {
            InputMode::None => "",
            InputMode::Search => "Search",
            InputMode::ImportUrl => "Import URL",
            InputMode::NewList => "New list",
        }
    }
}

/// UI state owned by the TUI thread only; no cross-thread mutation.
pub struct UiState {
    pub tab: usize,
    pub info: String,
    pub user: Option<UserInfo>,

    pub recipes: Vec<RecipeSummary>,
    pub recipe_selected: usize,
    pub detail: Option<Recipe>,
    pub query: String,

    pub lists: Vec<ShoppingList>,
    pub list_selected: usize,
    pub item_selected: usize,

    pub input_mode: InputMode,
    pub input_buffer: String,

    /// Active cook-mode session; render switches to the full-screen cook view
    /// while this is set, and tabs are inert.
    pub cook: Option<SessionController>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: 0,
            info: String::new(),
            user: None,
            recipes: Vec::new(),
            recipe_selected: 0,
            detail: None,
            query: String::new(),
            lists: Vec::new(),
            list_selected: 0,
            item_selected: 0,
            input_mode: InputMode::None,
            input_buffer: String::new(),
            cook: None,
        }
    }
}

impl UiState {
    pub fn selected_recipe(&self) -> Option<&RecipeSummary> {
        self.recipes.get(self.recipe_selected)
    }

    pub fn selected_list(&self) -> Option<&ShoppingList> {
        self.lists.get(self.list_selected)
    }

    /// Clamp selections after a collection changed underneath them.
    pub fn clamp_selections(&mut self) {
        if self.recipe_selected >= self.recipes.len() {
            self.recipe_selected = self.recipes.len().saturating_sub(1);
        }
        if self.list_selected >= self.lists.len() {
            self.list_selected = self.lists.len().saturating_sub(1);
        }
        let items = self.selected_list().map(|l| l.items.len()).unwrap_or(0);
        if self.item_selected >= items {
            self.item_selected = items.saturating_sub(1);
        }
    }

    /// Replace a list in place, or append when it is new.
    pub fn upsert_list(&mut self, list: ShoppingList) {
        match self.lists.iter_mut().find(|l| l.id == list.id) {
            Some(slot) => *slot = list,
            None => self.lists.push(list),
        }
        self.clamp_selections();
    }
}
