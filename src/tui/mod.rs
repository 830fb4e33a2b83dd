mod cook;
mod help;
mod recipes;
mod shopping;
mod state;

use crate::api::ApiClient;
use crate::cli::Cli;
use crate::model::{AppEvent, Recipe};
use crate::orchestrator::{self, ApiCommand};
use crate::session::{CookCommand, SessionController, TokioTicker};
use crate::storage;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Terminal,
};
use state::{InputMode, UiState};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(args: Cli, api: ApiClient) -> Result<()> {
    // Unbounded channels avoid backpressure between the UI thread and the
    // request controller.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<ApiCommand>();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the
    // Tokio runtime; the runtime handle travels along for tick scheduling.
    let rt = tokio::runtime::Handle::current();
    let ui_event_tx = event_tx.clone();
    let ui_handle =
        std::thread::spawn(move || run_threaded(args, rt, ui_event_tx, event_rx, cmd_tx));

    orchestrator::run_controller(api, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    match join_res {
        Ok(Ok(res)) => res,
        Ok(Err(_)) | Err(_) => Err(anyhow::anyhow!("TUI thread panicked")),
    }
}

/// Run the TUI loop on a dedicated thread.
fn run_threaded(
    args: Cli,
    rt: tokio::runtime::Handle,
    event_tx: UnboundedSender<AppEvent>,
    mut event_rx: UnboundedReceiver<AppEvent>,
    cmd_tx: UnboundedSender<ApiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut state = UiState {
        query: args.query.clone().unwrap_or_default(),
        ..Default::default()
    };

    let _ = cmd_tx.send(ApiCommand::LoadMe);
    let _ = cmd_tx.send(ApiCommand::LoadRecipes {
        query: args.query.clone(),
    });
    let _ = cmd_tx.send(ApiCommand::LoadShopping);

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking to keep the UI responsive.
        while let Ok(ev) = event_rx.try_recv() {
            apply_event(&mut state, &cmd_tx, ev);
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                if let Loop::Quit = handle_key(&mut state, &rt, &event_tx, &cmd_tx, k) {
                    break Ok(());
                }
            }
        }
    };

    if let Some(cook) = state.cook.as_mut() {
        cook.teardown();
    }
    let _ = cmd_tx.send(ApiCommand::Quit);

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

enum Loop {
    Continue,
    Quit,
}

fn handle_key(
    state: &mut UiState,
    rt: &tokio::runtime::Handle,
    event_tx: &UnboundedSender<AppEvent>,
    cmd_tx: &UnboundedSender<ApiCommand>,
    k: KeyEvent,
) -> Loop {
    if k.modifiers == KeyModifiers::CONTROL && k.code == KeyCode::Char('c') {
        return Loop::Quit;
    }

    // An active cook session is modal: its router owns the keyboard until the
    // session ends, so no recipe/shopping binding can fire mid-cook.
    if state.cook.is_some() {
        handle_cook_key(state, k);
        return Loop::Continue;
    }

    if state.input_mode != InputMode::None {
        handle_input_key(state, cmd_tx, k);
        return Loop::Continue;
    }

    match k.code {
        KeyCode::Char('q') => return Loop::Quit,
        KeyCode::Tab => {
            state.tab = (state.tab + 1) % 3;
        }
        KeyCode::Char('?') => {
            state.tab = 2;
        }
        KeyCode::Char('r') => {
            let _ = cmd_tx.send(ApiCommand::LoadRecipes {
                query: non_empty(&state.query),
            });
            let _ = cmd_tx.send(ApiCommand::LoadShopping);
            state.info = "Refreshing…".into();
        }
        _ => match state.tab {
            0 => handle_recipes_key(state, rt, event_tx, cmd_tx, k),
            1 => handle_shopping_key(state, cmd_tx, k),
            _ => {}
        },
    }
    Loop::Continue
}

fn handle_recipes_key(
    state: &mut UiState,
    rt: &tokio::runtime::Handle,
    event_tx: &UnboundedSender<AppEvent>,
    cmd_tx: &UnboundedSender<ApiCommand>,
    k: KeyEvent,
) {
    match k.code {
        KeyCode::Up | KeyCode::Char('k') => {
            if state.recipe_selected > 0 {
                state.recipe_selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.recipe_selected + 1 < state.recipes.len() {
                state.recipe_selected += 1;
            }
        }
        KeyCode::Enter => {
            if let Some(summary) = state.selected_recipe() {
                let _ = cmd_tx.send(ApiCommand::LoadRecipe {
                    recipe_id: summary.id.clone(),
                });
            }
        }
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Search;
            state.input_buffer = state.query.clone();
        }
        KeyCode::Char('i') => {
            state.input_mode = InputMode::ImportUrl;
            state.input_buffer.clear();
        }
        KeyCode::Char('c') => start_cook_mode(state, rt, event_tx),
        KeyCode::Char('e') => {
            if let Some(recipe) = selected_detail(state) {
                match storage::export_recipe_json(recipe) {
                    Ok(p) => state.info = format!("Exported: {}", p.display()),
                    Err(e) => state.info = format!("Export failed: {e:#}"),
                }
            } else {
                state.info = "Open a recipe first (Enter).".into();
            }
        }
        KeyCode::Char('a') => {
            let (recipe_id, ingredient_ids) = match selected_detail(state) {
                Some(recipe) => (
                    recipe.id.clone(),
                    recipe
                        .ingredients
                        .iter()
                        .map(|i| i.id.clone())
                        .collect::<Vec<_>>(),
                ),
                None => {
                    state.info = "Open a recipe first (Enter).".into();
                    return;
                }
            };
            let Some(list_id) = state.selected_list().map(|l| l.id.clone()) else {
                state.info = "No shopping list yet (press n on the Shopping tab).".into();
                return;
            };
            if ingredient_ids.is_empty() {
                state.info = "Recipe has no ingredients to add.".into();
                return;
            }
            let _ = cmd_tx.send(ApiCommand::AddFromRecipe {
                list_id,
                recipe_id,
                ingredient_ids,
            });
        }
        _ => {}
    }
}

fn handle_shopping_key(state: &mut UiState, cmd_tx: &UnboundedSender<ApiCommand>, k: KeyEvent) {
    match k.code {
        KeyCode::Left | KeyCode::Char('h') => {
            if state.list_selected > 0 {
                state.list_selected -= 1;
                state.item_selected = 0;
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if state.list_selected + 1 < state.lists.len() {
                state.list_selected += 1;
                state.item_selected = 0;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if state.item_selected > 0 {
                state.item_selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let items = state.selected_list().map(|l| l.items.len()).unwrap_or(0);
            if state.item_selected + 1 < items {
                state.item_selected += 1;
            }
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(list) = state.selected_list() {
                if let Some(item) = list.items.get(state.item_selected) {
                    let _ = cmd_tx.send(ApiCommand::ToggleItem {
                        list_id: list.id.clone(),
                        item_id: item.id.clone(),
                    });
                }
            }
        }
        KeyCode::Char('n') => {
            state.input_mode = InputMode::NewList;
            state.input_buffer.clear();
        }
        KeyCode::Char('d') => {
            if let Some(list) = state.selected_list() {
                let _ = cmd_tx.send(ApiCommand::DeleteList {
                    list_id: list.id.clone(),
                });
            }
        }
        _ => {}
    }
}

/// Keys while a line-input prompt is open.
fn handle_input_key(state: &mut UiState, cmd_tx: &UnboundedSender<ApiCommand>, k: KeyEvent) {
    match k.code {
        KeyCode::Esc => {
            state.input_mode = InputMode::None;
            state.input_buffer.clear();
        }
        KeyCode::Backspace => {
            state.input_buffer.pop();
        }
        KeyCode::Enter => {
            let buffer = std::mem::take(&mut state.input_buffer);
            let mode = state.input_mode;
            state.input_mode = InputMode::None;
            match mode {
                InputMode::Search => {
                    state.query = buffer;
                    let _ = cmd_tx.send(ApiCommand::LoadRecipes {
                        query: non_empty(&state.query),
                    });
                }
                InputMode::ImportUrl => {
                    if buffer.is_empty() {
                        return;
                    }
                    state.info = format!("Importing {buffer}…");
                    let _ = cmd_tx.send(ApiCommand::ImportUrl { url: buffer });
                }
                InputMode::NewList => {
                    if buffer.is_empty() {
                        return;
                    }
                    let _ = cmd_tx.send(ApiCommand::CreateList { name: buffer });
                }
                InputMode::None => {}
            }
        }
        KeyCode::Char(c) => {
            state.input_buffer.push(c);
        }
        _ => {}
    }
}

/// Keys while cook mode is active: everything goes through the session's
/// input router; unrouted keys are ignored.
fn handle_cook_key(state: &mut UiState, k: KeyEvent) {
    let Some(cook) = state.cook.as_mut() else {
        return;
    };
    let Some(cmd) = cook.route_key(k) else {
        return;
    };
    if let Err(e) = cook.apply(cmd) {
        // Out-of-range jumps are rejected, session state untouched.
        state.info = e.to_string();
        return;
    }
    if matches!(cmd, CookCommand::Exit) {
        state.cook = None;
        state.info = "Left cook mode.".into();
    }
}

fn start_cook_mode(
    state: &mut UiState,
    rt: &tokio::runtime::Handle,
    event_tx: &UnboundedSender<AppEvent>,
) {
    let Some(recipe) = selected_detail(state) else {
        state.info = "Open a recipe first (Enter), then press c.".into();
        return;
    };
    let title = recipe.title.clone();
    let ticker = TokioTicker::new(rt.clone(), event_tx.clone());
    match SessionController::new(recipe.ordered_steps(), Box::new(ticker)) {
        Ok(session) => {
            state.cook = Some(session);
            state.info = format!("Cooking \"{title}\"");
        }
        Err(e) => {
            state.info = format!("Cannot start cook mode: {e}");
        }
    }
}

/// The loaded detail, but only when it matches the highlighted list entry.
fn selected_detail(state: &UiState) -> Option<&Recipe> {
    let detail = state.detail.as_ref()?;
    let selected = state.selected_recipe()?;
    (detail.id == selected.id).then_some(detail)
}

fn apply_event(state: &mut UiState, cmd_tx: &UnboundedSender<ApiCommand>, ev: AppEvent) {
    match ev {
        AppEvent::RecipesLoaded { recipes } => {
            state.info = format!("{} recipe(s)", recipes.len());
            state.recipes = recipes;
            state.clamp_selections();
        }
        AppEvent::RecipeLoaded { recipe } => {
            state.detail = Some(*recipe);
        }
        AppEvent::RecipeImported { recipe } => {
            state.info = format!("Imported \"{}\"", recipe.title);
            state.detail = Some(*recipe);
            let _ = cmd_tx.send(ApiCommand::LoadRecipes {
                query: non_empty(&state.query),
            });
        }
        AppEvent::ShoppingLoaded { lists } => {
            state.lists = lists;
            state.clamp_selections();
        }
        AppEvent::ShoppingUpdated { list } => {
            state.upsert_list(*list);
        }
        AppEvent::ShoppingDeleted { list_id } => {
            state.lists.retain(|l| l.id != list_id);
            state.clamp_selections();
            state.info = "List deleted.".into();
        }
        AppEvent::UserLoaded { user } => {
            state.user = Some(user);
        }
        AppEvent::CookTick { epoch } => {
            if let Some(cook) = state.cook.as_mut() {
                cook.on_tick(epoch);
            }
        }
        AppEvent::Info(info) => {
            state.info = info.to_message();
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    // Cook mode takes over the whole screen.
    if let Some(cook) = state.cook.as_ref() {
        let title = state
            .detail
            .as_ref()
            .map(|r| r.title.as_str())
            .unwrap_or("Cooking");
        cook::draw_cook(area, f, &cook.view(), title);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let tabs = Tabs::new(vec![
        Line::from("Recipes"),
        Line::from("Shopping"),
        Line::from("Help"),
    ])
    .select(state.tab)
    .block(Block::default().borders(Borders::ALL).title("sous"))
    .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => recipes::draw_recipes(chunks[1], f, state),
        1 => shopping::draw_shopping(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f),
    }

    draw_status(chunks[2], f, state);
}

fn draw_status(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let line = if state.input_mode != InputMode::None {
        Line::from(vec![
            Span::styled(
                format!("{}: ", state.input_mode.prompt()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(state.input_buffer.clone()),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ])
    } else {
        let account = state
            .user
            .as_ref()
            .map(|u| u.email.as_str())
            .unwrap_or("not logged in");
        Line::from(vec![
            Span::styled("Info: ", Style::default().fg(Color::Gray)),
            Span::raw(state.info.clone()),
            Span::raw("   "),
            Span::styled("Account: ", Style::default().fg(Color::Gray)),
            Span::raw(account.to_string()),
        ])
    };
    let status =
        Paragraph::new(vec![line]).block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, area);
}
