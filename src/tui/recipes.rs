use super::state::UiState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn draw_recipes(area: Rect, f: &mut Frame, state: &UiState) {
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    draw_listing(row[0], f, state);
    draw_detail(row[1], f, state);
}

fn draw_listing(area: Rect, f: &mut Frame, state: &UiState) {
    let items: Vec<ListItem> = state
        .recipes
        .iter()
        .map(|r| {
            let time = r
                .total_time
                .map(|t| format!(" {t}m"))
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::raw(r.title.clone()),
                Span::styled(time, Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let title = if state.query.is_empty() {
        "Recipes".to_string()
    } else {
        format!("Recipes (filter: {})", state.query)
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !state.recipes.is_empty() {
        list_state.select(Some(state.recipe_selected));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_detail(area: Rect, f: &mut Frame, state: &UiState) {
    let detail = state
        .detail
        .as_ref()
        .filter(|d| state.selected_recipe().map(|s| s.id == d.id).unwrap_or(false));

    let Some(recipe) = detail else {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from("  Enter  open selected recipe"),
            Line::from("  c      cook the opened recipe"),
            Line::from("  /      search    i  import from URL"),
        ])
        .block(Block::default().borders(Borders::ALL).title("Details"));
        f.render_widget(hint, area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    if let Some(desc) = recipe.description.as_deref() {
        lines.push(Line::from(Span::styled(
            desc.to_string(),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }

    let mut meta: Vec<String> = Vec::new();
    if let Some(s) = recipe.servings.as_deref() {
        meta.push(format!("serves {s}"));
    }
    if let Some(t) = recipe.total_time {
        meta.push(format!("{t} min"));
    }
    if let Some(c) = recipe.cuisine.as_deref() {
        meta.push(c.to_string());
    }
    if !meta.is_empty() {
        lines.push(Line::from(Span::raw(meta.join("  ·  "))));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Ingredients",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for ing in &recipe.ingredients {
        let qty = match (ing.quantity.as_deref(), ing.unit.as_deref()) {
            (Some(q), Some(u)) => format!("{q} {u} "),
            (Some(q), None) => format!("{q} "),
            _ => String::new(),
        };
        lines.push(Line::from(vec![
            Span::raw("  • "),
            Span::styled(qty, Style::default().fg(Color::Cyan)),
            Span::raw(ing.name.clone()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Steps",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (i, step) in recipe.ordered_steps().iter().enumerate() {
        let timer = step
            .timer_seconds
            .map(|s| format!("  [{}]", super::cook::format_clock(s)))
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("  {}. ", i + 1), Style::default().fg(Color::Gray)),
            Span::raw(step.description.clone()),
            Span::styled(timer, Style::default().fg(Color::Yellow)),
        ]));
    }

    let block = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(recipe.title.clone()),
        );
    f.render_widget(block, area);
}
