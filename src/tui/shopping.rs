use super::state::UiState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn draw_shopping(area: Rect, f: &mut Frame, state: &UiState) {
    if state.lists.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from("  No shopping lists."),
            Line::from("  n  create one    a  (Recipes tab) add a recipe's ingredients"),
        ])
        .block(Block::default().borders(Borders::ALL).title("Shopping"));
        f.render_widget(hint, area);
        return;
    }

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let lists: Vec<ListItem> = state
        .lists
        .iter()
        .map(|l| {
            let open = l.items.iter().filter(|i| !i.checked).count();
            ListItem::new(Line::from(vec![
                Span::raw(l.name.clone()),
                Span::styled(
                    format!(" ({open}/{})", l.items.len()),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();
    let list_widget = List::new(lists)
        .block(Block::default().borders(Borders::ALL).title("Lists  ←/→"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    list_state.select(Some(state.list_selected));
    f.render_stateful_widget(list_widget, row[0], &mut list_state);

    let Some(selected) = state.selected_list() else {
        return;
    };
    let items: Vec<ListItem> = selected
        .items
        .iter()
        .map(|item| {
            let mark = if item.checked { "[x] " } else { "[ ] " };
            let qty = match (item.quantity.as_deref(), item.unit.as_deref()) {
                (Some(q), Some(u)) => format!("{q} {u} "),
                (Some(q), None) => format!("{q} "),
                _ => String::new(),
            };
            let style = if item.checked {
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(Color::Green)),
                Span::styled(format!("{qty}{}", item.ingredient_name), style),
            ]))
        })
        .collect();

    let items_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{}  (space toggles, d deletes list)", selected.name)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut item_state = ListState::default();
    if !selected.items.is_empty() {
        item_state.select(Some(state.item_selected));
    }
    f.render_stateful_widget(items_widget, row[1], &mut item_state);
}
