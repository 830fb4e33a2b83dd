use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_help(area: Rect, f: &mut Frame) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Magenta));
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            key("q"),
            Span::raw(" / "),
            key("Ctrl-C"),
            Span::raw("  Quit"),
        ]),
        Line::from(vec![Span::raw("  "), key("tab"), Span::raw("         Switch tabs")]),
        Line::from(vec![Span::raw("  "), key("r"), Span::raw("           Refresh from server")]),
        Line::from(vec![Span::raw("  "), key("?"), Span::raw("           Show this help")]),
        Line::from(""),
        Line::from("Recipes tab:"),
        Line::from(vec![
            Span::raw("  "),
            key("↑/↓"),
            Span::raw(" or "),
            key("j/k"),
            Span::raw("  Navigate"),
        ]),
        Line::from(vec![Span::raw("  "), key("enter"), Span::raw("       Open recipe")]),
        Line::from(vec![Span::raw("  "), key("/"), Span::raw("           Search")]),
        Line::from(vec![Span::raw("  "), key("i"), Span::raw("           Import recipe from URL")]),
        Line::from(vec![Span::raw("  "), key("c"), Span::raw("           Cook the opened recipe")]),
        Line::from(vec![Span::raw("  "), key("a"), Span::raw("           Add ingredients to shopping list")]),
        Line::from(vec![Span::raw("  "), key("e"), Span::raw("           Export recipe as JSON")]),
        Line::from(""),
        Line::from("Shopping tab:"),
        Line::from(vec![Span::raw("  "), key("←/→"), Span::raw("         Switch list")]),
        Line::from(vec![Span::raw("  "), key("space"), Span::raw("       Toggle item")]),
        Line::from(vec![Span::raw("  "), key("n"), Span::raw("           New list")]),
        Line::from(vec![Span::raw("  "), key("d"), Span::raw("           Delete list")]),
        Line::from(""),
        Line::from("Cook mode:"),
        Line::from(vec![
            Span::raw("  "),
            key("→/space"),
            Span::raw("     Next step    "),
            key("←"),
            Span::raw("  Previous step"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            key("t"),
            Span::raw("           Start/pause timer    "),
            key("r"),
            Span::raw("  Reset timer"),
        ]),
        Line::from(vec![Span::raw("  "), key("1-9"), Span::raw("         Jump to step")]),
        Line::from(vec![Span::raw("  "), key("esc"), Span::raw("         Leave cook mode")]),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
