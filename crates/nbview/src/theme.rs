use ratatui::style::Modifier;
use ratatui::style::Style;

/// Styles used by the terminal surface, keyed by node role.
#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub header_code: Style,
    pub header_markdown: Style,
    pub code: Style,
    pub output_label: Style,
    pub stderr: Style,
    pub media: Style,
    pub danger: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            header_code: Style::default().blue().add_modifier(Modifier::BOLD),
            header_markdown: Style::default().magenta().add_modifier(Modifier::BOLD),
            code: Style::default().cyan(),
            output_label: Style::default().dark_gray().add_modifier(Modifier::ITALIC),
            stderr: Style::default().yellow(),
            media: Style::default().green(),
            danger: Style::default().red(),
        }
    }
}
