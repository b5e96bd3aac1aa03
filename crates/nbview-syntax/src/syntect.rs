use nbview_core::text::CapabilityError;
use nbview_core::text::CodeHighlighter;
use syntect::easy::HighlightLines;
use syntect::highlighting::Theme;
use syntect::highlighting::ThemeSet;
use syntect::html::IncludeBackground;
use syntect::html::styled_line_to_highlighted_html;
use syntect::parsing::SyntaxReference;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

const DEFAULT_THEME: &str = "InspiredGitHub";

/// Highlights code into inline-styled HTML `<span>`s (no surrounding `<pre>`).
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self::with_theme(DEFAULT_THEME)
    }

    /// Uses one of syntect's bundled themes, falling back to any bundled theme if `name` is
    /// unknown.
    pub fn with_theme(name: &str) -> Self {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let theme_set = ThemeSet::load_defaults();
        let theme = theme_set
            .themes
            .get(name)
            .cloned()
            .or_else(|| {
                tracing::warn!(theme = name, "unknown syntect theme; using a bundled default");
                theme_set.themes.values().next().cloned()
            })
            .unwrap_or_default();
        Self { syntax_set, theme }
    }

    fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        let lang = language.trim().to_ascii_lowercase();
        if lang.is_empty() {
            return None;
        }
        self.syntax_set
            .find_syntax_by_extension(&lang)
            .or_else(|| self.syntax_set.find_syntax_by_token(&lang))
    }

    fn syntax_for(&self, language: &str) -> &SyntaxReference {
        self.find_syntax(language)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeHighlighter for SyntectHighlighter {
    fn highlight(&self, language: &str, code: &str) -> Result<String, CapabilityError> {
        let syntax = self.syntax_for(language);
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        let mut out = String::with_capacity(code.len() * 4);
        for line in LinesWithEndings::from(code) {
            let regions = highlighter
                .highlight_line(line, &self.syntax_set)
                .map_err(|e| CapabilityError::backend("syntect", e.to_string()))?;
            let html = styled_line_to_highlighted_html(&regions[..], IncludeBackground::No)
                .map_err(|e| CapabilityError::backend("syntect", e.to_string()))?;
            out.push_str(&html);
        }
        Ok(out)
    }

    fn supports_language(&self, language: &str) -> bool {
        self.find_syntax(language).is_some()
    }
}
