/// Render-pass configuration.
///
/// Cheap to clone; keep one per surface and reuse it across notebooks.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Language passed to the highlighter when the notebook metadata has no hint.
    pub default_language: String,
    /// Sub-header text above a code cell's outputs.
    pub outputs_label: String,
    /// Placeholder message for notebooks without cells.
    pub empty_message: String,
    /// Code cells longer than this many lines are not highlighted.
    pub max_highlight_lines: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            default_language: "python".to_string(),
            outputs_label: "Output".to_string(),
            empty_message: "No cells found".to_string(),
            max_highlight_lines: 5_000,
        }
    }
}
