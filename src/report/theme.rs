//! Visual theme and styling.

use console::Style;

/// Styles used by the reporter.
#[derive(Debug, Clone)]
pub struct ReportTheme {
    /// Style for check titles (bold).
    pub title: Style,
    /// Style for update lines (bright green).
    pub info: Style,
    /// Style for check errors (bright red).
    pub error: Style,
    /// Style for table headers (unstyled).
    pub header: Style,
    /// Whether output may contain ANSI codes at all.
    pub colors: bool,
}

impl Default for ReportTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            title: Style::new().bold().force_styling(true),
            info: Style::new().green().bright().force_styling(true),
            error: Style::new().red().bright().force_styling(true),
            header: Style::new(),
            colors: true,
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            title: Style::new(),
            info: Style::new(),
            error: Style::new(),
            header: Style::new(),
            colors: false,
        }
    }

    /// Pick the theme for the current terminal.
    pub fn detect(no_color: bool) -> Self {
        if !no_color && should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Prepare check output for display.
    ///
    /// `ESC[0G` (cursor to column 0) breaks indentation and is always
    /// removed; every other escape is removed only without colors.
    pub fn clean(&self, text: &str) -> String {
        let text = text.replace("\x1b[0G", "");
        if self.colors {
            text
        } else {
            console::strip_ansi_codes(&text).into_owned()
        }
    }

    /// Style text, leaving lines that carry their own colors alone.
    fn styled(&self, style: &Style, text: &str) -> String {
        let text = self.clean(text);
        if !self.colors || text.contains('\x1b') {
            text
        } else {
            style.apply_to(text).to_string()
        }
    }

    /// Format a check title.
    pub fn format_title(&self, msg: &str) -> String {
        self.styled(&self.title, msg)
    }

    /// Format an update line.
    pub fn format_info(&self, msg: &str) -> String {
        self.styled(&self.info, msg)
    }

    /// Format an error line.
    pub fn format_error(&self, msg: &str) -> String {
        self.styled(&self.error, msg)
    }

    /// Format a table header.
    pub fn format_header(&self, msg: &str) -> String {
        self.styled(&self.header, msg)
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
