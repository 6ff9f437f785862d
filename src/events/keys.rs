//! Key hints per screen.

/// The screen whose key bindings are currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Home,
    Submit,
    List,
    Stats,
    Help,
}

impl KeyContext {
    /// Section heading used on the help screen.
    pub fn display(&self) -> &'static str {
        match self {
            KeyContext::Home => "Global",
            KeyContext::Submit => "Submit Feedback",
            KeyContext::List => "View Feedback",
            KeyContext::Stats => "Feedback Stats",
            KeyContext::Help => "Help",
        }
    }
}

/// A single key binding shown on the help screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keybinding {
    pub key: &'static str,
    pub description: &'static str,
}

const fn bind(key: &'static str, description: &'static str) -> Keybinding {
    Keybinding { key, description }
}

const GLOBAL_BINDINGS: &[Keybinding] = &[
    bind("s", "Submit feedback"),
    bind("l", "View all feedback"),
    bind("t", "Feedback statistics"),
    bind("h", "Home"),
    bind("?", "Show this help"),
    bind("q", "Quit (outside text fields)"),
    bind("Ctrl+C", "Quit from anywhere"),
];

const SUBMIT_BINDINGS: &[Keybinding] = &[
    bind("Tab", "Next field"),
    bind("Shift+Tab", "Previous field"),
    bind("Space", "Toggle anonymous"),
    bind("←/→", "Change course, faculty or rating"),
    bind("1-5", "Set rating"),
    bind("Enter", "Next field, or submit on the button"),
    bind("Ctrl+S", "Submit from any field"),
    bind("Esc", "Back to home (form is kept)"),
];

const LIST_BINDINGS: &[Keybinding] = &[
    bind("j / ↓", "Scroll down"),
    bind("k / ↑", "Scroll up"),
    bind("g", "Scroll to top"),
    bind("r", "Reload"),
];

const STATS_BINDINGS: &[Keybinding] = &[bind("r", "Reload")];

const HELP_BINDINGS: &[Keybinding] = &[
    bind("j / k", "Scroll"),
    bind("Esc / q / ?", "Close help"),
];

/// Every key binding, grouped by the screen it applies to.
pub fn get_keybindings_grouped() -> Vec<(KeyContext, &'static [Keybinding])> {
    vec![
        (KeyContext::Home, GLOBAL_BINDINGS),
        (KeyContext::Submit, SUBMIT_BINDINGS),
        (KeyContext::List, LIST_BINDINGS),
        (KeyContext::Stats, STATS_BINDINGS),
        (KeyContext::Help, HELP_BINDINGS),
    ]
}

/// The one-line key hint shown in the footer for a context.
///
/// Keys are wrapped in brackets so the help bar can style them.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Home => "[s] submit  [l] list  [t] stats  [?] help  [q] quit",
        KeyContext::Submit => {
            "[Tab] next field  [Space] anonymous  [←/→] choose  [1-5] rating  [Ctrl+S] submit  [Esc] back"
        }
        KeyContext::List => "[j/k] scroll  [r] reload  [s] submit  [t] stats  [h] home  [q] quit",
        KeyContext::Stats => "[r] reload  [s] submit  [l] list  [h] home  [q] quit",
        KeyContext::Help => "[Esc/q] close help",
    }
}
