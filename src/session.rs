//! A sheet layout and its viewport, driven by navigation commands.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::layout::{SheetLayout, Viewport, Windows};
use crate::navigation::Navigation;

/// Scripted run: a layout, a starting viewport and commands to apply.
///
/// ```json
/// {
///   "layout": { "frozenRows": 1, "hiddenColumns": ["C"] },
///   "viewport": { "rectangle": { "home": "A1", "width": 800, "height": 600 } },
///   "commands": ["select-cell B2", "right-column", "extend-down-row"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub layout: SheetLayout,
    pub viewport: Viewport,
    pub commands: Vec<Navigation>,
}

/// Apply every command of `script` in order.
///
/// # Errors
/// Returns the first command's error.
pub fn run_script(script: &Script) -> Result<Viewport> {
    let mut session = NavigationSession::new(script.layout.clone(), script.viewport.clone());
    for command in &script.commands {
        session.navigate(command)?;
    }
    Ok(session.into_viewport())
}

/// Owns the layout and the current viewport state.
#[derive(Debug, Clone, Default)]
pub struct NavigationSession {
    layout: SheetLayout,
    viewport: Viewport,
}

impl NavigationSession {
    pub fn new(layout: SheetLayout, viewport: Viewport) -> Self {
        Self { layout, viewport }
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    /// Layout edits take effect on the next command.
    pub fn layout_mut(&mut self) -> &mut SheetLayout {
        &mut self.layout
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn into_viewport(self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = self.viewport.resize(width, height);
    }

    /// Apply one command. On error the viewport is left unchanged.
    ///
    /// # Errors
    /// See [`Viewport::apply`].
    pub fn navigate(&mut self, navigation: &Navigation) -> Result<&Viewport> {
        self.viewport = self.viewport.apply(navigation, &self.layout)?;
        Ok(&self.viewport)
    }

    /// Parse and apply a command in its text form.
    ///
    /// # Errors
    /// Returns [`crate::XlnavError::InvalidNavigation`] for unknown text.
    pub fn navigate_text(&mut self, text: &str) -> Result<&Viewport> {
        let navigation: Navigation = text.parse()?;
        self.navigate(&navigation)
    }

    /// Apply the command bound to a keyboard key. Page keys move by the
    /// viewport height. Returns `false` for unbound keys.
    ///
    /// # Errors
    /// See [`Viewport::apply`].
    pub fn key_down(&mut self, key: &str, shift: bool) -> Result<bool> {
        let page = self.viewport.rectangle().height();
        let Some(navigation) = Navigation::from_key(key, shift, page) else {
            debug!(key, "unbound key");
            return Ok(false);
        };
        self.navigate(&navigation)?;
        Ok(true)
    }

    /// Queue a command instead of applying it.
    pub fn push(&mut self, navigation: Navigation) {
        self.viewport.push_navigation(navigation);
    }

    /// Apply everything queued with [`NavigationSession::push`].
    ///
    /// # Errors
    /// See [`Viewport::apply_pending`].
    pub fn flush(&mut self) -> Result<&Viewport> {
        self.viewport = self.viewport.apply_pending(&self.layout)?;
        Ok(&self.viewport)
    }

    pub fn windows(&self) -> Windows {
        self.viewport.windows(&self.layout)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_run_script() {
        let script: Script = serde_json::from_str(
            r#"{
                "layout": {"hiddenColumns": ["C"]},
                "viewport": {"rectangle": {"home": "A1", "width": 640, "height": 200}},
                "commands": ["select-cell B2", "right-column", "extend-down-row"]
            }"#,
        )
        .unwrap();
        let viewport = run_script(&script).unwrap();
        assert_eq!(
            viewport.anchored_selection().unwrap().to_string(),
            "D2:D3 top-left"
        );
    }

    #[test]
    fn test_failed_command_keeps_state() {
        let mut session = NavigationSession::default();
        session.navigate_text("select-cell B2").unwrap();
        assert!(session.navigate_text("up-pixel -1").is_err());
        assert!(session.navigate_text("nowhere").is_err());
        assert_eq!(
            session.viewport().anchored_selection().unwrap().to_string(),
            "B2"
        );
    }

    #[test]
    fn test_key_down() {
        let mut session = NavigationSession::default();
        session.navigate_text("select-cell B2").unwrap();
        assert!(session.key_down("ArrowDown", true).unwrap());
        assert!(!session.key_down("Tab", false).unwrap());
        assert_eq!(
            session.viewport().anchored_selection().unwrap().to_string(),
            "B2:B3 top-left"
        );
    }

    #[test]
    fn test_push_and_flush() {
        let mut session = NavigationSession::default();
        session.push(Navigation::DownRow);
        session.push("select-row 5".parse().unwrap());
        session.push(Navigation::DownRow);
        let viewport = session.flush().unwrap();
        assert_eq!(viewport.anchored_selection().unwrap().to_string(), "6");
        assert!(viewport.navigations().is_empty());
    }
}
