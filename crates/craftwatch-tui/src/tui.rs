//! Terminal ownership: entered on construction, restored on drop.

use color_eyre::eyre::Result;
use ratatui::{DefaultTerminal, Frame};
use tracing::debug;

pub struct Tui {
    terminal: DefaultTerminal,
}

impl Tui {
    /// Raw mode plus alternate screen. ratatui chains a panic hook that
    /// restores the terminal before the previous hook prints.
    pub fn enter() -> Result<Self> {
        let terminal = ratatui::try_init()?;
        let size = terminal.size()?;
        debug!(width = size.width, height = size.height, "terminal ready");
        Ok(Self { terminal })
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Error reports without the env section. Must run before [`Tui::enter`]
/// so the terminal's panic hook wraps this one.
pub fn install_hooks() -> Result<()> {
    color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .install()?;
    Ok(())
}
