//! The app loop's only input: terminal events, a frame clock and dashboard
//! view changes, awaited together in one `select!`.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::watch;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, warn};

use craftwatch_core::DashboardView;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    /// Frame clock; drives the throbber and the countdown.
    Frame,
    /// The refresh loop published a new view.
    View(Arc<DashboardView>),
}

pub struct Events {
    input: EventStream,
    frames: Interval,
    views: watch::Receiver<Arc<DashboardView>>,
    /// Cleared once the refresh loop drops its sender.
    views_open: bool,
}

impl Events {
    pub fn new(frame_rate: Duration, views: watch::Receiver<Arc<DashboardView>>) -> Self {
        let mut frames = tokio::time::interval(frame_rate);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            input: EventStream::new(),
            frames,
            views,
            views_open: true,
        }
    }

    /// Latest published view, marked as seen.
    pub fn current_view(&mut self) -> Arc<DashboardView> {
        Arc::clone(&self.views.borrow_and_update())
    }

    /// `None` once terminal input has ended.
    pub async fn next(&mut self) -> Option<Event> {
        loop {
            tokio::select! {
                changed = self.views.changed(), if self.views_open => {
                    if changed.is_ok() {
                        return Some(Event::View(self.current_view()));
                    }
                    debug!("refresh loop closed its view channel");
                    self.views_open = false;
                }

                input = self.input.next() => match input {
                    Some(Ok(raw)) => {
                        if let Some(event) = translate(raw) {
                            return Some(event);
                        }
                    }
                    Some(Err(e)) => warn!(error = %e, "terminal input error"),
                    None => return None,
                },

                _ = self.frames.tick() => return Some(Event::Frame),
            }
        }
    }
}

/// Key presses and resizes; everything else (releases, mouse, focus,
/// paste) is dropped.
fn translate(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(kind: KeyEventKind) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent {
            code: KeyCode::Char('r'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn presses_and_resizes_pass_through() {
        assert!(matches!(
            translate(key(KeyEventKind::Press)),
            Some(Event::Key(k)) if k.code == KeyCode::Char('r')
        ));
        assert!(matches!(
            translate(CrosstermEvent::Resize(120, 40)),
            Some(Event::Resize(120, 40))
        ));
    }

    #[test]
    fn releases_and_focus_changes_are_dropped() {
        assert!(translate(key(KeyEventKind::Release)).is_none());
        assert!(translate(key(KeyEventKind::Repeat)).is_none());
        assert!(translate(CrosstermEvent::FocusGained).is_none());
    }
}
