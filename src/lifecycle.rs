//! Page lifecycle wiring for a single timer
//!
//! A [`TimerPage`] starts its timer when mounted and stops it when unmounted
//! (or dropped), so the polling task never outlives the page.

use tokio::sync::watch;
use tracing::{debug, info};

use crate::state::{TimerController, TimerDisplay, TimerId};

#[derive(Debug)]
pub struct TimerPage {
    controller: TimerController,
    id: TimerId,
    display_rx: Option<watch::Receiver<TimerDisplay>>,
}

impl TimerPage {
    pub fn new(controller: TimerController, id: TimerId) -> Self {
        Self {
            controller,
            id,
            display_rx: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.display_rx.is_some()
    }

    /// Start the page's timer. Returns `false` if the timer was never registered.
    pub fn mount(&mut self) -> bool {
        self.display_rx = self.controller.start(self.id);
        match &self.display_rx {
            Some(_) => {
                info!("Page mounted with timer {}", self.id);
                true
            }
            None => {
                debug!("Page mounted but timer {} is not registered", self.id);
                false
            }
        }
    }

    /// Latest display delivered to the page
    pub fn display(&self) -> Option<TimerDisplay> {
        self.display_rx.as_ref().map(|rx| rx.borrow().clone())
    }

    /// Stop the page's timer and report the ended flag. No-op when not mounted.
    pub fn unmount(&mut self) -> bool {
        if self.display_rx.take().is_none() {
            return false;
        }
        let ended = *self.controller.stop(self.id).borrow();
        info!("Page unmounted, timer {} ended={}", self.id, ended);
        ended
    }
}

impl Drop for TimerPage {
    fn drop(&mut self) {
        self.unmount();
    }
}
