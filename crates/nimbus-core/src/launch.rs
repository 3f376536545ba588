//! Launch sequence state machine (loading -> onboarding or main).
//!
//! Every screen has at most one outgoing edge. Driven by the splash timer and
//! the onboarding unlock gesture; there is no error or retry path.

use std::time::Duration;

use crate::settings::OnboardingStore;

/// Top-level screen shown by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchScreen {
    #[default]
    Loading,
    Onboarding,
    Main,
}

/// Inputs that can move the launch sequence forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchEvent {
    SplashElapsed,
    UnlockCompleted,
}

impl LaunchScreen {
    /// Screen after `event`, or `None` if the event is not valid here.
    pub fn next(self, event: LaunchEvent, onboarding_completed: bool) -> Option<Self> {
        match (self, event) {
            (LaunchScreen::Loading, LaunchEvent::SplashElapsed) if onboarding_completed => {
                Some(LaunchScreen::Main)
            }
            (LaunchScreen::Loading, LaunchEvent::SplashElapsed) => Some(LaunchScreen::Onboarding),
            (LaunchScreen::Onboarding, LaunchEvent::UnlockCompleted) => Some(LaunchScreen::Main),
            _ => None,
        }
    }
}

/// Drives [`LaunchScreen`] and persists the onboarding flag on unlock.
#[derive(Debug)]
pub struct LaunchFlow {
    screen: LaunchScreen,
    store: OnboardingStore,
}

impl LaunchFlow {
    pub fn new(store: OnboardingStore) -> Self {
        Self {
            screen: LaunchScreen::default(),
            store,
        }
    }

    pub fn screen(&self) -> LaunchScreen {
        self.screen
    }

    pub fn onboarding_completed(&self) -> bool {
        self.store.has_completed_onboarding()
    }

    /// Apply `event` and return the resulting screen.
    ///
    /// Events that are not valid for the current screen are ignored. A failed
    /// write of the onboarding flag is logged; the app still moves on to the
    /// main screen and onboarding simply shows again next launch.
    pub fn handle(&mut self, event: LaunchEvent) -> LaunchScreen {
        let Some(next) = self.screen.next(event, self.store.has_completed_onboarding()) else {
            tracing::debug!("Ignoring {:?} on {:?} screen", event, self.screen);
            return self.screen;
        };

        if event == LaunchEvent::UnlockCompleted {
            if let Err(e) = self.store.mark_completed() {
                tracing::error!("Failed to persist onboarding flag: {}", e);
            }
        }

        tracing::info!("Launch screen {:?} -> {:?}", self.screen, next);
        self.screen = next;
        next
    }

    /// Wait out the splash delay, then leave the loading screen.
    pub async fn run_splash(&mut self, delay: Duration) -> LaunchScreen {
        tokio::time::sleep(delay).await;
        self.handle(LaunchEvent::SplashElapsed)
    }
}
