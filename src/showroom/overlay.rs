//! Which portfolio entry is on screen.

use crate::content::{portfolio_entry, PortfolioEntry};

/// Binds the open drawer's identity to its entry. An identity without an
/// entry simply shows nothing.
#[derive(Debug, Clone, Default)]
pub struct OverlayPresenter {
    identity: Option<String>,
    entry: Option<&'static PortfolioEntry>,
}

impl OverlayPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, identity: &str) {
        self.entry = portfolio_entry(identity);
        if self.entry.is_none() {
            log::warn!("No portfolio entry for '{identity}'");
        }
        self.identity = Some(identity.to_string());
    }

    pub fn hide(&mut self) {
        self.identity = None;
        self.entry = None;
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn entry(&self) -> Option<&'static PortfolioEntry> {
        self.entry
    }

    pub fn is_visible(&self) -> bool {
        self.entry.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_and_hides() {
        let mut overlay = OverlayPresenter::new();
        overlay.show("drawer2");
        assert!(overlay.is_visible());
        assert_eq!(overlay.entry().map(|entry| entry.title), Some("Technical Skills"));
        assert_eq!(overlay.identity(), Some("drawer2"));

        overlay.hide();
        assert!(!overlay.is_visible());
        assert_eq!(overlay.identity(), None);
    }

    #[test]
    fn unknown_identity_stays_hidden() {
        let mut overlay = OverlayPresenter::new();
        overlay.show("drawer1");
        overlay.show("attic");
        assert!(!overlay.is_visible());
        assert_eq!(overlay.identity(), Some("attic"));
    }
}
