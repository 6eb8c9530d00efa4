use shared::{
    domain::{NavItem, Section, View},
    error::{SiteError, SiteException},
    protocol::{SiteEvent, ViewSnapshot},
};
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Tracks the landing gate and the active top-level section.
pub struct ViewController {
    entered: bool,
    active_section: Section,
    events: broadcast::Sender<SiteEvent>,
}

impl ViewController {
    pub fn new(events: broadcast::Sender<SiteEvent>) -> Self {
        Self {
            entered: false,
            active_section: Section::Home,
            events,
        }
    }

    pub fn entered(&self) -> bool {
        self.entered
    }

    pub fn active_section(&self) -> Section {
        self.active_section
    }

    /// Leaves the landing screen. Always lands on `About`, even when called
    /// again after entry.
    pub fn enter(&mut self) -> ViewSnapshot {
        let first_entry = !self.entered;
        self.entered = true;
        self.active_section = Section::About;
        info!(first_entry, "visitor entered site");
        self.publish()
    }

    /// `Home` after entry resolves to the landing view while `entered` stays
    /// true. No navigation control offers it, the state is kept as observed.
    pub fn select_section(&mut self, section: Section) -> ViewSnapshot {
        self.active_section = section;
        info!(
            section = section.as_str(),
            entered = self.entered,
            "section selected"
        );
        self.publish()
    }

    pub fn select_section_id(&mut self, id: &str) -> Result<ViewSnapshot, SiteException> {
        match id.parse::<Section>() {
            Ok(section) => Ok(self.select_section(section)),
            Err(err) => {
                warn!(id, "rejected unknown section id");
                let _ = self.events.send(SiteEvent::Error(SiteError::from(err.clone())));
                Err(err)
            }
        }
    }

    pub fn resolve_view(&self) -> View {
        if !self.entered {
            return View::Landing;
        }
        match self.active_section {
            Section::Home => View::Landing,
            Section::About => View::About,
            Section::Projects => View::Projects,
            Section::Contact => View::Contact,
        }
    }

    /// Navigation bar entries; empty while the landing gate is closed.
    pub fn nav_items(&self) -> Vec<NavItem> {
        if !self.entered {
            return Vec::new();
        }
        Section::ALL
            .into_iter()
            .map(|section| NavItem {
                section,
                label: section.nav_label().to_string(),
                active: section == self.active_section,
            })
            .collect()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            entered: self.entered,
            active_section: self.active_section,
            view: self.resolve_view(),
        }
    }

    fn publish(&self) -> ViewSnapshot {
        let snapshot = self.snapshot();
        let _ = self.events.send(SiteEvent::ViewChanged { snapshot });
        snapshot
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
