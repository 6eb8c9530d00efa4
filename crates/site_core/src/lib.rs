use std::{sync::Arc, time::Duration};

use shared::protocol::SiteEvent;
use tokio::sync::broadcast;

pub mod contact_form;
pub mod content;
pub mod gallery;
pub mod transport;
pub mod view;

pub use contact_form::{validate, ContactForm, SubmitError, SubmitOutcome};
pub use content::SiteContent;
pub use gallery::ProjectGallery;
pub use transport::{ContactTransport, SimulatedTransport, DEFAULT_SUBMIT_DELAY};
pub use view::ViewController;

const DEFAULT_EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub submit_delay: Duration,
    pub submit_timeout: Option<Duration>,
    pub simulate_failure: bool,
    pub event_capacity: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            submit_delay: DEFAULT_SUBMIT_DELAY,
            submit_timeout: None,
            simulate_failure: false,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// One visitor's page: owns the view, the contact form and the gallery, and
/// fans their changes out to subscribers.
pub struct PortfolioSession {
    pub view: ViewController,
    pub contact: Arc<ContactForm>,
    pub gallery: ProjectGallery,
    content: SiteContent,
    events: broadcast::Sender<SiteEvent>,
}

impl PortfolioSession {
    pub fn new(options: SessionOptions, content: SiteContent) -> Self {
        let transport: Arc<dyn ContactTransport> = if options.simulate_failure {
            Arc::new(SimulatedTransport::failing(options.submit_delay))
        } else {
            Arc::new(SimulatedTransport::new(options.submit_delay))
        };
        Self::new_with_transport(options, content, transport)
    }

    pub fn new_with_transport(
        options: SessionOptions,
        content: SiteContent,
        transport: Arc<dyn ContactTransport>,
    ) -> Self {
        let (events, _) = broadcast::channel(options.event_capacity.max(1));
        Self {
            view: ViewController::new(events.clone()),
            contact: ContactForm::new(transport, options.submit_timeout, events.clone()),
            gallery: ProjectGallery::new(content.projects.clone(), events.clone()),
            content,
            events,
        }
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SiteEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
