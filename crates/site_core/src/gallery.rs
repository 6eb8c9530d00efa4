use shared::{
    domain::{Project, ProjectId},
    error::{ErrorCode, SiteError, SiteException},
    protocol::SiteEvent,
};
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Project list plus the project whose detail panel is open.
pub struct ProjectGallery {
    projects: Vec<Project>,
    selected: Option<ProjectId>,
    events: broadcast::Sender<SiteEvent>,
}

impl ProjectGallery {
    pub fn new(projects: Vec<Project>, events: broadcast::Sender<SiteEvent>) -> Self {
        Self {
            projects,
            selected: None,
            events,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| &project.id == id)
    }

    pub fn selected(&self) -> Option<&Project> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn select(&mut self, id: &ProjectId) -> Result<&Project, SiteException> {
        let Some(index) = self.projects.iter().position(|project| &project.id == id) else {
            warn!(project_id = %id, "rejected unknown project id");
            let err = SiteException::new(ErrorCode::NotFound, format!("unknown project '{id}'"));
            let _ = self.events.send(SiteEvent::Error(SiteError::from(err.clone())));
            return Err(err);
        };

        self.selected = Some(id.clone());
        info!(project_id = %id, "project detail opened");
        let _ = self.events.send(SiteEvent::ProjectSelected {
            project_id: Some(id.clone()),
        });
        Ok(&self.projects[index])
    }

    pub fn close(&mut self) {
        if self.selected.take().is_some() {
            info!("project detail closed");
            let _ = self
                .events
                .send(SiteEvent::ProjectSelected { project_id: None });
        }
    }
}

#[cfg(test)]
#[path = "tests/gallery_tests.rs"]
mod tests;
