//! Plain-text renderer: draws whatever the session state says, never mutates it.

use std::fmt::Write as _;

use shared::{
    domain::{FormField, NavItem, Project, SubmitStatus, View},
    protocol::{ContactSnapshot, Notification, NotificationSeverity},
};
use site_core::{SiteContent, SubmitOutcome};

const SKILL_BAR_WIDTH: usize = 20;

pub fn render_nav(items: &[NavItem]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let labels: Vec<String> = items
        .iter()
        .map(|item| {
            if item.active {
                format!("[{}]", item.label)
            } else {
                item.label.clone()
            }
        })
        .collect();
    format!("CYBER_PORTFOLIO  {}  ONLINE\n", labels.join("  "))
}

pub fn render_view(view: View, content: &SiteContent, contact: &ContactSnapshot) -> String {
    match view {
        View::Landing => render_landing(content),
        View::About => render_about(content),
        View::Projects => render_project_list(&content.projects),
        View::Contact => render_contact(content, contact),
    }
}

fn render_landing(content: &SiteContent) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", content.hero.title);
    for line in &content.hero.taglines {
        let _ = writeln!(out, "  {line}");
    }
    let _ = writeln!(out, "  > {}", content.hero.enter_label);
    out
}

fn render_about(content: &SiteContent) -> String {
    let mut out = String::from("== ABOUT ==\n");
    for skill in &content.about.skills {
        let filled = (usize::from(skill.level) * SKILL_BAR_WIDTH / 100).min(SKILL_BAR_WIDTH);
        let _ = writeln!(
            out,
            "  {:<20} {}{} {:>3}%",
            skill.label,
            "#".repeat(filled),
            ".".repeat(SKILL_BAR_WIDTH - filled),
            skill.level
        );
    }
    if !content.about.certifications.is_empty() {
        out.push_str("  certifications:\n");
        for cert in &content.about.certifications {
            let _ = writeln!(out, "    - {cert}");
        }
    }
    out
}

pub fn render_project_list(projects: &[Project]) -> String {
    let mut out = String::from("== PROJECTS ==\n");
    if projects.is_empty() {
        out.push_str("  (no projects)\n");
    }
    for project in projects {
        let _ = writeln!(
            out,
            "  {:<14} {:<32} {:<16} {} {}",
            project.id.0, project.title, project.category, project.status, project.year
        );
    }
    out
}

pub fn render_project_detail(project: &Project) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", project.title);
    let _ = writeln!(
        out,
        "  {} | {} | {}",
        project.category, project.status, project.year
    );
    let _ = writeln!(out, "  {}", project.description);
    if !project.technologies.is_empty() {
        let _ = writeln!(out, "  stack: {}", project.technologies.join(", "));
    }
    for highlight in &project.highlights {
        let _ = writeln!(out, "  * {highlight}");
    }
    out
}

fn render_contact(content: &SiteContent, contact: &ContactSnapshot) -> String {
    let mut out = String::from("== CONTACT ==\n");
    for field in FormField::ALL {
        let _ = writeln!(
            out,
            "  {:<8} {}",
            field.as_str().to_ascii_uppercase(),
            contact.fields.get(field)
        );
        if let Some(message) = contact.errors.get(field) {
            let _ = writeln!(out, "           ! {message}");
        }
    }
    let _ = writeln!(out, "  [{}]", submit_label(contact.status));
    for info in &content.contact_info {
        let _ = writeln!(out, "  {}: {}", info.label, info.value);
    }
    for link in &content.social_links {
        let _ = writeln!(out, "  {} <{}>", link.label, link.url);
    }
    out
}

fn submit_label(status: SubmitStatus) -> &'static str {
    match status {
        SubmitStatus::Submitting => "TRANSMITTING...",
        _ => "SEND MESSAGE",
    }
}

pub fn render_outcome(outcome: &SubmitOutcome, contact: &ContactSnapshot) -> String {
    let mut out = String::new();
    match outcome {
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in errors.iter() {
                let _ = writeln!(out, "{field}: {message}");
            }
        }
        SubmitOutcome::Sent { submission_id } => {
            let _ = writeln!(out, "submission {submission_id} delivered");
        }
        SubmitOutcome::Failed { reason } => {
            let _ = writeln!(out, "delivery failed: {reason}");
        }
    }
    let _ = writeln!(out, "status: {}", status_label(contact.status));
    out
}

fn status_label(status: SubmitStatus) -> &'static str {
    match status {
        SubmitStatus::Idle => "idle",
        SubmitStatus::Submitting => "submitting",
        SubmitStatus::Succeeded => "succeeded",
        SubmitStatus::Failed => "failed",
    }
}

pub fn render_notification(notification: &Notification) -> String {
    let tag = match notification.severity {
        NotificationSeverity::Success => "ok",
        NotificationSeverity::Destructive => "error",
    };
    format!(
        "[{tag}] {}: {}",
        notification.title, notification.description
    )
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
