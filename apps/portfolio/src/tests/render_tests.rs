use super::*;
use shared::{domain::Section, protocol::FieldErrors};

fn empty_contact() -> ContactSnapshot {
    ContactSnapshot {
        fields: Default::default(),
        errors: FieldErrors::new(),
        status: SubmitStatus::Idle,
    }
}

#[test]
fn hidden_nav_renders_nothing() {
    assert_eq!(render_nav(&[]), "");
}

#[test]
fn nav_brackets_active_section() {
    let items: Vec<NavItem> = Section::ALL
        .into_iter()
        .map(|section| NavItem {
            section,
            label: section.nav_label().to_string(),
            active: section == Section::About,
        })
        .collect();
    let line = render_nav(&items);
    assert!(line.contains("[ABOUT]"));
    assert!(line.contains(" HOME "));
    assert!(!line.contains("[HOME]"));
}

#[test]
fn landing_shows_enter_prompt() {
    let content = SiteContent::builtin();
    let text = render_view(View::Landing, &content, &empty_contact());
    assert!(text.contains("ACCESS THE SYSTEM"));
}

#[test]
fn contact_view_annotates_field_errors() {
    let content = SiteContent::builtin();
    let mut contact = empty_contact();
    contact.errors.insert(FormField::Email, "invalid email");
    contact.fields.email = "nope".into();
    let text = render_view(View::Contact, &content, &contact);
    assert!(text.contains("EMAIL    nope"));
    assert!(text.contains("! invalid email"));
    assert!(text.contains("[SEND MESSAGE]"));
}

#[test]
fn submitting_contact_shows_transmitting_label() {
    let content = SiteContent::builtin();
    let mut contact = empty_contact();
    contact.status = SubmitStatus::Submitting;
    let text = render_view(View::Contact, &content, &contact);
    assert!(text.contains("[TRANSMITTING...]"));
}

#[test]
fn about_renders_skill_bars() {
    let content = SiteContent::builtin();
    let text = render_view(View::About, &content, &empty_contact());
    assert!(text.contains("Network Security"));
    assert!(text.contains(" 95%"));
}

#[test]
fn invalid_outcome_lists_each_error() {
    let mut errors = FieldErrors::new();
    errors.insert(FormField::Name, "name required");
    errors.insert(FormField::Message, "message required");
    let text = render_outcome(&SubmitOutcome::Invalid(errors), &empty_contact());
    assert_eq!(
        text,
        "name: name required\nmessage: message required\nstatus: idle\n"
    );
}

#[test]
fn notification_is_tagged_by_severity() {
    let text = render_notification(&Notification::destructive("Send failed", "retry"));
    assert_eq!(text, "[error] Send failed: retry");
}

#[test]
fn project_detail_lists_highlights() {
    let content = SiteContent::builtin();
    let text = render_project_detail(&content.projects[0]);
    assert!(text.contains("Banking Security Audit"));
    assert!(text.contains("* 12 critical findings remediated"));
}
