use std::{
    env, fs,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use shared::{
    domain::{FormField, ProjectId, Section, SubmitStatus, View},
    protocol::{NotificationSeverity, SiteEvent},
};
use site_core::{
    content::parse_projects, PortfolioSession, SessionOptions, SiteContent, SubmitOutcome,
};

#[tokio::test(start_paused = true)]
async fn visitor_enters_browses_and_sends_message_acceptance() {
    let mut session = PortfolioSession::new(SessionOptions::default(), SiteContent::builtin());
    let mut events = session.subscribe_events();

    assert_eq!(session.view.resolve_view(), View::Landing);
    assert_eq!(session.view.enter().view, View::About);

    session.view.select_section(Section::Projects);
    session
        .gallery
        .select(&ProjectId::new("audit-bank"))
        .expect("project exists");
    session.gallery.close();

    assert_eq!(
        session.view.select_section(Section::Contact).view,
        View::Contact
    );

    let first = session.contact.submit().await.expect("not in flight");
    match first {
        SubmitOutcome::Invalid(errors) => assert_eq!(errors.len(), 4),
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert_eq!(session.contact.status().await, SubmitStatus::Idle);

    session.contact.set_field(FormField::Name, "Alice").await;
    session
        .contact
        .set_field(FormField::Email, "alice@example.com")
        .await;
    session.contact.set_field(FormField::Subject, "Hi").await;
    let snapshot = session.contact.set_field(FormField::Message, "Hello").await;
    assert!(snapshot.errors.is_empty());

    let second = session.contact.submit().await.expect("not in flight");
    assert!(matches!(second, SubmitOutcome::Sent { .. }));

    let snapshot = session.contact.snapshot().await;
    assert_eq!(snapshot.status, SubmitStatus::Succeeded);
    assert!(snapshot.fields.is_empty());

    let mut notifications = Vec::new();
    let mut saw_submitting = false;
    while let Ok(event) = events.try_recv() {
        match event {
            SiteEvent::Notification(notification) => notifications.push(notification.severity),
            SiteEvent::ContactChanged { snapshot } if snapshot.status == SubmitStatus::Submitting => {
                saw_submitting = true;
            }
            _ => {}
        }
    }
    assert!(saw_submitting);
    assert_eq!(
        notifications,
        [NotificationSeverity::Destructive, NotificationSeverity::Success]
    );
}

#[tokio::test]
async fn home_selection_after_entry_acceptance() {
    let mut session = PortfolioSession::new(
        SessionOptions {
            submit_delay: Duration::ZERO,
            ..SessionOptions::default()
        },
        SiteContent::builtin(),
    );
    session.view.enter();
    let snapshot = session.view.select_section(Section::Home);
    assert!(snapshot.entered);
    assert_eq!(snapshot.view, View::Landing);
    assert_eq!(session.view.nav_items().len(), 4);
}

#[test]
fn projects_file_replaces_builtin_projects() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("portfolio_projects_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("projects.json");
    fs::write(
        &path,
        r#"[{"id":"chain","title":"Ledger Audit","category":"BLOCKCHAIN",
            "description":"Smart contract review","status":"PILOT","year":"2025"}]"#,
    )
    .expect("write projects");

    let content = SiteContent::builtin()
        .with_projects_file(&path)
        .expect("load projects");
    assert_eq!(content.projects.len(), 1);
    assert_eq!(content.projects[0].id, ProjectId::new("chain"));
    assert!(content.projects[0].technologies.is_empty());

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn malformed_or_duplicate_projects_are_rejected() {
    assert!(parse_projects("{not json").is_err());

    let duplicate = r#"[
        {"id":"a","title":"A","category":"C","description":"d","status":"BETA","year":"2024"},
        {"id":"a","title":"B","category":"C","description":"d","status":"BETA","year":"2024"}
    ]"#;
    let err = parse_projects(duplicate).expect_err("duplicate id");
    assert!(err.to_string().contains("duplicate project id"));
}

#[test]
fn missing_projects_file_reports_path() {
    let err = SiteContent::builtin()
        .with_projects_file(std::path::Path::new("/nonexistent/projects.json"))
        .expect_err("missing file");
    assert!(format!("{err:#}").contains("/nonexistent/projects.json"));
}
