use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shared::{
    domain::{FormField, ProjectId},
    protocol::{SiteEvent, ViewSnapshot},
};
use site_core::{PortfolioSession, SiteContent};
use tokio::task::JoinHandle;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{load_settings, Settings};

#[derive(Parser, Debug)]
#[command(name = "portfolio", about = "Drive the portfolio site core from a terminal")]
struct Args {
    /// TOML settings file (defaults to ./portfolio.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print snapshots as JSON instead of rendered text.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enter the site and render each visited section.
    Tour {
        #[arg(long = "section", default_values = ["about", "projects", "contact"])]
        sections: Vec<String>,
    },
    /// Fill the contact form and submit it.
    Contact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    /// List projects or open one project's detail panel.
    Projects {
        #[arg(long)]
        open: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(args.config.as_deref())?;
    init_tracing(&settings);

    let mut content = SiteContent::builtin();
    if let Some(path) = &settings.projects_path {
        content = content.with_projects_file(path)?;
    }

    let mut session = PortfolioSession::new(settings.session_options(), content);
    let printer = spawn_notification_printer(&session, args.json);

    let result = match args.command {
        Command::Tour { sections } => run_tour(&mut session, &sections, args.json).await,
        Command::Contact {
            name,
            email,
            subject,
            message,
        } => run_contact(&session, [name, email, subject, message], args.json).await,
        Command::Projects { open } => run_projects(&mut session, open, args.json),
    };

    // closing the session ends the event stream so the printer can drain and exit
    drop(session);
    if let Err(err) = printer.await {
        tracing::warn!(error = %err, "notification printer task failed");
    }
    result
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn spawn_notification_printer(session: &PortfolioSession, json: bool) -> JoinHandle<()> {
    let mut stream = BroadcastStream::new(session.subscribe_events());
    tokio::spawn(async move {
        while let Some(event) = stream.next().await {
            match event {
                Ok(SiteEvent::Notification(notification)) => {
                    if json {
                        match serde_json::to_string(&notification) {
                            Ok(line) => println!("{line}"),
                            Err(err) => {
                                tracing::warn!(error = %err, "failed to encode notification")
                            }
                        }
                    } else {
                        println!("{}", render::render_notification(&notification));
                    }
                }
                Ok(SiteEvent::Error(error)) => {
                    tracing::debug!(
                        code = ?error.code,
                        message = %error.message,
                        "site error event"
                    );
                }
                Ok(_) => {}
                Err(err) => tracing::warn!(error = %err, "notification stream lagged"),
            }
        }
    })
}

async fn run_tour(session: &mut PortfolioSession, sections: &[String], json: bool) -> Result<()> {
    print_view(session, &session.view.snapshot(), json).await?;

    let entered = session.view.enter();
    print_view(session, &entered, json).await?;

    for id in sections {
        let snapshot = session.view.select_section_id(id)?;
        print_view(session, &snapshot, json).await?;
    }
    Ok(())
}

async fn print_view(
    session: &PortfolioSession,
    snapshot: &ViewSnapshot,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        return Ok(());
    }
    let contact = session.contact.snapshot().await;
    print!("{}", render::render_nav(&session.view.nav_items()));
    print!(
        "{}",
        render::render_view(snapshot.view, session.content(), &contact)
    );
    println!();
    Ok(())
}

async fn run_contact(session: &PortfolioSession, values: [String; 4], json: bool) -> Result<()> {
    for (field, value) in FormField::ALL.into_iter().zip(values) {
        session.contact.set_field(field, value).await;
    }

    let outcome = session.contact.submit().await?;
    let snapshot = session.contact.snapshot().await;
    if json {
        println!("{}", serde_json::to_string(&snapshot)?);
    } else {
        print!("{}", render::render_outcome(&outcome, &snapshot));
    }
    Ok(())
}

fn run_projects(session: &mut PortfolioSession, open: Option<String>, json: bool) -> Result<()> {
    let Some(id) = open else {
        if json {
            println!("{}", serde_json::to_string(session.gallery.projects())?);
        } else {
            print!("{}", render::render_project_list(session.gallery.projects()));
        }
        return Ok(());
    };

    let project = session.gallery.select(&ProjectId::new(id))?;
    if json {
        println!("{}", serde_json::to_string(project)?);
    } else {
        print!("{}", render::render_project_detail(project));
    }
    session.gallery.close();
    Ok(())
}
