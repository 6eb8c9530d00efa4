use std::{collections::HashSet, fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use shared::domain::{ContactInfo, Project, ProjectId, Skill, SocialLink};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroContent {
    pub title: String,
    pub taglines: Vec<String>,
    pub enter_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutContent {
    pub skills: Vec<Skill>,
    pub certifications: Vec<String>,
}

/// Static copy the renderer draws around the interactive state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    pub hero: HeroContent,
    pub about: AboutContent,
    pub projects: Vec<Project>,
    pub contact_info: Vec<ContactInfo>,
    pub social_links: Vec<SocialLink>,
}

impl SiteContent {
    pub fn builtin() -> Self {
        Self {
            hero: HeroContent {
                title: "CYBER".into(),
                taglines: vec![
                    "CYBERSECURITY EXPERT".into(),
                    "SECURE DEVELOPER".into(),
                    "PENTESTER".into(),
                ],
                enter_label: "ACCESS THE SYSTEM".into(),
            },
            about: AboutContent {
                skills: vec![
                    skill("Network Security", 95),
                    skill("Pentesting", 90),
                    skill("Cryptography", 85),
                    skill("Forensics", 88),
                    skill("Web Security", 92),
                    skill("Secure Development", 87),
                ],
                certifications: vec![
                    "CISSP - Certified Information Systems Security Professional".into(),
                    "CEH - Certified Ethical Hacker".into(),
                    "OSCP - Offensive Security Certified Professional".into(),
                    "CISM - Certified Information Security Manager".into(),
                ],
            },
            projects: builtin_projects(),
            contact_info: vec![
                ContactInfo {
                    label: "Email".into(),
                    value: "expert@cyber-portfolio.com".into(),
                },
                ContactInfo {
                    label: "Phone".into(),
                    value: "+33 1 23 45 67 89".into(),
                },
                ContactInfo {
                    label: "Location".into(),
                    value: "Paris, France".into(),
                },
            ],
            social_links: vec![
                social("GitHub", "https://github.com"),
                social("LinkedIn", "https://linkedin.com"),
                social("Twitter", "https://twitter.com"),
                social("Email", "mailto:expert@cyber-portfolio.com"),
            ],
        }
    }

    /// Replaces the built-in project list with a JSON array of projects.
    pub fn with_projects_file(mut self, path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read projects file '{}'", path.display()))?;
        self.projects = parse_projects(&raw)
            .with_context(|| format!("invalid projects file '{}'", path.display()))?;
        Ok(self)
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        Self::builtin()
    }
}

pub fn parse_projects(raw: &str) -> Result<Vec<Project>> {
    let projects: Vec<Project> = serde_json::from_str(raw)?;
    let mut seen = HashSet::new();
    for project in &projects {
        if !seen.insert(project.id.clone()) {
            bail!("duplicate project id '{}'", project.id);
        }
    }
    Ok(projects)
}

fn skill(label: &str, level: u8) -> Skill {
    Skill {
        label: label.into(),
        level,
    }
}

fn social(label: &str, url: &str) -> SocialLink {
    SocialLink {
        label: label.into(),
        url: url.into(),
    }
}

fn builtin_projects() -> Vec<Project> {
    vec![
        Project {
            id: ProjectId::new("audit-bank"),
            title: "Banking Security Audit".into(),
            category: "SECURITY_AUDIT".into(),
            description: "Full penetration test of an online banking platform.".into(),
            technologies: vec!["Burp Suite".into(), "Nmap".into(), "Metasploit".into()],
            status: "DEPLOYED".into(),
            year: "2024".into(),
            highlights: vec![
                "12 critical findings remediated".into(),
                "PCI-DSS compliance restored".into(),
            ],
        },
        Project {
            id: ProjectId::new("threat-intel"),
            title: "Threat Intelligence Pipeline".into(),
            category: "THREAT_ANALYSIS".into(),
            description: "Correlation of indicators of compromise across feeds.".into(),
            technologies: vec!["Rust".into(), "Elastic".into(), "MISP".into()],
            status: "IN PRODUCTION".into(),
            year: "2023".into(),
            highlights: vec!["Sub-minute alerting on new indicators".into()],
        },
        Project {
            id: ProjectId::new("secure-sdlc"),
            title: "Secure SDLC Toolkit".into(),
            category: "DEV_SECURITY".into(),
            description: "Static analysis and secret scanning wired into CI.".into(),
            technologies: vec!["Semgrep".into(), "GitLab CI".into()],
            status: "BETA".into(),
            year: "2024".into(),
            highlights: vec!["Adopted by four product teams".into()],
        },
    ]
}
