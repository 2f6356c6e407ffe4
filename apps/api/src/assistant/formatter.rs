//! Renders one reply per intent from a `KnowledgeSnapshot`.
//!
//! Every optional piece of data is rendered only when present, so a sparse
//! snapshot produces shorter replies rather than "undefined" or empty lines.

use crate::assistant::intent::Intent;
use crate::assistant::prompts::{
    AVAILABILITY, CAPABILITY_MENU, CONTACT_UNAVAILABLE, GENERIC_BIO, GENERIC_EDUCATION,
    GENERIC_EXPERIENCE, GENERIC_PROJECTS, SKILLS_LOADING, TOPIC_MENU,
};
use crate::models::knowledge::{EducationEntry, ExperienceEntry, KnowledgeSnapshot, ProjectEntry};

/// Category substrings mapped to the emoji that prefixes a skills line.
/// Checked in order against the lowercased category; first hit wins.
const CATEGORY_EMOJI: &[(&[&str], &str)] = &[
    (&["front"], "🎨"),
    (&["back"], "⚙️"),
    (&["database", "db"], "💾"),
    (&["cloud"], "☁️"),
    (&["ai", "ml"], "🤖"),
    (&["tool", "dev"], "🔧"),
];

const DEFAULT_CATEGORY_EMOJI: &str = "✨";

pub fn category_emoji(category: &str) -> &'static str {
    let lowered = category.to_lowercase();
    CATEGORY_EMOJI
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lowered.contains(n)))
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_CATEGORY_EMOJI)
}

/// Renders the reply for an already-classified message.
pub fn render(
    intent: Intent,
    message: &str,
    snapshot: &KnowledgeSnapshot,
    speaker_name: Option<&str>,
) -> String {
    match intent {
        Intent::Greeting => greeting(snapshot, speaker_name),
        Intent::Skills => skills(snapshot),
        Intent::Experience => experience(snapshot),
        Intent::Projects => projects(message, snapshot),
        Intent::Education => education(snapshot),
        Intent::Contact => contact(snapshot),
        Intent::About => about(snapshot),
        Intent::Help | Intent::Fallback => CAPABILITY_MENU.to_string(),
    }
}

/// First assistant turn of a new conversation.
pub fn welcome(assistant_name: &str, snapshot: &KnowledgeSnapshot) -> String {
    format!(
        "Hi! I'm {assistant_name}. I can help you learn about {} projects, skills, and experience. \
         What would you like to know?",
        snapshot.owner_possessive()
    )
}

fn greeting(snapshot: &KnowledgeSnapshot, speaker_name: Option<&str>) -> String {
    let addressee = speaker_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| format!(" {name}"))
        .unwrap_or_default();
    format!(
        "Hello{addressee}! 👋 I'm here to tell you about {} portfolio. {TOPIC_MENU}",
        snapshot.owner_possessive()
    )
}

fn skills(snapshot: &KnowledgeSnapshot) -> String {
    let lines: Vec<String> = snapshot
        .skill_groups
        .iter()
        .filter(|group| !group.items.is_empty())
        .map(|group| {
            let category = match group.category.trim() {
                "" => "Other",
                category => category,
            };
            format!(
                "{} {}: {}",
                category_emoji(category),
                category,
                group.items.join(", ")
            )
        })
        .collect();

    if lines.is_empty() {
        return SKILLS_LOADING.to_string();
    }

    format!(
        "Here are {} skills:\n\n{}",
        snapshot.owner_possessive(),
        lines.join("\n\n")
    )
}

fn experience(snapshot: &KnowledgeSnapshot) -> String {
    if snapshot.experience.is_empty() {
        return GENERIC_EXPERIENCE.to_string();
    }

    let blocks: Vec<String> = snapshot
        .experience
        .iter()
        .enumerate()
        .map(|(idx, entry)| experience_block(idx + 1, entry))
        .collect();

    format!(
        "Here's {} work experience:\n\n{}",
        snapshot.owner_possessive(),
        blocks.join("\n\n")
    )
}

fn experience_block(number: usize, entry: &ExperienceEntry) -> String {
    let headline = match (entry.role.trim(), entry.company.trim()) {
        ("", "") => "Role".to_string(),
        (role, "") => role.to_string(),
        ("", company) => company.to_string(),
        (role, company) => format!("{role} at {company}"),
    };

    let mut lines = vec![format!("{number}. 📍 {headline}")];
    push_indented(&mut lines, &entry.duration);
    push_indented(&mut lines, &entry.description);
    if !entry.tech.is_empty() {
        lines.push(format!("   Tech: {}", entry.tech.join(", ")));
    }
    lines.join("\n")
}

fn projects(message: &str, snapshot: &KnowledgeSnapshot) -> String {
    if snapshot.projects.is_empty() {
        return GENERIC_PROJECTS.to_string();
    }

    if let Some(project) = named_project(message, &snapshot.projects) {
        return project_detail(project);
    }

    let blocks: Vec<String> = snapshot
        .projects
        .iter()
        .enumerate()
        .map(|(idx, project)| project_block(idx + 1, project))
        .collect();

    format!(
        "Here are {} notable projects:\n\n{}\n\nAsk about a specific project for more details!",
        snapshot.owner_possessive(),
        blocks.join("\n\n")
    )
}

/// Words a question about projects uses anyway; a title made only of these
/// never selects a single project.
const QUESTION_WORDS: &[&str] = &[
    "a", "about", "all", "an", "and", "are", "can", "did", "do", "for", "have", "i", "in",
    "is", "it", "me", "more", "my", "of", "on", "project", "projects", "show", "tell",
    "the", "what", "you", "your",
];

/// The first project whose title appears in the message as whole words.
fn named_project<'a>(message: &str, projects: &'a [ProjectEntry]) -> Option<&'a ProjectEntry> {
    let said = words(message);
    projects.iter().find(|project| {
        let title = words(&project.title);
        let distinctive = title.iter().any(|w| !QUESTION_WORDS.contains(&w.as_str()));
        distinctive && said.windows(title.len()).any(|run| run == title.as_slice())
    })
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn project_title(project: &ProjectEntry) -> &str {
    match project.title.trim() {
        "" => "Untitled project",
        title => title,
    }
}

fn project_block(number: usize, project: &ProjectEntry) -> String {
    let mut lines = vec![format!("{number}. {}", project_title(project))];
    push_indented(&mut lines, &project.description);
    if !project.tech.is_empty() {
        lines.push(format!("   Tech: {}", project.tech.join(", ")));
    }
    if let Some(github) = &project.github {
        lines.push(format!("   GitHub: {github}"));
    }
    if let Some(website) = &project.website {
        lines.push(format!("   Website: {website}"));
    }
    lines.join("\n")
}

fn project_detail(project: &ProjectEntry) -> String {
    let mut sections = vec![format!("🚀 {}", project_title(project))];
    if !project.description.trim().is_empty() {
        sections.push(project.description.trim().to_string());
    }

    let mut facts = Vec::new();
    if !project.tech.is_empty() {
        facts.push(format!("Tech: {}", project.tech.join(", ")));
    }
    if let Some(github) = &project.github {
        facts.push(format!("GitHub: {github}"));
    }
    if let Some(website) = &project.website {
        facts.push(format!("Website: {website}"));
    }
    if !facts.is_empty() {
        sections.push(facts.join("\n"));
    }

    sections.join("\n\n")
}

fn education(snapshot: &KnowledgeSnapshot) -> String {
    if snapshot.education.is_empty() {
        return GENERIC_EDUCATION.to_string();
    }

    let blocks: Vec<String> = snapshot.education.iter().map(education_block).collect();
    format!("📚 Education:\n\n{}", blocks.join("\n\n"))
}

fn education_block(entry: &EducationEntry) -> String {
    let degree = match entry.degree.trim() {
        "" => "Degree",
        degree => degree,
    };
    let mut lines = vec![format!("🎓 {degree}")];

    match (entry.institution.trim(), entry.year.trim()) {
        ("", "") => {}
        (institution, "") => lines.push(institution.to_string()),
        ("", year) => lines.push(year.to_string()),
        (institution, year) => lines.push(format!("{institution} ({year})")),
    }
    if let Some(cgpa) = &entry.cgpa {
        lines.push(format!("CGPA: {cgpa}"));
    }
    if !entry.highlights.is_empty() {
        lines.push(format!("Highlights: {}", entry.highlights.join(", ")));
    }
    lines.join("\n")
}

/// Email and phone lines, whichever are known.
fn contact_lines(snapshot: &KnowledgeSnapshot) -> Vec<String> {
    let mut lines = Vec::new();
    if !snapshot.email.trim().is_empty() {
        lines.push(format!("📧 Email: {}", snapshot.email.trim()));
    }
    if !snapshot.phone.trim().is_empty() {
        lines.push(format!("📱 Phone: {}", snapshot.phone.trim()));
    }
    lines
}

fn contact(snapshot: &KnowledgeSnapshot) -> String {
    let lines = contact_lines(snapshot);
    let details = if lines.is_empty() {
        CONTACT_UNAVAILABLE.to_string()
    } else {
        lines.join("\n")
    };
    format!("📞 Contact Information:\n\n{details}\n\n{AVAILABILITY}")
}

fn about(snapshot: &KnowledgeSnapshot) -> String {
    let heading = match snapshot.name.trim() {
        "" => "👤 About the owner:".to_string(),
        name => format!("👤 About {name}:"),
    };
    let bio = match snapshot.about.trim() {
        "" => GENERIC_BIO,
        about => about,
    };

    let mut reply = format!("{heading}\n\n{bio}");
    let lines = contact_lines(snapshot);
    if !lines.is_empty() {
        reply.push_str("\n\n");
        reply.push_str(&lines.join("\n"));
    }
    reply
}

fn push_indented(lines: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        lines.push(format!("   {text}"));
    }
}
