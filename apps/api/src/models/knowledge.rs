use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// Owner profile as returned by `GET /api/profile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub about: String,
}

/// A named group of skills. `category` is free-form ("Frontend", "Cloud Infra", ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        alias = "technologies",
        alias = "techStack"
    )]
    pub tech: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub degree: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub institution: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub year: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        alias = "gpa",
        skip_serializing_if = "Option::is_none"
    )]
    pub cgpa: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default, deserialize_with = "lenient::string", alias = "name")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        alias = "technologies",
        alias = "techStack"
    )]
    pub tech: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub github: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        alias = "link",
        alias = "demo",
        skip_serializing_if = "Option::is_none"
    )]
    pub website: Option<String>,
}

/// Everything the assistant knows about the portfolio owner.
///
/// Read-only for the duration of a reply. Every field may be empty; formatters
/// branch on presence and never print placeholder text for missing data.
///
/// Serialised in camelCase, the casing the portfolio backend speaks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct KnowledgeSnapshot {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub about: String,
    #[serde(
        default,
        deserialize_with = "lenient::list",
        alias = "skills",
        alias = "skillGroups"
    )]
    pub skill_groups: Vec<SkillGroup>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub projects: Vec<ProjectEntry>,
}

impl KnowledgeSnapshot {
    pub fn from_parts(
        profile: Profile,
        skill_groups: Vec<SkillGroup>,
        experience: Vec<ExperienceEntry>,
        education: Vec<EducationEntry>,
        projects: Vec<ProjectEntry>,
    ) -> Self {
        Self {
            name: profile.name,
            email: profile.email,
            phone: profile.phone,
            about: profile.about,
            skill_groups,
            experience,
            education,
            projects,
        }
    }

    /// Owner's name in possessive form, or a neutral stand-in when unknown.
    pub fn owner_possessive(&self) -> String {
        match self.name.trim() {
            "" => "the owner's".to_string(),
            name => format!("{name}'s"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_empty_snapshot() {
        let snapshot: KnowledgeSnapshot = serde_json::from_value(json!({})).unwrap();
        assert_eq!(snapshot, KnowledgeSnapshot::default());
    }

    #[test]
    fn test_backend_shapes_deserialize() {
        let snapshot: KnowledgeSnapshot = serde_json::from_value(json!({
            "name": "Asha Rao",
            "email": null,
            "skills": [
                {"category": "Frontend", "items": ["React", "Tailwind"]},
                {"category": null, "items": null}
            ],
            "experience": [
                {"role": "Engineer", "company": "Acme", "technologies": "Rust, Postgres"}
            ],
            "education": [
                {"degree": "B.E. CSE", "institution": "PSG Tech", "year": 2024, "gpa": 8.7}
            ],
            "projects": [
                {"name": "UptimeEye", "description": "Monitoring", "github": "", "link": "https://uptimeeye.dev"}
            ]
        }))
        .unwrap();

        assert_eq!(snapshot.name, "Asha Rao");
        assert_eq!(snapshot.email, "");
        assert_eq!(snapshot.skill_groups.len(), 2);
        assert!(snapshot.skill_groups[1].items.is_empty());
        assert_eq!(snapshot.experience[0].tech, vec!["Rust", "Postgres"]);
        assert_eq!(snapshot.education[0].year, "2024");
        assert_eq!(snapshot.education[0].cgpa.as_deref(), Some("8.7"));
        assert_eq!(snapshot.projects[0].title, "UptimeEye");
        assert_eq!(snapshot.projects[0].github, None);
        assert_eq!(
            snapshot.projects[0].website.as_deref(),
            Some("https://uptimeeye.dev")
        );
    }

    #[test]
    fn test_wrong_shaped_sections_degrade_to_empty() {
        let snapshot: KnowledgeSnapshot = serde_json::from_value(json!({
            "skill_groups": "not a list",
            "experience": null,
            "projects": [42, {"title": "Kept"}]
        }))
        .unwrap();
        assert!(snapshot.skill_groups.is_empty());
        assert!(snapshot.experience.is_empty());
        assert_eq!(snapshot.projects.len(), 1);
        assert_eq!(snapshot.projects[0].title, "Kept");
    }

    #[test]
    fn test_absent_optionals_are_not_serialized() {
        let value = serde_json::to_value(ProjectEntry {
            title: "Folio".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert!(value.get("github").is_none());
        assert!(value.get("website").is_none());
    }

    #[test]
    fn test_snapshot_serializes_camel_case_and_reads_back() {
        let snapshot = KnowledgeSnapshot {
            name: "Asha".to_string(),
            skill_groups: vec![SkillGroup {
                category: "Frontend".to_string(),
                items: vec!["React".to_string()],
            }],
            ..Default::default()
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["skillGroups"][0]["category"], "Frontend");
        assert!(value.get("skill_groups").is_none());

        let back: KnowledgeSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_owner_possessive() {
        let mut snapshot = KnowledgeSnapshot::default();
        assert_eq!(snapshot.owner_possessive(), "the owner's");
        snapshot.name = " Asha ".to_string();
        assert_eq!(snapshot.owner_possessive(), "Asha's");
    }
}
