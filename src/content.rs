//! Everything the page says, loaded from the bundled `content/site.json`.

use crate::error::ContentError;
use serde::Deserialize;
use std::collections::HashSet;

const BUNDLED_CONTENT: &str = include_str!("../content/site.json");

/// Technologies shown on a project card before the `+N` badge.
pub const CARD_TECHNOLOGY_LIMIT: usize = 4;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub owner: Owner,
    pub navigation: Vec<NavItem>,
    pub hero: Hero,
    pub about: About,
    pub projects: Projects,
    pub skills: Skills,
    pub experience: Experience,
    pub contact: Contact,
    pub footer_tagline: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub name: String,
    pub initials: String,
    pub headline: String,
    pub availability: String,
    pub resume_url: String,
    pub resume_file_name: String,
    pub email: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

impl NavItem {
    /// Element id the link scrolls to.
    pub fn target_id(&self) -> &str {
        self.href.trim_start_matches('#')
    }
}

/// Eyebrow, two-tone title and intro paragraph at the top of a section.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SectionHeading {
    pub eyebrow: String,
    pub title: String,
    pub accent: String,
    pub intro: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub typing_phrases: Vec<String>,
    pub metrics: Vec<Metric>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Metric {
    pub value: u64,
    pub suffix: String,
    pub label: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct About {
    pub heading: SectionHeading,
    pub highlights: Vec<Highlight>,
    pub paragraphs: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Highlight {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    #[default]
    All,
    Highlighted,
    Automation,
    Ai,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CategoryLabel {
    pub value: ProjectCategory,
    pub label: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Projects {
    pub heading: SectionHeading,
    pub categories: Vec<CategoryLabel>,
    pub items: Vec<Project>,
}

impl Projects {
    pub fn filtered(&self, category: ProjectCategory) -> impl Iterator<Item = &Project> {
        self.items
            .iter()
            .filter(move |project| project.matches(category))
    }

    pub fn find(&self, id: &str) -> Option<&Project> {
        self.items.iter().find(|project| project.id == id)
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ProjectLinks {
    pub demo: Option<String>,
    pub github: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub full_description: String,
    pub impact: String,
    pub technologies: Vec<String>,
    pub categories: Vec<ProjectCategory>,
    #[serde(default)]
    pub links: ProjectLinks,
    pub features: Vec<String>,
}

impl Project {
    pub fn matches(&self, category: ProjectCategory) -> bool {
        category == ProjectCategory::All || self.categories.contains(&category)
    }

    /// Technologies that fit on the card and how many were left off.
    pub fn technology_preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.technologies.len().min(limit);
        (&self.technologies[..shown], self.technologies.len() - shown)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategory {
    pub name: String,
    pub icon: String,
    pub skills: Vec<String>,
    pub impact_statement: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Skills {
    pub heading: SectionHeading,
    pub categories: Vec<SkillCategory>,
    pub additional: Vec<String>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Work,
    Education,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TimelineItem {
    pub kind: TimelineKind,
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub credly_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Experience {
    pub heading: SectionHeading,
    pub timeline: Vec<TimelineItem>,
    pub certifications: Vec<Certification>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SocialLink {
    pub name: String,
    pub icon: String,
    pub url: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub heading: SectionHeading,
    pub cta_title: String,
    pub cta_body: String,
    pub social_links: Vec<SocialLink>,
}

impl SiteContent {
    pub fn bundled() -> Result<Self, ContentError> {
        Self::from_json(BUNDLED_CONTENT)
    }

    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        let content: Self = serde_json::from_str(raw)?;
        content.validate()?;
        Ok(content)
    }

    fn validate(&self) -> Result<(), ContentError> {
        if self.navigation.is_empty() {
            return Err(ContentError::Empty("navigation"));
        }
        if self.projects.items.is_empty() {
            return Err(ContentError::Empty("projects"));
        }
        if self.hero.metrics.is_empty() {
            return Err(ContentError::Empty("hero.metrics"));
        }

        let mut seen = HashSet::new();
        for project in &self.projects.items {
            if !seen.insert(project.id.as_str()) {
                return Err(ContentError::DuplicateProjectId(project.id.clone()));
            }
            if project.categories.contains(&ProjectCategory::All) {
                return Err(ContentError::ReservedCategory {
                    project: project.id.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn bundled_json() -> Value {
        serde_json::from_str(BUNDLED_CONTENT).expect("bundled content is JSON")
    }

    #[test]
    fn bundled_content_loads() {
        let content = SiteContent::bundled().expect("bundled content is valid");

        assert_eq!(content.owner.initials, "MC");
        assert_eq!(content.navigation.len(), 5);
        assert_eq!(content.hero.metrics[1].value, 2_000);
        assert_eq!(content.projects.categories[0].value, ProjectCategory::All);
        assert!(content.experience.timeline[2].highlights.is_empty());
        assert!(content.experience.certifications[1].credly_url.is_none());
    }

    #[test]
    fn category_filter_matches_tags() {
        let content = SiteContent::bundled().expect("bundled content is valid");
        let projects = &content.projects;

        assert_eq!(projects.filtered(ProjectCategory::All).count(), 4);
        assert_eq!(projects.filtered(ProjectCategory::Highlighted).count(), 4);
        assert_eq!(projects.filtered(ProjectCategory::Automation).count(), 3);

        let ai: Vec<&str> = projects
            .filtered(ProjectCategory::Ai)
            .map(|project| project.id.as_str())
            .collect();
        assert_eq!(ai, ["qa-assist", "herbitech"]);
    }

    #[test]
    fn technology_preview_counts_overflow() {
        let content = SiteContent::bundled().expect("bundled content is valid");

        let qa_assist = content.projects.find("qa-assist").expect("project exists");
        let (shown, hidden) = qa_assist.technology_preview(CARD_TECHNOLOGY_LIMIT);
        assert_eq!(shown.len(), 4);
        assert_eq!(hidden, 1);

        let email = content.projects.find("email-automation").expect("project exists");
        assert_eq!(email.technology_preview(CARD_TECHNOLOGY_LIMIT).1, 0);
    }

    #[test]
    fn nav_target_strips_hash() {
        let item = NavItem {
            label: "About".to_string(),
            href: "#about".to_string(),
        };
        assert_eq!(item.target_id(), "about");
    }

    #[test]
    fn duplicate_project_ids_are_rejected() {
        let mut json = bundled_json();
        json["projects"]["items"][1]["id"] = Value::from("qa-assist");

        let result = SiteContent::from_json(&json.to_string());
        assert!(matches!(result, Err(ContentError::DuplicateProjectId(id)) if id == "qa-assist"));
    }

    #[test]
    fn all_is_not_a_project_tag() {
        let mut json = bundled_json();
        json["projects"]["items"][0]["categories"] = serde_json::json!(["all"]);

        let result = SiteContent::from_json(&json.to_string());
        assert!(matches!(result, Err(ContentError::ReservedCategory { .. })));
    }

    #[test]
    fn unknown_category_fails_to_parse() {
        let mut json = bundled_json();
        json["projects"]["items"][0]["categories"] = serde_json::json!(["blockchain"]);

        let result = SiteContent::from_json(&json.to_string());
        assert!(matches!(result, Err(ContentError::Parse(_))));
    }

    #[test]
    fn empty_project_list_is_rejected() {
        let mut json = bundled_json();
        json["projects"]["items"] = serde_json::json!([]);

        let result = SiteContent::from_json(&json.to_string());
        assert!(matches!(result, Err(ContentError::Empty("projects"))));
    }
}
