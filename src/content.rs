//! Page content - Typed copy for every section.
//!
//! The page has one parameterised section component; what differs between
//! sections is data. [`PageContent::default`] is the stock portfolio. A TOML
//! file with the same shape replaces it wholesale.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::types::SkillLevel;

/// One staggered item: a card, a timeline entry, a highlight, a hero block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemContent {
    pub title: String,
    /// Secondary line: organisation, period, status.
    pub subtitle: String,
    pub detail: String,
    /// Longer text shown when the item is selected (project cards).
    pub expanded: String,
    pub tags: Vec<String>,
}

impl ItemContent {
    fn titled(title: &str, detail: &str) -> Self {
        Self {
            title: title.to_string(),
            detail: detail.to_string(),
            ..Self::default()
        }
    }
}

/// One skill bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillContent {
    pub name: String,
    pub level: SkillLevel,
    #[serde(default)]
    pub soft: bool,
}

/// Copy of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionContent {
    /// Root element id, also the nav anchor.
    pub id: String,
    /// Nav link text.
    pub label: String,
    pub heading: String,
    #[serde(default)]
    pub items: Vec<ItemContent>,
    /// Skill bars. Technical skills first, then soft skills.
    #[serde(default)]
    pub skills: Vec<SkillContent>,
}

impl SectionContent {
    /// Number of staggered items. Skill rows stagger like items.
    pub fn item_count(&self) -> usize {
        self.items.len() + self.skills.len()
    }

    pub fn levels(&self) -> Vec<SkillLevel> {
        self.skills.iter().map(|s| s.level).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
}

/// Everything the page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub name: String,
    pub role: String,
    pub tagline: String,
    /// Sections in page order.
    pub sections: Vec<SectionContent>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

impl PageContent {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let content: PageContent = toml::from_str(source)?;
        content.validate()?;
        Ok(content)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| FolioError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Section ids must be non-empty and unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(FolioError::validation("section id", "must not be empty"));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(FolioError::validation(
                    "section id",
                    format!("`{}` is used twice", section.id),
                ));
            }
        }
        Ok(())
    }

    pub fn section(&self, id: &str) -> Option<&SectionContent> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Nav links as `(id, label)`, in page order.
    pub fn nav(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sections
            .iter()
            .map(|s| (s.id.as_str(), s.label.as_str()))
    }
}

// =============================================================================
// Stock portfolio
// =============================================================================

fn skill(name: &str, level: u8, soft: bool) -> SkillContent {
    SkillContent {
        name: name.to_string(),
        level: SkillLevel::saturating(level),
        soft,
    }
}

fn entry(title: &str, subtitle: &str, detail: &str, tags: &[&str]) -> ItemContent {
    ItemContent {
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        detail: detail.to_string(),
        expanded: String::new(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn project(title: &str, status: &str, detail: &str, expanded: &str, tags: &[&str]) -> ItemContent {
    ItemContent {
        expanded: expanded.to_string(),
        ..entry(title, status, detail, tags)
    }
}

fn section(id: &str, label: &str, heading: &str, items: Vec<ItemContent>) -> SectionContent {
    SectionContent {
        id: id.to_string(),
        label: label.to_string(),
        heading: heading.to_string(),
        items,
        skills: Vec::new(),
    }
}

impl Default for PageContent {
    fn default() -> Self {
        let name = "Polavaram Hemanth Kumar";
        let role = "Electronics & Communication Engineering Student";
        let tagline = "Passionate about IoT, Embedded Systems, and innovative technology solutions. \
                       Building the future one circuit at a time.";

        let home = section(
            "home",
            "Home",
            name,
            vec![
                ItemContent::titled("Profile", ""),
                ItemContent::titled(&format!("Hi, I'm {name}"), role),
                ItemContent::titled("", tagline),
                ItemContent::titled("Download Resume | View My Work", ""),
                ItemContent::titled("GitHub | LinkedIn | Email", ""),
            ],
        );

        let about = section(
            "about",
            "About",
            "About Me",
            vec![
                ItemContent::titled("Education", "B.Tech in Electronics & Communication Engineering"),
                ItemContent::titled("Passion", "IoT, Embedded Systems, and Innovation"),
                ItemContent::titled("Goal", "Building smart solutions for real-world problems"),
            ],
        );

        let mut skills = section("skills", "Skills", "Skills & Expertise", Vec::new());
        skills.skills = vec![
            skill("Python", 80, false),
            skill("C Programming", 60, false),
            skill("MATLAB", 75, false),
            skill("Arduino", 90, false),
            skill("IoT", 85, false),
            skill("Embedded Systems", 80, false),
            skill("Power BI", 70, false),
            skill("Problem-Solving", 90, true),
            skill("Teamwork", 85, true),
            skill("Communication", 80, true),
            skill("Leadership", 75, true),
            skill("Analytical Thinking", 88, true),
            skill("Adaptability", 85, true),
        ];

        let experience = section(
            "experience",
            "Experience",
            "Education & Experience",
            vec![
                entry(
                    "B.Tech in Electronics & Communication Engineering",
                    "Your University Name | 2021 - 2025",
                    "Pursuing comprehensive education in ECE with focus on digital signal \
                     processing, communication systems, and embedded technologies.",
                    &["CGPA: 8.5/10 (Current)"],
                ),
                entry(
                    "IoT Development Certification",
                    "Tech Institute | 2023",
                    "Comprehensive certification covering IoT architecture, sensor integration, \
                     and cloud connectivity.",
                    &["Arduino", "ESP32", "AWS IoT"],
                ),
                entry(
                    "Electronics Intern",
                    "Tech Company Name | Summer 2023",
                    "Gained practical experience in embedded systems development and IoT project \
                     implementation.",
                    &["Sensor data acquisition", "Firmware"],
                ),
                entry(
                    "Power BI Data Analytics",
                    "Microsoft | 2023",
                    "Earned certification in business intelligence and data visualization using \
                     Microsoft Power BI.",
                    &["DAX", "Dashboards"],
                ),
            ],
        );

        let projects = section(
            "projects",
            "Projects",
            "Featured Projects",
            vec![
                project(
                    "Digital Resume Builder",
                    "Completed",
                    "A web application that allows users to create professional resumes with \
                     customizable templates and real-time preview.",
                    "Drag-and-drop editing, multiple templates, PDF export and cloud storage for \
                     resume data.",
                    &["React", "TypeScript", "CSS", "PDF.js"],
                ),
                project(
                    "IoT Home Automation System",
                    "In Progress",
                    "Smart home solution using Arduino and IoT sensors for automated lighting, \
                     temperature control, and security monitoring.",
                    "Multiple sensors, real-time monitoring, mobile control and automated \
                     responses, built on Arduino and ESP32 with cloud integration.",
                    &["Arduino", "C++", "IoT", "ESP32", "Firebase"],
                ),
                project(
                    "Data Analytics Dashboard",
                    "Completed",
                    "Interactive Power BI dashboard for analyzing student performance data with \
                     dynamic visualizations and insights.",
                    "Processes large datasets into interactive charts, filters, automated reports \
                     and predictive models.",
                    &["Power BI", "SQL", "Python", "Data Analysis"],
                ),
                project(
                    "Embedded Weather Station",
                    "Completed",
                    "Wireless weather monitoring system with multiple sensors and real-time data \
                     logging capabilities.",
                    "Temperature, humidity, pressure and wind sensors with wireless transmission, \
                     local storage and a web monitoring interface.",
                    &["C", "Embedded C", "Sensors", "Wireless Communication"],
                ),
            ],
        );

        let resume = section(
            "resume",
            "Resume",
            "My Resume",
            vec![
                ItemContent::titled("", "Comprehensive project portfolio showcasing technical skills"),
                ItemContent::titled("", "Strong academic background in Electronics & Communication"),
                ItemContent::titled("", "Hands-on experience with IoT and embedded systems"),
                ItemContent::titled("", "Proficiency in multiple programming languages and tools"),
            ],
        );

        let contact = section(
            "contact",
            "Contact",
            "Get In Touch",
            vec![
                ItemContent::titled("Send a Message", "Name, email, subject and message"),
                entry(
                    "Contact Information",
                    "your.email@example.com",
                    "Your City, State, India",
                    &["+91 XXXXX XXXXX"],
                ),
            ],
        );

        let socials = [
            ("GitHub", "https://github.com/yourusername"),
            ("LinkedIn", "https://linkedin.com/in/yourusername"),
            ("Email", "mailto:your.email@example.com"),
        ]
        .into_iter()
        .map(|(label, href)| SocialLink {
            label: label.to_string(),
            href: href.to_string(),
        })
        .collect();

        Self {
            name: name.to_string(),
            role: role.to_string(),
            tagline: tagline.to_string(),
            sections: vec![home, about, skills, experience, projects, resume, contact],
            socials,
        }
    }
}
