//! Site content - The page copy as data.
//!
//! Every field has a default, so a config file only needs the parts it
//! changes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    /// Section id the link points at.
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub year: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

/// Copy for every section of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    pub owner: String,
    pub nav: Vec<NavLink>,
    pub hire_url: String,

    // Hero
    pub badge: String,
    pub role: String,
    pub tagline: String,
    pub primary_cta: String,
    pub secondary_cta: String,

    // About
    pub bio: String,
    pub skills: Vec<String>,
    pub experience: Vec<Experience>,

    pub projects: Vec<Project>,
    pub services: Vec<Service>,

    // Contact
    pub contact_heading: String,
    pub contact_intro: String,
    pub email: String,
    pub phone: String,
    pub links: Vec<SocialLink>,

    pub footer_line: String,
}

fn nav(label: &str, target: &str) -> NavLink {
    NavLink {
        label: label.into(),
        target: target.into(),
    }
}

fn project(title: &str, tag: &str) -> Project {
    Project {
        title: title.into(),
        tag: tag.into(),
    }
}

fn service(title: &str, description: &str) -> Service {
    Service {
        title: title.into(),
        description: description.into(),
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            owner: "Fajri Rahmanto".into(),
            nav: vec![
                nav("Home", "home"),
                nav("About", "about"),
                nav("Portfolio", "projects"),
                nav("Services", "services"),
                nav("Contact", "contact"),
            ],
            hire_url: "https://www.fiverr.com/".into(),

            badge: "Creative Digital Freelancer".into(),
            role: "Creative Tech & Design Freelancer".into(),
            tagline: "I build smart systems, modern designs, and digital experiences for your brand."
                .into(),
            primary_cta: "Hire Me on Fiverr".into(),
            secondary_cta: "View My Projects".into(),

            bio: "I'm a creative technologist who blends design and engineering to craft \
                  memorable digital products. My core strengths include building Java-based \
                  desktop apps, 3D web experiences, and content powered by AI."
                .into(),
            skills: vec![
                "Java / JavaFX".into(),
                "Figma / UI".into(),
                "Blender / 3D".into(),
                "AI Tools".into(),
            ],
            experience: vec![
                Experience {
                    year: "2022".into(),
                    text: "Launched CashMATE: A smart finance desktop app.".into(),
                },
                Experience {
                    year: "2023".into(),
                    text: "Produced AI Art Animation series with >100k views.".into(),
                },
                Experience {
                    year: "2024".into(),
                    text: "Built multiple 3D web demos and brand showcases.".into(),
                },
            ],

            projects: vec![
                project("CashMATE App", "JavaFX • Finance"),
                project("AI Art Animation", "AI • Motion"),
                project("Tayo-Style 3D Animation", "3D • Character"),
                project("Portfolio 3D Website", "Three.js • Design"),
                project("Brand Motion Pack", "Motion • Social"),
                project("Interactive WebGL", "Web • Shader"),
            ],
            services: vec![
                service("UI/UX Design", "Clean, modern interfaces and prototypes in Figma."),
                service("Java App Development", "Robust desktop apps with Java & JavaFX."),
                service("3D Web Design", "Interactive WebGL experiences and 3D visuals."),
                service("AI Video Creation", "Stylized animations and content using AI tools."),
            ],

            contact_heading: "Let's Collaborate!".into(),
            contact_intro: "Open to freelance projects, collaborations, and creative experiments."
                .into(),
            email: "hello@fajri.dev".into(),
            phone: "+62 8xx xxxx xxxx".into(),
            links: vec![
                SocialLink {
                    label: "Fiverr".into(),
                    url: "https://www.fiverr.com/".into(),
                },
                SocialLink {
                    label: "Instagram".into(),
                    url: "https://www.instagram.com/".into(),
                },
                SocialLink {
                    label: "LinkedIn".into(),
                    url: "https://www.linkedin.com/".into(),
                },
            ],

            footer_line: "Crafted with love, code, and a bit of glow.".into(),
        }
    }
}
