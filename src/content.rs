//! Portfolio content shown when a drawer is opened.
//!
//! Entries are static and developer-authored. They are keyed by the drawer
//! identity string (`"drawer1"` .. `"drawer4"`) and looked up by exact match.

/// One piece of rich content inside an entry body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Heading(&'static str),
    Subheading(&'static str),
    /// A list item with an optional bold lead-in.
    Bullet {
        lead: Option<&'static str>,
        text: &'static str,
    },
    Paragraph(&'static str),
    Emphasis(&'static str),
    /// Side-by-side columns, each a list of blocks.
    Columns(&'static [&'static [Block]]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortfolioEntry {
    pub title: &'static str,
    pub body: &'static [Block],
}

const fn bullet(text: &'static str) -> Block {
    Block::Bullet { lead: None, text }
}

const fn led(lead: &'static str, text: &'static str) -> Block {
    Block::Bullet {
        lead: Some(lead),
        text,
    }
}

const FEATURED_PROJECTS: &[Block] = &[
    Block::Heading("My Best Work"),
    led(
        "Project Alpha",
        "A full-stack web application built with React and Node.js",
    ),
    led(
        "3D Portfolio",
        "This interactive Three.js experience you're viewing now!",
    ),
    led("ML Predictor", "Machine learning model for data analysis"),
];

const FRONTEND: &[Block] = &[
    Block::Subheading("Frontend"),
    bullet("React / JavaScript"),
    bullet("Three.js / WebGL"),
    bullet("HTML5 / CSS3"),
];

const BACKEND: &[Block] = &[
    Block::Subheading("Backend"),
    bullet("Node.js / Python"),
    bullet("REST APIs"),
    bullet("Databases"),
];

const SKILL_COLUMNS: &[&[Block]] = &[FRONTEND, BACKEND];

const TECHNICAL_SKILLS: &[Block] = &[
    Block::Heading("Technologies & Tools"),
    Block::Columns(SKILL_COLUMNS),
];

const BACKGROUND: &[Block] = &[
    Block::Heading("Background"),
    Block::Subheading("Work Experience"),
    led("Software Engineer", "Company Name (2022-Present)"),
    led("Web Developer", "Previous Company (2020-2022)"),
    Block::Subheading("Education"),
    bullet("BS in Computer Science"),
    bullet("Various certifications and courses"),
];

const HOBBIES: &[Block] = &[
    Block::Heading("Beyond Coding"),
    bullet("🎮 Game Development & 3D Graphics"),
    bullet("🎨 Digital Art & Design"),
    bullet("📚 Reading Sci-Fi & Tech Books"),
    bullet("🏃 Fitness & Outdoor Activities"),
    Block::Emphasis("I believe creativity and technical skills go hand in hand!"),
];

static ENTRIES: [(&str, PortfolioEntry); 4] = [
    (
        "drawer1",
        PortfolioEntry {
            title: "Featured Projects",
            body: FEATURED_PROJECTS,
        },
    ),
    (
        "drawer2",
        PortfolioEntry {
            title: "Technical Skills",
            body: TECHNICAL_SKILLS,
        },
    ),
    (
        "drawer3",
        PortfolioEntry {
            title: "Experience & Education",
            body: BACKGROUND,
        },
    ),
    (
        "drawer4",
        PortfolioEntry {
            title: "Interests & Hobbies",
            body: HOBBIES,
        },
    ),
];

/// Looks up the entry for a drawer identity.
pub fn portfolio_entry(identity: &str) -> Option<&'static PortfolioEntry> {
    ENTRIES
        .iter()
        .find(|(key, _)| *key == identity)
        .map(|(_, entry)| entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_drawer_has_an_entry() {
        let titles: Vec<_> = ["drawer1", "drawer2", "drawer3", "drawer4"]
            .iter()
            .map(|id| portfolio_entry(id).map(|entry| entry.title))
            .collect();
        assert_eq!(
            titles,
            vec![
                Some("Featured Projects"),
                Some("Technical Skills"),
                Some("Experience & Education"),
                Some("Interests & Hobbies"),
            ]
        );
    }

    #[test]
    fn entries_keep_their_authored_copy() {
        let drawer1 = portfolio_entry("drawer1").unwrap();
        assert!(drawer1.body.contains(&led(
            "3D Portfolio",
            "This interactive Three.js experience you're viewing now!"
        )));

        let hobbies = portfolio_entry("drawer4").unwrap();
        assert_eq!(hobbies.body[1], bullet("🎮 Game Development & 3D Graphics"));
        assert_eq!(hobbies.body[4], bullet("🏃 Fitness & Outdoor Activities"));
    }

    #[test]
    fn lookup_is_exact() {
        assert!(portfolio_entry("drawer5").is_none());
        assert!(portfolio_entry("Drawer1").is_none());
        assert!(portfolio_entry("").is_none());
    }
}
