//! Built-in table.

use crate::entry::{Category, NavigationEntry};
use crate::profile::{Experience, Profile, Project};

pub(crate) fn entries() -> Vec<NavigationEntry> {
    use Category::{Navigation, Resources, Social};
    vec![
        NavigationEntry::new("home", "Home", "/", Navigation),
        NavigationEntry::new("about", "About", "/about", Navigation),
        NavigationEntry::new("projects", "Projects", "/projects", Navigation),
        NavigationEntry::new("services", "Services", "/services", Navigation),
        NavigationEntry::new("blog", "Blog", "/blog", Navigation),
        NavigationEntry::new("contact", "Contact", "/contact", Navigation),
        NavigationEntry::new(
            "github",
            "GitHub Profile",
            "https://github.com/Yash-Raj20",
            Social,
        ),
        NavigationEntry::new("resume", "View Resume", "/resume", Resources),
        NavigationEntry::new("skills", "Technical Skills", "/#skills", Navigation),
        NavigationEntry::new("experience", "Work History", "/#experience", Navigation),
        NavigationEntry::new("guestbook", "Sign Guestbook", "/#guestbook", Navigation),
    ]
}

pub(crate) fn profile() -> Profile {
    let skills = [
        "React.js",
        "Next.js",
        "JavaScript (ES6+)",
        "Tailwind CSS",
        "Bootstrap",
        "Material UI",
        "HTML5",
        "CSS3",
        "Node.js",
        "Express.js",
        "MongoDB",
        "Redux/Context API",
        "Git/GitHub",
        "RESTful APIs",
        "Figma",
        "VS Code",
    ];
    Profile {
        name: "Ratnesh Kumar".into(),
        role: "Frontend Developer".into(),
        about: "I am a Frontend Developer with hands-on experience in React.js, JavaScript, \
                and modern frontend tools. I specialize in responsive design, state management, \
                and API integration, always aiming for scalable, pixel-perfect interfaces that \
                align with brand identity."
            .into(),
        skills: skills.iter().map(|s| (*s).to_string()).collect(),
        projects: vec![
            project(
                "Janseva Portal",
                "Civic Platform",
                "Civic issue reporting platform built with React, Node, and Socket.io.",
            ),
            project(
                "Heavenstay",
                "Booking Platform",
                "Full-stack villa booking app with CRUD, auth, and responsive UI.",
            ),
            project(
                "Portfolio Website",
                "Web Design",
                "High-performance portfolio website built with Next.js.",
            ),
            project(
                "FitIndia",
                "Health & Fitness",
                "Fitness app that helps users track goals and progress.",
            ),
        ],
        experience: vec![
            Experience {
                role: "Web Developer".into(),
                company: "WebNX Pvt. Ltd".into(),
                period: "Sep 2024 - Jan 2025".into(),
            },
            Experience {
                role: "Internship Trainee".into(),
                company: "Silver Oak University".into(),
                period: "Internship".into(),
            },
        ],
        email: "hello@ratnesh.dev".into(),
    }
}

pub(crate) fn suggestions() -> Vec<String> {
    [
        "What are your core skills?",
        "Show me your best projects",
        "Tell me about your work experience",
        "How can I contact you?",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

fn project(title: &str, category: &str, description: &str) -> Project {
    Project {
        title: title.into(),
        category: category.into(),
        description: description.into(),
    }
}
