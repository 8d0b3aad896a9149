//! Stylesheet and behaviour script of the exported site.

use folio_model::Settings;

struct Palette {
    bg_primary: &'static str,
    bg_secondary: &'static str,
    text_primary: &'static str,
    text_secondary: &'static str,
    border: &'static str,
}

const DARK: Palette = Palette {
    bg_primary: "#0a0a0a",
    bg_secondary: "#18181b",
    text_primary: "#e4e4e7",
    text_secondary: "#a1a1aa",
    border: "rgba(255, 255, 255, 0.1)",
};

const LIGHT: Palette = Palette {
    bg_primary: "#ffffff",
    bg_secondary: "#f8fafc",
    text_primary: "#1f2937",
    text_secondary: "#6b7280",
    border: "rgba(0, 0, 0, 0.1)",
};

/// The site stylesheet: theme variables from `settings`, then the base rules.
pub fn stylesheet(settings: &Settings) -> String {
    let palette = if settings.dark_mode { &DARK } else { &LIGHT };
    format!(
        ":root {{
    --primary-color: {primary};
    --accent-color: {accent};
    --success-color: #10b981;
    --warning-color: #f59e0b;
    --danger-color: #ef4444;
    --bg-primary: {bg_primary};
    --bg-secondary: {bg_secondary};
    --text-primary: {text_primary};
    --text-secondary: {text_secondary};
    --border-color: {border};
}}
{BASE_CSS}",
        primary = settings.colors.primary,
        accent = settings.colors.accent,
        bg_primary = palette.bg_primary,
        bg_secondary = palette.bg_secondary,
        text_primary = palette.text_primary,
        text_secondary = palette.text_secondary,
        border = palette.border,
    )
}

const BASE_CSS: &str = r#"
/* Portfolio Website Styles */
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: 'Inter', -apple-system, BlinkMacSystemFont, sans-serif;
    background: var(--bg-primary);
    color: var(--text-primary);
    line-height: 1.6;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    padding: 0 20px;
}

header {
    background: var(--bg-secondary);
    border-bottom: 1px solid var(--border-color);
    position: sticky;
    top: 0;
    z-index: 1000;
}

nav {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 1rem 20px;
}

.logo {
    font-size: 1.5rem;
    font-weight: 700;
    color: var(--primary-color);
}

.hero {
    padding: 6rem 20px;
    text-align: center;
    background: linear-gradient(135deg, var(--primary-color), var(--accent-color));
    color: #ffffff;
}

.section {
    padding: 4rem 0;
}

.dark-section {
    background: var(--bg-secondary);
}

.section-title {
    font-size: 2rem;
    margin-bottom: 2rem;
    text-align: center;
}

.projects-grid,
.skills-grid,
.tutorials-grid,
.social-links-grid,
.updates-grid,
.knowledge-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
    gap: 1.5rem;
}

.project-card,
.skill-item,
.tutorial-card,
.social-link,
.update-item,
.knowledge-category {
    background: var(--bg-secondary);
    border: 1px solid var(--border-color);
    border-radius: 12px;
    padding: 1.5rem;
    transition: transform 0.3s ease;
}

.tech-tag,
.topic-tag {
    display: inline-block;
    margin: 0.25rem 0.25rem 0 0;
    padding: 0.2rem 0.6rem;
    border-radius: 999px;
    background: var(--primary-color);
    color: #ffffff;
    font-size: 0.8rem;
}

.fade-in {
    opacity: 0;
    transform: translateY(20px);
    transition: opacity 0.6s ease, transform 0.6s ease;
}

.fade-in.visible {
    opacity: 1;
    transform: translateY(0);
}
"#;

/// The site behaviour script: smooth scrolling and fade-in on scroll.
pub const SCRIPT: &str = r##"// Portfolio Website JavaScript
document.addEventListener('DOMContentLoaded', function() {
    document.querySelectorAll('a[href^="#"]').forEach(anchor => {
        anchor.addEventListener('click', function (e) {
            e.preventDefault();
            const target = document.querySelector(this.getAttribute('href'));
            if (target) {
                target.scrollIntoView({ behavior: 'smooth', block: 'start' });
            }
        });
    });

    const observer = new IntersectionObserver((entries) => {
        entries.forEach(entry => {
            if (entry.isIntersecting) {
                entry.target.classList.add('visible');
            }
        });
    }, { threshold: 0.1, rootMargin: '0px 0px -50px 0px' });

    document.querySelectorAll('.project-card, .skill-item, .tutorial-card, .social-link').forEach((element, index) => {
        element.classList.add('fade-in');
        element.style.animationDelay = (index * 0.1) + 's';
        observer.observe(element);
    });
});
"##;
