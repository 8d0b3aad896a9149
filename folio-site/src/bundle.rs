use crate::{SiteResult, assets, strip};
use folio_dom::{Document, html};
use folio_engine::BuilderSession;
use folio_model::Settings;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const INDEX_HTML: &str = "index.html";
pub const STYLE_CSS: &str = "style.css";
pub const SCRIPT_JS: &str = "script.js";

/// The three files of an exported site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteBundle {
    pub index_html: String,
    pub style_css: String,
    pub script_js: String,
}

impl SiteBundle {
    /// Renders a page tree. The tree itself is not modified; stripping
    /// happens on a copy.
    pub fn render(page: &Document, settings: &Settings) -> SiteResult<Self> {
        let mut copy = page.clone();
        let root = copy.root();
        strip::strip_editor_markup(&mut copy, root)?;

        let body = html::inner_html(&copy, root, 1);
        let index_html = format!(
            r#"<!DOCTYPE html>
<html lang="de">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Portfolio</title>
    <link rel="stylesheet" href="{STYLE_CSS}">
</head>
<body>
{body}    <script src="{SCRIPT_JS}"></script>
</body>
</html>
"#
        );
        Ok(Self {
            index_html,
            style_css: assets::stylesheet(settings),
            script_js: assets::SCRIPT.to_string(),
        })
    }

    /// Renders the session's current page and settings.
    pub fn from_session(session: &BuilderSession) -> SiteResult<Self> {
        Self::render(session.document(), session.settings())
    }

    /// Writes the bundle into `dir`, creating it if needed. Returns the written paths.
    pub fn write_to_dir(&self, dir: &Path) -> SiteResult<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(3);
        for (name, contents) in [
            (INDEX_HTML, &self.index_html),
            (STYLE_CSS, &self.style_css),
            (SCRIPT_JS, &self.script_js),
        ] {
            let path = dir.join(name);
            fs::write(&path, contents)?;
            written.push(path);
        }
        info!("Wrote site to {}", dir.display());
        Ok(written)
    }
}
