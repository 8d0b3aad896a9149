//! Command layer of the `folio` binary.
//!
//! Each invocation imports the configuration document into a fresh
//! [`BuilderSession`], runs one command, and writes the document back if the
//! command changed anything.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use folio_engine::BuilderSession;
use folio_model::FieldMap;
use folio_site::SiteBundle;
use folio_types::{ComponentId, ComponentType, Direction};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Build a portfolio page from content blocks")]
pub struct Cli {
    /// Configuration document to work on
    #[arg(
        short,
        long,
        env = "FOLIO_CONFIG",
        default_value = "portfolio-config.json",
        global = true
    )]
    pub config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write an empty configuration document
    Init {
        /// Overwrite an existing document
        #[arg(long)]
        force: bool,
    },
    /// List components in page order
    List,
    /// Add a component and print its id
    Add {
        /// project-card, skill-item, tutorial-card, social-link, update-item or knowledge-category
        component_type: ComponentType,
        /// Field value as name=value
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Change field values of a component
    Edit {
        id: ComponentId,
        #[arg(short, long = "field", value_parser = parse_field, required = true)]
        fields: Vec<(String, String)>,
    },
    /// Delete a component
    Delete { id: ComponentId },
    /// Copy a component and print the copy's id
    Duplicate { id: ComponentId },
    /// Move a component up or down within its section
    Move { id: ComponentId, direction: Direction },
    /// Change theme colors or dark mode
    Style {
        #[arg(long)]
        primary: Option<String>,
        #[arg(long)]
        accent: Option<String>,
        #[arg(long)]
        dark_mode: Option<bool>,
    },
    /// Export the configuration (to a dated file by default)
    Export {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Write index.html, style.css and script.js
    Site {
        #[arg(short, long)]
        out: PathBuf,
    },
}

/// Parses a `name=value` pair.
pub fn parse_field(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{s}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in `{s}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Opens a session from the document at `path`. A missing file yields an
/// empty session.
pub async fn load_session(path: &Path) -> Result<BuilderSession> {
    let mut session = BuilderSession::with_defaults()?;
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        info!("{} not found, starting empty", path.display());
        return Ok(session);
    }
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let count = session
        .import_document(&text)
        .with_context(|| format!("Failed to import {}", path.display()))?;
    debug!("Loaded {} components from {}", count, path.display());
    Ok(session)
}

/// Exports the session to `path`.
pub async fn save_session(session: &mut BuilderSession, path: &Path) -> Result<()> {
    let text = session.export_document()?;
    tokio::fs::write(path, text)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("Saved {} components to {}", session.len(), path.display());
    Ok(())
}

/// Runs a command and returns the lines to print.
pub async fn run(cli: &Cli) -> Result<Vec<String>> {
    let path = cli.config.as_path();

    if let Command::Init { force } = &cli.command {
        if !force && tokio::fs::try_exists(path).await.unwrap_or(false) {
            bail!("{} already exists (use --force to overwrite)", path.display());
        }
        let mut session = BuilderSession::with_defaults()?;
        save_session(&mut session, path).await?;
        return Ok(vec![format!("Initialized {}", path.display())]);
    }

    let mut session = load_session(path).await?;
    let mut changed = true;
    let lines = match &cli.command {
        Command::Init { .. } => Vec::new(),
        Command::List => {
            changed = false;
            list(&mut session)
        }
        Command::Add {
            component_type,
            fields,
        } => {
            let initial = (!fields.is_empty()).then(|| to_field_map(fields));
            vec![session.add(*component_type, initial)?.to_string()]
        }
        Command::Edit { id, fields } => {
            session.edit(id, &to_field_map(fields))?;
            vec![format!("Updated {id}")]
        }
        Command::Delete { id } => {
            session.delete(id)?;
            vec![format!("Deleted {id}")]
        }
        Command::Duplicate { id } => vec![session.duplicate(id)?.to_string()],
        Command::Move { id, direction } => {
            if session.move_component(id, *direction)? {
                vec![format!("Moved {id} {direction}")]
            } else {
                changed = false;
                vec![format!("{id} cannot move further {direction}")]
            }
        }
        Command::Style {
            primary,
            accent,
            dark_mode,
        } => {
            if primary.is_some() || accent.is_some() {
                session.set_colors(primary.as_deref(), accent.as_deref());
            }
            if let Some(dark_mode) = dark_mode {
                session.set_dark_mode(*dark_mode);
            }
            let settings = session.settings();
            vec![format!(
                "primary {} accent {} dark mode {}",
                settings.colors.primary, settings.colors.accent, settings.dark_mode
            )]
        }
        Command::Export { out } => {
            changed = false;
            let target = out
                .clone()
                .unwrap_or_else(|| PathBuf::from(session.export_filename()));
            save_session(&mut session, &target).await?;
            vec![format!("Exported to {}", target.display())]
        }
        Command::Site { out } => {
            changed = false;
            let written = SiteBundle::from_session(&session)
                .and_then(|bundle| bundle.write_to_dir(out))
                .with_context(|| format!("Failed to write site to {}", out.display()))?;
            written
                .iter()
                .map(|p| format!("Wrote {}", p.display()))
                .collect()
        }
    };

    if changed {
        save_session(&mut session, path).await?;
    }
    Ok(lines)
}

fn list(session: &mut BuilderSession) -> Vec<String> {
    let snapshot = session.snapshot();
    if snapshot.is_empty() {
        return vec!["No components".to_string()];
    }
    snapshot
        .components
        .iter()
        .map(|r| {
            format!(
                "{}\t{}\t{}\t{}",
                r.sort_key(),
                r.component_type,
                r.id,
                r.field("title").unwrap_or_default()
            )
        })
        .collect()
}

fn to_field_map(fields: &[(String, String)]) -> FieldMap {
    fields.iter().cloned().collect()
}
