//! `chess-desk engines ...`

use std::io::Write;

use engine_registry::{open_folder, probe_all, EngineForm, EngineRegistry, EngineRow, ENGINES_DIR};

use crate::config::Config;

/// Field overrides for `engines edit`; `None` keeps the current value.
/// The `clear_*` flags drop an optional field, a blank image does too.
#[derive(Debug, Clone, Default)]
pub struct EngineEdit {
    pub name: Option<String>,
    pub path: Option<String>,
    pub image: Option<String>,
    pub elo: Option<u32>,
    pub clear_image: bool,
    pub clear_elo: bool,
}

impl EngineEdit {
    pub fn apply(self, mut form: EngineForm) -> EngineForm {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(path) = self.path {
            form.path = path;
        }
        if self.clear_image {
            form.image = None;
        } else if let Some(image) = self.image {
            form.image = Some(image).filter(|image| !image.trim().is_empty());
        }
        if self.clear_elo {
            form.elo = None;
        } else if let Some(elo) = self.elo {
            form.elo = Some(elo);
        }
        form
    }
}

pub async fn list<W: Write>(config: &Config, out: &mut W) -> anyhow::Result<()> {
    let registry = EngineRegistry::open(&config.data_dir)?;
    let rows = probe_all(registry.engines()).await;
    write!(out, "{}", format_rows(&rows))?;
    Ok(())
}

/// Engine table: name (with missing-file marker), elo, path.
pub fn format_rows(rows: &[EngineRow]) -> String {
    if rows.is_empty() {
        return "No engines configured. Add one with `chess-desk engines add`.\n".to_string();
    }

    let labels: Vec<String> = rows.iter().map(EngineRow::label).collect();
    let width = labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max("Engine".len());

    let mut out = format!("{:<width$}  {:>5}  {}\n", "Engine", "Elo", "Path");
    for (row, label) in rows.iter().zip(&labels) {
        let elo = row.engine.elo.map(|e| e.to_string()).unwrap_or_default();
        out.push_str(&format!(
            "{:<width$}  {:>5}  {}\n",
            label,
            elo,
            row.engine.path.display()
        ));
    }
    out
}

pub fn add(config: &Config, form: EngineForm) -> anyhow::Result<()> {
    let mut registry = EngineRegistry::open(&config.data_dir)?;
    let engine = registry.add(form)?;
    println!("Added engine \"{}\"", engine.name);
    Ok(())
}

pub fn edit(config: &Config, name: &str, changes: EngineEdit) -> anyhow::Result<()> {
    let mut registry = EngineRegistry::open(&config.data_dir)?;
    let current = registry
        .get(name)
        .map(EngineForm::from_engine)
        .ok_or_else(|| anyhow::anyhow!("No engine named \"{name}\""))?;

    let engine = registry.edit(name, changes.apply(current))?;
    println!("Updated engine \"{}\"", engine.name);
    Ok(())
}

pub fn remove(config: &Config, name: &str) -> anyhow::Result<()> {
    let mut registry = EngineRegistry::open(&config.data_dir)?;
    match registry.delete(name)? {
        0 => println!("No engine named \"{name}\""),
        n => println!("Removed {n} engine(s) named \"{name}\""),
    }
    Ok(())
}

pub async fn open_engines_folder(config: &Config) -> anyhow::Result<()> {
    let dir = open_folder(&config.data_dir, ENGINES_DIR, &config.opener).await?;
    println!("{}", dir.display());
    Ok(())
}
