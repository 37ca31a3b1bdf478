use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$CARDCYCLE_HOME`, or `~/.cardcycle` when unset.
pub fn cardcycle_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("CARDCYCLE_HOME") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".cardcycle"))
}

pub fn ensure_cardcycle_home() -> Result<PathBuf> {
    let dir = cardcycle_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Card list used when neither `--file` nor `--api` is given.
pub fn default_cards_path() -> Result<PathBuf> {
    Ok(cardcycle_home()?.join("cards.json"))
}
