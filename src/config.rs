//! Site configuration, supplied once by the host page via `configure()`.
//!
//! Widgets read the installed configuration when they mount; without a call to
//! `configure()` the built-in defaults apply.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::game::GameRules;
use crate::radar::RadarOptions;
use crate::skills::{self, Skill};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Radar axis order follows this list.
    pub skills: Vec<Skill>,
    pub radar: RadarOptions,
    pub game: GameRules,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            skills: skills::default_skills(),
            radar: RadarOptions::default(),
            game: GameRules::default(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate. Missing sections keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: SiteConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        skills::validate(&self.skills)?;
        self.game.validate()
    }
}

thread_local! {
    static SITE_CONFIG: RefCell<Option<SiteConfig>> = const { RefCell::new(None) };
}

pub fn install(cfg: SiteConfig) {
    log::info!(
        "configuration installed: {} skills, {}s game",
        cfg.skills.len(),
        cfg.game.duration_secs
    );
    SITE_CONFIG.with(|cell| cell.replace(Some(cfg)));
}

/// The installed configuration, or the defaults.
pub fn current() -> SiteConfig {
    SITE_CONFIG.with(|cell| cell.borrow().clone().unwrap_or_default())
}
