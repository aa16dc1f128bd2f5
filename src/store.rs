use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::endpoint::Endpoint;
use crate::model::{ConsoleConfig, ConsoleState};

const STORE_DIR: &str = ".flowgate";
const HOME_ENV: &str = "FLOWGATE_HOME";

/// Local console state: `config.json` (settings) and `state.json` (sessions).
#[derive(Clone, Debug)]
pub struct ConsoleStore {
    root: PathBuf,
}

impl ConsoleStore {
    /// `$FLOWGATE_HOME`, else `$HOME/.flowgate`, else `./.flowgate`.
    pub fn default_root() -> PathBuf {
        if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(dir);
        }
        match std::env::var_os("HOME").filter(|v| !v.is_empty()) {
            Some(home) => PathBuf::from(home).join(STORE_DIR),
            None => PathBuf::from(STORE_DIR),
        }
    }

    pub fn open_default() -> Result<Self> {
        Self::open(&Self::default_root())
    }

    /// Opens the store at `root`, creating it with default files when absent.
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("create store dir {}", root.display()))?;
        let store = Self {
            root: root.to_path_buf(),
        };
        if !store.config_path().exists() {
            store.write_config(&ConsoleConfig::default())?;
        }
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join("console.log")
    }

    fn config_path(&self) -> PathBuf {
        self.root.join("config.json")
    }

    fn state_path(&self) -> PathBuf {
        self.root.join("state.json")
    }

    pub fn read_config(&self) -> Result<ConsoleConfig> {
        let bytes = fs::read(self.config_path()).context("read config.json")?;
        let cfg: ConsoleConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported console config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &ConsoleConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.config_path(), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn read_state(&self) -> Result<ConsoleState> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(ConsoleState::default());
        }
        let bytes = fs::read(&path).context("read state.json")?;
        let st: ConsoleState = serde_json::from_slice(&bytes).context("parse state.json")?;
        if st.version != 1 {
            anyhow::bail!("unsupported console state version {}", st.version);
        }
        Ok(st)
    }

    pub fn write_state(&self, st: &ConsoleState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize state")?;
        write_atomic(&self.state_path(), &bytes).context("write state.json")?;
        Ok(())
    }

    pub fn session_token(&self, endpoint: &Endpoint) -> Result<Option<String>> {
        let st = self.read_state()?;
        Ok(st.session_tokens.get(endpoint.base()).cloned())
    }

    pub fn set_session_token(&self, endpoint: &Endpoint, token: &str) -> Result<()> {
        let mut st = self.read_state()?;
        st.session_tokens
            .insert(endpoint.base().to_string(), token.trim().to_string());
        self.write_state(&st)
    }

    pub fn clear_session_token(&self, endpoint: &Endpoint) -> Result<()> {
        let mut st = self.read_state()?;
        st.session_tokens.remove(endpoint.base());
        self.write_state(&st)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
