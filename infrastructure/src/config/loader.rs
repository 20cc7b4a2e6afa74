//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

const PROJECT_FILENAMES: [&str; 2] = ["persevan.toml", ".persevan.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `PERSEVAN_*` environment variables (`PERSEVAN_SESSION__DEFAULT_MODE=interview`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./persevan.toml` or `./.persevan.toml`
    /// 4. Global config: `$XDG_CONFIG_HOME/persevan/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("PERSEVAN_").split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/persevan/config.toml if set,
    /// otherwise falls back to ~/.config/persevan/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("persevan").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILENAMES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] PERSEVAN_* environment variables");

        if let Some(path) = explicit {
            let tag = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", tag, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./persevan.toml or ./.persevan.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }

    /// Render the effective configuration as TOML
    pub fn render(config: &FileConfig) -> String {
        toml::to_string_pretty(config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persevan_domain::{ConsoleMode, Model};
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.model.name, Model::Gemini3Pro);
        assert_eq!(config.session.default_mode, ConsoleMode::Study);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("persevan"));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[model]\nname = \"gemini-2.5-flash\"\n\n[session]\ntimeout_seconds = 42"
        )
        .unwrap();

        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.model.name, Model::Gemini25Flash);
        assert_eq!(config.session.timeout_seconds, 42);
        assert!(config.output.color);
    }

    #[test]
    fn test_render_round_trips() {
        let rendered = ConfigLoader::render(&FileConfig::default());
        assert!(rendered.contains("[session]"));
        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.model.name, Model::Gemini3Pro);
    }
}
