use crate::error::{GrowWiseError, Result};
use crate::logic::chat::QueryRule;
use crate::logic::TreeParams;
use dialoguer::{Confirm, Input};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/crop_data.csv"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Unlimited when absent.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl ModelConfig {
    pub fn tree_params(&self) -> TreeParams {
        TreeParams {
            // Depth 0 in a hand-edited file means "no limit", as in `init`
            max_depth: self.max_depth.filter(|&d| d > 0),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    /// Appended after the built-in rules.
    #[serde(default)]
    pub rules: Vec<QueryRule>,
}

impl Config {
    /// Load from `config_override`, or from the first standard location that
    /// exists. With no override and no file anywhere, built-in defaults are used.
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(GrowWiseError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p.to_path_buf()
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        tracing::debug!("Loading config from {}", config_path.display());
        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| GrowWiseError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content)?;

        serde_yaml::from_str(&content)
            .map_err(|e| GrowWiseError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Try XDG config directory
        let xdg_config = dirs::config_dir()?.join("growwise").join("config.yaml");
        xdg_config.exists().then_some(xdg_config)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&Path>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path().is_some(),
        }
    }

    /// Default path for writing new config files (~/.config/growwise/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GrowWiseError::Config("Cannot determine config directory".into()))?
            .join("growwise");
        Ok(config_dir.join("config.yaml"))
    }

    /// Dataset location: CLI override, then `GROWWISE_DATASET`, then config.
    pub fn dataset_path(&self, dataset_override: Option<&Path>) -> PathBuf {
        if let Some(p) = dataset_override {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("GROWWISE_DATASET") {
            if !p.is_empty() {
                return PathBuf::from(p);
            }
        }
        self.dataset.path.clone()
    }

    /// Where `init` writes: the `--config` path, else the XDG default.
    pub fn init_path(target: Option<&Path>) -> Result<PathBuf> {
        match target {
            Some(p) => Ok(p.to_path_buf()),
            None => Self::default_config_path(),
        }
    }

    /// Question to ask before `init` replaces an existing file.
    pub fn overwrite_prompt(path: &Path) -> Option<String> {
        path.exists()
            .then(|| format!("Config already exists at {}. Overwrite it?", path.display()))
    }

    /// True when `path` is free, or the user agreed to replace it.
    pub fn confirm_overwrite(path: &Path) -> Result<bool> {
        let Some(prompt) = Self::overwrite_prompt(path) else {
            return Ok(true);
        };
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| GrowWiseError::Config(format!("Input error: {}", e)))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the config and the path it was written to.
    pub fn setup_interactive(target: Option<&Path>) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up GrowWise!");
        println!();

        println!("Dataset");
        let dataset_path: String = Input::new()
            .with_prompt("  Training CSV path")
            .default("data/crop_data.csv".into())
            .interact_text()
            .map_err(|e| GrowWiseError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Decision tree (0 = unlimited depth)");
        let max_depth: usize = Input::new()
            .with_prompt("  Max depth")
            .default(0)
            .interact_text()
            .map_err(|e| GrowWiseError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            dataset: DatasetConfig {
                path: PathBuf::from(dataset_path),
            },
            model: ModelConfig {
                max_depth: (max_depth > 0).then_some(max_depth),
            },
            chat: ChatConfig::default(),
        };

        let config_path = Self::init_path(target)?;
        config.write(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| GrowWiseError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# GrowWise Configuration\n# Generated by `growwise init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| GrowWiseError::Config(format!("Bad substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("data/crop_data.csv"));
        assert_eq!(config.model.max_depth, None);
        assert!(config.chat.rules.is_empty());
    }

    #[test]
    fn parses_full_config() {
        let yaml = r#"
dataset:
  path: /srv/crops.csv
model:
  max_depth: 8
chat:
  rules:
    - name: banana
      triggers: ["banana"]
      response: "Bananas like it warm."
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("/srv/crops.csv"));
        assert_eq!(config.model.max_depth, Some(8));
        assert_eq!(config.chat.rules.len(), 1);
        assert_eq!(config.chat.rules[0].triggers, vec!["banana".to_string()]);
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("GROWWISE_TEST_DATA_DIR", "/tmp/growwise-test");
        let yaml = "dataset:\n  path: ${GROWWISE_TEST_DATA_DIR}/crop_data.csv\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(
            config.dataset.path,
            PathBuf::from("/tmp/growwise-test/crop_data.csv")
        );
    }

    #[test]
    fn unset_env_var_is_left_alone() {
        let yaml = "dataset:\n  path: ${GROWWISE_TEST_SURELY_UNSET}/x.csv\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(
            config.dataset.path,
            PathBuf::from("${GROWWISE_TEST_SURELY_UNSET}/x.csv")
        );
    }

    #[test]
    fn invalid_yaml_is_config_error() {
        let err = Config::from_yaml("model: [unclosed").unwrap_err();
        assert!(matches!(err, GrowWiseError::Config(_)));
    }

    #[test]
    fn tree_params_treat_zero_depth_as_unlimited() {
        let model = ModelConfig { max_depth: Some(3) };
        assert_eq!(model.tree_params().max_depth, Some(3));
        let model = ModelConfig { max_depth: Some(0) };
        assert_eq!(model.tree_params().max_depth, None);
    }

    #[test]
    fn dataset_override_wins() {
        let config = Config::default();
        let path = config.dataset_path(Some(Path::new("other.csv")));
        assert_eq!(path, PathBuf::from("other.csv"));
    }

    #[test]
    fn dataset_env_var_sits_between_cli_and_config() {
        // The only test that touches GROWWISE_DATASET
        let config = Config::from_yaml("dataset:\n  path: from-config.csv\n").unwrap();

        std::env::set_var("GROWWISE_DATASET", "from-env.csv");
        assert_eq!(config.dataset_path(None), PathBuf::from("from-env.csv"));
        assert_eq!(
            config.dataset_path(Some(Path::new("from-cli.csv"))),
            PathBuf::from("from-cli.csv")
        );

        std::env::set_var("GROWWISE_DATASET", "");
        assert_eq!(config.dataset_path(None), PathBuf::from("from-config.csv"));

        std::env::remove_var("GROWWISE_DATASET");
        assert_eq!(config.dataset_path(None), PathBuf::from("from-config.csv"));
    }

    #[test]
    fn init_asks_before_replacing_existing_file() {
        let file = NamedTempFile::new().unwrap();
        let path = Config::init_path(Some(file.path())).unwrap();
        assert_eq!(path, file.path());

        let prompt = Config::overwrite_prompt(&path).unwrap();
        assert!(prompt.contains(&file.path().display().to_string()));
        assert!(prompt.contains("Overwrite"));

        let fresh = file.path().with_extension("new.yaml");
        assert!(Config::overwrite_prompt(&fresh).is_none());
        assert!(Config::confirm_overwrite(&fresh).unwrap());
    }

    #[test]
    fn write_then_load() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.model.max_depth = Some(5);
        config.write(file.path()).unwrap();

        let loaded = Config::load(Some(file.path())).unwrap();
        assert_eq!(loaded.model.max_depth, Some(5));
        assert_eq!(loaded.dataset.path, config.dataset.path);
    }

    #[test]
    fn missing_override_is_error() {
        let err = Config::load(Some(Path::new("/nonexistent/growwise.yaml"))).unwrap_err();
        assert!(matches!(err, GrowWiseError::Config(_)));
    }
}
