use std::path::Path;

use color_transfer::{Rect, SwatchRole, TransferOptions};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Commented default configuration written by `recolor init`.
pub const DEFAULT_CONFIG_YAML: &str = r#"# recolor configuration
#
# Command-line flags override the values below.

transfer:
  # Side of the square window used for the local contrast feature (odd)
  neighborhood_window: 5
  # Side of the texture synthesis window in swatch mode (odd)
  synthesis_window: 5
  # Jitter sampling grid. Leave unset to use the mode default
  # (15x15 for whole-image transfer, 8x8 per swatch pair), or give either
  # an explicit grid or an approximate sample count:
  # grid: { rows: 15, cols: 15 }
  # samples: 200
  # Fix the random seed for reproducible output
  # seed: 42
  # Maximum number of swatches per image
  max_swatches: 10

# Swatch pairs for `recolor swatch`. Swatches are paired in the order they
# are listed (first source with first target, ...), unless a tag is given.
# Coordinates are pixels; x2/y2 are exclusive and clipped to the image.
swatches: []
#  - { role: source, x1: 0, y1: 0, x2: 50, y2: 50 }
#  - { role: target, x1: 10, y1: 10, x2: 60, y2: 60 }
#  - { role: source, x1: 100, y1: 40, x2: 150, y2: 90, tag: blue }
#  - { role: target, x1: 80, y1: 80, x2: 130, y2: 130, tag: blue }
"#;

/// Application configuration loaded from a YAML (or JSON) file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Tunables for both transfer modes
    #[serde(default)]
    pub transfer: TransferConfig,

    /// Swatches for swatch-guided transfer, in creation order
    #[serde(default)]
    pub swatches: Vec<SwatchConfig>,
}

/// Which transfer mode options are built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    WholeImage,
    SwatchGuided,
}

/// Transfer tunables; unset values fall back to the mode preset
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransferConfig {
    #[serde(default = "default_window")]
    pub neighborhood_window: usize,

    #[serde(default = "default_window")]
    pub synthesis_window: usize,

    /// Explicit sampling grid; takes precedence over `samples`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridConfig>,

    /// Approximate sample count, rounded up to a square grid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(default = "default_max_swatches")]
    pub max_swatches: usize,
}

fn default_window() -> usize {
    5
}

fn default_max_swatches() -> usize {
    10
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            neighborhood_window: default_window(),
            synthesis_window: default_window(),
            grid: None,
            samples: None,
            seed: None,
            max_swatches: default_max_swatches(),
        }
    }
}

/// Sampling grid size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
}

impl std::str::FromStr for GridConfig {
    type Err = String;

    /// Parse `ROWSxCOLS`, e.g. `15x15`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (rows, cols) = value
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected ROWSxCOLS, got '{value}'"))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid grid size '{value}': {e}"))
        };
        Ok(Self {
            rows: parse(rows)?,
            cols: parse(cols)?,
        })
    }
}

/// Parse swatch bounds given as `x1,y1,x2,y2`.
pub fn parse_bounds(value: &str) -> Result<Rect, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid swatch bounds '{value}': {e}"))?;
    match parts.as_slice() {
        &[x1, y1, x2, y2] if x2 > x1 && y2 > y1 => Ok(Rect::new(x1, y1, x2, y2)),
        &[_, _, _, _] => Err(format!(
            "swatch bounds '{value}' need x2 > x1 and y2 > y1"
        )),
        _ => Err(format!("expected x1,y1,x2,y2, got '{value}'")),
    }
}

/// Role of a configured swatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleConfig {
    Source,
    Target,
}

impl From<RoleConfig> for SwatchRole {
    fn from(role: RoleConfig) -> Self {
        match role {
            RoleConfig::Source => SwatchRole::Source,
            RoleConfig::Target => SwatchRole::Target,
        }
    }
}

/// One swatch rectangle
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SwatchConfig {
    pub role: RoleConfig,
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,

    /// Palette tag name (`red`, `blue`, ...); assigned by order when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl SwatchConfig {
    pub fn new(role: RoleConfig, rect: Rect) -> Self {
        Self {
            role,
            x1: rect.x1,
            y1: rect.y1,
            x2: rect.x2,
            y2: rect.y2,
            tag: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x1, self.y1, self.x2, self.y2)
    }

    /// Pair rectangles in order: source 1, target 1, source 2, ...
    ///
    /// Leftover rectangles of the longer list are kept, so a count mismatch
    /// is still reported by the transfer.
    pub fn interleave(sources: &[Rect], targets: &[Rect]) -> Vec<Self> {
        let mut swatches = Vec::with_capacity(sources.len() + targets.len());
        for i in 0..sources.len().max(targets.len()) {
            if let Some(&rect) = sources.get(i) {
                swatches.push(Self::new(RoleConfig::Source, rect));
            }
            if let Some(&rect) = targets.get(i) {
                swatches.push(Self::new(RoleConfig::Target, rect));
            }
        }
        swatches
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub seed: Option<u64>,
    pub neighborhood_window: Option<usize>,
    pub synthesis_window: Option<usize>,
    /// Replaces both `grid` and `samples` from the file
    pub grid: Option<GridConfig>,
    /// Replaces both `grid` and `samples` from the file
    pub samples: Option<usize>,
    pub source_swatches: Vec<Rect>,
    pub target_swatches: Vec<Rect>,
}

impl TransferConfig {
    /// Build core options for `mode`, starting from that mode's preset.
    pub fn to_options(&self, mode: TransferMode) -> TransferOptions {
        let mut options = match mode {
            TransferMode::WholeImage => TransferOptions::whole_image(),
            TransferMode::SwatchGuided => TransferOptions::swatch_guided(),
        }
        .neighborhood_window(self.neighborhood_window)
        .synthesis_window(self.synthesis_window)
        .max_swatches(self.max_swatches);

        if let Some(grid) = self.grid {
            options = options.grid(grid.rows, grid.cols);
        } else if let Some(samples) = self.samples {
            options = options.samples(samples);
        }
        if let Some(seed) = self.seed {
            options = options.seed(seed);
        }
        options
    }
}

impl AppConfig {
    /// Parse configuration text. JSON is used when `json` is set, YAML otherwise.
    pub fn parse(content: &str, json: bool) -> Result<Self, AppError> {
        let config = if json {
            serde_json::from_str(content)?
        } else {
            serde_yaml::from_str(content)?
        };
        Ok(config)
    }

    /// Load configuration from a file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = Self::parse(&content, json)?;
        tracing::info!(
            path = %path.display(),
            swatches = config.swatches.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Merge command-line values over the loaded file.
    ///
    /// Swatch rectangles replace the configured swatches when either list is
    /// non-empty.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> Result<(), AppError> {
        if overrides.grid.is_some() && overrides.samples.is_some() {
            return Err(AppError::InvalidConfig(
                "grid and samples cannot both be given".to_string(),
            ));
        }

        let transfer = &mut self.transfer;
        if let Some(seed) = overrides.seed {
            transfer.seed = Some(seed);
        }
        if let Some(window) = overrides.neighborhood_window {
            transfer.neighborhood_window = window;
        }
        if let Some(window) = overrides.synthesis_window {
            transfer.synthesis_window = window;
        }
        if let Some(grid) = overrides.grid {
            transfer.grid = Some(grid);
            transfer.samples = None;
        }
        if let Some(samples) = overrides.samples {
            transfer.grid = None;
            transfer.samples = Some(samples);
        }

        if !overrides.source_swatches.is_empty() || !overrides.target_swatches.is_empty() {
            self.swatches =
                SwatchConfig::interleave(&overrides.source_swatches, &overrides.target_swatches);
        }
        Ok(())
    }

    /// Load `path` if given and present, otherwise use defaults.
    ///
    /// A missing file is not an error; a file that fails to parse is.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }
}
