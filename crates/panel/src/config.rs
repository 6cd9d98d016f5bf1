use query::{ParseError, Selector};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything host-specific lives here: the selectors that locate host
/// elements, the marker class, and the tuning knobs. Hosts churn their
/// markup, so these are operator-editable data, not code.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// The panel region the slim layout narrows.
    pub side_panel: String,
    /// The grid container whose column template changes in lockstep.
    pub main_grid: String,
    /// Where the toggle control lives; the control is kept at its head.
    pub anchor: String,

    pub marker_class: String,
    pub control_id: String,
    pub style_id: String,
    pub pref_key: String,

    /// One-shot delay before the extra startup detection pass. Empirically
    /// tuned per host; a knob, not a constant.
    pub settle_delay_ms: u64,
    pub slim_width_px: u32,

    pub collapse_glyph: String,
    pub collapse_tooltip: String,
    pub expand_glyph: String,
    pub expand_tooltip: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            side_panel: r#"div[class*="side-panel"]"#.to_string(),
            main_grid: r#"div[class*="app-grid"]"#.to_string(),
            anchor: r#"header[data-role="nav"] > div > div:first-child"#.to_string(),
            marker_class: "side-panel-collapsed".to_string(),
            control_id: "slim-toggle".to_string(),
            style_id: "slim-style".to_string(),
            pref_key: "side_panel_collapsed".to_string(),
            settle_delay_ms: 1100,
            slim_width_px: 110,
            collapse_glyph: "⬅".to_string(),
            collapse_tooltip: "Slim panel".to_string(),
            expand_glyph: "➡".to_string(),
            expand_tooltip: "Expand panel".to_string(),
        }
    }
}

impl PanelConfig {
    /// Control glyph for a given collapsed state: the affordance points at
    /// the state a click would produce.
    pub fn glyph(&self, collapsed: bool) -> &str {
        if collapsed {
            &self.expand_glyph
        } else {
            &self.collapse_glyph
        }
    }

    pub fn tooltip(&self, collapsed: bool) -> &str {
        if collapsed {
            &self.expand_tooltip
        } else {
            &self.collapse_tooltip
        }
    }

    /// Parse the selectors once, up front. The side-panel and grid
    /// selectors are consumed verbatim by the stylesheet; they are parsed
    /// here only so a typo surfaces at load time instead of silently
    /// producing dead presentation rules.
    pub fn resolve(self) -> Result<ResolvedConfig, ConfigError> {
        let anchor = parse_field("anchor", &self.anchor)?;
        parse_field("side_panel", &self.side_panel)?;
        parse_field("main_grid", &self.main_grid)?;
        Ok(ResolvedConfig {
            panel: self,
            anchor,
        })
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<Selector, ConfigError> {
    Selector::parse(raw).map_err(|err| ConfigError::Selector { field, err })
}

/// A [`PanelConfig`] with its anchor selector parsed.
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub panel: PanelConfig,
    pub anchor: Selector,
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, err: std::io::Error },
    Toml { path: PathBuf, err: toml::de::Error },
    Selector { field: &'static str, err: ParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, err } => write!(f, "cannot read {}: {err}", path.display()),
            ConfigError::Toml { path, err } => write!(f, "cannot parse {}: {err}", path.display()),
            ConfigError::Selector { field, err } => {
                write!(f, "config selector `{field}` is invalid: {err}")
            }
        }
    }
}

/// Load a TOML config file. Only the binary calls this; the engine itself
/// is handed a resolved config and never touches the filesystem.
pub fn load_config(path: &Path) -> Result<PanelConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|err| ConfigError::Io {
        path: path.to_path_buf(),
        err,
    })?;
    toml::from_str(&content).map_err(|err| ConfigError::Toml {
        path: path.to_path_buf(),
        err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_resolves() {
        assert!(PanelConfig::default().resolve().is_ok());
    }

    #[test]
    fn bad_anchor_selector_is_rejected_by_field() {
        let cfg = PanelConfig {
            anchor: "header >".to_string(),
            ..PanelConfig::default()
        };
        match cfg.resolve() {
            Err(ConfigError::Selector { field, .. }) => assert_eq!(field, "anchor"),
            other => panic!("expected selector error, got {other:?}"),
        }
    }

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let cfg: PanelConfig = toml::from_str(
            r#"
            anchor = 'nav > div:first-child'
            settle_delay_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(cfg.anchor, "nav > div:first-child");
        assert_eq!(cfg.settle_delay_ms, 250);
        // Untouched fields keep their defaults.
        assert_eq!(cfg.slim_width_px, 110);
    }

    #[test]
    fn glyph_and_tooltip_follow_the_flag() {
        let cfg = PanelConfig::default();
        assert_eq!(cfg.glyph(false), "⬅");
        assert_eq!(cfg.tooltip(false), "Slim panel");
        assert_eq!(cfg.glyph(true), "➡");
        assert_eq!(cfg.tooltip(true), "Expand panel");
    }
}
