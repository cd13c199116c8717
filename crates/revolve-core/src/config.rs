use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Effective carousel configuration for one tick.
///
/// Built by [`ConfigResolver`] from defaults, explicit per-instance
/// options and the active breakpoint override; the engine treats it as
/// immutable between layout updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselOptions {
    /// Count of items shown per view. May be fractional (e.g. 1.5 shows
    /// half of the next slide). Always at least 1.
    #[serde(default = "default_items_to_show")]
    pub items_to_show: f64,
    /// Count of items to advance per navigation step
    #[serde(default = "default_items_to_slide")]
    pub items_to_slide: i64,
    /// Index of the slide shown after mount
    #[serde(default)]
    pub initial_slide: i64,
    /// Seamless wraparound using a clone buffer
    #[serde(default)]
    pub infinite_scroll: bool,
    /// Center the current slide in the container
    #[serde(default)]
    pub center_mode: bool,
    /// Slide along the vertical axis
    #[serde(default)]
    pub vertical: bool,
    /// Right-to-left mode; unset derives from the layout direction at mount
    #[serde(default)]
    pub rtl: Option<bool>,
    /// Advance automatically on a timer
    #[serde(default)]
    pub auto_play: bool,
    /// Autoplay interval in milliseconds
    #[serde(default = "default_play_speed")]
    pub play_speed_ms: u64,
    /// Allow dragging with the mouse
    #[serde(default = "default_true")]
    pub mouse_drag: bool,
    /// Allow dragging with touch input
    #[serde(default = "default_true")]
    pub touch_drag: bool,
    /// Navigate from wheel events
    #[serde(default = "default_true")]
    pub wheel_control: bool,
    /// Navigate from arrow keys
    #[serde(default = "default_true")]
    pub keys_control: bool,
    /// Commit a slide on any movement (tolerance 0.5 instead of 0.15)
    #[serde(default = "default_true")]
    pub short_drag: bool,
    /// Slide transition time in milliseconds
    #[serde(default = "default_transition")]
    pub transition_ms: u64,
    /// Pause autoplay while hovered
    #[serde(default = "default_true")]
    pub hover_pause: bool,
    /// Suppress navigation into the empty space after the last full page
    #[serde(default)]
    pub trim_white_space: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            items_to_show: default_items_to_show(),
            items_to_slide: default_items_to_slide(),
            initial_slide: 0,
            infinite_scroll: false,
            center_mode: false,
            vertical: false,
            rtl: None,
            auto_play: false,
            play_speed_ms: default_play_speed(),
            mouse_drag: default_true(),
            touch_drag: default_true(),
            wheel_control: default_true(),
            keys_control: default_true(),
            short_drag: default_true(),
            transition_ms: default_transition(),
            hover_pause: default_true(),
            trim_white_space: false,
        }
    }
}

impl CarouselOptions {
    pub fn play_speed(&self) -> Duration {
        Duration::from_millis(self.play_speed_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// Partial configuration override: the `settings` object and breakpoint
/// entries are both expressed as patches over [`CarouselOptions`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsPatch {
    #[serde(default)]
    pub items_to_show: Option<f64>,
    #[serde(default)]
    pub items_to_slide: Option<i64>,
    #[serde(default)]
    pub initial_slide: Option<i64>,
    #[serde(default)]
    pub infinite_scroll: Option<bool>,
    #[serde(default)]
    pub center_mode: Option<bool>,
    #[serde(default)]
    pub vertical: Option<bool>,
    #[serde(default)]
    pub rtl: Option<bool>,
    #[serde(default)]
    pub auto_play: Option<bool>,
    #[serde(default)]
    pub play_speed_ms: Option<u64>,
    #[serde(default)]
    pub mouse_drag: Option<bool>,
    #[serde(default)]
    pub touch_drag: Option<bool>,
    #[serde(default)]
    pub wheel_control: Option<bool>,
    #[serde(default)]
    pub keys_control: Option<bool>,
    #[serde(default)]
    pub short_drag: Option<bool>,
    #[serde(default)]
    pub transition_ms: Option<u64>,
    #[serde(default)]
    pub hover_pause: Option<bool>,
    #[serde(default)]
    pub trim_white_space: Option<bool>,
}

impl OptionsPatch {
    /// Overlay every set field onto `options`.
    pub fn apply(&self, options: &mut CarouselOptions) {
        if let Some(v) = self.items_to_show {
            options.items_to_show = v;
        }
        if let Some(v) = self.items_to_slide {
            options.items_to_slide = v;
        }
        if let Some(v) = self.initial_slide {
            options.initial_slide = v;
        }
        if let Some(v) = self.infinite_scroll {
            options.infinite_scroll = v;
        }
        if let Some(v) = self.center_mode {
            options.center_mode = v;
        }
        if let Some(v) = self.vertical {
            options.vertical = v;
        }
        if let Some(v) = self.rtl {
            options.rtl = Some(v);
        }
        if let Some(v) = self.auto_play {
            options.auto_play = v;
        }
        if let Some(v) = self.play_speed_ms {
            options.play_speed_ms = v;
        }
        if let Some(v) = self.mouse_drag {
            options.mouse_drag = v;
        }
        if let Some(v) = self.touch_drag {
            options.touch_drag = v;
        }
        if let Some(v) = self.wheel_control {
            options.wheel_control = v;
        }
        if let Some(v) = self.keys_control {
            options.keys_control = v;
        }
        if let Some(v) = self.short_drag {
            options.short_drag = v;
        }
        if let Some(v) = self.transition_ms {
            options.transition_ms = v;
        }
        if let Some(v) = self.hover_pause {
            options.hover_pause = v;
        }
        if let Some(v) = self.trim_white_space {
            options.trim_white_space = v;
        }
    }

    /// Overlay every set field of `other` onto this patch. Used to stack
    /// the config-file patch, JSON settings and command-line flags.
    pub fn merge(&mut self, other: &OptionsPatch) {
        self.items_to_show = other.items_to_show.or(self.items_to_show);
        self.items_to_slide = other.items_to_slide.or(self.items_to_slide);
        self.initial_slide = other.initial_slide.or(self.initial_slide);
        self.infinite_scroll = other.infinite_scroll.or(self.infinite_scroll);
        self.center_mode = other.center_mode.or(self.center_mode);
        self.vertical = other.vertical.or(self.vertical);
        self.rtl = other.rtl.or(self.rtl);
        self.auto_play = other.auto_play.or(self.auto_play);
        self.play_speed_ms = other.play_speed_ms.or(self.play_speed_ms);
        self.mouse_drag = other.mouse_drag.or(self.mouse_drag);
        self.touch_drag = other.touch_drag.or(self.touch_drag);
        self.wheel_control = other.wheel_control.or(self.wheel_control);
        self.keys_control = other.keys_control.or(self.keys_control);
        self.short_drag = other.short_drag.or(self.short_drag);
        self.transition_ms = other.transition_ms.or(self.transition_ms);
        self.hover_pause = other.hover_pause.or(self.hover_pause);
        self.trim_white_space = other.trim_white_space.or(self.trim_white_space);
    }
}

/// Responsive overrides keyed by a minimum viewport width.
///
/// At most one entry is active at a time: the largest threshold satisfied
/// by the current viewport width.
#[derive(Debug, Clone, Default)]
pub struct Breakpoints(BTreeMap<u32, OptionsPatch>);

impl Breakpoints {
    pub fn new(table: BTreeMap<u32, OptionsPatch>) -> Self {
        Self(table)
    }

    /// Build from a string-keyed table (config files keep thresholds as
    /// strings). Keys that do not parse as widths are skipped, so a
    /// malformed table degrades to "no match".
    pub fn from_string_keys(table: &BTreeMap<String, OptionsPatch>) -> Self {
        let mut parsed = BTreeMap::new();
        for (key, patch) in table {
            match key.parse::<u32>() {
                Ok(width) => {
                    parsed.insert(width, patch.clone());
                }
                Err(_) => {
                    tracing::warn!(key, "ignoring non-numeric breakpoint threshold");
                }
            }
        }
        Self(parsed)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The override for the largest threshold not exceeding `viewport_width`.
    pub fn matching(&self, viewport_width: f64) -> Option<(u32, &OptionsPatch)> {
        self.0
            .iter()
            .rev()
            .find(|(threshold, _)| viewport_width >= **threshold as f64)
            .map(|(threshold, patch)| (*threshold, patch))
    }
}

/// Merges defaults, explicit options and breakpoint overrides into one
/// effective [`CarouselOptions`] snapshot.
///
/// Resolution always restarts from the base (defaults merged with the
/// explicit `settings` patch) so a breakpoint that stops matching leaves
/// no stale fields behind.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    base: CarouselOptions,
    breakpoints: Breakpoints,
}

impl ConfigResolver {
    pub fn new(options: CarouselOptions, settings: OptionsPatch, breakpoints: Breakpoints) -> Self {
        let mut base = options;
        settings.apply(&mut base);
        base.items_to_show = base.items_to_show.max(1.0);
        Self { base, breakpoints }
    }

    /// The effective configuration before any breakpoint applies.
    pub fn base(&self) -> &CarouselOptions {
        &self.base
    }

    pub fn resolve(&self, viewport_width: f64) -> CarouselOptions {
        let mut config = self.base.clone();
        if let Some((threshold, patch)) = self.breakpoints.matching(viewport_width) {
            patch.apply(&mut config);
            tracing::debug!(threshold, viewport_width, "breakpoint override active");
        }
        config.items_to_show = config.items_to_show.max(1.0);
        config
    }
}

/// Application configuration for the demo binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Carousel options applied over the built-in defaults
    #[serde(default)]
    pub carousel: OptionsPatch,
    /// Viewport-width thresholds (as strings) to option overrides
    #[serde(default)]
    pub breakpoints: BTreeMap<String, OptionsPatch>,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Number of demo slides
    #[serde(default = "default_slide_count")]
    pub slide_count: usize,
    /// Group name shared by the hero carousel and the thumbnail rail
    #[serde(default = "default_group")]
    pub group: String,
    /// Render the synced thumbnail rail
    #[serde(default = "default_true")]
    pub thumbnails: bool,
    /// Show pagination as "current / total" instead of one dot per slide
    #[serde(default)]
    pub fraction_pagination: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            slide_count: default_slide_count(),
            group: default_group(),
            thumbnails: default_true(),
            fraction_pagination: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Configuration file path: ~/.config/revolve/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("revolve")
            .join("config.toml")
    }

    pub fn breakpoints(&self) -> Breakpoints {
        Breakpoints::from_string_keys(&self.breakpoints)
    }
}

fn default_items_to_show() -> f64 {
    1.0
}

fn default_items_to_slide() -> i64 {
    1
}

fn default_play_speed() -> u64 {
    2000
}

fn default_transition() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_rate() -> u64 {
    16
}

fn default_slide_count() -> usize {
    6
}

fn default_group() -> String {
    "demo".to_string()
}
