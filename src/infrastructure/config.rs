use crate::domain::downsample::DEFAULT_MAX_POINTS;
use crate::domain::geometry::PlotRect;
use crate::domain::style::{DisplayMode, UnknownDisplayMode};
use chrono_tz::Tz;
use config::builder::{ConfigBuilder, DefaultState};
use serde::Deserialize;

/// Raw settings as read from the config file and environment.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub ha_url: Option<String>,
    pub ha_token: Option<String>,
    pub tz: String,
    pub ha_entity_pv_power: String,
    pub ha_entity_battery_soc: String,
    pub ha_entity_grid_power: String,
    pub ha_entity_house_consumption: String,
    pub ha_entity_car_charger_power: String,
    pub ha_entity_car_charger_switch: String,
    pub display_width: u32,
    pub display_height: u32,
    pub display_mode: String,
    pub history_max_points: usize,
    pub port: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("unknown time zone '{0}'")]
    TimeZone(String),
    #[error(transparent)]
    DisplayMode(#[from] UnknownDisplayMode),
    #[error("display {width}x{height} is too small for the power graph")]
    DisplayTooSmall { width: u32, height: u32 },
    #[error("history_max_points must be at least 1")]
    MaxPoints,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityIds {
    pub pv_power: String,
    pub battery_soc: String,
    pub grid_power: String,
    pub house_consumption: String,
    pub car_charger_power: String,
    pub car_charger_switch: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub mode: DisplayMode,
}

impl DisplayConfig {
    pub fn graph_rect(&self) -> PlotRect {
        PlotRect::for_display(self.width, self.height)
    }
}

/// Validated configuration, built once at start-up and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub ha_url: String,
    pub ha_token: String,
    pub timezone: Tz,
    pub entities: EntityIds,
    pub display: DisplayConfig,
    pub history_max_points: usize,
    pub port: u16,
}

impl AppConfig {
    pub fn from_config(config: config::Config) -> Result<Self, ConfigError> {
        let settings: Settings = config.try_deserialize()?;
        Self::try_from(settings)
    }
}

impl TryFrom<Settings> for AppConfig {
    type Error = ConfigError;

    fn try_from(settings: Settings) -> Result<Self, Self::Error> {
        let ha_url = required(settings.ha_url, "HA_URL")?
            .trim_end_matches('/')
            .to_string();
        let ha_token = required(settings.ha_token, "HA_TOKEN")?;

        let timezone = settings
            .tz
            .parse::<Tz>()
            .map_err(|_| ConfigError::TimeZone(settings.tz.clone()))?;

        let display = DisplayConfig {
            width: settings.display_width,
            height: settings.display_height,
            mode: settings.display_mode.parse()?,
        };
        let rect = display.graph_rect();
        if rect.plot_width() <= 0.0 || rect.plot_height() <= 0.0 {
            return Err(ConfigError::DisplayTooSmall {
                width: display.width,
                height: display.height,
            });
        }

        if settings.history_max_points == 0 {
            return Err(ConfigError::MaxPoints);
        }

        Ok(Self {
            ha_url,
            ha_token,
            timezone,
            entities: EntityIds {
                pv_power: settings.ha_entity_pv_power,
                battery_soc: settings.ha_entity_battery_soc,
                grid_power: settings.ha_entity_grid_power,
                house_consumption: settings.ha_entity_house_consumption,
                car_charger_power: settings.ha_entity_car_charger_power,
                car_charger_switch: settings.ha_entity_car_charger_switch,
            },
            display,
            history_max_points: settings.history_max_points,
            port: settings.port,
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    builder
        .set_default("tz", "UTC")?
        .set_default("ha_entity_pv_power", "sensor.pv_power")?
        .set_default("ha_entity_battery_soc", "sensor.battery_state_of_charge")?
        .set_default("ha_entity_grid_power", "sensor.active_power")?
        .set_default("ha_entity_house_consumption", "sensor.house_consumption")?
        .set_default("ha_entity_car_charger_power", "sensor.car_charger_power")?
        .set_default("ha_entity_car_charger_switch", "switch.car_charger")?
        .set_default("display_width", 800)?
        .set_default("display_height", 480)?
        .set_default("display_mode", DisplayMode::default().as_str())?
        .set_default("history_max_points", DEFAULT_MAX_POINTS as i64)?
        .set_default("port", 3000)
}

/// Load settings from the optional `config/power-terminal` file, overridden by
/// environment variables (`HA_URL`, `HA_TOKEN`, `TZ`, `DISPLAY_MODE`, ...).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = with_defaults(config::Config::builder())?
        .add_source(config::File::with_name("config/power-terminal").required(false))
        .add_source(config::Environment::default().try_parsing(true))
        .build()?;

    AppConfig::from_config(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ConfigBuilder<DefaultState> {
        with_defaults(config::Config::builder())
            .unwrap()
            .set_override("ha_url", "http://homeassistant.local:8123/")
            .unwrap()
            .set_override("ha_token", "secret")
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_config(base().build().unwrap()).unwrap();

        assert_eq!(config.ha_url, "http://homeassistant.local:8123");
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.entities.grid_power, "sensor.active_power");
        assert_eq!(config.display.width, 800);
        assert_eq!(config.display.height, 480);
        assert_eq!(config.display.mode, DisplayMode::Color);
        assert_eq!(config.history_max_points, 288);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_overrides() {
        let cfg = base()
            .set_override("tz", "Europe/Berlin")
            .unwrap()
            .set_override("display_mode", "monochrome")
            .unwrap()
            .set_override("display_width", 1024)
            .unwrap()
            .build()
            .unwrap();
        let config = AppConfig::from_config(cfg).unwrap();

        assert_eq!(config.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(config.display.mode, DisplayMode::Monochrome);
        assert_eq!(config.display.graph_rect().width, 984.0);
    }

    #[test]
    fn test_missing_token() {
        let cfg = with_defaults(config::Config::builder())
            .unwrap()
            .set_override("ha_url", "http://ha")
            .unwrap()
            .build()
            .unwrap();
        let err = AppConfig::from_config(cfg).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("HA_TOKEN")));
    }

    #[test]
    fn test_rejects_bad_values() {
        let cfg = base().set_override("tz", "Mars/Olympus").unwrap().build().unwrap();
        assert!(matches!(AppConfig::from_config(cfg), Err(ConfigError::TimeZone(_))));

        let cfg = base().set_override("display_mode", "sepia").unwrap().build().unwrap();
        assert!(matches!(AppConfig::from_config(cfg), Err(ConfigError::DisplayMode(_))));

        let cfg = base().set_override("display_height", 120).unwrap().build().unwrap();
        assert!(matches!(
            AppConfig::from_config(cfg),
            Err(ConfigError::DisplayTooSmall { .. })
        ));

        let cfg = base().set_override("history_max_points", 0).unwrap().build().unwrap();
        assert!(matches!(AppConfig::from_config(cfg), Err(ConfigError::MaxPoints)));
    }
}
