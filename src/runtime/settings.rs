use std::path::PathBuf;

use crate::config::Settings;

/// Settings for this run and, when the config was rejected, the reason defaults are in use.
///
/// The reason is kept rather than printed: the log file only exists once
/// these settings have configured it.
pub struct StartupSettings {
    pub settings: Settings,
    pub fallback: Option<String>,
}

/// Load layered settings and apply command-line overrides.
///
/// `args` excludes the program name. The first argument, if any, is the
/// directory the upload picker lists.
pub fn load_settings(args: impl IntoIterator<Item = String>) -> StartupSettings {
    let mut startup = settings_or_defaults(Settings::load());
    if let Some(dir) = args.into_iter().next() {
        startup.settings.upload.dir = Some(PathBuf::from(dir));
    }
    startup
}

fn settings_or_defaults(loaded: Result<Settings, ::config::ConfigError>) -> StartupSettings {
    // Config is optional; failures should not prevent the app from starting.
    let fallback = match loaded {
        Ok(settings) => match settings.validate() {
            Ok(()) => {
                return StartupSettings {
                    settings,
                    fallback: None,
                };
            }
            Err(msg) => format!("invalid config: {msg}"),
        },
        Err(e) => format!("failed to load config: {e}"),
    };
    StartupSettings {
        settings: Settings::default(),
        fallback: Some(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_settings_are_used_as_is() {
        let mut s = Settings::default();
        s.player.volume_step = 25;

        let startup = settings_or_defaults(Ok(s));
        assert_eq!(startup.settings.player.volume_step, 25);
        assert!(startup.fallback.is_none());
    }

    #[test]
    fn invalid_settings_fall_back_to_defaults_with_a_reason() {
        let mut s = Settings::default();
        s.player.volume_step = 0;

        let startup = settings_or_defaults(Ok(s));
        assert_eq!(
            startup.settings.player.volume_step,
            Settings::default().player.volume_step
        );
        let reason = startup.fallback.unwrap();
        assert!(reason.starts_with("invalid config"), "{reason}");
        assert!(reason.contains("volume_step"), "{reason}");
    }

    #[test]
    fn load_errors_fall_back_to_defaults_with_a_reason() {
        let startup = settings_or_defaults(Err(::config::ConfigError::Message("bad toml".into())));
        assert_eq!(startup.settings.ui.tick_ms, Settings::default().ui.tick_ms);
        let reason = startup.fallback.unwrap();
        assert!(reason.contains("bad toml"), "{reason}");
    }
}
