//! Game setup read once when a game is created.

use crate::clock::ClockConfig;
use crate::error::ConfigError;
use crate::registry::{Registry, Variant};

/// Variant and optional time control of a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameConfig {
    pub variant: Variant,
    pub clock: Option<ClockConfig>,
}

impl GameConfig {
    /// Build a config from a variant token and an optional `"total,increment"` clock spec.
    ///
    /// The token is looked up in `registry`; the empty token selects standard chess.
    pub fn parse(
        registry: &Registry,
        variant: &str,
        clock: Option<&str>,
    ) -> Result<GameConfig, ConfigError> {
        let variant = registry
            .variant(variant)
            .ok_or_else(|| ConfigError::UnknownVariant {
                token: variant.to_string(),
            })?;
        let clock = clock.map(str::parse::<ClockConfig>).transpose()?;
        Ok(GameConfig { variant, clock })
    }

    /// Build a config from loose tokens in any order: a clock spec contains a
    /// comma, anything else is a variant token.
    pub fn from_tokens<'a, I>(registry: &Registry, tokens: I) -> Result<GameConfig, ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut config = GameConfig::default();
        for token in tokens {
            if token.contains(',') {
                config.clock = Some(token.parse()?);
            } else {
                config.variant =
                    registry
                        .variant(token)
                        .ok_or_else(|| ConfigError::UnknownVariant {
                            token: token.to_string(),
                        })?;
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::GameConfig;
    use crate::clock::ClockConfig;
    use crate::error::ConfigError;
    use crate::registry::{Registry, Variant};

    #[test]
    fn parse_variant_and_clock() {
        let registry = Registry::standard();
        let config = GameConfig::parse(&registry, "atomic", Some("180,2")).unwrap();
        assert_eq!(config.variant, Variant::Atomic);
        assert_eq!(config.clock, Some(ClockConfig::new(180, 2)));

        let config = GameConfig::parse(&registry, "", None).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let registry = Registry::standard();
        let err = GameConfig::parse(&registry, "chess960", None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownVariant {
                token: "chess960".to_string()
            }
        );
    }

    #[test]
    fn tokens_in_any_order() {
        let registry = Registry::standard();
        let config = GameConfig::from_tokens(&registry, ["600,10", "atomic"]).unwrap();
        assert_eq!(config.variant, Variant::Atomic);
        assert_eq!(config.clock, Some(ClockConfig::new(600, 10)));
        assert!(GameConfig::from_tokens(&registry, ["60"]).is_err());
        assert!(GameConfig::from_tokens(&registry, ["x,y"]).is_err());
    }

    #[test]
    fn variant_restricted_to_registry() {
        let registry = Registry::empty().with_variant(Variant::Standard);
        assert!(GameConfig::parse(&registry, "atomic", None).is_err());
        assert!(GameConfig::parse(&registry, "standard", None).is_ok());
    }
}
