//! Build plugins
//!
//! A [`Plugin`] observes (and may replace) the in-flight data of a build at
//! fixed points. Plugins run sequentially in registration order; an error
//! from any hook aborts the build and is attributed to the hook's phase.

use crate::command::ScannedCommand;
use crate::config::BuildConfig;
use crate::error::{Error, Phase, Result};
use tracing::debug;

/// Hooks around the build phases; every method defaults to a no-op
pub trait Plugin {
    fn name(&self) -> &str;

    fn before_scan(&self, _config: &BuildConfig) -> Result<()> {
        Ok(())
    }

    /// Return `Some` to replace the scanned command list
    fn after_scan(
        &self,
        _commands: &[ScannedCommand],
        _config: &BuildConfig,
    ) -> Result<Option<Vec<ScannedCommand>>> {
        Ok(None)
    }

    fn before_generate(&self, _commands: &[ScannedCommand], _config: &BuildConfig) -> Result<()> {
        Ok(())
    }

    /// Return `Some` to replace the generated source
    fn after_generate(&self, _code: &str, _config: &BuildConfig) -> Result<Option<String>> {
        Ok(None)
    }

    /// Return `Some` to replace the source about to be written
    fn before_write(&self, _code: &str, _config: &BuildConfig) -> Result<Option<String>> {
        Ok(None)
    }

    fn after_build(&self, _config: &BuildConfig) -> Result<()> {
        Ok(())
    }
}

/// Ordered plugin list
#[derive(Default)]
pub struct PluginSet {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: impl Plugin + 'static) {
        self.plugins.push(Box::new(plugin));
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn before_scan(&self, config: &BuildConfig) -> Result<()> {
        for plugin in &self.plugins {
            debug!(plugin = plugin.name(), "before_scan");
            plugin
                .before_scan(config)
                .map_err(|e| hook_error(plugin.as_ref(), Phase::Scan, e))?;
        }
        Ok(())
    }

    pub fn after_scan(
        &self,
        mut commands: Vec<ScannedCommand>,
        config: &BuildConfig,
    ) -> Result<Vec<ScannedCommand>> {
        for plugin in &self.plugins {
            debug!(plugin = plugin.name(), "after_scan");
            if let Some(replaced) = plugin
                .after_scan(&commands, config)
                .map_err(|e| hook_error(plugin.as_ref(), Phase::Scan, e))?
            {
                commands = replaced;
            }
        }
        Ok(commands)
    }

    pub fn before_generate(&self, commands: &[ScannedCommand], config: &BuildConfig) -> Result<()> {
        for plugin in &self.plugins {
            debug!(plugin = plugin.name(), "before_generate");
            plugin
                .before_generate(commands, config)
                .map_err(|e| hook_error(plugin.as_ref(), Phase::Generate, e))?;
        }
        Ok(())
    }

    pub fn after_generate(&self, mut code: String, config: &BuildConfig) -> Result<String> {
        for plugin in &self.plugins {
            debug!(plugin = plugin.name(), "after_generate");
            if let Some(replaced) = plugin
                .after_generate(&code, config)
                .map_err(|e| hook_error(plugin.as_ref(), Phase::Generate, e))?
            {
                code = replaced;
            }
        }
        Ok(code)
    }

    pub fn before_write(&self, mut code: String, config: &BuildConfig) -> Result<String> {
        for plugin in &self.plugins {
            debug!(plugin = plugin.name(), "before_write");
            if let Some(replaced) = plugin
                .before_write(&code, config)
                .map_err(|e| hook_error(plugin.as_ref(), Phase::Write, e))?
            {
                code = replaced;
            }
        }
        Ok(code)
    }

    pub fn after_build(&self, config: &BuildConfig) -> Result<()> {
        for plugin in &self.plugins {
            debug!(plugin = plugin.name(), "after_build");
            plugin
                .after_build(config)
                .map_err(|e| hook_error(plugin.as_ref(), Phase::Build, e))?;
        }
        Ok(())
    }
}

fn hook_error(plugin: &dyn Plugin, phase: Phase, e: Error) -> Error {
    Error::Hook {
        plugin: plugin.name().to_string(),
        phase,
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Banner(&'static str);

    impl Plugin for Banner {
        fn name(&self) -> &str {
            "banner"
        }

        fn after_generate(&self, code: &str, _config: &BuildConfig) -> Result<Option<String>> {
            Ok(Some(format!("// {}\n{}", self.0, code)))
        }
    }

    struct Observer;

    impl Plugin for Observer {
        fn name(&self) -> &str {
            "observer"
        }
    }

    struct Broken;

    impl Plugin for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn before_write(&self, _code: &str, _config: &BuildConfig) -> Result<Option<String>> {
            Err("disk full".into())
        }
    }

    #[test]
    fn test_replacements_chain_in_order() {
        let mut plugins = PluginSet::new();
        plugins.register(Banner("first"));
        plugins.register(Observer);
        plugins.register(Banner("second"));
        let config = BuildConfig::new("/work", "hefs");

        let code = plugins.after_generate("body".to_string(), &config).unwrap();
        assert_eq!(code, "// second\n// first\nbody");
    }

    #[test]
    fn test_hook_failure_is_attributed_to_phase() {
        let mut plugins = PluginSet::new();
        plugins.register(Broken);
        let config = BuildConfig::new("/work", "hefs");

        let err = plugins.before_write("x".into(), &config).unwrap_err();
        assert_eq!(err.phase(), Phase::Write);
        assert!(err.to_string().contains("broken"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_register_counts_plugins() {
        let mut plugins = PluginSet::new();
        assert!(plugins.is_empty());
        plugins.register(Observer);
        plugins.register(Banner("only"));
        assert_eq!(plugins.len(), 2);
        assert!(!plugins.is_empty());
    }

    #[test]
    fn test_noop_plugins_keep_commands() {
        let mut plugins = PluginSet::new();
        plugins.register(Observer);
        let config = BuildConfig::new("/work", "hefs");
        let commands = plugins.after_scan(Vec::new(), &config).unwrap();
        assert!(commands.is_empty());
    }
}
