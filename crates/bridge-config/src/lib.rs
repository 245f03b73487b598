//! Environment-driven configuration (§6). Kept deliberately dependency-light
//! since every crate in the workspace that touches process startup pulls
//! this one in.

use std::env;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set to the MIDI port name the bridge should use")]
    MissingPort(&'static str),
}

/// Which MIDI ports to open and how to find the external audio processor.
/// Debug logging config lives alongside it since both are read once at
/// startup from the same environment.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub port_to_daw: String,
    pub port_from_daw: String,
    pub debug: bool,
    pub debug_file: Option<PathBuf>,
    pub sox_path: String,
    /// Where the host writes rendered audio; watched by render-watch (§4.9).
    /// Not in the spec's env table; defaults alongside the process cwd
    /// since the host-install-relative path is deployment-specific.
    pub render_dir: PathBuf,
    /// Where sample-pipeline tools read inputs from and write outputs to
    /// when a render isn't being targeted directly (§4.10).
    pub sample_dir: PathBuf,
}

impl BridgeConfig {
    /// Load configuration from the process environment. `FL_PORT_TO_FL` and
    /// `FL_PORT_FROM_FL` are required; everything else has a sane default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_to_daw = env::var("FL_PORT_TO_FL")
            .map_err(|_| ConfigError::MissingPort("FL_PORT_TO_FL"))?;
        let port_from_daw = env::var("FL_PORT_FROM_FL")
            .map_err(|_| ConfigError::MissingPort("FL_PORT_FROM_FL"))?;
        let debug = env::var("FL_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let debug_file = env::var("FL_DEBUG_FILE").ok().map(PathBuf::from);
        let sox_path = env::var("SOX_PATH").unwrap_or_else(|_| "sox".to_string());
        let render_dir = env::var("FL_RENDER_DIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("renders"));
        let sample_dir = env::var("FL_SAMPLE_DIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("samples"));

        Ok(Self { port_to_daw, port_from_daw, debug, debug_file, sox_path, render_dir, sample_dir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_all() {
        for key in [
            "FL_PORT_TO_FL",
            "FL_PORT_FROM_FL",
            "FL_DEBUG",
            "FL_DEBUG_FILE",
            "SOX_PATH",
            "FL_RENDER_DIR",
            "FL_SAMPLE_DIR",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn missing_port_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all();
        assert!(BridgeConfig::from_env().is_err());
    }

    #[test]
    fn sox_path_defaults_when_unset() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all();
        env::set_var("FL_PORT_TO_FL", "FL Studio MIDI Out");
        env::set_var("FL_PORT_FROM_FL", "FL Studio MIDI In");
        let cfg = BridgeConfig::from_env().unwrap();
        assert_eq!(cfg.sox_path, "sox");
        assert!(!cfg.debug);
        clear_all();
    }

    #[test]
    fn render_and_sample_dirs_default_when_unset() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all();
        env::set_var("FL_PORT_TO_FL", "x");
        env::set_var("FL_PORT_FROM_FL", "y");
        let cfg = BridgeConfig::from_env().unwrap();
        assert_eq!(cfg.render_dir, PathBuf::from("renders"));
        assert_eq!(cfg.sample_dir, PathBuf::from("samples"));
        clear_all();
    }

    #[test]
    fn debug_flag_accepts_1_or_true_case_insensitive() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all();
        env::set_var("FL_PORT_TO_FL", "x");
        env::set_var("FL_PORT_FROM_FL", "y");
        env::set_var("FL_DEBUG", "True");
        let cfg = BridgeConfig::from_env().unwrap();
        assert!(cfg.debug);
        clear_all();
    }
}
