//! Process-wide state for the Outer Server (§3 Lifecycle, §5): created once
//! at startup, shared by every tool call, cleared only by process exit.

use std::sync::Arc;

use bridge_config::BridgeConfig;
use midi_link::{Correlator, PortManager};
use param_resolver::Resolver;
use render_watch::{RenderRegistry, RenderWatcher};
use sample_pipeline::PipelineContext;

use crate::aliases::default_aliases;

pub struct AppState {
    pub correlator: Arc<Correlator>,
    pub resolver: Arc<Resolver>,
    pub registry: Arc<RenderRegistry>,
    pub pipeline: PipelineContext,
    /// Kept alive only so the watcher's background thread keeps running;
    /// dropping it stops the watch.
    _watcher: RenderWatcher,
}

impl AppState {
    pub fn init(config: &BridgeConfig) -> anyhow::Result<Self> {
        let (port_manager, inbound) = PortManager::open(&config.port_from_daw, &config.port_to_daw)?;
        let correlator = Correlator::spawn(Arc::new(port_manager), inbound);

        let resolver = Arc::new(Resolver::new(default_aliases()));
        let registry = Arc::new(RenderRegistry::new());

        std::fs::create_dir_all(&config.render_dir)?;
        std::fs::create_dir_all(&config.sample_dir)?;
        let watcher = RenderWatcher::start(config.render_dir.clone(), Arc::clone(&registry))?;

        let pipeline = PipelineContext {
            sox_path: config.sox_path.clone(),
            render_dir: config.render_dir.clone(),
            sample_dir: config.sample_dir.clone(),
            registry: Arc::clone(&registry),
        };

        Ok(Self { correlator, resolver, registry, pipeline, _watcher: watcher })
    }
}
