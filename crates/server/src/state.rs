use coderx_core::ChannelsConfig;

/// Where channel configuration comes from on each request.
#[derive(Debug, Clone)]
pub enum ChannelSource {
    /// Re-read the process environment for every inquiry.
    Environment,
    /// A fixed configuration, injected at startup.
    Fixed(ChannelsConfig),
}

impl ChannelSource {
    pub fn load(&self) -> ChannelsConfig {
        match self {
            ChannelSource::Environment => ChannelsConfig::from_env(),
            ChannelSource::Fixed(config) => config.clone(),
        }
    }
}

pub struct AppState {
    pub channels: ChannelSource,
    /// Shared outbound client (connection pooling across channels and requests).
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(channels: ChannelSource) -> Self {
        Self {
            channels,
            http: reqwest::Client::new(),
        }
    }
}
