mod settings;

pub use settings::{
    LoggingConfig, ProviderConfig, ProviderSettings, Settings, API_PORT_ENV, API_URL_ENV,
};
