mod provider;

pub use provider::ProviderTemplate;
