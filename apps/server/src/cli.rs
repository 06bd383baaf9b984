use std::path::PathBuf;

use clap::Parser;
use service_status::Config;

#[derive(Debug, Parser)]
#[command(version, about = "Tracks TCP reachability of registered services and serves it over HTTP")]
pub struct Cli {
    /// Config file (created with defaults when missing)
    #[arg(short, long, env = "SERVICE_STATUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the HTTP bind address
    #[arg(long)]
    pub bind: Option<String>,

    /// Override the HTTP port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Cli {
    /// Apply command-line overrides on top of the file config
    pub fn apply(&self, config: &mut Config) {
        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
