use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use service_status::{Config, QueryService, Reconciler, TargetStore, TcpProber};

/// Everything the HTTP layer and the reconciliation loop share.
///
/// Built once at startup and handed to both; there is no global state.
pub struct AppContext {
    pub config: Arc<Config>,
    pub store: Arc<dyn TargetStore>,
    pub query: QueryService,
}

impl AppContext {
    pub fn new(config: Config, store: Arc<dyn TargetStore>) -> Self {
        let query = QueryService::new(store.clone());
        Self { config: Arc::new(config), store, query }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let ip: IpAddr = self.config.server.bind.parse()?;
        Ok(SocketAddr::new(ip, self.config.server.port))
    }

    /// Reconciliation loop over the shared store with the configured timing
    pub fn reconciler(&self) -> Reconciler {
        let prober = Arc::new(TcpProber::new(self.config.monitor.probe_timeout()));
        Reconciler::new(self.store.clone(), prober, self.config.monitor.interval())
    }
}
