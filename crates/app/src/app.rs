//! Wires the storefront services together from configuration.

use std::sync::Arc;
use std::time::Duration;

use storefront_application::{
    AuthCoordinator, AuthService, CatalogService, EntityRouteResolver, ErpTransport,
    KeyValueStorage, LocaleHub, Navigator, SearchClient, SessionStore, SettingsService,
};
use storefront_domain::User;
use storefront_infrastructure::{
    FileKeyValueStorage, InMemoryRouteTable, MemoryKeyValueStorage, ReqwestErpTransport,
    ReqwestSearchTransport, StorefrontConfig, SystemClock,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

type Search = SearchClient<ReqwestSearchTransport>;

/// ERP-backed services, present when the ERP is configured.
pub struct Erp {
    /// Login, logout and session restore.
    pub auth: AuthService,
    /// Shop settings, loaded after each user load.
    pub settings: Arc<SettingsService>,
    user_loaded: mpsc::UnboundedReceiver<()>,
}

impl Erp {
    /// Loads the shop settings if a user was loaded since the last call.
    pub async fn refresh_settings(&mut self) {
        let mut pending = false;
        while self.user_loaded.try_recv().is_ok() {
            pending = true;
        }
        if !pending {
            return;
        }
        if let Err(err) = self.settings.init().await {
            warn!(error = %err, "settings not loaded");
        }
    }
}

/// Every service the command line front end uses.
pub struct Storefront {
    /// Active locale; the search client follows it.
    pub locale: LocaleHub,
    /// Client over the product and category indexes.
    pub search: Arc<Search>,
    /// Current user.
    pub auth: Arc<AuthCoordinator>,
    /// Auth guard and entity routes.
    pub navigator: Navigator<CatalogService<ReqwestSearchTransport>, InMemoryRouteTable>,
    /// ERP services, if configured.
    pub erp: Option<Erp>,
}

impl Storefront {
    /// Builds the services described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete or a client
    /// cannot be created.
    pub fn build(config: &StorefrontConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let locale = config.locale()?;
        let transport =
            ReqwestSearchTransport::new(Duration::from_millis(config.search.timeout_ms))?;
        let search = Arc::new(SearchClient::new(
            transport,
            config.search.base_url.clone(),
            config.search.catalog_indexes()?,
            locale.clone(),
        )?);
        info!(endpoint = %search.endpoint(), "search client ready");

        let hub = LocaleHub::new(locale);
        hub.subscribe(search.clone());

        let storage: Arc<dyn KeyValueStorage> = match &config.session.path {
            Some(path) => Arc::new(FileKeyValueStorage::new(path, SystemClock)),
            None => Arc::new(MemoryKeyValueStorage::new(SystemClock)),
        };
        let auth = Arc::new(AuthCoordinator::new(SessionStore::new(storage)));
        auth.on_user_unloaded(|| info!("user signed out"));

        let erp = match &config.erp {
            Some(erp_config) => {
                let transport: Arc<dyn ErpTransport> =
                    Arc::new(ReqwestErpTransport::new(erp_config)?);
                let settings = Arc::new(SettingsService::new(transport.clone()));
                let (tx, user_loaded) = mpsc::unbounded_channel();
                auth.on_user_loaded(settings_trigger(tx));
                Some(Erp {
                    auth: AuthService::new(transport, auth.clone()),
                    settings,
                    user_loaded,
                })
            }
            None => {
                warn!("no ERP configured; account commands are unavailable");
                None
            }
        };

        let catalog = CatalogService::new(
            search.clone(),
            config.search.product_indexes()?,
            config.search.category_indexes()?,
        );
        let routes = Arc::new(InMemoryRouteTable::new());
        let navigator = Navigator::new(auth.clone(), EntityRouteResolver::new(catalog, routes));

        Ok(Self {
            locale: hub,
            search,
            auth,
            navigator,
            erp,
        })
    }

    /// The ERP services.
    ///
    /// # Errors
    ///
    /// Returns an error if the ERP is not configured.
    pub fn require_erp(&mut self) -> Result<&mut Erp, Box<dyn std::error::Error>> {
        self.erp
            .as_mut()
            .ok_or_else(|| "the [erp] section is not configured".into())
    }
}

/// Listener asking for a settings refresh after each user load.
fn settings_trigger(tx: mpsc::UnboundedSender<()>) -> impl Fn(&User) + Send + Sync + 'static {
    move |user| {
        info!(login = user.login.as_deref().unwrap_or_default(), "user loaded");
        if tx.send(()).is_err() {
            debug!("settings refresh no longer listening");
        }
    }
}
