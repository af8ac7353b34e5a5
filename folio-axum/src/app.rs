use axum::Router;
use tokio::net::{TcpListener, ToSocketAddrs};

use crate::layers;

pub struct AxumApp<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub state: S,
    pub router: Router<()>,
}

impl<S> Clone for AxumApp<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            router: self.router.clone(),
        }
    }
}

impl<S> AxumApp<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(state: S) -> Self {
        Self {
            state,
            router: Router::new(),
        }
    }

    /// Mount a stateful router. `""` and `"/"` merge at the root.
    pub fn use_router(mut self, path: &str, router: Router<S>) -> Self {
        let router = router.with_state(self.state.clone());
        self.router = match path {
            "" | "/" => self.router.merge(router),
            _ => self.router.nest(path, router),
        };
        self
    }

    /// Serve a prebuilt static router (see [`crate::statics`]) under `path`.
    pub fn mount_static(mut self, path: &str, files: Router<()>) -> Self {
        self.router = self.router.nest_service(path, files);
        self
    }

    /// Request ids, tracing spans and permissive CORS. Call once, after
    /// every route and the fallback are registered.
    pub fn with_standard_layers(mut self) -> Self {
        self.router = layers::standard(self.router);
        self
    }

    pub fn into_router(self) -> Router<()> {
        self.router
    }

    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "listening");
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

pub fn axum<S>(state: S) -> AxumApp<S>
where
    S: Clone + Send + Sync + 'static,
{
    AxumApp::new(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "could not install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
