use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = folio_server::config::load();
    let ax = folio_server::build(&config)?;

    let snapshot = config.snapshot();
    let host = snapshot
        .get_string("http.host")
        .unwrap_or_else(|| folio_server::config::DEFAULT_HOST.to_string());
    let port = snapshot
        .get_string("http.port")
        .unwrap_or_else(|| folio_server::config::DEFAULT_PORT.to_string());

    let addr = format!("{host}:{port}");

    tracing::info!(
        %addr,
        env = snapshot.get("app.env").unwrap_or("development"),
        mail = ax.state.mail.transport_name(),
        "[folio] api at http://{addr}/api/projects"
    );

    ax.listen(addr).await?;

    Ok(())
}
