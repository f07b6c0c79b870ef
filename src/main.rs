use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use macflix_client::{
    config::Config,
    feed::RecommendationFeed,
    services::{ApiClient, AuthClient, CatalogClient, HttpRecommendationSource},
    session::AuthSession,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let api = ApiClient::new(&config)?;

    // Browsing works without authentication.
    let catalog = CatalogClient::new(api.clone());
    match catalog.popular(1).await {
        Ok(page) => {
            info!(total_pages = page.total_pages, "Popular movies");
            for movie in &page.results {
                info!(title = %movie.title, rating = ?movie.vote_average, "  movie");
            }
        }
        Err(err) => warn!(error = %err, "Could not fetch popular movies"),
    }

    // Recommendations need a signed-in subject.
    let session = AuthSession::new();
    if let (Some(email), Some(password)) = (&config.email, &config.password) {
        let auth = AuthClient::new(api.clone());
        match auth.login(email, password).await {
            Ok(login) => session.sign_in(login.user.id, login.token),
            Err(err) => warn!(error = %err, "Login failed"),
        }
    }

    let identity = session.current();
    if identity.is_absent() {
        info!("Not signed in; skipping recommendations");
        return Ok(());
    }

    let source = Arc::new(HttpRecommendationSource::new(api));
    let mut feed = RecommendationFeed::spawn(source, config.page_size);
    feed.initialize(identity).await;

    let mut seen = 0;
    loop {
        let snapshot = feed.changed().await;
        for movie in &snapshot.items[seen..] {
            info!(title = %movie.title, "Recommended");
        }
        seen = snapshot.items.len();

        if snapshot.loading {
            continue;
        }
        if let Some(error) = snapshot.error {
            warn!("Feed stopped: {}", error.user_message());
            break;
        }
        if !snapshot.has_more {
            info!(total = snapshot.total, "All recommendations loaded");
            break;
        }

        // Stand in for the rendering layer: the last row "scrolls into
        // view". Rows are identified by list index.
        if !snapshot.items.is_empty() {
            let last_row = (snapshot.items.len() - 1) as u64;
            feed.attach_sentinel(last_row);
            feed.sentinel_visibility(last_row, true).await;
        }
    }

    Ok(())
}
