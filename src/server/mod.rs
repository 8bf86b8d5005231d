pub mod routes;
pub mod state;

pub use routes::{router, ApiError};
pub use state::AppState;

use crate::error::Result;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Serve the dashboard until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(
        "Dashboard listening on http://{} ({} records)",
        listener.local_addr()?,
        state.dataset.len()
    );

    axum::serve(listener, router(state)).await?;
    Ok(())
}
