use log::{error, info, warn};
use std::io;
use tokio::net::TcpListener;
use tokio::signal;

use crate::config::NodeConfig;
use crate::server::{NodeState, router};
use crate::storage::ensure_upload_dir;

pub struct Server {
    listener: TcpListener,
    state: NodeState,
    config: NodeConfig,
}

impl Server {
    pub async fn new(config: NodeConfig) -> io::Result<Self> {
        let socket = config.listen_socket();

        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(e);
            }
        };

        let state = NodeState::from_config(&config);

        // Requests create it lazily as well, so a failure here is not fatal
        if let Err(e) = ensure_upload_dir(&state.layout) {
            warn!("Failed to create upload directory: {}", e);
        }

        Ok(Self {
            listener,
            state,
            config,
        })
    }

    pub async fn start(self) -> io::Result<()> {
        info!("Storage node running on port {}", self.config.port);
        info!("Storage path: {}", self.config.storage_path);
        info!(
            "Reported capacity: {} bytes",
            self.config.capacity_bytes
        );

        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Storage node stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal, draining connections");
}
