use std::net::{SocketAddr, TcpListener};

use axum::{Router, routing::get};
use axum_server::Handle;
use tokio::sync::oneshot;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::Error;

pub const DEFAULT_KEEPALIVE_PORT: u16 = 3000;

/// `GET /` answers with a fixed greeting so uptime pingers see the process
/// as alive.
pub async fn hello() -> &'static str {
    "Hello, world!"
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(hello))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Binds the keep-alive server on all interfaces and serves it in the
/// background. A port that cannot be bound is returned as `Error::Io`.
/// Send on (or drop) the returned sender to shut it down gracefully.
pub async fn start_keepalive_server(port: u16) -> Result<oneshot::Sender<()>, Error> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)?;
    listener.set_nonblocking(true)?;
    let bound = listener.local_addr()?;

    let (shutdown_send, shutdown_recv) = oneshot::channel::<()>();
    let handle = Handle::new();
    let handle_clone = handle.clone();

    tokio::spawn(async move {
        let _ = shutdown_recv.await;
        handle_clone.graceful_shutdown(None);
    });

    let server = axum_server::from_tcp(listener)
        .handle(handle)
        .serve(router().into_make_service());

    tokio::spawn(async move {
        if let Err(e) = server.await {
            error!("Keep-alive server error: {}", e);
        }
        info!("Keep-alive server shut down.");
    });

    info!("Project is running on http://localhost:{}", bound.port());
    Ok(shutdown_send)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn root_route_answers_with_greeting() {
        let response = router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Hello, world!");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = router()
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn occupied_port_fails_startup() {
        let taken = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], 0))).unwrap();
        let port = taken.local_addr().unwrap().port();

        let result = start_keepalive_server(port).await;

        assert!(matches!(result, Err(Error::Io(_))));
        drop(taken);
    }

    #[tokio::test]
    async fn free_port_starts_and_shuts_down() {
        let shutdown = start_keepalive_server(0).await.unwrap();
        assert!(shutdown.send(()).is_ok());
    }
}
