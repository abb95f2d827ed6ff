//! Helpers shared by unit tests

use axum::Router;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral local port and returns its base URL
pub(crate) async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("local upstream server");
    });

    format!("http://{}", addr)
}
