//! Serve a configurable `robots.txt` from an [`axum`] router.
//!
//! The payload is resolved once, either the built-in default or a file read with a
//! chosen [`TextEncoding`], and is then served from memory for the lifetime of the router.
//!
//! # Example
//! ```rust,no_run
//! use axum::Router;
//! use robots_route::{RobotsSettings, RouterExt};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), robots_route::ConfigurationError> {
//! let router = Router::<()>::new()
//!     .robots_txt(&RobotsSettings {
//!         filepath: Some("static/robots.txt".into()),
//!         max_age: 3600,
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod encoding;
mod error;
mod middleware;
mod routes;

pub use encoding::TextEncoding;
pub use error::ConfigurationError;
pub use routes::{DEFAULT_ROBOTS_TXT, ROBOTS_ENDPOINT, RobotsTxt, RouterExt, setup};

use anyhow::Result;
use axum::{Router, middleware as axum_middleware};
use core::{net::SocketAddr, time::Duration};
use serde::Deserialize;
use std::path::PathBuf;
use tokio::{net::TcpListener, signal};
use tower_http::{
    catch_panic::CatchPanicLayer,
    timeout::TimeoutLayer,
    trace::{self, TraceLayer},
};
use tracing::{Level, info};

/// Default `max-age` (in seconds) sent in the `Cache-Control` header.
pub const DEFAULT_MAX_AGE: u64 = 86400;

/// Configuration for the robots.txt route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RobotsSettings {
    /// File to serve instead of [`DEFAULT_ROBOTS_TXT`].
    ///
    /// Relative paths are resolved against the current working directory.
    pub filepath: Option<PathBuf>,

    /// Encoding used to turn the contents of [`RobotsSettings::filepath`] into text.
    pub encoding: TextEncoding,

    /// How many seconds clients may cache the response for.
    #[serde(alias = "maxAge")]
    pub max_age: u64,
}

impl Default for RobotsSettings {
    fn default() -> Self {
        Self {
            filepath: None,
            encoding: TextEncoding::default(),
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

/// Settings to run the [`RobotsServer`] with.
#[derive(Debug, Clone)]
pub struct RobotsServerSettings {
    /// How many seconds that can elapse before a request is abandoned for taking too long.
    pub request_timeout: u64,

    /// See [`RobotsSettings`].
    pub robots_settings: RobotsSettings,
}

impl Default for RobotsServerSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10,
            robots_settings: RobotsSettings::default(),
        }
    }
}

/// A standalone server that hosts the robots.txt route.
///
/// # Example
/// ```rust,no_run
/// use std::net::{SocketAddr, IpAddr, Ipv4Addr};
/// use robots_route::{RobotsServer, RobotsServerSettings};
///
/// # #[tokio::main]
/// # async fn main() {
/// let server = RobotsServer::new(RobotsServerSettings::default()).await.unwrap();
/// server.start(&SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 3500)).await.unwrap();
/// # }
/// ```
#[derive(Debug)]
pub struct RobotsServer {
    router_inner: Router,
}

impl RobotsServer {
    /// Create a new server with the provided settings.
    ///
    /// Fails if the robots.txt payload could not be resolved.
    pub async fn new(settings: RobotsServerSettings) -> Result<Self> {
        let router = setup(Router::new(), &settings.robots_settings)
            .await?
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::new(Duration::from_secs(
                settings.request_timeout,
            )))
            .layer(CatchPanicLayer::new())
            .layer(axum_middleware::from_fn(middleware::header_middleware));

        Ok(Self {
            router_inner: router,
        })
    }

    /// The router backing this server, for embedding it in another service.
    pub fn router(&self) -> Router {
        self.router_inner.clone()
    }

    /// Start the server and expose it locally on the provided [`SocketAddr`].
    pub async fn start(self, address: &SocketAddr) -> Result<()> {
        let tcp_listener = TcpListener::bind(&address).await?;
        info!("Listening on http://{}", tcp_listener.local_addr()?);
        axum::serve(tcp_listener, self.router_inner)
            .with_graceful_shutdown(Self::shutdown_signal())
            .await?;
        Ok(())
    }

    // https://github.com/tokio-rs/axum/blob/15917c6dbcb4a48707a20e9cfd021992a279a662/examples/graceful-shutdown/src/main.rs#L55
    async fn shutdown_signal() {
        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("failed to install signal handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
    }
}
