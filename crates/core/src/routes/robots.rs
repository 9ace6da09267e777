use crate::{ConfigurationError, RobotsSettings, TextEncoding};
use axum::{
    Router,
    http::{HeaderValue, header},
    routing::get,
};
use bytes::Bytes;
use std::path::Path;
use tracing::{debug, info};

/// Path the robots.txt route is registered on.
pub const ROBOTS_ENDPOINT: &str = "/robots.txt";

/// Body served when no file has been configured.
pub const DEFAULT_ROBOTS_TXT: &str = "User-agent: *\nAllow: /\n";

const CONTENT_TYPE_TEXT_UTF8: HeaderValue = HeaderValue::from_static("text/plain; charset=utf-8");

/// A fully resolved robots.txt response.
///
/// Built once with [`RobotsTxt::load`] and then moved into the route handler,
/// every request is answered from this value without touching the filesystem.
#[derive(Debug, Clone)]
pub struct RobotsTxt {
    body: Bytes,
    cache_control: HeaderValue,
}

impl RobotsTxt {
    /// Resolve the payload described by the provided [`RobotsSettings`].
    ///
    /// When a file is configured it is read once, decoded with the configured
    /// [`TextEncoding`] and rejected if that produced an empty string.
    pub async fn load(settings: &RobotsSettings) -> Result<Self, ConfigurationError> {
        let body = match &settings.filepath {
            Some(filepath) => Bytes::from(read_robots_file(filepath, settings.encoding).await?),
            None => {
                debug!("No robots.txt file configured, using the default");
                Bytes::from_static(DEFAULT_ROBOTS_TXT.as_bytes())
            }
        };

        Ok(Self {
            body,
            cache_control: HeaderValue::try_from(format!("public, max-age={}", settings.max_age))
                .expect("cache-control with a decimal max-age should be a valid header value"),
        })
    }

    /// The exact bytes that will be served.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Register the `GET /robots.txt` route on the given router.
    pub fn install<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.route(
            ROBOTS_ENDPOINT,
            get(move || {
                let robots = self.clone();
                async move {
                    (
                        [
                            (header::CONTENT_TYPE, CONTENT_TYPE_TEXT_UTF8),
                            (header::CACHE_CONTROL, robots.cache_control),
                        ],
                        robots.body,
                    )
                }
            }),
        )
    }
}

/// Load the robots.txt payload and install its route on `router`.
///
/// The router is only handed back when the payload was resolved, so a failed
/// setup never leaves a partially registered route behind.
pub async fn setup<S>(
    router: Router<S>,
    settings: &RobotsSettings,
) -> Result<Router<S>, ConfigurationError>
where
    S: Clone + Send + Sync + 'static,
{
    Ok(RobotsTxt::load(settings).await?.install(router))
}

/// Extension methods for installing the robots.txt route on a [`Router`].
pub trait RouterExt<S>: Sized {
    /// See [`setup`].
    fn robots_txt(
        self,
        settings: &RobotsSettings,
    ) -> impl Future<Output = Result<Self, ConfigurationError>> + Send;
}

impl<S> RouterExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn robots_txt(self, settings: &RobotsSettings) -> Result<Self, ConfigurationError> {
        setup(self, settings).await
    }
}

async fn read_robots_file(
    filepath: &Path,
    encoding: TextEncoding,
) -> Result<String, ConfigurationError> {
    let path = std::path::absolute(filepath).map_err(|source| ConfigurationError::Load {
        path: filepath.to_path_buf(),
        source,
    })?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| ConfigurationError::Load {
            path: path.clone(),
            source,
        })?;

    let content = encoding.decode(&bytes);
    if content.is_empty() {
        return Err(ConfigurationError::EmptyFile { path });
    }

    info!(
        "Loaded robots.txt from {} ({} bytes, {encoding})",
        path.display(),
        bytes.len()
    );
    Ok(content)
}
