use anyhow::Result;
use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use dotenvy::dotenv;
use robots_route::{
    DEFAULT_MAX_AGE, RobotsServer, RobotsServerSettings, RobotsSettings, TextEncoding,
};
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::EnvFilter;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::BrightMagenta.on_default() | Effects::BOLD)
        .usage(AnsiColor::BrightMagenta.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default())
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about, styles = styles())]
struct AppOptions {
    /// The socket address that the local server should be hosted on.
    #[arg(
        long = "address",
        env = "ROBOTS_ROUTE_ADDRESS",
        default_value = "127.0.0.1:3500"
    )]
    address: SocketAddr,

    /// The maximum lifetime of an incoming request before it is forcefully terminated (in seconds).
    #[arg(
        long = "request-timeout",
        env = "ROBOTS_ROUTE_REQUEST_TIMEOUT",
        default_value_t = 10
    )]
    request_timeout: u64,

    /// A file to serve as robots.txt instead of the built-in default that allows everything.
    #[arg(long = "robots-file", env = "ROBOTS_ROUTE_FILE")]
    robots_file: Option<PathBuf>,

    /// The text encoding used to read the robots.txt file.
    ///
    /// One of utf8, utf16le, latin1, ascii, base64, base64url or hex.
    #[arg(
        long = "robots-encoding",
        env = "ROBOTS_ROUTE_ENCODING",
        default_value_t = TextEncoding::Utf8
    )]
    robots_encoding: TextEncoding,

    /// How long clients may cache robots.txt for, sent as the Cache-Control max-age (in seconds).
    #[arg(
        long = "robots-max-age",
        env = "ROBOTS_ROUTE_MAX_AGE",
        default_value_t = DEFAULT_MAX_AGE
    )]
    robots_max_age: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("info")))
        .init();
    let args = AppOptions::parse();

    RobotsServer::new(RobotsServerSettings {
        request_timeout: args.request_timeout,
        robots_settings: RobotsSettings {
            filepath: args.robots_file,
            encoding: args.robots_encoding,
            max_age: args.robots_max_age,
        },
    })
    .await?
    .start(&args.address)
    .await
}
