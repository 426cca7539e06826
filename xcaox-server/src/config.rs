use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

/// Serves the XCAOX Maps viewer and its tile tree
#[derive(Debug, Clone, Parser)]
#[command(name = "xcaox-server", version, about)]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "XCAOX_BIND", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Directory holding index.html, assets/ and src/data/
    #[arg(long, env = "XCAOX_ROOT", default_value = ".")]
    pub root: PathBuf,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// The single-page shell served for unmatched paths
    pub fn index_file(&self) -> PathBuf {
        self.root.join("index.html")
    }
}
