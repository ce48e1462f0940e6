//! Configuration for Storefront
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;
use uuid::Uuid;

/// Storefront - catalog gateway for the boycotted-products directory
#[derive(Parser, Debug, Clone)]
#[command(name = "storefront")]
#[command(about = "Catalog gateway for the boycotted-products directory")]
pub struct Args {
    /// Unique identifier for this instance
    #[arg(long, env = "NODE_ID", default_value_t = Uuid::new_v4())]
    pub node_id: Uuid,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "boycott")]
    pub mongodb_db: String,

    /// Whether detail lookups return entries that are still awaiting review.
    ///
    /// The public listing and search never expose pending entries. Detail
    /// lookups historically did; turning this off applies the same
    /// visibility filter to the detail path.
    #[arg(
        long,
        env = "DETAIL_INCLUDES_PENDING",
        default_value = "true",
        action = clap::ArgAction::Set
    )]
    pub detail_includes_pending: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validate configuration at startup
    pub fn validate(&self) -> Result<(), String> {
        if !self.mongodb_uri.starts_with("mongodb://")
            && !self.mongodb_uri.starts_with("mongodb+srv://")
        {
            return Err(format!(
                "MONGODB_URI must start with mongodb:// or mongodb+srv://, got '{}'",
                self.mongodb_uri
            ));
        }

        if self.mongodb_db.is_empty() {
            return Err("MONGODB_DB must not be empty".to_string());
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(format!("Unknown log level '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args::parse_from(["storefront"])
    }

    #[test]
    fn defaults_are_valid() {
        let args = base_args();
        assert!(args.validate().is_ok());
        assert!(args.detail_includes_pending);
        assert_eq!(args.listen.port(), 3000);
    }

    #[test]
    fn rejects_non_mongodb_uri() {
        let mut args = base_args();
        args.mongodb_uri = "postgres://localhost".to_string();
        assert!(args.validate().is_err());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut args = base_args();
        args.log_level = "loud".to_string();
        assert!(args.validate().is_err());
    }

    #[test]
    fn detail_policy_flag_can_be_disabled() {
        let args = Args::parse_from(["storefront", "--detail-includes-pending", "false"]);
        assert!(!args.detail_includes_pending);
    }
}
