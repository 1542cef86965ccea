use clap::{Parser, builder::BoolishValueParser};
use omics_core::Endpoints;
use omics_core::client::{
    DEFAULT_CHEMBL_URL,
    DEFAULT_DRUGBANK_URL,
    DEFAULT_HGNC_URL,
    DEFAULT_PDB_URL,
    DEFAULT_PUBCHEM_URL,
    DEFAULT_UNIPROT_URL,
};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4020";
const DEFAULT_GATEWAY_ADDR: &str = "127.0.0.1:4010";
const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 30;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "omics-mcpd", version, about = "mcp-omics MCP daemon.")]
struct CliArgs {
    #[arg(
        long = "stdio",
        env = "OMICS_ENABLE_STDIO",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "OMICS_MCP_SERVE",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(long, env = "OMICS_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        env = "OMICS_GATEWAY_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    gateway_serve: bool,

    #[arg(long, env = "OMICS_GATEWAY_ADDR", default_value = DEFAULT_GATEWAY_ADDR)]
    gateway_addr: SocketAddr,

    #[arg(
        long,
        env = "OMICS_GATEWAY_TIMEOUT_SECS",
        default_value_t = DEFAULT_GATEWAY_TIMEOUT_SECS
    )]
    gateway_timeout_secs: u64,

    #[arg(
        long,
        env = "OMICS_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_HTTP_TIMEOUT_SECS
    )]
    http_timeout_secs: u64,

    #[arg(long, env = "OMICS_PDB_URL", default_value = DEFAULT_PDB_URL)]
    pdb_url: String,

    #[arg(long, env = "OMICS_CHEMBL_URL", default_value = DEFAULT_CHEMBL_URL)]
    chembl_url: String,

    #[arg(long, env = "OMICS_PUBCHEM_URL", default_value = DEFAULT_PUBCHEM_URL)]
    pubchem_url: String,

    #[arg(long, env = "OMICS_DRUGBANK_URL", default_value = DEFAULT_DRUGBANK_URL)]
    drugbank_url: String,

    #[arg(long, env = "OMICS_UNIPROT_URL", default_value = DEFAULT_UNIPROT_URL)]
    uniprot_url: String,

    #[arg(long, env = "OMICS_HGNC_URL", default_value = DEFAULT_HGNC_URL)]
    hgnc_url: String,

    #[arg(long, env = "OMICS_LOG", default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct OmicsConfig {
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub mcp_http_addr: SocketAddr,
    pub gateway_serve: bool,
    pub gateway_addr: SocketAddr,
    pub gateway_timeout: Duration,
    pub http_timeout: Duration,
    pub endpoints: Endpoints,
    pub log_filter: String,
}

#[derive(Debug)]
pub enum ConfigError {
    NothingToServe,
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToServe => write!(
                f,
                "no server enabled: set OMICS_ENABLE_STDIO, OMICS_MCP_SERVE, or OMICS_GATEWAY_SERVE"
            ),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl OmicsConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for OmicsConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if !(args.enable_stdio || args.mcp_serve || args.gateway_serve) {
            return Err(ConfigError::NothingToServe);
        }

        if args.http_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "OMICS_HTTP_TIMEOUT_SECS",
                value: args.http_timeout_secs.to_string(),
            });
        }
        if args.gateway_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "OMICS_GATEWAY_TIMEOUT_SECS",
                value: args.gateway_timeout_secs.to_string(),
            });
        }

        let endpoints = Endpoints {
            pdb: base_url("OMICS_PDB_URL", args.pdb_url)?,
            chembl: base_url("OMICS_CHEMBL_URL", args.chembl_url)?,
            pubchem: base_url("OMICS_PUBCHEM_URL", args.pubchem_url)?,
            drugbank: base_url("OMICS_DRUGBANK_URL", args.drugbank_url)?,
            uniprot: base_url("OMICS_UNIPROT_URL", args.uniprot_url)?,
            hgnc: base_url("OMICS_HGNC_URL", args.hgnc_url)?,
        };

        let log_filter = if args.log_filter.trim().is_empty() {
            DEFAULT_LOG_FILTER.to_string()
        } else {
            args.log_filter
        };

        Ok(Self {
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            mcp_http_addr: args.mcp_http_addr,
            gateway_serve: args.gateway_serve,
            gateway_addr: args.gateway_addr,
            gateway_timeout: Duration::from_secs(args.gateway_timeout_secs),
            http_timeout: Duration::from_secs(args.http_timeout_secs),
            endpoints,
            log_filter,
        })
    }
}

fn base_url(name: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidSetting { name, value })
    }
}
