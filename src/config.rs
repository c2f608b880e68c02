// Configuration: the clap flag surface and the plain values derived from
// it. `Cli::into_config` runs once in `main`; everything downstream only
// sees the immutable `Config`.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::api::{ImportOptions, OVERWRITE_EXISTING};

pub const DEFAULT_API_VERSION: &str = "2024-03-28";
pub const DEFAULT_FILE: &str = "swagger.yaml";

/// Upload an OpenAPI/Swagger document to an Apifox project.
///
/// Option values are passed to the import endpoint as given. See
/// https://apifox-openapi.apifox.cn/api-173409873 for what they mean.
#[derive(Debug, Parser)]
#[command(name = "apifox-import", disable_version_flag = true)]
pub struct Cli {
    /// Show version and build information
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// More output (prints the raw response body)
    #[arg(long)]
    pub verbose: bool,

    /// Apifox project id
    #[arg(long = "projectID", required_unless_present = "version")]
    pub project_id: Option<String>,

    /// Value of the X-Apifox-Api-Version header
    #[arg(long = "apiver", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Apifox API token
    #[arg(
        long,
        env = "APIFOX_TOKEN",
        hide_env_values = true,
        required_unless_present = "version"
    )]
    pub token: Option<String>,

    /// Swagger file path
    #[arg(long, default_value = DEFAULT_FILE)]
    pub file: PathBuf,

    /// Folder receiving imported endpoints (0 for none)
    #[arg(long = "targetEndpointFolderId", default_value_t = 0)]
    pub target_endpoint_folder_id: i64,

    /// Folder receiving imported schemas (0 for none)
    #[arg(long = "targetSchemaFolderId", default_value_t = 0)]
    pub target_schema_folder_id: i64,

    #[arg(long = "endpointOverwriteBehavior", default_value = OVERWRITE_EXISTING)]
    pub endpoint_overwrite_behavior: String,

    #[arg(long = "schemaOverwriteBehavior", default_value = OVERWRITE_EXISTING)]
    pub schema_overwrite_behavior: String,

    #[arg(long = "updateFolderOfChangedEndpoint")]
    pub update_folder_of_changed_endpoint: bool,

    #[arg(long = "prependBasePath")]
    pub prepend_base_path: bool,

    /// Give up on the request after this many seconds (no limit by default)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

/// Build metadata printed by `-v`. Set `APIFOX_IMPORT_GIT_VERSION` and
/// `APIFOX_IMPORT_BUILD_TIME` at compile time to fill it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub git_version: String,
    pub build_time: String,
}

impl BuildInfo {
    pub fn from_build_env() -> Self {
        BuildInfo {
            git_version: option_env!("APIFOX_IMPORT_GIT_VERSION")
                .unwrap_or(env!("CARGO_PKG_VERSION"))
                .to_string(),
            build_time: option_env!("APIFOX_IMPORT_BUILD_TIME")
                .unwrap_or("unknown")
                .to_string(),
        }
    }
}

/// Everything the import call needs, and nothing else.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub project_id: String,
    pub api_version: String,
    pub token: String,
    pub options: ImportOptions,
    pub timeout: Option<Duration>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            project_id: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            token: String::new(),
            options: ImportOptions::default(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Config {
    /// `-v`: print build info and exit.
    Version(BuildInfo),
    Import {
        file: PathBuf,
        verbose: bool,
        import: ImportConfig,
    },
}

impl Cli {
    pub fn into_config(self) -> Config {
        if self.version {
            return Config::Version(BuildInfo::from_build_env());
        }
        let options = ImportOptions {
            target_endpoint_folder_id: self.target_endpoint_folder_id,
            target_schema_folder_id: self.target_schema_folder_id,
            endpoint_overwrite_behavior: self.endpoint_overwrite_behavior,
            schema_overwrite_behavior: self.schema_overwrite_behavior,
            update_folder_of_changed_endpoint: self.update_folder_of_changed_endpoint,
            prepend_base_path: self.prepend_base_path,
        };
        // clap enforces presence of both unless `-v` was given.
        Config::Import {
            file: self.file,
            verbose: self.verbose,
            import: ImportConfig {
                project_id: self.project_id.unwrap_or_default(),
                api_version: self.api_version,
                token: self.token.unwrap_or_default(),
                options,
                timeout: self.timeout.map(Duration::from_secs),
            },
        }
    }
}
