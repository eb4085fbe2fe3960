use crate::config::toml_config::ClientConfig;
use crate::domain::query::{CategoryFilter, ListQuery, Resource};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};

pub const DEFAULT_TOKEN_FILE: &str = ".cyberlearn/tokens.json";

#[derive(Debug, Clone, Parser)]
#[command(name = "cyberlearn")]
#[command(about = "Command line client for the cybersecurity learning platform API")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML config file")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "API root, e.g. http://localhost:8000/api/v1")]
    pub base_url: Option<String>,

    #[arg(long, global = true, help = "Token file [default: .cyberlearn/tokens.json]")]
    pub token_file: Option<String>,

    #[arg(long, global = true, help = "Fail on malformed list responses")]
    pub strict: bool,

    #[arg(long, short, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List a collection (articles, courses, tests, discussions, ...)
    List {
        resource: Resource,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        ordering: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long, help = "Category id, slug or name")]
        category: Option<String>,
    },
    /// Print one item as JSON
    Show { resource: Resource, id: i64 },
    /// Log in and store the token pair
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored token pair
    Logout,
    /// Show the logged in user
    Whoami,
    /// Post a reply to a discussion
    Reply {
        #[arg(long)]
        discussion: i64,
        #[arg(long)]
        content: String,
    },
    /// Search articles, courses, discussions and tests
    Search { term: String },
}

impl CliConfig {
    /// File config (or defaults) with command line overrides applied.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(token_file) = &self.token_file {
            config.session.token_file = Some(token_file.clone());
        } else if config.session.token_file.is_none() {
            config.session.token_file = Some(DEFAULT_TOKEN_FILE.to_string());
        }
        if self.strict {
            config.behavior.strict_format = true;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        if self.json_logs {
            config.logging.json = true;
        }
        Ok(config)
    }
}

impl Command {
    pub fn list_query(&self) -> Option<ListQuery> {
        match self {
            Command::List {
                search,
                ordering,
                page,
                page_size,
                category,
                ..
            } => Some(ListQuery {
                search: search.clone(),
                ordering: ordering.clone(),
                page: *page,
                page_size: *page_size,
                category: category.as_deref().map(CategoryFilter::from),
                filters: Vec::new(),
            }),
            _ => None,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(token_file) = &self.token_file {
            validation::validate_path("token_file", token_file)?;
        }
        match &self.command {
            Command::List {
                page_size: Some(page_size),
                ..
            } => validation::validate_range("page_size", *page_size, 1, 1000),
            Command::Login { email, password } => {
                validation::validate_non_empty_string("email", email)?;
                validation::validate_non_empty_string("password", password)
            }
            Command::Reply { content, .. } => validation::validate_non_empty_string("content", content),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_command() {
        let cli = CliConfig::try_parse_from([
            "cyberlearn",
            "list",
            "articles",
            "--search",
            "phishing",
            "--category",
            "5",
            "--page-size",
            "10",
        ])
        .unwrap();

        let query = cli.command.list_query().unwrap();
        assert_eq!(query.search.as_deref(), Some("phishing"));
        assert_eq!(query.category, Some(CategoryFilter::Id(5)));
        assert_eq!(query.page_size, Some(10));
        assert!(matches!(
            cli.command,
            Command::List {
                resource: Resource::Articles,
                ..
            }
        ));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_unknown_resource_is_rejected() {
        assert!(CliConfig::try_parse_from(["cyberlearn", "list", "videos"]).is_err());
    }

    #[test]
    fn test_overrides_apply_to_client_config() {
        let cli = CliConfig::try_parse_from([
            "cyberlearn",
            "--base-url",
            "https://learn.example.com/api/v1",
            "--strict",
            "-v",
            "whoami",
        ])
        .unwrap();
        let config = cli.client_config().unwrap();
        assert_eq!(config.api.base_url, "https://learn.example.com/api/v1");
        assert!(config.behavior.strict_format);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.session.token_file.as_deref(),
            Some(".cyberlearn/tokens.json")
        );
    }

    #[test]
    fn test_token_file_flag_overrides_config_file() -> anyhow::Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        let config_path = temp_dir.path().join("cyberlearn.toml");
        std::fs::write(&config_path, "[session]\ntoken_file = \"/var/lib/cyberlearn/tokens.json\"\n")?;
        let config_arg = config_path.to_string_lossy().into_owned();

        let from_file = CliConfig::try_parse_from(["cyberlearn", "--config", &config_arg, "logout"])?
            .client_config()?;
        assert_eq!(
            from_file.session.token_file.as_deref(),
            Some("/var/lib/cyberlearn/tokens.json")
        );

        let overridden = CliConfig::try_parse_from([
            "cyberlearn",
            "--config",
            &config_arg,
            "--token-file",
            "/tmp/other/tokens.json",
            "logout",
        ])?
        .client_config()?;
        assert_eq!(
            overridden.session.token_file.as_deref(),
            Some("/tmp/other/tokens.json")
        );
        Ok(())
    }

    #[test]
    fn test_zero_page_size_fails_validation() {
        let cli = CliConfig::try_parse_from(["cyberlearn", "list", "tags", "--page-size", "0"])
            .unwrap();
        assert!(cli.validate().is_err());
    }
}
