use clap::Parser;
use cyberlearn_client::config::Command;
use cyberlearn_client::core::coercer::join_labels;
use cyberlearn_client::utils::error::{ClientError, ErrorSeverity};
use cyberlearn_client::utils::{logger, validation::Validate};
use cyberlearn_client::{CliConfig, PortalClient, Resource};
use cyberlearn_client::{HttpTransport, Result};
use serde_json::Value;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match cli.client_config() {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    if config.logging.json {
        logger::init_json_logger(&config.logging.level);
    } else {
        logger::init_cli_logger(cli.verbose || config.logging.level == "debug");
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(e);
    }

    let client = match config.open_session().and_then(|session| {
        PortalClient::connect(&config.http_settings(), session)
            .map(|client| client.with_format_policy(config.format_policy()))
    }) {
        Ok(client) => client,
        Err(e) => exit_with(e),
    };

    if let Err(e) = run(&client, &cli.command).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        exit_with(e);
    }
}

async fn run(client: &PortalClient<HttpTransport>, command: &Command) -> Result<()> {
    match command {
        Command::List { resource, .. } => {
            let query = command.list_query().unwrap_or_default();
            match resource {
                Resource::Articles => {
                    for article in client.list_articles(&query).await? {
                        println!(
                            "{}\t{}\t{}\t{}",
                            article.id,
                            article.title,
                            article.category.display_name(),
                            join_labels(&article.tags, ", ")
                        );
                    }
                }
                other => {
                    for record in client.list_records(*other, &query).await? {
                        let title = match record.display("title") {
                            t if t.is_empty() => record.display("name"),
                            t => t,
                        };
                        println!(
                            "{}\t{}\t{}",
                            record.display("id"),
                            title,
                            record.display("category")
                        );
                    }
                }
            }
        }
        Command::Show { resource, id } => {
            let item: Value = client.get(*resource, *id).await?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        Command::Login { email, password } => {
            let response = client.login(email, password).await?;
            match response.user {
                Some(user) => println!("✅ Logged in as {}", user.display_name()),
                None => println!("✅ Logged in"),
            }
        }
        Command::Logout => {
            if client.logout().await? {
                println!("👋 Logged out");
            } else {
                println!("Not logged in");
            }
        }
        Command::Whoami => {
            if !client.session().is_authenticated().await {
                return Err(ClientError::NotAuthenticated {
                    message: "no stored session".to_string(),
                });
            }
            let user = client.current_user().await?;
            println!("{} <{}>", user.display_name(), user.email);
        }
        Command::Reply {
            discussion,
            content,
        } => {
            let reply = client.create_reply(*discussion, content).await?;
            println!("✅ Reply #{} posted to discussion #{}", reply.id, discussion);
        }
        Command::Search { term } => {
            let results = client.search(term).await?;
            for article in &results.articles {
                println!("article\t{}\t{}", article.id, article.title);
            }
            for course in &results.courses {
                println!("course\t{}\t{}", course.id, course.title);
            }
            for discussion in &results.discussions {
                println!("discussion\t{}\t{}", discussion.id, discussion.title);
            }
            for test in &results.tests {
                println!("test\t{}\t{}", test.id, test.title);
            }
        }
    }
    Ok(())
}

fn exit_with(e: ClientError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
