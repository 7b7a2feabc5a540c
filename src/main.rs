use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use hooksmith::commands::{form, generate, serve};
use hooksmith::form::{ProxyClient, default_proxy_url};
use hooksmith::hooks::{Platform, Tone};
use hooksmith::llm;
use hooksmith::proxy::DEFAULT_ADDR;

#[derive(Parser, Debug)]
#[command(
    name = "hooksmith",
    version,
    about = "Short-form content hooks, generated by an LLM.",
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the hook proxy in front of the OpenAI API
    Serve {
        /// Address to listen on
        #[arg(long, value_name = "ADDR", default_value = DEFAULT_ADDR)]
        addr: SocketAddr,
        /// OpenAI API key. Defaults to the HOOKSMITH_OPENAI_API_KEY environment variable
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,
        /// Override the completion model
        #[arg(long, value_name = "MODEL")]
        model: Option<String>,
    },
    /// Open the interactive hook form
    Form {
        /// Hook proxy endpoint
        #[arg(long, value_name = "URL")]
        proxy_url: Option<String>,
    },
    /// Generate hooks once and print them
    Generate {
        /// Topic or idea. Prompted for when omitted
        #[arg(long)]
        topic: Option<String>,
        #[arg(long, value_enum)]
        platform: Option<Platform>,
        #[arg(long, value_enum)]
        tone: Option<Tone>,
        /// Copy all hooks to the clipboard, separated by blank lines
        #[arg(long, default_value_t = false)]
        copy_all: bool,
        /// Hook proxy endpoint
        #[arg(long, value_name = "URL")]
        proxy_url: Option<String>,
    },
    /// Verify the configured OpenAI API key
    KeyCheck {
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            addr,
            api_key,
            model,
        } => serve::run(addr, api_key, model).await?,
        Command::Form { proxy_url } => {
            let client = ProxyClient::new(proxy_url.unwrap_or_else(default_proxy_url));
            form::run(&client).await?;
        }
        Command::Generate {
            topic,
            platform,
            tone,
            copy_all,
            proxy_url,
        } => {
            let client = ProxyClient::new(proxy_url.unwrap_or_else(default_proxy_url));
            generate::run(
                &client,
                generate::GenerateArgs {
                    topic,
                    platform,
                    tone,
                    copy_all,
                },
            )
            .await
            .with_context(|| format!("Hook proxy: {}", client.url()))?;
        }
        Command::KeyCheck { api_key } => {
            let source = llm::test_configured_api_key(api_key.as_deref()).await?;
            println!("OpenAI API key from the {} is valid.", source.description());
        }
    }

    Ok(())
}
