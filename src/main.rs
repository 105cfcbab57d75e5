use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use aplcd_mcp::bridge::AplBridge;
use aplcd_mcp::config::ServerConfig;
use aplcd_mcp::mcp::tools::format_process_result;
use aplcd_mcp::mcp::{get_tool_definitions, McpServer};

/// MCP adapter for the APL-CD dependency-analysis engine.
#[derive(Parser)]
#[command(name = "aplcd-mcp", about = "MCP adapter for the APL-CD dependency-analysis engine")]
struct Cli {
    /// Path to a JSON config file (defaults apply when absent)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server over stdio
    Serve,
    /// Print the tool catalog
    Tools {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Run a script through the interpreter bridge and print the result
    Exec {
        /// Script text, or a file path when --file is set
        script: String,
        /// Treat the script argument as a file path
        #[arg(short, long)]
        file: bool,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries JSON-RPC traffic in serve mode.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> aplcd_mcp::errors::Result<()> {
    let config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    match cli.command {
        Commands::Serve => {
            let server = McpServer::new(AplBridge::new(&config));
            server.run().await?;
        }
        Commands::Tools { json } => {
            let tools = get_tool_definitions();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&tools).unwrap_or_default()
                );
            } else {
                for tool in &tools {
                    println!("{}", tool.name);
                    println!("  {}", tool.description);
                }
            }
        }
        Commands::Exec { script, file } => {
            let text = if file {
                std::fs::read_to_string(&script)?
            } else {
                script
            };
            let bridge = AplBridge::new(&config);
            let result = bridge.execute(&text).await?;
            println!("{}", format_process_result(&result));
        }
    }
    Ok(())
}
