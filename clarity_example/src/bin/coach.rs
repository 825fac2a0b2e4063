use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clarity_client::{
    CoachClient, EventSink, QueryMode, ReplyAccumulator, ReplyApi, ReplyRequest, Speaker,
};
use clarity_example::{init_logging, AppConfig};

#[derive(Parser)]
#[command(name = "coach")]
#[command(about = "Request coach replies and manage prompts on a Clarity service")]
#[command(version)]
struct Args {
    /// Override the configured service URL
    #[arg(long, env = "CLARITY_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a reply to a student or patient message
    Reply {
        /// The incoming message
        content: String,
        #[arg(long, default_value = "student")]
        speaker: Speaker,
        #[arg(long, default_value = "Default")]
        prompt: String,
        #[arg(long, default_value = "hybrid")]
        mode: QueryMode,
        #[arg(long)]
        student_name: Option<String>,
        #[arg(long)]
        namespace: Option<String>,
        /// Wait for the full reply instead of streaming it
        #[arg(long)]
        no_stream: bool,
    },
    /// List available prompt keys
    Prompts,
    /// Print one prompt
    Prompt {
        key: String,
    },
}

/// Prints reply text as it arrives while keeping a copy of the reply
struct ConsoleSink {
    reply: ReplyAccumulator,
}

impl EventSink for ConsoleSink {
    fn on_chunk(&mut self, text: &str) {
        print!("{}", text);
        let _ = std::io::stdout().flush();
        self.reply.on_chunk(text);
    }

    fn on_error(&mut self, message: &str) {
        tracing::warn!("Reply stream error: {}", message);
        self.reply.on_error(message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(base_url) = args.base_url {
        config.service.base_url = base_url;
    }

    init_logging(&config.logging);
    tracing::info!("Using coach service at {}", config.service.base_url);

    let client = config
        .client_config()
        .into_client()
        .context("Failed to create coach client")?;

    match args.command {
        Commands::Reply {
            content,
            speaker,
            prompt,
            mode,
            student_name,
            namespace,
            no_stream,
        } => {
            let mut request = ReplyRequest::new(speaker, content).prompt(prompt).mode(mode);
            if let Some(name) = student_name {
                request = request.student_name(name);
            }
            if let Some(namespace) = namespace {
                request = request.namespace(namespace);
            }

            if no_stream {
                reply_once(&client, &request).await?;
            } else {
                reply_streaming(&client, &request).await?;
            }
        }
        Commands::Prompts => {
            for option in client.fetch_prompt_options().await? {
                println!("{}", option.value);
            }
        }
        Commands::Prompt { key } => {
            let prompt = client
                .get_prompt(&key)
                .await
                .with_context(|| format!("Failed to fetch prompt {}", key))?;
            println!("{}", prompt);
        }
    }

    Ok(())
}

async fn reply_once(client: &CoachClient, request: &ReplyRequest) -> Result<()> {
    let response = client.coach_reply(request).await?;
    match response.text() {
        Some(text) => println!("{}", text),
        None => anyhow::bail!("Service returned an empty reply"),
    }
    Ok(())
}

async fn reply_streaming(client: &CoachClient, request: &ReplyRequest) -> Result<()> {
    let mut sink = ConsoleSink {
        reply: ReplyAccumulator::new(),
    };

    let dispatched = client.coach_reply_text_stream(request, &mut sink).await;
    println!();

    tracing::info!(
        events = dispatched,
        chunks = sink.reply.chunk_count(),
        "Reply stream finished"
    );

    if sink.reply.text().is_empty() && sink.reply.has_failures() {
        anyhow::bail!("Reply failed: {}", sink.reply.failures().join("; "));
    }

    Ok(())
}
