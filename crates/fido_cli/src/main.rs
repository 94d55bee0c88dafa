use clap::Parser;
use fido_behavior::{Sequence, SequencingStrategy};
use fido_core::{FidoConfig, InputEvent};
use fido_gateway::{HttpSequenceStore, MemoryStore, SequenceStore, StoreServer};
use fido_reasoning::{providers, BehaviorSession, CompletionParams};
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long, default_value = "fido.toml")]
    config: String,

    /// Override the configured model
    #[arg(short, long)]
    model: Option<String>,

    /// Override the personality description
    #[arg(long)]
    personality: Option<String>,

    /// Use the canned mock model (no API key needed)
    #[arg(long)]
    mock: bool,

    /// Route multi-goal sequences through the transition graph
    #[arg(long)]
    pathfinder: bool,

    /// Don't upload produced sequences to the store
    #[arg(long)]
    no_upload: bool,

    /// Run the sequence store server instead of the interactive loop
    #[arg(long)]
    serve: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let mut config = FidoConfig::load_or_default(&args.config);
    if let Some(model) = &args.model {
        config.llm.model = model.clone();
    }
    if args.mock {
        config.llm.provider = "mock".to_string();
    }
    if let Some(personality) = &args.personality {
        config.behavior.personality = personality.clone();
    }

    if args.serve {
        info!(
            "Starting sequence store on {}:{}",
            config.store.host, config.store.port
        );
        let store = Arc::new(MemoryStore::default());
        let handle = StoreServer::new(store, &config.store.host, config.store.port).start();
        handle.await?;
        return Ok(());
    }

    let model = providers::from_config(&config.llm)?;
    let params = CompletionParams {
        max_tokens: config.llm.max_tokens,
        temperature: config.llm.temperature,
    };
    let strategy = if args.pathfinder {
        SequencingStrategy::Pathfinder
    } else {
        SequencingStrategy::DirectBlend
    };
    let mut session = BehaviorSession::new(config.behavior.clone(), model)
        .with_params(params)
        .with_strategy(strategy);

    let store = if args.no_upload {
        None
    } else {
        Some(HttpSequenceStore::new(&config.store.base_url)?)
    };

    println!("Fido is listening. Describe what you do (append '@ 0.8' for intensity).");
    println!("Commands: 'state' shows emotions, 'decay' lets feelings settle, 'quit' exits.");
    print!("> ");
    io::stdout().flush()?;

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let trimmed = input.trim();

        match trimmed {
            "" => {}
            "quit" | "exit" => break,
            "state" => print_state(&session),
            "decay" => {
                session.profile_mut().emotions_mut().decay(0.05);
                print_state(&session);
            }
            _ => {
                let event = parse_event(trimmed);
                match session.handle_event(event).await {
                    Ok(sequence) => {
                        print_sequence(&sequence);
                        if let Some(store) = &store {
                            if let Err(e) = store.put(sequence).await {
                                warn!("Upload failed: {}", e);
                            }
                        }
                    }
                    Err(e) => println!("\n[Error]: {}\n", e),
                }
            }
        }

        print!("> ");
        io::stdout().flush()?;
    }

    Ok(())
}

/// Lines like "throws a ball @ 0.8" carry an intensity hint.
fn parse_event(line: &str) -> InputEvent {
    if let Some((text, value)) = line.rsplit_once('@') {
        if let Ok(intensity) = value.trim().parse::<f32>() {
            return InputEvent::with_intensity(text.trim(), intensity);
        }
    }
    InputEvent::new(line)
}

fn print_state(session: &BehaviorSession) {
    let profile = session.profile();
    println!("\nCurrent action: {}", profile.current_action());
    println!("Feeling:");
    for (emotion, weight) in profile.emotions().top(3) {
        println!("  {:<16} {:.2}", emotion, weight);
    }
    println!();
}

fn print_sequence(sequence: &Sequence) {
    println!();
    for (i, step) in sequence.iter().enumerate() {
        let mut strongest: Vec<(&String, &f32)> = step.emotions.iter().collect();
        strongest.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));
        let mood: Vec<String> = strongest
            .iter()
            .take(2)
            .map(|(e, w)| format!("{} {:.2}", e, w))
            .collect();
        println!("{}. {} [{}]", i + 1, step.action, mood.join(", "));
    }
    println!();
}
