//! RagChat CLI - Terminal client for the RagChat backend
//!
//! Chat with the backend, upload documents into collections and configure
//! the generation chain from the command line.

mod chat;

use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use ragchat_applications::{
    ChainConfigPanel, CollectionCatalog, ConnectionProbe, ConversationSession, ProbeState,
    SendOptions, TurnOutcome, UploadCoordinator,
};
use ragchat_client::{
    ChatApi, DocumentApi, DocumentMetadata, ModelApi, RagQueryRequest, RagchatClient,
};
use ragchat_core::{
    default_config_paths, init_logging, log_operation_error, log_operation_start,
    log_operation_success, performance, ErrorContext, LoggingConfig, RagchatConfig, RagchatError,
    RagchatResult,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "ragchat")]
#[command(about = "Chat with an AI backend and manage its document collections")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat
    Chat {
        /// Ground answers in this collection
        #[arg(short = 'r', long)]
        collection: Option<String>,

        /// Send only the newest message instead of the whole conversation
        #[arg(long)]
        skip_memory: bool,
    },

    /// Ask a single question
    Ask {
        /// Question to ask
        question: String,

        /// Ground the answer in this collection
        #[arg(short = 'r', long)]
        collection: Option<String>,
    },

    /// Query a collection directly and show the sources used
    Query {
        /// Question to ask
        question: String,

        /// Collection to search
        #[arg(short = 'r', long, default_value = "default")]
        collection: String,

        /// Number of chunks to retrieve
        #[arg(short = 'k', long, default_value = "3")]
        num_results: u32,
    },

    /// Upload a document into a collection
    Upload {
        /// File to upload
        file: PathBuf,

        /// Target collection; created when it does not exist yet
        #[arg(short = 'r', long)]
        collection: Option<String>,

        /// Characters per chunk (100-10000)
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Characters shared by neighbouring chunks (at most chunk size - 50)
        #[arg(long)]
        chunk_overlap: Option<usize>,

        /// Send the file contents as text under this document name
        #[arg(long)]
        document_name: Option<String>,

        /// Source recorded in the document metadata (text uploads only)
        #[arg(long)]
        source: Option<String>,
    },

    /// Manage document collections
    Collections {
        #[command(subcommand)]
        action: Option<CollectionAction>,
    },

    /// Configure the system prompt of the generation chain
    Chain {
        /// System message for the chain
        system_message: String,

        /// Sampling temperature (0.0-1.0, step 0.1)
        #[arg(short, long)]
        temperature: Option<f32>,
    },

    /// List models available on the backend
    Models,

    /// Check that the backend is reachable and healthy
    Health,

    /// Inspect stored document chunks
    Documents {
        #[command(subcommand)]
        action: DocumentAction,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Initialize default configuration
        #[arg(long)]
        init: bool,

        /// Set a configuration value (key=value format)
        #[arg(long)]
        set: Option<String>,

        /// Get a configuration value
        #[arg(long)]
        get: Option<String>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,

        /// Validate current configuration
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Subcommand)]
enum CollectionAction {
    /// List collections
    List,
    /// Delete a collection and its documents
    Delete { name: String },
    /// Show the chunks of a collection most similar to a query
    Search {
        collection: String,
        query: String,
        #[arg(short = 'k', long, default_value = "3")]
        top_k: u32,
    },
}

#[derive(Subcommand)]
enum DocumentAction {
    /// List stored chunks
    List,
    /// Show one chunk
    Get { id: String },
    /// Delete one chunk
    Delete { id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_path) = load_config(cli.config.as_ref())?;

    // Initialize logging with unified system
    let logging_config = if cli.verbose {
        LoggingConfig::verbose()
    } else {
        config.logging.clone()
    };
    init_logging(&logging_config).map_err(|e| RagchatError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli")
            .with_operation("init_logging")
            .with_suggestion("Check the [logging] section of your configuration"),
    })?;

    info!("Starting RagChat CLI v{}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => info!("Loaded configuration from {:?}", path),
        None => info!("No configuration file found, using defaults"),
    }

    // Execute command
    match cli.command {
        Commands::Chat {
            collection,
            skip_memory,
        } => {
            handle_chat(collection, skip_memory, &config).await?;
        }
        Commands::Ask {
            question,
            collection,
        } => {
            handle_ask(question, collection, &config).await?;
        }
        Commands::Query {
            question,
            collection,
            num_results,
        } => {
            handle_query(question, collection, num_results, &config).await?;
        }
        Commands::Upload {
            file,
            collection,
            chunk_size,
            chunk_overlap,
            document_name,
            source,
        } => {
            handle_upload(
                file,
                collection,
                chunk_size,
                chunk_overlap,
                document_name,
                source,
                &config,
            )
            .await?;
        }
        Commands::Collections { action } => {
            handle_collections(action.unwrap_or(CollectionAction::List), &config).await?;
        }
        Commands::Chain {
            system_message,
            temperature,
        } => {
            handle_chain(system_message, temperature, &config).await?;
        }
        Commands::Models => {
            handle_models(&config).await?;
        }
        Commands::Health => {
            handle_health(&config).await?;
        }
        Commands::Documents { action } => {
            handle_documents(action, &config).await?;
        }
        Commands::Config {
            show,
            init,
            set,
            get,
            reset,
            validate,
        } => {
            handle_config(cli.config, show, init, set, get, reset, validate).await?;
        }
    }

    Ok(())
}

/// Load configuration and apply environment overrides
fn load_config(config_path: Option<&PathBuf>) -> RagchatResult<(RagchatConfig, Option<PathBuf>)> {
    let path = match config_path {
        Some(path) => Some(path.clone()),
        None => default_config_paths().into_iter().find(|path| path.exists()),
    };

    let mut config = match &path {
        Some(path) => RagchatConfig::from_file(path)?,
        None => RagchatConfig::default(),
    };
    config.apply_env_overrides()?;

    Ok((config, path))
}

fn connect(config: &RagchatConfig) -> RagchatResult<RagchatClient> {
    RagchatClient::from_api_config(&config.api)
}

async fn handle_chat(
    collection: Option<String>,
    skip_memory: bool,
    config: &RagchatConfig,
) -> anyhow::Result<()> {
    log_operation_start!("chat_mode");

    let client = connect(config)?;
    println!("🤖 RagChat connected to {}", client.base_url());

    let session = ConversationSession::new(Arc::new(client.chat()), &config.chat);
    let catalog = CollectionCatalog::new(Arc::new(client.documents()));
    let composer = chat::Composer {
        use_memory: !(skip_memory || config.chat.skip_memory),
        rag_collection: collection.or_else(|| config.chat.default_collection.clone()),
    };

    chat::run(session, catalog, composer).await?;

    log_operation_success!("chat_mode");
    Ok(())
}

async fn handle_ask(
    question: String,
    collection: Option<String>,
    config: &RagchatConfig,
) -> anyhow::Result<()> {
    log_operation_start!("ask_question");

    let client = connect(config)?;
    let session = ConversationSession::new(Arc::new(client.chat()), &config.chat);
    let options = SendOptions::new(
        config.chat.skip_memory,
        collection.or_else(|| config.chat.default_collection.clone()),
    );

    match session.submit(&question, options).await {
        Ok(TurnOutcome::Answered { reply, model }) => {
            println!("🎯 {}", reply);
            println!("\n🤖 Model: {}", model);
            log_operation_success!("ask_question", model = %model);
            Ok(())
        }
        Ok(TurnOutcome::Stale) => Ok(()),
        Err(e) => {
            log_operation_error!("ask_question", e);
            let message = session.error().unwrap_or_else(|| e.user_message());
            Err(anyhow!(message))
        }
    }
}

async fn handle_query(
    question: String,
    collection: String,
    num_results: u32,
    config: &RagchatConfig,
) -> anyhow::Result<()> {
    log_operation_start!("rag_query", collection = %collection);

    let client = connect(config)?;
    let response = client
        .documents()
        .query(RagQueryRequest {
            query: question,
            collection_name: collection,
            num_results,
        })
        .await
        .map_err(|e| {
            log_operation_error!("rag_query", e);
            anyhow!(e.user_message())
        })?;

    println!("🎯 **Answer:**");
    println!("{}", response.answer);

    if !response.sources.is_empty() {
        println!("\n📋 **Sources ({} chunks):**", response.sources.len());
        for (i, source) in response.sources.iter().enumerate() {
            let origin = source
                .metadata
                .get("source")
                .and_then(|value| value.as_str())
                .unwrap_or("unknown");
            println!("  {}. {} - {}", i + 1, origin, preview(&source.content, 120));
        }
    }

    println!("\n🤖 Model: {}", response.model);
    if let Some(embedding_model) = &response.embedding_model {
        println!("🧮 Embeddings: {}", embedding_model);
    }

    log_operation_success!("rag_query");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn handle_upload(
    file: PathBuf,
    collection: Option<String>,
    chunk_size: Option<usize>,
    chunk_overlap: Option<usize>,
    document_name: Option<String>,
    source: Option<String>,
    config: &RagchatConfig,
) -> anyhow::Result<()> {
    log_operation_start!("upload_document", file = %file.display());

    let client = connect(config)?;
    let documents: Arc<dyn DocumentApi> = Arc::new(client.documents());
    let catalog = CollectionCatalog::new(documents.clone());
    let uploads = UploadCoordinator::new(documents, catalog.clone(), &config.upload);

    let existing = catalog.refresh().await;
    if let Some(error) = catalog.error() {
        println!("⚠️  {}", error);
    }

    uploads.update(|form| {
        form.set_file(Some(file.clone()));

        if let Some(size) = chunk_size {
            let applied = form.set_chunk_size(size);
            if applied != size {
                println!("📏 Chunk size adjusted to {}", applied);
            }
        }
        if let Some(overlap) = chunk_overlap {
            let applied = form.set_chunk_overlap(overlap);
            if applied != overlap {
                println!("📏 Chunk overlap adjusted to {}", applied);
            }
        }

        if let Some(name) = &collection {
            let name = name.trim();
            if existing.iter().any(|known| known == name) {
                form.select_collection(name);
            } else {
                form.start_new_collection();
                form.set_new_collection_name(name);
            }
        }
    });

    let form = uploads.form();
    println!(
        "📤 Uploading {} (chunk size {}, overlap {})...",
        file.display(),
        form.chunk_size(),
        form.chunk_overlap()
    );
    if form.is_creating_new() {
        println!("🆕 Creating collection '{}'", form.new_collection_name().trim());
    }

    let result = match document_name {
        Some(name) => {
            let content = tokio::fs::read_to_string(&file).await?;
            let metadata = source.map(|source| DocumentMetadata {
                source: Some(source),
                ..Default::default()
            });
            uploads.submit_text(&name, &content, metadata).await
        }
        None => uploads.submit().await,
    };

    match result {
        Ok(report) => {
            if let Some(status) = uploads.status() {
                println!("✅ {}", status.message);
            }
            if form.is_creating_new() && catalog.contains(&report.collection_name) {
                println!("📚 Collections: {}", catalog.names().join(", "));
            }
            log_operation_success!(
                "upload_document",
                collection = %report.collection_name,
                chunks = report.document_count
            );
            Ok(())
        }
        Err(e) => {
            log_operation_error!("upload_document", e);
            let message = uploads
                .status()
                .map(|status| status.message)
                .unwrap_or_else(|| e.user_message());
            Err(anyhow!("Upload failed: {}", message))
        }
    }
}

async fn handle_collections(action: CollectionAction, config: &RagchatConfig) -> anyhow::Result<()> {
    let client = connect(config)?;
    let documents: Arc<dyn DocumentApi> = Arc::new(client.documents());
    let catalog = CollectionCatalog::new(documents.clone());

    match action {
        CollectionAction::List => {
            let names = catalog.refresh().await;
            if let Some(error) = catalog.error() {
                bail!(error);
            }
            if names.is_empty() {
                println!("📚 No collections yet");
            } else {
                println!("📚 **Collections ({}):**", names.len());
                for name in names {
                    println!("  • {}", name);
                }
            }
        }
        CollectionAction::Delete { name } => {
            catalog.delete(&name).await.map_err(|e| {
                log_operation_error!("delete_collection", e, collection = %name);
                anyhow!(e.user_message())
            })?;
            println!("🗑️  Deleted collection '{}'", name.trim());
        }
        CollectionAction::Search {
            collection,
            query,
            top_k,
        } => {
            let chunks = documents
                .retrieve(&collection, &query, top_k)
                .await
                .map_err(|e| anyhow!(e.user_message()))?;
            if chunks.is_empty() {
                println!("🔍 No matching chunks in '{}'", collection);
            }
            for (i, chunk) in chunks.iter().enumerate() {
                let id = chunk.chunk_id.as_deref().unwrap_or("-");
                println!("  {}. [{}] {}", i + 1, id, preview(&chunk.content, 160));
            }
        }
    }

    Ok(())
}

async fn handle_chain(
    system_message: String,
    temperature: Option<f32>,
    config: &RagchatConfig,
) -> anyhow::Result<()> {
    log_operation_start!("configure_chain");

    let client = connect(config)?;
    let panel = ChainConfigPanel::new(Arc::new(client.chains()), &config.chain);
    panel.set_system_message(system_message);
    if let Some(temperature) = temperature {
        let applied = panel.set_temperature(temperature);
        if applied != temperature {
            println!("🌡️  Temperature adjusted to {:.1}", applied);
        }
    }

    if !panel.can_submit() {
        bail!("System message cannot be empty");
    }

    let result = panel.submit().await;
    let message = panel
        .status()
        .map(|status| status.message)
        .unwrap_or_default();

    match result {
        Ok(response) => {
            println!("✅ {}", message);
            println!(
                "⛓️  Chain '{}' (temperature {:.1})",
                response.name,
                panel.temperature()
            );
            log_operation_success!("configure_chain", chain = %response.name);
            Ok(())
        }
        Err(e) => {
            log_operation_error!("configure_chain", e);
            Err(anyhow!(message))
        }
    }
}

async fn handle_models(config: &RagchatConfig) -> anyhow::Result<()> {
    let client = connect(config)?;
    let models = client
        .models()
        .list_models()
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    if models.is_empty() {
        println!("🤖 No models available");
        return Ok(());
    }

    println!("🤖 **Models ({}):**", models.len());
    for model in models {
        let size = match &model.size {
            serde_json::Value::Number(bytes) => bytes
                .as_f64()
                .map(|bytes| format!("{:.1} GB", bytes / 1_000_000_000.0))
                .unwrap_or_else(|| bytes.to_string()),
            serde_json::Value::String(text) => text.clone(),
            _ => "unknown size".to_string(),
        };
        println!("  • {} ({}, {})", model.id, model.name, size);
        if let Some(description) = model.description.as_deref().filter(|d| !d.is_empty()) {
            println!("    {}", description);
        }
    }

    Ok(())
}

async fn handle_health(config: &RagchatConfig) -> anyhow::Result<()> {
    let client = connect(config)?;
    let chat: Arc<dyn ChatApi> = Arc::new(client.chat());
    let probe = ConnectionProbe::new(chat);

    println!("🔌 Checking {}...", client.base_url());
    match performance::measure_async("health_check", probe.check()).await {
        ProbeState::Connected(report) => {
            println!("✅ Connected: {}", report.status);
            if let Some(version) = &report.version {
                println!("   Version: {}", version);
            }
            if let Some(environment) = &report.environment {
                println!("   Environment: {}", environment);
            }
            if let Some(uptime) = report.uptime {
                println!("   Uptime: {:.0}s", uptime);
            }
            let mut services: Vec<_> = report.services.iter().collect();
            services.sort();
            for (name, status) in services {
                println!("   {}: {}", name, status);
            }
            Ok(())
        }
        ProbeState::Failed { message, .. } => Err(anyhow!("Connection failed: {}", message)),
        ProbeState::Idle | ProbeState::Checking => Ok(()),
    }
}

async fn handle_documents(action: DocumentAction, config: &RagchatConfig) -> anyhow::Result<()> {
    let client = connect(config)?;
    let documents = client.documents();

    match action {
        DocumentAction::List => {
            let chunks = documents
                .list_documents()
                .await
                .map_err(|e| anyhow!(e.user_message()))?;
            println!("📄 **Documents ({}):**", chunks.len());
            for chunk in chunks {
                let id = chunk.chunk_id.as_deref().unwrap_or("-");
                println!("  • [{}] {}", id, preview(&chunk.content, 100));
            }
        }
        DocumentAction::Get { id } => {
            let chunk = documents
                .get_document(&id)
                .await
                .map_err(|e| anyhow!(e.user_message()))?;
            println!("{}", chunk.content);
            if !chunk.metadata.is_empty() {
                println!("\n📋 Metadata:");
                println!("{}", serde_json::to_string_pretty(&chunk.metadata)?);
            }
        }
        DocumentAction::Delete { id } => {
            documents
                .delete_document(&id)
                .await
                .map_err(|e| anyhow!(e.user_message()))?;
            println!("🗑️  Deleted document '{}'", id);
        }
    }

    Ok(())
}

/// First characters of a text on a single line
fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > max_chars {
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}

async fn handle_config(
    config_path: Option<PathBuf>,
    show: bool,
    init: bool,
    set: Option<String>,
    get: Option<String>,
    reset: bool,
    validate: bool,
) -> RagchatResult<()> {
    let target_path = match &config_path {
        Some(path) => path.clone(),
        None => get_config_path()?,
    };

    if init {
        if let Some(parent) = target_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        RagchatConfig::default().save_to_file(&target_path)?;
        println!("✅ Configuration initialized at: {:?}", target_path);
        println!("📝 Edit the file to point api.base_url at your backend.");
    }

    if show {
        let (config, _) = load_config(config_path.as_ref())?;
        println!("📋 Current configuration:");
        println!("{}", config.to_toml()?);
    }

    if reset {
        RagchatConfig::default().save_to_file(&target_path)?;
        println!("🔄 Configuration reset to defaults at: {:?}", target_path);
    }

    if validate {
        let (config, _) = load_config(config_path.as_ref())?;
        match config.validate() {
            Ok(()) => println!("✅ Configuration is valid"),
            Err(e) => {
                println!("❌ Configuration validation failed: {}", e);
                return Err(e);
            }
        }
    }

    if let Some(key_value) = set {
        if let Some((key, value)) = key_value.split_once('=') {
            set_config_value(&target_path, key.trim(), value.trim()).await?;
            println!("✅ Set {} = {}", key.trim(), value.trim());
        } else {
            return Err(RagchatError::Config {
                message: "Invalid format. Use key=value format".to_string(),
                source: None,
                context: ErrorContext::new("config_set")
                    .with_suggestion("Example: --set api.base_url=http://localhost:8000"),
            });
        }
    }

    if let Some(key) = get {
        let (config, _) = load_config(config_path.as_ref())?;
        println!("{} = {}", key, get_config_value(&config, &key)?);
    }

    Ok(())
}

/// Get the default configuration file path
fn get_config_path() -> RagchatResult<PathBuf> {
    default_config_paths()
        .into_iter()
        .next()
        .ok_or_else(|| RagchatError::Config {
            message: "Could not determine a configuration directory".to_string(),
            source: None,
            context: ErrorContext::new("config")
                .with_suggestion("Pass --config <path> explicitly"),
        })
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, kind: &str) -> RagchatResult<T> {
    value.parse().map_err(|_| RagchatError::Config {
        message: format!("Invalid {} value for {}: {}", kind, key, value),
        source: None,
        context: ErrorContext::new("config_set"),
    })
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn unknown_key(key: &str, operation: &str) -> RagchatError {
    RagchatError::Config {
        message: format!("Unknown configuration key: {}", key),
        source: None,
        context: ErrorContext::new(operation)
            .with_suggestion("Use --show to see available configuration keys"),
    }
}

/// Set a configuration value
async fn set_config_value(config_path: &PathBuf, key: &str, value: &str) -> RagchatResult<()> {
    let mut config = if config_path.exists() {
        RagchatConfig::from_file(config_path)?
    } else {
        RagchatConfig::default()
    };

    let parts: Vec<&str> = key.split('.').collect();
    match parts.as_slice() {
        ["api", "environment"] => config.api.environment = value.parse()?,
        ["api", "base_url"] => config.api.base_url = optional(value),
        ["api", "timeout_seconds"] => {
            config.api.timeout_seconds = parse_value(key, value, "integer")?
        }
        ["api", "with_credentials"] => {
            config.api.with_credentials = parse_value(key, value, "boolean")?
        }
        ["api", "access_token"] => config.api.access_token = optional(value),
        ["chat", "temperature"] => config.chat.temperature = parse_value(key, value, "float")?,
        ["chat", "max_tokens"] => config.chat.max_tokens = parse_value(key, value, "integer")?,
        ["chat", "rag_num_results"] => {
            config.chat.rag_num_results = parse_value(key, value, "integer")?
        }
        ["chat", "default_collection"] => config.chat.default_collection = optional(value),
        ["chat", "skip_memory"] => config.chat.skip_memory = parse_value(key, value, "boolean")?,
        ["upload", "chunk_size"] => config.upload.chunk_size = parse_value(key, value, "integer")?,
        ["upload", "chunk_overlap"] => {
            config.upload.chunk_overlap = parse_value(key, value, "integer")?
        }
        ["upload", "collection"] => config.upload.collection = value.to_string(),
        ["chain", "temperature"] => config.chain.temperature = parse_value(key, value, "float")?,
        ["logging", "level"] => config.logging.level = value.to_string(),
        _ => return Err(unknown_key(key, "config_set")),
    }

    config.validate()?;

    // Ensure config directory exists
    if let Some(parent) = config_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    config.save_to_file(config_path)?;
    Ok(())
}

/// Get a configuration value
fn get_config_value(config: &RagchatConfig, key: &str) -> RagchatResult<String> {
    let parts: Vec<&str> = key.split('.').collect();
    let value = match parts.as_slice() {
        ["api", "environment"] => format!("{:?}", config.api.environment).to_lowercase(),
        ["api", "base_url"] => config.api.resolved_base_url().to_string(),
        ["api", "timeout_seconds"] => config.api.timeout_seconds.to_string(),
        ["api", "with_credentials"] => config.api.with_credentials.to_string(),
        ["api", "access_token"] => match &config.api.access_token {
            Some(_) => "********".to_string(),
            None => String::new(),
        },
        ["chat", "temperature"] => config.chat.temperature.to_string(),
        ["chat", "max_tokens"] => config.chat.max_tokens.to_string(),
        ["chat", "rag_num_results"] => config.chat.rag_num_results.to_string(),
        ["chat", "default_collection"] => {
            config.chat.default_collection.clone().unwrap_or_default()
        }
        ["chat", "skip_memory"] => config.chat.skip_memory.to_string(),
        ["upload", "chunk_size"] => config.upload.chunk_size.to_string(),
        ["upload", "chunk_overlap"] => config.upload.chunk_overlap.to_string(),
        ["upload", "collection"] => config.upload.collection.clone(),
        ["chain", "temperature"] => config.chain.temperature.to_string(),
        ["logging", "level"] => config.logging.level.clone(),
        _ => return Err(unknown_key(key, "config_get")),
    };

    Ok(value)
}
