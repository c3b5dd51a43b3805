//! Interactive chat: a message list plus a composer line

use ragchat_applications::{
    ApplicationError, CollectionCatalog, ConversationSession, SendOptions, TurnOutcome,
};
use ragchat_core::{Message, Role};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// One line typed into the composer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerInput {
    Empty,
    Message(String),
    /// `/memory on|off`
    SetMemory(bool),
    /// `/rag <name>` or `/rag off`
    SetCollection(Option<String>),
    Collections,
    History,
    Clear,
    Stats,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_input(line: &str) -> ComposerInput {
    let line = line.trim();
    if line.is_empty() {
        return ComposerInput::Empty;
    }
    let Some(command) = line.strip_prefix('/') else {
        return ComposerInput::Message(line.to_string());
    };

    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };

    match (name, argument) {
        ("memory", "on") => ComposerInput::SetMemory(true),
        ("memory", "off") => ComposerInput::SetMemory(false),
        ("memory", _) => ComposerInput::Invalid("Usage: /memory on|off".to_string()),
        ("rag", "") => ComposerInput::Invalid("Usage: /rag <collection>|off".to_string()),
        ("rag", "off") => ComposerInput::SetCollection(None),
        ("rag", collection) => ComposerInput::SetCollection(Some(collection.to_string())),
        ("collections", _) => ComposerInput::Collections,
        ("history", _) => ComposerInput::History,
        ("clear", _) | ("new", _) => ComposerInput::Clear,
        ("stats", _) => ComposerInput::Stats,
        ("help", _) => ComposerInput::Help,
        ("quit", _) | ("exit", _) => ComposerInput::Quit,
        (other, _) => ComposerInput::Invalid(format!(
            "Unknown command '/{}'. Type /help for commands.",
            other
        )),
    }
}

/// Composer toggles, applied to every submission
#[derive(Debug, Clone)]
pub struct Composer {
    pub use_memory: bool,
    pub rag_collection: Option<String>,
}

impl Composer {
    pub fn send_options(&self) -> SendOptions {
        SendOptions::new(!self.use_memory, self.rag_collection.clone())
    }

    fn prompt(&self) -> String {
        let mut tags = Vec::new();
        if !self.use_memory {
            tags.push("no-memory".to_string());
        }
        if let Some(collection) = &self.rag_collection {
            tags.push(format!("rag:{}", collection));
        }
        if tags.is_empty() {
            "You> ".to_string()
        } else {
            format!("You [{}]> ", tags.join(" "))
        }
    }
}

fn render_message(message: &Message) {
    match message.role() {
        Role::User => println!("💬 You: {}", message.content()),
        Role::Assistant => println!("🤖 Assistant: {}", message.content()),
        Role::System => println!("⚙️  System: {}", message.content()),
    }
}

fn print_help() {
    println!("📖 Commands:");
    println!("  /memory on|off      Send the whole conversation, or only the new message");
    println!("  /rag <name>|off     Ground answers in a document collection");
    println!("  /collections        List known collections");
    println!("  /history            Show the conversation so far");
    println!("  /clear              Start a new conversation");
    println!("  /stats              Show conversation statistics");
    println!("  /quit               Leave the chat");
}

/// Run the chat loop until `/quit` or end of input
pub async fn run(
    session: ConversationSession,
    catalog: CollectionCatalog,
    mut composer: Composer,
) -> anyhow::Result<()> {
    let collections = catalog.refresh().await;
    if let Some(error) = catalog.error() {
        println!("⚠️  {}", error);
    } else if !collections.is_empty() {
        println!("📚 Collections: {}", collections.join(", "));
    }

    println!("💡 Type a message, or /help for commands.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", composer.prompt());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match parse_input(&line) {
            ComposerInput::Empty => continue,
            ComposerInput::Quit => break,
            ComposerInput::Help => print_help(),
            ComposerInput::Invalid(message) => println!("❓ {}", message),
            ComposerInput::SetMemory(enabled) => {
                composer.use_memory = enabled;
                if enabled {
                    println!("🧠 Memory on: the whole conversation is sent");
                } else {
                    println!("🧠 Memory off: only your new message is sent");
                }
            }
            ComposerInput::SetCollection(None) => {
                composer.rag_collection = None;
                println!("📚 RAG off");
            }
            ComposerInput::SetCollection(Some(collection)) => {
                let known = !catalog.is_loaded()
                    || catalog.error().is_some()
                    || catalog.contains(&collection);
                if !known {
                    println!("⚠️  '{}' is not a known collection", collection);
                }
                println!("📚 Answers grounded in '{}'", collection);
                composer.rag_collection = Some(collection);
            }
            ComposerInput::Collections => {
                let names = catalog.refresh().await;
                match catalog.error() {
                    Some(error) => println!("❌ {}", error),
                    None if names.is_empty() => println!("📚 No collections yet"),
                    None => {
                        for name in names {
                            let marker = if composer.rag_collection.as_deref() == Some(name.as_str()) {
                                "*"
                            } else {
                                " "
                            };
                            println!(" {} {}", marker, name);
                        }
                    }
                }
            }
            ComposerInput::History => {
                let messages = session.messages();
                if messages.is_empty() {
                    println!("📜 No messages yet");
                }
                for message in &messages {
                    render_message(message);
                }
            }
            ComposerInput::Clear => {
                session.clear();
                println!("🆕 Started a new conversation");
            }
            ComposerInput::Stats => println!("📊 {}", session.stats().summary()),
            ComposerInput::Message(content) => {
                send(&session, &content, composer.send_options()).await;
            }
        }
    }

    println!("👋 Goodbye!");
    Ok(())
}

async fn send(session: &ConversationSession, content: &str, options: SendOptions) {
    println!("🤔 Thinking...");
    match session.submit(content, options).await {
        Ok(TurnOutcome::Answered { reply, model }) => {
            debug!(model = %model, "Rendering reply");
            render_message(&Message::assistant(reply));
            println!();
        }
        Ok(TurnOutcome::Stale) => {}
        Err(ApplicationError::Core(_)) => {
            // the session keeps the display text for failed turns
            if let Some(error) = session.error() {
                println!("❌ {}\n", error);
            }
        }
        Err(error) => println!("❌ {}\n", error.user_message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_message_is_trimmed() {
        assert_eq!(
            parse_input("  Hello there \n"),
            ComposerInput::Message("Hello there".to_string())
        );
        assert_eq!(parse_input("   "), ComposerInput::Empty);
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_input("/memory off"), ComposerInput::SetMemory(false));
        assert_eq!(parse_input("/memory on"), ComposerInput::SetMemory(true));
        assert_eq!(
            parse_input("/rag research papers"),
            ComposerInput::SetCollection(Some("research papers".to_string()))
        );
        assert_eq!(parse_input("/rag off"), ComposerInput::SetCollection(None));
        assert_eq!(parse_input("/exit"), ComposerInput::Quit);
        assert_eq!(parse_input("/new"), ComposerInput::Clear);
        assert!(matches!(parse_input("/rag"), ComposerInput::Invalid(_)));
        assert!(matches!(parse_input("/memory maybe"), ComposerInput::Invalid(_)));
        assert!(matches!(parse_input("/bogus"), ComposerInput::Invalid(_)));
    }

    #[test]
    fn test_send_options_follow_composer() {
        let composer = Composer {
            use_memory: false,
            rag_collection: Some("papers".to_string()),
        };
        let options = composer.send_options();
        assert!(options.skip_memory);
        assert_eq!(options.rag_collection.as_deref(), Some("papers"));
        assert_eq!(composer.prompt(), "You [no-memory rag:papers]> ");

        assert_eq!(
            Composer {
                use_memory: true,
                rag_collection: None
            }
            .prompt(),
            "You> "
        );
    }
}
