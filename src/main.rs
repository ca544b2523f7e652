use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use concierge::ai::{KnowledgeBase, Replies, Responder};
use concierge::config::Config;
use concierge::core::ChatSession;
use concierge::logger;
use concierge::ui::{self, Command};

fn main() -> Result<()> {
    let config = Config::default();
    logger::init(&config.log_dir);
    log::info!("🚀 {} started", config.assistant_name);

    let knowledge = KnowledgeBase::resolve(
        config.knowledge_path.as_deref(),
        Config::default_knowledge_path().as_deref(),
    )?;

    let responder = Responder::new(knowledge.topics, Replies::from_config(&config));
    log::info!("📚 {} topics loaded", responder.table().len());

    let session = ChatSession::new(responder, knowledge.suggestions, &config);

    // Runtime for the stdin reader and the typing delay
    let rt = tokio::runtime::Runtime::new().context("cannot start tokio runtime")?;
    rt.block_on(run(session, &config))
}

fn print_line(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text)?;
    stdout.flush()?;
    Ok(())
}

fn print_prompt() -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", ui::PROMPT)?;
    stdout.flush()?;
    Ok(())
}

fn print_history(session: &ChatSession, name: &str) -> Result<()> {
    for message in session.messages() {
        print_line(&ui::render_message(message, name))?;
    }
    Ok(())
}

async fn run(mut session: ChatSession, config: &Config) -> Result<()> {
    let name = config.assistant_name.as_str();

    // Welcome message and shortcuts
    print_history(&session, name)?;
    let suggestions = ui::render_suggestions(session.suggestions());
    if !suggestions.is_empty() {
        print_line(&suggestions)?;
    }
    print_line("Type /help for commands.")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print_prompt()?;
        // EOF ends the chat like /quit
        let Some(line) = lines.next_line().await.context("cannot read from stdin")? else {
            break;
        };

        let reply = match ui::parse_command(&line) {
            Command::Quit => break,
            Command::Ignore => continue,
            Command::Help => {
                print_line(&ui::render_help(session.suggestions()))?;
                continue;
            }
            Command::History => {
                print_history(&session, name)?;
                continue;
            }
            Command::Clear => {
                session.clear_history();
                print_history(&session, name)?;
                continue;
            }
            Command::Suggestion(index) => {
                // Echo the picked question as if it had been typed
                let Some(question) = session.suggestions().get(index).cloned() else {
                    print_line(&format!("No suggestion /{}.", index + 1))?;
                    continue;
                };
                print_line(&format!("{}{}", ui::PROMPT, question))?;
                session.send_suggestion(index).await
            }
            Command::Send(text) => session.send(&text).await,
        };

        if let Some(reply) = reply {
            print_line(&ui::render_message(&reply, name))?;
        }
    }

    log::info!("👋 session {} ended", session.session_id());
    Ok(())
}
