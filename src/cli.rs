//! CLI rendering surface — stdin/stdout front end for the engine.

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::engine::{ConversationEngine, TurnOutcome};
use crate::transcript::Sender;

/// Print any transcript entries past `watermark`, tagged by sender.
fn render_new_messages(engine: &ConversationEngine, watermark: usize) -> usize {
    let messages = engine.transcript().messages();
    for message in &messages[watermark.min(messages.len())..] {
        match message.sender {
            Sender::Bot => println!("🤖 {}", message.text),
            Sender::User => {}
        }
    }
    messages.len()
}

/// Run the dialogue loop until EOF or `/quit`.
pub async fn run(mut engine: ConversationEngine) -> std::io::Result<()> {
    let mut watermark = render_new_messages(&engine, 0);

    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/quit" {
            break;
        }

        engine.set_input(&line);
        eprintln!("⏳ Typing...");
        let outcome = engine.send().await;

        // On reset the transcript was replaced wholesale; re-render it.
        if outcome == TurnOutcome::Restarted {
            watermark = 0;
        }
        watermark = render_new_messages(&engine, watermark);

        if let Some(error) = engine.last_error() {
            eprintln!("⚠️  {error}");
        }
        eprint!("> ");
    }

    Ok(())
}
