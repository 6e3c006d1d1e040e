//! # casa-chat
//!
//! Terminal chat surface for one marketplace conversation.
//!
//! Plain lines are typed into the composer and sent. Commands:
//! - `/editar`     dismiss a block notice and keep editing the draft
//! - `/rever`      send the blocked draft anyway, flagged for review
//! - `/cifrar`     toggle scrambled display for new messages
//! - `/decifrar X` show the typed form of a scrambled payload
//! - `/historico`  print the whole log
//! - `/exportar`   print the log as JSON
//! - `/sair`       end the session

use casa_chat::autoreply::AutoResponder;
use casa_chat::render::render_message;
use casa_chat::{init_tracing, ChatSession, SendResult, SessionConfig};
use casa_shared::encoding::unscramble;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Casa chat v{}", env!("CARGO_PKG_VERSION"));

    let config = SessionConfig::from_env();
    info!(?config, "Loaded configuration");

    let mut session = ChatSession::start(&config)?;
    let mut responder = config
        .auto_reply
        .then(|| AutoResponder::new(config.auto_reply_delay));

    for msg in session.messages()? {
        println!("{}", render_message(&msg, &config.peer_name));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();

        match line {
            "/sair" => break,
            "/editar" => match session.edit_blocked() {
                Ok(()) => println!("Rascunho: {}", session.draft()),
                Err(e) => println!("{e}"),
            },
            "/rever" => match session.submit_for_review() {
                Ok(msg) => {
                    println!("{}", render_message(&msg, &config.peer_name));
                    println!("A mensagem ficou retida até ser revista por um moderador.");
                }
                Err(e) => println!("{e}"),
            },
            "/cifrar" => {
                let on = session.toggle_encrypted_display();
                println!("Cifra de apresentação {}", if on { "ativada" } else { "desativada" });
            }
            cmd if cmd.starts_with("/decifrar ") => {
                match unscramble(&cmd["/decifrar ".len()..]) {
                    Ok(text) => println!("{text}"),
                    Err(e) => println!("{e}"),
                }
            }
            "/historico" => {
                for msg in session.messages()? {
                    println!("{}", render_message(&msg, &config.peer_name));
                }
            }
            "/exportar" => println!("{}", session.export_json()?),
            text => {
                session.type_draft(text);
                match session.send() {
                    Ok(SendResult::Ignored) => {}
                    Ok(SendResult::Appended(msg)) => {
                        println!("{}", render_message(&msg, &config.peer_name));
                        if let Some(responder) = responder.as_mut() {
                            if let Some(reply) = responder.reply().await {
                                let reply = session.receive(reply)?;
                                println!("{}", render_message(&reply, &config.peer_name));
                            }
                        }
                    }
                    Ok(SendResult::Blocked(notice)) => {
                        println!("{}", notice.message());
                        println!("Escreva /editar para corrigir ou /rever para enviar para revisão.");
                    }
                    Err(e) => {
                        error!(error = %e, "send failed");
                        println!("Não foi possível enviar. O rascunho foi mantido: {}", session.draft());
                    }
                }
            }
        }
    }

    session.close()?;
    Ok(())
}
