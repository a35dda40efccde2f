use anyhow::Context;
use shared::protocol::InboundMessage;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};
use xfchess_client::cli::{describe, Command, SettingName, HELP};
use xfchess_client::core::{
    init_logging, load_settings, save_settings, ClientConfig, GameplaySettings, SessionMode,
};
use xfchess_client::game::resources::Position;
use xfchess_client::game::BoardEngine;
use xfchess_client::networking::{
    game_socket_url, HttpLegalityOracle, LegalityOracle, MoveTransport, OfflineTransport,
    SyncChannel,
};
use xfchess_client::rendering::{render_board, BoardView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::load();
    init_logging()?;

    let settings_file = config.settings_file();
    let settings = load_settings(&settings_file);
    let mode = config.session_mode()?;

    let oracle = HttpLegalityOracle::new(config.api_url.clone(), config.access_token.clone());
    let position = match &config.fen {
        Some(fen) => oracle
            .parse_fen(fen)
            .await
            .with_context(|| format!("could not load position from '{fen}'"))?,
        None => Position::standard(),
    };

    match mode {
        SessionMode::Offline => {
            info!("[NETWORK] Offline pass-and-play");
            let mut engine =
                BoardEngine::new(oracle, OfflineTransport, position, settings, config.orientation);
            run(&mut engine, None, &settings_file).await
        }
        SessionMode::Online {
            access_token,
            game_id,
        } => {
            let url = game_socket_url(&config.server_url, &access_token, &game_id)?;
            let channel = SyncChannel::new(url);
            let inbound = channel
                .open()
                .await
                .context("could not connect to the game server")?;
            let mut engine =
                BoardEngine::new(oracle, channel.clone(), position, settings, config.orientation);
            let result = run(&mut engine, Some(inbound), &settings_file).await;
            channel.close();
            result
        }
    }
}

async fn next_inbound(
    inbound: &mut Option<UnboundedReceiver<InboundMessage>>,
) -> Option<InboundMessage> {
    match inbound {
        Some(receiver) => receiver.recv().await,
        None => std::future::pending().await,
    }
}

async fn run<O: LegalityOracle, T: MoveTransport>(
    engine: &mut BoardEngine<O, T>,
    mut inbound: Option<UnboundedReceiver<InboundMessage>>,
    settings_file: &Path,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", render_board(&BoardView::of(engine)));
    println!("type 'help' for commands");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("could not read from stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => {
                        if handle_command(engine, command, settings_file).await == Flow::Quit {
                            break;
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
            message = next_inbound(&mut inbound), if inbound.is_some() => {
                match message {
                    Some(message) => engine.apply_inbound(message),
                    None => {
                        warn!("[NETWORK] Game channel closed by the server");
                        println!("connection to the game server lost");
                        inbound = None;
                    }
                }
            }
        }

        engine.check_game_end().await;
        let events = engine.drain_events();
        for line in events.iter().filter_map(describe) {
            println!("{line}");
        }
        if !events.is_empty() {
            println!("{}", render_board(&BoardView::of(engine)));
        }
    }
    Ok(())
}

async fn handle_command<O: LegalityOracle, T: MoveTransport>(
    engine: &mut BoardEngine<O, T>,
    command: Command,
    settings_file: &Path,
) -> Flow {
    let result = match command {
        Command::Click(square) => engine.on_square_click(square).await,
        Command::Move(from, to) => engine.play_move(from, to).await,
        Command::Drag(square) => engine.on_drag_start(square).await,
        Command::Drop(square) => engine.on_drop(square).await,
        Command::CancelDrag => {
            engine.on_drag_cancel();
            Ok(())
        }
        Command::Promote(piece_type) => engine.confirm_promotion(piece_type),
        Command::AbortPromotion => engine.cancel_promotion(),
        Command::Flip => {
            engine.flip();
            Ok(())
        }
        Command::Set(name, value) => {
            let settings = apply_setting(*engine.settings(), name, value);
            engine.set_settings(settings);
            save_settings(settings_file, &settings);
            println!("{settings:?}");
            Ok(())
        }
        Command::History => {
            for (ply, entry) in engine.history().iter().enumerate() {
                println!(
                    "{:>3}. {}{} ({})",
                    ply + 1,
                    entry.last_move.from,
                    entry.last_move.to,
                    entry.cue
                );
            }
            Ok(())
        }
        Command::Show => {
            println!("{}", render_board(&BoardView::of(engine)));
            Ok(())
        }
        Command::Help => {
            println!("{HELP}");
            Ok(())
        }
        Command::Quit => return Flow::Quit,
    };

    if let Err(e) = result {
        println!("{e}");
    }
    Flow::Continue
}

fn apply_setting(
    mut settings: GameplaySettings,
    name: SettingName,
    value: bool,
) -> GameplaySettings {
    match name {
        SettingName::AutoQueen => settings.auto_queen = value,
        SettingName::ShowLegalMoves => settings.show_legal_moves = value,
        SettingName::FlipOnMove => settings.flip_on_move = value,
    }
    settings
}
