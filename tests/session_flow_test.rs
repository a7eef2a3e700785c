//! End-to-end page flows: gestures go out through the dispatcher, replies
//! come back over the channel and are applied to the page.

mod common;

use chess_core::Side;
use client::clients::RepertoireClient;
use client::dispatch::{Dispatcher, Inbound};
use client::page::{Command, Page, RepertoirePage, TrainingPage};
use client::training::TrainingState;
use tokio::sync::mpsc::UnboundedReceiver;

const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
const AFTER_E4_C5: &str = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";

/// Send what a gesture produced and apply the single reply it causes.
async fn round_trip<P: Page>(
    page: &mut P,
    dispatcher: &Dispatcher,
    rx: &mut UnboundedReceiver<Inbound>,
    command: &str,
) {
    let outbound = page.handle(command.parse::<Command>().unwrap());
    let expected = outbound.len();
    dispatcher.send_all(outbound);
    for _ in 0..expected {
        let inbound = common::next_inbound(rx).await;
        dispatcher.send_all(page.apply(inbound));
    }
}

/// Play two moves, step back, step forward: the client and the fake
/// server's cursor stay in step.
#[tokio::test]
async fn play_back_and_forward_stay_in_sync() {
    let (config, _state) = common::spawn(common::FakeServer::default()).await;
    let (dispatcher, mut rx) = Dispatcher::new(RepertoireClient::new(&config).unwrap());
    let mut page = RepertoirePage::new();

    round_trip(&mut page, &dispatcher, &mut rx, "e2e4").await;
    round_trip(&mut page, &dispatcher, &mut rx, "c7c5").await;
    assert_eq!(page.play.move_list.rows().len(), 1);
    assert_eq!(page.play.move_list.rows()[0].black.as_deref(), Some("c5"));
    assert_eq!(page.play.status.fen, AFTER_E4_C5);

    round_trip(&mut page, &dispatcher, &mut rx, "b").await;
    assert_eq!(page.play.game.fen(), AFTER_E4);
    assert_eq!(page.play.move_list.rows()[0].black, None);
    let majors: Vec<&str> = page
        .play
        .candidates
        .entries()
        .iter()
        .map(|e| e.notation.as_str())
        .collect();
    assert_eq!(majors, ["c5"]);

    round_trip(&mut page, &dispatcher, &mut rx, "f").await;
    assert_eq!(page.play.game.fen(), AFTER_E4_C5);
    assert_eq!(page.play.board.fen(), AFTER_E4_C5);
    assert_eq!(page.play.move_list.rows()[0].black.as_deref(), Some("c5"));
}

/// Going back and clicking the offered candidate replays it through the relay.
#[tokio::test]
async fn candidate_click_replays_move() {
    let (config, state) = common::spawn(common::FakeServer::default()).await;
    let (dispatcher, mut rx) = Dispatcher::new(RepertoireClient::new(&config).unwrap());
    let mut page = RepertoirePage::new();

    round_trip(&mut page, &dispatcher, &mut rx, "g1f3").await;
    round_trip(&mut page, &dispatcher, &mut rx, "b").await;
    assert_eq!(page.play.candidates.entries()[0].notation, "Nf3");

    round_trip(&mut page, &dispatcher, &mut rx, "c 0").await;
    assert_eq!(page.play.game.history(), vec!["Nf3".to_string()]);
    assert_eq!(page.play.move_list.rows()[0].white, "Nf3");
    assert_eq!(
        common::count_requests(&state, "/moves", "new[source]", "g1"),
        2
    );
}

/// Illegal drags never reach the server.
#[tokio::test]
async fn illegal_drag_sends_nothing() {
    let (config, state) = common::spawn(common::FakeServer::default()).await;
    let (dispatcher, _rx) = Dispatcher::new(RepertoireClient::new(&config).unwrap());
    let mut page = RepertoirePage::new();

    let outbound = page.handle("e2e5".parse().unwrap());
    assert!(outbound.is_empty());
    dispatcher.send_all(outbound);
    assert!(state.lock().unwrap().log.is_empty());
}

/// Opening explorer: load, add, select, board turns to the opening's side.
#[tokio::test]
async fn explorer_load_create_select() {
    let mut server = common::FakeServer::default();
    server.openings.push(("white".into(), "Italian".into()));
    server.opening_candidates.insert(
        "Caro-Kann".into(),
        serde_json::json!({ "major": ["c6"], "minor": ["d5"] }),
    );
    let (config, _state) = common::spawn(server).await;
    let (dispatcher, mut rx) = Dispatcher::new(RepertoireClient::new(&config).unwrap());
    let mut page = RepertoirePage::new();

    dispatcher.send_all(page.start());
    let inbound = common::next_inbound(&mut rx).await;
    page.apply(inbound);
    assert_eq!(page.explorer.tree().unwrap().leaves(Side::White).count(), 1);

    round_trip(&mut page, &dispatcher, &mut rx, "new black Caro-Kann").await;
    let tree = page.explorer.tree().unwrap();
    let black: Vec<&str> = tree.leaves(Side::Black).map(|n| n.text.as_str()).collect();
    assert_eq!(black, ["Caro-Kann"]);

    // Ids: 0 White, 1 Italian, 2 Black, 3 Caro-Kann
    round_trip(&mut page, &dispatcher, &mut rx, "open 3").await;
    assert_eq!(page.explorer.selected(), Some("Caro-Kann"));
    assert_eq!(page.play.board.orientation(), Side::Black);
    assert_eq!(page.play.candidates.entries().len(), 2);
}

/// Sequential training: wrong answer retried, correct answers advance,
/// and "finished" ends the run with no further loads.
#[tokio::test]
async fn sequential_training_until_finished() {
    let mut server = common::FakeServer::default();
    server.training.push((AFTER_E4.into(), "c7c5".into()));
    server.training.push((AFTER_E4_C5.into(), "g1f3".into()));
    let (config, state) = common::spawn(server).await;
    let (dispatcher, mut rx) = Dispatcher::new(RepertoireClient::new(&config).unwrap());
    let mut page = TrainingPage::new();

    round_trip(&mut page, &dispatcher, &mut rx, "full").await;
    assert_eq!(page.trainer.board.fen(), AFTER_E4);

    // Wrong: one performance report, same position.
    round_trip(&mut page, &dispatcher, &mut rx, "e7e5").await;
    assert_eq!(page.trainer.status(), "Wrong");
    assert_eq!(page.trainer.game.fen(), AFTER_E4);

    // Correct: report + next position.
    round_trip(&mut page, &dispatcher, &mut rx, "c7c5").await;
    assert_eq!(page.trainer.game.fen(), AFTER_E4_C5);

    round_trip(&mut page, &dispatcher, &mut rx, "g1f3").await;
    assert_eq!(*page.trainer.state(), TrainingState::Finished);
    assert_eq!(page.trainer.status(), "Finished");

    // Nothing else is requested after the run ended.
    round_trip(&mut page, &dispatcher, &mut rx, "d2d4").await;
    assert_eq!(common::count_requests(&state, "/positions", "load", "next"), 2);
    assert_eq!(
        state.lock().unwrap().performance,
        vec![
            ("wrong".to_string(), "e7e5".to_string()),
            ("correct".to_string(), "c7c5".to_string()),
            ("correct".to_string(), "g1f3".to_string()),
        ]
    );
}
