use std::time::Duration;

use futures_util::StreamExt;
use tokio::time::{sleep, timeout, Instant};
use tokio_tungstenite::tungstenite::Message;

use crate::helpers::messages::{Screen, WsMessageIn, WsMessageOut};
use crate::helpers::test_app::TestApp;

#[tokio::test]
async fn new_game_starts_in_setup_with_the_minimum_roster() {
    let app = TestApp::spawn_app().await;
    let game_id = app.create_game().await;

    let mut device = app.connect_device(&game_id).await;

    match device.receive_screen().await.unwrap() {
        Screen::Setup {
            players,
            can_add_player,
            can_remove_player,
            can_start,
            min_players,
            max_players,
        } => {
            let names: Vec<&str> = players.iter().map(|player| player.name.as_str()).collect();
            assert_eq!(names, vec!["플레이어 1", "플레이어 2", "플레이어 3"]);
            assert!(can_add_player);
            assert!(!can_remove_player);
            assert!(can_start);
            assert_eq!(min_players, 3);
            assert_eq!(max_players, 10);
        }
        other => panic!("Expected the SETUP screen, received {other:?}"),
    }
}

#[tokio::test]
async fn connecting_to_an_unknown_game_fails() {
    let app = TestApp::spawn_app().await;

    let mut device = app.connect_device("nope1").await;

    assert_eq!(device.receive_error().await, "GAME_DOES_NOT_EXIST");
}

#[tokio::test]
async fn players_can_be_added_and_removed() {
    let app = TestApp::spawn_app().await;
    let (_, mut device) = app.create_game_with_device().await;

    let Screen::Setup { players, .. } = device.add_player("  철수  ").await.unwrap() else {
        panic!("Expected the SETUP screen");
    };
    assert_eq!(players.len(), 4);
    let cheolsu = players.last().unwrap().clone();
    assert_eq!(cheolsu.name, "철수");

    let Screen::Setup { players, .. } = device.add_player("").await.unwrap() else {
        panic!("Expected the SETUP screen");
    };
    assert_eq!(players.last().unwrap().name, "플레이어 5");

    let Screen::Setup {
        players,
        can_remove_player,
        ..
    } = device
        .act(WsMessageIn::RemovePlayer {
            player_id: cheolsu.id.clone(),
        })
        .await
        .unwrap()
    else {
        panic!("Expected the SETUP screen");
    };
    assert_eq!(players.len(), 4);
    assert!(players.iter().all(|player| player.id != cheolsu.id));
    assert!(can_remove_player);
}

#[tokio::test]
async fn roster_cannot_grow_beyond_the_maximum() {
    let app = TestApp::spawn_app().await;
    let (_, mut device) = app.create_game_with_device().await;

    let mut screen = None;
    for _ in 0..7 {
        screen = Some(device.add_player("").await.unwrap());
    }
    let Some(Screen::Setup {
        players,
        can_add_player,
        ..
    }) = screen
    else {
        panic!("Expected the SETUP screen");
    };
    assert_eq!(players.len(), 10);
    assert!(!can_add_player);

    assert_eq!(device.add_player("영희").await.unwrap_err(), "TOO_MANY_PLAYERS");
}

#[tokio::test]
async fn roster_cannot_shrink_below_the_minimum() {
    let app = TestApp::spawn_app().await;
    let (_, mut device) = app.create_game_with_device().await;

    let error = device
        .act(WsMessageIn::RemovePlayer {
            player_id: "1".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(error, "CANNOT_REMOVE_BELOW_MINIMUM");
}

#[tokio::test]
async fn removing_an_unknown_player_fails() {
    let app = TestApp::spawn_app().await;
    let (_, mut device) = app.create_game_with_device().await;
    let _ = device.add_player("철수").await.unwrap();

    let error = device
        .act(WsMessageIn::RemovePlayer {
            player_id: "unknown".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(error, "PLAYER_DOES_NOT_EXIST");
}

#[tokio::test]
async fn category_selection_can_go_back_to_setup() {
    let app = TestApp::spawn_app().await;
    let (_, mut device) = app.create_game_with_device().await;

    let Screen::Category { categories } = device
        .act(WsMessageIn::StartCategorySelection)
        .await
        .unwrap()
    else {
        panic!("Expected the CATEGORY screen");
    };
    assert_eq!(categories.len(), 6);

    let screen = device.act(WsMessageIn::BackToSetup).await.unwrap();
    assert!(matches!(screen, Screen::Setup { .. }));
}

#[tokio::test]
async fn unknown_category_is_rejected() {
    let app = TestApp::spawn_app().await;
    let (_, mut device) = app.create_game_with_device().await;
    let _ = device
        .act(WsMessageIn::StartCategorySelection)
        .await
        .unwrap();

    let error = device
        .act(WsMessageIn::ChooseCategory {
            category_id: "planets".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(error, "CATEGORY_DOES_NOT_EXIST");
}

#[tokio::test]
async fn actions_of_another_step_are_rejected() {
    let app = TestApp::spawn_app().await;
    let (_, mut device) = app.create_game_with_device().await;

    let error = device
        .act(WsMessageIn::Vote {
            player_id: "1".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(error, "INVALID_STATE");

    // The game is still usable afterwards
    let screen = device.add_player("철수").await.unwrap();
    assert!(matches!(screen, Screen::Setup { .. }));
}

#[tokio::test]
async fn citizens_catch_the_liar_who_misses_the_word() {
    let app = TestApp::spawn_app().await;
    let (_, mut device) = app.create_game_with_device().await;

    let round = device.play_until_discussion("animals").await;
    assert_eq!(round.players.len(), 3);
    assert_eq!(round.remaining_seconds, 60);

    let Screen::Vote { candidates } = device.act(WsMessageIn::StartVoting).await.unwrap() else {
        panic!("Expected the VOTE screen");
    };
    assert_eq!(candidates, round.players);

    let screen = device
        .act(WsMessageIn::Vote {
            player_id: round.liar.id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(
        screen,
        Screen::LiarChance {
            caught_player_name: round.liar.name.clone()
        }
    );

    let screen = device
        .act(WsMessageIn::GuessWord {
            guess: "틀린 단어".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(
        screen,
        Screen::Result {
            winner: Some("CITIZENS".to_string()),
            target_word: round.word.clone(),
            liar_name: round.liar.name.clone(),
        }
    );
}

#[tokio::test]
async fn caught_liar_wins_by_guessing_the_word() {
    let app = TestApp::spawn_app().await;
    let (_, mut device) = app.create_game_with_device().await;
    let round = device.play_until_discussion("food").await;
    let _ = device.act(WsMessageIn::StartVoting).await.unwrap();
    let _ = device
        .act(WsMessageIn::Vote {
            player_id: round.liar.id.clone(),
        })
        .await
        .unwrap();

    let screen = device
        .act(WsMessageIn::GuessWord {
            guess: format!(" {} ", round.word),
        })
        .await
        .unwrap();

    let Screen::Result { winner, .. } = screen else {
        panic!("Expected the RESULT screen");
    };
    assert_eq!(winner, Some("LIAR".to_string()));
}

#[tokio::test]
async fn accusing_a_citizen_lets_the_liar_win() {
    let app = TestApp::spawn_app().await;
    let (_, mut device) = app.create_game_with_device().await;
    let round = device.play_until_discussion("school").await;
    let _ = device.act(WsMessageIn::StartVoting).await.unwrap();

    let screen = device
        .act(WsMessageIn::Vote {
            player_id: round.a_citizen().id,
        })
        .await
        .unwrap();

    assert_eq!(
        screen,
        Screen::Result {
            winner: Some("LIAR".to_string()),
            target_word: round.word.clone(),
            liar_name: round.liar.name.clone(),
        }
    );
}

#[tokio::test]
async fn voting_starts_when_the_countdown_runs_out() {
    let app = TestApp::spawn_app_with(|config| config.game.seconds_per_player = 1).await;
    let (_, mut device) = app.create_game_with_device().await;

    let round = device.play_until_discussion("places").await;
    assert_eq!(round.remaining_seconds, 3);

    let mut countdown = vec![];
    let screen = loop {
        match device.receive().await.unwrap() {
            WsMessageOut::Timer { remaining_seconds } => countdown.push(remaining_seconds),
            WsMessageOut::GameState { screen } => break screen,
            WsMessageOut::Error { r#type, .. } => panic!("Unexpected error {}", r#type),
        }
    };

    assert_eq!(countdown, vec![2, 1, 0]);
    assert!(matches!(screen, Screen::Vote { .. }));
}

#[tokio::test]
async fn countdown_stops_when_voting_starts_early() {
    let app = TestApp::spawn_app().await;
    let (_, mut device) = app.create_game_with_device().await;
    let _ = device.play_until_discussion("animals").await;

    let screen = device.act(WsMessageIn::StartVoting).await.unwrap();
    assert!(matches!(screen, Screen::Vote { .. }));

    let next_message = timeout(Duration::from_millis(2500), device.rx.next()).await;
    assert!(
        next_message.is_err(),
        "Received {next_message:?} after voting started"
    );
}

#[tokio::test]
async fn silent_device_is_disconnected_while_the_countdown_runs() {
    let app = TestApp::spawn_app_with(|config| config.game.client_timeout_millis = 1500).await;
    let (_, mut device) = app.create_game_with_device().await;
    let _ = device.play_until_discussion("animals").await;
    let silent_since = Instant::now();

    let mut ticks = 0;
    let error = loop {
        match device.receive().await.unwrap() {
            WsMessageOut::Timer { .. } => ticks += 1,
            WsMessageOut::Error { r#type, .. } => break r#type,
            WsMessageOut::GameState { screen } => panic!("Unexpected screen {screen:?}"),
        }
    };

    assert_eq!(error, "WEBSOCKET_CLOSED");
    assert!(ticks >= 1);
    assert!(silent_since.elapsed() < Duration::from_secs(3));
    assert!(device.receive().await.is_err());
}

#[tokio::test]
async fn play_again_keeps_the_roster() {
    let app = TestApp::spawn_app().await;
    let (_, mut device) = app.create_game_with_device().await;
    let Screen::Setup {
        players: roster, ..
    } = device.add_player("철수").await.unwrap()
    else {
        panic!("Expected the SETUP screen");
    };
    let round = device.play_until_discussion("fruits").await;
    let _ = device.act(WsMessageIn::StartVoting).await.unwrap();
    let _ = device
        .act(WsMessageIn::Vote {
            player_id: round.a_citizen().id,
        })
        .await
        .unwrap();

    let Screen::Setup { players, .. } = device.act(WsMessageIn::PlayAgain).await.unwrap() else {
        panic!("Expected the SETUP screen");
    };
    assert_eq!(players, roster);

    // A second round deals new cards
    let second_round = device.play_until_discussion("sports").await;
    assert_eq!(second_round.players, roster);
}

#[tokio::test]
async fn every_device_sees_the_same_screen() {
    let app = TestApp::spawn_app().await;
    let (game_id, mut device) = app.create_game_with_device().await;
    let mut other_device = app.connect_device(&game_id).await;
    // Connecting broadcasts the current screen to everybody
    let _ = other_device.receive_screen().await.unwrap();
    let _ = device.receive_screen().await.unwrap();

    let screen = other_device.add_player("철수").await.unwrap();

    assert_eq!(device.receive_screen().await.unwrap(), screen);
}

#[tokio::test]
async fn game_is_closed_after_inactivity_timeout() {
    let app = TestApp::spawn_app().await;
    let (game_id, device) = app.create_game_with_device().await;

    // Drop the websocket so that the game has no device left
    drop(device);
    sleep(app.inactivity_timeout + Duration::from_secs(1)).await;

    let mut device = app.connect_device(&game_id).await;
    assert_eq!(device.receive_error().await, "GAME_DOES_NOT_EXIST");
}

#[tokio::test]
async fn unprocessable_message_is_rejected_but_game_is_still_alive() {
    let app = TestApp::spawn_app().await;
    let (_, mut device) = app.create_game_with_device().await;

    device
        .send_message(Message::Text("invalid".to_string()))
        .await;
    assert_eq!(device.receive_error().await, "UNPROCESSABLE_MESSAGE");

    device
        .send_message(Message::Text(r#"{"kind":"startGame"}"#.to_string()))
        .await;
    assert_eq!(device.receive_error().await, "UNPROCESSABLE_MESSAGE");

    let screen = device.add_player("철수").await.unwrap();
    assert!(matches!(screen, Screen::Setup { .. }));
}

#[tokio::test]
async fn ping_is_answered_with_pong() {
    let app = TestApp::spawn_app().await;
    let (_, mut device) = app.create_game_with_device().await;

    device.send_message(Message::Text("ping".to_string())).await;

    assert_eq!(device.receive_text().await.unwrap(), "pong");
}
