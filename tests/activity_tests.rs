//! Activity history feeding the game

use run_tetris::activity::{parse_activities, run_sequence, Activity};
use run_tetris::core::{GameState, Sequencer};

const HISTORY: &str = r#"[
    {"id": 3, "name": "Sunday long", "distance": 21400.0, "sport_type": "Run",
     "start_date": "2024-04-07T08:00:00Z"},
    {"id": 2, "name": "Spin class", "distance": 30000.0, "sport_type": "Ride",
     "start_date": "2024-04-06T18:00:00Z"},
    {"id": 1, "name": "Easy jog", "distance": 3900.0, "sport_type": "Run",
     "start_date": "2024-04-05T07:00:00Z"},
    {"id": 4, "name": "Hills", "distance": 8200.0, "sport_type": "TrailRun",
     "start_date": "2024-04-09T07:00:00Z"},
    {"id": 5, "name": "Treadmill ultra", "distance": 55000.0, "sport_type": "VirtualRun",
     "start_date": "2024-04-10T07:00:00Z"}
]"#;

fn game_from_history() -> GameState<Activity> {
    let runs = run_sequence(&parse_activities(HISTORY).unwrap());
    GameState::new(Sequencer::with_requests(runs, 1))
}

#[test]
fn runs_are_sized_oldest_first() {
    let runs = run_sequence(&parse_activities(HISTORY).unwrap());
    let summary: Vec<(u64, u32)> = runs.iter().map(|r| (r.token.id, r.size)).collect();
    assert_eq!(summary, vec![(1, 3), (3, 21), (4, 8), (5, 42)]);
}

#[test]
fn each_piece_carries_its_run() {
    let mut game = game_from_history();
    game.start();

    let mut seen = Vec::new();
    for _ in 0..5 {
        let run = game.token().unwrap();
        seen.push((run.name.clone(), game.piece_size().unwrap()));
        game.hard_drop();
        game.run_pending();
        if game.game_over() {
            break;
        }
    }

    assert_eq!(
        seen,
        vec![
            ("Easy jog".to_string(), 3),
            ("Sunday long".to_string(), 21),
            ("Hills".to_string(), 8),
            ("Treadmill ultra".to_string(), 42),
            ("Easy jog".to_string(), 3),
        ]
    );
}

#[test]
fn history_without_runs_plays_random() {
    let rides = r#"[{"id": 1, "name": "Ride", "distance": 40000.0,
                     "sport_type": "Ride", "start_date": "2024-01-01T00:00:00Z"}]"#;
    let runs = run_sequence(&parse_activities(rides).unwrap());
    assert!(runs.is_empty());

    let mut game = GameState::new(Sequencer::with_requests(runs, 3));
    game.start();
    assert!(game.active().is_some());
    assert!(game.token().is_none());
}

#[test]
fn replacing_history_mid_game_takes_effect_on_next_spawn() {
    let mut game = game_from_history();
    game.start();
    assert_eq!(game.piece_size(), Some(3));

    let fresh = r#"[{"id": 9, "name": "Parkrun", "distance": 5000.0,
                     "sport_type": "Run", "start_date": "2024-05-04T09:00:00Z"}]"#;
    game.set_size_requests(run_sequence(&parse_activities(fresh).unwrap()));
    assert_eq!(game.piece_size(), Some(3));

    game.hard_drop();
    game.run_pending();
    assert_eq!(game.token().unwrap().name, "Parkrun");
    assert_eq!(game.piece_size(), Some(5));
}
