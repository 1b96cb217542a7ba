//! Turn engine scenarios across movement, jail, landings and construction.

use std::thread;

use monopoly_engine::{
    BoardCatalog, BuildOutcome, BuildRefusal, ChannelPresenter, EngineConfig, GameEngine, GameRng,
    Handoff, Holding, JailEvent, JailReason, Landing, LoadedDice, MemoryStore, Player, PlayerId,
    PresenterEvent, ScriptedPresenter, SessionState, SnapshotStore, SquareId, TokenColor,
};

const ANA: PlayerId = PlayerId::new(0);
const BO: PlayerId = PlayerId::new(1);

fn players(count: usize) -> Vec<Player> {
    TokenColor::ALL
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, &color)| Player::new(format!("p{i}"), color, "co", 1500))
        .collect()
}

fn engine(
    presenter: ScriptedPresenter,
    dice: LoadedDice,
) -> GameEngine<ScriptedPresenter, MemoryStore, LoadedDice> {
    GameEngine::with_rng(
        BoardCatalog::standard(),
        EngineConfig::default(),
        dice,
        presenter,
        MemoryStore::new(),
    )
}

// =============================================================================
// Purchase and rent
// =============================================================================

#[test]
fn test_roll_five_and_buy() {
    let mut engine = engine(ScriptedPresenter::new().accept(), LoadedDice::new());
    let mut state = SessionState::new(players(2)).unwrap();

    let report = engine.roll_dice(&mut state, Some(5)).unwrap();

    let movement = report.movement.unwrap();
    assert_eq!(movement.to, 5);
    assert_eq!(
        movement.landing,
        Landing::Purchased {
            square: SquareId::new(5),
            price: 200
        }
    );

    let ana = &state.players()[0];
    assert_eq!(ana.money, 1300);
    assert_eq!(ana.holdings.as_slice(), &[Holding::new(SquareId::new(5))]);

    // The snapshot carries the purchase.
    let saved = engine.store().load().unwrap().unwrap();
    assert_eq!(saved[0].holdings.len(), 1);
}

#[test]
fn test_railroad_rent_tier_for_two_owned() {
    let mut players = players(2);
    players[1].holdings.push(Holding::new(SquareId::new(15)));
    players[1].holdings.push(Holding::new(SquareId::new(35)));
    let mut state = SessionState::new(players).unwrap();
    let mut engine = engine(ScriptedPresenter::new(), LoadedDice::new().then_roll(6, 5).then_roll(4, 5));

    // p0: 0 -> 11 (St. Charles, declined)
    engine.roll_dice(&mut state, None).unwrap();
    // p1: 0 -> 9 (Connecticut, declined)
    engine.roll_dice(&mut state, None).unwrap();

    state.player_mut(ANA).unwrap().position = 31;
    let report = engine.roll_dice(&mut state, Some(4)).unwrap();

    assert_eq!(
        report.movement.unwrap().landing,
        Landing::RentPaid {
            square: SquareId::new(35),
            owner: BO,
            amount: 50
        }
    );
    assert_eq!(state.players()[0].money, 1450);
    assert_eq!(state.players()[1].money, 1550);
}

#[test]
fn test_landing_on_own_square_never_moves_money() {
    let mut players = players(3);
    players[0].holdings.push(Holding::new(SquareId::new(9)));
    let mut state = SessionState::new(players).unwrap();
    let mut engine = engine(ScriptedPresenter::new(), LoadedDice::new());

    let before: Vec<i64> = state.players().iter().map(|p| p.money).collect();
    let report = engine.roll_dice(&mut state, Some(9)).unwrap();
    let after: Vec<i64> = state.players().iter().map(|p| p.money).collect();

    assert_eq!(report.movement.unwrap().landing, Landing::OwnProperty { square: SquareId::new(9) });
    assert_eq!(before, after);
}

// =============================================================================
// Movement and handoff
// =============================================================================

#[test]
fn test_go_passing_from_35_by_8() {
    let mut state = SessionState::new(players(2)).unwrap();
    state.player_mut(ANA).unwrap().position = 35;
    let mut engine = engine(ScriptedPresenter::new(), LoadedDice::new());

    let report = engine.roll_dice(&mut state, Some(8)).unwrap();

    let movement = report.movement.unwrap();
    assert_eq!((movement.from, movement.to), (35, 3));
    assert!(movement.passed_go);
    assert_eq!(state.players()[0].money, 1700);
}

#[test]
fn test_turn_order_cycles_through_all_seats() {
    let mut state = SessionState::new(players(4)).unwrap();
    let mut engine = engine(ScriptedPresenter::new(), LoadedDice::new());

    let mut seen = Vec::new();
    for _ in 0..8 {
        seen.push(state.current_player_id().0);
        // A manual 1 is never doubles.
        let report = engine.roll_dice(&mut state, Some(1)).unwrap();
        assert!(matches!(report.handoff, Handoff::Next(_)));
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 0, 1, 2, 3]);
}

#[test]
fn test_doubles_keep_turn_then_pass() {
    let mut state = SessionState::new(players(2)).unwrap();
    let mut engine = engine(ScriptedPresenter::new(), LoadedDice::new().then_roll(3, 3).then_roll(2, 1));

    let first = engine.roll_dice(&mut state, None).unwrap();
    assert_eq!(first.handoff, Handoff::ExtraTurn(ANA));
    assert_eq!(state.current_player_id(), ANA);

    let second = engine.roll_dice(&mut state, None).unwrap();
    assert_eq!(second.handoff, Handoff::Next(BO));
    assert_eq!(state.players()[0].position, 9);
}

// =============================================================================
// Jail
// =============================================================================

#[test]
fn test_three_doubles_forfeit_the_move() {
    let mut state = SessionState::new(players(2)).unwrap();
    let dice = LoadedDice::new().then_roll(1, 1).then_roll(2, 2).then_roll(6, 6);
    let mut engine = engine(ScriptedPresenter::new(), dice);

    engine.roll_dice(&mut state, None).unwrap();
    engine.roll_dice(&mut state, None).unwrap();
    let position_before = state.players()[0].position;
    let money_before = state.players()[0].money;

    let report = engine.roll_dice(&mut state, None).unwrap();

    assert_eq!(report.jail, Some(JailEvent::Entered(JailReason::ThreeDoubles)));
    assert!(report.movement.is_none());
    let ana = &state.players()[0];
    assert!(ana.in_jail);
    assert_eq!(ana.position, 10);
    assert_eq!(position_before, 6);
    assert_eq!(ana.money, money_before);
    assert_eq!(state.current_player_id(), BO);
}

#[test]
fn test_go_to_jail_square_ends_turn_even_on_doubles() {
    let mut state = SessionState::new(players(2)).unwrap();
    state.player_mut(ANA).unwrap().position = 26;
    let mut engine = engine(ScriptedPresenter::new(), LoadedDice::new().then_roll(2, 2));

    let report = engine.roll_dice(&mut state, None).unwrap();

    assert_eq!(report.jail, Some(JailEvent::Entered(JailReason::GoToJailSquare)));
    assert_eq!(report.handoff, Handoff::Next(BO));
    assert_eq!(state.players()[0].position, 10);
    assert_eq!(state.players()[0].consecutive_doubles, 0);
}

#[test]
fn test_jail_full_cycle() {
    let mut state = SessionState::new(players(2)).unwrap();
    state.player_mut(ANA).unwrap().position = 20;
    // ana: lands on go-to-jail; bo rolls; ana fails twice then pays by force.
    let dice = LoadedDice::new()
        .then_roll(6, 4)
        .then_roll(1, 2)
        .then_roll(1, 2)
        .then_roll(1, 3)
        .then_roll(1, 4)
        .then_roll(1, 5)
        .then_roll(2, 5);
    let mut engine = engine(ScriptedPresenter::new(), dice);

    engine.roll_dice(&mut state, None).unwrap();
    assert!(state.players()[0].in_jail);

    let mut events = Vec::new();
    for _ in 0..3 {
        // bo
        engine.roll_dice(&mut state, None).unwrap();
        // ana
        assert!(engine.roll_dice(&mut state, Some(4)).is_err());
        let report = engine.attempt_jail_doubles(&mut state).unwrap();
        events.push(report.jail.unwrap());
    }

    assert_eq!(
        events,
        vec![
            JailEvent::StillJailed { attempt: 2 },
            JailEvent::StillJailed { attempt: 3 },
            JailEvent::ForcedFee { fee: 50 },
        ]
    );
    let ana = &state.players()[0];
    assert!(!ana.in_jail);
    assert_eq!(ana.position, 10);
    assert_eq!(ana.money, 1450);
}

#[test]
fn test_pay_bail_then_roll_next_turn() {
    let mut players = players(2);
    players[0].in_jail = true;
    players[0].position = 10;
    players[0].money = 100;
    let mut state = SessionState::new(players).unwrap();
    let mut engine = engine(ScriptedPresenter::new(), LoadedDice::new());

    let report = engine.pay_jail_fee(&mut state).unwrap();
    assert_eq!(report.handoff, Handoff::Next(BO));

    let ana = &state.players()[0];
    assert_eq!(ana.money, 50);
    assert!(!ana.in_jail);
    assert_eq!(ana.jail_turns, 0);

    engine.roll_dice(&mut state, Some(3)).unwrap();
    let report = engine.roll_dice(&mut state, Some(1)).unwrap();
    assert_eq!(report.movement.unwrap().to, 11);
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_monopoly_gating_and_build_to_hotel() {
    let mut players = players(2);
    players[0].holdings.push(Holding::new(SquareId::new(37)));
    let mut state = SessionState::new(players).unwrap();
    let mut presenter = ScriptedPresenter::new();
    for _ in 0..5 {
        presenter.push_answer(0);
    }
    let mut engine = engine(presenter, LoadedDice::new());
    let park_place = SquareId::new(37);
    let boardwalk = SquareId::new(39);

    let refused = engine.build(&mut state, ANA, park_place).unwrap();
    assert_eq!(refused, BuildOutcome::Refused(BuildRefusal::NoMonopoly));
    assert_eq!(state.players()[0].holding(park_place).unwrap().house_count, 0);

    state.player_mut(ANA).unwrap().holdings.push(Holding::new(boardwalk));
    state.rebuild_index();

    for houses in 1..=4 {
        let outcome = engine.build(&mut state, ANA, boardwalk).unwrap();
        assert_eq!(
            outcome,
            BuildOutcome::HouseBuilt {
                square: boardwalk,
                houses,
                price: 100
            }
        );
    }
    let outcome = engine.build(&mut state, ANA, boardwalk).unwrap();
    assert_eq!(
        outcome,
        BuildOutcome::HotelBuilt {
            square: boardwalk,
            price: 250
        }
    );

    let holding = state.players()[0].holding(boardwalk).unwrap();
    assert!(holding.has_hotel);
    assert_eq!(holding.house_count, 0);
    assert_eq!(state.players()[0].money, 1500 - 400 - 250);

    let again = engine.build(&mut state, ANA, boardwalk).unwrap();
    assert_eq!(again, BuildOutcome::Refused(BuildRefusal::HotelPresent));
}

#[test]
fn test_hotel_rent_charged_to_visitor() {
    let mut players = players(2);
    let mut hotel = Holding::new(SquareId::new(39));
    hotel.has_hotel = true;
    players[0].holdings.push(hotel);
    players[1].position = 35;
    let mut state = SessionState::new(players).unwrap();
    state.advance_turn();
    let mut engine = engine(ScriptedPresenter::new(), LoadedDice::new());

    let report = engine.roll_dice(&mut state, Some(4)).unwrap();

    assert_eq!(
        report.movement.unwrap().landing,
        Landing::RentPaid {
            square: SquareId::new(39),
            owner: ANA,
            amount: 2000
        }
    );
    assert_eq!(state.players()[1].money, -500);
    assert!(engine.presenter().noticed("insufficient funds"));
}

// =============================================================================
// Collaborators
// =============================================================================

#[test]
fn test_channel_presenter_drives_a_purchase() {
    let config = EngineConfig::default();
    let (presenter, handle) = ChannelPresenter::from_config(&config);
    let mut engine = GameEngine::with_rng(
        BoardCatalog::standard(),
        config,
        LoadedDice::new(),
        presenter,
        MemoryStore::new(),
    );
    let mut state = SessionState::new(players(2)).unwrap();

    let front_end = thread::spawn(move || {
        let mut questions = 0;
        while let Ok(event) = handle.events.recv() {
            if let PresenterEvent::Choice(_) = event {
                questions += 1;
                handle.answers.send(0).unwrap();
            }
        }
        questions
    });

    let report = engine.roll_dice(&mut state, Some(1)).unwrap();
    assert!(matches!(report.movement.unwrap().landing, Landing::Purchased { .. }));
    assert_eq!(engine.presenter().notices().len(), 2);

    drop(engine);
    assert_eq!(front_end.join().unwrap(), 1);
    assert_eq!(state.players()[0].money, 1440);
}

#[test]
fn test_seeded_games_replay_identically() {
    fn play(seed: u64) -> Vec<Player> {
        let config = EngineConfig::default().with_seed(seed);
        let mut engine = GameEngine::with_rng(
            BoardCatalog::standard(),
            config,
            GameRng::new(seed),
            ScriptedPresenter::new(),
            MemoryStore::new(),
        );
        let mut state = SessionState::new(players(3)).unwrap();
        for _ in 0..60 {
            if state.current_player().in_jail {
                engine.attempt_jail_doubles(&mut state).unwrap();
            } else {
                engine.roll_dice(&mut state, None).unwrap();
            }
        }
        state.players().to_vec()
    }

    assert_eq!(play(11), play(11));
}
