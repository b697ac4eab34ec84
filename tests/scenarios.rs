//! End-to-end frame scenarios against the public API

use glam::Vec2;

use plummet::consts::{GLIDE_SPEED, PLAYER_SIZE};
use plummet::sim::{
    ControlMode, EndReason, Entity, GamePhase, GameState, Icon, Player, TickInput, Transition,
    Viewport, glide_height, tick,
};
use plummet::GameConfig;

const FRAME: f64 = 1.0 / 60.0;
const WAVE: f32 = 7.0;

fn running(config: GameConfig) -> GameState {
    let mut state = GameState::new(config, Viewport::new(800.0, 600.0), 2024);
    state.entities.clear();
    let start = TickInput {
        start: Some(ControlMode::Keyboard),
        ..Default::default()
    };
    let transitions = tick(&mut state, &start, 0.0);
    assert_eq!(transitions, vec![Transition::Started(ControlMode::Keyboard)]);
    state
}

/// Put an entity on its glide path at `x` and return its position
fn add(state: &mut GameState, x: f32, vx: f32, icon: Icon) -> (u32, Vec2) {
    let id = state.next_entity_id();
    let pos = Vec2::new(x, glide_height(x, WAVE, state.viewport.height));
    state.entities.push(Entity {
        id,
        pos,
        vel: Vec2::new(vx, 0.0),
        icon,
        speed: WAVE,
    });
    (id, pos)
}

fn hold_still_at(state: &mut GameState, pos: Vec2) {
    state.player.pos = pos;
    state.player.vel = Vec2::ZERO;
    state.player.diving = false;
}

#[test]
fn shark_contact_ends_the_run() {
    let mut state = running(GameConfig::default());
    let (_, pos) = add(&mut state, 400.0, 0.0, Icon::Shark);
    hold_still_at(&mut state, pos);

    let transitions = tick(&mut state, &TickInput::default(), 1.0);

    assert!(matches!(
        transitions.as_slice(),
        [Transition::Ended {
            reason: EndReason::Eaten(Icon::Shark),
            ..
        }]
    ));
    assert_eq!(state.phase, GamePhase::PostGame);
    let reason = state.end_reason.map(|r| r.to_string()).unwrap_or_default();
    assert!(reason.contains("shark"));
    assert_eq!(state.player, Player::spawn(state.viewport));
}

#[test]
fn octopus_has_its_own_line() {
    let mut state = running(GameConfig::default());
    let (_, pos) = add(&mut state, 300.0, 0.0, Icon::Squid);
    hold_still_at(&mut state, pos);

    tick(&mut state, &TickInput::default(), 1.0);
    assert_eq!(
        state.end_reason.map(|r| r.to_string()).as_deref(),
        Some("You were eaten by an octopus")
    );
}

#[test]
fn fish_caught_then_released_scores() {
    let mut state = running(GameConfig::default());
    let (fish_id, _) = add(&mut state, 400.0, 1.5, Icon::Fish);

    // Meet the fish where it will be after this frame's glide
    let x = 401.5;
    hold_still_at(&mut state, Vec2::new(x, glide_height(x, WAVE, 600.0)));

    tick(&mut state, &TickInput::default(), FRAME);
    let catch = state.caught.expect("fish should be caught");
    assert_eq!(catch.fish_id, fish_id);
    assert_eq!(catch.vx_at_catch, 1.5);

    // No input: the bird glides back up to the surface carrying the fish
    let mut now = FRAME;
    let mut scored = None;
    while scored.is_none() && now < 2.0 {
        now += FRAME;
        for transition in tick(&mut state, &TickInput::default(), now) {
            if let Transition::Scored(value) = transition {
                scored = Some(value);
            }
        }
        if let Some(fish) = state.held_entity() {
            assert_eq!(fish.pos, state.player.pos - Vec2::new(0.0, PLAYER_SIZE));
        }
    }

    assert_eq!(scored, Some(2.5));
    assert_eq!(state.score, 2.5);
    assert_eq!(state.caught, None);
    assert!(state.entity(fish_id).is_none());
    assert!((1..=4).contains(&state.entities.len()));
    // Catch bonus pushed the session clock back
    assert_eq!(state.game_start, Some(1.0));
}

#[test]
fn session_times_out() {
    let mut state = running(GameConfig::default());

    tick(&mut state, &TickInput::default(), 29.9);
    assert_eq!(state.phase, GamePhase::Running);

    let transitions = tick(&mut state, &TickInput::default(), 30.0);
    assert_eq!(
        transitions,
        vec![Transition::Ended {
            reason: EndReason::TimeUp,
            score: 0.0
        }]
    );
    assert_eq!(
        state.end_reason.map(|r| r.to_string()).as_deref(),
        Some("Times up!")
    );
    assert_eq!(state.game_start, None);
}

#[test]
fn reset_after_game_over() {
    let mut state = running(GameConfig::default());
    state.score = 7.0;
    tick(&mut state, &TickInput::default(), 30.0);
    assert_eq!(state.phase, GamePhase::PostGame);
    let old_ids: Vec<u32> = state.entities.iter().map(|e| e.id).collect();

    // Moving input does nothing on the game-over screen
    state.player.pos.y = 100.0;
    tick(&mut state, &TickInput { dive: true, ..Default::default() }, 31.0);
    assert_eq!(state.player.pos.y, 100.0);

    let reset = TickInput {
        reset: true,
        ..Default::default()
    };
    assert_eq!(tick(&mut state, &reset, 32.0), vec![Transition::Reset]);
    assert_eq!(state.phase, GamePhase::Idle);
    assert_eq!(state.score, 0.0);
    assert_eq!(state.end_reason, None);
    assert_eq!(state.control_mode, None);
    assert_eq!(state.player, Player::spawn(state.viewport));
    assert_eq!(state.entities.len(), 10);
    assert!(state.entities.iter().all(|e| !old_ids.contains(&e.id)));
}

#[test]
fn enemy_beats_the_catch() {
    let mut state = running(GameConfig::default());
    let (fish_id, pos) = add(&mut state, 400.0, 0.0, Icon::Blowfish);
    hold_still_at(&mut state, pos);
    tick(&mut state, &TickInput::default(), 0.5);
    assert_eq!(state.caught.map(|c| c.fish_id), Some(fish_id));

    // A shark shows up right where the bird is
    add(&mut state, 400.0, 0.0, Icon::Shark);
    hold_still_at(&mut state, pos);
    let transitions = tick(&mut state, &TickInput::default(), 0.6);

    assert!(matches!(
        transitions.as_slice(),
        [Transition::Ended {
            reason: EndReason::Eaten(Icon::Shark),
            score: 0.0
        }]
    ));
    assert_eq!(state.caught, None);
    assert_eq!(state.score, 0.0);
}

#[test]
fn lives_absorb_enemy_hits() {
    let mut state = running(GameConfig::relaxed());
    assert_eq!(state.lives, 3);
    let (_, pos) = add(&mut state, 400.0, 0.0, Icon::Shark);

    for (hit, now) in [(1, 1.0), (2, 2.0)] {
        hold_still_at(&mut state, pos);
        assert!(tick(&mut state, &TickInput::default(), now).is_empty());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.lives, 3 - hit);
        assert_eq!(state.player, Player::spawn(state.viewport));
    }

    hold_still_at(&mut state, pos);
    tick(&mut state, &TickInput::default(), 3.0);
    assert_eq!(state.phase, GamePhase::PostGame);
    assert_eq!(state.lives, 0);
}

#[test]
fn dive_timer_starts_and_clears() {
    let mut state = running(GameConfig::default());
    let ocean = state.ocean_level();

    // Just above the surface, already heading down
    state.player.pos = Vec2::new(400.0, ocean + 3.0);
    state.player.vel = Vec2::new(0.0, -GLIDE_SPEED);
    state.player.diving = true;

    tick(&mut state, &TickInput::default(), 1.0);
    assert!(state.player.pos.y < ocean);
    assert_eq!(state.dive_start, Some(1.0));

    // Key released: one more frame of sinking, then the bird floats back up
    let mut now = 1.0;
    while state.player.pos.y < ocean {
        assert_eq!(state.dive_start, Some(1.0));
        now += 0.1;
        tick(&mut state, &TickInput::default(), now);
    }
    assert_eq!(state.dive_start, None);
    assert!(now < 2.0);
}

#[test]
fn holding_a_dive_drowns() {
    let mut state = running(GameConfig::default());
    let dive = TickInput {
        dive: true,
        ..Default::default()
    };

    let mut now = 0.0;
    let mut ended = None;
    while ended.is_none() && now < 10.0 {
        now += FRAME;
        for transition in tick(&mut state, &dive, now) {
            if let Transition::Ended { reason, .. } = transition {
                ended = Some(reason);
            }
        }
    }

    assert_eq!(ended, Some(EndReason::Drowned));
    assert_eq!(
        state.end_reason.map(|r| r.to_string()).as_deref(),
        Some("You drowned")
    );
}
