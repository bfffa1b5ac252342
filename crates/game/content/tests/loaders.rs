use std::fs;
use std::path::PathBuf;

use tactics_content::{ContentFactory, Order, RosterLoader};
use tactics_core::{GameConfig, Player, Position, TerrainKind, TerrainOracle, UnitType};

fn shipped() -> ContentFactory {
    ContentFactory::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"))
}

#[test]
fn shipped_config_matches_the_defaults() {
    let config = shipped().load_config().unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn shipped_roster_matches_the_built_in_one() {
    let roster = shipped().load_roster().unwrap();
    assert_eq!(roster, tactics_core::Roster::standard());
}

#[test]
fn shipped_scenarios_set_up() {
    let factory = shipped();
    for name in ["opening", "duel"] {
        let (_, scenario, skirmish) = factory.load_skirmish(name).unwrap();
        assert_eq!(skirmish.units.len(), scenario.placements.len());
        assert_eq!(skirmish.state.turn.current_player, Player::One);
    }

    let (_, _, skirmish) = factory.load_skirmish("opening").unwrap();
    assert_eq!(
        skirmish.state.terrain.terrain_at(Position::new(2, 6)),
        Some(TerrainKind::Pillar)
    );
    assert_eq!(skirmish.state.terrain.appraisal(Position::new(0, 9)), Some(8));
    assert_eq!(skirmish.state.terrain.appraisal(Position::new(0, 10)), None);
    let fowl = skirmish.state.unit(skirmish.units[3]).unwrap();
    assert_eq!(fowl.kind, UnitType::FowlContrivance);
    assert_eq!(fowl.owner, Player::Two);
}

#[test]
fn scripted_first_pass_queues_cleanly() {
    let (_, scenario, mut skirmish) = shipped().load_skirmish("opening").unwrap();
    let rejected = skirmish.queue(&scenario.turns[0]);
    assert!(rejected.is_empty(), "rejected: {rejected:?}");
    assert!(matches!(scenario.turns[0][0], Order::Move { unit: 0, .. }));
}

#[test]
fn roster_missing_a_unit_type_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.ron");
    fs::write(
        &path,
        r#"(archetypes: [
            (
                kind: Glaiveman,
                stats: (max_hp: 22, attack: 4, defense: 1, move_range: 2, attack_range: 2),
                passive: Autoclave,
                actives: [Pry, Vault, Judgement],
            ),
        ])"#,
    )
    .unwrap();

    let err = RosterLoader::load(&path).unwrap_err();
    assert!(err.to_string().contains("no archetype defined"), "{err}");
}

#[test]
fn missing_files_name_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let factory = ContentFactory::new(dir.path());

    let err = factory.load_config().unwrap_err();
    assert!(err.to_string().contains("config.toml"), "{err}");
}

#[test]
fn scenario_on_a_blocked_tile_fails_setup() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("maps")).unwrap();
    fs::create_dir_all(dir.path().join("scenarios")).unwrap();
    fs::write(dir.path().join("config.toml"), "").unwrap();
    fs::copy(
        shipped().data_dir().join("roster.ron"),
        dir.path().join("roster.ron"),
    )
    .unwrap();
    fs::write(
        dir.path().join("maps/tiny.ron"),
        "(dimensions: (3, 3), tiles: [(1, 1, Pillar)])",
    )
    .unwrap();
    fs::write(
        dir.path().join("scenarios/bad.ron"),
        r#"(
            name: "bad",
            map: "tiny",
            seed: 1,
            placements: [(kind: Grayman, owner: One, at: (1, 1))],
        )"#,
    )
    .unwrap();

    let err = ContentFactory::new(dir.path())
        .load_skirmish("bad")
        .unwrap_err();
    assert!(err.to_string().contains("Placement 0"), "{err}");
}
