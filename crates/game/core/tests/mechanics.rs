mod common;

use common::{Match, at};
use tactics_core::hazard::Vapor;
use tactics_core::{
    ActionError, ActionSlot, ActiveSkillKind, DamageCause, HazardKind, PassiveKind, Player,
    ResolvedEvent, StatDelta, StatusEffect, StatusKind, TerrainKind, TerrainOracle, TurnReport,
    UnitId, UnitType, VaporKind, queue_attack, queue_move, queue_skill, status,
};

fn echo_made_by(report: &TurnReport, original: UnitId) -> UnitId {
    report
        .events
        .iter()
        .find_map(|event| match event {
            ResolvedEvent::EchoCreated {
                echo,
                original: from,
                ..
            } if *from == original => Some(*echo),
            _ => None,
        })
        .expect("echo left behind")
}

fn count(report: &TurnReport, wanted: &ResolvedEvent) -> usize {
    report.events.iter().filter(|event| *event == wanted).count()
}

#[test]
fn echo_collapses_after_its_lifespan_and_explodes() {
    let mut game = Match::new(21);
    let grayman = game.place(UnitType::Grayman, Player::One, (4, 4));
    let glaive = game.place(UnitType::Glaiveman, Player::Two, (3, 3));

    queue_skill(&mut game.state, grayman, 2, at(4, 6)).unwrap();
    let report = game.resolve();

    let echo = report
        .events
        .iter()
        .find_map(|event| match event {
            ResolvedEvent::EchoCreated {
                echo,
                original,
                position,
            } if *original == grayman && *position == at(4, 4) => Some(*echo),
            _ => None,
        })
        .expect("echo left behind");
    assert_eq!(game.unit(grayman).position, at(4, 6));
    assert_eq!(
        queue_move(&mut game.state, echo, at(5, 5)),
        Err(ActionError::NotYourTurn)
    );

    // Two more of player One's turns age the echo out.
    game.resolve();
    game.resolve();
    assert!(game.state.unit(echo).is_some());
    game.resolve();
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::UnitDied {
        unit: echo,
        killer: None,
        cause: DamageCause::EchoExpired,
    }));
    assert!(report.events.contains(&ResolvedEvent::Damaged {
        source: Some(grayman),
        target: glaive,
        amount: 2,
        hp_after: 20,
        cause: DamageCause::EchoExplosion,
    }));
    assert!(game.state.unit(echo).is_none());
    assert_eq!(report.winner, None);
}

#[test]
fn echoes_only_attack() {
    let mut game = Match::new(22);
    let grayman = game.place(UnitType::Grayman, Player::One, (4, 4));
    game.place(UnitType::Glaiveman, Player::Two, (9, 9));

    queue_skill(&mut game.state, grayman, 2, at(4, 6)).unwrap();
    let report = game.resolve();
    let echo = report
        .events
        .iter()
        .find_map(|event| match event {
            ResolvedEvent::EchoCreated { echo, .. } => Some(*echo),
            _ => None,
        })
        .expect("echo left behind");
    game.resolve();

    assert_eq!(
        queue_move(&mut game.state, echo, at(5, 5)),
        Err(ActionError::EchoRestricted)
    );
    assert_eq!(
        queue_skill(&mut game.state, echo, 0, at(0, 0)),
        Err(ActionError::EchoRestricted)
    );
}

#[test]
fn kill_inside_a_dike_upgrades_the_condenser() {
    let mut game = Match::new(31);
    let condenser = game.place(UnitType::MarrowCondenser, Player::One, (4, 4));
    let fowl = game.place(UnitType::FowlContrivance, Player::One, (3, 3));
    let grayman = game.place(UnitType::Grayman, Player::Two, (4, 5));
    game.place(UnitType::GasMachinist, Player::Two, (8, 8));
    game.unit_mut(grayman).hp = 2;

    queue_skill(&mut game.state, condenser, 1, at(4, 4)).unwrap();
    queue_attack(&mut game.state, fowl, at(4, 5)).unwrap();
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::HazardCreated {
        owner: condenser,
        hazard: HazardKind::Dike,
        center: at(4, 4),
    }));
    assert_eq!(game.state.terrain.terrain_at(at(2, 4)), Some(TerrainKind::MarrowWall));
    assert_eq!(game.state.hazards.wall_at(at(6, 6)).map(|wall| wall.hp), Some(2));
    assert_eq!(game.state.hazards.dike_of(condenser).map(|dike| dike.walls.len()), Some(16));

    assert!(report.events.contains(&ResolvedEvent::PassiveTriggered {
        unit: condenser,
        passive: PassiveKind::Dominion,
    }));
    assert!(report.events.contains(&ResolvedEvent::SkillUpgraded {
        unit: condenser,
        skill: ActiveSkillKind::MarrowDike,
    }));
    let kit = &game.unit(condenser).kit;
    assert_eq!(kit.passive.kills, 1);
    assert!(kit.is_upgraded(ActiveSkillKind::MarrowDike));
}

#[test]
fn dike_walls_crumble_under_attacks() {
    let mut game = Match::new(32);
    let condenser = game.place(UnitType::MarrowCondenser, Player::One, (4, 4));
    let glaive = game.place(UnitType::Glaiveman, Player::Two, (4, 7));

    queue_skill(&mut game.state, condenser, 1, at(4, 4)).unwrap();
    game.resolve();

    queue_attack(&mut game.state, glaive, at(4, 6)).unwrap();
    let report = game.resolve();
    assert!(report.events.contains(&ResolvedEvent::WallDamaged {
        attacker: glaive,
        position: at(4, 6),
        remaining: 1,
    }));

    game.resolve();
    queue_attack(&mut game.state, glaive, at(4, 6)).unwrap();
    let report = game.resolve();
    assert!(report.events.contains(&ResolvedEvent::WallDestroyed { position: at(4, 6) }));
    assert_eq!(game.state.terrain.terrain_at(at(4, 6)), Some(TerrainKind::Empty));
    assert!(game.state.hazards.wall_at(at(4, 6)).is_none());
    assert_eq!(
        queue_move(&mut game.state, glaive, at(4, 5)),
        Err(ActionError::NotYourTurn)
    );
}

#[test]
fn expired_dike_restores_the_ground() {
    let mut game = Match::with_terrain(33, &[((2, 4), TerrainKind::Dust)]);
    let condenser = game.place(UnitType::MarrowCondenser, Player::One, (4, 4));
    game.place(UnitType::Glaiveman, Player::Two, (9, 9));

    queue_skill(&mut game.state, condenser, 1, at(4, 4)).unwrap();
    let mut events = Vec::new();
    for _ in 0..5 {
        events.extend(game.resolve().events);
    }

    assert!(events.contains(&ResolvedEvent::HazardExpired {
        owner: condenser,
        hazard: HazardKind::Dike,
        center: at(4, 4),
    }));
    assert_eq!(game.state.terrain.terrain_at(at(2, 4)), Some(TerrainKind::Dust));
    assert_eq!(game.state.terrain.terrain_at(at(6, 6)), Some(TerrainKind::Empty));
    assert!(game.state.hazards.dikes().is_empty());
}

fn saft_e(owner: tactics_core::UnitId, center: (i32, i32)) -> Vapor {
    Vapor {
        kind: VaporKind::SaftE,
        owner,
        owner_player: Player::Two,
        center: at(center.0, center.1),
        remaining: 2,
    }
}

#[test]
fn protection_zone_turns_away_outside_attackers() {
    let mut game = Match::new(41);
    let glaive = game.place(UnitType::Glaiveman, Player::One, (5, 3));
    let fowl = game.place(UnitType::FowlContrivance, Player::One, (4, 6));
    let gas = game.place(UnitType::GasMachinist, Player::Two, (5, 8));
    game.place(UnitType::MarrowCondenser, Player::Two, (5, 5));
    game.state.hazards.add_vapor(saft_e(gas, (5, 6)));

    assert_eq!(
        queue_attack(&mut game.state, glaive, at(5, 5)),
        Err(ActionError::Protected)
    );
    assert_eq!(queue_attack(&mut game.state, fowl, at(5, 5)), Ok(()));
}

#[test]
fn protection_raised_after_planning_voids_the_attack() {
    let mut game = Match::new(42);
    let glaive = game.place(UnitType::Glaiveman, Player::One, (5, 3));
    let gas = game.place(UnitType::GasMachinist, Player::Two, (5, 8));
    let condenser = game.place(UnitType::MarrowCondenser, Player::Two, (5, 5));

    queue_attack(&mut game.state, glaive, at(5, 5)).unwrap();
    game.state.hazards.add_vapor(saft_e(gas, (5, 6)));
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::ActionSkipped {
        unit: glaive,
        slot: ActionSlot::Attack,
        reason: ActionError::Protected,
    }));
    assert_eq!(game.unit(condenser).hp, game.unit(condenser).max_hp);
}

#[test]
fn autoclave_fires_once_at_critical_health() {
    let mut game = Match::new(51);
    let glaive = game.place(UnitType::Glaiveman, Player::One, (5, 4));
    let grayman = game.place(UnitType::Grayman, Player::Two, (5, 7));

    game.resolve();
    game.unit_mut(glaive).hp = 8;
    queue_attack(&mut game.state, grayman, at(5, 4)).unwrap();
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::PassiveTriggered {
        unit: glaive,
        passive: PassiveKind::Autoclave,
    }));
    assert!(report.events.contains(&ResolvedEvent::Damaged {
        source: Some(glaive),
        target: grayman,
        amount: 8,
        hp_after: 10,
        cause: DamageCause::Autoclave,
    }));
    assert!(report.events.contains(&ResolvedEvent::Healed {
        unit: glaive,
        amount: 4,
        hp_after: 9,
    }));
    assert!(game.unit(glaive).kit.passive.activated);
}

#[test]
fn foreman_grips_and_grinds_its_captive() {
    let mut game = Match::new(61);
    let foreman = game.place(UnitType::MandibleForeman, Player::One, (2, 2));
    let glaive = game.place(UnitType::Glaiveman, Player::Two, (2, 3));

    queue_attack(&mut game.state, foreman, at(2, 3)).unwrap();
    let report = game.resolve();
    assert!(report.events.contains(&ResolvedEvent::Captured {
        captor: foreman,
        captive: glaive,
    }));
    assert_eq!(game.unit(glaive).trapped_by, Some(foreman));
    assert_eq!(game.unit(glaive).hp, 20);

    assert_eq!(
        queue_move(&mut game.state, glaive, at(2, 5)),
        Err(ActionError::Trapped)
    );
    game.resolve();

    let report = game.resolve();
    assert!(report.events.contains(&ResolvedEvent::Damaged {
        source: Some(foreman),
        target: glaive,
        amount: 2,
        hp_after: 18,
        cause: DamageCause::Trap,
    }));
    assert_eq!(game.unit(glaive).trapped_by, Some(foreman));
}

#[test]
fn lathe_charges_stretch_the_cloud() {
    let mut game = Match::new(71);
    let gas = game.place(UnitType::GasMachinist, Player::One, (4, 1));
    let glaive = game.place(UnitType::Glaiveman, Player::Two, (4, 5));

    game.resolve();
    game.resolve();
    assert_eq!(game.unit(gas).kit.passive.charges, 1);

    queue_skill(&mut game.state, gas, 0, at(4, 4)).unwrap();
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::HazardCreated {
        owner: gas,
        hazard: HazardKind::Vapor(VaporKind::Broaching),
        center: at(4, 4),
    }));
    assert!(report.events.contains(&ResolvedEvent::Damaged {
        source: Some(gas),
        target: glaive,
        amount: 1,
        hp_after: 21,
        cause: DamageCause::Hazard(VaporKind::Broaching),
    }));
    assert_eq!(game.unit(gas).kit.passive.charges, 0);
    assert_eq!(game.state.hazards.vapors().first().map(|vapor| vapor.remaining), Some(1));
}

#[test]
fn trapped_units_cannot_queue_skills() {
    let mut game = Match::new(62);
    let foreman = game.place(UnitType::MandibleForeman, Player::One, (2, 2));
    let glaive = game.place(UnitType::Glaiveman, Player::Two, (2, 3));

    queue_attack(&mut game.state, foreman, at(2, 3)).unwrap();
    game.resolve();
    assert_eq!(game.unit(glaive).trapped_by, Some(foreman));

    assert_eq!(
        queue_skill(&mut game.state, glaive, 1, at(2, 5)),
        Err(ActionError::Trapped)
    );
    assert!(game.unit(glaive).skill(1).unwrap().is_ready());
    assert_eq!(queue_attack(&mut game.state, glaive, at(2, 2)), Ok(()));
}

#[test]
fn capture_after_planning_voids_the_skill() {
    let mut game = Match::new(63);
    let glaive = game.place(UnitType::Glaiveman, Player::One, (5, 5));
    let foreman = game.place(UnitType::MandibleForeman, Player::Two, (5, 6));

    queue_skill(&mut game.state, glaive, 1, at(5, 3)).unwrap();
    game.unit_mut(glaive).trapped_by = Some(foreman);
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::ActionSkipped {
        unit: glaive,
        slot: ActionSlot::Skill(ActiveSkillKind::Vault),
        reason: ActionError::Trapped,
    }));
    assert_eq!(game.unit(glaive).position, at(5, 5));
    assert_eq!(game.unit(glaive).trapped_by, Some(foreman));
}

#[test]
fn pried_captor_lets_go_of_its_captive() {
    let mut game = Match::new(64);
    let glaive = game.place(UnitType::Glaiveman, Player::One, (5, 3));
    let foreman = game.place(UnitType::MandibleForeman, Player::Two, (5, 4));
    let fowl = game.place(UnitType::FowlContrivance, Player::One, (6, 5));
    game.unit_mut(fowl).trapped_by = Some(foreman);

    queue_skill(&mut game.state, glaive, 0, at(5, 4)).unwrap();
    let report = game.resolve();

    assert_eq!(game.unit(foreman).position, at(5, 7));
    assert_eq!(game.unit(foreman).hp, 17);
    assert!(report.events.contains(&ResolvedEvent::CaptiveReleased {
        captor: foreman,
        captive: fowl,
    }));
    assert_eq!(game.unit(fowl).trapped_by, None);
    assert!(game.state.captives_of(foreman).is_empty());
}

#[test]
fn vault_clears_walls() {
    let mut game = Match::with_terrain(81, &[((5, 6), TerrainKind::Limestone)]);
    let glaive = game.place(UnitType::Glaiveman, Player::One, (5, 5));
    game.place(UnitType::Grayman, Player::Two, (9, 9));

    queue_skill(&mut game.state, glaive, 1, at(5, 7)).unwrap();
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::Teleported {
        unit: glaive,
        from: at(5, 5),
        to: at(5, 7),
    }));
    assert_eq!(game.unit(glaive).position, at(5, 7));
}

#[test]
fn delta_config_crosses_the_board() {
    let mut game = Match::new(82);
    let grayman = game.place(UnitType::Grayman, Player::One, (0, 0));
    game.place(UnitType::Glaiveman, Player::Two, (9, 9));

    assert_eq!(
        queue_skill(&mut game.state, grayman, 0, at(9, 9)),
        Err(ActionError::Occupied)
    );
    queue_skill(&mut game.state, grayman, 0, at(8, 1)).unwrap();
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::Teleported {
        unit: grayman,
        from: at(0, 0),
        to: at(8, 1),
    }));
    assert!(!game.unit(grayman).skill(0).unwrap().is_ready());
}

#[test]
fn estrange_saps_attack_and_defense() {
    let mut game = Match::new(83);
    let grayman = game.place(UnitType::Grayman, Player::One, (4, 2));
    let condenser = game.place(UnitType::MarrowCondenser, Player::Two, (4, 5));

    queue_skill(&mut game.state, grayman, 1, at(4, 5)).unwrap();
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::Damaged {
        source: Some(grayman),
        target: condenser,
        amount: 3,
        hp_after: 17,
        cause: DamageCause::Skill(ActiveSkillKind::Estrange),
    }));
    assert!(report.events.contains(&ResolvedEvent::EffectApplied {
        unit: condenser,
        kind: StatusKind::Estranged,
        duration: 3,
    }));
    let victim = game.unit(condenser);
    assert_eq!(victim.attack(), 3);
    assert_eq!(victim.defense(), 1);
}

#[test]
fn estrange_needs_a_clear_path() {
    let mut game = Match::with_terrain(84, &[((4, 4), TerrainKind::Furniture)]);
    let grayman = game.place(UnitType::Grayman, Player::One, (4, 2));
    game.place(UnitType::MarrowCondenser, Player::Two, (4, 5));
    game.place(UnitType::Glaiveman, Player::One, (6, 2));
    game.place(UnitType::FowlContrivance, Player::Two, (7, 2));

    assert_eq!(
        queue_skill(&mut game.state, grayman, 1, at(4, 5)),
        Err(ActionError::PathBlocked)
    );
    // Units in between block just like furniture.
    assert_eq!(
        queue_skill(&mut game.state, grayman, 1, at(7, 2)),
        Err(ActionError::PathBlocked)
    );
    assert!(game.unit(grayman).skill(1).unwrap().is_ready());
    assert!(game.unit(grayman).pending.is_empty());
}

#[test]
fn jawline_bites_every_adjacent_enemy() {
    let mut game = Match::new(85);
    let foreman = game.place(UnitType::MandibleForeman, Player::One, (5, 5));
    let glaive = game.place(UnitType::Glaiveman, Player::Two, (5, 6));
    let fowl = game.place(UnitType::FowlContrivance, Player::Two, (4, 4));
    let condenser = game.place(UnitType::MarrowCondenser, Player::Two, (7, 7));

    queue_skill(&mut game.state, foreman, 2, at(5, 5)).unwrap();
    game.resolve();

    assert_eq!(game.unit(glaive).hp, 19);
    assert_eq!(game.unit(fowl).hp, 14);
    assert_eq!(game.unit(glaive).move_range(), 1);
    assert_eq!(game.unit(fowl).move_range(), 3);
    assert_eq!(game.unit(glaive).status.remaining(StatusKind::Jawline), Some(3));
    assert_eq!(game.unit(condenser).hp, 20);
    assert!(!game.unit(condenser).status.has(StatusKind::Jawline));
}

#[test]
fn site_inspections_stack_then_fade() {
    let mut game = Match::new(86);
    let first = game.place(UnitType::MandibleForeman, Player::One, (5, 5));
    let second = game.place(UnitType::MandibleForeman, Player::One, (5, 4));
    let glaive = game.place(UnitType::Glaiveman, Player::One, (5, 6));
    game.place(UnitType::Grayman, Player::Two, (0, 9));

    queue_skill(&mut game.state, first, 1, at(5, 6)).unwrap();
    queue_skill(&mut game.state, second, 1, at(5, 6)).unwrap();
    game.resolve();

    let inspected = game
        .unit(glaive)
        .status
        .iter()
        .filter(|effect| effect.kind == StatusKind::Inspected)
        .count();
    assert_eq!(inspected, 2);
    assert_eq!(game.unit(glaive).attack(), 6);
    assert_eq!(game.unit(glaive).move_range(), 4);
    assert_eq!(game.unit(second).attack(), 3);

    game.resolve();
    game.resolve();
    assert_eq!(game.unit(glaive).attack(), 4);
    assert_eq!(game.unit(glaive).move_range(), 2);
    assert!(game.unit(glaive).bonuses.is_zero());
}

#[test]
fn ossify_hardens_more_once_upgraded() {
    let mut game = Match::new(87);
    let plain = game.place(UnitType::MarrowCondenser, Player::One, (5, 5));
    let upgraded = game.place(UnitType::MarrowCondenser, Player::One, (2, 2));
    game.place(UnitType::Glaiveman, Player::Two, (9, 9));
    assert!(game.unit_mut(upgraded).kit.upgrade(ActiveSkillKind::Ossify));

    queue_skill(&mut game.state, plain, 0, at(5, 5)).unwrap();
    queue_skill(&mut game.state, upgraded, 0, at(2, 2)).unwrap();
    game.resolve();

    assert_eq!(game.unit(plain).defense(), 4);
    assert_eq!(game.unit(upgraded).defense(), 5);
    assert_eq!(game.unit(plain).move_range(), 1);
    assert_eq!(game.unit(plain).status.remaining(StatusKind::Ossified), Some(1));
}

#[test]
fn bone_tithe_grows_the_condenser() {
    let mut game = Match::new(88);
    let condenser = game.place(UnitType::MarrowCondenser, Player::One, (5, 5));
    let glaive = game.place(UnitType::Glaiveman, Player::Two, (5, 6));
    let fowl = game.place(UnitType::FowlContrivance, Player::Two, (4, 5));

    queue_skill(&mut game.state, condenser, 2, at(5, 5)).unwrap();
    let report = game.resolve();

    assert_eq!(game.unit(glaive).hp, 21);
    assert_eq!(game.unit(fowl).hp, 17);
    assert!(report.events.contains(&ResolvedEvent::Healed {
        unit: condenser,
        amount: 2,
        hp_after: 22,
    }));
    assert_eq!(game.unit(condenser).max_hp, 22);
}

#[test]
fn upgraded_bone_tithe_scales_with_dominion_kills() {
    let mut game = Match::new(89);
    let condenser = game.place(UnitType::MarrowCondenser, Player::One, (5, 5));
    let glaive = game.place(UnitType::Glaiveman, Player::Two, (5, 6));
    {
        let kit = &mut game.unit_mut(condenser).kit;
        assert!(kit.upgrade(ActiveSkillKind::BoneTithe));
        kit.passive.kills = 4;
    }

    queue_skill(&mut game.state, condenser, 2, at(5, 5)).unwrap();
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::Damaged {
        source: Some(condenser),
        target: glaive,
        amount: 4,
        hp_after: 18,
        cause: DamageCause::Skill(ActiveSkillKind::BoneTithe),
    }));
    assert_eq!(game.unit(condenser).max_hp, 22);
}

#[test]
fn murmuration_dusk_covers_a_three_by_three() {
    let mut game = Match::new(90);
    let fowl = game.place(UnitType::FowlContrivance, Player::One, (5, 2));
    let glaive = game.place(UnitType::Glaiveman, Player::Two, (5, 5));
    let condenser = game.place(UnitType::MarrowCondenser, Player::Two, (6, 6));
    let grayman = game.place(UnitType::Grayman, Player::Two, (8, 8));

    queue_skill(&mut game.state, fowl, 0, at(5, 5)).unwrap();
    game.resolve();

    assert_eq!(game.unit(glaive).hp, 17);
    assert_eq!(game.unit(condenser).hp, 16);
    assert_eq!(game.unit(grayman).hp, 18);
}

#[test]
fn emetic_flange_shoves_neighbours_back() {
    let mut game = Match::with_terrain(91, &[((7, 5), TerrainKind::Limestone)]);
    let fowl = game.place(UnitType::FowlContrivance, Player::One, (5, 5));
    let glaive = game.place(UnitType::Glaiveman, Player::Two, (5, 6));
    let condenser = game.place(UnitType::MarrowCondenser, Player::Two, (4, 4));
    let gas = game.place(UnitType::GasMachinist, Player::Two, (6, 5));

    queue_skill(&mut game.state, fowl, 2, at(5, 5)).unwrap();
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::Displaced {
        unit: glaive,
        from: at(5, 6),
        to: at(5, 7),
        distance: 1,
    }));
    assert_eq!(game.unit(glaive).hp, 19);
    assert_eq!(game.unit(condenser).position, at(3, 3));
    assert_eq!(game.unit(condenser).hp, 18);
    assert_eq!(game.unit(gas).position, at(6, 5));
    assert_eq!(game.unit(gas).hp, 15);
}

#[test]
fn saft_e_mends_allies_inside() {
    let mut game = Match::new(92);
    let gas = game.place(UnitType::GasMachinist, Player::One, (4, 1));
    let glaive = game.place(UnitType::Glaiveman, Player::One, (4, 4));
    game.place(UnitType::Grayman, Player::Two, (9, 9));
    game.unit_mut(glaive).hp = 10;

    queue_skill(&mut game.state, gas, 1, at(4, 3)).unwrap();
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::HazardCreated {
        owner: gas,
        hazard: HazardKind::Vapor(VaporKind::SaftE),
        center: at(4, 3),
    }));
    assert!(report.events.contains(&ResolvedEvent::Healed {
        unit: glaive,
        amount: 1,
        hp_after: 11,
    }));
    assert!(report.events.contains(&ResolvedEvent::HazardExpired {
        owner: gas,
        hazard: HazardKind::Vapor(VaporKind::SaftE),
        center: at(4, 3),
    }));
}

#[test]
fn broaching_gas_scrubs_allies_and_stings_enemies() {
    let mut game = Match::new(93);
    let gas = game.place(UnitType::GasMachinist, Player::One, (4, 1));
    let glaive = game.place(UnitType::Glaiveman, Player::One, (4, 4));
    let condenser = game.place(UnitType::MarrowCondenser, Player::Two, (3, 2));
    status::apply(
        game.unit_mut(glaive),
        StatusEffect::new(StatusKind::Slowed, 3, StatDelta::move_range(-1)),
    )
    .unwrap();

    queue_skill(&mut game.state, gas, 0, at(4, 3)).unwrap();
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::EffectExpired {
        unit: glaive,
        kind: StatusKind::Slowed,
    }));
    assert!(!game.unit(glaive).status.has(StatusKind::Slowed));
    assert_eq!(game.unit(glaive).move_range(), 2);
    assert!(report.events.contains(&ResolvedEvent::Damaged {
        source: Some(gas),
        target: condenser,
        amount: 1,
        hp_after: 19,
        cause: DamageCause::Hazard(VaporKind::Broaching),
    }));
}

#[test]
fn diverge_splits_a_cloud_in_two() {
    let mut game = Match::new(94);
    let gas = game.place(UnitType::GasMachinist, Player::One, (4, 1));
    game.place(UnitType::Grayman, Player::Two, (9, 9));
    game.state.hazards.add_vapor(Vapor {
        kind: VaporKind::Broaching,
        owner: gas,
        owner_player: Player::One,
        center: at(4, 4),
        remaining: 2,
    });

    assert_eq!(
        queue_skill(&mut game.state, gas, 2, at(4, 5)),
        Err(ActionError::NoTarget)
    );
    queue_skill(&mut game.state, gas, 2, at(4, 4)).unwrap();
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::HazardExpired {
        owner: gas,
        hazard: HazardKind::Vapor(VaporKind::Broaching),
        center: at(4, 4),
    }));
    let clouds: Vec<(VaporKind, _)> = game
        .state
        .hazards
        .vapors()
        .iter()
        .map(|vapor| (vapor.kind, vapor.center))
        .collect();
    assert_eq!(
        clouds,
        vec![(VaporKind::Coolant, at(4, 3)), (VaporKind::Cutting, at(4, 5))]
    );
}

#[test]
fn expedite_rushes_in_and_grips() {
    let mut game = Match::new(95);
    let foreman = game.place(UnitType::MandibleForeman, Player::One, (2, 2));
    let glaive = game.place(UnitType::Glaiveman, Player::Two, (2, 6));

    queue_skill(&mut game.state, foreman, 0, at(2, 6)).unwrap();
    let report = game.resolve();

    assert_eq!(game.unit(foreman).position, at(2, 5));
    assert!(report.events.contains(&ResolvedEvent::Damaged {
        source: Some(foreman),
        target: glaive,
        amount: 5,
        hp_after: 17,
        cause: DamageCause::Skill(ActiveSkillKind::Expedite),
    }));
    assert!(report.events.contains(&ResolvedEvent::Captured {
        captor: foreman,
        captive: glaive,
    }));
    assert_eq!(game.unit(glaive).trapped_by, Some(foreman));
}

#[test]
fn upgraded_dike_mires_intruders_on_every_turn_start() {
    let mut game = Match::new(96);
    let condenser = game.place(UnitType::MarrowCondenser, Player::One, (4, 4));
    let glaive = game.place(UnitType::Glaiveman, Player::Two, (5, 5));
    game.place(UnitType::FowlContrivance, Player::Two, (9, 9));
    assert!(game.unit_mut(condenser).kit.upgrade(ActiveSkillKind::MarrowDike));

    queue_skill(&mut game.state, condenser, 1, at(4, 4)).unwrap();
    let report = game.resolve();

    let mired = ResolvedEvent::EffectApplied {
        unit: glaive,
        kind: StatusKind::Mired,
        duration: 2,
    };
    // Once when the dike rises, once as player Two's turn begins.
    assert_eq!(count(&report, &mired), 2);
    assert_eq!(game.unit(glaive).move_range(), 1);
    assert_eq!(game.state.hazards.wall_at(at(2, 4)).map(|wall| wall.hp), Some(3));

    game.resolve();
    let report = game.resolve();
    assert_eq!(count(&report, &mired), 1);
    assert_eq!(game.unit(glaive).move_range(), 1);
}

#[test]
fn echo_killed_by_an_echo_blast_does_not_explode() {
    let mut game = Match::new(97);
    let ours = game.place(UnitType::Grayman, Player::One, (4, 4));
    let theirs = game.place(UnitType::Grayman, Player::Two, (4, 5));
    let glaive = game.place(UnitType::Glaiveman, Player::Two, (2, 4));
    let condenser = game.place(UnitType::MarrowCondenser, Player::One, (3, 6));

    queue_skill(&mut game.state, ours, 2, at(4, 1)).unwrap();
    let our_echo = echo_made_by(&game.resolve(), ours);
    queue_skill(&mut game.state, theirs, 2, at(4, 8)).unwrap();
    let their_echo = echo_made_by(&game.resolve(), theirs);
    game.resolve();

    game.unit_mut(our_echo).hp = 1;
    game.unit_mut(their_echo).hp = 2;
    queue_attack(&mut game.state, glaive, at(4, 4)).unwrap();
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::UnitDied {
        unit: their_echo,
        killer: Some(ours),
        cause: DamageCause::EchoExplosion,
    }));
    assert!(game.state.unit(our_echo).is_none());
    assert!(game.state.unit(their_echo).is_none());
    assert!(!report.events.iter().any(|event| matches!(
        event,
        ResolvedEvent::Damaged { target, .. } if *target == condenser
    )));
    assert_eq!(game.unit(condenser).hp, 20);
}

#[test]
fn vapors_do_not_mend_echoes() {
    let mut game = Match::new(98);
    let grayman = game.place(UnitType::Grayman, Player::One, (4, 4));
    let gas = game.place(UnitType::GasMachinist, Player::One, (0, 0));
    game.place(UnitType::Glaiveman, Player::Two, (9, 9));

    queue_skill(&mut game.state, grayman, 2, at(4, 6)).unwrap();
    let echo = echo_made_by(&game.resolve(), grayman);
    game.resolve();

    game.unit_mut(echo).hp = 2;
    game.unit_mut(grayman).hp = 10;
    game.state.hazards.add_vapor(Vapor {
        kind: VaporKind::Coolant,
        owner: gas,
        owner_player: Player::One,
        center: at(4, 5),
        remaining: 2,
    });
    let report = game.resolve();

    assert!(report.events.contains(&ResolvedEvent::Healed {
        unit: grayman,
        amount: 2,
        hp_after: 12,
    }));
    assert!(!report.events.iter().any(|event| matches!(
        event,
        ResolvedEvent::Healed { unit, .. } if *unit == echo
    )));
    assert_eq!(game.unit(echo).hp, 2);
}
