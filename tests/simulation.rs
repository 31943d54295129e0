//! End-to-end checks of the simulation through the public API

use std::collections::HashSet;

use snake3d::game::{
    Action, Arena, Axis, DeadSnakePolicy, Direction, FoodSet, GameConfig, GameEngine,
    MoveOutcome, PathFinder, Rules, Snake, Vec3,
};

fn unit_rules() -> Rules {
    Rules::new(Arena::new(10, 1), DeadSnakePolicy::Ignore)
}

fn length_three_snake() -> Snake {
    Snake::from_body(
        0,
        vec![Vec3::new(0, 0, 0), Vec3::new(-1, 0, 0), Vec3::new(-2, 0, 0)],
        Some(Direction::Right),
    )
}

#[test]
fn eating_grows_the_snake_and_consumes_food() {
    let rules = unit_rules();
    let mut snake = length_three_snake();
    let mut food = FoodSet::from_positions([Vec3::new(1, 0, 0)]);
    let snakes = vec![snake.clone()];

    let outcome = snake.plan_move(&snakes, &food, &rules);
    snake.apply(outcome);
    if let MoveOutcome::Ate(pos) = outcome {
        food.remove(pos);
    }

    assert_eq!(
        snake.body,
        vec![
            Vec3::new(1, 0, 0),
            Vec3::new(0, 0, 0),
            Vec3::new(-1, 0, 0),
            Vec3::new(-2, 0, 0)
        ]
    );
    assert!(food.is_empty());
}

#[test]
fn moving_without_food_drops_the_tail() {
    let rules = unit_rules();
    let mut snake = length_three_snake();
    let snakes = vec![snake.clone()];

    let outcome = snake.plan_move(&snakes, &FoodSet::new(), &rules);
    snake.apply(outcome);

    assert_eq!(
        snake.body,
        vec![Vec3::new(1, 0, 0), Vec3::new(0, 0, 0), Vec3::new(-1, 0, 0)]
    );
}

#[test]
fn boxed_in_autonomous_snake_stalls() {
    let rules = unit_rules();
    let mut rng = rand::thread_rng();
    let mut snake = Snake::from_body(0, vec![Vec3::ZERO], None);
    snake.autonomous = true;
    snake.move_order = [Axis::Z, Axis::Y, Axis::X];

    let mut snakes = vec![snake.clone()];
    for (i, dir) in Direction::ALL.iter().enumerate() {
        snakes.push(Snake::from_body(i + 1, vec![dir.delta()], None));
    }
    let food = FoodSet::from_positions([Vec3::new(3, 3, 3)]);

    snake.auto_set_direction(&snakes, &food, &rules, &mut rng);
    assert_eq!(snake.direction, None);

    let before = snake.body.clone();
    let outcome = snake.plan_move(&snakes, &food, &rules);
    snake.apply(outcome);
    assert_eq!(outcome, MoveOutcome::Stationary);
    assert_eq!(snake.body, before);
}

#[test]
fn arena_boundary_is_exclusive() {
    let arena = Arena::new(10, 1);
    assert!(!arena.contains_point(5.0, 0.0, 0.0));
    assert!(arena.contains_point(5.0 - f64::EPSILON * 8.0, 0.0, 0.0));
    assert!(!arena.is_in_bounds(Vec3::new(0, 0, -5)));
    assert!(arena.is_in_bounds(Vec3::new(0, 0, -4)));
}

#[test]
fn shortest_path_properties() {
    let finder = PathFinder::new(3, 1);
    let start = Vec3::new(-3, 0, 0);
    let end = Vec3::new(3, 0, 0);

    let path = finder.find_shortest(start, end, &HashSet::new()).unwrap();
    assert_eq!(path.len() as i64, start.manhattan(end));

    assert_eq!(finder.find_shortest(start, start, &HashSet::new()), Some(vec![]));

    let walls: HashSet<Vec3> = Direction::ALL.iter().map(|d| end + d.delta()).collect();
    assert_eq!(finder.find_shortest(start, end, &walls), None);
}

#[test]
fn long_autonomous_run_keeps_invariants() {
    let config = GameConfig {
        num_snakes: 6,
        player_autonomous: true,
        ..GameConfig::default()
    };
    let mut engine = GameEngine::with_seed(config, 2024).unwrap();
    let mut state = engine.reset();
    let target_food = engine.config().target_food_count();

    for _ in 0..500 {
        let lengths: Vec<usize> = state.snakes.iter().map(Snake::len).collect();
        let report = engine.step(&mut state, Action::Continue);

        for (id, outcome) in &report.outcomes {
            let snake = &state.snakes[*id];
            match outcome {
                MoveOutcome::Ate(pos) => {
                    assert_eq!(snake.len(), lengths[*id] + 1);
                    assert_eq!(snake.head(), *pos);
                }
                MoveOutcome::Moved(pos) => {
                    assert_eq!(snake.len(), lengths[*id]);
                    assert_eq!(snake.head(), *pos);
                }
                MoveOutcome::Died(_) => assert!(!snake.alive),
                MoveOutcome::Stationary => {}
            }
        }

        for snake in state.live_snakes() {
            // Live bodies are connected, in bounds and never overlap another live snake
            for pair in snake.body.windows(2) {
                assert_eq!(pair[0].manhattan(pair[1]), state.rules.cell_width() as i64);
            }
            assert!(snake.body.iter().all(|p| state.rules.arena.is_in_bounds(*p)));
            for other in state.live_snakes().filter(|o| o.id != snake.id) {
                assert!(snake.body.iter().all(|p| !other.occupies(*p)));
            }
        }

        if state.all_dead() {
            break;
        }
        assert!(state.food.len() <= target_food);
    }
}
