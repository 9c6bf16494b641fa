//! End-to-end scenarios across the environment, pathfinder, and agent

use gridpilot::{
    Action, Coord, Grid, HybridAgent, MazeEnv,
    env::{GOAL_REWARD, STEP_PENALTY},
    pathfinder,
};

#[test]
fn single_move_into_the_goal_pays_the_goal_reward() {
    let grid = Grid::open(5, 5);
    let mut env = MazeEnv::new(&grid, Coord::new(0, 0), Coord::new(0, 1), 600);
    env.reset();

    let transition = env.step(Action::Right);
    assert_eq!(transition.state, Coord::new(0, 1));
    assert_eq!(transition.reward, 100.0);
    assert!(transition.done);
}

#[test]
fn two_step_budget_terminates_on_the_second_step() {
    let grid = Grid::open(5, 5);
    let mut env = MazeEnv::new(&grid, Coord::new(0, 0), Coord::new(4, 4), 2);
    env.reset();

    let first = env.step(Action::Down);
    assert!(!first.done);
    let second = env.step(Action::Down);
    assert!(second.done);
}

#[test]
fn astar_crosses_an_open_grid_on_a_five_cell_path() {
    let grid = Grid::open(5, 5);
    let path = pathfinder::find_path(&grid, Coord::new(0, 0), Coord::new(2, 2)).unwrap();

    assert_eq!(path.len(), 5);
    assert_eq!(path[0], Coord::new(0, 0));
    assert_eq!(*path.last().unwrap(), Coord::new(2, 2));
}

#[test]
fn heuristic_agent_walks_a_shortest_route_to_the_goal() {
    let grid = Grid::open(5, 5);
    let mut env = MazeEnv::new(&grid, Coord::new(0, 0), Coord::new(4, 4), 600);
    let mut agent = HybridAgent::new(0.1, 0.99, 1.0, 1.0).with_seed(42);

    let mut state = env.reset();
    let mut total_reward = 0.0;
    let mut steps = 0;
    loop {
        let (action, _) = agent.decide(state, &env);
        let transition = env.step(action);
        agent.update(state, action, transition.reward, transition.state);
        total_reward += transition.reward;
        steps += 1;
        state = transition.state;
        if transition.done {
            break;
        }
    }

    assert_eq!(state, Coord::new(4, 4));
    assert_eq!(steps, 8);
    assert_eq!(total_reward, 7.0 * STEP_PENALTY + GOAL_REWARD);
}

#[test]
fn learned_table_solves_the_maze_greedily() {
    // walled corridor: the only route is along the top row and down the
    // right column
    let grid = Grid::parse(&["....", "###.", "....", ".###"]);
    let goal = Coord::new(2, 0);
    let mut env = MazeEnv::new(&grid, Coord::new(0, 0), goal, 200);
    let mut agent = HybridAgent::new(0.5, 0.95, 1.0, 1.0).with_seed(3);

    // learn with pure A*-guided exploration
    for _ in 0..30 {
        let mut state = env.reset();
        loop {
            let (action, _) = agent.decide(state, &env);
            let transition = env.step(action);
            agent.update(state, action, transition.reward, transition.state);
            state = transition.state;
            if transition.done {
                break;
            }
        }
    }

    // replay greedily
    agent.set_epsilon(0.0);
    agent.set_heuristic_rate(0.0);
    let mut state = env.reset();
    for _ in 0..20 {
        let (action, source) = agent.decide(state, &env);
        assert_eq!(source, gridpilot::ActionSource::Greedy);
        let transition = env.step(action);
        state = transition.state;
        if transition.done {
            break;
        }
    }
    assert_eq!(state, goal);
}
