use wfc2d::error::WfcError;
use wfc2d::grid::GridDims;
use wfc2d::solve::{SolveLimits, SolveResult, Solver};
use wfc2d::tiles::{Ruleset, TileSpec};
use wfc2d::wave::OutputGrid;

fn uniform_rules(count: usize) -> Ruleset {
    Ruleset::load(&vec![TileSpec::uniform(count); count]).unwrap()
}

/// Two tiles that only tolerate each other: forces a checkerboard.
fn checkerboard_rules() -> Ruleset {
    let t0 = TileSpec {
        up: vec![1],
        down: vec![1],
        left: vec![1],
        right: vec![1],
    };
    let t1 = TileSpec {
        up: vec![0],
        down: vec![0],
        left: vec![0],
        right: vec![0],
    };
    Ruleset::load(&[t0, t1]).unwrap()
}

/// Two tiles declaring no permitted neighbors at all: any collapse
/// contradicts its first neighbor.
fn unsatisfiable_rules() -> Ruleset {
    Ruleset::load(&[TileSpec::default(), TileSpec::default()]).unwrap()
}

fn assert_locally_consistent(rules: &Ruleset, grid: &OutputGrid) {
    let dims = GridDims::new(grid.height(), grid.width());
    for index in 0..grid.len() {
        let tile = grid[index].expect("solved grid has no unresolved cells");
        for (neighbor, direction) in dims.neighbors(index) {
            let other = grid[neighbor].expect("solved grid has no unresolved cells");
            assert!(
                rules.permitted_neighbors(tile, direction).contains(other),
                "cell {index} ({tile}) does not permit {other} {direction}"
            );
            assert!(
                rules
                    .permitted_neighbors(other, direction.opposite())
                    .contains(tile),
                "cell {neighbor} ({other}) does not permit {tile} back"
            );
        }
    }
}

#[test]
fn one_by_one_grid_with_self_permitting_tile_solves_to_tile_zero() {
    let rules = uniform_rules(1);
    let mut solver = Solver::new(&rules);
    solver.initialize(1, 1).unwrap();

    let result = solver.run(0, SolveLimits::default()).unwrap();
    match result {
        SolveResult::Solved(grid) => {
            assert_eq!(grid.iter().collect::<Vec<_>>(), vec![Some(0)]);
        }
        other => panic!("expected Solved, got {other:?}"),
    }
}

#[test]
fn checkerboard_solve_is_locally_consistent() {
    let rules = checkerboard_rules();
    let mut solver = Solver::new(&rules);
    solver.initialize(4, 4).unwrap();

    match solver.run(7, SolveLimits::default()).unwrap() {
        SolveResult::Solved(grid) => {
            assert_eq!(grid.len(), 16);
            assert_locally_consistent(&rules, &grid);
            // The two-tile mutual-exclusion ruleset admits exactly the two
            // checkerboard colorings; adjacent cells always differ.
            let dims = GridDims::new(4, 4);
            for index in 0..grid.len() {
                for neighbor in dims.neighbor_indices(index) {
                    assert_ne!(grid[index], grid[neighbor]);
                }
            }
        }
        other => panic!("expected Solved, got {other:?}"),
    }
}

#[test]
fn unsatisfiable_ruleset_reports_contradiction_with_valid_index() {
    let rules = unsatisfiable_rules();
    let mut solver = Solver::new(&rules);
    solver.initialize(2, 2).unwrap();

    match solver.run(0, SolveLimits::default()).unwrap() {
        SolveResult::Contradicted { index } => {
            assert!(index < 4);
            // The driver collapses cell 0 first and its Down neighbor is
            // restricted first, so the offender is deterministic.
            assert_eq!(index, 2);
        }
        other => panic!("expected Contradicted, got {other:?}"),
    }
}

#[test]
fn zero_iteration_budget_exhausts_immediately() {
    let rules = uniform_rules(2);
    let mut solver = Solver::new(&rules);
    solver.initialize(3, 3).unwrap();

    let result = solver
        .run(0, SolveLimits::with_max_iterations(0))
        .unwrap();
    assert_eq!(result, SolveResult::Exhausted { iterations: 0 });
}

#[test]
fn tight_iteration_budget_exhausts_after_counted_collapses() {
    let rules = uniform_rules(2);
    let mut solver = Solver::new(&rules);
    solver.initialize(3, 3).unwrap();

    // Permits-everything rules never cascade, so nine cells need nine
    // collapses; one iteration cannot finish.
    let result = solver.run(0, SolveLimits::with_max_iterations(1)).unwrap();
    assert_eq!(result, SolveResult::Exhausted { iterations: 1 });

    solver.initialize(3, 3).unwrap();
    let result = solver.run(0, SolveLimits::with_max_iterations(9)).unwrap();
    assert!(matches!(result, SolveResult::Solved(_)));
}

#[test]
fn run_before_initialize_is_a_configuration_error() {
    let rules = uniform_rules(2);
    let mut solver = Solver::new(&rules);

    assert!(!solver.is_initialized());
    assert_eq!(solver.size(), 0);
    assert_eq!(
        solver.run(0, SolveLimits::default()),
        Err(WfcError::Uninitialized)
    );
    assert_eq!(solver.at(0), Err(WfcError::Uninitialized));
    assert_eq!(solver.neighbors(0), Err(WfcError::Uninitialized));
}

#[test]
fn zero_sized_grids_are_rejected() {
    let rules = uniform_rules(2);
    let mut solver = Solver::new(&rules);

    assert_eq!(
        solver.initialize(0, 0),
        Err(WfcError::InvalidDimensions { rows: 0, cols: 0 })
    );
    assert_eq!(
        solver.initialize(3, 0),
        Err(WfcError::InvalidDimensions { rows: 3, cols: 0 })
    );
    assert!(!solver.is_initialized());
}

#[test]
fn checked_accessors_report_out_of_range() {
    let rules = uniform_rules(2);
    let mut solver = Solver::new(&rules);
    solver.initialize(2, 3).unwrap();

    assert_eq!(solver.at(5), Ok(None));
    assert_eq!(solver.at(6), Err(WfcError::OutOfRange { index: 6, len: 6 }));
    assert_eq!(
        solver.neighbors(6),
        Err(WfcError::OutOfRange { index: 6, len: 6 })
    );
}

#[test]
fn solver_neighbors_match_grid_order() {
    let rules = uniform_rules(2);
    let mut solver = Solver::new(&rules);
    solver.initialize(3, 3).unwrap();

    assert_eq!(solver.neighbors(4).unwrap(), vec![1, 7, 3, 5]);
    assert_eq!(solver.neighbors(0).unwrap(), vec![3, 1]);
    assert_eq!(solver.neighbors(1).unwrap(), vec![4, 0, 2]);
}

#[test]
fn reinitialize_clears_all_state_from_a_prior_run() {
    let rules = checkerboard_rules();
    let mut solver = Solver::new(&rules);
    solver.initialize(3, 3).unwrap();

    let result = solver.run(3, SolveLimits::default()).unwrap();
    assert!(matches!(result, SolveResult::Solved(_)));

    solver.initialize(3, 3).unwrap();
    let wave = solver.wave().unwrap();
    assert!(wave.contradiction().is_none());
    for index in 0..wave.len() {
        let cell = wave.cell(index);
        assert_eq!(cell.entropy(), rules.tile_count());
        assert!(!cell.is_collapsed());
        assert_eq!(solver.at(index), Ok(None));
    }
}
