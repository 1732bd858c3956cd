use lithos_prior::{Class, DepthGrid, PriorConfig, ResistivityPrior, Section, WaterTableModel};
use lithos_realize::{RealizeConfig, generate_ensemble};

fn glacial_prior() -> PriorConfig {
    PriorConfig::new(
        vec![
            Class::new(1, "Clay", 1.0, 6.0, ResistivityPrior::new(20.0, 0.1))
                .with_unsaturated(ResistivityPrior::new(45.0, 0.15)),
            Class::new(2, "Sand", 2.0, 10.0, ResistivityPrior::new(150.0, 0.15))
                .with_unsaturated(ResistivityPrior::new(600.0, 0.2)),
            Class::new(3, "Till", 3.0, 15.0, ResistivityPrior::new(60.0, 0.1))
                .with_unsaturated(ResistivityPrior::new(120.0, 0.1)),
        ],
        vec![
            Section::new(vec![1, 2], vec![1.0])
                .with_frequency(0.8)
                .with_thickness(4.0, 15.0)
                .with_layers(1, 3)
                .with_repeat(false),
            Section::new(vec![2, 3], vec![0.4, 0.6])
                .with_thickness(10.0, 30.0)
                .with_layers(1, 3),
            Section::new(vec![3], vec![1.0]).with_min_depth(10.0),
        ],
        Some(WaterTableModel::Uniform { min: 2.0, max: 12.0 }),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// 1. sequential and parallel agree
// ---------------------------------------------------------------------------
#[test]
fn sequential_and_parallel_agree() {
    let prior = glacial_prior();
    let grid = DepthGrid::new(80.0, 1.0).unwrap();
    let seq = generate_ensemble(
        &prior,
        &grid,
        &RealizeConfig::new(200).with_seed(5).with_parallel(false),
    )
    .unwrap();
    let par = generate_ensemble(
        &prior,
        &grid,
        &RealizeConfig::new(200).with_seed(5).with_parallel(true),
    )
    .unwrap();

    assert_eq!(seq.ensemble(), par.ensemble());
    assert_eq!(seq.report().n_exhausted(), par.report().n_exhausted());
    assert_eq!(seq.report().average_tries(), par.report().average_tries());
    assert_eq!(seq.report().sections(), par.report().sections());
}

// ---------------------------------------------------------------------------
// 2. reproducibility
// ---------------------------------------------------------------------------
#[test]
fn same_seed_same_ensemble() {
    let prior = glacial_prior();
    let grid = DepthGrid::new(80.0, 1.0).unwrap();
    let config = RealizeConfig::new(50).with_seed(77);
    let a = generate_ensemble(&prior, &grid, &config).unwrap();
    let b = generate_ensemble(&prior, &grid, &config).unwrap();
    assert_eq!(a.ensemble(), b.ensemble());

    let c = generate_ensemble(&prior, &grid, &RealizeConfig::new(50).with_seed(78)).unwrap();
    assert_ne!(a.ensemble(), c.ensemble());
}

// ---------------------------------------------------------------------------
// 3. ensemble invariants
// ---------------------------------------------------------------------------
#[test]
fn ensemble_invariants_hold() {
    let prior = glacial_prior();
    let grid = DepthGrid::new(80.0, 0.5).unwrap();
    let run = generate_ensemble(&prior, &grid, &RealizeConfig::new(300).with_seed(3)).unwrap();
    let e = run.ensemble();

    assert_eq!(e.n_reals(), 300);
    assert_eq!(e.n_depths(), grid.len());
    assert_eq!(e.lithology().len(), 300 * grid.len());
    assert!(e.lithology().iter().all(|&c| (1..=3).contains(&c)));
    assert!(e.resistivity().iter().all(|&v| v > 0.0 && v.is_finite()));
    assert!(e.water_table().iter().all(|&o| (2.0..=12.0).contains(&o)));

    let total: f64 = e.class_fractions().values().sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!(run.report().average_tries() >= 1.0);
}

// ---------------------------------------------------------------------------
// 4. frequency 0 over 1000 realizations
// ---------------------------------------------------------------------------
#[test]
fn inactive_section_reports_no_layers() {
    let prior = PriorConfig::new(
        vec![
            Class::new(1, "Clay", 1.0, 6.0, ResistivityPrior::new(20.0, 0.1)),
            Class::new(2, "Sand", 2.0, 10.0, ResistivityPrior::new(150.0, 0.1)),
        ],
        vec![
            Section::new(vec![1], vec![1.0])
                .with_frequency(0.0)
                .with_thickness(2.0, 5.0)
                .with_layers(1, 2),
            Section::new(vec![2], vec![1.0]),
        ],
        None,
    )
    .unwrap();
    let grid = DepthGrid::new(20.0, 1.0).unwrap();
    let run = generate_ensemble(&prior, &grid, &RealizeConfig::new(1000).with_seed(8)).unwrap();

    assert_eq!(run.report().sections()[0].n_active, 0);
    assert!(run.ensemble().lithology().iter().all(|&c| c == 2));
    assert!(!run.report().constraints_unsatisfied());
    assert!(!run.report().layer_counts_skewed());
}

// ---------------------------------------------------------------------------
// 5. unreachable constraints flag every realization
// ---------------------------------------------------------------------------
#[test]
fn unreachable_min_depth_flags_run() {
    let prior = PriorConfig::new(
        vec![
            Class::new(1, "Clay", 1.0, 6.0, ResistivityPrior::new(20.0, 0.1)),
            Class::new(2, "Sand", 2.0, 10.0, ResistivityPrior::new(150.0, 0.1)),
        ],
        vec![
            Section::new(vec![1], vec![1.0])
                .with_thickness(2.0, 5.0)
                .with_layers(1, 1),
            Section::new(vec![2], vec![1.0]).with_min_depth(50.0),
        ],
        None,
    )
    .unwrap();
    let grid = DepthGrid::new(20.0, 1.0).unwrap();
    let run = generate_ensemble(&prior, &grid, &RealizeConfig::new(8).with_seed(4)).unwrap();

    assert!(run.report().constraints_unsatisfied());
    assert_eq!(run.report().n_exhausted(), 8);
    assert_eq!(run.report().average_tries(), 1000.0);
}

// ---------------------------------------------------------------------------
// 6. JSON report
// ---------------------------------------------------------------------------
#[test]
fn report_round_trips_through_json_value() {
    let prior = glacial_prior();
    let grid = DepthGrid::new(40.0, 1.0).unwrap();
    let run = generate_ensemble(&prior, &grid, &RealizeConfig::new(100).with_seed(1)).unwrap();
    let json = serde_json::to_value(run.report()).unwrap();

    assert_eq!(json["n_reals"], 100);
    assert_eq!(json["sections"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["sections"][1]["min_layers"], 1);
    assert_eq!(json["sections"][1]["histogram"].as_array().map(Vec::len), Some(3));
}
