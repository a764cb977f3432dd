use sprintsim::export::{to_csv_string, RunReport};
use sprintsim::prelude::*;

fn seeded(seed: u64) -> SimulationConfig {
    SimulationConfig::builder()
        .seed(seed)
        .iterations(2_000)
        .build()
}

// H0: Different seeds produce identical outputs
// Falsification: Run with seeds 42, 43, 44; compare serialized results
#[test]
fn h0_1_different_seeds_produce_different_outputs() {
    let outputs: Vec<String> = [42, 43, 44]
        .into_iter()
        .map(|seed| {
            let outcome = Simulation::new(seeded(seed)).unwrap().run();
            serde_json::to_string(&outcome.results).unwrap()
        })
        .collect();

    assert_ne!(outputs[0], outputs[1], "Seed 42 and 43 produced identical output");
    assert_ne!(outputs[1], outputs[2], "Seed 43 and 44 produced identical output");
    assert_ne!(outputs[0], outputs[2], "Seed 42 and 44 produced identical output");
}

// H0: Same seed produces different outputs across runs
// Falsification: Run 20 times with seed=42; compare CSV exports byte for byte
#[test]
fn h0_2_same_seed_produces_identical_outputs() {
    let first = to_csv_string(&Simulation::new(seeded(42)).unwrap().run().results);

    for i in 1..20 {
        let csv = to_csv_string(&Simulation::new(seeded(42)).unwrap().run().results);
        assert_eq!(csv, first, "Run {i} produced different output");
    }
}

// H0: Summary and report depend on more than seed and configuration
#[test]
fn h0_3_report_is_a_function_of_seed_and_config() {
    let a = RunReport::from_outcome(&Simulation::new(seeded(7)).unwrap().run());
    let b = RunReport::from_outcome(&Simulation::new(seeded(7)).unwrap().run());

    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

// H0: Thread count affects results
#[test]
fn h0_4_thread_count_invariance() {
    use std::thread;

    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| Simulation::new(seeded(42)).unwrap().run().results))
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (i, r) in results.iter().enumerate().skip(1) {
        assert_eq!(r, &results[0], "Thread {i} diverged");
    }
}

// H0: An unseeded run cannot be replayed
// Falsification: Rerun with the seed the unseeded run reported
#[test]
fn h0_5_entropy_seed_is_replayable() {
    let unseeded = SimulationConfig::builder().iterations(500).build();
    let first = Simulation::new(unseeded.clone()).unwrap().run();

    let replay_config = SimulationConfig {
        seed: Some(first.seed),
        ..unseeded
    };
    let replay = Simulation::new(replay_config).unwrap().run();

    assert_eq!(replay, first);
}

// H0: Injecting a random source gives results unrelated to the seeded run
#[test]
fn h0_6_injected_rng_matches_seeded_run() {
    let simulation = Simulation::new(seeded(1234)).unwrap();
    let mut rng = SimRng::new(1234);

    let injected = simulation.run_with(&mut rng);
    assert_eq!(injected, simulation.run().results);
}

// H0: Configuration round-trip through YAML changes results
#[test]
fn h0_7_yaml_round_trip_preserves_results() {
    let config = seeded(99);
    let yaml = config.to_yaml().unwrap();
    let reloaded = SimulationConfig::from_yaml(&yaml).unwrap();

    assert_eq!(reloaded, config);
    assert_eq!(
        Simulation::new(reloaded).unwrap().run(),
        Simulation::new(config).unwrap().run()
    );
}
