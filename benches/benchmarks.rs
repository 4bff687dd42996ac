use pomcp::agent::Agent;
use pomcp::belief::reinvigorate;
use pomcp::belief::Belief;
use pomcp::belief::Particles;
use pomcp::planner::Pomcp;
use pomcp::planner::Settings;
use pomcp::tiger::Den;
use pomcp::tiger::Tiger;
use pomcp::Arbitrary;
use rand::rngs::SmallRng;
use rand::SeedableRng;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        rebuilding_particle_histogram,
        reinvigorating_collapsed_belief,
        planning_tiger_step,
        rolling_battleship_fleet,
}

fn rebuilding_particle_histogram(c: &mut criterion::Criterion) {
    let particles = Particles::from((0..10_000).map(|i| Tiger(i as u8 % 4)).collect::<Vec<_>>());
    c.bench_function("rebuild a 10k-particle histogram", |b| {
        b.iter(|| {
            let mut particles = particles.clone();
            particles.witness(Tiger(0));
            particles.histogram().len()
        })
    });
}

fn reinvigorating_collapsed_belief(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(0);
    let particles = Particles::from(vec![Tiger(0)]);
    c.bench_function("reinvigorate 1 particle up to 10k", |b| {
        b.iter(|| reinvigorate(&particles, 10_000, None, rng).unwrap().len())
    });
}

fn planning_tiger_step(c: &mut criterion::Criterion) {
    let den = Den::new(2, 0.1);
    let prior = (0..1_000).map(|i| Tiger(i as u8 % 2)).collect::<Vec<_>>();
    let agent = Agent::new(den.clone(), Belief::from(Particles::from(prior)));
    let settings = Settings {
        max_depth: 5,
        num_sims: Some(1_024),
        discount: 0.95,
        seed: Some(0),
        ..Settings::default()
    };
    c.bench_function("plan a tiger step at 1024 simulations", |b| {
        b.iter(|| {
            let mut planner = Pomcp::new(settings.clone(), den.clone());
            planner.plan(&agent).unwrap()
        })
    });
}

fn rolling_battleship_fleet(c: &mut criterion::Criterion) {
    c.bench_function("roll a legal battleship fleet", |b| {
        b.iter(|| pomcp::battleship::Fleet::random())
    });
}
