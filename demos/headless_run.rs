use stellar_burst::*;

fn main() {
    let config = SimulationConfig::with_population(1000);
    let mut sim = Simulation::seeded(config, 2024).expect("default config is valid");

    let mut merges = 0;
    let mut energy = 0.0;
    for _ in 0..600 {
        let bursts = sim.tick(1.0 / 60.0);
        merges += bursts.len();
        energy += bursts.iter().map(|b| b.released_energy).sum::<f32>();
    }

    let snapshot = sim.snapshot();
    println!("Merges after 10 s: {merges} (released energy {energy:.3})");
    println!(
        "Living {} / {}, core {} bodies within r = {:.2}",
        snapshot.living_count, snapshot.body_count, snapshot.core_size, snapshot.core_radius
    );
    println!("Heaviest body at {:?}", snapshot.heaviest_body_position);
}
