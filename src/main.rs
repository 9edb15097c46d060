// Headless demo run: a seeded box of neutral particles under the Langevin
// bath, reporting kinetic energy and temperature as it equilibrates.

use md_sim::commands::SimCommand;
use md_sim::config::SimConfig;
use md_sim::simulation::Simulation;
use md_sim::utils;

fn main() {
    let config = SimConfig::default();
    let mut sim = Simulation::new(config.clone());

    for particle in utils::random_box(40, &config, 42) {
        sim.queue(SimCommand::AddParticle { particle });
    }

    println!("step    KE        T");
    for step in 0..=500 {
        sim.step();
        if step % 50 == 0 {
            let snapshot = sim.snapshot();
            println!(
                "{:>5} {:>9.3} {:>8.3}",
                snapshot.frame, snapshot.kinetic_energy, snapshot.temperature
            );
        }
    }
}
