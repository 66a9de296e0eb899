//! minitower — smallest runnable demo of the mailbot fleet simulator.
//!
//! Three robots serve a 10-floor building: two careful fragile-aware units
//! and one fragile-aware unit running with caution off (it refuses fragile
//! mail outright).  The mail comes from an embedded manifest so the run is
//! fully reproducible.

use std::io::Cursor;

use anyhow::Result;

use mb_core::{Building, Floor, Tick};
use mb_robot::{Robot, TrafficBoard};
use mb_sim::{load_manifest_reader, DeliveryReport, RobotMode, SimBuilder, SimConfig, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const FLOOR_COUNT: u32 = 10;
const TICK_CAP:    u64 = 500;

// ── Mail manifest ─────────────────────────────────────────────────────────────

// arrival_tick,destination_floor,weight_grams,fragile
const MANIFEST_CSV: &str = "\
arrival_tick,destination_floor,weight_grams,fragile\n\
0,8,450,false\n\
0,2,300,false\n\
1,5,1200,false\n\
2,9,700,true\n\
3,4,250,false\n\
6,7,980,true\n\
8,3,150,false\n\
10,6,620,false\n\
12,9,400,true\n\
15,1,820,false\n\
";

// ── Progress observer ─────────────────────────────────────────────────────────

/// Prints a line whenever the number of loaded robots changes.
#[derive(Default)]
struct LoadPrinter {
    last_loaded: usize,
}

impl SimObserver for LoadPrinter {
    fn on_tick_end(&mut self, tick: Tick, _board: &TrafficBoard, robots: &[Robot]) {
        let loaded = robots.iter().filter(|r| !r.is_empty()).count();
        if loaded != self.last_loaded {
            println!("{tick}: {loaded} robot(s) carrying mail");
            self.last_loaded = loaded;
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== minitower — mailbot fleet demo ===");
    println!("Floors: {FLOOR_COUNT}  |  Robots: 3  |  Tick cap: {TICK_CAP}");
    println!();

    // 1. Building and fleet.
    let building = Building::new(FLOOR_COUNT, Floor::GROUND);
    let fleet = vec![
        RobotMode::fragile_aware(),
        RobotMode::fragile_aware(),
        RobotMode::careless(),
    ];

    // 2. Load the embedded manifest.
    let mail = load_manifest_reader(Cursor::new(MANIFEST_CSV), &building)?;
    println!("Manifest: {} items", mail.len());

    // 3. Build the sim.
    let config = SimConfig {
        building,
        fleet,
        total_ticks: TICK_CAP,
    };
    let mut sim = SimBuilder::new(config, DeliveryReport::new())
        .arrivals(mail)
        .build()?;

    // 4. Run until every item is handled.
    let mut printer = LoadPrinter::default();
    let end = sim.run_until_idle(TICK_CAP, &mut printer)?;
    println!();
    println!("Drained at {end}");
    println!();

    // 5. Report.
    println!("{}", sim.sink);
    println!();

    // 6. Final fleet table.
    println!("{:<8} {:<8} {:<12}", "Robot", "Floor", "State");
    println!("{}", "-".repeat(30));
    for robot in &sim.robots {
        println!(
            "{:<8} {:<8} {:<12}",
            robot.id().0,
            sim.board.floor_of(robot.id()).0,
            format!("{:?}", robot.state()),
        );
    }

    Ok(())
}
