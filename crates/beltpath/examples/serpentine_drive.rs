//! Two reference drives on an 11 mm pitch belt.
//!
//! - A three-pulley drive with a spring tensioner holding 12 N.
//! - An eight-pulley serpentine with a 100 N minimum span tension.
//!
//! Units: mm, N, N·mm. Run with `RUST_LOG=beltpath=debug` to see solver events.

use anyhow::Result;
use beltpath::prelude::*;
use tracing_subscriber::EnvFilter;

const BELT_PITCH: f64 = 11.0;

fn toothed(teeth: u32, x: f64, y: f64, d: Direction) -> Result<Pulley> {
    Ok(Pulley::toothed(teeth, BELT_PITCH, x, y, d)?)
}

fn report(name: &str, belt: &mut BeltPath, forces: &LoadedForces) -> Result<()> {
    let g = belt.geometry()?;
    println!("{name}: length={:.3} mm", g.total_length);
    for (arc, reaction) in g.arcs.iter().zip(&forces.reactions) {
        println!(
            "  pulley {} wrap={:.2}° arc={:.3} reaction={:.2} N @ {:.1}°",
            arc.pulley,
            arc.wrap_angle.to_degrees(),
            arc.arc_length,
            reaction.magnitude,
            reaction.angle.to_degrees()
        );
    }
    for (k, t) in forces.span_tensions.iter().enumerate() {
        println!("  span {k} tension={t:.2} N");
    }
    let count = g.path.len();
    for e in &g.path {
        let kind = match e.geometry {
            PathGeometry::Arc(_) => "arc",
            PathGeometry::Segment(_) => "segment",
        };
        println!(
            "  #{:<2} {kind:<7} hue={:.3} len={:.3}",
            e.color_index,
            hue_for(e.color_index, count),
            e.length()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let mut drive = BeltPath::closed(vec![
        toothed(19, 0.0, 0.0, Direction::Cw)?,
        toothed(36, 440.0, 0.0, Direction::Cw)?,
        Pulley::new(25.0, 340.0, -25.0, Direction::Ccw)?,
    ])?
    .with_cfg(SolverCfg::with_clearance());
    let case = LoadCase {
        torques: vec![0.0, 75_000.0, 10.0],
        unknown_torque: 0,
        baseline: TensionBaseline::Tensioner {
            pulley: 2,
            tension: 12.0,
        },
    };
    let forces = drive.loaded_forces(&case)?;
    report("three-pulley drive", &mut drive, &forces)?;

    let mut serpentine = BeltPath::closed(vec![
        toothed(19, 0.0, 0.0, Direction::Cw)?,
        toothed(36, 440.0, 0.0, Direction::Ccw)?,
        toothed(18, 440.0, -440.0, Direction::Cw)?,
        toothed(11, 0.0, -440.0, Direction::Cw)?,
        toothed(18, 220.0, -220.0, Direction::Ccw)?,
        toothed(24, 200.0, 50.0, Direction::Cw)?,
        toothed(18, 100.0, -300.0, Direction::Ccw)?,
        toothed(36, -40.0, -620.0, Direction::Cw)?,
    ])?
    .with_cfg(SolverCfg::with_clearance());
    let forces = serpentine.loaded_forces(&LoadCase::uniform(8, 100.0))?;
    report("serpentine", &mut serpentine, &forces)?;

    let g = serpentine.geometry()?;
    let seg = &g.segments[0];
    println!(
        "serpentine span 0: {:.3} mm from ({:.2}, {:.2}) to ({:.2}, {:.2}), {:?}",
        seg.length, seg.start.x, seg.start.y, seg.end.x, seg.end.y, seg.tangent_kind
    );
    Ok(())
}
