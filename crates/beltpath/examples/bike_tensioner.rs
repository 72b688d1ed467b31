//! Bicycle belt drive with a swing-arm tensioner below the bottom bracket.
//!
//! Layout (mm, N, N·mm)
//! - Bottom bracket (36T) at the origin, rear hub (21T) 440 mm behind it.
//! - A 25 mm idler rides on a 75 mm arm pivoting at (−50, −55) and holds
//!   12 N mean tension; pedal torque is 75 N·m clockwise.
//! - The arm angle is fitted so a stock 111-tooth belt fits exactly.
//!
//! The bracket for the arm angle runs from “idler just touching the straight
//! two-pulley belt” to “idler 10% clear of the chainring”.

use std::f64::consts::PI;

use anyhow::{bail, Result};
use beltpath::prelude::*;
use beltpath::solve::normalize_angle;
use nalgebra::vector;
use tracing_subscriber::EnvFilter;

const BELT_PITCH: f64 = 11.0;
const BELT_TEETH: u32 = 111;
const FRONT_TEETH: u32 = 36;
const REAR_TEETH: u32 = 21;
const CHAINSTAY_LENGTH: f64 = 440.0;
const TENSIONER_RADIUS: f64 = 25.0;
const TENSIONER_ARM: f64 = 75.0;
const HUB: (f64, f64) = (-50.0, -55.0);
const BELT_ACCURACY: f64 = 0.1;
const MAX_ITERATIONS: usize = 20;
const TARGET_TENSION: f64 = 12.0;
const PEDAL_TORQUE: f64 = 75.0 * 1000.0;
/// rad
const ARM_MARGIN: f64 = 0.01;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let target_length = BELT_PITCH * BELT_TEETH as f64;
    let front_radius = teeth_to_radius(FRONT_TEETH, BELT_PITCH);
    let rear = Pulley::toothed(REAR_TEETH, BELT_PITCH, -CHAINSTAY_LENGTH, 0.0, Direction::Cw)?;
    let front = Pulley::toothed(FRONT_TEETH, BELT_PITCH, 0.0, 0.0, Direction::Cw)?;
    let idler = Pulley::new(TENSIONER_RADIUS, 0.0, -200.0, Direction::Ccw)?;

    // Upper arm limit: idler tangent to the lower span of the bare two-pulley belt.
    let mut bare = BeltPath::closed(vec![rear, front])?;
    let lower = bare.geometry()?.segments[1];
    let to_hub = vector![HUB.0, HUB.1] - lower.start;
    let offset = to_hub.norm() * (to_hub.y.atan2(to_hub.x) - lower.direction_angle).sin();
    let max_angle =
        normalize_angle(lower.direction_angle + ((TENSIONER_RADIUS - offset) / TENSIONER_ARM).asin());

    // Lower arm limit: idler centre 1.1 × (r_front + r_idler) from the chainring.
    let a = HUB.0.hypot(HUB.1);
    let b = 1.1 * (front_radius + TENSIONER_RADIUS);
    let c = TENSIONER_ARM;
    let cos_b = (a * a + c * c - b * b) / (2.0 * a * c);
    if cos_b.abs() > 1.0 {
        bail!("arm cannot reach the chainring clearance limit");
    }
    let min_angle = normalize_angle(HUB.1.atan2(HUB.0) - (PI - cos_b.acos()));

    // Stay just inside the tangency limit where the idler wrap degenerates.
    let bounds = (min_angle, max_angle - ARM_MARGIN);
    tracing::info!(
        min_deg = min_angle.to_degrees(),
        max_deg = max_angle.to_degrees(),
        "arm bracket"
    );

    let mut belt = BeltPath::closed(vec![rear, front, idler])?;
    let arm = SwingArm {
        pivot: vector![HUB.0, HUB.1],
        length: TENSIONER_ARM,
    };
    let fit = fit_tensioner(
        &mut belt,
        2,
        &arm,
        bounds,
        target_length,
        &FitCfg {
            accuracy: BELT_ACCURACY,
            max_iterations: MAX_ITERATIONS,
        },
    )?;

    let forces = belt.loaded_forces(&LoadCase {
        torques: vec![0.0, PEDAL_TORQUE, 0.1],
        unknown_torque: 0,
        baseline: TensionBaseline::Tensioner {
            pulley: 2,
            tension: TARGET_TENSION,
        },
    })?;

    println!(
        "arm angle: {:.2}° after {} iterations",
        fit.angle.to_degrees(),
        fit.iterations
    );
    println!("belt length: {:.3} mm (target {target_length} mm)", fit.length);
    println!("top span tension: {:.2} N", forces.span_tensions[0]);
    println!("rear reaction torque: {:.1} N·mm", forces.torques[0]);
    for r in &forces.reactions {
        println!(
            "pulley {}: {:.2} N @ {:.1}°",
            r.pulley,
            r.magnitude,
            r.angle.to_degrees()
        );
    }
    Ok(())
}
