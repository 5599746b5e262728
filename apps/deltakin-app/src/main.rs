//! Rotary delta kinematics CLI.
//!
//! Provides four modes of operation:
//! - `info`: Calibrate and print the geometry and operating envelope
//! - `forward`: Solve one forward kinematics call (angles → position)
//! - `inverse`: Solve one inverse kinematics call (position → angles)
//! - `demo`: Run a canned sequence of conversions, printing state after each

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use deltakin_core::{Geometry, JointAngles3, KinError, Pose3};
use deltakin_ik::Engine;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Rotary delta robot kinematics engine.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    geometry: GeometryArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Physical dimensions, in millimeters (steps-per-turn excepted).
#[derive(Args)]
struct GeometryArgs {
    /// Base plate to floor distance.
    #[arg(long, default_value_t = 500.0)]
    base_to_floor: f64,

    /// Base plate radius.
    #[arg(long, default_value_t = 63.0)]
    base_radius: f64,

    /// Driven shoulder arm length.
    #[arg(long, default_value_t = 130.0)]
    shoulder_length: f64,

    /// Passive forearm length.
    #[arg(long, default_value_t = 400.0)]
    forearm_length: f64,

    /// End-effector plate radius.
    #[arg(long, default_value_t = 35.0)]
    effector_radius: f64,

    /// Motor steps per shoulder revolution.
    #[arg(long, default_value_t = 3200.0)]
    steps_per_turn: f64,
}

impl GeometryArgs {
    fn build(&self) -> Geometry {
        Geometry::new(
            self.base_to_floor,
            self.base_radius,
            self.shoulder_length,
            self.forearm_length,
            self.effector_radius,
            self.steps_per_turn,
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Calibrate and print the operating envelope.
    Info,

    /// Forward kinematics: three shoulder angles in degrees.
    #[command(arg_required_else_help = true)]
    Forward {
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
        #[arg(allow_negative_numbers = true)]
        c: f64,
    },

    /// Inverse kinematics: Cartesian target in millimeters.
    #[command(arg_required_else_help = true)]
    Inverse {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(allow_negative_numbers = true)]
        z: f64,
    },

    /// Run the canned demonstration sequence.
    Demo,
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn run_info(engine: &Engine) {
    let geom = engine.geometry();
    let env = engine.envelope();

    println!("————————————— Delta Robot ——————————————");
    println!("{:>22}: {:>10}", "base to floor", geom.base_to_floor);
    println!("{:>22}: {:>10}", "base radius", geom.base_radius);
    println!("{:>22}: {:>10}", "shoulder length", geom.shoulder_length);
    println!("{:>22}: {:>10}", "forearm length", geom.forearm_length);
    println!("{:>22}: {:>10}", "effector radius", geom.effector_radius);
    println!("{:>22}: {:>10}", "steps per turn", geom.steps_per_turn);
    println!("————————————————————————————————————————");
    println!("Home       = [{}, {}, {}]", env.home.x, env.home.y, env.home.z);
    println!(
        "Center     = [{}, {}, {}]",
        env.center.x, env.center.y, env.center.z
    );
    println!("Resolution = ± {} mm", env.resolution);
    println!();
    println!("X = [{:>10}, {:>10}] mm", env.x_limit.min, env.x_limit.max);
    println!("Y = [{:>10}, {:>10}] mm", env.y_limit.min, env.y_limit.max);
    println!("Z = [{:>10}, {:>10}] mm", env.z_limit.min, env.z_limit.max);
    println!();
    println!("A = [{:>10}, {:>10}] °", env.a_limit.min, env.a_limit.max);
    println!("B = [{:>10}, {:>10}] °", env.b_limit.min, env.b_limit.max);
    println!("C = [{:>10}, {:>10}] °", env.c_limit.min, env.c_limit.max);
}

fn print_state(engine: &Engine, result: Result<(), KinError>) {
    match result {
        Ok(()) => {
            let p = engine.pose();
            let t = engine.angles();
            println!(
                "xyz = [{:10.3}, {:10.3}, {:10.3}]   abc = [{:8.3}, {:8.3}, {:8.3}]",
                p.x, p.y, p.z, t.a, t.b, t.c
            );
            if engine.increment_mode() {
                let dp = engine.delta_pose();
                let dt = engine.delta_angles();
                println!(
                    "Δxyz = [{:9.3}, {:10.3}, {:10.3}]  Δabc = [{:8.3}, {:8.3}, {:8.3}]",
                    dp.x, dp.y, dp.z, dt.a, dt.b, dt.c
                );
            }
        }
        Err(err) => println!("error: {err}"),
    }
}

fn run_demo(engine: &mut Engine) {
    println!("forward(5, 10, 15)");
    let r = engine.forward(JointAngles3::new(5.0, 10.0, 15.0));
    print_state(engine, r.map(|_| ()));

    println!("inverse(current position)");
    let r = engine.inverse_current();
    print_state(engine, r.map(|_| ()));

    println!("forward(100, 45, 45)");
    let r = engine.forward(JointAngles3::new(100.0, 45.0, 45.0));
    print_state(engine, r.map(|_| ()));

    println!("inverse(30, 30, 30)");
    let r = engine.inverse(Pose3::new(30.0, 30.0, 30.0));
    print_state(engine, r.map(|_| ()));

    for t in [100.0, 130.0, 200.0] {
        println!("forward({t}, {t}, {t})");
        let r = engine.forward(JointAngles3::splat(t));
        print_state(engine, r.map(|_| ()));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let geometry = cli.geometry.build();
    if let Err(err) = geometry.validate() {
        eprintln!("invalid geometry: {err}");
        std::process::exit(2);
    }

    let mut engine = Engine::new(geometry);

    match cli.command {
        Commands::Info => run_info(&engine),
        Commands::Forward { a, b, c } => {
            let r = engine.forward(JointAngles3::new(a, b, c));
            print_state(&engine, r.map(|_| ()));
        }
        Commands::Inverse { x, y, z } => {
            let r = engine.inverse(Pose3::new(x, y, z));
            print_state(&engine, r.map(|_| ()));
        }
        Commands::Demo => run_demo(&mut engine),
    }
}
