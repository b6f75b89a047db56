//! Command-line front end: load a calibration file, print the resulting
//! camera rigs and optionally keep watching the file for changes.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use calibscope::{
    init_logging, load_file, FileSource, NumericParsePolicy, Options, OrientationRemap,
    PositionUnits, QuaternionLayout, Result, SceneLoader, Structure,
};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrientationArg {
    ComponentSwap,
    EulerRoundTrip,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitsArg {
    Raw,
    Millimeters,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    Xyzw,
    Wxyz,
}

#[derive(Debug, Parser)]
#[command(name = "calibscope", version, about = "Inspect motion-capture camera calibrations")]
struct Args {
    /// Calibration file (XML `<Cameras>` document).
    calibration: PathBuf,

    /// JSON options file; flags below override its values.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Frustum draw length in scene units.
    #[arg(long, conflicts_with = "slider")]
    frustum_length: Option<f32>,

    /// Normalized slider value in [0, 1], scaled by the maximum frustum length.
    #[arg(long)]
    slider: Option<f32>,

    #[arg(long, value_enum)]
    orientation_remap: Option<OrientationArg>,

    #[arg(long, value_enum)]
    position_units: Option<UnitsArg>,

    #[arg(long, value_enum)]
    quaternion_layout: Option<LayoutArg>,

    /// Skip cameras with malformed numbers instead of failing the load.
    #[arg(long)]
    lenient_numbers: bool,

    /// Keep polling the file and reload on change.
    #[arg(long)]
    watch: bool,

    /// Polling interval for --watch.
    #[arg(long, default_value_t = 500)]
    interval_ms: u64,

    /// Print the scene as JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn options(&self) -> Result<Options> {
        let mut options = match &self.options {
            Some(path) => Options::from_json_file(path)?,
            None => Options::default(),
        };
        if let Some(length) = self.frustum_length {
            options.frustum_length = length;
        }
        if let Some(arg) = self.orientation_remap {
            options.orientation_remap = match arg {
                OrientationArg::ComponentSwap => OrientationRemap::ComponentSwap,
                OrientationArg::EulerRoundTrip => OrientationRemap::EulerRoundTrip,
            };
        }
        if let Some(arg) = self.position_units {
            options.position_units = match arg {
                UnitsArg::Raw => PositionUnits::Raw,
                UnitsArg::Millimeters => PositionUnits::MillimetersToMeters,
            };
        }
        if let Some(arg) = self.quaternion_layout {
            options.quaternion_layout = match arg {
                LayoutArg::Xyzw => QuaternionLayout::Xyzw,
                LayoutArg::Wxyz => QuaternionLayout::Wxyz,
            };
        }
        if self.lenient_numbers {
            options.numeric_parse_policy = NumericParsePolicy::SkipCamera;
        }
        options.validate()?;
        Ok(options)
    }
}

fn print_scene(loader: &SceneLoader<FileSource>, json: bool) -> Result<()> {
    if json {
        println!("{}", loader.snapshot().to_json()?);
        return Ok(());
    }

    println!(
        "{} cameras, frustum length {:.2}",
        loader.camera_count(),
        loader.frustum_length()
    );
    for rig in loader.camera_rigs() {
        let pose = loader.scene().world_transform(&rig.transform());
        let params = rig.params();
        println!(
            "  {:<32} world pos ({:>8.3}, {:>8.3}, {:>8.3})  f {:>6.2} mm  sensor {:.2}x{:.2} mm  vfov {:.1} deg",
            rig.name(),
            pose.translation.x,
            pose.translation.y,
            pose.translation.z,
            params.focal_length,
            params.sensor_size.x,
            params.sensor_size.y,
            params.fov_vertical_degrees(),
        );
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let options = args.options()?;
    let mut loader = load_file(&args.calibration, options)?;

    if let Some(slider) = args.slider {
        loader.on_slider_update(slider);
        loader.tick()?;
    }
    print_scene(&loader, args.json)?;

    if !args.watch {
        return Ok(());
    }

    log::info!("watching {}", args.calibration.display());
    let interval = Duration::from_millis(args.interval_ms);
    loop {
        std::thread::sleep(interval);
        match loader.tick() {
            Ok(report) if report.reloaded.is_some() => print_scene(&loader, args.json)?,
            Ok(_) => {}
            // Keep watching; the next save may fix the file
            Err(e) => log::error!("reload failed: {e}"),
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
