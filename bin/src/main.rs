#[macro_use]
extern crate log;

use blockage::*;
use clap::Parser;
use cosbos_core::app::*;
use cosbos_core::array_file::*;
use cosbos_core::cosbos::Float;
use cosbos_core::error::*;
use cosbos_core::fileutil::*;
use cosbos_core::float_file::*;
use cosbos_core::geometry::Point3f;
use cosbos_core::grid::VoxelGrid;
use cosbos_core::parallel::Parallelism;
use photometry::*;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize `env_logger`.
    env_logger::init();

    let options = Options::parse();
    let parallelism = options.parallelism();

    match run(&options.command, &parallelism) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Command, parallelism: &Parallelism) -> Result<()> {
    match command {
        Command::Hash { geometry, sigma, out } => {
            let room = load_room(geometry)?;
            let hash = GaussianHash::build(&room, *sigma, parallelism)?;
            write_array(out, &hash.to_array())
        }

        Command::Volume {
            geometry,
            hash,
            sigma,
            observation,
            out,
        } => {
            let room = load_room(geometry)?;
            let observation = load_observation(observation, &room)?;
            let volume = match (hash, sigma) {
                (Some(hash), _) => {
                    info!("Using hash tensor {}", absolute_path(hash)?);
                    let hash = GaussianHash::from_array(&room, read_array(hash)?)?;
                    reconstruct_volume(&hash, &observation, parallelism)?
                }
                (None, Some(sigma)) => reconstruct_volume_streamed(&room, *sigma, &observation, parallelism)?,
                (None, None) => {
                    return Err(Error::InvalidArgument(
                        "volume needs either --hash or --sigma".to_string(),
                    ))
                }
            };
            write_array(out, &volume.to_array())
        }

        Command::Reflection {
            light,
            sensor,
            dim,
            lambertian,
            out,
        } => {
            let light = point_from_args(light, "--light")?;
            let sensor = point_from_args(sensor, "--sensor")?;
            let dim = <[usize; 2]>::try_from(dim.as_slice()).map_err(|_| {
                Error::InvalidArgument(format!("--dim needs 2 extents, got {}", dim.len()))
            })?;
            let model = if *lambertian {
                ReflectionModel::Lambertian
            } else {
                ReflectionModel::NonLambertian
            };
            let kernel = reflection_kernel(&light, &sensor, dim, model, &IntensityProfile::default())?;
            write_array(out, &kernel.to_array())
        }
    }
}

/// Reads the sensor and fixture coordinate files and builds the room.
fn load_room(geometry: &GeometryArgs) -> Result<Room> {
    info!("Loading sensors from {}", absolute_path(&geometry.sensors)?);
    let sensors = read_points(&geometry.sensors)?;
    info!("Loading fixtures from {}", absolute_path(&geometry.fixtures)?);
    let fixtures = read_points(&geometry.fixtures)?;
    let grid = VoxelGrid::try_from(geometry.dim.as_slice())?;
    Room::new(sensors, fixtures, grid)
}

/// Reads an observation matrix from an array file or a column-major text
/// float file.
fn load_observation(path: &str, room: &Room) -> Result<ObservationMatrix> {
    info!("Loading observation matrix from {}", absolute_path(path)?);
    if is_array_file(path) {
        ObservationMatrix::from_array(*room.paths(), read_array(path)?)
    } else {
        ObservationMatrix::new(*room.paths(), read_float_file(path)?)
    }
}

/// Converts an `x y z` command line triple into a point.
fn point_from_args(values: &[Float], name: &str) -> Result<Point3f> {
    match points_from_floats(values, name)?.as_slice() {
        [p] => Ok(*p),
        _ => Err(Error::InvalidArgument(format!(
            "{name} needs 3 coordinates, got {}",
            values.len()
        ))),
    }
}
