//! Application related stuff

use crate::cosbos::Float;
use crate::parallel::{Parallelism, DEFAULT_BLOCK_SIZE};
use clap::{Parser, Subcommand};

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Color-sensor-based occupancy sensing", long_about = None)]
pub struct Options {
    /// Number of threads to use.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        global = true,
        help = "Use specified number of threads."
    )]
    n_threads: usize,

    /// Voxels per work item.
    #[arg(
        long = "blocksize",
        short = 'b',
        value_name = "NUM",
        default_value_t = DEFAULT_BLOCK_SIZE,
        global = true,
        help = "Number of voxels processed per work item."
    )]
    pub block_size: usize,

    /// The command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Room geometry shared by the hashing and reconstruction commands.
#[derive(clap::Args, Clone, Debug)]
pub struct GeometryArgs {
    /// Sensor coordinates file.
    #[arg(long, value_name = "FILE", help = "Text file with one `x y z` sensor position per row.")]
    pub sensors: String,

    /// Fixture coordinates file.
    #[arg(long, value_name = "FILE", help = "Text file with one `x y z` fixture position per row.")]
    pub fixtures: String,

    /// Room dimension.
    #[arg(long, value_name = "NUM", num_args = 3, required = true, help = "Room dimension in voxels (nx ny nz).")]
    pub dim: Vec<usize>,
}

/// Commands.
#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Precompute the Gaussian hash tensor for a room.
    Hash {
        #[command(flatten)]
        geometry: GeometryArgs,

        /// Spread of the Gaussian falloff.
        #[arg(long, value_name = "FLOAT", help = "Standard deviation of the Gaussian kernel.")]
        sigma: Float,

        /// Output path.
        #[arg(long = "out", short = 'o', value_name = "FILE", help = "Write the hash tensor to the given file.")]
        out: String,
    },

    /// Reconstruct an attenuation volume from an observation matrix.
    Volume {
        #[command(flatten)]
        geometry: GeometryArgs,

        /// Precomputed hash tensor.
        #[arg(long, value_name = "FILE", conflicts_with = "sigma", help = "Hash tensor written by `hash`.")]
        hash: Option<String>,

        /// Spread of the Gaussian falloff for streamed reconstruction.
        #[arg(
            long,
            value_name = "FLOAT",
            required_unless_present = "hash",
            help = "Compute Gaussian weights on the fly with this standard deviation."
        )]
        sigma: Option<Float>,

        /// Observation matrix.
        #[arg(
            long,
            value_name = "FILE",
            help = "Observation matrix (4N x 3M); an array file or a column-major text float file."
        )]
        observation: String,

        /// Output path.
        #[arg(long = "out", short = 'o', value_name = "FILE", help = "Write the volume to the given file.")]
        out: String,
    },

    /// Compute the floor reflection kernel of one sensor-fixture pair.
    Reflection {
        /// Fixture position.
        #[arg(long, value_name = "FLOAT", num_args = 3, required = true, allow_negative_numbers = true)]
        light: Vec<Float>,

        /// Sensor position.
        #[arg(long, value_name = "FLOAT", num_args = 3, required = true, allow_negative_numbers = true)]
        sensor: Vec<Float>,

        /// Floor dimension.
        #[arg(long, value_name = "NUM", num_args = 2, required = true, help = "Floor dimension (nx ny).")]
        dim: Vec<usize>,

        /// Use the Lambertian reflection model.
        #[arg(long, help = "Apply the Lambertian correction.")]
        lambertian: bool,

        /// Output path.
        #[arg(long = "out", short = 'o', value_name = "FILE", help = "Write the kernel to the given file.")]
        out: String,
    },
}

impl Options {
    /// Returns the execution configuration.
    pub fn parallelism(&self) -> Parallelism {
        Parallelism::new(self.n_threads, self.block_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hash_command() {
        let options = Options::try_parse_from([
            "cosbos", "-t", "2", "hash", "--sensors", "s.txt", "--fixtures", "l.txt", "--dim", "3", "4", "5",
            "--sigma", "1.5", "-o", "h.bin",
        ])
        .unwrap();
        assert_eq!(options.block_size, DEFAULT_BLOCK_SIZE);
        match options.command {
            Command::Hash { geometry, sigma, out } => {
                assert_eq!(geometry.dim, vec![3, 4, 5]);
                assert_eq!(sigma, 1.5);
                assert_eq!(out, "h.bin");
            }
            _ => panic!("expected hash command"),
        }
    }

    #[test]
    fn volume_needs_hash_or_sigma() {
        let missing = Options::try_parse_from([
            "cosbos", "volume", "--sensors", "s.txt", "--fixtures", "l.txt", "--dim", "3", "3", "3",
            "--observation", "e.txt", "-o", "v.bin",
        ]);
        assert!(missing.is_err());

        let both = Options::try_parse_from([
            "cosbos", "volume", "--sensors", "s.txt", "--fixtures", "l.txt", "--dim", "3", "3", "3",
            "--hash", "h.bin", "--sigma", "1", "--observation", "e.txt", "-o", "v.bin",
        ]);
        assert!(both.is_err());
    }

    #[test]
    fn parses_reflection_command() {
        let options = Options::try_parse_from([
            "cosbos", "reflection", "--light", "1", "2", "3", "--sensor", "-1", "0", "2.5", "--dim", "4", "5",
            "--lambertian", "-o", "k.bin",
        ])
        .unwrap();
        match options.command {
            Command::Reflection { light, sensor, dim, lambertian, .. } => {
                assert_eq!(light, vec![1.0, 2.0, 3.0]);
                assert_eq!(sensor, vec![-1.0, 0.0, 2.5]);
                assert_eq!(dim, vec![4, 5]);
                assert!(lambertian);
            }
            _ => panic!("expected reflection command"),
        }
    }
}
