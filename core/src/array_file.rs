//! Binary Array Files
//!
//! Layout (all integers little-endian):
//!
//! | field      | type            |
//! |------------|-----------------|
//! | magic      | `b"CSBS"`       |
//! | version    | `u32`           |
//! | flattening | `u8`            |
//! | rank       | `u32`           |
//! | extents    | `u64` x rank    |
//! | data       | `f64` x product |

use crate::cosbos::{product, Float};
use crate::error::*;
use crate::layout::Flattening;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};

/// File signature.
pub const MAGIC: &[u8; 4] = b"CSBS";

/// Current format version.
pub const VERSION: u32 = 1;

/// Largest rank accepted when reading.
const MAX_RANK: u32 = 8;

/// A dense array of `Float` values with its extents and flattening.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayFile {
    /// Order in which `data` is flattened.
    pub order: Flattening,

    /// Extents along each dimension.
    pub extents: Vec<usize>,

    /// The values.
    pub data: Vec<Float>,
}

impl ArrayFile {
    /// Returns a new `ArrayFile` after checking that the data length matches
    /// the extents.
    ///
    /// * `order`   - Order in which `data` is flattened.
    /// * `extents` - Extents along each dimension.
    /// * `data`    - The values.
    pub fn new(order: Flattening, extents: Vec<usize>, data: Vec<Float>) -> Result<Self> {
        check_len("array file", product(&extents), data.len())?;
        Ok(Self { order, extents, data })
    }

    /// Writes the array.
    ///
    /// * `writer` - The destination.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(MAGIC)?;
        writer.write_u32::<LittleEndian>(VERSION)?;
        writer.write_u8(self.order.tag())?;
        writer.write_u32::<LittleEndian>(self.extents.len() as u32)?;
        for &e in self.extents.iter() {
            writer.write_u64::<LittleEndian>(e as u64)?;
        }
        for &v in self.data.iter() {
            writer.write_f64::<LittleEndian>(v)?;
        }
        Ok(())
    }

    /// Reads an array.
    ///
    /// * `reader` - The source.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0_u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(Error::Parse(format!("bad array file signature {magic:?}")));
        }

        let version = reader.read_u32::<LittleEndian>()?;
        if version != VERSION {
            return Err(Error::Parse(format!("unsupported array file version {version}")));
        }

        let tag = reader.read_u8()?;
        let order = Flattening::from_tag(tag)
            .ok_or_else(|| Error::Parse(format!("unknown flattening tag {tag}")))?;

        let rank = reader.read_u32::<LittleEndian>()?;
        if rank == 0 || rank > MAX_RANK {
            return Err(Error::Parse(format!("unsupported array rank {rank}")));
        }

        let mut extents = Vec::with_capacity(rank as usize);
        for _ in 0..rank {
            let e = reader.read_u64::<LittleEndian>()?;
            let e = usize::try_from(e).map_err(|_| Error::Parse(format!("extent {e} too large")))?;
            extents.push(e);
        }
        let len = extents
            .iter()
            .try_fold(1_usize, |acc, &e| acc.checked_mul(e))
            .ok_or_else(|| Error::Parse(format!("extents {extents:?} too large")))?;

        let mut data = vec![0.0; len];
        reader.read_f64_into::<LittleEndian>(&mut data)?;

        // There should be nothing left.
        let mut rest = [0_u8; 1];
        if reader.read(&mut rest)? != 0 {
            return Err(Error::Parse(format!(
                "trailing data after {len} values of array {extents:?}"
            )));
        }

        Ok(Self { order, extents, data })
    }
}

/// Writes an array file.
///
/// * `path`  - Output file path.
/// * `array` - The array.
pub fn write_array(path: &str, array: &ArrayFile) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    array.write_to(&mut writer)?;
    writer.flush()?;
    info!("Wrote array {:?} ({}) to {path}", array.extents, array.order);
    Ok(())
}

/// Reads an array file.
///
/// * `path` - Input file path.
pub fn read_array(path: &str) -> Result<ArrayFile> {
    let mut reader = BufReader::new(File::open(path)?);
    let array = ArrayFile::read_from(&mut reader)?;
    info!("Read array {:?} ({}) from {path}", array.extents, array.order);
    Ok(array)
}
