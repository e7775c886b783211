//! Minimal NumPy `.npy` codec for little-endian `f32` matrices.
//!
//! Covers exactly the subset this crate persists: C-ordered 2-d arrays of
//! `<f4`, written as format version 1.0 with the header padded to a
//! 64-byte boundary.
//!
//! Reference: <https://numpy.org/devdocs/reference/generated/numpy.lib.format.html>
use anyhow::{bail, Context, Result};
use ndarray::Array2;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

const MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Writes `array` to `path` as a `.npy` file.
pub fn write(path: impl AsRef<Path>, array: &Array2<f32>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("cannot create {:?}", path))?;
    let mut w = BufWriter::new(file);

    let (rows, cols) = array.dim();
    let dict = format!(
        "{{'descr': '<f4', 'fortran_order': False, 'shape': ({}, {}), }}",
        rows, cols
    );
    // Magic, version and length field take 10 bytes; the dict plus padding
    // must bring the total header size to a multiple of 64, with a newline
    // as the last header byte.
    let unpadded = MAGIC.len() + 2 + 2 + dict.len() + 1;
    let padding = (64 - unpadded % 64) % 64;

    w.write_all(MAGIC)?;
    w.write_all(&[1, 0])?;
    w.write_all(&((dict.len() + padding + 1) as u16).to_le_bytes())?;
    w.write_all(dict.as_bytes())?;
    w.write_all(&vec![b' '; padding])?;
    w.write_all(b"\n")?;

    for &v in array.iter() {
        w.write_all(&v.to_le_bytes())?;
    }
    w.flush()?;

    Ok(())
}

/// Reads a `.npy` file holding a little-endian `f32` matrix.
pub fn read(path: impl AsRef<Path>) -> Result<Array2<f32>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("cannot open {:?}", path))?;
    let mut r = BufReader::new(file);

    let mut magic = [0u8; 6];
    r.read_exact(&mut magic)?;
    if &magic != MAGIC {
        bail!("{:?} is not a valid .npy file (bad magic)", path);
    }

    let mut version = [0u8; 2];
    r.read_exact(&mut version)?;
    let header_len = if version[0] <= 1 {
        let mut buf = [0u8; 2];
        r.read_exact(&mut buf)?;
        u16::from_le_bytes(buf) as usize
    } else {
        let mut buf = [0u8; 4];
        r.read_exact(&mut buf)?;
        u32::from_le_bytes(buf) as usize
    };

    let mut header = vec![0u8; header_len];
    r.read_exact(&mut header)?;
    let header = std::str::from_utf8(&header).context("npy header is not utf8")?;
    if !header.contains("'<f4'") {
        bail!("unsupported dtype in npy header: {}", header.trim_end());
    }
    if header.contains("'fortran_order': True") {
        bail!("fortran-ordered npy files are not supported");
    }
    let (rows, cols) = parse_shape(header)?;

    let mut raw = vec![0u8; rows * cols * 4];
    r.read_exact(&mut raw)
        .with_context(|| format!("truncated npy data in {:?}", path))?;
    let data = raw
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect::<Vec<_>>();

    Ok(Array2::from_shape_vec((rows, cols), data).expect("shape follows from header"))
}

fn parse_shape(header: &str) -> Result<(usize, usize)> {
    let after_key = match header.find("'shape':") {
        Some(ix) => &header[ix..],
        None => bail!("no 'shape' key in npy header: {}", header.trim_end()),
    };
    let open = after_key.find('(').context("no opening paren in shape")?;
    let close = after_key.find(')').context("no closing paren in shape")?;
    let dims = after_key[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<usize>().context("bad shape dimension"))
        .collect::<Result<Vec<_>>>()?;

    match dims.as_slice() {
        [rows] => Ok((*rows, 1)),
        [rows, cols] => Ok((*rows, *cols)),
        _ => bail!("unsupported shape rank {}", dims.len()),
    }
}
