use std::{
    ffi::OsString,
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Seek, Write},
    path::{Path, PathBuf},
};

use log::{info, warn};
use ndarray::{arr0, prelude::*};
use ndarray_npy::{NpzWriter, WriteNpzError};

use crate::{
    constants::{CAL_STYLE, CAL_TYPE, CALFILE_SUFFIX, Float, GAIN_CONVENTION, X_ORIENTATION},
    error::WriteError,
    types::{DimensionContext, FrequencyArray, GainArray, TimeArray},
};

/// Descriptive fields of a calibration solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationAttributes {
    pub cal_style: String,
    pub cal_type: String,
    pub gain_convention: String,
    pub x_orientation: String,
    pub history: String,
}

impl Default for CalibrationAttributes {
    fn default() -> Self {
        Self {
            cal_style: CAL_STYLE.into(),
            cal_type: CAL_TYPE.into(),
            gain_convention: GAIN_CONVENTION.into(),
            x_orientation: X_ORIENTATION.into(),
            history: String::new(),
        }
    }
}

/// Gains together with the axes and bookkeeping arrays a calibration
/// consumer expects.
#[derive(Debug, Clone)]
pub struct CalibrationFile {
    pub attributes: CalibrationAttributes,
    pub gain_array: GainArray,
    pub flag_array: Array5<bool>,
    pub quality_array: Array5<Float>,
    pub freq_array: FrequencyArray,
    pub time_array: TimeArray,
    pub time_range: Array1<Float>,
    pub integration_time: Float,
    pub ant_array: Array1<i64>,
    pub jones_array: Array1<i64>,
}

impl CalibrationFile {
    /// Wrap `gains` with unflagged, zero-quality bookkeeping arrays.
    pub fn new(context: &DimensionContext, gains: GainArray) -> Self {
        assert_eq!(context.shape(), gains.dim());

        Self {
            attributes: CalibrationAttributes::default(),
            flag_array: Array5::from_elem(gains.dim(), false),
            quality_array: Array5::zeros(gains.dim()),
            gain_array: gains,
            freq_array: context.frequencies().clone(),
            time_array: context.times().clone(),
            time_range: Array::from(context.time_range().to_vec()),
            integration_time: context.integration_time(),
            ant_array: context.antennas(),
            jones_array: context.polarizations().clone(),
        }
    }

    /// Write every array as a member of an npz archive.
    pub fn write_npz<W: Write + Seek>(&self, writer: W) -> Result<W, WriteNpzError> {
        let mut npz = NpzWriter::new(writer);
        npz.add_array("gain_array", &self.gain_array)?;
        npz.add_array("flag_array", &self.flag_array)?;
        npz.add_array("quality_array", &self.quality_array)?;
        npz.add_array("freq_array", &self.freq_array)?;
        npz.add_array("time_array", &self.time_array)?;
        npz.add_array("time_range", &self.time_range)?;
        npz.add_array("integration_time", &arr0(self.integration_time))?;
        npz.add_array("ant_array", &self.ant_array)?;
        npz.add_array("jones_array", &self.jones_array)?;
        npz.finish()
    }

    /// Write to the first free name among `<base>.cal.npz`,
    /// `<base>_1.cal.npz`, `<base>_2.cal.npz`, ... and return it.
    ///
    /// Existing files are never overwritten.
    pub fn write_unique(&self, base: &Path) -> Result<PathBuf, WriteError> {
        let path = write_new_file(base, |file, path| {
            let mut writer = self.write_npz(BufWriter::new(file)).map_err(|source| {
                WriteError::Npz {
                    path: path.to_owned(),
                    source,
                }
            })?;
            writer.flush().map_err(|source| WriteError::Io {
                path: path.to_owned(),
                source,
            })
        })?;

        info!(
            "cal_style={} cal_type={} gain_convention={} x_orientation={}",
            self.attributes.cal_style,
            self.attributes.cal_type,
            self.attributes.gain_convention,
            self.attributes.x_orientation
        );
        Ok(path)
    }
}

/// Create the first free [`candidate_path`] for `base` and hand it to `write`.
///
/// A file that `write` fails on is removed again, so the name stays free for
/// the next run.
fn write_new_file<F>(base: &Path, write: F) -> Result<PathBuf, WriteError>
where
    F: FnOnce(File, &Path) -> Result<(), WriteError>,
{
    let mut attempt = 0;
    let (path, file) = loop {
        let path = candidate_path(base, attempt);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => break (path, file),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(source) => return Err(WriteError::Io { path, source }),
        }
    };

    match write(file, &path) {
        Ok(()) => Ok(path),
        Err(err) => {
            if let Err(remove_err) = fs::remove_file(&path) {
                warn!("could not remove incomplete '{}': {remove_err}", path.display());
            }
            Err(err)
        }
    }
}

/// Output name for the given attempt; attempt 0 has no numeric suffix.
pub fn candidate_path(base: &Path, attempt: usize) -> PathBuf {
    let mut name: OsString = base
        .file_name()
        .map(|name| name.to_owned())
        .unwrap_or_else(|| "mkgains".into());
    if attempt > 0 {
        name.push(format!("_{attempt}"));
    }
    name.push(CALFILE_SUFFIX);

    base.parent().unwrap_or_else(|| Path::new("")).join(name)
}

#[cfg(test)]
mod tests {
    use ndarray_npy::NpzReader;
    use ndarray_rand::rand::{SeedableRng, rngs::StdRng};
    use tempfile::tempdir;

    use super::*;
    use crate::{
        constants::{Complex, POL_XX, POL_YY},
        types::{FrequencyArrayExtension, GainArrayExtension, GainBounds, TimeArrayExtension},
    };

    fn context() -> DimensionContext {
        DimensionContext::new(
            2,
            1,
            FrequencyArray::channels(150e6, 1e6, 4),
            TimeArray::integrations(20.0, 8.0, 3),
            8.0,
            array![POL_XX, POL_YY],
        )
        .unwrap()
    }

    fn calfile() -> CalibrationFile {
        let ctx = context();
        let mut rng = StdRng::seed_from_u64(4);
        let gains = GainArray::draw(ctx.shape(), GainBounds { min: 1, max: 9 }, &mut rng);
        CalibrationFile::new(&ctx, gains)
    }

    #[test]
    fn candidate_names() {
        let base = Path::new("/data/zen.2457698.40355.xx.HH.uvcA");
        assert_eq!(
            candidate_path(base, 0),
            PathBuf::from("/data/zen.2457698.40355.xx.HH.uvcA.cal.npz")
        );
        assert_eq!(
            candidate_path(base, 3),
            PathBuf::from("/data/zen.2457698.40355.xx.HH.uvcA_3.cal.npz")
        );
        assert_eq!(
            candidate_path(Path::new("obs/"), 0),
            PathBuf::from("obs.cal.npz")
        );
        assert_eq!(candidate_path(Path::new("/"), 1), PathBuf::from("mkgains_1.cal.npz"));
    }

    #[test]
    fn bookkeeping_arrays_follow_context() {
        let file = calfile();
        assert_eq!(file.flag_array.dim(), (2, 1, 4, 3, 2));
        assert!(file.flag_array.iter().all(|&flag| !flag));
        assert!(file.quality_array.iter().all(|&q| q == 0.0));
        assert_eq!(file.time_range, array![16.0, 40.0]);
        assert_eq!(file.ant_array, array![0, 1]);
        assert_eq!(file.jones_array, array![POL_XX, POL_YY]);
        assert_eq!(file.attributes.gain_convention, "multiply");
    }

    #[test]
    fn never_overwrites_existing_files() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("obs");
        let file = calfile();

        let first = file.write_unique(&base).unwrap();
        let second = file.write_unique(&base).unwrap();
        let third = file.write_unique(&base).unwrap();

        assert_eq!(first, dir.path().join("obs.cal.npz"));
        assert_eq!(second, dir.path().join("obs_1.cal.npz"));
        assert_eq!(third, dir.path().join("obs_2.cal.npz"));
    }

    #[test]
    fn written_archive_reads_back() {
        let dir = tempdir().unwrap();
        let file = calfile();
        let path = file.write_unique(&dir.path().join("obs")).unwrap();

        let mut npz = NpzReader::new(File::open(path).unwrap()).unwrap();
        let gains: Array5<Complex> = npz.by_name("gain_array").unwrap();
        let jones: Array1<i64> = npz.by_name("jones_array").unwrap();
        assert_eq!(gains, file.gain_array);
        assert_eq!(jones, file.jones_array);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("no").join("such").join("dir");
        assert!(matches!(
            calfile().write_unique(&base),
            Err(WriteError::Io { .. })
        ));
    }

    #[test]
    fn failed_write_leaves_no_file_behind() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("obs");

        let err = write_new_file(&base, |mut file, path| {
            file.write_all(b"PK").unwrap();
            Err(WriteError::Io {
                path: path.to_owned(),
                source: io::Error::new(io::ErrorKind::Other, "disk full"),
            })
        })
        .unwrap_err();
        assert!(matches!(err, WriteError::Io { .. }));
        assert!(!dir.path().join("obs.cal.npz").exists());

        let path = calfile().write_unique(&base).unwrap();
        assert_eq!(path, dir.path().join("obs.cal.npz"));
    }
}
