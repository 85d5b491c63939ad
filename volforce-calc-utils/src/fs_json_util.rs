use std::{
    fmt::Debug,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use fs_err::File;
use serde::{Deserialize, Serialize};

pub fn write_json<P: Into<PathBuf> + Debug, T: Serialize>(path: P, value: &T) -> anyhow::Result<()> {
    let path = path.into();
    (|| {
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
        anyhow::Ok(())
    })()
    .with_context(|| format!("While writing {} to {path:?}", std::any::type_name::<T>()))
}

pub fn read_toml<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    let text = fs_err::read_to_string(&path)?;
    toml::from_str(&text)
        .with_context(|| format!("While reading {path:?} as {}", std::any::type_name::<T>()))
}

/// Reads `path` as TOML if given, falling back to `T::default()` otherwise.
pub fn read_toml_or_default<T: for<'de> Deserialize<'de> + Default>(
    path: Option<&Path>,
) -> anyhow::Result<T> {
    match path {
        Some(path) => read_toml(path),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::{read_toml, read_toml_or_default, write_json};

    #[derive(Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct Sample {
        #[serde(default)]
        steps: usize,
        #[serde(default)]
        name: String,
    }

    #[test]
    fn test_read_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.toml");
        fs_err::write(&path, "steps = 7\nname = \"abc\"\n").unwrap();
        let sample: Sample = read_toml(&path).unwrap();
        assert_eq!(
            sample,
            Sample {
                steps: 7,
                name: "abc".to_owned()
            }
        );
    }

    #[test]
    fn test_read_toml_error_mentions_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs_err::write(&path, "steps = \"not a number\"").unwrap();
        let err = read_toml::<_, Sample>(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.toml"));
    }

    #[test]
    fn test_read_toml_or_default() {
        let sample: Sample = read_toml_or_default(None).unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let sample = Sample {
            steps: 3,
            name: "x".to_owned(),
        };
        write_json(&path, &sample).unwrap();
        let read: Sample = serde_json::from_str(&fs_err::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, sample);
    }
}
