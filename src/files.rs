use std::{
    fs::File,
    io::BufReader,
    path::{
        Path,
        PathBuf,
    },
};

use color_eyre::eyre::{
    Error,
    OptionExt,
    WrapErr,
};
use directories::ProjectDirs;
use incidence_file::{
    AdjacencyTable,
    PointTable,
};
use serde::{
    Serialize,
    de::DeserializeOwned,
};

use crate::util::format_path;

#[derive(Clone, Debug)]
pub struct AppFiles {
    project_dirs: ProjectDirs,
}

impl AppFiles {
    pub fn new(project_dirs: ProjectDirs) -> Self {
        Self { project_dirs }
    }

    pub fn open() -> Result<Self, Error> {
        let project_dirs = ProjectDirs::from("", "", std::env!("CARGO_PKG_NAME"))
            .ok_or_eyre("Could not determine a home directory")?;
        let app_files = Self::new(project_dirs);
        std::fs::create_dir_all(app_files.project_dirs.config_local_dir())?;
        Ok(app_files)
    }

    pub fn config_path(&self) -> PathBuf {
        self.project_dirs.config_local_dir().join("config.toml")
    }

    /// Read config file, or create one if it doesn't exist yet.
    pub fn read_config_or_create<T>(&self) -> Result<T, Error>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        read_or_create_config(self.config_path())
    }
}

/// Read a TOML config file, or write the default config to it if it doesn't
/// exist yet.
pub fn read_or_create_config<T>(path: impl AsRef<Path>) -> Result<T, Error>
where
    T: Serialize + DeserializeOwned + Default,
{
    let path = path.as_ref();

    let config = if !path.exists() {
        tracing::info!(path = %path.display(), "Creating config file");
        let config = T::default();
        let toml = toml::to_string_pretty(&config)?;
        std::fs::write(path, &toml)
            .wrap_err_with(|| format!("Could not write config file: {}", path.display()))?;
        config
    }
    else {
        tracing::info!(path = %path.display(), "Reading config file");
        let toml = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Could not read config file: {}", path.display()))?;

        toml::from_str(&toml)
            .wrap_err_with(|| format!("Invalid config file: {}", path.display()))?
    };

    Ok(config)
}

pub fn read_adjacency_table(path: impl AsRef<Path>) -> Result<AdjacencyTable, Error> {
    let path = path.as_ref();
    tracing::debug!(path = %format_path(path), "reading adjacency table");

    let file = File::open(path)
        .wrap_err_with(|| format!("Could not open adjacency table: {}", format_path(path)))?;
    AdjacencyTable::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("Invalid adjacency table: {}", format_path(path)))
}

pub fn read_point_table(path: impl AsRef<Path>) -> Result<PointTable, Error> {
    let path = path.as_ref();
    tracing::debug!(path = %format_path(path), "reading points");

    let file = File::open(path)
        .wrap_err_with(|| format!("Could not open points table: {}", format_path(path)))?;
    PointTable::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("Invalid points table: {}", format_path(path)))
}
